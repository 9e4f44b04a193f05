//! Boundary symbol mangling.
//!
//! Symbols follow the JNI long form:
//!
//! ```text
//! Java_<escaped class>_<escaped method>__<escaped argument descriptor>
//! ```
//!
//! Escaping is applied to every component so the whole symbol is injective:
//!
//! | input                         | output   |
//! |-------------------------------|----------|
//! | `.` and `/`                   | `_`      |
//! | `_`                           | `_1`     |
//! | `;`                           | `_2`     |
//! | `[`                           | `_3`     |
//! | other non-alphanumeric (`$`)  | `_0xxxx` |
//!
//! The argument descriptor is the erased parameter list with its enclosing
//! parentheses removed; the return type never contributes.

use std::fmt::Write;

use jnibridge_core::{JavaPath, LogicalType};

/// Escape one symbol component.
pub fn escape(component: &str) -> String {
    let mut out = String::with_capacity(component.len());
    for ch in component.chars() {
        match ch {
            'a'..='z' | 'A'..='Z' | '0'..='9' => out.push(ch),
            '.' | '/' => out.push('_'),
            '_' => out.push_str("_1"),
            ';' => out.push_str("_2"),
            '[' => out.push_str("_3"),
            other => {
                let mut units = [0u16; 2];
                for unit in other.encode_utf16(&mut units) {
                    // Writing into a String cannot fail.
                    let _ = write!(out, "_0{:04x}", unit);
                }
            }
        }
    }
    out
}

/// `Java_` followed by the escaped binary class name.
pub fn class_descriptor(class: &JavaPath) -> String {
    format!("Java_{}", escape(class.binary_name()))
}

/// Escaped argument descriptor of an erased parameter list.
pub fn method_descriptor<'a>(params: impl IntoIterator<Item = &'a LogicalType>) -> String {
    let raw: String = params.into_iter().map(LogicalType::descriptor).collect();
    escape(&raw)
}

/// Full boundary symbol of a native method.
pub fn mangle<'a>(
    class: &JavaPath,
    method: &str,
    params: impl IntoIterator<Item = &'a LogicalType>,
) -> String {
    format!(
        "{}_{}__{}",
        class_descriptor(class),
        escape(method),
        method_descriptor(params)
    )
}
