//! Placeholder substitution over template text.
//!
//! Templates reference values as `${name}`, where `name` consists of ASCII
//! letters, digits and underscores. Substitution is a single left-to-right
//! pass: inserted values are never scanned again, and placeholders without a
//! replacement are copied verbatim so a later stage can fill them in.

use rustc_hash::FxHashMap;

/// Replacement table for one substitution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Replacements {
    values: FxHashMap<String, String>,
}

impl Replacements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Copy every entry of `other`, overwriting existing keys.
    pub fn extend(&mut self, other: &Replacements) {
        for (k, v) in &other.values {
            self.values.insert(k.clone(), v.clone());
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn is_key_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Replace every `${name}` with its value from `replacements`.
pub fn substitute(template: &str, replacements: &Replacements) -> String {
    let bytes = template.as_bytes();
    let mut out = String::with_capacity(template.len());
    let mut copied = 0;
    let mut i = 0;

    while i + 1 < bytes.len() {
        if bytes[i] != b'$' || bytes[i + 1] != b'{' {
            i += 1;
            continue;
        }
        let key_start = i + 2;
        let mut key_end = key_start;
        while key_end < bytes.len() && is_key_byte(bytes[key_end]) {
            key_end += 1;
        }
        let closed = key_end < bytes.len() && bytes[key_end] == b'}' && key_end > key_start;
        if !closed {
            // Not a placeholder; keep scanning after the `${`.
            i = key_start;
            continue;
        }
        if let Some(value) = replacements.get(&template[key_start..key_end]) {
            out.push_str(&template[copied..i]);
            out.push_str(value);
            copied = key_end + 1;
        }
        i = key_end + 1;
    }

    out.push_str(&template[copied..]);
    out
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Remove every run of two or more consecutive blank lines.
///
/// A single blank line is kept. Whitespace-only lines count as blank.
pub fn collapse_blank_lines(text: &str) -> String {
    let trailing_newline = text.ends_with('\n');
    let body = text.strip_suffix('\n').unwrap_or(text);
    let lines: Vec<&str> = body.split('\n').collect();

    let mut kept: Vec<&str> = Vec::with_capacity(lines.len());
    let mut i = 0;
    while i < lines.len() {
        if !is_blank(lines[i]) {
            kept.push(lines[i]);
            i += 1;
            continue;
        }
        let start = i;
        while i < lines.len() && is_blank(lines[i]) {
            i += 1;
        }
        if i - start == 1 {
            kept.push(lines[start]);
        }
    }

    let mut out = kept.join("\n");
    if trailing_newline {
        out.push('\n');
    }
    out
}
