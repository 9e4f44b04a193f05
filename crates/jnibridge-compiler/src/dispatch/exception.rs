//! Ordering of exception translation rules.
//!
//! The generated classifier tests the caught native exception against each
//! registered type in turn; the first match names the managed exception class.
//! Rules targeting deeper managed classes are tested first so a specific
//! translation is never shadowed by a general one. Ties break on the target
//! name, then the native name.

use std::fmt::Write;

use jnibridge_core::{ConfigurationError, JavaPath};
use jnibridge_registry::{ExceptionRegistry, TypeHierarchy};

const INDENT: &str = "        ";

/// A translation rule with its target's inheritance depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedException {
    pub native: String,
    pub target: JavaPath,
    pub depth: usize,
}

/// Exception rules in test order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExceptionPlan {
    entries: Vec<PlannedException>,
}

impl ExceptionPlan {
    pub fn new(
        registry: &ExceptionRegistry,
        hierarchy: &TypeHierarchy,
    ) -> Result<Self, ConfigurationError> {
        let mut entries = registry
            .rules()
            .iter()
            .map(|rule| {
                let Some(depth) = hierarchy.depth(&rule.target) else {
                    let target = rule.target.to_string();
                    return Err(ConfigurationError::UnknownExceptionTarget(target));
                };
                Ok(PlannedException {
                    native: rule.native.clone(),
                    target: rule.target.clone(),
                    depth,
                })
            })
            .collect::<Result<Vec<_>, ConfigurationError>>()?;

        entries.sort_by(|a, b| {
            b.depth
                .cmp(&a.depth)
                .then_with(|| a.target.cmp(&b.target))
                .then_with(|| a.native.cmp(&b.native))
        });
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[PlannedException] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Body of the mapped exception classifier.
    pub fn body(&self) -> String {
        let mut out = String::new();
        for (i, entry) in self.entries.iter().enumerate() {
            let keyword = if i == 0 { "if" } else { "else if" };
            let _ = writeln!(
                out,
                "{INDENT}{keyword} (dynamic_cast<const {} *>(&e)) {{",
                entry.native
            );
            let _ = writeln!(
                out,
                "{INDENT}    return env->FindClass(\"{}\");",
                entry.target.slash_path()
            );
            let _ = writeln!(out, "{INDENT}}}");
        }
        let _ = write!(out, "{INDENT}return nullptr;");
        out
    }
}
