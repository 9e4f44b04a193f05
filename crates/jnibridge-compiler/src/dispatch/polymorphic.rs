//! Safe-downcast dispatch plans for opaque handle classes.
//!
//! A handle only knows the concrete type it was created with. Converting it to
//! a base class pointer therefore tests each known subtype, most derived first,
//! and extracts through the first that matches. Three flavors differ only in
//! the terminal accessor:
//!
//! | Flavor | Accessor      | Result                |
//! |--------|---------------|-----------------------|
//! | Raw    | `getAs`       | `Base *`              |
//! | Shared | `getAsShared` | `std::shared_ptr<Base>` |
//! | Unique | `getAsUnique` | `std::unique_ptr<Base>` |
//!
//! A fourth chain with the same order maps a native instance to the managed
//! path of its most specific known type.

use std::fmt::Write;

use jnibridge_core::{ClassModel, JavaPath};
use jnibridge_registry::TypeHierarchy;
use jnibridge_registry::builtin::paths;
use tracing::warn;

const HANDLE_TYPE: &str = "jnibridge::internal::Handle";
const INDENT: &str = "        ";

/// Whether the chain needs runtime type tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchShape {
    /// Exactly one candidate; cast without testing.
    Unconditional,
    /// Test each candidate in order.
    Cascade,
}

/// Ownership flavor of a handle extraction chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchFlavor {
    Raw,
    Shared,
    Unique,
}

impl DispatchFlavor {
    pub const ALL: [DispatchFlavor; 3] = [
        DispatchFlavor::Raw,
        DispatchFlavor::Shared,
        DispatchFlavor::Unique,
    ];

    /// Terminal handle accessor.
    pub fn accessor(self) -> &'static str {
        match self {
            DispatchFlavor::Raw => "getAs",
            DispatchFlavor::Shared => "getAsShared",
            DispatchFlavor::Unique => "getAsUnique",
        }
    }

    /// Function template wrapping the chain.
    pub fn template_path(self) -> &'static str {
        match self {
            DispatchFlavor::Raw => paths::POLYMORPHIC_RAW,
            DispatchFlavor::Shared => paths::POLYMORPHIC_SHARED,
            DispatchFlavor::Unique => paths::POLYMORPHIC_UNIQUE,
        }
    }
}

/// One tested type in a dispatch chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchCandidate {
    pub path: JavaPath,
    pub native_type: String,
    /// Slash separated managed path.
    pub managed_path: String,
}

/// Dispatch chain for one opaque handle class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolymorphicPlan {
    pub base: JavaPath,
    pub base_native: String,
    /// Candidates in test order, most derived first.
    pub candidates: Vec<DispatchCandidate>,
}

impl PolymorphicPlan {
    /// Plan dispatch for `model`, or `None` if it needs none.
    pub fn for_class(model: &ClassModel, hierarchy: &TypeHierarchy) -> Option<Self> {
        if !model.needs_dispatch() {
            return None;
        }
        let candidates: Vec<DispatchCandidate> = model
            .subclasses
            .iter()
            .map(|sub| DispatchCandidate {
                path: sub.path.clone(),
                native_type: sub.native_type(),
                managed_path: sub.path.slash_path(),
            })
            .collect();
        warn_on_diamonds(&model.path, &candidates, hierarchy);
        Some(Self {
            base: model.path.clone(),
            base_native: model.native_type(),
            candidates,
        })
    }

    pub fn shape(&self) -> DispatchShape {
        if self.candidates.len() == 1 {
            DispatchShape::Unconditional
        } else {
            DispatchShape::Cascade
        }
    }

    /// Body of the handle extraction function for `flavor`.
    pub fn handle_body(&self, flavor: DispatchFlavor) -> String {
        let accessor = flavor.accessor();
        let base = &self.base_native;
        let mut out = String::new();
        let _ = writeln!(out, "{INDENT}if (!handle) {{");
        let _ = writeln!(out, "{INDENT}    return nullptr;");
        let _ = writeln!(out, "{INDENT}}}");

        match (self.shape(), self.candidates.as_slice()) {
            (DispatchShape::Unconditional, [only]) => {
                let _ = write!(
                    out,
                    "{INDENT}return static_cast<{HANDLE_TYPE}<{}> *>(handle)->{accessor}<{base}>(env);",
                    only.native_type
                );
            }
            _ => {
                for (i, candidate) in self.candidates.iter().enumerate() {
                    let keyword = if i == 0 { "if" } else { "else if" };
                    let _ = writeln!(
                        out,
                        "{INDENT}{keyword} (auto *actualType = dynamic_cast<{HANDLE_TYPE}<{}> *>(handle)) {{",
                        candidate.native_type
                    );
                    let _ = writeln!(
                        out,
                        "{INDENT}    return actualType->{accessor}<{base}>(env);"
                    );
                    let _ = writeln!(out, "{INDENT}}}");
                }
                let _ = write!(out, "{INDENT}return nullptr;");
            }
        }
        out
    }

    /// Body of the instance to managed path function.
    pub fn class_name_body(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{INDENT}if (!instance) {{");
        let _ = writeln!(out, "{INDENT}    return nullptr;");
        let _ = writeln!(out, "{INDENT}}}");

        match (self.shape(), self.candidates.as_slice()) {
            (DispatchShape::Unconditional, [only]) => {
                let _ = write!(out, "{INDENT}return \"{}\";", only.managed_path);
            }
            _ => {
                for (i, candidate) in self.candidates.iter().enumerate() {
                    let keyword = if i == 0 { "if" } else { "else if" };
                    let _ = writeln!(
                        out,
                        "{INDENT}{keyword} (dynamic_cast<const {} *>(instance)) {{",
                        candidate.native_type
                    );
                    let _ = writeln!(out, "{INDENT}    return \"{}\";", candidate.managed_path);
                    let _ = writeln!(out, "{INDENT}}}");
                }
                let _ = write!(out, "{INDENT}return nullptr;");
            }
        }
        out
    }
}

/// Two unrelated candidates sharing a subtype are ordered by name only.
fn warn_on_diamonds(base: &JavaPath, candidates: &[DispatchCandidate], hierarchy: &TypeHierarchy) {
    for (first, second, shared) in diamonds(candidates, hierarchy) {
        warn!(
            target: "jnibridge::dispatch",
            class = %base,
            first = %first,
            second = %second,
            common_subtype = %shared,
            "unrelated dispatch candidates share a subtype; ordered by name"
        );
    }
}

/// Unrelated candidate pairs with the first candidate below both of them.
fn diamonds<'c>(
    candidates: &'c [DispatchCandidate],
    hierarchy: &TypeHierarchy,
) -> Vec<(&'c JavaPath, &'c JavaPath, &'c JavaPath)> {
    let mut found = Vec::new();
    for (i, a) in candidates.iter().enumerate() {
        for b in &candidates[i + 1..] {
            let related = hierarchy.is_strict_subtype(&a.path, &b.path)
                || hierarchy.is_strict_subtype(&b.path, &a.path);
            if related {
                continue;
            }
            let shared = candidates.iter().find(|c| {
                hierarchy.is_strict_subtype(&c.path, &a.path)
                    && hierarchy.is_strict_subtype(&c.path, &b.path)
            });
            if let Some(shared) = shared {
                found.push((&a.path, &b.path, &shared.path));
            }
        }
    }
    found
}
