//! Attribute bags attached to declaration nodes.
//!
//! Marker tags on value occurrences and methods (mapper selection, ownership,
//! const-ness, lifecycle roles, custom overrides) are carried as plain typed
//! values so resolution never needs runtime reflection.

use bitflags::bitflags;

use crate::MapperId;

/// How an opaque-handle value crosses the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Ownership {
    /// Copied by value.
    #[default]
    Value,
    /// Raw pointer, ownership stays native.
    Pointer,
    /// Native reference.
    Reference,
    /// `std::shared_ptr` shared ownership.
    Shared,
    /// `std::unique_ptr` unique ownership.
    Unique,
}

impl Ownership {
    pub fn name(self) -> &'static str {
        match self {
            Ownership::Value => "val",
            Ownership::Pointer => "ptr",
            Ownership::Reference => "ref",
            Ownership::Shared => "shared",
            Ownership::Unique => "unique",
        }
    }
}

/// Storage strategy of an allocation function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AllocKind {
    #[default]
    Raw,
    Shared,
    Unique,
}

/// Lifecycle role of a native method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MethodRole {
    #[default]
    Regular,
    /// Creates a native instance and returns its handle.
    Allocate(AllocKind),
    /// Destroys the native instance behind a handle.
    Deallocate,
}

bitflags! {
    /// Modifier flags on a single value occurrence.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct OccurrenceFlags: u8 {
        /// Native type is `const`-qualified.
        const CONST = 0x01;
        /// Skip the generated null check for inbound handles.
        const IGNORE_NULLCHECK = 0x02;
    }
}

/// Per-occurrence overrides of otherwise derived values.
///
/// Every field is optional; `None` keeps the resolved value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CustomOverrides {
    pub c_type: Option<String>,
    pub jni_type: Option<String>,
    pub c_var: Option<String>,
    pub jni_var: Option<String>,
    /// Resource path replacing the inbound conversion template.
    pub in_template: Option<String>,
    /// Resource path replacing the outbound conversion template.
    pub out_template: Option<String>,
}

impl CustomOverrides {
    pub fn is_empty(&self) -> bool {
        *self == CustomOverrides::default()
    }
}

/// Tags attached to one parameter or return value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OccurrenceTags {
    /// Explicit mapper for this exact occurrence.
    pub mapper: Option<MapperId>,
    /// Lifetime qualifier for opaque-handle values.
    pub ownership: Option<Ownership>,
    pub flags: OccurrenceFlags,
    pub custom: CustomOverrides,
}

/// Tags attached to a native method.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MethodTags {
    /// Native namespace override.
    pub namespace: Option<String>,
    /// Native function name override.
    pub native_name: Option<String>,
    pub role: MethodRole,
    /// Replaces the generated native call expression.
    pub function_call: Option<String>,
}
