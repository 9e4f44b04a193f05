//! Resolved models.
//!
//! Models are produced from declarations by the compiler's resolvers and are
//! what the composer renders. They are built once per generation and dropped
//! after their output unit is produced.
//!
//! ## Occurrence ids
//!
//! A [`TypeBinding`] with an id is an inbound parameter; a binding without one
//! is an outbound return value or the synthesized self binding. The id selects
//! which conversion template applies.

use std::sync::Arc;

use crate::{
    AllocKind, CustomOverrides, JavaPath, LogicalType, MapperId, MethodRole, NativeName, Ownership,
};

/// How a binding's conversion templates were chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionKind {
    /// Resolved through the mapper chain.
    Mapper(MapperId),
    /// Fixed enum ordinal conversion.
    Enum,
    /// Opaque handle with the given ownership family.
    Handle(Ownership),
    /// The calling instance of a non-static method.
    SelfHandle,
}

/// Resolved representation of one value occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeBinding {
    pub logical: LogicalType,
    /// Positional index for parameters, `None` for return and self.
    pub id: Option<String>,
    pub conversion: ConversionKind,
    pub native_type: String,
    pub abi_tag: String,
    pub in_template: String,
    pub out_template: String,
    /// Cleanup text, already rendered for this occurrence.
    pub cleanup: Option<String>,
    pub is_const: bool,
    pub ignore_null_check: bool,
    /// Positional (native argument, logical argument) pairs.
    pub template_args: Vec<(String, LogicalType)>,
    pub custom: CustomOverrides,
}

impl TypeBinding {
    pub fn is_parameter(&self) -> bool {
        self.id.is_some()
    }

    /// The template that applies to this occurrence's direction.
    pub fn conversion_template(&self) -> &str {
        if self.is_parameter() {
            &self.in_template
        } else {
            &self.out_template
        }
    }

    /// Native type with the `const` qualifier applied.
    pub fn qualified_native_type(&self) -> String {
        if self.is_const {
            format!("const {}", self.native_type)
        } else {
            self.native_type.clone()
        }
    }

    /// ABI tag after custom overrides.
    pub fn effective_abi_tag(&self) -> &str {
        self.custom.jni_type.as_deref().unwrap_or(&self.abi_tag)
    }

    /// Native variable name of this occurrence.
    pub fn c_var(&self) -> String {
        match &self.custom.c_var {
            Some(var) => var.clone(),
            None => format!("cVar{}", self.id.as_deref().unwrap_or("")),
        }
    }

    /// Boundary variable name of this occurrence.
    pub fn jni_var(&self) -> String {
        match &self.custom.jni_var {
            Some(var) => var.clone(),
            None => format!("jniVar{}", self.id.as_deref().unwrap_or("")),
        }
    }
}

/// A resolved native-bound method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodModel {
    /// Name on the managed side.
    pub managed_name: String,
    /// Native namespace, `::` separated; may be empty.
    pub namespace: String,
    pub native_name: String,
    pub symbol: String,
    pub is_static: bool,
    pub role: MethodRole,
    pub self_binding: Option<TypeBinding>,
    pub return_binding: TypeBinding,
    pub params: Vec<TypeBinding>,
    pub function_call: Option<String>,
}

impl MethodModel {
    /// Native function name qualified with its namespace.
    pub fn qualified_native_name(&self) -> String {
        if self.namespace.is_empty() {
            self.native_name.clone()
        } else {
            format!("{}::{}", self.namespace, self.native_name)
        }
    }

    pub fn alloc_kind(&self) -> Option<AllocKind> {
        match self.role {
            MethodRole::Allocate(kind) => Some(kind),
            _ => None,
        }
    }
}

/// A fully resolved bridged class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassModel {
    pub path: JavaPath,
    pub native: NativeName,
    /// Name on the managed side.
    pub managed_name: String,
    /// Merged native includes, first occurrence order.
    pub includes: Vec<String>,
    /// Merged custom code resource paths, first occurrence order.
    pub custom_code_paths: Vec<String>,
    pub methods: Vec<MethodModel>,
    /// Known subtypes, most derived first; contains `self` for handle classes.
    pub subclasses: Vec<Arc<ClassModel>>,
    pub opaque_handle: bool,
    pub is_enum: bool,
}

impl ClassModel {
    /// Fully qualified native type.
    pub fn native_type(&self) -> String {
        self.native.to_string()
    }

    /// Whether dispatch helpers are generated for this class.
    pub fn needs_dispatch(&self) -> bool {
        self.opaque_handle && !self.subclasses.is_empty()
    }
}
