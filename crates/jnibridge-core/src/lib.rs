//! Core types for JNI binding generation.
//!
//! This crate holds the vocabulary shared by every stage of generation:
//!
//! - [`JavaPath`], [`NativeName`], [`LogicalType`]: names and erased types
//! - [`ClassDecl`], [`MethodDecl`], [`TypeOccurrence`]: raw declarations with tags
//! - [`MappingRule`]: how a logical type crosses the boundary
//! - [`ClassModel`], [`MethodModel`], [`TypeBinding`]: resolved models
//! - [`ConfigurationError`], [`BridgeError`]: errors
//! - [`ResourceProvider`]: template and custom code lookup

mod declaration;
mod error;
mod java_path;
mod logical_type;
mod mapping;
mod model;
mod native_name;
mod resources;
mod tags;

pub use declaration::{
    BridgeDecl, BridgeMetadata, ClassDecl, ClassKind, MethodDecl, TemplatePair, TypeOccurrence,
};
pub use error::{BridgeError, ConfigurationError};
pub use java_path::JavaPath;
pub use logical_type::{LogicalType, Primitive};
pub use mapping::{MapperId, MappingRule, MappingTemplates};
pub use model::{ClassModel, ConversionKind, MethodModel, TypeBinding};
pub use native_name::NativeName;
pub use resources::ResourceProvider;
pub use tags::{
    AllocKind, CustomOverrides, MethodRole, MethodTags, OccurrenceFlags, OccurrenceTags, Ownership,
};
