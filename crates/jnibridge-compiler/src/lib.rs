//! JNI Binding Compiler
//!
//! Turns a [`DeclarationSnapshot`](jnibridge_registry::DeclarationSnapshot) into
//! native source text.
//!
//! ## Pipeline
//!
//! 1. **Resolution**: each selected class becomes a [`ClassModel`](jnibridge_core::ClassModel);
//!    every parameter and return value becomes a [`TypeBinding`](jnibridge_core::TypeBinding)
//! 2. **Planning**: handle classes get a [`PolymorphicPlan`], the exception
//!    registry becomes an [`ExceptionPlan`]
//! 3. **Composition**: models and plans are rendered into [`OutputUnit`]s
//!
//! ## Modules
//!
//! - [`template`]: `${name}` substitution and blank line collapsing
//! - [`mangle`]: boundary symbol names
//! - [`type_resolver`]: mapper chain, enum and handle conversions
//! - [`method_resolver`]: method models with positional parameter ids
//! - [`class_resolver`]: class models, metadata merge, subclass sets
//! - [`dispatch`]: polymorphic and exception dispatch plans
//! - [`compose`]: output units

pub mod class_resolver;
pub mod compose;
pub mod context;
pub mod dispatch;
pub mod mangle;
pub mod method_resolver;
mod options;
pub mod placeholder;
pub mod template;
pub mod type_resolver;

pub use class_resolver::ClassResolver;
pub use compose::{Composer, OutputUnit, UnitKind};
pub use context::GenerationContext;
pub use dispatch::{
    DispatchFlavor, DispatchShape, ExceptionPlan, PolymorphicPlan, most_derived_first,
};
pub use mangle::mangle;
pub use method_resolver::MethodResolver;
pub use options::GeneratorOptions;
pub use template::{Replacements, collapse_blank_lines, substitute};
pub use type_resolver::{MapperSource, TypeResolver};
