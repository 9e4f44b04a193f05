//! Registries and declaration storage for JNI binding generation.
//!
//! - [`MapperRegistry`]: default and named boundary mappings
//! - [`ExceptionRegistry`]: native to managed exception translations
//! - [`SnapshotBuilder`] / [`DeclarationSnapshot`]: declared types and the selection
//! - [`TypeHierarchy`]: subtype graph backing subtype and depth queries
//! - [`BuiltinResources`] and friends: template lookup

pub mod builtin;
mod exceptions;
mod hierarchy;
mod mapper_registry;
mod resources;
mod snapshot;

pub use builtin::BuiltinResources;
pub use exceptions::{ExceptionRegistry, ExceptionRule};
pub use hierarchy::{HierarchyEdge, TypeHierarchy};
pub use mapper_registry::MapperRegistry;
pub use resources::{DirectoryResources, InMemoryResources, LayeredResources};
pub use snapshot::{ClassPattern, DeclarationSnapshot, OBJECT, SnapshotBuilder};
