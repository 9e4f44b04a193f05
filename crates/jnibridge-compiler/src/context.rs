//! Shared read-only state of one generation invocation.

use std::borrow::Cow;

use jnibridge_core::{ClassDecl, ConfigurationError, JavaPath, ResourceProvider};
use jnibridge_registry::{DeclarationSnapshot, ExceptionRegistry, MapperRegistry};

/// Everything resolution and composition read from.
///
/// All members are borrowed immutably for the whole invocation.
#[derive(Clone, Copy)]
pub struct GenerationContext<'a> {
    pub snapshot: &'a DeclarationSnapshot,
    pub mappers: &'a MapperRegistry,
    pub exceptions: &'a ExceptionRegistry,
    pub resources: &'a dyn ResourceProvider,
}

impl<'a> GenerationContext<'a> {
    pub fn new(
        snapshot: &'a DeclarationSnapshot,
        mappers: &'a MapperRegistry,
        exceptions: &'a ExceptionRegistry,
        resources: &'a dyn ResourceProvider,
    ) -> Self {
        Self {
            snapshot,
            mappers,
            exceptions,
            resources,
        }
    }

    pub fn decl(&self, path: &JavaPath) -> Option<&'a ClassDecl> {
        self.snapshot.get(path)
    }

    /// Load a resource through the configured provider.
    pub fn load(&self, path: &str) -> Result<Cow<'a, str>, ConfigurationError> {
        self.resources.load(path)
    }
}

impl std::fmt::Debug for GenerationContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationContext")
            .field("declarations", &self.snapshot.len())
            .field("selected", &self.snapshot.selected_paths().len())
            .field("mappers", &self.mappers.len())
            .field("exceptions", &self.exceptions.len())
            .finish()
    }
}
