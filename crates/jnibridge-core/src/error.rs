//! Error types for binding generation.
//!
//! ## Error Hierarchy
//!
//! ```text
//! BridgeError (invocation boundary)
//! ├── Configuration      - raised outside any class (patterns, registries)
//! ├── Class              - ConfigurationError while resolving a class
//! └── Method             - ConfigurationError while resolving a method
//! ```
//!
//! Every configuration error is fatal: generation stops at the first one and
//! produces no output.

use thiserror::Error;

// ============================================================================
// Configuration Errors
// ============================================================================

/// A problem in the declarations, registries or resources.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// No discovery patterns were given.
    #[error("at least one class pattern is required")]
    EmptyPatternList,

    /// A discovery pattern is malformed.
    #[error("invalid class pattern '{0}'")]
    InvalidPattern(String),

    /// An exact discovery pattern names no declared class.
    #[error("class pattern '{0}' does not match any declared class")]
    PatternNotFound(String),

    /// The same class was declared twice.
    #[error("class '{0}' is already declared")]
    DuplicateClass(String),

    /// The declared inheritance graph contains a cycle.
    #[error("inheritance cycle involving '{0}'")]
    CyclicInheritance(String),

    /// A class requested for resolution is unknown or has no bridge declaration.
    #[error("class '{0}' has no bridge declaration")]
    NotBridged(String),

    /// An inherit-from target is unknown or has no bridge declaration.
    #[error("class '{class}' inherits bridge metadata from '{target}', which is not a bridged class")]
    MissingBridgeDeclaration { class: String, target: String },

    /// A bridged enum lacks an ordinal accessor.
    #[error("enum '{class}' must declare {accessor}")]
    MissingEnumAccessor {
        class: String,
        accessor: &'static str,
    },

    /// A mapper has no template declaration.
    #[error("mapper '{mapper}' does not declare its conversion templates")]
    MissingTemplateDeclaration { mapper: String },

    /// A mapper id was referenced but never registered.
    #[error("mapper '{0}' has not been registered")]
    UnknownMapper(String),

    /// A mapper id was registered twice.
    #[error("mapper '{0}' is already registered")]
    DuplicateMapper(String),

    /// No mapper applies to a logical type at any priority level.
    #[error("no mapper found for type '{ty}'")]
    UnmappedType { ty: String },

    /// A mapper's native and logical template argument lists differ in length.
    #[error("mapper '{mapper}' declares {native} native and {logical} managed template arguments")]
    TemplateArgumentMismatch {
        mapper: String,
        native: usize,
        logical: usize,
    },

    /// An exception rule targets a type the hierarchy does not know.
    #[error("exception target '{0}' is not a declared type")]
    UnknownExceptionTarget(String),

    /// A template or custom code resource could not be loaded.
    #[error("resource '{path}' could not be loaded: {reason}")]
    MissingResource { path: String, reason: String },
}

impl ConfigurationError {
    pub fn missing_resource(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MissingResource {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

// ============================================================================
// Invocation Errors
// ============================================================================

/// The single terminating error of a generation invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("class '{class}': {source}")]
    Class {
        class: String,
        #[source]
        source: ConfigurationError,
    },

    #[error("method '{class}.{method}': {source}")]
    Method {
        class: String,
        method: String,
        #[source]
        source: ConfigurationError,
    },
}

impl BridgeError {
    pub fn in_class(class: impl ToString, source: ConfigurationError) -> Self {
        Self::Class {
            class: class.to_string(),
            source,
        }
    }

    pub fn in_method(
        class: impl ToString,
        method: impl Into<String>,
        source: ConfigurationError,
    ) -> Self {
        Self::Method {
            class: class.to_string(),
            method: method.into(),
            source,
        }
    }

    /// The underlying configuration error.
    pub fn configuration(&self) -> &ConfigurationError {
        match self {
            BridgeError::Configuration(e) => e,
            BridgeError::Class { source, .. } | BridgeError::Method { source, .. } => source,
        }
    }

    /// Class the error was raised in, if any.
    pub fn class(&self) -> Option<&str> {
        match self {
            BridgeError::Configuration(_) => None,
            BridgeError::Class { class, .. } | BridgeError::Method { class, .. } => Some(class),
        }
    }
}
