//! Composition of resolved models into output units.
//!
//! ## Units
//!
//! | Kind                   | Path                                              |
//! |------------------------|---------------------------------------------------|
//! | `Class`                | `<package>/<SimpleName><suffix>`                  |
//! | `Handle`               | `<internal>/JniBridgeHandle.cpp`                  |
//! | `Exception`            | `<internal>/JniBridgeExceptionHandler.cpp`        |
//! | `Polymorphic`          | `<internal>/polymorphism/<escaped name>.jni.hpp`  |
//! | `PolymorphicAggregate` | `<internal>/JniBridgePolymorphicHelper.cpp`       |
//!
//! Composition never resolves anything itself; every failure here is a missing
//! resource.

pub mod binding;
mod class_unit;
mod helpers;
mod method;

use jnibridge_core::ConfigurationError;
use xxhash_rust::xxh64::xxh64;

use crate::context::GenerationContext;
use crate::options::GeneratorOptions;

pub(crate) const HANDLE_UNIT_NAME: &str = "JniBridgeHandle.cpp";
pub(crate) const EXCEPTION_UNIT_NAME: &str = "JniBridgeExceptionHandler.cpp";
pub(crate) const POLYMORPHIC_HELPER_NAME: &str = "JniBridgePolymorphicHelper.cpp";
pub(crate) const POLYMORPHIC_DIR: &str = "polymorphism";

/// What an output unit contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    /// Boundary functions of one class.
    Class,
    /// Shared handle runtime.
    Handle,
    /// Shared exception translation.
    Exception,
    /// Dispatch helpers of one handle class.
    Polymorphic,
    /// Includes every dispatch helper.
    PolymorphicAggregate,
}

/// One generated file, handed to an external writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputUnit {
    /// Relative output path, `/` separated.
    pub path: String,
    pub kind: UnitKind,
    pub contents: String,
}

impl OutputUnit {
    pub fn new(path: impl Into<String>, kind: UnitKind, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            contents: contents.into(),
        }
    }

    /// Hash of path and contents, stable across invocations.
    pub fn fingerprint(&self) -> u64 {
        let mut bytes = Vec::with_capacity(self.path.len() + 1 + self.contents.len());
        bytes.extend_from_slice(self.path.as_bytes());
        bytes.push(0);
        bytes.extend_from_slice(self.contents.as_bytes());
        xxh64(&bytes, 0)
    }
}

/// Renders models, plans and shared helpers into [`OutputUnit`]s.
pub struct Composer<'a> {
    ctx: GenerationContext<'a>,
    options: &'a GeneratorOptions,
}

impl<'a> Composer<'a> {
    pub fn new(ctx: GenerationContext<'a>, options: &'a GeneratorOptions) -> Self {
        Self { ctx, options }
    }

    fn internal_path(&self, name: &str) -> String {
        format!("{}/{}", self.options.internal_dir, name)
    }

    /// Load and concatenate custom code resources.
    fn custom_code(&self, paths: &[String]) -> Result<String, ConfigurationError> {
        let parts = paths
            .iter()
            .map(|path| self.ctx.load(path).map(|text| text.into_owned()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(parts.join("\n"))
    }
}
