use std::fmt;

use crate::LogicalType;

/// Identity of a registered mapper.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MapperId(String);

impl MapperId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MapperId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MapperId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for MapperId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Template declaration of a mapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingTemplates {
    /// Inbound (managed to native) conversion template path.
    pub in_path: String,
    /// Outbound (native to managed) conversion template path.
    pub out_path: String,
    /// Releases inbound temporaries after the native call.
    pub cleanup_path: Option<String>,
}

/// How one logical type crosses the boundary.
///
/// A rule without [`MappingTemplates`] is registered but unusable; resolving an
/// occurrence through it is a configuration error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingRule {
    pub id: MapperId,
    /// Native type expression, e.g. `std::string`.
    pub native_type: String,
    /// Boundary ABI tag, e.g. `jstring`.
    pub abi_tag: String,
    pub templates: Option<MappingTemplates>,
    /// Native type arguments, positionally paired with `logical_template_args`.
    pub native_template_args: Vec<String>,
    pub logical_template_args: Vec<LogicalType>,
}

impl MappingRule {
    pub fn new(
        id: impl Into<MapperId>,
        native_type: impl Into<String>,
        abi_tag: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            native_type: native_type.into(),
            abi_tag: abi_tag.into(),
            templates: None,
            native_template_args: Vec::new(),
            logical_template_args: Vec::new(),
        }
    }

    pub fn with_templates(
        mut self,
        in_path: impl Into<String>,
        out_path: impl Into<String>,
    ) -> Self {
        let cleanup_path = self.templates.take().and_then(|t| t.cleanup_path);
        self.templates = Some(MappingTemplates {
            in_path: in_path.into(),
            out_path: out_path.into(),
            cleanup_path,
        });
        self
    }

    /// Attach a cleanup template; only effective once templates are declared.
    pub fn with_cleanup(mut self, cleanup_path: impl Into<String>) -> Self {
        if let Some(templates) = self.templates.as_mut() {
            templates.cleanup_path = Some(cleanup_path.into());
        }
        self
    }

    pub fn with_native_template_arg(mut self, native: impl Into<String>) -> Self {
        self.native_template_args.push(native.into());
        self
    }

    pub fn with_logical_template_arg(mut self, logical: LogicalType) -> Self {
        self.logical_template_args.push(logical);
        self
    }

    /// Convenience for adding a matched native/logical argument pair.
    pub fn with_template_arg(self, native: impl Into<String>, logical: LogicalType) -> Self {
        self.with_native_template_arg(native)
            .with_logical_template_arg(logical)
    }
}
