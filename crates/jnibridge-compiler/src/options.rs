//! Generation options.

/// Options controlling the layout and content of generated units.
///
/// # Examples
///
/// ```
/// use jnibridge_compiler::GeneratorOptions;
///
/// let options = GeneratorOptions::new()
///     .with_include("<vector>")
///     .with_internal_dir("bridge_internal");
/// assert_eq!(options.internal_dir, "bridge_internal");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Native includes added to the shared handle unit.
    pub native_includes: Vec<String>,
    /// Custom code resources appended to the shared handle unit.
    pub custom_code_paths: Vec<String>,
    /// Directory of the shared helper units, relative to the output root.
    pub internal_dir: String,
    /// Suffix of per-class units.
    pub unit_suffix: String,
    /// Collapse runs of blank lines in composed methods.
    pub collapse_blank_lines: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            native_includes: Vec::new(),
            custom_code_paths: Vec::new(),
            internal_dir: "internal".to_string(),
            unit_suffix: ".jni.cpp".to_string(),
            collapse_blank_lines: true,
        }
    }
}

impl GeneratorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_include(mut self, include: impl Into<String>) -> Self {
        self.native_includes.push(include.into());
        self
    }

    pub fn with_custom_code(mut self, path: impl Into<String>) -> Self {
        self.custom_code_paths.push(path.into());
        self
    }

    pub fn with_internal_dir(mut self, dir: impl Into<String>) -> Self {
        self.internal_dir = dir.into();
        self
    }

    pub fn with_unit_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.unit_suffix = suffix.into();
        self
    }

    pub fn with_collapse_blank_lines(mut self, collapse: bool) -> Self {
        self.collapse_blank_lines = collapse;
        self
    }
}
