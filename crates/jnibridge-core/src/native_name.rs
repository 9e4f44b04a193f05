use std::fmt;

/// Namespace-qualified native (C++) name.
///
/// # Examples
///
/// ```
/// use jnibridge_core::NativeName;
///
/// let name = NativeName::from_qualified_string("oop::shapes::Circle");
/// assert_eq!(name.to_string(), "oop::shapes::Circle");
/// assert_eq!(name.underscored(), "oop_shapes_Circle");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NativeName {
    /// Unqualified name (e.g. "Circle")
    pub name: String,
    /// Namespace segments, empty for the global namespace
    pub namespace: Vec<String>,
}

impl NativeName {
    pub fn new(name: impl Into<String>, namespace: Vec<String>) -> Self {
        Self {
            name: name.into(),
            namespace,
        }
    }

    pub fn global(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    /// Split a `::` separated string; the last segment is the name.
    ///
    /// A leading `::` is ignored.
    pub fn from_qualified_string(s: &str) -> Self {
        let mut parts: Vec<String> = s
            .split("::")
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
        match parts.pop() {
            Some(name) => Self::new(name, parts),
            None => Self::global(""),
        }
    }

    /// Parse a namespace string such as `a::b` into its segments.
    pub fn split_namespace(namespace: &str) -> Vec<String> {
        namespace
            .split("::")
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn is_global(&self) -> bool {
        self.namespace.is_empty()
    }

    /// Namespace joined with `::`; empty for the global namespace.
    pub fn namespace_string(&self) -> String {
        self.namespace.join("::")
    }

    /// Qualified name with `::` replaced by `_`, usable inside identifiers.
    pub fn underscored(&self) -> String {
        self.to_string().replace("::", "_")
    }
}

impl fmt::Display for NativeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ns in &self.namespace {
            write!(f, "{}::", ns)?;
        }
        f.write_str(&self.name)
    }
}
