use std::fmt;

/// Binary name of a managed (Java) type, e.g. `com.example.Outer$Inner`.
///
/// The binary name is the identity key for declarations: two paths are equal
/// exactly when their binary names are equal. Ordering is lexicographic on the
/// binary name and is used wherever generation needs a deterministic tie-break.
///
/// # Examples
///
/// ```
/// use jnibridge_core::JavaPath;
///
/// let inner = JavaPath::new("com.example.Outer$Inner");
/// assert_eq!(inner.package(), "com.example");
/// assert_eq!(inner.simple_name(), "Outer$Inner");
/// assert_eq!(inner.slash_path(), "com/example/Outer$Inner");
/// assert_eq!(inner.descriptor(), "Lcom/example/Outer$Inner;");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JavaPath(String);

impl JavaPath {
    /// Create a path from a dotted binary name.
    pub fn new(binary_name: impl Into<String>) -> Self {
        Self(binary_name.into())
    }

    /// The dotted binary name.
    pub fn binary_name(&self) -> &str {
        &self.0
    }

    /// Package portion of the name; empty for the default package.
    pub fn package(&self) -> &str {
        match self.0.rfind('.') {
            Some(idx) => &self.0[..idx],
            None => "",
        }
    }

    /// Name without the package, nested-type separators preserved.
    pub fn simple_name(&self) -> &str {
        match self.0.rfind('.') {
            Some(idx) => &self.0[idx + 1..],
            None => &self.0,
        }
    }

    /// Innermost name, i.e. the part after the last `$`.
    pub fn innermost_name(&self) -> &str {
        let simple = self.simple_name();
        match simple.rfind('$') {
            Some(idx) => &simple[idx + 1..],
            None => simple,
        }
    }

    /// Internal (slash separated) form used by `FindClass` and descriptors.
    pub fn slash_path(&self) -> String {
        self.0.replace('.', "/")
    }

    /// Field descriptor form, `L<slash path>;`.
    pub fn descriptor(&self) -> String {
        format!("L{};", self.slash_path())
    }

    /// Whether this path lies in `package` or one of its sub-packages.
    pub fn is_within(&self, package: &str) -> bool {
        let own = self.package();
        own == package
            || (own.len() > package.len()
                && own.starts_with(package)
                && own.as_bytes()[package.len()] == b'.')
    }
}

impl fmt::Display for JavaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JavaPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
