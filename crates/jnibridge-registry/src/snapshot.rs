//! Declaration snapshot and class selection.
//!
//! [`SnapshotBuilder`] collects every declared managed type (bridged or not),
//! then [`SnapshotBuilder::select`] freezes them into an immutable
//! [`DeclarationSnapshot`] and picks the classes to generate from a list of
//! patterns.
//!
//! ## Patterns
//!
//! - `com.example.Foo`: exactly that class; an unknown name is an error
//! - `com.example.*`: every class in `com.example` and its sub-packages
//!
//! A class is selected only if it carries a bridge declaration and is an
//! opaque-handle type, an enum, or a utility class (native methods, all of
//! them static). Metadata-only classes serve as `inherit_from` targets.

use jnibridge_core::{ClassDecl, ClassKind, ConfigurationError, JavaPath};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::TypeHierarchy;

/// Root of every class hierarchy.
pub const OBJECT: &str = "java.lang.Object";

/// `java.lang` throwables pre-declared by [`SnapshotBuilder::new`].
const THROWABLES: &[(&str, &str)] = &[
    ("java.lang.Throwable", OBJECT),
    ("java.lang.Exception", "java.lang.Throwable"),
    ("java.lang.Error", "java.lang.Throwable"),
    ("java.lang.RuntimeException", "java.lang.Exception"),
    ("java.lang.IllegalArgumentException", "java.lang.RuntimeException"),
    ("java.lang.IllegalStateException", "java.lang.RuntimeException"),
    ("java.lang.IndexOutOfBoundsException", "java.lang.RuntimeException"),
    ("java.lang.UnsupportedOperationException", "java.lang.RuntimeException"),
    ("java.lang.ArithmeticException", "java.lang.RuntimeException"),
    ("java.util.NoSuchElementException", "java.lang.RuntimeException"),
    ("java.io.IOException", "java.lang.Exception"),
];

/// A validated class selection pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassPattern {
    Exact(JavaPath),
    Package(String),
}

impl ClassPattern {
    /// Parse one pattern.
    pub fn parse(pattern: &str) -> Result<Self, ConfigurationError> {
        let invalid = || ConfigurationError::InvalidPattern(pattern.to_string());
        let trimmed = pattern.trim();
        if trimmed.is_empty() {
            return Err(invalid());
        }

        let (body, wildcard) = match trimmed.strip_suffix(".*") {
            Some(package) => (package, true),
            None => (trimmed, false),
        };
        let valid_segment = |s: &str| {
            let mut chars = s.chars();
            matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_' || c == '$')
                && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        };
        if !body.split('.').all(valid_segment) {
            return Err(invalid());
        }

        Ok(if wildcard {
            ClassPattern::Package(body.to_string())
        } else {
            ClassPattern::Exact(JavaPath::new(body))
        })
    }

    pub fn matches(&self, path: &JavaPath) -> bool {
        match self {
            ClassPattern::Exact(exact) => exact == path,
            ClassPattern::Package(package) => path.is_within(package),
        }
    }
}

/// Collects declarations before generation.
#[derive(Debug)]
pub struct SnapshotBuilder {
    decls: FxHashMap<JavaPath, ClassDecl>,
}

impl Default for SnapshotBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotBuilder {
    /// Create a builder with `java.lang.Object` and common throwables declared.
    pub fn new() -> Self {
        let mut builder = Self::empty();
        builder
            .decls
            .insert(JavaPath::new(OBJECT), ClassDecl::class(OBJECT));
        for (name, parent) in THROWABLES {
            let decl = ClassDecl::class(*name).extends(*parent);
            builder.decls.insert(JavaPath::new(*name), decl);
        }
        builder
    }

    /// Create a builder with nothing declared.
    pub fn empty() -> Self {
        Self {
            decls: FxHashMap::default(),
        }
    }

    /// Add a declaration.
    pub fn declare(&mut self, decl: ClassDecl) -> Result<(), ConfigurationError> {
        if self.decls.contains_key(&decl.path) {
            return Err(ConfigurationError::DuplicateClass(decl.path.to_string()));
        }
        self.decls.insert(decl.path.clone(), decl);
        Ok(())
    }

    /// Add a declaration, builder style.
    pub fn with(mut self, decl: ClassDecl) -> Result<Self, ConfigurationError> {
        self.declare(decl)?;
        Ok(self)
    }

    /// Declare a plain exception class.
    pub fn declare_exception(
        &mut self,
        path: impl Into<JavaPath>,
        superclass: impl Into<JavaPath>,
    ) -> Result<(), ConfigurationError> {
        self.declare(ClassDecl::class(path).extends(superclass))
    }

    pub fn get(&self, path: &JavaPath) -> Option<&ClassDecl> {
        self.decls.get(path)
    }

    /// Freeze the declarations and select the classes matching `patterns`.
    pub fn select<S: AsRef<str>>(
        self,
        patterns: &[S],
    ) -> Result<DeclarationSnapshot, ConfigurationError> {
        if patterns.is_empty() {
            return Err(ConfigurationError::EmptyPatternList);
        }
        let patterns = patterns
            .iter()
            .map(|p| ClassPattern::parse(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        for pattern in &patterns {
            if let ClassPattern::Exact(path) = pattern
                && !self.decls.contains_key(path)
            {
                return Err(ConfigurationError::PatternNotFound(path.to_string()));
            }
        }

        let hierarchy = self.build_hierarchy();
        hierarchy.validate()?;

        let mut selected: Vec<JavaPath> = self
            .decls
            .values()
            .filter(|decl| patterns.iter().any(|p| p.matches(&decl.path)))
            .filter(|decl| is_bridgeable(decl))
            .map(|decl| decl.path.clone())
            .collect();
        selected.sort();

        debug!(
            target: "jnibridge::snapshot",
            declared = self.decls.len(),
            selected = selected.len(),
            "selected bridgeable classes"
        );

        Ok(DeclarationSnapshot {
            decls: self.decls,
            hierarchy,
            selected,
        })
    }

    fn build_hierarchy(&self) -> TypeHierarchy {
        let mut hierarchy = TypeHierarchy::new();
        let object = JavaPath::new(OBJECT);
        let mut paths: Vec<&JavaPath> = self.decls.keys().collect();
        paths.sort();
        for path in paths {
            let decl = &self.decls[path];
            hierarchy.add_type(path);
            match &decl.superclass {
                Some(sup) => hierarchy.add_extends(path, sup),
                None if decl.kind != ClassKind::Interface && *path != object => {
                    hierarchy.add_extends(path, &object)
                }
                None => {}
            }
            for interface in &decl.interfaces {
                hierarchy.add_implements(path, interface);
            }
        }
        hierarchy
    }
}

fn is_bridgeable(decl: &ClassDecl) -> bool {
    decl.is_bridged() && (decl.opaque_handle || decl.is_enum() || decl.is_utility())
}

/// Immutable view of every declaration in one generation invocation.
#[derive(Debug)]
pub struct DeclarationSnapshot {
    decls: FxHashMap<JavaPath, ClassDecl>,
    hierarchy: TypeHierarchy,
    selected: Vec<JavaPath>,
}

impl DeclarationSnapshot {
    pub fn get(&self, path: &JavaPath) -> Option<&ClassDecl> {
        self.decls.get(path)
    }

    pub fn hierarchy(&self) -> &TypeHierarchy {
        &self.hierarchy
    }

    /// Selected classes, ordered by binary name.
    pub fn selected(&self) -> impl Iterator<Item = &ClassDecl> {
        self.selected.iter().filter_map(|path| self.decls.get(path))
    }

    pub fn selected_paths(&self) -> &[JavaPath] {
        &self.selected
    }

    /// Selected classes that are strict subtypes of `path`, by binary name.
    pub fn selected_subtypes<'a>(
        &'a self,
        path: &'a JavaPath,
    ) -> impl Iterator<Item = &'a ClassDecl> + 'a {
        self.selected()
            .filter(move |decl| self.hierarchy.is_strict_subtype(&decl.path, path))
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }
}
