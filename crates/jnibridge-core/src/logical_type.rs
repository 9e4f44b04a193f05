//! Logical (managed-side) types of value occurrences.
//!
//! A [`LogicalType`] is the erased type of a parameter or return value as the
//! managed side sees it. It is the key for mapper lookup and the input to the
//! JVM descriptor used by symbol mangling.

use std::fmt;

use crate::JavaPath;

/// JVM primitive types, including `void` for return positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Primitive {
    Void,
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl Primitive {
    /// All primitives, in declaration order.
    pub const ALL: [Primitive; 9] = [
        Primitive::Void,
        Primitive::Boolean,
        Primitive::Byte,
        Primitive::Char,
        Primitive::Short,
        Primitive::Int,
        Primitive::Long,
        Primitive::Float,
        Primitive::Double,
    ];

    /// Single-character JVM descriptor.
    pub fn descriptor(self) -> char {
        match self {
            Primitive::Void => 'V',
            Primitive::Boolean => 'Z',
            Primitive::Byte => 'B',
            Primitive::Char => 'C',
            Primitive::Short => 'S',
            Primitive::Int => 'I',
            Primitive::Long => 'J',
            Primitive::Float => 'F',
            Primitive::Double => 'D',
        }
    }

    /// Source-level keyword.
    pub fn name(self) -> &'static str {
        match self {
            Primitive::Void => "void",
            Primitive::Boolean => "boolean",
            Primitive::Byte => "byte",
            Primitive::Char => "char",
            Primitive::Short => "short",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
        }
    }

    /// Matching JNI type name (`jint`, `jboolean`, ...).
    pub fn jni_type(self) -> &'static str {
        match self {
            Primitive::Void => "void",
            Primitive::Boolean => "jboolean",
            Primitive::Byte => "jbyte",
            Primitive::Char => "jchar",
            Primitive::Short => "jshort",
            Primitive::Int => "jint",
            Primitive::Long => "jlong",
            Primitive::Float => "jfloat",
            Primitive::Double => "jdouble",
        }
    }
}

/// The erased managed type of a value occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LogicalType {
    Primitive(Primitive),
    Object(JavaPath),
    Array(Box<LogicalType>),
}

impl LogicalType {
    pub const VOID: LogicalType = LogicalType::Primitive(Primitive::Void);
    pub const BOOLEAN: LogicalType = LogicalType::Primitive(Primitive::Boolean);
    pub const INT: LogicalType = LogicalType::Primitive(Primitive::Int);
    pub const LONG: LogicalType = LogicalType::Primitive(Primitive::Long);

    pub fn object(path: impl Into<String>) -> Self {
        LogicalType::Object(JavaPath::new(path))
    }

    pub fn array_of(element: LogicalType) -> Self {
        LogicalType::Array(Box::new(element))
    }

    /// `java.lang.String`
    pub fn string() -> Self {
        Self::object("java.lang.String")
    }

    /// `java.nio.file.Path`
    pub fn path() -> Self {
        Self::object("java.nio.file.Path")
    }

    pub fn is_void(&self) -> bool {
        matches!(self, LogicalType::Primitive(Primitive::Void))
    }

    /// The referenced class, if this is an object type.
    pub fn as_object(&self) -> Option<&JavaPath> {
        match self {
            LogicalType::Object(path) => Some(path),
            _ => None,
        }
    }

    /// JVM field descriptor (`I`, `Ljava/lang/String;`, `[B`, ...).
    pub fn descriptor(&self) -> String {
        match self {
            LogicalType::Primitive(p) => p.descriptor().to_string(),
            LogicalType::Object(path) => path.descriptor(),
            LogicalType::Array(element) => format!("[{}", element.descriptor()),
        }
    }

    /// Slash-separated managed path, as exposed to templates.
    ///
    /// Primitives use their keyword, arrays use their descriptor.
    pub fn managed_path(&self) -> String {
        match self {
            LogicalType::Primitive(p) => p.name().to_string(),
            LogicalType::Object(path) => path.slash_path(),
            LogicalType::Array(_) => self.descriptor(),
        }
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalType::Primitive(p) => f.write_str(p.name()),
            LogicalType::Object(path) => write!(f, "{}", path),
            LogicalType::Array(element) => write!(f, "{}[]", element),
        }
    }
}

impl From<Primitive> for LogicalType {
    fn from(p: Primitive) -> Self {
        LogicalType::Primitive(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptors() {
        assert_eq!(LogicalType::INT.descriptor(), "I");
        assert_eq!(LogicalType::string().descriptor(), "Ljava/lang/String;");
        assert_eq!(
            LogicalType::array_of(Primitive::Byte.into()).descriptor(),
            "[B"
        );
        assert_eq!(
            LogicalType::array_of(LogicalType::array_of(LogicalType::string())).descriptor(),
            "[[Ljava/lang/String;"
        );
    }

    #[test]
    fn display_uses_source_syntax() {
        assert_eq!(LogicalType::LONG.to_string(), "long");
        assert_eq!(
            LogicalType::array_of(LogicalType::path()).to_string(),
            "java.nio.file.Path[]"
        );
    }

    #[test]
    fn managed_path_for_objects_is_slash_separated() {
        assert_eq!(LogicalType::string().managed_path(), "java/lang/String");
        assert_eq!(LogicalType::INT.managed_path(), "int");
    }
}
