//! Raw declarations handed to generation.
//!
//! Declarations mirror what a discovery step finds on the managed side: classes
//! with their supertypes, an optional bridge declaration, and their methods with
//! tagged parameter and return occurrences. They are built with `with_*` style
//! builders and are immutable once placed in a snapshot.

use rustc_hash::FxHashMap;

use crate::{
    JavaPath, LogicalType, MapperId, MethodRole, MethodTags, NativeName, OccurrenceFlags,
    OccurrenceTags, Ownership,
};

/// Kind of a managed type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
}

/// In/out conversion template resource paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatePair {
    pub in_path: String,
    pub out_path: String,
}

impl TemplatePair {
    pub fn new(in_path: impl Into<String>, out_path: impl Into<String>) -> Self {
        Self {
            in_path: in_path.into(),
            out_path: out_path.into(),
        }
    }
}

/// Metadata that can be inherited through `inherit_from`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BridgeMetadata {
    /// Native headers required by the generated code.
    pub includes: Vec<String>,
    /// Resource paths of hand-written native code appended to the output.
    pub custom_code_paths: Vec<String>,
    /// Bridged classes whose metadata is merged into this one.
    pub inherit_from: Vec<JavaPath>,
}

/// The bridging declaration that makes a class eligible for generation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BridgeDecl {
    pub namespace: Option<String>,
    pub name: Option<String>,
    pub metadata: BridgeMetadata,
    /// Class-level mapper overrides keyed by logical type.
    pub type_mappers: FxHashMap<LogicalType, MapperId>,
    /// Conversion templates used for every occurrence of this handle class.
    pub handle_templates: Option<TemplatePair>,
}

impl BridgeDecl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_include(mut self, include: impl Into<String>) -> Self {
        self.metadata.includes.push(include.into());
        self
    }

    pub fn with_custom_code(mut self, path: impl Into<String>) -> Self {
        self.metadata.custom_code_paths.push(path.into());
        self
    }

    pub fn inherit_from(mut self, path: impl Into<JavaPath>) -> Self {
        self.metadata.inherit_from.push(path.into());
        self
    }

    pub fn with_type_mapper(mut self, ty: LogicalType, mapper: impl Into<MapperId>) -> Self {
        self.type_mappers.insert(ty, mapper.into());
        self
    }

    pub fn with_handle_templates(mut self, templates: TemplatePair) -> Self {
        self.handle_templates = Some(templates);
        self
    }
}

/// A parameter or return value together with its tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeOccurrence {
    pub ty: LogicalType,
    pub tags: OccurrenceTags,
}

impl TypeOccurrence {
    pub fn new(ty: LogicalType) -> Self {
        Self {
            ty,
            tags: OccurrenceTags::default(),
        }
    }

    pub fn with_mapper(mut self, mapper: impl Into<MapperId>) -> Self {
        self.tags.mapper = Some(mapper.into());
        self
    }

    pub fn with_ownership(mut self, ownership: Ownership) -> Self {
        self.tags.ownership = Some(ownership);
        self
    }

    pub fn with_flags(mut self, flags: OccurrenceFlags) -> Self {
        self.tags.flags |= flags;
        self
    }

    pub fn with_custom_c_type(mut self, c_type: impl Into<String>) -> Self {
        self.tags.custom.c_type = Some(c_type.into());
        self
    }

    pub fn with_custom_jni_type(mut self, jni_type: impl Into<String>) -> Self {
        self.tags.custom.jni_type = Some(jni_type.into());
        self
    }

    pub fn with_custom_vars(
        mut self,
        c_var: impl Into<String>,
        jni_var: impl Into<String>,
    ) -> Self {
        self.tags.custom.c_var = Some(c_var.into());
        self.tags.custom.jni_var = Some(jni_var.into());
        self
    }

    pub fn with_custom_templates(
        mut self,
        in_template: Option<String>,
        out_template: Option<String>,
    ) -> Self {
        self.tags.custom.in_template = in_template;
        self.tags.custom.out_template = out_template;
        self
    }
}

impl From<LogicalType> for TypeOccurrence {
    fn from(ty: LogicalType) -> Self {
        Self::new(ty)
    }
}

/// A method declared on a managed class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    pub name: String,
    pub is_static: bool,
    /// Only native methods are bound.
    pub is_native: bool,
    pub return_type: TypeOccurrence,
    pub params: Vec<TypeOccurrence>,
    pub tags: MethodTags,
}

impl MethodDecl {
    /// A native instance method returning `void`.
    pub fn native(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_static: false,
            is_native: true,
            return_type: TypeOccurrence::new(LogicalType::VOID),
            params: Vec::new(),
            tags: MethodTags::default(),
        }
    }

    /// A native static method returning `void`.
    pub fn native_static(name: impl Into<String>) -> Self {
        Self {
            is_static: true,
            ..Self::native(name)
        }
    }

    /// A non-native (managed-only) method.
    pub fn managed(name: impl Into<String>, is_static: bool) -> Self {
        Self {
            is_static,
            is_native: false,
            ..Self::native(name)
        }
    }

    pub fn returns(mut self, ret: impl Into<TypeOccurrence>) -> Self {
        self.return_type = ret.into();
        self
    }

    pub fn with_param(mut self, param: impl Into<TypeOccurrence>) -> Self {
        self.params.push(param.into());
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.tags.namespace = Some(namespace.into());
        self
    }

    pub fn with_native_name(mut self, name: impl Into<String>) -> Self {
        self.tags.native_name = Some(name.into());
        self
    }

    pub fn with_role(mut self, role: MethodRole) -> Self {
        self.tags.role = role;
        self
    }

    pub fn with_function_call(mut self, call: impl Into<String>) -> Self {
        self.tags.function_call = Some(call.into());
        self
    }

    /// Erased parameter types in declaration order.
    pub fn param_types(&self) -> impl Iterator<Item = &LogicalType> {
        self.params.iter().map(|p| &p.ty)
    }
}

/// A managed type declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDecl {
    pub path: JavaPath,
    pub kind: ClassKind,
    pub superclass: Option<JavaPath>,
    pub interfaces: Vec<JavaPath>,
    /// The class can be referenced through an opaque native handle.
    pub opaque_handle: bool,
    pub bridge: Option<BridgeDecl>,
    pub methods: Vec<MethodDecl>,
}

impl ClassDecl {
    fn with_kind(path: impl Into<JavaPath>, kind: ClassKind) -> Self {
        Self {
            path: path.into(),
            kind,
            superclass: None,
            interfaces: Vec::new(),
            opaque_handle: false,
            bridge: None,
            methods: Vec::new(),
        }
    }

    pub fn class(path: impl Into<JavaPath>) -> Self {
        Self::with_kind(path, ClassKind::Class)
    }

    pub fn interface(path: impl Into<JavaPath>) -> Self {
        Self::with_kind(path, ClassKind::Interface)
    }

    pub fn enumeration(path: impl Into<JavaPath>) -> Self {
        Self::with_kind(path, ClassKind::Enum)
    }

    pub fn extends(mut self, superclass: impl Into<JavaPath>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    pub fn implements(mut self, interface: impl Into<JavaPath>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn with_handle(mut self) -> Self {
        self.opaque_handle = true;
        self
    }

    pub fn with_bridge(mut self, bridge: BridgeDecl) -> Self {
        self.bridge = Some(bridge);
        self
    }

    pub fn with_method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }

    pub fn is_enum(&self) -> bool {
        self.kind == ClassKind::Enum
    }

    pub fn is_bridged(&self) -> bool {
        self.bridge.is_some()
    }

    /// Native name: bridge overrides, else the package as namespace and the
    /// innermost simple name.
    pub fn native_name(&self) -> NativeName {
        let bridge = self.bridge.as_ref();
        let namespace = match bridge.and_then(|b| b.namespace.as_deref()) {
            Some(ns) => NativeName::split_namespace(ns),
            None => self
                .path
                .package()
                .split('.')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        };
        let name = bridge
            .and_then(|b| b.name.clone())
            .unwrap_or_else(|| self.path.innermost_name().to_string());
        NativeName::new(name, namespace)
    }

    /// A class with at least one native method whose every method is static.
    pub fn is_utility(&self) -> bool {
        self.kind == ClassKind::Class
            && self.native_methods().next().is_some()
            && self.methods.iter().all(|m| m.is_static)
    }

    /// Native methods declared directly on this class.
    pub fn native_methods(&self) -> impl Iterator<Item = &MethodDecl> {
        self.methods.iter().filter(|m| m.is_native)
    }

    /// Find a method by name, staticness and erased parameter types.
    pub fn find_method(
        &self,
        name: &str,
        is_static: bool,
        params: &[LogicalType],
    ) -> Option<&MethodDecl> {
        self.methods.iter().find(|m| {
            m.name == name && m.is_static == is_static && m.param_types().eq(params.iter())
        })
    }
}
