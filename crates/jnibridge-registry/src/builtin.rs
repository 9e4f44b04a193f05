//! Built-in mapper ids and template resources.
//!
//! Every template path referenced by the built-in mappers and by the composer
//! is compiled into the binary and served by [`BuiltinResources`].

use std::borrow::Cow;

use jnibridge_core::{ConfigurationError, ResourceProvider};

/// Ids of the mappers registered by `MapperRegistry::with_defaults`.
pub mod mappers {
    pub const VOID: &str = "jnibridge.void";
    pub const BOOLEAN: &str = "jnibridge.boolean";
    pub const BYTE: &str = "jnibridge.byte";
    pub const CHAR: &str = "jnibridge.char";
    pub const SHORT: &str = "jnibridge.short";
    pub const INT: &str = "jnibridge.int";
    pub const LONG: &str = "jnibridge.long";
    pub const FLOAT: &str = "jnibridge.float";
    pub const DOUBLE: &str = "jnibridge.double";
    pub const STRING: &str = "jnibridge.string";
    pub const PATH: &str = "jnibridge.path";
    /// `std::string_view` over a `java.lang.String`; not a default.
    pub const STRING_VIEW: &str = "jnibridge.string_view";
    /// `std::span<const std::byte>` over a `byte[]`; not a default.
    pub const BYTE_SPAN: &str = "jnibridge.byte_span";
}

/// Resource paths of the built-in templates.
pub mod paths {
    pub const CLASS_UNIT: &str = "jnibridge/class/class_unit.template";

    pub const STATIC_METHOD: &str = "jnibridge/methods/static_method.template";
    pub const INSTANCE_METHOD: &str = "jnibridge/methods/instance_method.template";
    pub const ALLOC_RAW: &str = "jnibridge/methods/alloc.raw.template";
    pub const ALLOC_SHARED: &str = "jnibridge/methods/alloc.shared.template";
    pub const ALLOC_UNIQUE: &str = "jnibridge/methods/alloc.unique.template";
    pub const DEALLOC: &str = "jnibridge/methods/dealloc.template";

    pub const SELF_IN: &str = "jnibridge/mapping/self.in.template";
    pub const NULL_CHECK: &str = "jnibridge/mapping/null_check.template";
    pub const PRIMITIVE_IN: &str = "jnibridge/mapping/primitive.in.template";
    pub const PRIMITIVE_OUT: &str = "jnibridge/mapping/primitive.out.template";
    pub const VOID_OUT: &str = "jnibridge/mapping/void.out.template";
    pub const ENUM_IN: &str = "jnibridge/mapping/enum.in.template";
    pub const ENUM_OUT: &str = "jnibridge/mapping/enum.out.template";
    pub const STRING_IN: &str = "jnibridge/mapping/string.in.template";
    pub const STRING_OUT: &str = "jnibridge/mapping/string.out.template";
    pub const STRING_CLEANUP: &str = "jnibridge/mapping/string.cleanup.template";
    pub const STRING_VIEW_IN: &str = "jnibridge/mapping/string_view.in.template";
    pub const STRING_VIEW_OUT: &str = "jnibridge/mapping/string_view.out.template";
    pub const PATH_IN: &str = "jnibridge/mapping/path.in.template";
    pub const PATH_OUT: &str = "jnibridge/mapping/path.out.template";
    pub const BYTE_SPAN_IN: &str = "jnibridge/mapping/byte_span.in.template";
    pub const BYTE_SPAN_OUT: &str = "jnibridge/mapping/byte_span.out.template";
    pub const BYTE_SPAN_CLEANUP: &str = "jnibridge/mapping/byte_span.cleanup.template";

    pub const HANDLE_VAL_IN: &str = "jnibridge/mapping/handle.val.in.template";
    pub const HANDLE_VAL_OUT: &str = "jnibridge/mapping/handle.val.out.template";
    pub const HANDLE_PTR_IN: &str = "jnibridge/mapping/handle.ptr.in.template";
    pub const HANDLE_PTR_OUT: &str = "jnibridge/mapping/handle.ptr.out.template";
    pub const HANDLE_REF_IN: &str = "jnibridge/mapping/handle.ref.in.template";
    pub const HANDLE_REF_OUT: &str = "jnibridge/mapping/handle.ref.out.template";
    pub const HANDLE_SHARED_IN: &str = "jnibridge/mapping/handle.shared.in.template";
    pub const HANDLE_SHARED_OUT: &str = "jnibridge/mapping/handle.shared.out.template";
    pub const HANDLE_UNIQUE_IN: &str = "jnibridge/mapping/handle.unique.in.template";
    pub const HANDLE_UNIQUE_OUT: &str = "jnibridge/mapping/handle.unique.out.template";

    pub const HANDLE_UNIT: &str = "jnibridge/internal/handle.template";
    pub const EXCEPTION_HANDLER: &str = "jnibridge/internal/exception_handler.template";
    pub const EXCEPTION_FUNC: &str = "jnibridge/internal/exception_func.template";
    pub const POLYMORPHIC_FILE: &str = "jnibridge/internal/polymorphic_file.template";
    pub const POLYMORPHIC_RAW: &str = "jnibridge/internal/polymorphic.raw.template";
    pub const POLYMORPHIC_SHARED: &str = "jnibridge/internal/polymorphic.shared.template";
    pub const POLYMORPHIC_UNIQUE: &str = "jnibridge/internal/polymorphic.unique.template";
    pub const POLYMORPHIC_CLASS_NAME: &str = "jnibridge/internal/polymorphic.class_name.template";
    pub const POLYMORPHIC_HELPER: &str = "jnibridge/internal/polymorphic_helper.template";
}

macro_rules! builtin_table {
    ($($path:path => $file:literal),* $(,)?) => {
        &[$(($path, include_str!(concat!("../resources/", $file)))),*]
    };
}

static BUILTIN: &[(&str, &str)] = builtin_table![
    paths::CLASS_UNIT => "jnibridge/class/class_unit.template",
    paths::STATIC_METHOD => "jnibridge/methods/static_method.template",
    paths::INSTANCE_METHOD => "jnibridge/methods/instance_method.template",
    paths::ALLOC_RAW => "jnibridge/methods/alloc.raw.template",
    paths::ALLOC_SHARED => "jnibridge/methods/alloc.shared.template",
    paths::ALLOC_UNIQUE => "jnibridge/methods/alloc.unique.template",
    paths::DEALLOC => "jnibridge/methods/dealloc.template",
    paths::SELF_IN => "jnibridge/mapping/self.in.template",
    paths::NULL_CHECK => "jnibridge/mapping/null_check.template",
    paths::PRIMITIVE_IN => "jnibridge/mapping/primitive.in.template",
    paths::PRIMITIVE_OUT => "jnibridge/mapping/primitive.out.template",
    paths::VOID_OUT => "jnibridge/mapping/void.out.template",
    paths::ENUM_IN => "jnibridge/mapping/enum.in.template",
    paths::ENUM_OUT => "jnibridge/mapping/enum.out.template",
    paths::STRING_IN => "jnibridge/mapping/string.in.template",
    paths::STRING_OUT => "jnibridge/mapping/string.out.template",
    paths::STRING_CLEANUP => "jnibridge/mapping/string.cleanup.template",
    paths::STRING_VIEW_IN => "jnibridge/mapping/string_view.in.template",
    paths::STRING_VIEW_OUT => "jnibridge/mapping/string_view.out.template",
    paths::PATH_IN => "jnibridge/mapping/path.in.template",
    paths::PATH_OUT => "jnibridge/mapping/path.out.template",
    paths::BYTE_SPAN_IN => "jnibridge/mapping/byte_span.in.template",
    paths::BYTE_SPAN_OUT => "jnibridge/mapping/byte_span.out.template",
    paths::BYTE_SPAN_CLEANUP => "jnibridge/mapping/byte_span.cleanup.template",
    paths::HANDLE_VAL_IN => "jnibridge/mapping/handle.val.in.template",
    paths::HANDLE_VAL_OUT => "jnibridge/mapping/handle.val.out.template",
    paths::HANDLE_PTR_IN => "jnibridge/mapping/handle.ptr.in.template",
    paths::HANDLE_PTR_OUT => "jnibridge/mapping/handle.ptr.out.template",
    paths::HANDLE_REF_IN => "jnibridge/mapping/handle.ref.in.template",
    paths::HANDLE_REF_OUT => "jnibridge/mapping/handle.ref.out.template",
    paths::HANDLE_SHARED_IN => "jnibridge/mapping/handle.shared.in.template",
    paths::HANDLE_SHARED_OUT => "jnibridge/mapping/handle.shared.out.template",
    paths::HANDLE_UNIQUE_IN => "jnibridge/mapping/handle.unique.in.template",
    paths::HANDLE_UNIQUE_OUT => "jnibridge/mapping/handle.unique.out.template",
    paths::HANDLE_UNIT => "jnibridge/internal/handle.template",
    paths::EXCEPTION_HANDLER => "jnibridge/internal/exception_handler.template",
    paths::EXCEPTION_FUNC => "jnibridge/internal/exception_func.template",
    paths::POLYMORPHIC_FILE => "jnibridge/internal/polymorphic_file.template",
    paths::POLYMORPHIC_RAW => "jnibridge/internal/polymorphic.raw.template",
    paths::POLYMORPHIC_SHARED => "jnibridge/internal/polymorphic.shared.template",
    paths::POLYMORPHIC_UNIQUE => "jnibridge/internal/polymorphic.unique.template",
    paths::POLYMORPHIC_CLASS_NAME => "jnibridge/internal/polymorphic.class_name.template",
    paths::POLYMORPHIC_HELPER => "jnibridge/internal/polymorphic_helper.template",
];

/// Serves the compiled-in templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinResources;

impl BuiltinResources {
    /// Every built-in resource path.
    pub fn paths() -> impl Iterator<Item = &'static str> {
        BUILTIN.iter().map(|(path, _)| *path)
    }
}

impl ResourceProvider for BuiltinResources {
    fn load(&self, path: &str) -> Result<Cow<'_, str>, ConfigurationError> {
        BUILTIN
            .iter()
            .find(|(p, _)| *p == path)
            .map(|(_, text)| Cow::Borrowed(*text))
            .ok_or_else(|| ConfigurationError::missing_resource(path, "not a built-in resource"))
    }
}
