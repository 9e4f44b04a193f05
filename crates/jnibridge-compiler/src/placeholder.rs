//! Placeholder names understood by the built-in templates.

// Value occurrences
pub const ID: &str = "id";
pub const C_TYPE: &str = "cType";
pub const C_TYPE_UNDERSCORE: &str = "cTypeUnderscore";
pub const C_VAR: &str = "cVar";
pub const JNI_TYPE: &str = "jniType";
pub const JNI_VAR: &str = "jniVar";
pub const JAVA_PATH: &str = "fullJPath";
pub const C_TEMPLATE_TYPE: &str = "cTemplateType";
pub const C_TEMPLATE_TYPE_UNDERSCORE: &str = "cTemplateTypeUnderscore";
pub const JAVA_TEMPLATE_PATH: &str = "fullJTemplatePath";
pub const NULL_CHECK: &str = "nullCheck";

// Boundary functions
pub const MANGLED_FUNC_NAME: &str = "mangledFuncName";
pub const JNI_RECEIVER: &str = "jniReceiver";
pub const JNI_PARAMS: &str = "jniParams";
pub const FUNC_CALL: &str = "functionCall";
pub const FUNC_CALL_PARAMS: &str = "functionCallParams";
pub const SELF_IN_MAPPING: &str = "jselfInMapping";
pub const PARAMS_IN_MAPPING: &str = "paramInMapping";
pub const RESULT_OUT_MAPPING: &str = "resultOutMapping";
pub const PARAM_CLEANUP: &str = "paramCleanup";
pub const HANDLE_SOURCE: &str = "handleSource";

// Output units
pub const INTERNAL_INCLUDES: &str = "internal_includes";
pub const CUSTOM_JNI: &str = "customJNIContent";
pub const METHODS: &str = "mappedMethods";
pub const ALL_INCLUDES: &str = "allIncludes";
pub const HANDLE_FILE_INCLUDE: &str = "handleFileInclude";

// Exception translation
pub const EXCEPTION_FUNC: &str = "exceptionFunc";
pub const EXCEPTION_FUNC_BODY: &str = "exceptionFuncBody";

// Polymorphic dispatch
pub const DISPATCH_BODY: &str = "dispatchBody";
pub const HANDLE_TO_INSTANCE: &str = "handleToInstance";
pub const INSTANCE_TO_JAVA_PATH: &str = "instanceToJavaPath";
pub const POLYMORPHIC_INCLUDES: &str = "polymorphicIncludes";

/// Indexed placeholder name, e.g. `cTemplateType_0`.
pub fn indexed(base: &str, index: usize) -> String {
    format!("{}_{}", base, index)
}
