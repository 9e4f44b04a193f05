use jnibridge_core::{AllocKind, ClassModel, ConfigurationError, MethodModel, MethodRole};
use jnibridge_registry::builtin::paths;

use super::Composer;
use super::binding::{binding_replacements, render_conversion};
use crate::placeholder;
use crate::template::{Replacements, collapse_blank_lines, substitute};

fn method_template(method: &MethodModel) -> &'static str {
    match method.role {
        MethodRole::Regular if method.is_static => paths::STATIC_METHOD,
        MethodRole::Regular => paths::INSTANCE_METHOD,
        MethodRole::Allocate(AllocKind::Raw) => paths::ALLOC_RAW,
        MethodRole::Allocate(AllocKind::Shared) => paths::ALLOC_SHARED,
        MethodRole::Allocate(AllocKind::Unique) => paths::ALLOC_UNIQUE,
        MethodRole::Deallocate => paths::DEALLOC,
    }
}

/// Native call expression of a regular method.
fn function_call(method: &MethodModel, call_params: &str) -> String {
    if let Some(custom) = &method.function_call {
        let table = Replacements::new().with(placeholder::FUNC_CALL_PARAMS, call_params);
        return substitute(custom, &table);
    }
    if method.self_binding.is_some() {
        format!("cSelf->{}({})", method.native_name, call_params)
    } else {
        format!("{}({})", method.qualified_native_name(), call_params)
    }
}

/// Expression yielding the handle released by a deallocation function.
fn handle_source(method: &MethodModel) -> String {
    if !method.is_static {
        return "jself".to_string();
    }
    match method.params.first() {
        Some(param) => param.jni_var(),
        None => "0".to_string(),
    }
}

impl Composer<'_> {
    /// Render the boundary function of `method`, declared on `class`.
    pub fn compose_method(
        &self,
        class: &ClassModel,
        method: &MethodModel,
    ) -> Result<String, ConfigurationError> {
        let jni_params: String = method
            .params
            .iter()
            .map(|p| format!(", {} {}", p.effective_abi_tag(), p.jni_var()))
            .collect();
        let call_params = method
            .params
            .iter()
            .map(|p| p.c_var())
            .collect::<Vec<_>>()
            .join(", ");
        let cleanup: String = method
            .params
            .iter()
            .filter_map(|p| p.cleanup.as_deref())
            .collect();

        let mut table = Replacements::new();
        table.insert(placeholder::MANGLED_FUNC_NAME, method.symbol.as_str());
        let receiver = if method.is_static {
            "jclass clazz"
        } else {
            "jobject jself"
        };
        table.insert(placeholder::JNI_RECEIVER, receiver);
        table.insert(placeholder::JNI_PARAMS, jni_params);
        let jni_type = method.return_binding.effective_abi_tag();
        table.insert(placeholder::JNI_TYPE, jni_type);
        table.insert(placeholder::FUNC_CALL_PARAMS, call_params.as_str());
        table.insert(placeholder::FUNC_CALL, function_call(method, &call_params));
        table.insert(placeholder::PARAM_CLEANUP, cleanup);

        let self_in = match &method.self_binding {
            Some(binding) => substitute(&binding.in_template, &binding_replacements(binding)),
            None => String::new(),
        };
        table.insert(placeholder::SELF_IN_MAPPING, self_in);

        let params_in = method
            .params
            .iter()
            .map(|p| render_conversion(&self.ctx, p, &Replacements::new()))
            .collect::<Result<Vec<_>, _>>()?
            .join("\n");
        table.insert(placeholder::PARAMS_IN_MAPPING, params_in);

        let result_out = render_conversion(&self.ctx, &method.return_binding, &table)?;
        table.insert(placeholder::RESULT_OUT_MAPPING, result_out);

        if !matches!(method.role, MethodRole::Regular) {
            table.insert(placeholder::C_TYPE, class.native_type());
            table.insert(placeholder::C_TYPE_UNDERSCORE, class.native.underscored());
            table.insert(placeholder::JAVA_PATH, class.path.slash_path());
            table.insert(placeholder::HANDLE_SOURCE, handle_source(method));
        }

        let template = self.ctx.load(method_template(method))?;
        let rendered = substitute(&template, &table);
        Ok(if self.options.collapse_blank_lines {
            collapse_blank_lines(&rendered)
        } else {
            rendered
        })
    }
}
