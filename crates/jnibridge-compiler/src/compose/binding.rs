//! Rendering of single value occurrences.

use jnibridge_core::{ConfigurationError, ConversionKind, TypeBinding};
use jnibridge_registry::builtin::paths;

use crate::context::GenerationContext;
use crate::placeholder::{self, indexed};
use crate::template::{Replacements, substitute};

/// Placeholder values describing one occurrence.
pub fn binding_replacements(binding: &TypeBinding) -> Replacements {
    let mut r = Replacements::new();

    let c_type = binding
        .custom
        .c_type
        .clone()
        .unwrap_or_else(|| binding.qualified_native_type());
    r.insert(placeholder::C_TYPE, c_type);
    r.insert(
        placeholder::C_TYPE_UNDERSCORE,
        binding.native_type.replace("::", "_"),
    );
    r.insert(placeholder::JNI_TYPE, binding.effective_abi_tag());
    r.insert(placeholder::ID, binding.id.as_deref().unwrap_or(""));
    r.insert(placeholder::C_VAR, binding.c_var());
    r.insert(placeholder::JNI_VAR, binding.jni_var());
    r.insert(placeholder::JAVA_PATH, binding.logical.managed_path());

    for (i, (native, logical)) in binding.template_args.iter().enumerate() {
        r.insert(indexed(placeholder::C_TEMPLATE_TYPE, i), native.as_str());
        r.insert(
            indexed(placeholder::C_TEMPLATE_TYPE_UNDERSCORE, i),
            native.replace("::", "_"),
        );
        r.insert(
            indexed(placeholder::JAVA_TEMPLATE_PATH, i),
            logical.managed_path(),
        );
    }
    r
}

/// Render the null check for an inbound handle, or nothing.
fn null_check(
    ctx: &GenerationContext<'_>,
    binding: &TypeBinding,
    table: &Replacements,
) -> Result<String, ConfigurationError> {
    let checked = matches!(binding.conversion, ConversionKind::Handle(_))
        && binding.is_parameter()
        && !binding.ignore_null_check;
    if !checked {
        return Ok(String::new());
    }
    Ok(substitute(&ctx.load(paths::NULL_CHECK)?, table))
}

/// Render the conversion template that applies to this occurrence.
///
/// `extra` supplies method-level values such as the native call expression;
/// it never overrides the occurrence's own placeholders.
pub fn render_conversion(
    ctx: &GenerationContext<'_>,
    binding: &TypeBinding,
    extra: &Replacements,
) -> Result<String, ConfigurationError> {
    let mut table = extra.clone();
    table.extend(&binding_replacements(binding));
    let check = null_check(ctx, binding, &table)?;
    table.insert(placeholder::NULL_CHECK, check);
    Ok(substitute(binding.conversion_template(), &table))
}
