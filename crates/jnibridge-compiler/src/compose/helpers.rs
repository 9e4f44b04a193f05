use std::sync::Arc;

use jnibridge_core::{ClassModel, ConfigurationError};
use jnibridge_registry::builtin::paths;

use super::{
    Composer, EXCEPTION_UNIT_NAME, HANDLE_UNIT_NAME, OutputUnit, POLYMORPHIC_DIR,
    POLYMORPHIC_HELPER_NAME, UnitKind,
};
use crate::dispatch::{DispatchFlavor, ExceptionPlan, PolymorphicPlan};
use crate::mangle::escape;
use crate::placeholder;
use crate::template::{Replacements, substitute};

/// `#include` line for a header; bracketed or quoted names are kept as written.
fn include_line(include: &str) -> String {
    if include.starts_with('<') || include.starts_with('"') {
        format!("#include {}", include)
    } else {
        format!("#include \"{}\"", include)
    }
}

fn quoted_include(path: &str) -> String {
    format!("#include \"{}\"", path)
}

impl Composer<'_> {
    /// Shared handle runtime, including every class's native headers.
    pub fn compose_handle_unit(
        &self,
        classes: &[Arc<ClassModel>],
    ) -> Result<OutputUnit, ConfigurationError> {
        let mut includes: Vec<&str> = Vec::new();
        let all = self
            .options
            .native_includes
            .iter()
            .chain(classes.iter().flat_map(|c| c.includes.iter()));
        for include in all {
            if !includes.contains(&include.as_str()) {
                includes.push(include.as_str());
            }
        }
        let all_includes = includes
            .iter()
            .map(|i| include_line(i))
            .collect::<Vec<_>>()
            .join("\n");

        let table = Replacements::new()
            .with(placeholder::ALL_INCLUDES, all_includes)
            .with(
                placeholder::CUSTOM_JNI,
                self.custom_code(&self.options.custom_code_paths)?,
            );
        let template = self.ctx.load(paths::HANDLE_UNIT)?;
        Ok(OutputUnit::new(
            self.internal_path(HANDLE_UNIT_NAME),
            UnitKind::Handle,
            substitute(&template, &table),
        ))
    }

    /// Shared exception translation unit.
    pub fn compose_exception_unit(
        &self,
        plan: &ExceptionPlan,
    ) -> Result<OutputUnit, ConfigurationError> {
        let func = self.ctx.load(paths::EXCEPTION_FUNC)?;
        let func = substitute(
            &func,
            &Replacements::new().with(placeholder::EXCEPTION_FUNC_BODY, plan.body()),
        );
        let handle_include = quoted_include(HANDLE_UNIT_NAME);
        let table = Replacements::new()
            .with(placeholder::HANDLE_FILE_INCLUDE, handle_include)
            .with(placeholder::EXCEPTION_FUNC, func);
        let template = self.ctx.load(paths::EXCEPTION_HANDLER)?;
        Ok(OutputUnit::new(
            self.internal_path(EXCEPTION_UNIT_NAME),
            UnitKind::Exception,
            substitute(&template, &table),
        ))
    }

    /// File name of a class's dispatch helper, relative to the internal directory.
    pub fn polymorphic_file_name(plan: &PolymorphicPlan) -> String {
        format!(
            "{}/{}.jni.hpp",
            POLYMORPHIC_DIR,
            escape(plan.base.binary_name())
        )
    }

    /// Dispatch helpers of one handle class.
    pub fn compose_polymorphic_unit(
        &self,
        plan: &PolymorphicPlan,
    ) -> Result<OutputUnit, ConfigurationError> {
        let function_table = |body: String| {
            Replacements::new()
                .with(placeholder::C_TYPE, plan.base_native.as_str())
                .with(
                    placeholder::C_TYPE_UNDERSCORE,
                    plan.base_native.replace("::", "_"),
                )
                .with(placeholder::DISPATCH_BODY, body)
        };

        let handle_to_instance = DispatchFlavor::ALL
            .iter()
            .map(|&flavor| -> Result<String, ConfigurationError> {
                let template = self.ctx.load(flavor.template_path())?;
                Ok(substitute(&template, &function_table(plan.handle_body(flavor))))
            })
            .collect::<Result<Vec<_>, _>>()?
            .join("\n");
        let class_name = self.ctx.load(paths::POLYMORPHIC_CLASS_NAME)?;
        let instance_to_path = substitute(&class_name, &function_table(plan.class_name_body()));

        let table = Replacements::new()
            .with(placeholder::JAVA_PATH, plan.base.slash_path())
            .with(
                placeholder::HANDLE_FILE_INCLUDE,
                quoted_include(&format!("../{}", HANDLE_UNIT_NAME)),
            )
            .with(placeholder::HANDLE_TO_INSTANCE, handle_to_instance)
            .with(placeholder::INSTANCE_TO_JAVA_PATH, instance_to_path);
        let template = self.ctx.load(paths::POLYMORPHIC_FILE)?;
        Ok(OutputUnit::new(
            self.internal_path(&Self::polymorphic_file_name(plan)),
            UnitKind::Polymorphic,
            substitute(&template, &table),
        ))
    }

    /// Unit including every dispatch helper.
    pub fn compose_polymorphic_aggregate(
        &self,
        plans: &[PolymorphicPlan],
    ) -> Result<OutputUnit, ConfigurationError> {
        let includes = plans
            .iter()
            .map(|plan| quoted_include(&Self::polymorphic_file_name(plan)))
            .collect::<Vec<_>>()
            .join("\n");
        let handle_include = quoted_include(HANDLE_UNIT_NAME);
        let table = Replacements::new()
            .with(placeholder::HANDLE_FILE_INCLUDE, handle_include)
            .with(placeholder::POLYMORPHIC_INCLUDES, includes);
        let template = self.ctx.load(paths::POLYMORPHIC_HELPER)?;
        Ok(OutputUnit::new(
            self.internal_path(POLYMORPHIC_HELPER_NAME),
            UnitKind::PolymorphicAggregate,
            substitute(&template, &table),
        ))
    }
}
