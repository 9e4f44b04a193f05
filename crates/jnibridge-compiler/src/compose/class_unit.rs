use jnibridge_core::{BridgeError, ClassModel};
use jnibridge_registry::builtin::paths;
use tracing::debug;

use super::{Composer, EXCEPTION_UNIT_NAME, OutputUnit, POLYMORPHIC_HELPER_NAME, UnitKind};
use crate::placeholder;
use crate::template::{Replacements, substitute};

impl Composer<'_> {
    /// Relative path of the unit holding `class`'s boundary functions.
    pub fn class_unit_path(&self, class: &ClassModel) -> String {
        let package = class.path.package();
        let file = format!("{}{}", class.path.simple_name(), self.options.unit_suffix);
        if package.is_empty() {
            file
        } else {
            format!("{}/{}", package.replace('.', "/"), file)
        }
    }

    /// Includes of the shared helpers, relative to the class unit.
    fn internal_includes(&self, class: &ClassModel) -> String {
        let package = class.path.package();
        let depth = if package.is_empty() {
            0
        } else {
            package.split('.').count()
        };
        let up = "../".repeat(depth);
        [POLYMORPHIC_HELPER_NAME, EXCEPTION_UNIT_NAME]
            .iter()
            .map(|name| format!("#include \"{}{}\"", up, self.internal_path(name)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render the unit with every boundary function of `class`.
    pub fn compose_class(&self, class: &ClassModel) -> Result<OutputUnit, BridgeError> {
        let methods = class
            .methods
            .iter()
            .map(|m| {
                self.compose_method(class, m)
                    .map_err(|e| BridgeError::in_method(&class.path, m.managed_name.as_str(), e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let custom = self
            .custom_code(&class.custom_code_paths)
            .map_err(|e| BridgeError::in_class(&class.path, e))?;

        let includes = self.internal_includes(class);
        let table = Replacements::new()
            .with(placeholder::JAVA_PATH, class.path.slash_path())
            .with(placeholder::INTERNAL_INCLUDES, includes)
            .with(placeholder::CUSTOM_JNI, custom)
            .with(placeholder::METHODS, methods.join("\n"));
        let template = self
            .ctx
            .load(paths::CLASS_UNIT)
            .map_err(|e| BridgeError::in_class(&class.path, e))?;

        let unit = OutputUnit::new(
            self.class_unit_path(class),
            UnitKind::Class,
            substitute(&template, &table),
        );
        debug!(
            target: "jnibridge::compose",
            class = %class.path,
            path = %unit.path,
            methods = class.methods.len(),
            "composed class unit"
        );
        Ok(unit)
    }
}
