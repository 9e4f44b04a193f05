//! Mapper Registry - default and named boundary mappings.
//!
//! The registry is a plain value: construct it (usually with
//! [`MapperRegistry::with_defaults`]), extend it, then hand it to generation by
//! shared reference. Generation never mutates it.

use jnibridge_core::{ConfigurationError, LogicalType, MapperId, MappingRule, Primitive};
use rustc_hash::FxHashMap;

use crate::builtin::{mappers, paths};

/// Registered mapping rules plus the default rule per logical type.
#[derive(Debug, Clone, Default)]
pub struct MapperRegistry {
    rules: FxHashMap<MapperId, MappingRule>,
    defaults: FxHashMap<LogicalType, MapperId>,
}

impl MapperRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry pre-seeded with the built-in mappers.
    ///
    /// Defaults cover every primitive, `java.lang.String` and
    /// `java.nio.file.Path`. The string view and byte span mappers are
    /// registered by id only.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_builtins();
        registry
    }

    fn register_builtins(&mut self) {
        for primitive in Primitive::ALL {
            let (id, native) = match primitive {
                Primitive::Void => (mappers::VOID, "void"),
                Primitive::Boolean => (mappers::BOOLEAN, "bool"),
                Primitive::Byte => (mappers::BYTE, "std::int8_t"),
                Primitive::Char => (mappers::CHAR, "char16_t"),
                Primitive::Short => (mappers::SHORT, "std::int16_t"),
                Primitive::Int => (mappers::INT, "int"),
                Primitive::Long => (mappers::LONG, "std::int64_t"),
                Primitive::Float => (mappers::FLOAT, "float"),
                Primitive::Double => (mappers::DOUBLE, "double"),
            };
            let out = if primitive == Primitive::Void {
                paths::VOID_OUT
            } else {
                paths::PRIMITIVE_OUT
            };
            let rule = MappingRule::new(id, native, primitive.jni_type())
                .with_templates(paths::PRIMITIVE_IN, out);
            self.insert_default(primitive.into(), rule);
        }

        self.insert_default(
            LogicalType::string(),
            MappingRule::new(mappers::STRING, "std::string", "jstring")
                .with_templates(paths::STRING_IN, paths::STRING_OUT)
                .with_cleanup(paths::STRING_CLEANUP),
        );
        self.insert_default(
            LogicalType::path(),
            MappingRule::new(mappers::PATH, "std::filesystem::path", "jobject")
                .with_templates(paths::PATH_IN, paths::PATH_OUT),
        );

        self.insert(
            MappingRule::new(mappers::STRING_VIEW, "std::string_view", "jstring")
                .with_templates(paths::STRING_VIEW_IN, paths::STRING_VIEW_OUT)
                .with_cleanup(paths::STRING_CLEANUP),
        );
        self.insert(
            MappingRule::new(
                mappers::BYTE_SPAN,
                "std::span<const std::byte>",
                "jbyteArray",
            )
                .with_templates(paths::BYTE_SPAN_IN, paths::BYTE_SPAN_OUT)
                .with_cleanup(paths::BYTE_SPAN_CLEANUP),
        );
    }

    fn insert(&mut self, rule: MappingRule) {
        self.rules.insert(rule.id.clone(), rule);
    }

    fn insert_default(&mut self, ty: LogicalType, rule: MappingRule) {
        self.defaults.insert(ty, rule.id.clone());
        self.insert(rule);
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Register a named mapper.
    pub fn register(&mut self, rule: MappingRule) -> Result<(), ConfigurationError> {
        if self.rules.contains_key(&rule.id) {
            return Err(ConfigurationError::DuplicateMapper(rule.id.to_string()));
        }
        self.insert(rule);
        Ok(())
    }

    /// Register a mapper and make it the default for `ty`.
    pub fn register_default(
        &mut self,
        ty: LogicalType,
        rule: MappingRule,
    ) -> Result<(), ConfigurationError> {
        let id = rule.id.clone();
        self.register(rule)?;
        self.defaults.insert(ty, id);
        Ok(())
    }

    /// Make an already registered mapper the default for `ty`.
    pub fn set_default(
        &mut self,
        ty: LogicalType,
        id: impl Into<MapperId>,
    ) -> Result<(), ConfigurationError> {
        let id = id.into();
        if !self.rules.contains_key(&id) {
            return Err(ConfigurationError::UnknownMapper(id.to_string()));
        }
        self.defaults.insert(ty, id);
        Ok(())
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    pub fn get(&self, id: &MapperId) -> Option<&MappingRule> {
        self.rules.get(id)
    }

    /// Look up a mapper by id, failing if it was never registered.
    pub fn require(&self, id: &MapperId) -> Result<&MappingRule, ConfigurationError> {
        self.get(id)
            .ok_or_else(|| ConfigurationError::UnknownMapper(id.to_string()))
    }

    /// The default mapper for a logical type.
    pub fn default_for(&self, ty: &LogicalType) -> Option<&MappingRule> {
        self.defaults.get(ty).and_then(|id| self.rules.get(id))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_primitives_string_and_path() {
        let registry = MapperRegistry::with_defaults();
        for primitive in Primitive::ALL {
            let rule = registry.default_for(&primitive.into()).unwrap();
            assert_eq!(rule.abi_tag, primitive.jni_type());
        }
        let string = registry.default_for(&LogicalType::string()).unwrap();
        assert_eq!(string.native_type, "std::string");
        let path = registry.default_for(&LogicalType::path()).unwrap();
        assert_eq!(path.native_type, "std::filesystem::path");
    }

    #[test]
    fn named_mappers_are_not_defaults() {
        let registry = MapperRegistry::with_defaults();
        let view = registry.get(&MapperId::new(mappers::STRING_VIEW)).unwrap();
        assert_eq!(view.native_type, "std::string_view");
        assert_eq!(
            registry.default_for(&LogicalType::string()).unwrap().id,
            MapperId::new(mappers::STRING)
        );
        let bytes = LogicalType::array_of(Primitive::Byte.into());
        assert!(registry.default_for(&bytes).is_none());
    }

    #[test]
    fn duplicate_registration_fails() {
        let mut registry = MapperRegistry::with_defaults();
        let result = registry.register(MappingRule::new(mappers::INT, "long", "jint"));
        assert_eq!(
            result,
            Err(ConfigurationError::DuplicateMapper(mappers::INT.into()))
        );
    }

    #[test]
    fn set_default_requires_registered_mapper() {
        let mut registry = MapperRegistry::with_defaults();
        assert_eq!(
            registry.set_default(LogicalType::string(), "missing"),
            Err(ConfigurationError::UnknownMapper("missing".into()))
        );

        registry
            .set_default(LogicalType::string(), mappers::STRING_VIEW)
            .unwrap();
        let string = registry.default_for(&LogicalType::string()).unwrap();
        assert_eq!(string.native_type, "std::string_view");
    }

    #[test]
    fn register_default_overrides_builtin() {
        let mut registry = MapperRegistry::new();
        registry
            .register_default(
                LogicalType::INT,
                MappingRule::new("app.int", "std::int32_t", "jint").with_templates("i", "o"),
            )
            .unwrap();
        assert_eq!(
            registry.default_for(&LogicalType::INT).unwrap().native_type,
            "std::int32_t"
        );
    }
}
