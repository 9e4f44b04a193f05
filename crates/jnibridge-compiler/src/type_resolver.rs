//! Resolution of value occurrences into [`TypeBinding`]s.
//!
//! This module provides [`TypeResolver`], which decides how a parameter or
//! return value crosses the boundary.
//!
//! ## Resolution order
//!
//! 1. Enum types use the fixed enum conversion templates.
//! 2. Opaque-handle types use the template family of their ownership tag
//!    (by value unless tagged), replaced by the handle class's own templates
//!    when it declares them.
//! 3. Every other type goes through the mapper chain, first match wins:
//!    - the mapper tagged on the occurrence itself
//!    - the enclosing class's override for the logical type
//!    - the registry default for the logical type
//!
//! Custom template paths on the occurrence replace whatever was chosen.
//! Failing to find a mapper is a [`ConfigurationError`]; a binding is never
//! left empty.

use jnibridge_core::{
    ClassDecl, ConfigurationError, ConversionKind, CustomOverrides, LogicalType, MappingRule,
    OccurrenceFlags, Ownership, TypeBinding, TypeOccurrence,
};
use jnibridge_registry::builtin::paths;
use tracing::trace;

use crate::compose::binding::binding_replacements;
use crate::context::GenerationContext;
use crate::template::{collapse_blank_lines, substitute};

/// Priority level a mapper was found at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapperSource {
    /// Tagged on the occurrence.
    Occurrence,
    /// Enclosing class's override table.
    Class,
    /// Registry default.
    Global,
}

impl MapperSource {
    /// Lookup order of the mapper chain.
    pub const CHAIN: [MapperSource; 3] = [
        MapperSource::Occurrence,
        MapperSource::Class,
        MapperSource::Global,
    ];
}

fn handle_family(ownership: Ownership) -> (&'static str, &'static str) {
    match ownership {
        Ownership::Value => (paths::HANDLE_VAL_IN, paths::HANDLE_VAL_OUT),
        Ownership::Pointer => (paths::HANDLE_PTR_IN, paths::HANDLE_PTR_OUT),
        Ownership::Reference => (paths::HANDLE_REF_IN, paths::HANDLE_REF_OUT),
        Ownership::Shared => (paths::HANDLE_SHARED_IN, paths::HANDLE_SHARED_OUT),
        Ownership::Unique => (paths::HANDLE_UNIQUE_IN, paths::HANDLE_UNIQUE_OUT),
    }
}

/// Resolves value occurrences to bindings.
pub struct TypeResolver<'a> {
    ctx: GenerationContext<'a>,
}

impl<'a> TypeResolver<'a> {
    pub fn new(ctx: GenerationContext<'a>) -> Self {
        Self { ctx }
    }

    /// Resolve one occurrence declared inside `owner`.
    ///
    /// `id` is the positional index for parameters and `None` for return values.
    pub fn resolve(
        &self,
        occurrence: &TypeOccurrence,
        id: Option<String>,
        owner: &ClassDecl,
    ) -> Result<TypeBinding, ConfigurationError> {
        let referenced = occurrence.ty.as_object().and_then(|p| self.ctx.decl(p));

        let mut binding = match referenced {
            Some(decl) if decl.is_enum() => self.enum_binding(occurrence, id, decl)?,
            Some(decl) if decl.opaque_handle => self.handle_binding(occurrence, id, decl)?,
            _ => self.mapped_binding(occurrence, id, owner)?,
        };

        self.apply_custom_templates(&mut binding, &occurrence.tags.custom)?;
        Ok(binding)
    }

    /// Binding for the calling instance of a non-static method.
    pub fn self_binding(&self, owner: &ClassDecl) -> Result<TypeBinding, ConfigurationError> {
        Ok(TypeBinding {
            logical: LogicalType::Object(owner.path.clone()),
            id: None,
            conversion: ConversionKind::SelfHandle,
            native_type: owner.native_name().to_string(),
            abi_tag: "jobject".to_string(),
            in_template: self.ctx.load(paths::SELF_IN)?.into_owned(),
            out_template: String::new(),
            cleanup: None,
            is_const: false,
            ignore_null_check: false,
            template_args: Vec::new(),
            custom: CustomOverrides::default(),
        })
    }

    // =========================================================================
    // Categories
    // =========================================================================

    fn enum_binding(
        &self,
        occurrence: &TypeOccurrence,
        id: Option<String>,
        decl: &ClassDecl,
    ) -> Result<TypeBinding, ConfigurationError> {
        trace!(target: "jnibridge::resolve", ty = %occurrence.ty, "enum conversion");
        Ok(self.base_binding(
            occurrence,
            id,
            ConversionKind::Enum,
            decl.native_name().to_string(),
            "jobject",
            self.ctx.load(paths::ENUM_IN)?.into_owned(),
            self.ctx.load(paths::ENUM_OUT)?.into_owned(),
        ))
    }

    fn handle_binding(
        &self,
        occurrence: &TypeOccurrence,
        id: Option<String>,
        decl: &ClassDecl,
    ) -> Result<TypeBinding, ConfigurationError> {
        let ownership = occurrence.tags.ownership.unwrap_or_default();
        let bridge = decl.bridge.as_ref();
        let class_templates = bridge.and_then(|b| b.handle_templates.as_ref());
        let (in_path, out_path) = match class_templates {
            Some(pair) => (pair.in_path.as_str(), pair.out_path.as_str()),
            None => handle_family(ownership),
        };
        trace!(
            target: "jnibridge::resolve",
            ty = %occurrence.ty,
            ownership = ownership.name(),
            "opaque handle conversion"
        );
        Ok(self.base_binding(
            occurrence,
            id,
            ConversionKind::Handle(ownership),
            decl.native_name().to_string(),
            "jobject",
            self.ctx.load(in_path)?.into_owned(),
            self.ctx.load(out_path)?.into_owned(),
        ))
    }

    fn mapped_binding(
        &self,
        occurrence: &TypeOccurrence,
        id: Option<String>,
        owner: &ClassDecl,
    ) -> Result<TypeBinding, ConfigurationError> {
        let (rule, source) = self.find_mapper(occurrence, owner)?;
        trace!(
            target: "jnibridge::resolve",
            ty = %occurrence.ty,
            mapper = %rule.id,
            source = ?source,
            "mapper selected"
        );

        let templates =
            rule.templates
                .as_ref()
                .ok_or_else(|| ConfigurationError::MissingTemplateDeclaration {
                    mapper: rule.id.to_string(),
                })?;
        if rule.native_template_args.len() != rule.logical_template_args.len() {
            return Err(ConfigurationError::TemplateArgumentMismatch {
                mapper: rule.id.to_string(),
                native: rule.native_template_args.len(),
                logical: rule.logical_template_args.len(),
            });
        }

        let mut binding = self.base_binding(
            occurrence,
            id,
            ConversionKind::Mapper(rule.id.clone()),
            rule.native_type.clone(),
            &rule.abi_tag,
            self.ctx.load(&templates.in_path)?.into_owned(),
            self.ctx.load(&templates.out_path)?.into_owned(),
        );
        binding.template_args = rule
            .native_template_args
            .iter()
            .cloned()
            .zip(rule.logical_template_args.iter().cloned())
            .collect();

        // Cleanup only releases inbound temporaries, so returns have none.
        if let Some(cleanup_path) = &templates.cleanup_path
            && binding.is_parameter()
        {
            let text = self.ctx.load(cleanup_path)?;
            let rendered = substitute(&text, &binding_replacements(&binding));
            binding.cleanup = Some(collapse_blank_lines(&rendered));
        }
        Ok(binding)
    }

    // =========================================================================
    // Mapper chain
    // =========================================================================

    /// Walk the mapper chain; the first level with a mapper wins.
    pub fn find_mapper(
        &self,
        occurrence: &TypeOccurrence,
        owner: &ClassDecl,
    ) -> Result<(&'a MappingRule, MapperSource), ConfigurationError> {
        for source in MapperSource::CHAIN {
            if let Some(rule) = self.lookup(source, occurrence, owner)? {
                return Ok((rule, source));
            }
        }
        Err(ConfigurationError::UnmappedType {
            ty: occurrence.ty.to_string(),
        })
    }

    fn lookup(
        &self,
        source: MapperSource,
        occurrence: &TypeOccurrence,
        owner: &ClassDecl,
    ) -> Result<Option<&'a MappingRule>, ConfigurationError> {
        let mappers = self.ctx.mappers;
        let id = match source {
            MapperSource::Occurrence => occurrence.tags.mapper.as_ref(),
            MapperSource::Class => owner
                .bridge
                .as_ref()
                .and_then(|b| b.type_mappers.get(&occurrence.ty)),
            MapperSource::Global => return Ok(mappers.default_for(&occurrence.ty)),
        };
        id.map(|id| mappers.require(id)).transpose()
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    #[allow(clippy::too_many_arguments)]
    fn base_binding(
        &self,
        occurrence: &TypeOccurrence,
        id: Option<String>,
        conversion: ConversionKind,
        native_type: String,
        abi_tag: &str,
        in_template: String,
        out_template: String,
    ) -> TypeBinding {
        let flags = occurrence.tags.flags;
        TypeBinding {
            logical: occurrence.ty.clone(),
            id,
            conversion,
            native_type,
            abi_tag: abi_tag.to_string(),
            in_template,
            out_template,
            cleanup: None,
            is_const: flags.contains(OccurrenceFlags::CONST),
            ignore_null_check: flags.contains(OccurrenceFlags::IGNORE_NULLCHECK),
            template_args: Vec::new(),
            custom: occurrence.tags.custom.clone(),
        }
    }

    fn apply_custom_templates(
        &self,
        binding: &mut TypeBinding,
        custom: &CustomOverrides,
    ) -> Result<(), ConfigurationError> {
        if let Some(path) = &custom.in_template {
            binding.in_template = self.ctx.load(path)?.into_owned();
        }
        if let Some(path) = &custom.out_template {
            binding.out_template = self.ctx.load(path)?.into_owned();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jnibridge_core::{BridgeDecl, MapperId, MappingRule, Primitive, TemplatePair};
    use jnibridge_registry::builtin::mappers;
    use jnibridge_registry::{
        BuiltinResources, DeclarationSnapshot, ExceptionRegistry, InMemoryResources,
        LayeredResources, MapperRegistry, SnapshotBuilder,
    };

    struct Fixture {
        snapshot: DeclarationSnapshot,
        mappers: MapperRegistry,
        exceptions: ExceptionRegistry,
        resources: LayeredResources<'static>,
    }

    impl Fixture {
        fn new(mut mappers: MapperRegistry) -> Self {
            let mut b = SnapshotBuilder::new();
            let owner_bridge = BridgeDecl::new()
                .with_namespace("native")
                .with_type_mapper(LogicalType::LONG, "class.long");
            b.declare(
                ClassDecl::class("app.Owner")
                    .with_handle()
                    .with_bridge(owner_bridge),
            )
            .unwrap();
            b.declare(
                ClassDecl::class("app.Widget")
                    .with_handle()
                    .with_bridge(BridgeDecl::new().with_namespace("ui")),
            )
            .unwrap();
            let templates = TemplatePair::new("custom.in", "custom.out");
            b.declare(
                ClassDecl::class("app.Custom")
                    .with_handle()
                    .with_bridge(BridgeDecl::new().with_handle_templates(templates)),
            )
            .unwrap();
            b.declare(ClassDecl::enumeration("app.Color").with_bridge(BridgeDecl::new()))
                .unwrap();

            for (id, native) in [("occ.long", "OccLong"), ("class.long", "ClassLong")] {
                let rule = MappingRule::new(id, native, "jlong")
                    .with_templates(paths::PRIMITIVE_IN, paths::PRIMITIVE_OUT);
                mappers.register(rule).unwrap();
            }

            let overrides = InMemoryResources::new()
                .with("custom.in", "CUSTOM IN ${cType}")
                .with("custom.out", "CUSTOM OUT")
                .with("occ.in", "OCC IN");
            Self {
                snapshot: b.select(&["app.*"]).unwrap(),
                mappers,
                exceptions: ExceptionRegistry::new(),
                resources: LayeredResources::new()
                    .with_layer(overrides)
                    .with_layer(BuiltinResources),
            }
        }

        fn ctx(&self) -> GenerationContext<'_> {
            GenerationContext::new(
                &self.snapshot,
                &self.mappers,
                &self.exceptions,
                &self.resources,
            )
        }

        fn owner(&self) -> &ClassDecl {
            self.snapshot.get(&"app.Owner".into()).unwrap()
        }
    }

    fn resolve(fx: &Fixture, occ: TypeOccurrence, id: Option<&str>) -> TypeBinding {
        TypeResolver::new(fx.ctx())
            .resolve(&occ, id.map(str::to_string), fx.owner())
            .unwrap()
    }

    #[test]
    fn occurrence_mapper_beats_class_and_global() {
        let fx = Fixture::new(MapperRegistry::with_defaults());
        let occ = TypeOccurrence::new(LogicalType::LONG).with_mapper("occ.long");
        let binding = resolve(&fx, occ, Some("0"));
        assert_eq!(binding.native_type, "OccLong");
        assert_eq!(
            binding.conversion,
            ConversionKind::Mapper(MapperId::new("occ.long"))
        );
    }

    #[test]
    fn class_mapper_beats_global() {
        let fx = Fixture::new(MapperRegistry::with_defaults());
        let binding = resolve(&fx, LogicalType::LONG.into(), Some("0"));
        assert_eq!(binding.native_type, "ClassLong");
    }

    #[test]
    fn global_default_applies_last() {
        let fx = Fixture::new(MapperRegistry::with_defaults());
        let binding = resolve(&fx, LogicalType::INT.into(), None);
        assert_eq!(binding.native_type, "int");
        assert_eq!(binding.abi_tag, "jint");
        assert_eq!(binding.id, None);
        assert_eq!(
            binding.conversion,
            ConversionKind::Mapper(MapperId::new(mappers::INT))
        );
    }

    #[test]
    fn unmapped_type_is_an_error() {
        let fx = Fixture::new(MapperRegistry::with_defaults());
        let occ = TypeOccurrence::new(LogicalType::object("app.NotDeclared"));
        let err = TypeResolver::new(fx.ctx())
            .resolve(&occ, Some("0".into()), fx.owner())
            .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::UnmappedType {
                ty: "app.NotDeclared".into()
            }
        );
    }

    #[test]
    fn unregistered_occurrence_mapper_is_an_error() {
        let fx = Fixture::new(MapperRegistry::with_defaults());
        let occ = TypeOccurrence::new(LogicalType::INT).with_mapper("nope");
        let err = TypeResolver::new(fx.ctx())
            .resolve(&occ, None, fx.owner())
            .unwrap_err();
        assert_eq!(err, ConfigurationError::UnknownMapper("nope".into()));
    }

    #[test]
    fn mapper_without_templates_is_an_error() {
        let mut mappers = MapperRegistry::with_defaults();
        mappers
            .register(MappingRule::new("bare", "Bare", "jobject"))
            .unwrap();
        let fx = Fixture::new(mappers);
        let occ = TypeOccurrence::new(LogicalType::INT).with_mapper("bare");
        let err = TypeResolver::new(fx.ctx())
            .resolve(&occ, None, fx.owner())
            .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::MissingTemplateDeclaration {
                mapper: "bare".into()
            }
        );
    }

    #[test]
    fn mismatched_template_args_are_an_error() {
        let mut mappers = MapperRegistry::with_defaults();
        mappers
            .register(
                MappingRule::new("vec", "std::vector<int>", "jintArray")
                    .with_templates(paths::PRIMITIVE_IN, paths::PRIMITIVE_OUT)
                    .with_native_template_arg("int"),
            )
            .unwrap();
        let fx = Fixture::new(mappers);
        let occ = TypeOccurrence::new(LogicalType::array_of(LogicalType::INT)).with_mapper("vec");
        let err = TypeResolver::new(fx.ctx())
            .resolve(&occ, None, fx.owner())
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::TemplateArgumentMismatch {
                native: 1,
                logical: 0,
                ..
            }
        ));
    }

    #[test]
    fn template_args_are_paired_positionally() {
        let mut mappers = MapperRegistry::with_defaults();
        mappers
            .register(
                MappingRule::new("map", "std::map<std::string, int>", "jobject")
                    .with_templates(paths::PRIMITIVE_IN, paths::PRIMITIVE_OUT)
                    .with_template_arg("std::string", LogicalType::string())
                    .with_template_arg("int", LogicalType::object("java.lang.Integer")),
            )
            .unwrap();
        let fx = Fixture::new(mappers);
        let occ = TypeOccurrence::new(LogicalType::object("java.util.Map")).with_mapper("map");
        let binding = resolve(&fx, occ, Some("0"));
        assert_eq!(
            binding.template_args,
            vec![
                ("std::string".to_string(), LogicalType::string()),
                ("int".to_string(), LogicalType::object("java.lang.Integer")),
            ]
        );
    }

    #[test]
    fn cleanup_is_rendered_for_parameters_only() {
        let fx = Fixture::new(MapperRegistry::with_defaults());
        let param = resolve(&fx, LogicalType::string().into(), Some("2"));
        assert_eq!(
            param.cleanup.as_deref(),
            Some("        env->ReleaseStringUTFChars(jniVar2, cVar2Chars);\n")
        );

        let ret = resolve(&fx, LogicalType::string().into(), None);
        assert_eq!(ret.cleanup, None);
    }

    #[test]
    fn enum_bypasses_mapper_chain() {
        let fx = Fixture::new(MapperRegistry::new());
        let binding = resolve(&fx, LogicalType::object("app.Color").into(), Some("0"));
        assert_eq!(binding.conversion, ConversionKind::Enum);
        assert_eq!(binding.native_type, "app::Color");
        assert_eq!(binding.abi_tag, "jobject");
        assert!(binding.in_template.contains("enum_to_int"));
    }

    #[test]
    fn handle_family_follows_ownership_tag() {
        let fx = Fixture::new(MapperRegistry::new());
        let widget = LogicalType::object("app.Widget");

        let by_value = resolve(&fx, widget.clone().into(), Some("0"));
        assert_eq!(
            by_value.conversion,
            ConversionKind::Handle(Ownership::Value)
        );
        assert_eq!(by_value.native_type, "ui::Widget");

        let shared = resolve(
            &fx,
            TypeOccurrence::new(widget).with_ownership(Ownership::Shared),
            Some("0"),
        );
        assert_eq!(shared.conversion, ConversionKind::Handle(Ownership::Shared));
        assert!(shared.in_template.contains("handle_to_shared_"));
    }

    #[test]
    fn class_handle_templates_replace_family() {
        let fx = Fixture::new(MapperRegistry::new());
        let binding = resolve(&fx, LogicalType::object("app.Custom").into(), Some("0"));
        assert_eq!(binding.in_template, "CUSTOM IN ${cType}");
        assert_eq!(binding.out_template, "CUSTOM OUT");
    }

    #[test]
    fn custom_template_and_flags() {
        let fx = Fixture::new(MapperRegistry::with_defaults());
        let occ = TypeOccurrence::new(LogicalType::INT)
            .with_flags(OccurrenceFlags::CONST | OccurrenceFlags::IGNORE_NULLCHECK)
            .with_custom_templates(Some("occ.in".into()), None);
        let binding = resolve(&fx, occ, Some("0"));
        assert_eq!(binding.in_template, "OCC IN");
        assert!(binding.is_const);
        assert!(binding.ignore_null_check);
    }

    #[test]
    fn self_binding_has_no_id() {
        let fx = Fixture::new(MapperRegistry::new());
        let binding = TypeResolver::new(fx.ctx())
            .self_binding(fx.owner())
            .unwrap();
        assert_eq!(binding.id, None);
        assert_eq!(binding.conversion, ConversionKind::SelfHandle);
        assert_eq!(binding.native_type, "native::Owner");
        assert!(binding.in_template.contains("jself"));
    }

    #[test]
    fn byte_array_uses_named_span_mapper() {
        let fx = Fixture::new(MapperRegistry::with_defaults());
        let occ = TypeOccurrence::new(LogicalType::array_of(Primitive::Byte.into()))
            .with_mapper(mappers::BYTE_SPAN);
        let binding = resolve(&fx, occ, Some("0"));
        assert_eq!(binding.abi_tag, "jbyteArray");
        let cleanup = binding.cleanup.unwrap();
        assert!(cleanup.contains("ReleaseByteArrayElements"));
    }
}
