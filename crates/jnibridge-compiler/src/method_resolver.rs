//! Resolution of native method declarations into [`MethodModel`]s.

use jnibridge_core::{ClassDecl, ConfigurationError, MethodDecl, MethodModel};
use tracing::trace;

use crate::context::GenerationContext;
use crate::mangle::mangle;
use crate::type_resolver::TypeResolver;

/// Resolves the native methods of a class.
pub struct MethodResolver<'a> {
    types: TypeResolver<'a>,
}

impl<'a> MethodResolver<'a> {
    pub fn new(ctx: GenerationContext<'a>) -> Self {
        Self {
            types: TypeResolver::new(ctx),
        }
    }

    /// Resolve `method`, declared on `owner`.
    ///
    /// Parameters receive ids `"0"`, `"1"`, ... in declaration order; the
    /// return value has none. Instance methods of handle classes also carry a
    /// binding for the calling instance.
    pub fn resolve(
        &self,
        owner: &ClassDecl,
        method: &MethodDecl,
    ) -> Result<MethodModel, ConfigurationError> {
        let namespace = match &method.tags.namespace {
            Some(ns) => ns.clone(),
            None => owner.native_name().namespace_string(),
        };
        let native_name = method
            .tags
            .native_name
            .clone()
            .unwrap_or_else(|| method.name.clone());
        let symbol = mangle(&owner.path, &method.name, method.param_types());

        let self_binding = if !method.is_static && owner.opaque_handle {
            Some(self.types.self_binding(owner)?)
        } else {
            None
        };
        let return_binding = self.types.resolve(&method.return_type, None, owner)?;
        let params = method
            .params
            .iter()
            .enumerate()
            .map(|(i, param)| self.types.resolve(param, Some(i.to_string()), owner))
            .collect::<Result<Vec<_>, _>>()?;

        trace!(
            target: "jnibridge::resolve",
            class = %owner.path,
            method = %method.name,
            %symbol,
            "resolved method"
        );

        Ok(MethodModel {
            managed_name: method.name.clone(),
            namespace,
            native_name,
            symbol,
            is_static: method.is_static,
            role: method.tags.role,
            self_binding,
            return_binding,
            params,
            function_call: method.tags.function_call.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jnibridge_core::{AllocKind, BridgeDecl, LogicalType, MethodRole};
    use jnibridge_registry::{
        BuiltinResources, DeclarationSnapshot, ExceptionRegistry, MapperRegistry, SnapshotBuilder,
    };

    fn snapshot() -> DeclarationSnapshot {
        SnapshotBuilder::new()
            .with(
                ClassDecl::class("com.example.Counter")
                    .with_handle()
                    .with_bridge(BridgeDecl::new().with_namespace("counters"))
                    .with_method(
                        MethodDecl::native("add")
                            .with_param(LogicalType::INT)
                            .with_param(LogicalType::string())
                            .returns(LogicalType::LONG),
                    )
                    .with_method(
                        MethodDecl::native_static("create")
                            .with_role(MethodRole::Allocate(AllocKind::Shared))
                            .with_namespace("factory")
                            .with_native_name("make_counter")
                            .returns(LogicalType::LONG),
                    ),
            )
            .unwrap()
            .select(&["com.example.Counter"])
            .unwrap()
    }

    fn resolve(name: &str) -> MethodModel {
        let snapshot = snapshot();
        let mappers = MapperRegistry::with_defaults();
        let exceptions = ExceptionRegistry::new();
        let ctx = GenerationContext::new(&snapshot, &mappers, &exceptions, &BuiltinResources);
        let owner = snapshot.get(&"com.example.Counter".into()).unwrap();
        let method = owner.methods.iter().find(|m| m.name == name).unwrap();
        MethodResolver::new(ctx).resolve(owner, method).unwrap()
    }

    #[test]
    fn instance_method_gets_self_and_positional_ids() {
        let model = resolve("add");
        assert_eq!(model.namespace, "counters");
        assert_eq!(model.native_name, "add");
        assert_eq!(
            model.symbol,
            "Java_com_example_Counter_add__ILjava_lang_String_2"
        );
        assert!(model.self_binding.is_some());
        assert_eq!(model.return_binding.id, None);
        let ids: Vec<_> = model.params.iter().map(|p| p.id.as_deref()).collect();
        assert_eq!(ids, [Some("0"), Some("1")]);
    }

    #[test]
    fn tags_override_namespace_name_and_role() {
        let model = resolve("create");
        assert!(model.self_binding.is_none());
        assert_eq!(model.qualified_native_name(), "factory::make_counter");
        assert_eq!(model.alloc_kind(), Some(AllocKind::Shared));
        assert_eq!(model.symbol, "Java_com_example_Counter_create__");
    }
}
