//! Resolution of bridged class declarations into [`ClassModel`]s.
//!
//! ## Metadata merge
//!
//! A class starts from its own includes and custom code paths, then walks its
//! `inherit_from` list depth first, appending each target's own lists. A
//! visited set seeded with the class itself makes the walk terminate on
//! cycles; revisits are skipped silently and first occurrence order wins.
//!
//! ## Subclasses
//!
//! Every selected strict subtype is resolved recursively. Handle classes also
//! list themselves, without subclasses, as the exact-type case of their
//! dispatch chain. The set is ordered most derived first.

use std::sync::Arc;

use jnibridge_core::{
    BridgeError, BridgeMetadata, ClassDecl, ClassModel, ConfigurationError, JavaPath, LogicalType,
};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::context::GenerationContext;
use crate::dispatch::most_derived_first;
use crate::method_resolver::MethodResolver;

/// Resolves classes, caching each model for the rest of the invocation.
pub struct ClassResolver<'a> {
    ctx: GenerationContext<'a>,
    methods: MethodResolver<'a>,
    cache: FxHashMap<JavaPath, Arc<ClassModel>>,
}

impl<'a> ClassResolver<'a> {
    pub fn new(ctx: GenerationContext<'a>) -> Self {
        Self {
            ctx,
            methods: MethodResolver::new(ctx),
            cache: FxHashMap::default(),
        }
    }

    /// Resolve the class at `path` and, recursively, its selected subtypes.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn resolve(&mut self, path: &JavaPath) -> Result<Arc<ClassModel>, BridgeError> {
        if let Some(model) = self.cache.get(path) {
            return Ok(Arc::clone(model));
        }

        let decl = self
            .ctx
            .decl(path)
            .filter(|d| d.is_bridged())
            .ok_or_else(|| ConfigurationError::NotBridged(path.to_string()))?;

        if decl.is_enum() {
            check_enum_accessors(decl).map_err(|e| BridgeError::in_class(path, e))?;
        }

        let (includes, custom_code_paths) = self
            .merge_metadata(decl)
            .map_err(|e| BridgeError::in_class(path, e))?;

        let methods = decl
            .native_methods()
            .map(|m| {
                self.methods
                    .resolve(decl, m)
                    .map_err(|e| BridgeError::in_method(path, m.name.as_str(), e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let native = decl.native_name();
        let mut model = ClassModel {
            path: path.clone(),
            managed_name: path.simple_name().to_string(),
            native,
            includes,
            custom_code_paths,
            methods,
            subclasses: Vec::new(),
            opaque_handle: decl.opaque_handle,
            is_enum: decl.is_enum(),
        };
        model.subclasses = self.subclasses(decl, &model)?;

        debug!(
            target: "jnibridge::resolve",
            class = %path,
            native = %model.native,
            methods = model.methods.len(),
            subclasses = model.subclasses.len(),
            "resolved class"
        );

        let model = Arc::new(model);
        self.cache.insert(path.clone(), Arc::clone(&model));
        Ok(model)
    }

    /// Merged includes and custom code paths of `decl`.
    pub fn merge_metadata(
        &self,
        decl: &ClassDecl,
    ) -> Result<(Vec<String>, Vec<String>), ConfigurationError> {
        let mut merged = MergedMetadata::default();
        let Some(bridge) = &decl.bridge else {
            return Ok((merged.includes, merged.custom_code_paths));
        };

        let mut visited = FxHashSet::default();
        visited.insert(decl.path.clone());
        merged.absorb(&bridge.metadata);
        self.merge_inherited(&decl.path, &bridge.metadata, &mut visited, &mut merged)?;
        Ok((merged.includes, merged.custom_code_paths))
    }

    fn merge_inherited(
        &self,
        class: &JavaPath,
        metadata: &BridgeMetadata,
        visited: &mut FxHashSet<JavaPath>,
        merged: &mut MergedMetadata,
    ) -> Result<(), ConfigurationError> {
        for target in &metadata.inherit_from {
            if !visited.insert(target.clone()) {
                debug!(
                    target: "jnibridge::resolve",
                    class = %class,
                    inherit_from = %target,
                    "metadata source already merged, skipping"
                );
                continue;
            }
            let target_metadata = self
                .ctx
                .decl(target)
                .and_then(|d| d.bridge.as_ref())
                .map(|b| &b.metadata)
                .ok_or_else(|| ConfigurationError::MissingBridgeDeclaration {
                    class: class.to_string(),
                    target: target.to_string(),
                })?;
            merged.absorb(target_metadata);
            self.merge_inherited(target, target_metadata, visited, merged)?;
        }
        Ok(())
    }

    fn subclasses(
        &mut self,
        decl: &ClassDecl,
        model: &ClassModel,
    ) -> Result<Vec<Arc<ClassModel>>, BridgeError> {
        let snapshot = self.ctx.snapshot;
        let subtypes: Vec<JavaPath> = snapshot
            .selected_subtypes(&decl.path)
            .map(|d| d.path.clone())
            .collect();

        let mut subclasses = subtypes
            .iter()
            .map(|sub| self.resolve(sub))
            .collect::<Result<Vec<_>, _>>()?;
        if decl.opaque_handle {
            subclasses.push(Arc::new(model.clone()));
        }
        Ok(most_derived_first(
            subclasses,
            |m| &m.path,
            snapshot.hierarchy(),
        ))
    }
}

#[derive(Default)]
struct MergedMetadata {
    includes: Vec<String>,
    custom_code_paths: Vec<String>,
}

impl MergedMetadata {
    fn absorb(&mut self, metadata: &BridgeMetadata) {
        extend_unique(&mut self.includes, &metadata.includes);
        extend_unique(&mut self.custom_code_paths, &metadata.custom_code_paths);
    }
}

fn extend_unique(into: &mut Vec<String>, items: &[String]) {
    for item in items {
        if !into.contains(item) {
            into.push(item.clone());
        }
    }
}

fn check_enum_accessors(decl: &ClassDecl) -> Result<(), ConfigurationError> {
    let from_int = decl.find_method("fromInt", true, &[LogicalType::INT]);
    if from_int.is_none() {
        return Err(ConfigurationError::MissingEnumAccessor {
            class: decl.path.to_string(),
            accessor: "static fromInt(int)",
        });
    }
    let to_int = decl
        .find_method("toInt", false, &[])
        .filter(|m| m.return_type.ty == LogicalType::INT);
    if to_int.is_none() {
        return Err(ConfigurationError::MissingEnumAccessor {
            class: decl.path.to_string(),
            accessor: "int toInt()",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jnibridge_core::{BridgeDecl, MethodDecl};
    use jnibridge_registry::{
        BuiltinResources, DeclarationSnapshot, ExceptionRegistry, MapperRegistry, SnapshotBuilder,
    };

    fn with_resolver<R>(
        snapshot: &DeclarationSnapshot,
        f: impl FnOnce(&mut ClassResolver<'_>) -> R,
    ) -> R {
        let mappers = MapperRegistry::with_defaults();
        let exceptions = ExceptionRegistry::new();
        let ctx = GenerationContext::new(snapshot, &mappers, &exceptions, &BuiltinResources);
        f(&mut ClassResolver::new(ctx))
    }

    fn bridged(path: &str, bridge: BridgeDecl) -> ClassDecl {
        ClassDecl::class(path).with_handle().with_bridge(bridge)
    }

    #[test]
    fn merge_is_cycle_safe_and_deduplicated() {
        let snapshot = SnapshotBuilder::new()
            .with(bridged(
                "m.A",
                BridgeDecl::new()
                    .with_include("a.hpp")
                    .with_include("shared.hpp")
                    .inherit_from("m.B"),
            ))
            .unwrap()
            .with(bridged(
                "m.B",
                BridgeDecl::new()
                    .with_include("shared.hpp")
                    .with_include("b.hpp")
                    .with_custom_code("b.cpp")
                    .inherit_from("m.A"),
            ))
            .unwrap()
            .select(&["m.*"])
            .unwrap();

        with_resolver(&snapshot, |r| {
            let a = r.resolve(&"m.A".into()).unwrap();
            assert_eq!(a.includes, ["a.hpp", "shared.hpp", "b.hpp"]);
            assert_eq!(a.custom_code_paths, ["b.cpp"]);

            let b = r.resolve(&"m.B".into()).unwrap();
            assert_eq!(b.includes, ["shared.hpp", "b.hpp", "a.hpp"]);
        });
    }

    #[test]
    fn inherit_from_unbridged_class_is_an_error() {
        let snapshot = SnapshotBuilder::new()
            .with(bridged("m.A", BridgeDecl::new().inherit_from("m.Plain")))
            .unwrap()
            .with(ClassDecl::class("m.Plain"))
            .unwrap()
            .select(&["m.A"])
            .unwrap();

        let err = with_resolver(&snapshot, |r| r.resolve(&"m.A".into()).unwrap_err());
        assert_eq!(err.class(), Some("m.A"));
        assert_eq!(
            err.configuration(),
            &ConfigurationError::MissingBridgeDeclaration {
                class: "m.A".into(),
                target: "m.Plain".into(),
            }
        );
    }

    #[test]
    fn enum_requires_both_accessors() {
        let snapshot = SnapshotBuilder::new()
            .with(
                ClassDecl::enumeration("m.Color")
                    .with_bridge(BridgeDecl::new())
                    .with_method(MethodDecl::managed("fromInt", true).with_param(LogicalType::INT)),
            )
            .unwrap()
            .select(&["m.Color"])
            .unwrap();

        let err = with_resolver(&snapshot, |r| r.resolve(&"m.Color".into()).unwrap_err());
        assert!(matches!(
            err.configuration(),
            ConfigurationError::MissingEnumAccessor {
                accessor: "int toInt()",
                ..
            }
        ));
    }

    #[test]
    fn subclasses_include_self_most_derived_first() {
        let snapshot = SnapshotBuilder::new()
            .with(bridged("oop.Base", BridgeDecl::new()))
            .unwrap()
            .with(bridged("oop.A", BridgeDecl::new()).extends("oop.Base"))
            .unwrap()
            .with(bridged("oop.AA", BridgeDecl::new()).extends("oop.A"))
            .unwrap()
            .with(bridged("oop.B", BridgeDecl::new()).extends("oop.Base"))
            .unwrap()
            .select(&["oop.*"])
            .unwrap();

        with_resolver(&snapshot, |r| {
            let base = r.resolve(&"oop.Base".into()).unwrap();
            let order: Vec<_> = base.subclasses.iter().map(|m| m.path.to_string()).collect();
            assert_eq!(order, ["oop.AA", "oop.A", "oop.B", "oop.Base"]);

            let own = base.subclasses.last().unwrap();
            assert!(own.subclasses.is_empty());

            let leaf = r.resolve(&"oop.AA".into()).unwrap();
            assert_eq!(leaf.subclasses.len(), 1);
        });
    }

    #[test]
    fn only_declared_native_methods_are_resolved() {
        let snapshot = SnapshotBuilder::new()
            .with(
                bridged("oop.Base", BridgeDecl::new())
                    .with_method(MethodDecl::native("area").returns(LogicalType::INT)),
            )
            .unwrap()
            .with(
                bridged("oop.Sub", BridgeDecl::new())
                    .extends("oop.Base")
                    .with_method(MethodDecl::managed("helper", false)),
            )
            .unwrap()
            .select(&["oop.*"])
            .unwrap();

        with_resolver(&snapshot, |r| {
            let sub = r.resolve(&"oop.Sub".into()).unwrap();
            assert!(sub.methods.is_empty());
            let base = r.resolve(&"oop.Base".into()).unwrap();
            assert_eq!(base.methods.len(), 1);
        });
    }

    #[test]
    fn unbridged_class_is_rejected() {
        let snapshot = SnapshotBuilder::new()
            .with(ClassDecl::class("m.Plain"))
            .unwrap()
            .with(bridged("m.A", BridgeDecl::new()))
            .unwrap()
            .select(&["m.A"])
            .unwrap();
        let err = with_resolver(&snapshot, |r| r.resolve(&"m.Plain".into()).unwrap_err());
        assert_eq!(
            err.configuration(),
            &ConfigurationError::NotBridged("m.Plain".into())
        );
    }
}
