//! JNI binding generation.
//!
//! `jnibridge` takes a model of managed (Java) classes intended to be exposed
//! to native code and produces the C++ sources implementing their JNI boundary
//! functions: value marshaling, exception translation and safe polymorphic
//! downcasting of opaque handles.
//!
//! ## Usage
//!
//! ```
//! use jnibridge::{
//!     BridgeDecl, BuiltinResources, ClassDecl, Generator, LogicalType, MapperRegistry,
//!     MethodDecl, SnapshotBuilder, UnitKind,
//! };
//!
//! let snapshot = SnapshotBuilder::new()
//!     .with(
//!         ClassDecl::class("com.example.MathUtil")
//!             .with_bridge(BridgeDecl::new().with_namespace("math"))
//!             .with_method(
//!                 MethodDecl::native_static("square")
//!                     .with_param(LogicalType::INT)
//!                     .returns(LogicalType::INT),
//!             ),
//!     )?
//!     .select(&["com.example.*"])?;
//!
//! let mappers = MapperRegistry::with_defaults();
//! let bindings = Generator::new(&mappers, &BuiltinResources).generate(&snapshot)?;
//!
//! let unit = bindings.unit("com/example/MathUtil.jni.cpp").unwrap();
//! assert_eq!(unit.kind, UnitKind::Class);
//! assert!(unit.contents.contains("Java_com_example_MathUtil_square__I"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Crates
//!
//! - [`core`]: names, logical types, declarations, resolved models, errors
//! - [`registry`]: mapper and exception registries, declaration snapshots,
//!   built-in templates
//! - [`compiler`]: resolution, dispatch planning and composition
//!
//! Generation never touches the file system; writing the returned
//! [`OutputUnit`]s is left to the caller.

use std::sync::Arc;

use tracing::info;

pub use jnibridge_compiler as compiler;
pub use jnibridge_core as core;
pub use jnibridge_registry as registry;

pub use jnibridge_compiler::{GeneratorOptions, OutputUnit, UnitKind};
pub use jnibridge_core::{
    AllocKind, BridgeDecl, BridgeError, ClassDecl, ClassModel, ConfigurationError, JavaPath,
    LogicalType, MapperId, MappingRule, MethodDecl, MethodModel, MethodRole, OccurrenceFlags,
    Ownership, Primitive, ResourceProvider, TemplatePair, TypeBinding, TypeOccurrence,
};
pub use jnibridge_registry::{
    BuiltinResources, DeclarationSnapshot, DirectoryResources, ExceptionRegistry,
    InMemoryResources, LayeredResources, MapperRegistry, SnapshotBuilder,
};

use jnibridge_compiler::{
    ClassResolver, Composer, ExceptionPlan, GenerationContext, PolymorphicPlan,
};

static NO_EXCEPTIONS: ExceptionRegistry = ExceptionRegistry::new();

// ============================================================================
// Generator
// ============================================================================

/// Entry point of one or more generation invocations.
///
/// The registries and resource provider are borrowed for the generator's
/// lifetime, so they cannot change while generation runs.
pub struct Generator<'a> {
    mappers: &'a MapperRegistry,
    exceptions: &'a ExceptionRegistry,
    resources: &'a dyn ResourceProvider,
    options: GeneratorOptions,
}

impl<'a> Generator<'a> {
    /// A generator without exception translations and with default options.
    pub fn new(mappers: &'a MapperRegistry, resources: &'a dyn ResourceProvider) -> Self {
        Self {
            mappers,
            exceptions: &NO_EXCEPTIONS,
            resources,
            options: GeneratorOptions::default(),
        }
    }

    pub fn with_exceptions(mut self, exceptions: &'a ExceptionRegistry) -> Self {
        self.exceptions = exceptions;
        self
    }

    pub fn with_options(mut self, options: GeneratorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Generate every output unit for the selected classes of `snapshot`.
    ///
    /// Generation stops at the first error; no units are returned in that case.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn generate(
        &self,
        snapshot: &DeclarationSnapshot,
    ) -> Result<GeneratedBindings, BridgeError> {
        info!(
            target: "jnibridge::generate",
            classes = snapshot.selected_paths().len(),
            mappers = self.mappers.len(),
            exceptions = self.exceptions.len(),
            "generation started"
        );

        let ctx = GenerationContext::new(snapshot, self.mappers, self.exceptions, self.resources);

        let mut resolver = ClassResolver::new(ctx);
        let classes = snapshot
            .selected_paths()
            .iter()
            .map(|path| resolver.resolve(path))
            .collect::<Result<Vec<_>, _>>()?;

        let exception_plan = ExceptionPlan::new(ctx.exceptions, snapshot.hierarchy())?;
        let polymorphic_plans: Vec<PolymorphicPlan> = classes
            .iter()
            .filter_map(|class| PolymorphicPlan::for_class(class, snapshot.hierarchy()))
            .collect();

        let composer = Composer::new(ctx, &self.options);
        let mut units = Vec::with_capacity(classes.len() + polymorphic_plans.len() + 3);
        for class in &classes {
            units.push(composer.compose_class(class)?);
        }
        units.push(composer.compose_handle_unit(&classes)?);
        units.push(composer.compose_exception_unit(&exception_plan)?);
        for plan in &polymorphic_plans {
            let unit = composer
                .compose_polymorphic_unit(plan)
                .map_err(|e| BridgeError::in_class(&plan.base, e))?;
            units.push(unit);
        }
        units.push(composer.compose_polymorphic_aggregate(&polymorphic_plans)?);

        info!(
            target: "jnibridge::generate",
            classes = classes.len(),
            units = units.len(),
            dispatch_helpers = polymorphic_plans.len(),
            "generation finished"
        );

        Ok(GeneratedBindings { units, classes })
    }
}

// ============================================================================
// Output
// ============================================================================

/// Everything produced by one successful invocation.
#[derive(Debug, Clone)]
pub struct GeneratedBindings {
    units: Vec<OutputUnit>,
    classes: Vec<Arc<ClassModel>>,
}

impl GeneratedBindings {
    /// Output units: class units in selection order, then the shared helpers.
    pub fn units(&self) -> &[OutputUnit] {
        &self.units
    }

    pub fn into_units(self) -> Vec<OutputUnit> {
        self.units
    }

    pub fn unit(&self, path: &str) -> Option<&OutputUnit> {
        self.units.iter().find(|u| u.path == path)
    }

    pub fn units_of_kind(&self, kind: UnitKind) -> impl Iterator<Item = &OutputUnit> {
        self.units.iter().filter(move |u| u.kind == kind)
    }

    /// Resolved models of the selected classes.
    pub fn classes(&self) -> &[Arc<ClassModel>] {
        &self.classes
    }

    pub fn class(&self, path: &JavaPath) -> Option<&ClassModel> {
        self.classes
            .iter()
            .find(|c| &c.path == path)
            .map(Arc::as_ref)
    }
}
