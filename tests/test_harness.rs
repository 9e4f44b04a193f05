// tests/test_harness.rs
//! Shared fixtures for jnibridge integration tests.
//!
//! The OOP fixture models a small shape library:
//!
//! ```text
//! oop.Common (interface, metadata only)
//! └── oop.BaseClass (handle)      oop.Color (enum)      oop.Util (static only)
//!     ├── oop.A (handle)
//!     │   └── oop.AA (handle)
//!     └── oop.B (handle)
//! ```
//!
//! plus a few exception translations.

#![allow(dead_code)]

use jnibridge::registry::builtin::mappers;
use jnibridge::*;

/// Declarations, registries and resources for one generation run.
pub struct TestHarness {
    pub snapshot: DeclarationSnapshot,
    pub mappers: MapperRegistry,
    pub exceptions: ExceptionRegistry,
    pub resources: InMemoryResources,
    pub options: GeneratorOptions,
}

impl TestHarness {
    /// The full OOP fixture, selected with `oop.*`.
    pub fn oop() -> Self {
        Self::from_builder(oop_declarations(), &["oop.*"])
    }

    pub fn from_builder(builder: SnapshotBuilder, patterns: &[&str]) -> Self {
        let snapshot = builder
            .select(patterns)
            .unwrap_or_else(|e| panic!("Failed to select {:?}: {}", patterns, e));
        Self {
            snapshot,
            mappers: MapperRegistry::with_defaults(),
            exceptions: ExceptionRegistry::new()
                .with_rule(
                    "std::invalid_argument",
                    "java.lang.IllegalArgumentException",
                )
                .with_rule("oop::ShapeError", "oop.ShapeException")
                .with_rule("oop::DegenerateShape", "oop.DegenerateShapeException"),
            resources: InMemoryResources::new()
                .with("custom/shape_helpers.cpp", "// shape helpers\n")
                .with("custom/global.cpp", "// global helpers\n"),
            options: GeneratorOptions::new()
                .with_include("<cmath>")
                .with_custom_code("custom/global.cpp"),
        }
    }

    pub fn generate(&self) -> Result<GeneratedBindings, BridgeError> {
        let resources = LayeredResources::new()
            .with_layer(&self.resources)
            .with_layer(BuiltinResources);
        Generator::new(&self.mappers, &resources)
            .with_exceptions(&self.exceptions)
            .with_options(self.options.clone())
            .generate(&self.snapshot)
    }

    /// Generate, panicking with the error on failure.
    pub fn generate_ok(&self) -> GeneratedBindings {
        self.generate()
            .unwrap_or_else(|e| panic!("Generation failed: {}", e))
    }
}

/// Assert that no `${...}` placeholder survived composition.
pub fn assert_fully_substituted(unit: &OutputUnit) {
    if let Some(pos) = unit.contents.find("${") {
        let end = (pos + 40).min(unit.contents.len());
        panic!(
            "Unsubstituted placeholder in {} near: {}",
            unit.path,
            &unit.contents[pos..end]
        );
    }
}

/// Byte offset of `needle` in `haystack`, panicking if absent.
pub fn position(haystack: &str, needle: &str) -> usize {
    haystack
        .find(needle)
        .unwrap_or_else(|| panic!("Expected to find {:?}", needle))
}

fn oop_bridge(include: &str) -> BridgeDecl {
    BridgeDecl::new()
        .with_namespace("oop")
        .with_include(include)
}

pub fn oop_declarations() -> SnapshotBuilder {
    let mut builder = SnapshotBuilder::new();

    builder
        .declare_exception("oop.ShapeException", "java.lang.RuntimeException")
        .unwrap();
    builder
        .declare_exception("oop.DegenerateShapeException", "oop.ShapeException")
        .unwrap();

    let base = LogicalType::object("oop.BaseClass");
    let color = LogicalType::object("oop.Color");
    let double = LogicalType::from(Primitive::Double);
    let shared = TypeOccurrence::new(base.clone()).with_ownership(Ownership::Shared);

    builder
        .declare(
            ClassDecl::interface("oop.Common").with_bridge(
                BridgeDecl::new()
                    .with_include("Common.hpp")
                    .with_custom_code("custom/shape_helpers.cpp")
                    .inherit_from("oop.BaseClass"),
            ),
        )
        .unwrap();

    builder
        .declare(
            ClassDecl::class("oop.BaseClass")
                .implements("oop.Common")
                .with_handle()
                .with_bridge(
                    BridgeDecl::new()
                        .with_namespace("oop")
                        .with_include("BaseClass.hpp")
                        .inherit_from("oop.Common"),
                )
                .with_method(
                    MethodDecl::native_static("create")
                        .with_role(MethodRole::Allocate(AllocKind::Shared))
                        .returns(LogicalType::LONG),
                )
                .with_method(
                    MethodDecl::native_static("destroy")
                        .with_role(MethodRole::Deallocate)
                        .with_param(LogicalType::LONG),
                )
                .with_method(MethodDecl::native("area").returns(double.clone()))
                .with_method(MethodDecl::native("name").returns(LogicalType::string()))
                .with_method(
                    MethodDecl::native("scaled")
                        .with_param(double)
                        .returns(shared),
                )
                .with_method(
                    MethodDecl::native("merge")
                        .with_param(
                            TypeOccurrence::new(base.clone()).with_ownership(Ownership::Reference),
                        )
                        .with_param(
                            TypeOccurrence::new(base.clone())
                                .with_ownership(Ownership::Pointer)
                                .with_flags(OccurrenceFlags::IGNORE_NULLCHECK),
                        ),
                ),
        )
        .unwrap();

    builder
        .declare(
            ClassDecl::class("oop.A")
                .extends("oop.BaseClass")
                .with_handle()
                .with_bridge(oop_bridge("A.hpp"))
                .with_method(MethodDecl::native("getValue").returns(LogicalType::INT)),
        )
        .unwrap();

    builder
        .declare(
            ClassDecl::class("oop.AA")
                .extends("oop.A")
                .with_handle()
                .with_bridge(oop_bridge("AA.hpp")),
        )
        .unwrap();

    let label = TypeOccurrence::new(LogicalType::string()).with_mapper(mappers::STRING_VIEW);
    builder
        .declare(
            ClassDecl::class("oop.B")
                .extends("oop.BaseClass")
                .with_handle()
                .with_bridge(oop_bridge("B.hpp"))
                .with_method(MethodDecl::native("setLabel").with_param(label)),
        )
        .unwrap();

    builder
        .declare(
            ClassDecl::enumeration("oop.Color")
                .with_bridge(BridgeDecl::new().with_namespace("oop"))
                .with_method(
                    MethodDecl::managed("fromInt", true)
                        .with_param(LogicalType::INT)
                        .returns(color.clone()),
                )
                .with_method(MethodDecl::managed("toInt", false).returns(LogicalType::INT)),
        )
        .unwrap();

    builder
        .declare(
            ClassDecl::class("oop.Util")
                .with_bridge(
                    BridgeDecl::new()
                        .with_namespace("oop::util")
                        .with_include("Util.hpp")
                        .with_type_mapper(LogicalType::string(), mappers::STRING_VIEW),
                )
                .with_method(
                    MethodDecl::native_static("parse")
                        .with_param(LogicalType::string())
                        .returns(LogicalType::INT),
                )
                .with_method(
                    MethodDecl::native_static("paint")
                        .with_param(color.clone())
                        .with_param(base.clone()),
                )
                .with_method(MethodDecl::native_static("favorite").returns(color))
                .with_method(
                    MethodDecl::native_static("checksum")
                        .with_param(
                            TypeOccurrence::new(LogicalType::array_of(Primitive::Byte.into()))
                                .with_mapper(mappers::BYTE_SPAN),
                        )
                        .returns(LogicalType::LONG),
                ),
        )
        .unwrap();

    builder
}
