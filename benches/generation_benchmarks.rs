//! Performance benchmarks for binding generation.
//!
//! Workloads are synthetic declaration sets:
//! - Size-based: utility classes with a growing number of static methods
//! - Hierarchy: handle class trees of growing width and depth, which drive
//!   subclass ordering and dispatch helper generation
//!
//! ## Profiling with Puffin
//!
//! Run with the `profile-with-puffin` feature to collect per-stage timings:
//!
//! ```bash
//! cargo bench --features profile-with-puffin -- --profile-time 5
//! ```

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use jnibridge::{
    BridgeDecl, BuiltinResources, ClassDecl, DeclarationSnapshot, ExceptionRegistry, Generator,
    LogicalType, MapperRegistry, MethodDecl, Ownership, SnapshotBuilder, TypeOccurrence,
};
use std::hint::black_box;

#[cfg(feature = "profile-with-puffin")]
use std::collections::HashMap;

#[cfg(feature = "profile-with-puffin")]
static FRAME_VIEW: std::sync::OnceLock<puffin::GlobalFrameView> = std::sync::OnceLock::new();

#[cfg(feature = "profile-with-puffin")]
fn setup_profiler() {
    puffin::set_scopes_on(true);
    FRAME_VIEW.get_or_init(puffin::GlobalFrameView::default);
}

#[cfg(not(feature = "profile-with-puffin"))]
fn setup_profiler() {}

#[cfg(feature = "profile-with-puffin")]
fn end_profiling_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}

#[cfg(not(feature = "profile-with-puffin"))]
fn end_profiling_frame() {}

/// Sum scope durations by name across every recorded frame.
#[cfg(feature = "profile-with-puffin")]
fn print_profiling_stats() {
    use puffin::Reader;

    let Some(frame_view) = FRAME_VIEW.get() else {
        return;
    };
    let view = frame_view.lock();
    let scope_collection = view.scope_collection();

    let mut timings: HashMap<String, i64> = HashMap::new();
    let mut frames = 0i64;
    for frame in view.recent_frames() {
        frames += 1;
        let Ok(unpacked) = frame.unpacked() else {
            continue;
        };
        for (_thread, stream_info) in unpacked.thread_streams.iter() {
            let reader = Reader::from_start(&stream_info.stream);
            let Ok(scopes) = reader.read_top_scopes() else {
                continue;
            };
            for scope in scopes {
                if let Some(details) = scope_collection.fetch_by_id(&scope.id) {
                    *timings.entry(details.name().to_string()).or_insert(0) +=
                        scope.record.duration_ns;
                }
            }
        }
    }

    println!("\n=== Generation Profile ({} frames) ===", frames);
    let mut entries: Vec<_> = timings.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    for (name, ns) in entries {
        let avg = if frames > 0 { ns / frames } else { ns };
        println!(
            "  {:40} {:>10.2?} avg",
            name,
            std::time::Duration::from_nanos(avg as u64)
        );
    }
}

#[cfg(not(feature = "profile-with-puffin"))]
fn print_profiling_stats() {}

// ============================================================================
// Workloads
// ============================================================================

/// One utility class with `methods` static methods of mixed signatures.
fn utility_workload(methods: usize) -> DeclarationSnapshot {
    let bridge = BridgeDecl::new()
        .with_namespace("bench")
        .with_include("Util.hpp");
    let mut class = ClassDecl::class("bench.Util").with_bridge(bridge);
    for i in 0..methods {
        let method = match i % 3 {
            0 => MethodDecl::native_static(format!("add{i}"))
                .with_param(LogicalType::INT)
                .with_param(LogicalType::LONG)
                .returns(LogicalType::LONG),
            1 => MethodDecl::native_static(format!("echo{i}"))
                .with_param(LogicalType::string())
                .returns(LogicalType::string()),
            _ => MethodDecl::native_static(format!("flag{i}")).returns(LogicalType::BOOLEAN),
        };
        class = class.with_method(method);
    }

    match SnapshotBuilder::new()
        .with(class)
        .and_then(|b| b.select(&["bench.*"]))
    {
        Ok(snapshot) => snapshot,
        Err(e) => panic!("invalid utility workload: {e}"),
    }
}

/// A handle class tree `depth` levels deep where each node has `width` children.
fn hierarchy_workload(width: usize, depth: usize) -> DeclarationSnapshot {
    let mut builder = SnapshotBuilder::new();
    let mut level = vec!["bench.Node".to_string()];
    declare_node(&mut builder, "bench.Node", None);

    for _ in 0..depth {
        let mut next = Vec::with_capacity(level.len() * width);
        for parent in &level {
            for i in 0..width {
                let child = format!("{parent}_{i}");
                declare_node(&mut builder, &child, Some(parent));
                next.push(child);
            }
        }
        level = next;
    }

    match builder.select(&["bench.*"]) {
        Ok(snapshot) => snapshot,
        Err(e) => panic!("invalid hierarchy workload: {e}"),
    }
}

fn declare_node(builder: &mut SnapshotBuilder, path: &str, parent: Option<&str>) {
    let mut class = ClassDecl::class(path)
        .with_handle()
        .with_bridge(BridgeDecl::new().with_namespace("bench"))
        .with_method(MethodDecl::native("size").returns(LogicalType::INT))
        .with_method(
            MethodDecl::native("parent").returns(
                TypeOccurrence::new(LogicalType::object("bench.Node"))
                    .with_ownership(Ownership::Shared),
            ),
        );
    if let Some(parent) = parent {
        class = class.extends(parent);
    }
    if let Err(e) = builder.declare(class) {
        panic!("invalid node {path}: {e}");
    }
}

// ============================================================================
// Benchmarks
// ============================================================================

fn size_based_benchmarks(c: &mut Criterion) {
    setup_profiler();
    let mappers = MapperRegistry::with_defaults();
    let exceptions =
        ExceptionRegistry::new().with_rule("std::logic_error", "java.lang.IllegalStateException");
    let generator = Generator::new(&mappers, &BuiltinResources).with_exceptions(&exceptions);

    let mut group = c.benchmark_group("generate/methods");
    for methods in [10, 100, 1000] {
        let snapshot = utility_workload(methods);
        group.throughput(Throughput::Elements(methods as u64));
        group.bench_with_input(BenchmarkId::from_parameter(methods), &snapshot, |b, s| {
            b.iter(|| {
                let bindings = generator.generate(black_box(s));
                end_profiling_frame();
                black_box(bindings.map(|b| b.units().len()))
            });
        });
    }
    group.finish();

    print_profiling_stats();
}

fn hierarchy_benchmarks(c: &mut Criterion) {
    let mappers = MapperRegistry::with_defaults();
    let generator = Generator::new(&mappers, &BuiltinResources);

    let mut group = c.benchmark_group("generate/hierarchy");
    for (width, depth) in [(2, 3), (4, 3), (3, 5)] {
        let snapshot = hierarchy_workload(width, depth);
        group.throughput(Throughput::Elements(snapshot.selected_paths().len() as u64));
        group.bench_with_input(
            BenchmarkId::new("tree", format!("{width}x{depth}")),
            &snapshot,
            |b, s| b.iter(|| black_box(generator.generate(black_box(s)).map(|b| b.units().len()))),
        );
    }
    group.finish();
}

criterion_group!(benches, size_based_benchmarks, hierarchy_benchmarks);
criterion_main!(benches);
