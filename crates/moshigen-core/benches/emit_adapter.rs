//! Adapter emission benchmarks
//!
//! Measures building and rendering adapters for target types of growing
//! width, with a mix of scalar, nullable and delegated fields.
//!
//! # Shapes
//!
//! - **Flat**: `n` required `int` fields
//! - **Mixed**: strings, nullable boxed scalars and nested generic collections

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use moshigen_core::prelude::*;
use moshigen_core::{PrimitiveKind, emit_target};

fn flat_target(width: usize) -> TargetType {
    let params = (0..width)
        .map(|i| Parameter::new(format!("f{i}"), TypeDescriptor::Primitive(PrimitiveKind::Int)))
        .collect();
    TargetType::new("com.example.bench.Flat")
        .in_package("com.example.bench")
        .with_constructor(Constructor::new(params))
}

fn mixed_target(width: usize) -> TargetType {
    let nested =
        TypeDescriptor::parse("java.util.Map<String, java.util.List<com.example.bench.Leaf>>")
            .unwrap_or_else(|e| panic!("benchmark descriptor: {e}"));
    let params = (0..width)
        .map(|i| match i % 3 {
            0 => Parameter::new(format!("name{i}"), TypeDescriptor::String),
            1 => Parameter::new(format!("count{i}"), TypeDescriptor::Boxed(PrimitiveKind::Long))
                .annotated("org.jetbrains.annotations.Nullable"),
            _ => Parameter::new(format!("index{i}"), nested.clone()),
        })
        .collect();
    TargetType::new("com.example.bench.Mixed")
        .in_package("com.example.bench")
        .with_constructor(Constructor::new(params))
}

fn bench_emit(c: &mut Criterion) {
    let config = GeneratorConfig::default();
    let mut group = c.benchmark_group("emit_target");

    for width in [4, 32, 256] {
        let flat = flat_target(width);
        let mixed = mixed_target(width);

        group.bench_with_input(BenchmarkId::new("flat", width), &flat, |b, target| {
            b.iter(|| emit_target(black_box(target), &config).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("mixed", width), &mixed, |b, target| {
            b.iter(|| emit_target(black_box(target), &config).unwrap());
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let config = GeneratorConfig::default();
    let mut group = c.benchmark_group("render");

    for width in [4, 32, 256] {
        let emitted = emit_target(&mixed_target(width), &config).unwrap();
        let file = emitted
            .adapter()
            .map(|unit| unit.to_java_file())
            .unwrap();

        group.bench_with_input(BenchmarkId::new("mixed", width), &file, |b, file| {
            b.iter(|| black_box(file).render(&config.indent));
        });
    }

    group.finish();
}

fn bench_round(c: &mut Criterion) {
    let config = GeneratorConfig::default();
    let targets: Vec<TargetType> = (0..64)
        .map(|i| {
            let mut target = mixed_target(12);
            target.qualified_name = format!("com.example.bench.Mixed{i}");
            target
        })
        .collect();
    let registration = FactoryRegistration {
        declared_in: Some("com.example.bench".into()),
        ..FactoryRegistration::new(targets.iter().map(|t| t.qualified_name.clone()).collect())
    };

    c.bench_function("round_64_targets", |b| {
        b.iter(|| {
            let mut sink = MemorySink::new("\t");
            let report = GenerationRound::new(config.clone()).run(
                black_box(&targets),
                std::slice::from_ref(&registration),
                &mut sink,
            );
            black_box(report)
        });
    });
}

criterion_group!(benches, bench_emit, bench_render, bench_round);
criterion_main!(benches);
