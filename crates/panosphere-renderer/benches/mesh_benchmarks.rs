//! Mesh Benchmarks
//!
//! Performance benchmarks for sphere generation

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use panosphere_renderer::Mesh;

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("sphere_generate");

    for step in [10.0f32, 5.0, 2.0].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(step), step, |b, &step| {
            b.iter(|| Mesh::generate(black_box(400.0), black_box(step)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
