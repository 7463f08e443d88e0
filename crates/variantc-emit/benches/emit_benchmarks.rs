//! Header generation benchmark.
//!
//! Measures resolve + render for registries of increasing size. Real
//! configurations enable a handful of variants; the larger sizes exist to
//! catch accidental quadratic behavior in emission.
//!
//! Run with: `cargo bench --bench emit_benchmarks`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use variantc_emit::writer::render;
use variantc_registry::registry::{VariantDefinition, VariantRegistry};
use variantc_registry::resolve::resolve;

fn registry_with(count: usize) -> VariantRegistry {
    let definitions = (0..count).map(|i| {
        let float = if i % 2 == 0 { "float" } else { "Packet16f" };
        (
            format!("variant_{i}"),
            VariantDefinition::new(float, format!("Spectrum<Float, {}>", i % 4 + 1)),
        )
    });
    let enabled: Vec<_> = (0..count).map(|i| format!("variant_{i}")).collect();
    VariantRegistry::new(definitions, enabled, None)
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_header");
    for count in [4usize, 64, 1024] {
        let registry = registry_with(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &registry, |b, registry| {
            b.iter(|| {
                let resolved = resolve(black_box(registry)).unwrap();
                black_box(render(&resolved))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
