//! Whole-graph generation benchmarks.
//!
//! Measures one call to `GraphGenerator::generate` per iteration across every
//! graph variant, with and without the connectivity skeleton.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use graphgen_benches::{error::BenchSetupError, params::GenerateBenchParams};
use graphgen_core::RngSource;

/// Seed of the draw source reused by every iteration.
const SEED: u64 = 42;

/// Node counts to benchmark.
const NODE_COUNTS: &[usize] = &[10, 50, 200];

fn generate_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("generate");
    group.sample_size(30);

    for params in GenerateBenchParams::grid(NODE_COUNTS) {
        let generator = params.builder()?.build()?;
        group.bench_with_input(
            BenchmarkId::from_parameter(params),
            &generator,
            |b, generator| {
                let mut source = RngSource::seeded(SEED);
                b.iter(|| generator.generate(&mut source));
            },
        );
    }

    group.finish();
    Ok(())
}

fn generate(c: &mut Criterion) {
    if let Err(err) = generate_impl(c) {
        panic!("generate benchmark setup failed: {err}");
    }
}

criterion_group!(benches, generate);
criterion_main!(benches);
