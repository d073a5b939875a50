//! Benchmarks for the Monte Carlo engine.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use heston_models::params::{EuropeanCall, HestonParams, Market};
use heston_pricing::mc::{McConfig, McPricer, VarianceScheme};

fn bench_schemes(c: &mut Criterion) {
    let params = HestonParams::new(2.0, 0.04, 0.3, -0.7, 0.04).unwrap();
    let market = Market::new(100.0, 0.03).unwrap();
    let contract = EuropeanCall::new(100.0, 1.0).unwrap();

    let mut group = c.benchmark_group("mc_schemes");
    for scheme in [
        VarianceScheme::Absorption,
        VarianceScheme::Reflection,
        VarianceScheme::ReflectionMilstein,
        VarianceScheme::Alfonsi,
    ] {
        let config = McConfig::builder()
            .n_paths(10_000)
            .n_steps(100)
            .scheme(scheme)
            .seed(42)
            .build()
            .unwrap();
        let pricer = McPricer::new(config).unwrap();

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{scheme:?}")),
            &pricer,
            |b, pricer| b.iter(|| pricer.simulate(black_box(&params), &market, &contract)),
        );
    }
    group.finish();
}

fn bench_path_scaling(c: &mut Criterion) {
    let params = HestonParams::new(2.0, 0.04, 0.3, -0.7, 0.04).unwrap();
    let market = Market::new(100.0, 0.03).unwrap();
    let contract = EuropeanCall::new(100.0, 1.0).unwrap();

    let mut group = c.benchmark_group("mc_path_scaling");
    for n_paths in [1_000usize, 10_000, 100_000] {
        let config = McConfig::builder()
            .n_paths(n_paths)
            .n_steps(100)
            .scheme(VarianceScheme::ReflectionMilstein)
            .seed(42)
            .build()
            .unwrap();
        let pricer = McPricer::new(config).unwrap();

        group.bench_with_input(
            BenchmarkId::from_parameter(n_paths),
            &pricer,
            |b, pricer| b.iter(|| pricer.simulate(black_box(&params), &market, &contract)),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_schemes, bench_path_scaling);
criterion_main!(benches);
