//! Benchmarks for the analytic pricing layer.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use heston_models::analytical::{call_price as bs_call, implied_volatility};
use heston_models::params::{EuropeanCall, HestonParams, Market};
use heston_models::semi_analytic::call_price;

fn bench_black_scholes(c: &mut Criterion) {
    c.bench_function("black_scholes_call", |b| {
        b.iter(|| bs_call(black_box(100.0), 100.0, 1.0, 0.05, 0.2))
    });
}

fn bench_implied_vol(c: &mut Criterion) {
    let target = bs_call(100.0, 100.0, 1.0, 0.05, 0.2);
    c.bench_function("implied_volatility", |b| {
        b.iter(|| implied_volatility(black_box(100.0), 100.0, 1.0, 0.05, target))
    });
}

fn bench_semi_analytic(c: &mut Criterion) {
    let params = HestonParams::new(6.21, 0.019, 0.61, -0.7, 0.010201).unwrap();
    let market = Market::new(100.0, 0.0319).unwrap();
    let contract = EuropeanCall::new(100.0, 1.0).unwrap();

    c.bench_function("heston_semi_analytic_call", |b| {
        b.iter(|| call_price(black_box(&params), &market, &contract))
    });
}

criterion_group!(
    benches,
    bench_black_scholes,
    bench_implied_vol,
    bench_semi_analytic
);
criterion_main!(benches);
