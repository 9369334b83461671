//! Session Benchmarks
//!
//! Criterion benchmarks for the per-frame model path. A frame budget at
//! 60 Hz is ~16 ms; the model should take a negligible share of it.

use criterion::{Criterion, criterion_group, criterion_main};
use tireviz_model::prelude::*;

fn bench_tire_update(c: &mut Criterion) {
    let mut tire = TireState::default();

    c.bench_function("tire_update_lateral", |b| {
        b.iter(|| {
            tire.update(
                std::hint::black_box(1.2),
                std::hint::black_box(LoadDirection::LateralPositive),
            );
        })
    });
}

fn bench_tire_update_with_history(c: &mut Criterion) {
    let mut tire = TireState::default();

    c.bench_function("tire_update_unspecified", |b| {
        b.iter(|| {
            tire.update(
                std::hint::black_box(0.8),
                std::hint::black_box(LoadDirection::Unspecified),
            );
        })
    });
}

fn bench_session_tick(c: &mut Criterion) {
    let mut session = Session::default();
    let sample = TelemetrySample::from_accel(12.0, -6.0).with_velocity(45.0, 0.5, 0.0);

    c.bench_function("session_tick", |b| {
        b.iter(|| session.tick(true, std::hint::black_box(&sample)))
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let mut session = Session::default();
    session.tick(true, &TelemetrySample::from_accel(12.0, -6.0));

    c.bench_function("session_snapshot", |b| {
        b.iter(|| std::hint::black_box(session.snapshot()))
    });
}

criterion_group!(
    benches,
    bench_tire_update,
    bench_tire_update_with_history,
    bench_session_tick,
    bench_snapshot
);
criterion_main!(benches);
