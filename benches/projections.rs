//! Benchmarks for the session projections
//!
//! Measures each projection over a synthetic 20-driver race:
//! - roster with fastest-lap tyre lookup
//! - telemetry extraction from the fastest lap
//! - lap-time conversion including JSON serialization
//!
//! Platform: Cross-platform (synthetic data, CI-safe)

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use timing_tower::projections::{self, split_codes};
use timing_tower::test_utils::synthetic_session;

const DRIVERS: usize = 20;
const LAPS: u32 = 57;

fn all_codes() -> Vec<String> {
    (0..DRIVERS).map(|i| format!("D{:02}", i)).collect()
}

fn bench_roster(c: &mut Criterion) {
    let session = synthetic_session(DRIVERS, LAPS, 16);

    c.bench_function("project_roster", |b| b.iter(|| black_box(projections::project_roster(black_box(&session)))));
}

fn bench_telemetry(c: &mut Criterion) {
    let codes = all_codes();
    let channels = split_codes("Speed,RPM,Throttle");

    let mut group = c.benchmark_group("project_telemetry");
    for samples in [64usize, 512, 4096] {
        let session = synthetic_session(DRIVERS, LAPS, samples);
        group.throughput(Throughput::Elements((samples * DRIVERS) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(samples), &session, |b, session| {
            b.iter(|| black_box(projections::project_telemetry(session, &codes, &channels)))
        });
    }
    group.finish();
}

fn bench_lap_times(c: &mut Criterion) {
    let session = synthetic_session(DRIVERS, LAPS, 16);
    let codes = all_codes();

    let mut group = c.benchmark_group("project_lap_times");
    group.throughput(Throughput::Elements(DRIVERS as u64 * u64::from(LAPS)));

    group.bench_function("project", |b| {
        b.iter(|| black_box(projections::project_lap_times(black_box(&session), &codes)))
    });

    group.bench_function("project_and_serialize", |b| {
        b.iter(|| {
            let lap_times = projections::project_lap_times(&session, &codes);
            black_box(serde_json::to_vec(&lap_times).expect("serializable"))
        })
    });

    group.finish();
}

criterion_group!(benches, bench_roster, bench_telemetry, bench_lap_times);
criterion_main!(benches);
