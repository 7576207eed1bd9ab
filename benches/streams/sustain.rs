//! Benchmarks for fixed-percentage attenuation.

use std::hint::black_box;
use std::time::Duration;

use criterion::{BatchSize, BenchmarkId, Criterion};
use tonestream::graph::{Oscillator, SampleStream, Silence, Sustain};

use crate::READ_SIZES;

pub fn bench_sustain(c: &mut Criterion) {
    let mut group = c.benchmark_group("streams/sustain");

    for &size in READ_SIZES {
        let mut buffer = vec![0u8; size];

        // Silence underneath isolates the scaling cost
        group.bench_with_input(BenchmarkId::new("silence", size), &size, |b, _| {
            b.iter_batched(
                || Sustain::new(Silence::samples(44_100), 0.2).unwrap(),
                |mut s| s.read(black_box(&mut buffer)).unwrap(),
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("sine", size), &size, |b, _| {
            b.iter_batched(
                || {
                    let osc = Oscillator::sine(44_100, 440.0, Duration::from_secs(1)).unwrap();
                    Sustain::new(osc, 0.2).unwrap()
                },
                |mut s| s.read(black_box(&mut buffer)).unwrap(),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}
