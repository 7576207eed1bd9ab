//! Benchmarks for N-way saturating mixing.
//!
//! Combine pulls one sample per input per slot, so cost grows with arity.

use std::hint::black_box;
use std::time::Duration;

use criterion::{BatchSize, BenchmarkId, Criterion};
use tonestream::graph::{BoxedStream, Combine, Oscillator, SampleStream, StreamExt};

use crate::READ_SIZES;

fn voices(count: usize) -> Combine<BoxedStream> {
    let inputs = (0..count)
        .map(|i| {
            Oscillator::sine(44_100, 220.0 * (i + 1) as f64, Duration::from_secs(1))
                .unwrap()
                .sustain(0.2)
                .unwrap()
                .boxed()
        })
        .collect();
    Combine::new(inputs)
}

pub fn bench_combine(c: &mut Criterion) {
    let mut group = c.benchmark_group("streams/combine");

    for &size in READ_SIZES {
        let mut buffer = vec![0u8; size];

        for count in [1, 3, 8] {
            group.bench_with_input(
                BenchmarkId::new(format!("{count}_voices"), size),
                &size,
                |b, _| {
                    b.iter_batched(
                        || voices(count),
                        |mut mix| mix.read(black_box(&mut buffer)).unwrap(),
                        BatchSize::SmallInput,
                    )
                },
            );
        }
    }

    group.finish();
}
