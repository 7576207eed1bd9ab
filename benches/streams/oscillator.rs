//! Benchmarks for oscillator sample generation.

use std::hint::black_box;
use std::time::Duration;

use criterion::{BatchSize, BenchmarkId, Criterion};
use tonestream::dsp::Waveform;
use tonestream::graph::{Oscillator, SampleStream};

use crate::READ_SIZES;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("streams/oscillator");

    for &size in READ_SIZES {
        let mut buffer = vec![0u8; size];

        // Sine - sin() plus rounding per sample
        // Square - one comparison per sample
        for waveform in [Waveform::Sine, Waveform::Square] {
            group.bench_with_input(BenchmarkId::new(waveform.name(), size), &size, |b, _| {
                b.iter_batched(
                    || Oscillator::new(waveform, 44_100, 440.0, Duration::from_secs(1)).unwrap(),
                    |mut osc| osc.read(black_box(&mut buffer)).unwrap(),
                    BatchSize::SmallInput,
                )
            });
        }
    }

    group.finish();
}
