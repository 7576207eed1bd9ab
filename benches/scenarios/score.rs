//! Benchmarks for rendering scores end to end.

use std::hint::black_box;

use criterion::{BatchSize, BenchmarkId, Criterion};
use tonestream::graph::SampleStream;
use tonestream::runtime::Composer;
use tonestream::sequencing::{major_chord, pitch::*, Duration, Staff};

use crate::READ_SIZES;

/// Four bars of eighth-note melody over a held triad per bar.
fn staves() -> [Staff; 2] {
    let mut melody = Staff::new();
    let mut chords = Staff::new();
    for root in [C4, F4, G4, C4] {
        for pitch in major_chord(root) {
            melody = melody.note(pitch.add(OCTAVE), Duration::EIGHTH);
        }
        melody = melody.rest(Duration::EIGHTH).note(root, Duration::HALF);
        chords = chords.chord(&major_chord(root.subtract(OCTAVE)), Duration::WHOLE);
    }
    [melody, chords]
}

pub fn bench_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/score");
    let staves = staves();

    for &size in READ_SIZES {
        let mut buffer = vec![0u8; size];

        group.bench_with_input(BenchmarkId::new("first_read", size), &size, |b, _| {
            b.iter_batched(
                || Composer::new().bpm(120.0).render(&staves).unwrap(),
                |mut score| score.read(black_box(&mut buffer)).unwrap(),
                BatchSize::SmallInput,
            )
        });
    }

    // Full render of the four bars (8 seconds of audio)
    group.bench_function("render_all", |b| {
        b.iter(|| {
            let mut score = Composer::new().bpm(120.0).render(black_box(&staves)).unwrap();
            tonestream::graph::read_to_end(&mut score).unwrap().len()
        })
    });

    group.finish();
}
