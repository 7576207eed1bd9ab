//! Benchmarks for stream sources and transformers.

mod combine;
mod oscillator;
mod sustain;

pub use combine::bench_combine;
pub use oscillator::bench_oscillator;
pub use sustain::bench_sustain;
