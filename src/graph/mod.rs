//! Composable, lazily evaluated sample streams.
//!
//! Every type here implements [`SampleStream`]: a pull-based source of raw
//! little-endian i16 samples. Sources (oscillators, noise, silence) generate samples
//! on demand, transformers (sustain, combine, chain) own their inputs and do
//! their work inside `read`. The `extensions` module adds fluent helpers so
//! voices can be put together with a chainable API.

/// Play streams one after another.
pub mod chain;
/// Saturating N-way mixer.
pub mod combine;
/// Fluent combinators (`.sustain()`, `.chain()`, `.mix()`, `.boxed()`).
pub mod extensions;
/// Seeded white-noise source.
pub mod noise;
/// Sine and square wave sources.
pub mod oscillator;
/// Zero-amplitude source for rests.
pub mod silence;
/// Core trait and read helpers shared by all streams.
pub mod stream;
/// Fixed-percentage amplitude scaling.
pub mod sustain;

pub use chain::Chain;
pub use combine::Combine;
pub use extensions::StreamExt;
pub use noise::Noise;
pub use oscillator::Oscillator;
pub use silence::Silence;
pub use stream::{read_full, read_to_end, BoxedStream, Filled, ReadStatus, SampleStream};
pub use sustain::Sustain;
