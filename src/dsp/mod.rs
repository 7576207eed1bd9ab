//! Low-level sample primitives used by the stream types in [`crate::graph`].
//!
//! Everything here is pure and stateless: the sample codec and the per-index
//! waveform math. The streams own the read offsets and call into these.

/// Oscillator waveforms and per-index sample math.
pub mod oscillator;
/// Little-endian i16 codec and saturating arithmetic.
pub mod sample;

pub use oscillator::Waveform;
pub use sample::{EQUILIBRIUM, MAX_AMPLITUDE};
