pub mod dsp;
pub mod error;
pub mod graph; // Pull-based sample streams
pub mod io;
pub mod runtime; // Score rendering, playback and scope
pub mod sequencing; // Durations, pitches and staves

pub use error::{Error, Result};

/// Sample rate used by the composer and player unless configured otherwise.
pub const SAMPLE_RATE: u32 = 44_100;
/// Attenuation applied to every voice of a rendered score.
pub const DEFAULT_SUSTAIN: f64 = 0.2;
/// Bytes pulled from a stream per playback chunk.
pub const BUFFER_SIZE_BYTES: usize = 5120;
