use std::time::Duration;

use crate::dsp::sample::{write_sample, EQUILIBRIUM, SAMPLE_BYTES};
use crate::error::{Error, Result};
use crate::graph::stream::{Filled, SampleStream};

/// A rest: `floor(sample_rate × seconds)` samples of equilibrium.
///
/// Rests have no pitch, so they can't be built as oscillators (a 0 Hz period
/// is undefined). This keeps them on the timeline with the right length.
pub struct Silence {
    total: u64,
    offset: u64,
}

impl Silence {
    pub fn new(sample_rate: u32, duration: Duration) -> Result<Self> {
        if sample_rate == 0 {
            return Err(Error::invalid("sample_rate", "must be greater than zero"));
        }
        Ok(Self::samples((sample_rate as f64 * duration.as_secs_f64()) as u64))
    }

    /// Silence of an exact number of samples.
    pub fn samples(total: u64) -> Self {
        Self { total, offset: 0 }
    }

    pub fn len(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

impl SampleStream for Silence {
    fn read(&mut self, buf: &mut [u8]) -> Result<Filled> {
        if self.offset >= self.total {
            return Ok(Filled::end(0));
        }

        let want = (buf.len() / SAMPLE_BYTES) as u64;
        let n = want.min(self.total - self.offset) as usize;
        for out in buf.chunks_exact_mut(SAMPLE_BYTES).take(n) {
            write_sample(out, EQUILIBRIUM);
        }
        self.offset += n as u64;

        let bytes = n * SAMPLE_BYTES;
        if self.offset >= self.total {
            Ok(Filled::end(bytes))
        } else {
            Ok(Filled::more(bytes))
        }
    }
}
