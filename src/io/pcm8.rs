use std::io::{self, Read};

use log::warn;

use crate::dsp::sample::{read_sample, SAMPLE_BYTES};
use crate::graph::stream::SampleStream;

/// Equilibrium of unsigned 8-bit PCM.
pub const EQUILIBRIUM_U8: u8 = 127;

/// Narrow one 16-bit sample to unsigned 8-bit, centered at 127.
pub fn to_unsigned8(sample: i16) -> u8 {
    (EQUILIBRIUM_U8 as i16 + (sample >> 8)).clamp(0, u8::MAX as i16) as u8
}

/// Map an unsigned 8-bit sample back to `[-1.0, 1.0]` for playback.
pub fn unsigned8_to_f32(byte: u8) -> f32 {
    ((byte as f32 - EQUILIBRIUM_U8 as f32) / 128.0).clamp(-1.0, 1.0)
}

/// Re-encodes a 16-bit sample stream as unsigned 8-bit bytes, one byte per
/// sample.
///
/// The output is no longer i16 PCM, so this is a byte reader rather than a
/// [`SampleStream`]. A sample split across two inner reads is carried over.
pub struct Unsigned8<S> {
    inner: S,
    scratch: Vec<u8>,
    carry: Option<u8>,
    ended: bool,
}

impl<S: SampleStream> Unsigned8<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            scratch: Vec::new(),
            carry: None,
            ended: false,
        }
    }
}

impl<S: SampleStream> Read for Unsigned8<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() || self.ended {
            return Ok(0);
        }

        self.scratch.resize(buf.len() * SAMPLE_BYTES, 0);

        loop {
            let mut have = 0;
            if let Some(byte) = self.carry.take() {
                self.scratch[0] = byte;
                have = 1;
            }

            let r = self.inner.read(&mut self.scratch[have..])?;
            have += r.bytes;
            self.ended = r.is_end();

            let whole = have / SAMPLE_BYTES;
            for (out, sample) in buf
                .iter_mut()
                .zip(self.scratch[..whole * SAMPLE_BYTES].chunks_exact(SAMPLE_BYTES))
            {
                *out = to_unsigned8(read_sample(sample));
            }

            if have % SAMPLE_BYTES == 1 {
                if self.ended {
                    warn!("pcm8: dropping a trailing odd byte");
                } else {
                    self.carry = Some(self.scratch[have - 1]);
                }
            }

            if whole > 0 || self.ended {
                return Ok(whole);
            }
        }
    }
}
