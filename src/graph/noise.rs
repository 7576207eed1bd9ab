use std::time::Duration;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::dsp::sample::{write_sample, MAX_AMPLITUDE, SAMPLE_BYTES};
use crate::error::{Error, Result};
use crate::graph::stream::{Filled, SampleStream};

/// White noise: `floor(sample_rate × seconds)` samples drawn uniformly from
/// `[-amplitude, amplitude]`.
///
/// The generator is seeded, so equal seeds give byte-identical output.
pub struct Noise {
    rng: StdRng,
    amplitude: i16,
    total: u64,
    offset: u64,
}

impl Noise {
    pub fn new(sample_rate: u32, duration: Duration, seed: u64) -> Result<Self> {
        if sample_rate == 0 {
            return Err(Error::invalid("sample_rate", "must be greater than zero"));
        }
        let total = (sample_rate as f64 * duration.as_secs_f64()) as u64;
        debug!("noise: {total} samples at {sample_rate} Hz, seed {seed}");

        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            amplitude: MAX_AMPLITUDE,
            total,
            offset: 0,
        })
    }

    /// Set the peak amplitude (default full scale, 32767).
    pub fn with_amplitude(mut self, amplitude: u16) -> Result<Self> {
        if amplitude > MAX_AMPLITUDE as u16 {
            return Err(Error::invalid(
                "amplitude",
                format!("max value is {MAX_AMPLITUDE}, got {amplitude}"),
            ));
        }
        self.amplitude = amplitude as i16;
        Ok(self)
    }

    pub fn len(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

impl SampleStream for Noise {
    fn read(&mut self, buf: &mut [u8]) -> Result<Filled> {
        if self.offset >= self.total {
            return Ok(Filled::end(0));
        }

        let want = (buf.len() / SAMPLE_BYTES) as u64;
        let n = want.min(self.total - self.offset) as usize;
        for out in buf.chunks_exact_mut(SAMPLE_BYTES).take(n) {
            let value = self.rng.gen_range(-self.amplitude..=self.amplitude);
            write_sample(out, value);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::sample::decode_all;
    use crate::graph::stream::read_to_end;

    fn samples(noise: Noise) -> Vec<i16> {
        let mut noise = noise;
        decode_all(&read_to_end(&mut noise).unwrap())
    }

    #[test]
    fn length_follows_the_duration() {
        let noise = Noise::new(8_000, Duration::from_millis(250), 1).unwrap();
        assert_eq!(noise.len(), 2_000);
        assert_eq!(samples(noise).len(), 2_000);
    }

    #[test]
    fn same_seed_same_bytes() {
        let a = samples(Noise::new(8_000, Duration::from_millis(50), 42).unwrap());
        let b = samples(Noise::new(8_000, Duration::from_millis(50), 42).unwrap());
        let c = samples(Noise::new(8_000, Duration::from_millis(50), 43).unwrap());
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn stays_within_the_amplitude() {
        let out = samples(
            Noise::new(44_100, Duration::from_millis(100), 7)
                .unwrap()
                .with_amplitude(1_000)
                .unwrap(),
        );
        assert!(out.iter().all(|v| (-1_000..=1_000).contains(v)));
        // 4410 uniform draws land on both sides of zero
        assert!(out.iter().any(|&v| v > 500));
        assert!(out.iter().any(|&v| v < -500));
    }

    #[test]
    fn odd_buffer_byte_is_untouched() {
        let mut noise = Noise::new(1_000, Duration::from_millis(10), 0).unwrap();
        let mut buf = [0xaau8; 5];
        assert_eq!(noise.read(&mut buf).unwrap(), Filled::more(4));
        assert_eq!(buf[4], 0xaa);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert!(Noise::new(0, Duration::from_secs(1), 0).is_err());
        assert!(Noise::new(44_100, Duration::from_secs(1), 0)
            .unwrap()
            .with_amplitude(40_000)
            .is_err());
    }
}
