use crate::dsp::sample::{read_sample, write_sample, SAMPLE_BYTES};
use crate::error::{Error, Result};
use crate::graph::stream::{Filled, SampleStream};

/// Scales every sample of the inner stream by a fixed percentage.
///
/// The product is truncated toward zero (`-3 × 0.5 = -1`), which keeps the
/// output byte-for-byte stable; rounding would shift it. Byte counts and
/// the end signal pass through from the inner stream unchanged.
pub struct Sustain<S> {
    inner: S,
    percentage: f64,
}

impl<S> Sustain<S> {
    /// `percentage` must lie in `[0.0, 1.0]`.
    pub fn new(inner: S, percentage: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&percentage) {
            return Err(Error::invalid(
                "percentage",
                format!("must be between 0 and 1, got {percentage}"),
            ));
        }
        Ok(Self { inner, percentage })
    }

    pub fn percentage(&self) -> f64 {
        self.percentage
    }
}

impl<S: SampleStream> SampleStream for Sustain<S> {
    fn read(&mut self, buf: &mut [u8]) -> Result<Filled> {
        let filled = self.inner.read(buf)?;

        // A trailing odd byte is not a sample; leave it alone
        for chunk in buf[..filled.bytes].chunks_exact_mut(SAMPLE_BYTES) {
            let v = read_sample(chunk);
            write_sample(chunk, (v as f64 * self.percentage) as i16);
        }

        Ok(filled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::sample::decode_all;
    use crate::graph::oscillator::Oscillator;
    use crate::graph::stream::read_to_end;
    use crate::graph::stream::testing::{Samples, Scripted, Step};
    use std::time::Duration;

    fn sine() -> Oscillator {
        Oscillator::sine(44_100, 440.0, Duration::from_millis(100)).unwrap()
    }

    #[test]
    fn zero_silences_with_same_length() {
        let mut s = Sustain::new(sine(), 0.0).unwrap();
        let bytes = read_to_end(&mut s).unwrap();
        assert_eq!(bytes.len(), 2 * 4410);
        assert!(decode_all(&bytes).iter().all(|&v| v == 0));
    }

    #[test]
    fn one_is_identity() {
        let original = read_to_end(&mut sine()).unwrap();
        let sustained = read_to_end(&mut Sustain::new(sine(), 1.0).unwrap()).unwrap();
        assert_eq!(original, sustained);
    }

    #[test]
    fn truncates_toward_zero() {
        let mut s = Sustain::new(Samples::new(&[3, -3, 32767, -32768, 1, -1]), 0.5).unwrap();
        let out = decode_all(&read_to_end(&mut s).unwrap());
        assert_eq!(out, vec![1, -1, 16383, -16384, 0, 0]);
    }

    #[test]
    fn default_attenuation() {
        let mut s = Sustain::new(Samples::new(&[32767, -32767, 1000]), 0.2).unwrap();
        let out = decode_all(&read_to_end(&mut s).unwrap());
        assert_eq!(out, vec![6553, -6553, 200]);
    }

    #[test]
    fn out_of_range_is_rejected() {
        for p in [-0.01, 1.01, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(
                    Sustain::new(sine(), p),
                    Err(Error::InvalidParameter { name: "percentage", .. })
                ),
                "percentage {p} should be rejected"
            );
        }
    }

    #[test]
    fn odd_trailing_byte_is_untouched() {
        // 0x7fff followed by a lone 0x7f
        let mut s = Sustain::new(
            Scripted::new(vec![Step::DataEnd(vec![0xff, 0x7f, 0x7f])]),
            0.5,
        )
        .unwrap();
        let mut buf = [0u8; 4];
        let r = s.read(&mut buf).unwrap();
        assert_eq!(r, Filled::end(3));
        assert_eq!(read_sample(&buf), 16383);
        assert_eq!(buf[2], 0x7f);
    }

    #[test]
    fn passes_status_and_errors_through() {
        let mut s = Sustain::new(
            Scripted::new(vec![
                Step::Data(vec![10, 0]),
                Step::Fail(std::io::ErrorKind::UnexpectedEof),
            ]),
            0.5,
        )
        .unwrap();
        let mut buf = [0u8; 4];
        assert_eq!(s.read(&mut buf).unwrap(), Filled::more(2));
        assert_eq!(read_sample(&buf), 5);
        assert!(matches!(s.read(&mut buf), Err(Error::Upstream(_))));
    }
}
