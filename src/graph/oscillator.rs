use std::time::Duration;

use log::debug;

use crate::dsp::oscillator::{samples_per_period, Waveform};
use crate::dsp::sample::{write_sample, MAX_AMPLITUDE, SAMPLE_BYTES};
use crate::error::{Error, Result};
use crate::graph::stream::{Filled, SampleStream};

/*
Audio Oscillator
================

An oscillator is the fundamental sound source: it generates a repeating
waveform at a given frequency for a fixed duration, one sample at a time,
only when someone reads from it.

Waveform Types:
---------------

Sine: A single frequency with no harmonics.
  value(k) = round(A × sin(2π × (k mod P) / P))

Square: Odd harmonics only, hollow and buzzy.
  value(k) = +A  if (k mod P) ≤ P/2
             -A  otherwise

where P = floor(sample_rate / frequency) is the period in whole samples and
A is the amplitude (32767 unless set with `with_amplitude`).

Because the period is an integer number of samples, the pitch is quantized:
at 44.1 kHz a 261.63 Hz C4 gets P = 168, which actually sounds at
262.5 Hz. That's audible only for high notes and keeps the output exactly
periodic, which makes it deterministic and easy to test.

Length:
-------

The stream holds floor(sample_rate × seconds) samples. Reads advance an
offset; the read that produces the last sample also reports End.

Example usage:
  let c4 = Oscillator::sine(44_100, 261.63, Duration::from_millis(500))?;
  let buzz = Oscillator::square(44_100, 110.0, Duration::from_secs(1))?
      .with_amplitude(16_383)?;
*/

pub struct Oscillator {
    waveform: Waveform,
    amplitude: i16,
    /// Period in whole samples
    period: u64,
    /// Total number of samples that can be read
    total: u64,
    /// Samples read so far
    offset: u64,
}

impl Oscillator {
    pub fn new(
        waveform: Waveform,
        sample_rate: u32,
        frequency: f64,
        duration: Duration,
    ) -> Result<Self> {
        let period = samples_per_period(sample_rate, frequency)?;
        let total = (sample_rate as f64 * duration.as_secs_f64()) as u64;

        debug!(
            "{} oscillator: {frequency} Hz at {sample_rate} Hz, period {period}, {total} samples",
            waveform.name()
        );

        Ok(Self {
            waveform,
            amplitude: MAX_AMPLITUDE,
            period,
            total,
            offset: 0,
        })
    }

    pub fn sine(sample_rate: u32, frequency: f64, duration: Duration) -> Result<Self> {
        Self::new(Waveform::Sine, sample_rate, frequency, duration)
    }

    pub fn square(sample_rate: u32, frequency: f64, duration: Duration) -> Result<Self> {
        Self::new(Waveform::Square, sample_rate, frequency, duration)
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

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// Period in whole samples.
    pub fn period(&self) -> u64 {
        self.period
    }

    /// Total number of samples this oscillator produces.
    pub fn len(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Samples not yet read.
    pub fn remaining(&self) -> u64 {
        self.total - self.offset
    }
}

impl SampleStream for Oscillator {
    fn read(&mut self, buf: &mut [u8]) -> Result<Filled> {
        if self.offset >= self.total {
            return Ok(Filled::end(0));
        }

        let mut written = 0;
        for out in buf.chunks_exact_mut(SAMPLE_BYTES) {
            if self.offset >= self.total {
                break;
            }
            let value = self
                .waveform
                .sample_at(self.offset, self.period, self.amplitude);
            write_sample(out, value);
            written += SAMPLE_BYTES;
            self.offset += 1;
        }

        if self.offset >= self.total {
            Ok(Filled::end(written))
        } else {
            Ok(Filled::more(written))
        }
    }
}
