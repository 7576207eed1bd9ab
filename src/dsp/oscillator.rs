#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::f64::consts::TAU;

use crate::error::{Error, Result};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
}

impl Waveform {
    /// Sample at `index` for a wave with the given period (in samples) and
    /// peak amplitude.
    ///
    /// `period` must be non-zero; [`samples_per_period`] guarantees that.
    #[inline]
    pub fn sample_at(self, index: u64, period: u64, amplitude: i16) -> i16 {
        let pos = index % period;
        match self {
            Waveform::Sine => {
                let radian = pos as f64 / period as f64 * TAU;
                (amplitude as f64 * radian.sin()).round() as i16
            }
            Waveform::Square => {
                if pos <= period / 2 {
                    amplitude
                } else {
                    -amplitude
                }
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Square => "square",
        }
    }
}

/// Number of whole samples in one period, floor(sample_rate / frequency).
///
/// Fails for a zero sample rate, a non-positive or non-finite frequency, and
/// frequencies above the sample rate (the period would round down to zero).
pub fn samples_per_period(sample_rate: u32, frequency: f64) -> Result<u64> {
    if sample_rate == 0 {
        return Err(Error::invalid("sample_rate", "must be greater than zero"));
    }
    if !frequency.is_finite() || frequency <= 0.0 {
        return Err(Error::invalid(
            "frequency",
            format!("must be a positive number of hertz, got {frequency}"),
        ));
    }

    let period = (sample_rate as f64 / frequency) as u64;
    if period == 0 {
        return Err(Error::invalid(
            "frequency",
            format!("{frequency} Hz is above the {sample_rate} Hz sample rate"),
        ));
    }
    Ok(period)
}
