use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::duration::Duration;
use super::pitch::{Interval, Pitch};

/// A pitched note or a rest, held for a musical duration.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Note {
    /// `None` is a rest
    pub pitch: Option<Pitch>,
    pub duration: Duration,
}

impl Note {
    pub const fn new(pitch: Pitch, duration: Duration) -> Self {
        Self {
            pitch: Some(pitch),
            duration,
        }
    }

    pub const fn rest(duration: Duration) -> Self {
        Self {
            pitch: None,
            duration,
        }
    }

    pub fn is_rest(&self) -> bool {
        self.pitch.is_none()
    }

    /// Frequency in Hz, 0.0 for a rest.
    pub fn frequency(&self) -> f64 {
        self.pitch.map_or(0.0, Pitch::frequency)
    }

    /// Transpose up. Rests are unchanged.
    pub fn add(self, interval: Interval) -> Self {
        Self {
            pitch: self.pitch.map(|p| p.add(interval)),
            ..self
        }
    }

    /// Transpose down. Rests are unchanged.
    pub fn subtract(self, interval: Interval) -> Self {
        Self {
            pitch: self.pitch.map(|p| p.subtract(interval)),
            ..self
        }
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pitch {
            Some(pitch) => write!(f, "{} {pitch}", self.duration),
            None => f.write_str(&self.duration.rest_symbol()),
        }
    }
}
