use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Musical note duration represented as a rational fraction of a whole note.
/// All operations preserve exact ratios, so there is no floating point drift.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration {
    /// Numerator: how many parts
    pub numerator: u32,
    /// Denominator: of what size (4 = quarter, 8 = eighth, etc.)
    pub denominator: u32,
}

impl Duration {
    // Standard note values
    pub const DOUBLE: Duration = Duration {
        numerator: 2,
        denominator: 1,
    };
    pub const WHOLE: Duration = Duration {
        numerator: 1,
        denominator: 1,
    };
    pub const HALF: Duration = Duration {
        numerator: 1,
        denominator: 2,
    };
    pub const QUARTER: Duration = Duration {
        numerator: 1,
        denominator: 4,
    };
    pub const EIGHTH: Duration = Duration {
        numerator: 1,
        denominator: 8,
    };
    pub const SIXTEENTH: Duration = Duration {
        numerator: 1,
        denominator: 16,
    };
    pub const THIRTY_SECOND: Duration = Duration {
        numerator: 1,
        denominator: 32,
    };

    // Convenience constants for common dotted notes
    pub const DOTTED_HALF: Duration = Duration::HALF.dotted();
    pub const DOTTED_QUARTER: Duration = Duration::QUARTER.dotted();
    pub const DOTTED_EIGHTH: Duration = Duration::EIGHTH.dotted();

    // Convenience constants for common triplets
    pub const QUARTER_TRIPLET: Duration = Duration::QUARTER.triplet();
    pub const EIGHTH_TRIPLET: Duration = Duration::EIGHTH.triplet();

    /// Apply a dot: multiply duration by 3/2 (increases by 50%)
    pub const fn dotted(self) -> Self {
        Duration {
            numerator: self.numerator * 3,
            denominator: self.denominator * 2,
        }
    }

    /// Create a triplet: multiply duration by 2/3
    /// (three notes in the time of two)
    pub const fn triplet(self) -> Self {
        self.tuplet(2, 3)
    }

    /// General tuplet: `played` notes in the time of `in_time_of` notes
    /// E.g., `.tuplet(2, 3)` = triplet (3 in time of 2)
    ///       `.tuplet(4, 5)` = quintuplet (5 in time of 4)
    pub const fn tuplet(self, in_time_of: u32, played: u32) -> Self {
        Duration {
            numerator: self.numerator * in_time_of,
            denominator: self.denominator * played,
        }
    }

    /// Double the duration
    pub const fn double(self) -> Self {
        Duration {
            numerator: self.numerator * 2,
            denominator: self.denominator,
        }
    }

    /// Halve the duration
    pub const fn half(self) -> Self {
        Duration {
            numerator: self.numerator,
            denominator: self.denominator * 2,
        }
    }

    /// Reduce the fraction to lowest terms using GCD
    pub const fn reduce(self) -> Self {
        let gcd = const_gcd(self.numerator, self.denominator);
        if gcd == 0 {
            return self;
        }
        Duration {
            numerator: self.numerator / gcd,
            denominator: self.denominator / gcd,
        }
    }

    /// Add two durations (finds common denominator)
    pub const fn add(self, other: Self) -> Self {
        Duration {
            numerator: self.numerator * other.denominator + other.numerator * self.denominator,
            denominator: self.denominator * other.denominator,
        }
        .reduce()
    }

    /// Length in whole notes as a float, for comparisons and display.
    pub fn as_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Wall-clock length at a tempo of `bpm` beats per minute, where each
    /// beat is one `beat` note (the note in the tempo marking).
    ///
    /// seconds = 60 / bpm × (self / beat)
    pub fn to_seconds(&self, beat: Duration, bpm: f64) -> Result<std::time::Duration> {
        if !bpm.is_finite() || bpm <= 0.0 {
            return Err(Error::invalid(
                "bpm",
                format!("must be a positive tempo, got {bpm}"),
            ));
        }
        if beat.numerator == 0 || beat.denominator == 0 {
            return Err(Error::invalid("beat", format!("{beat:?} has no length")));
        }
        if self.denominator == 0 {
            return Err(Error::invalid(
                "duration",
                format!("{self:?} has a zero denominator"),
            ));
        }

        let beats = (self.numerator as f64 * beat.denominator as f64)
            / (self.denominator as f64 * beat.numerator as f64);
        let seconds = 60.0 / bpm * beats;

        std::time::Duration::try_from_secs_f64(seconds)
            .map_err(|e| Error::invalid("duration", e.to_string()))
    }

    /// Rest symbol for this duration (𝄽 for a quarter rest).
    pub fn rest_symbol(&self) -> String {
        match self.reduce() {
            Duration::DOUBLE => "\u{1D13A}".to_string(),
            Duration::WHOLE => "\u{1D13B}".to_string(),
            Duration::HALF => "\u{1D13C}".to_string(),
            Duration::QUARTER => "\u{1D13D}".to_string(),
            Duration::EIGHTH => "\u{1D13E}".to_string(),
            Duration::SIXTEENTH => "\u{1D13F}".to_string(),
            other => format!("{} rest", other.fraction()),
        }
    }

    /// "1/32", "8" or "3/8", reduced.
    fn fraction(&self) -> String {
        let Duration {
            numerator,
            denominator,
        } = self.reduce();
        if denominator == 1 {
            format!("{numerator}")
        } else {
            format!("{numerator}/{denominator}")
        }
    }
}

/// Musical note symbol (♩ for a quarter note)
impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reduce() {
            Duration::DOUBLE => f.write_str("\u{1D15C}"),
            Duration::WHOLE => f.write_str("\u{1D15D}"),
            Duration::HALF => f.write_str("\u{1D15E}"),
            Duration::QUARTER => f.write_str("\u{2669}"),
            Duration::EIGHTH => f.write_str("\u{266A}"),
            Duration::SIXTEENTH => f.write_str("\u{1D161}"),
            other => write!(f, "{} note", other.fraction()),
        }
    }
}

/// Compute greatest common divisor (Euclidean algorithm)
/// Used to reduce fractions to lowest terms
const fn const_gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let temp = b;
        b = a % b;
        a = temp;
    }
    a
}
