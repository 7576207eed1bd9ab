#![allow(non_upper_case_globals)]

/*
Pitch Constants
===============

Pitches are MIDI note numbers wrapped in a newtype, so a score reads like
sheet music while still being plain integers underneath.
Middle C (C4) = MIDI note 60, which is the standard reference point.

Naming Convention:
- Natural notes: C4, D4, E4, etc.
- Sharps: Cs4 (C#4), Ds4 (D#4), etc.
- Flats: Db4, Eb4, etc. (aliases for the same MIDI notes as sharps)

Octave Range:
- C0 (MIDI 12) to B8 (MIDI 119)
- Octave -1 (MIDI 0-11) omitted as rarely used

The MIDI formula: note_number = 12 * (octave + 1) + semitone
Where semitone: C=0, C#=1, D=2, D#=3, E=4, F=5, F#=6, G=7, G#=8, A=9, A#=10, B=11

Frequency uses twelve-tone equal temperament tuned to A4 = 440 Hz:
  f(n) = 440 × 2^((n - 69) / 12)

Example usage:
  let triad = major_chord(C4);          // [C4, E4, G4]
  let up = Fs4.add(OCTAVE);             // F#5
*/

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Distance between two pitches, in semitones.
pub type Interval = u8;

pub const SEMITONE: Interval = 1;
pub const TONE: Interval = 2;
pub const OCTAVE: Interval = 12;

/// Highest valid MIDI note number.
pub const MAX_MIDI: u8 = 127;

const NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Whole/whole/half/whole/whole/whole/half
const MAJOR_STEPS: [Interval; 7] = [TONE, TONE, SEMITONE, TONE, TONE, TONE, SEMITONE];

/// A MIDI note number (0..=127).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pitch(pub u8);

impl Pitch {
    pub const fn midi(self) -> u8 {
        self.0
    }

    /// Equal-tempered frequency in Hz.
    pub fn frequency(self) -> f64 {
        440.0 * 2f64.powf((self.0 as f64 - 69.0) / 12.0)
    }

    /// Scientific pitch name, sharps only: "C4", "F#5", "A#-1".
    pub fn name(self) -> String {
        let octave = self.0 as i32 / 12 - 1;
        format!("{}{octave}", NAMES[(self.0 % 12) as usize])
    }

    /// Raise by `interval`, clamped to the top of the MIDI range.
    pub const fn add(self, interval: Interval) -> Self {
        let n = self.0.saturating_add(interval);
        Pitch(if n > MAX_MIDI { MAX_MIDI } else { n })
    }

    /// Lower by `interval`, clamped at MIDI 0.
    pub const fn subtract(self, interval: Interval) -> Self {
        Pitch(self.0.saturating_sub(interval))
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl From<u8> for Pitch {
    fn from(n: u8) -> Self {
        Pitch(n)
    }
}

/// The eight notes of the major scale starting at `root`, octave included.
pub fn major_scale(root: Pitch) -> [Pitch; 8] {
    let mut scale = [root; 8];
    for (i, step) in MAJOR_STEPS.iter().enumerate() {
        scale[i + 1] = scale[i].add(*step);
    }
    scale
}

/// Root, major third and perfect fifth.
pub fn major_chord(root: Pitch) -> [Pitch; 3] {
    [root, root.add(2 * TONE), root.add(3 * TONE + SEMITONE)]
}

// Octave 0
pub const C0: Pitch = Pitch(12);
pub const Cs0: Pitch = Pitch(13);
pub const Db0: Pitch = Pitch(13);
pub const D0: Pitch = Pitch(14);
pub const Ds0: Pitch = Pitch(15);
pub const Eb0: Pitch = Pitch(15);
pub const E0: Pitch = Pitch(16);
pub const F0: Pitch = Pitch(17);
pub const Fs0: Pitch = Pitch(18);
pub const Gb0: Pitch = Pitch(18);
pub const G0: Pitch = Pitch(19);
pub const Gs0: Pitch = Pitch(20);
pub const Ab0: Pitch = Pitch(20);
pub const A0: Pitch = Pitch(21);
pub const As0: Pitch = Pitch(22);
pub const Bb0: Pitch = Pitch(22);
pub const B0: Pitch = Pitch(23);

// Octave 1
pub const C1: Pitch = Pitch(24);
pub const Cs1: Pitch = Pitch(25);
pub const Db1: Pitch = Pitch(25);
pub const D1: Pitch = Pitch(26);
pub const Ds1: Pitch = Pitch(27);
pub const Eb1: Pitch = Pitch(27);
pub const E1: Pitch = Pitch(28);
pub const F1: Pitch = Pitch(29);
pub const Fs1: Pitch = Pitch(30);
pub const Gb1: Pitch = Pitch(30);
pub const G1: Pitch = Pitch(31);
pub const Gs1: Pitch = Pitch(32);
pub const Ab1: Pitch = Pitch(32);
pub const A1: Pitch = Pitch(33);
pub const As1: Pitch = Pitch(34);
pub const Bb1: Pitch = Pitch(34);
pub const B1: Pitch = Pitch(35);

// Octave 2
pub const C2: Pitch = Pitch(36);
pub const Cs2: Pitch = Pitch(37);
pub const Db2: Pitch = Pitch(37);
pub const D2: Pitch = Pitch(38);
pub const Ds2: Pitch = Pitch(39);
pub const Eb2: Pitch = Pitch(39);
pub const E2: Pitch = Pitch(40);
pub const F2: Pitch = Pitch(41);
pub const Fs2: Pitch = Pitch(42);
pub const Gb2: Pitch = Pitch(42);
pub const G2: Pitch = Pitch(43);
pub const Gs2: Pitch = Pitch(44);
pub const Ab2: Pitch = Pitch(44);
pub const A2: Pitch = Pitch(45);
pub const As2: Pitch = Pitch(46);
pub const Bb2: Pitch = Pitch(46);
pub const B2: Pitch = Pitch(47);

// Octave 3
pub const C3: Pitch = Pitch(48);
pub const Cs3: Pitch = Pitch(49);
pub const Db3: Pitch = Pitch(49);
pub const D3: Pitch = Pitch(50);
pub const Ds3: Pitch = Pitch(51);
pub const Eb3: Pitch = Pitch(51);
pub const E3: Pitch = Pitch(52);
pub const F3: Pitch = Pitch(53);
pub const Fs3: Pitch = Pitch(54);
pub const Gb3: Pitch = Pitch(54);
pub const G3: Pitch = Pitch(55);
pub const Gs3: Pitch = Pitch(56);
pub const Ab3: Pitch = Pitch(56);
pub const A3: Pitch = Pitch(57);
pub const As3: Pitch = Pitch(58);
pub const Bb3: Pitch = Pitch(58);
pub const B3: Pitch = Pitch(59);

// Octave 4
pub const C4: Pitch = Pitch(60);
pub const Cs4: Pitch = Pitch(61);
pub const Db4: Pitch = Pitch(61);
pub const D4: Pitch = Pitch(62);
pub const Ds4: Pitch = Pitch(63);
pub const Eb4: Pitch = Pitch(63);
pub const E4: Pitch = Pitch(64);
pub const F4: Pitch = Pitch(65);
pub const Fs4: Pitch = Pitch(66);
pub const Gb4: Pitch = Pitch(66);
pub const G4: Pitch = Pitch(67);
pub const Gs4: Pitch = Pitch(68);
pub const Ab4: Pitch = Pitch(68);
pub const A4: Pitch = Pitch(69);
pub const As4: Pitch = Pitch(70);
pub const Bb4: Pitch = Pitch(70);
pub const B4: Pitch = Pitch(71);

// Octave 5
pub const C5: Pitch = Pitch(72);
pub const Cs5: Pitch = Pitch(73);
pub const Db5: Pitch = Pitch(73);
pub const D5: Pitch = Pitch(74);
pub const Ds5: Pitch = Pitch(75);
pub const Eb5: Pitch = Pitch(75);
pub const E5: Pitch = Pitch(76);
pub const F5: Pitch = Pitch(77);
pub const Fs5: Pitch = Pitch(78);
pub const Gb5: Pitch = Pitch(78);
pub const G5: Pitch = Pitch(79);
pub const Gs5: Pitch = Pitch(80);
pub const Ab5: Pitch = Pitch(80);
pub const A5: Pitch = Pitch(81);
pub const As5: Pitch = Pitch(82);
pub const Bb5: Pitch = Pitch(82);
pub const B5: Pitch = Pitch(83);

// Octave 6
pub const C6: Pitch = Pitch(84);
pub const Cs6: Pitch = Pitch(85);
pub const Db6: Pitch = Pitch(85);
pub const D6: Pitch = Pitch(86);
pub const Ds6: Pitch = Pitch(87);
pub const Eb6: Pitch = Pitch(87);
pub const E6: Pitch = Pitch(88);
pub const F6: Pitch = Pitch(89);
pub const Fs6: Pitch = Pitch(90);
pub const Gb6: Pitch = Pitch(90);
pub const G6: Pitch = Pitch(91);
pub const Gs6: Pitch = Pitch(92);
pub const Ab6: Pitch = Pitch(92);
pub const A6: Pitch = Pitch(93);
pub const As6: Pitch = Pitch(94);
pub const Bb6: Pitch = Pitch(94);
pub const B6: Pitch = Pitch(95);

// Octave 7
pub const C7: Pitch = Pitch(96);
pub const Cs7: Pitch = Pitch(97);
pub const Db7: Pitch = Pitch(97);
pub const D7: Pitch = Pitch(98);
pub const Ds7: Pitch = Pitch(99);
pub const Eb7: Pitch = Pitch(99);
pub const E7: Pitch = Pitch(100);
pub const F7: Pitch = Pitch(101);
pub const Fs7: Pitch = Pitch(102);
pub const Gb7: Pitch = Pitch(102);
pub const G7: Pitch = Pitch(103);
pub const Gs7: Pitch = Pitch(104);
pub const Ab7: Pitch = Pitch(104);
pub const A7: Pitch = Pitch(105);
pub const As7: Pitch = Pitch(106);
pub const Bb7: Pitch = Pitch(106);
pub const B7: Pitch = Pitch(107);

// Octave 8
pub const C8: Pitch = Pitch(108);
pub const Cs8: Pitch = Pitch(109);
pub const Db8: Pitch = Pitch(109);
pub const D8: Pitch = Pitch(110);
pub const Ds8: Pitch = Pitch(111);
pub const Eb8: Pitch = Pitch(111);
pub const E8: Pitch = Pitch(112);
pub const F8: Pitch = Pitch(113);
pub const Fs8: Pitch = Pitch(114);
pub const Gb8: Pitch = Pitch(114);
pub const G8: Pitch = Pitch(115);
pub const Gs8: Pitch = Pitch(116);
pub const Ab8: Pitch = Pitch(116);
pub const A8: Pitch = Pitch(117);
pub const As8: Pitch = Pitch(118);
pub const Bb8: Pitch = Pitch(118);
pub const B8: Pitch = Pitch(119);
