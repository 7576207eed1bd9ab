//! Music notation: durations, pitches, notes and staves.
//!
//! Nothing here produces audio; see
//! [`runtime::composer`](crate::runtime::composer) for turning a [`Staff`]
//! into a sample stream.

pub mod duration;
pub mod note;
pub mod pitch;
pub mod staff;

pub use duration::Duration;
pub use note::Note;
pub use pitch::{major_chord, major_scale, Interval, Pitch, OCTAVE, SEMITONE, TONE};
pub use staff::Staff;
