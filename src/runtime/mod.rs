//! Turning scores into sound.
//!
//! [`Composer`] renders staves into a single sample stream. With the `rtrb`
//! feature, [`Player`] sends a stream to the default output device and
//! [`Scope`] shows it live in the terminal.
//!
//! # Example
//!
//! ```ignore
//! use tonestream::{runtime::*, sequencing::{pitch::*, Duration, Staff}};
//!
//! fn main() -> color_eyre::Result<()> {
//!     let melody = Staff::new().note(C4, Duration::QUARTER).note(E4, Duration::QUARTER);
//!     let score = Composer::new().bpm(120.0).render(&[melody])?;
//!     Player::new(PlaybackConfig::default()).play(score)?;
//!     Ok(())
//! }
//! ```

pub mod composer;
#[cfg(feature = "rtrb")]
pub mod player;
#[cfg(feature = "rtrb")]
pub mod ui;

pub use composer::Composer;
#[cfg(feature = "rtrb")]
pub use player::{monitor, BitDepth, PlaybackConfig, PlaybackError, PlaybackStatus, Player};
#[cfg(feature = "rtrb")]
pub use ui::Scope;
