//! Score rendering: staves in, one mixed sample stream out.

use log::debug;

use crate::dsp::oscillator::Waveform;
use crate::error::{Error, Result};
use crate::graph::{BoxedStream, Chain, Combine, Oscillator, Silence, StreamExt, Sustain};
use crate::sequencing::{Duration, Note, Staff};
use crate::{DEFAULT_SUSTAIN, SAMPLE_RATE};

/// One attenuated voice of a group.
pub type Voice = Sustain<BoxedStream>;
/// Voices that start together.
pub type RenderedGroup = Combine<Voice>;
/// Groups of one staff, back to back.
pub type RenderedStaff = Chain<RenderedGroup>;
/// Every staff of a score, mixed.
pub type Score = Combine<RenderedStaff>;

/// Turns [`Staff`] notation into sample streams.
///
/// Each note lasts `60 / bpm × (note / beat)` seconds, where `beat` is the
/// note value that gets one tick of the metronome. Pitched notes become
/// oscillators, rests become silence, and every voice is attenuated by the
/// sustain percentage so that chords keep some headroom before clipping.
///
/// ```
/// use tonestream::runtime::Composer;
/// use tonestream::sequencing::{pitch::C4, Duration, Staff};
///
/// let staff = Staff::new().note(C4, Duration::QUARTER);
/// let _score = Composer::new().bpm(120.0).render(&[staff])?;
/// # Ok::<(), tonestream::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Composer {
    sample_rate: u32,
    bpm: f64,
    beat: Duration,
    waveform: Waveform,
    sustain: f64,
}

impl Composer {
    pub fn new() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            bpm: 120.0,
            beat: Duration::QUARTER,
            waveform: Waveform::Sine,
            sustain: DEFAULT_SUSTAIN,
        }
    }

    pub fn sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Set the tempo in beats per minute
    pub fn bpm(mut self, bpm: f64) -> Self {
        self.bpm = bpm;
        self
    }

    /// Note value of one beat (quarter by default).
    pub fn beat(mut self, beat: Duration) -> Self {
        self.beat = beat;
        self
    }

    pub fn waveform(mut self, waveform: Waveform) -> Self {
        self.waveform = waveform;
        self
    }

    /// Attenuation for every voice, in `[0.0, 1.0]`.
    pub fn sustain(mut self, sustain: f64) -> Self {
        self.sustain = sustain;
        self
    }

    fn validate(&self) -> Result<()> {
        if !self.bpm.is_finite() || self.bpm <= 0.0 {
            return Err(Error::invalid(
                "bpm",
                format!("must be a positive tempo, got {}", self.bpm),
            ));
        }
        if !(0.0..=1.0).contains(&self.sustain) {
            return Err(Error::invalid(
                "sustain",
                format!("must be between 0 and 1, got {}", self.sustain),
            ));
        }
        if self.sample_rate == 0 {
            return Err(Error::invalid("sample_rate", "must be greater than zero"));
        }
        Ok(())
    }

    /// Build the stream for a single note or rest.
    pub fn voice(&self, note: &Note) -> Result<Voice> {
        let length = note.duration.to_seconds(self.beat, self.bpm)?;
        let source = match note.pitch {
            Some(pitch) => {
                Oscillator::new(self.waveform, self.sample_rate, pitch.frequency(), length)?
                    .boxed()
            }
            None => Silence::new(self.sample_rate, length)?.boxed(),
        };
        Sustain::new(source, self.sustain)
    }

    /// Mix the voices of one time group.
    pub fn render_group(&self, group: &[Note]) -> Result<RenderedGroup> {
        let voices = group
            .iter()
            .map(|note| self.voice(note))
            .collect::<Result<Vec<_>>>()?;
        Ok(Combine::new(voices))
    }

    /// Render one staff: each group mixed, the groups played in order.
    pub fn render_staff(&self, staff: &Staff) -> Result<RenderedStaff> {
        self.validate()?;

        let groups = staff
            .groups()
            .iter()
            .map(|group| self.render_group(group))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "composer: staff of {} groups ({}) at {} bpm",
            groups.len(),
            staff.duration(),
            self.bpm
        );
        Ok(Chain::new(groups))
    }

    /// Render every staff and mix them into one stream.
    pub fn render(&self, staves: &[Staff]) -> Result<Score> {
        self.validate()?;
        let rendered = staves
            .iter()
            .map(|staff| self.render_staff(staff))
            .collect::<Result<Vec<_>>>()?;
        Ok(Combine::new(rendered))
    }
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}
