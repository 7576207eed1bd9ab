//! Demo material: tone sequences, chords and scores.

use std::time::Duration as WallTime;

use tonestream::{
    dsp::Waveform,
    graph::{BoxedStream, Chain, Combine, Oscillator, Silence, StreamExt},
    io::plot_stream,
    sequencing::{major_chord, pitch::*, Duration, Pitch, Staff},
    Result, SAMPLE_RATE,
};

const Q: Duration = Duration::QUARTER;
const E: Duration = Duration::EIGHTH;
const W: Duration = Duration::WHOLE;

/// Tempo of the Marble Machine transcription.
pub const MARBLE_BPM: f64 = 180.0;

fn tone(
    waveform: Waveform,
    frequency: f64,
    amplitude: u16,
    length: WallTime,
) -> Result<BoxedStream> {
    Ok(Oscillator::new(waveform, SAMPLE_RATE, frequency, length)?
        .with_amplitude(amplitude)?
        .boxed())
}

/// Two close-up plots of one millisecond each.
pub fn tone_plots(waveform: Waveform, tones: [(f64, u16); 2]) -> Result<Vec<String>> {
    tones
        .into_iter()
        .map(|(frequency, amplitude)| {
            let length = WallTime::from_millis(1);
            let mut osc = Oscillator::new(waveform, SAMPLE_RATE, frequency, length)?
                .with_amplitude(amplitude)?;
            plot_stream(
                &mut osc,
                &format!("f = {:.3} kHz, A = {amplitude}", frequency / 1000.0),
                1.0,
            )
        })
        .collect()
}

/// Five tones of varying loudness with a pause before the last one.
/// `amplitudes` are for the first tone, the two middle ones and the last.
pub fn tone_sequence(waveform: Waveform, amplitudes: [u16; 3]) -> Result<Chain<BoxedStream>> {
    let [first, middle, last] = amplitudes;
    Ok(Chain::new(vec![
        tone(waveform, 100.0, first, WallTime::from_millis(500))?,
        tone(waveform, 300.0, middle, WallTime::from_millis(500))?,
        tone(waveform, 600.0, middle, WallTime::from_secs(1))?,
        Silence::new(SAMPLE_RATE, WallTime::from_secs(1) / 3)?.boxed(),
        tone(waveform, 400.0, last, WallTime::from_millis(500))?,
    ]))
}

fn held(waveform: Waveform, pitch: Pitch, length: WallTime, sustain: f64) -> Result<BoxedStream> {
    Ok(Oscillator::new(waveform, SAMPLE_RATE, pitch.frequency(), length)?
        .sustain(sustain)?
        .boxed())
}

/// A triad held for `length`, every voice at `sustain`.
pub fn triad(
    waveform: Waveform,
    pitches: [Pitch; 3],
    length: WallTime,
    sustain: f64,
) -> Result<Combine<BoxedStream>> {
    Ok(Combine::new(
        pitches
            .iter()
            .map(|&p| held(waveform, p, length, sustain))
            .collect::<Result<Vec<_>>>()?,
    ))
}

/// Plot each voice of a triad, then the chord.
pub fn triad_plots(waveform: Waveform, pitches: [Pitch; 3], title: &str) -> Result<Vec<String>> {
    const PLOT_SUSTAIN: f64 = 0.3;
    let length = WallTime::from_secs(2);

    let mut plots = pitches
        .iter()
        .map(|&p| {
            let mut voice = held(waveform, p, length, PLOT_SUSTAIN)?;
            plot_stream(
                &mut voice,
                &format!(
                    "{p} f = {:.3} Hz, Sustain = {PLOT_SUSTAIN:.2}",
                    p.frequency()
                ),
                0.1,
            )
        })
        .collect::<Result<Vec<_>>>()?;

    let mut chord = triad(waveform, pitches, length, PLOT_SUSTAIN)?;
    plots.push(plot_stream(&mut chord, title, 0.1)?);
    Ok(plots)
}

/// Arpeggiated entry: the root sounds at once, the third after `step`, the
/// fifth after two steps. Every voice then holds for `length`.
pub fn staggered(
    waveform: Waveform,
    pitches: [Pitch; 3],
    step: WallTime,
    length: WallTime,
    sustain: f64,
) -> Result<Combine<BoxedStream>> {
    let voices = pitches
        .iter()
        .enumerate()
        .map(|(i, &p)| {
            let voice = held(waveform, p, length, sustain)?;
            if i == 0 {
                return Ok(voice);
            }
            Ok(Silence::new(SAMPLE_RATE, step * i as u32)?.chain(voice).boxed())
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Combine::new(voices))
}

/// Major triads on C3, C4 and C5.
pub fn octave_triads() -> impl Iterator<Item = [Pitch; 3]> {
    (0..3).map(|i| major_chord(C3.add(i * OCTAVE)))
}

// Marble Machine
// Composed by Wintergatan, transcribed by Chalmers Huang
// https://musescore.com/user/5631216/scores/1846226

/// Treble line, 16 bars.
pub fn marble_treble() -> Staff {
    Staff::new()
        // Bar 1
        .note(E6, Q)
        .note(E5, E)
        .note(B5, E)
        .rest(Q)
        .note(E5, E)
        .note(A5, E)
        // Bar 2
        .note(G5, E)
        .note(A5, E)
        .note(E5, E)
        .note(B5, E)
        .rest(E)
        .note(G5, E)
        .note(A5, E)
        .note(D6, E)
        // Bar 3
        .rest(Q)
        .note(E5, E)
        .note(B5, E)
        .rest(Q)
        .note(E5, E)
        .note(A5, E)
        // Bar 4
        .note(G5, E)
        .note(A5, E)
        .note(D5, E)
        .note(Fs5, E)
        .rest(E)
        .note(G5, E)
        .note(A5, E)
        .note(D6, E)
        // Bar 5
        .rest(Q)
        .note(Fs5, E)
        .note(B5, E)
        .rest(Q)
        .note(Fs5, E)
        .note(D6, E)
        // Bar 6
        .note(C6, E)
        .note(B5, E)
        .note(Fs5, E)
        .note(A5, E)
        .rest(E)
        .note(G5, E)
        .note(A5, E)
        .note(E5, E)
        // Bar 7
        .rest(E)
        .note(C5, E)
        .note(E5, E)
        .note(B5, E)
        .note(B4, E)
        .note(C5, E)
        .note(D5, E)
        .note(D6, E)
        // Bar 8
        .note(C6, E)
        .note(B5, E)
        .note(Fs5, E)
        .note(A5, E)
        .rest(E)
        .note(G5, E)
        .note(A5, E)
        .note(E6, E)
        // Bar 9
        .rest(Q)
        .note(E5, E)
        .note(B5, E)
        .rest(Q)
        .note(E5, E)
        .note(A5, E)
        // Bar 10
        .note(G5, E)
        .note(A5, E)
        .note(E5, E)
        .note(B5, E)
        .rest(E)
        .note(G5, E)
        .note(A5, E)
        .note(D6, E)
        // Bar 11
        .rest(Q)
        .note(Fs5, E)
        .note(B5, E)
        .rest(Q)
        .note(Fs5, E)
        .note(D6, E)
        // Bar 12
        .note(C6, E)
        .note(B5, E)
        .note(Fs5, E)
        .note(A5, E)
        .rest(E)
        .note(G5, E)
        .note(A5, E)
        .note(E6, E)
        // Bar 13
        .rest(Q)
        .note(Fs5, E)
        .note(B5, E)
        .rest(Q)
        .note(A5, E)
        .note(E6, E)
        // Bar 14
        .rest(E)
        .note(B5, E)
        .note(Fs5, E)
        .note(A5, E)
        .rest(E)
        .note(G5, E)
        .note(F5, E)
        .note(E5, E)
        // Bar 15
        .rest(E)
        .note(B4, E)
        .note(C5, E)
        .note(Fs5, E)
        .note(C5, E)
        .note(E5, E)
        .note(G5, E)
        .note(D5, E)
        // Bar 16
        .note(D5, E)
        .note(Fs5, E)
        .note(A5, E)
        .note(B4, E)
        .note(A5, E)
        .note(D5, E)
        .note(G5, E)
        .note(A5, E)
        .note(E6, E)
}

/// Bass accompaniment, silent for the first eight bars.
pub fn marble_bass() -> Staff {
    Staff::new()
        // Bar 1
        .rest(W)
        // Bar 2
        .rest(W)
        // Bar 3
        .rest(W)
        // Bar 4
        .rest(W)
        // Bar 5
        .rest(W)
        // Bar 6
        .rest(W)
        // Bar 7
        .rest(W)
        // Bar 8
        .rest(W)
        // Bar 9
        .rest(Q)
        .chord(&[E4, G4, B4], E)
        .rest(E)
        .rest(Q)
        .chord(&[E4, G4, B4], E)
        .rest(E)
        // Bar 10
        .rest(Q)
        .chord(&[E4, G4, B4], E)
        .rest(E)
        .rest(Q)
        .chord(&[E4, G4, B4], E)
        .rest(E)
        // Bar 11
        .rest(Q)
        .chord(&[D4, Fs4, A4], E)
        .rest(E)
        .rest(Q)
        .chord(&[D4, Fs4, A4], E)
        .rest(E)
        // Bar 12
        .rest(Q)
        .chord(&[D4, Fs4, A4], E)
        .rest(E)
        .rest(Q)
        .chord(&[D4, Fs4, A4], E)
        .rest(E)
        // Bar 13
        .rest(Q)
        .chord(&[B3, D4, Fs4], E)
        .rest(E)
        .rest(Q)
        .chord(&[B3, D4, Fs4], E)
        .rest(E)
        // Bar 14
        .rest(Q)
        .chord(&[B3, D4, Fs4], E)
        .rest(E)
        .rest(Q)
        .chord(&[B3, D4, Fs4], E)
        .rest(E)
        // Bar 15
        .chord(&[C3, E4, G4], E)
        .rest(E)
        .rest(Q)
        .chord(&[C3, E4, G4], E)
        .rest(E)
        .rest(Q)
        // Bar 16
        .rest(E)
        .chord(&[C3, E4, G4], E)
        .rest(E)
        .rest(E)
        .chord(&[C3, E4, G4], E)
        .chord(&[C3, E4, G4], E)
        .rest(E)
        .chord(&[C3, E4, G4], E)
}
