//! tonestream - demos for the sample stream engine
//!
//! Run with: cargo run -- <demo> [--scope]

mod songs;

use std::thread;
use std::time::Duration;

use color_eyre::eyre::{bail, eyre, Result as EyreResult, WrapErr};
use log::info;
use tonestream::{
    dsp::Waveform,
    graph::{Noise, SampleStream, StreamExt},
    io::plot_stream,
    runtime::{monitor, ui::VIS_BUFFER_SIZE, BitDepth, Composer, PlaybackConfig, Player, Scope},
    sequencing::{major_chord, pitch::C4},
};

/// Seed for the noise demo, so every run hisses the same way.
const NOISE_SEED: u64 = 0x5eed;

const DEMOS: [(&str, &str); 7] = [
    ("sine", "sine tones, plotted and played"),
    ("square", "square tones, plotted and played"),
    ("wave", "square tones through the 8-bit path"),
    ("noise", "two seconds of white noise through the 8-bit path"),
    ("chord", "C major plots and a staggered chord"),
    ("pitch", "major triads over three octaves"),
    ("marble", "Marble Machine, two staves at 180 bpm"),
];

fn usage() -> String {
    let mut text = String::from("usage: tonestream <demo> [--scope]\n\ndemos:\n");
    for (name, about) in DEMOS {
        text.push_str(&format!("  {name:<8} {about}\n"));
    }
    text
}

/// Where finished streams go.
struct Output {
    config: PlaybackConfig,
    scope: bool,
}

impl Output {
    fn play<S: SampleStream + 'static>(&self, title: &str, stream: S) -> EyreResult<()> {
        info!("playing {title}");
        if self.scope {
            return self.play_with_scope(title, stream);
        }
        Player::new(self.config.clone())
            .play(stream)
            .wrap_err_with(|| format!("failed to play {title}"))
    }

    fn play_with_scope<S: SampleStream + 'static>(&self, title: &str, stream: S) -> EyreResult<()> {
        let (tap, receiver) = monitor(VIS_BUFFER_SIZE * 64);
        let mut player = Player::new(self.config.clone()).with_monitor(tap);
        let stop = player.stop_handle();
        let playback = thread::spawn(move || player.play(stream));

        let mut terminal = ratatui::init();
        let shown = Scope::new(title, self.config.sample_rate, receiver)
            .with_stop(stop)
            .run(&mut terminal);
        ratatui::restore();
        shown?;

        playback
            .join()
            .map_err(|_| eyre!("playback thread panicked"))?
            .wrap_err_with(|| format!("failed to play {title}"))
    }
}

fn print_plots(plots: Vec<String>) {
    for plot in plots {
        println!("{plot}");
        println!();
    }
}

fn tones(
    out: &Output,
    waveform: Waveform,
    plots: [(f64, u16); 2],
    amplitudes: [u16; 3],
) -> EyreResult<()> {
    print_plots(songs::tone_plots(waveform, plots)?);
    out.play(
        &format!("{} tones", waveform.name()),
        songs::tone_sequence(waveform, amplitudes)?,
    )
}

fn noise(out: &Output) -> EyreResult<()> {
    let mut preview = Noise::new(out.config.sample_rate, Duration::from_millis(2), NOISE_SEED)?;
    print_plots(vec![plot_stream(&mut preview, "white noise", 1.0)?]);
    out.play(
        "white noise",
        Noise::new(out.config.sample_rate, Duration::from_secs(2), NOISE_SEED)?,
    )
}

fn chord(out: &Output) -> EyreResult<()> {
    let c_major = major_chord(C4);
    let step = Duration::from_millis(400);
    let length = Duration::from_secs(2);

    println!("C major, sine wave");
    println!("--------------------");
    print_plots(songs::triad_plots(Waveform::Sine, c_major, "C major chord")?);
    out.play(
        "C major, sine",
        songs::staggered(Waveform::Sine, c_major, step, length, 0.3)?,
    )?;

    thread::sleep(Duration::from_millis(500));

    println!("C major, square wave");
    println!("--------------------");
    print_plots(songs::triad_plots(Waveform::Square, c_major, "C major chord")?);
    out.play(
        "C major, square",
        songs::staggered(Waveform::Square, c_major, step, length, 0.3)?.sustain(0.6)?,
    )
}

fn pitch(out: &Output) -> EyreResult<()> {
    for triad in songs::octave_triads() {
        let names = triad.map(|p| p.name()).join(",");
        print_plots(songs::triad_plots(Waveform::Sine, triad, &names)?);
        out.play(
            &names,
            songs::staggered(
                Waveform::Sine,
                triad,
                Duration::from_millis(200),
                Duration::from_secs(1),
                0.2,
            )?,
        )?;
    }
    Ok(())
}

fn marble(out: &Output) -> EyreResult<()> {
    let staves = [songs::marble_treble(), songs::marble_bass()];
    for (name, staff) in ["treble", "bass"].iter().zip(&staves) {
        info!("{name}: {} groups, {}", staff.len(), staff.duration().as_f64());
    }
    let score = Composer::new()
        .bpm(songs::MARBLE_BPM)
        .render(&staves)
        .wrap_err("failed to render the score")?;
    out.play("Marble Machine", score)
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut demo = None;
    let mut scope = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--scope" => scope = true,
            "-h" | "--help" => {
                print!("{}", usage());
                return Ok(());
            }
            name if demo.is_none() => demo = Some(name.to_string()),
            other => bail!("unexpected argument `{other}`\n\n{}", usage()),
        }
    }

    let mut out = Output {
        config: PlaybackConfig::default(),
        scope,
    };

    match demo.as_deref() {
        Some("sine") => {
            let plots = [(2000.0, 12800), (3500.0, 25600)];
            tones(&out, Waveform::Sine, plots, [30000, 13106, 19660])
        }
        Some("square") => {
            let plots = [(2000.0, 12800), (6000.0, 25600)];
            tones(&out, Waveform::Square, plots, [16383, 6553, 9830])
        }
        Some("wave") => {
            out.config.bit_depth = BitDepth::Eight;
            let plots = [(2000.0, 12800), (6000.0, 25600)];
            tones(&out, Waveform::Square, plots, [12800, 5120, 7680])
        }
        Some("noise") => {
            out.config.bit_depth = BitDepth::Eight;
            noise(&out)
        }
        Some("chord") => chord(&out),
        Some("pitch") => pitch(&out),
        Some("marble") => marble(&out),
        Some(other) => bail!("unknown demo `{other}`\n\n{}", usage()),
        None => bail!("no demo given\n\n{}", usage()),
    }
}
