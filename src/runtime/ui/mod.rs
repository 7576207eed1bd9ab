//! Terminal oscilloscope for a playing stream.
//!
//! The player thread feeds a [`MonitorReceiver`]; this side renders the most
//! recent samples as a waveform and a spectrum until playback finishes or the
//! user quits.

mod spectrum;
mod transport;
mod waveform;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};

use super::player::{MonitorReceiver, PlaybackStatus};

pub use spectrum::SpectrumAnalyzer;
pub use transport::AudioStats;

use spectrum::render_spectrum;
use transport::render_transport;
use waveform::render_waveform;

/// Audio visualization buffer size
pub const VIS_BUFFER_SIZE: usize = 1024;

/// Scope application state
pub struct Scope {
    title: String,
    sample_rate: u32,
    monitor: MonitorReceiver,
    /// Latest status received from the player
    status: PlaybackStatus,
    /// Most recent samples, oldest first
    audio_buffer: Vec<f32>,
    spectrum: SpectrumAnalyzer,
    /// Raised on quit so the player stops too
    stop: Option<Arc<AtomicBool>>,
    should_quit: bool,
}

impl Scope {
    pub fn new(title: impl Into<String>, sample_rate: u32, monitor: MonitorReceiver) -> Self {
        Self {
            title: title.into(),
            sample_rate,
            monitor,
            status: PlaybackStatus::default(),
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            spectrum: SpectrumAnalyzer::new(VIS_BUFFER_SIZE, sample_rate as f32),
            stop: None,
            should_quit: false,
        }
    }

    /// Flag to raise when the user quits (see `Player::stop_handle`).
    pub fn with_stop(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = Some(stop);
        self
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();
            self.poll_status();
            self.spectrum.update(&self.audio_buffer);

            terminal.draw(|frame| self.render(frame))?;

            if self.status.finished {
                break;
            }

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        if let Some(stop) = &self.stop {
            stop.store(true, Ordering::Relaxed);
        }
        Ok(())
    }

    /// Read as many samples as available, keeping the last VIS_BUFFER_SIZE
    fn poll_audio(&mut self) {
        let available = self.monitor.samples.slots();
        if available == 0 {
            return;
        }
        self.audio_buffer
            .extend(std::iter::from_fn(|| self.monitor.samples.pop().ok()).take(available));
        if self.audio_buffer.len() > VIS_BUFFER_SIZE {
            let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
            self.audio_buffer.drain(0..excess);
        }
    }

    /// Keep only the latest status
    fn poll_status(&mut self) {
        while let Ok(status) = self.monitor.status.pop() {
            self.status = status;
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        if let KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc = key {
            self.should_quit = true;
        }
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Transport bar
                Constraint::Min(8),    // Waveform
                Constraint::Length(10), // Spectrum
                Constraint::Length(1), // Help bar
            ])
            .split(frame.area());

        let stats = AudioStats::from_buffer(&self.audio_buffer);
        render_transport(
            frame,
            chunks[0],
            &self.title,
            self.sample_rate,
            &self.status,
            &stats,
        );
        render_waveform(frame, chunks[1], &self.audio_buffer);
        render_spectrum(frame, chunks[2], self.spectrum.data());

        let help = Paragraph::new(" [Q] Quit").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}
