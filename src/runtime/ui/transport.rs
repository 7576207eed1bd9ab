//! Transport bar widget - shows title, elapsed time, sample rate and levels

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::runtime::player::PlaybackStatus;

/// Audio statistics for display
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    /// Compute audio stats from a buffer
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

/// "m:ss.d" from a sample count.
pub(super) fn elapsed(samples: u64, sample_rate: u32) -> String {
    let tenths = samples * 10 / sample_rate.max(1) as u64;
    format!("{}:{:02}.{}", tenths / 600, tenths / 10 % 60, tenths % 10)
}

/// Render the transport bar
pub fn render_transport(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    sample_rate: u32,
    status: &PlaybackStatus,
    audio_stats: &AudioStats,
) {
    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL);

    let (play_symbol, play_state_str, state_color) = if status.finished {
        ("■", "Finished", Color::Yellow)
    } else {
        ("▶", "Playing", Color::Green)
    };

    // Format sample rate nicely (e.g., 48000 -> "48.0kHz")
    let sample_rate_khz = sample_rate as f32 / 1000.0;

    let line = Line::from(vec![
        Span::styled(
            format!(" {play_symbol} {play_state_str}  "),
            Style::default().fg(state_color),
        ),
        Span::styled(
            format!("{}  ", elapsed(status.samples_played, sample_rate)),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("{sample_rate_khz:.1}kHz  "),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", audio_stats.peak, audio_stats.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}
