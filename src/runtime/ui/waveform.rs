//! Waveform oscilloscope widget

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// Map samples to chart points: x in [0, 1), y as-is.
pub(super) fn points(audio_buffer: &[f32]) -> Vec<(f64, f64)> {
    audio_buffer
        .iter()
        .enumerate()
        .map(|(i, &sample)| (i as f64 / audio_buffer.len() as f64, sample as f64))
        .collect()
}

/// Render the waveform oscilloscope
pub fn render_waveform(frame: &mut Frame, area: Rect, audio_buffer: &[f32]) {
    let block = Block::default().title(" Waveform ").borders(Borders::ALL);
    let data = points(audio_buffer);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-1.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_span_the_unit_interval() {
        let p = points(&[0.0, 0.5, -0.5, 1.0]);
        assert_eq!(p.len(), 4);
        assert_eq!(p[0], (0.0, 0.0));
        assert_eq!(p[2], (0.5, -0.5));
        assert!(p.iter().all(|&(x, _)| (0.0..1.0).contains(&x)));
    }
}
