//! Text plots of PCM data, for terminals and READMEs.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    symbols,
    widgets::{Axis, Chart, Dataset, GraphType, Widget},
};

use crate::dsp::sample::{decode_all, MAX_AMPLITUDE, SAMPLE_BYTES};
use crate::error::{Error, Result};
use crate::graph::stream::{read_full, SampleStream};

/// Data points on the X axis.
pub const WIDTH: usize = 92;
/// Rows of the chart, caption excluded.
pub const HEIGHT: u16 = 15;

const Y_LABELS: [&str; 3] = ["-32767", "0", "32767"];

/// Samples averaged into one data point for a zoom `scale`
/// (0.25 → every point covers 4 samples).
fn samples_per_point(scale: f64) -> Result<usize> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(Error::invalid(
            "scale",
            format!("must be a positive zoom factor, got {scale}"),
        ));
    }
    let per_point = (1.0 / scale).round();
    if per_point < 1.0 {
        return Err(Error::invalid(
            "scale",
            format!("{scale} leaves less than one sample per point"),
        ));
    }
    Ok(per_point as usize)
}

/// Plot raw little-endian i16 bytes.
///
/// At most [`WIDTH`] points are drawn; bytes past that are ignored, as is a
/// trailing group too short to make a whole point.
pub fn plot(bytes: &[u8], caption: &str, scale: f64) -> Result<String> {
    let per_point = samples_per_point(scale)?;
    let samples = decode_all(&bytes[..bytes.len().min(WIDTH * per_point * SAMPLE_BYTES)]);

    let data: Vec<(f64, f64)> = samples
        .chunks_exact(per_point)
        .enumerate()
        .map(|(x, point)| {
            let sum: f64 = point.iter().map(|&v| v as f64).sum();
            (x as f64, sum / per_point as f64)
        })
        .collect();

    Ok(render(&data, &format!("{caption}. Scale {scale:.2}x")))
}

/// Pull enough of `stream` for one plot and draw it.
pub fn plot_stream<S: SampleStream + ?Sized>(
    stream: &mut S,
    caption: &str,
    scale: f64,
) -> Result<String> {
    let per_point = samples_per_point(scale)?;
    let mut buf = vec![0u8; WIDTH * per_point * SAMPLE_BYTES];
    let r = read_full(stream, &mut buf)?;
    plot(&buf[..r.bytes], caption, scale)
}

fn render(data: &[(f64, f64)], caption: &str) -> String {
    let label_width = Y_LABELS.iter().map(|l| l.len()).max().unwrap_or(0);
    // Labels, the axis line, then one column per point
    let width = (label_width + 1 + WIDTH) as u16;
    let area = Rect::new(0, 0, width, HEIGHT);
    let mut buf = Buffer::empty(area);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .data(data);

    let max = MAX_AMPLITUDE as f64;
    Chart::new(vec![dataset])
        .x_axis(Axis::default().bounds([0.0, (WIDTH - 1) as f64]))
        .y_axis(Axis::default().bounds([-max, max]).labels(Y_LABELS.to_vec()))
        .render(area, &mut buf);

    let mut out = String::new();
    for y in 0..HEIGHT {
        let row: String = (0..width)
            .map(|x| buf.cell((x, y)).map_or(" ", |cell| cell.symbol()))
            .collect();
        out.push_str(row.trim_end());
        out.push('\n');
    }
    out.push_str(format!("{caption:^w$}", w = width as usize).trim_end());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::sample::encode_all;
    use crate::graph::{Oscillator, Silence};
    use std::time::Duration;

    fn is_braille(c: char) -> bool {
        ('\u{2800}'..='\u{28ff}').contains(&c)
    }

    fn rows_with_points(plot: &str) -> Vec<usize> {
        plot.lines()
            .take(HEIGHT as usize)
            .enumerate()
            .filter(|(_, row)| row.chars().any(|c| is_braille(c) && c != '\u{2800}'))
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn caption_line_carries_the_scale() {
        let out = plot_stream(&mut Silence::samples(200), "rest", 0.5).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), HEIGHT as usize + 1);
        assert_eq!(lines.last().unwrap().trim(), "rest. Scale 0.50x");
    }

    #[test]
    fn silence_is_a_flat_line() {
        let out = plot_stream(&mut Silence::samples(500), "flat", 1.0).unwrap();
        assert_eq!(rows_with_points(&out).len(), 1, "{out}");
    }

    #[test]
    fn square_reaches_both_rails() {
        let mut osc = Oscillator::square(44_100, 2_000.0, Duration::from_millis(5)).unwrap();
        let out = plot_stream(&mut osc, "square", 1.0).unwrap();
        let rows = rows_with_points(&out);
        assert_eq!(rows.first(), Some(&0), "{out}");
        assert_eq!(rows.last(), Some(&(HEIGHT as usize - 1)), "{out}");
    }

    #[test]
    fn points_average_their_samples() {
        // Pairs average to zero at scale 0.5, so the plot is flat
        let bytes = encode_all(&[32767, -32767].repeat(WIDTH));
        let out = plot(&bytes, "avg", 0.5).unwrap();
        assert_eq!(rows_with_points(&out).len(), 1, "{out}");
    }

    #[test]
    fn short_input_still_plots() {
        let out = plot(&encode_all(&[0, 0, 0]), "short", 1.0).unwrap();
        assert!(out.ends_with("short. Scale 1.00x"));
    }

    #[test]
    fn bad_scales_are_rejected() {
        for scale in [0.0, -1.0, f64::NAN, f64::INFINITY, 3.0] {
            assert!(
                matches!(
                    plot(&[], "x", scale),
                    Err(Error::InvalidParameter { name: "scale", .. })
                ),
                "scale {scale} should be rejected"
            );
        }
    }
}
