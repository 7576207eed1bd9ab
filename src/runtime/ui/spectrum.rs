//! Spectrum analyzer widget
//!
//! FFT-based frequency spectrum visualization with log-spaced bins.

use std::sync::Arc;

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};

/// Number of frequency bins to display
const SPECTRUM_BINS: usize = 48;
/// Floor for empty bins, in dB
const FLOOR_DB: f64 = -120.0;

/// Spectrum analyzer with FFT processing
pub struct SpectrumAnalyzer {
    /// Hann window coefficients
    window: Vec<f32>,
    /// Frequency values for each bin (Hz)
    freq_bins: Vec<f64>,
    /// FFT bin indices corresponding to each frequency
    bin_indices: Vec<usize>,
    fft: Arc<dyn Fft<f32>>,
    /// Scratch buffer for FFT computation
    scratch: Vec<Complex<f32>>,
    /// Current spectrum data: (frequency_hz, magnitude_db)
    spectrum: Vec<(f64, f64)>,
}

impl SpectrumAnalyzer {
    /// `buffer_len` is the FFT size and must match the buffers passed to
    /// [`update`](Self::update).
    pub fn new(buffer_len: usize, sample_rate: f32) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(buffer_len);

        // Hann window - reduces spectral leakage
        let window: Vec<f32> = (0..buffer_len)
            .map(|i| {
                if buffer_len > 1 {
                    let denom = (buffer_len - 1) as f32;
                    0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / denom).cos())
                } else {
                    1.0
                }
            })
            .collect();

        // Log-spaced frequency bins (20 Hz to Nyquist)
        let max_freq = (sample_rate / 2.0).min(20_000.0).max(1.0) as f64;
        let min_freq = 20.0f64.min(max_freq);
        let ratio = max_freq / min_freq;
        let half = (buffer_len / 2).max(1);

        let (freq_bins, bin_indices): (Vec<f64>, Vec<usize>) = (0..SPECTRUM_BINS)
            .map(|i| {
                let t = i as f64 / (SPECTRUM_BINS - 1) as f64;
                let freq = min_freq * ratio.powf(t);
                let index = (freq * buffer_len as f64 / sample_rate as f64).round() as usize;
                (freq, index.min(half - 1))
            })
            .unzip();

        let spectrum = freq_bins.iter().map(|&f| (f, FLOOR_DB)).collect();

        Self {
            window,
            freq_bins,
            bin_indices,
            fft,
            scratch: vec![Complex::new(0.0, 0.0); buffer_len],
            spectrum,
        }
    }

    /// Recompute the spectrum; buffers of the wrong length are ignored.
    pub fn update(&mut self, buffer: &[f32]) {
        if buffer.len() != self.window.len() || buffer.is_empty() {
            return;
        }

        // Apply window and prepare for FFT
        for ((slot, &sample), &w) in self.scratch.iter_mut().zip(buffer).zip(&self.window) {
            *slot = Complex::new(sample * w, 0.0);
        }

        self.fft.process(&mut self.scratch);

        // Extract magnitudes at log-spaced frequencies
        for ((point, &freq), &index) in self
            .spectrum
            .iter_mut()
            .zip(&self.freq_bins)
            .zip(&self.bin_indices)
        {
            let bin = self.scratch[index];
            let power = (bin.re * bin.re + bin.im * bin.im).max(1e-12);
            *point = (freq, 10.0 * (power as f64).log10());
        }
    }

    /// Get the current spectrum data
    pub fn data(&self) -> &[(f64, f64)] {
        &self.spectrum
    }

    /// Frequency of the loudest displayed bin.
    pub fn peak_frequency(&self) -> Option<f64> {
        self.spectrum
            .iter()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|&(f, _)| f)
    }
}

/// Render the spectrum analyzer widget
pub fn render_spectrum(frame: &mut Frame, area: Rect, spectrum: &[(f64, f64)]) {
    let block = Block::default().title(" Spectrum ").borders(Borders::ALL);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(spectrum);

    let max_freq = spectrum
        .iter()
        .map(|(f, _)| *f)
        .fold(0.0, f64::max)
        .max(1.0);
    let max_db = spectrum.iter().map(|(_, db)| *db).fold(-100.0, f64::max);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, max_freq])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-100.0, max_db.max(0.0) + 10.0])
                .labels(vec!["-100", "-60", "-20", "0"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
