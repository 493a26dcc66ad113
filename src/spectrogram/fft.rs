// STFT module - short-time Fourier analysis
//
// This module segments a waveform into overlapping Hann-windowed frames and
// computes the magnitude spectrum of each. Only positive frequencies are
// kept (exploiting the symmetry of real-valued FFT).

use rustfft::{num_complex::Complex, FftPlanner};
use std::sync::{Arc, Mutex};

/// STFT processor that computes per-frame magnitude spectra
pub struct StftProcessor {
    fft_planner: Arc<Mutex<FftPlanner<f32>>>,
    n_fft: usize,
    hop_length: usize,
    /// Hann window (pre-computed)
    window: Vec<f32>,
}

impl StftProcessor {
    /// Create a new STFT processor
    ///
    /// # Arguments
    /// * `n_fft` - FFT window size in samples
    /// * `hop_length` - Advance between successive frames
    pub fn new(n_fft: usize, hop_length: usize) -> Self {
        // Pre-compute Hann window to reduce spectral leakage
        let window = (0..n_fft)
            .map(|i| {
                0.5 * (1.0 - ((2.0 * std::f32::consts::PI * i as f32) / n_fft as f32).cos())
            })
            .collect();

        Self {
            fft_planner: Arc::new(Mutex::new(FftPlanner::new())),
            n_fft,
            hop_length,
            window,
        }
    }

    /// Number of frequency bins per frame (`n_fft / 2 + 1`)
    pub fn bin_count(&self) -> usize {
        self.n_fft / 2 + 1
    }

    /// Number of frames produced for an input of the given length
    pub fn frame_count(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        len.saturating_sub(self.n_fft) / self.hop_length + 1
    }

    /// Compute magnitude spectra for every frame of the input
    ///
    /// Frames shorter than `n_fft` at the tail are zero-padded.
    ///
    /// # Returns
    /// One magnitude spectrum (size `n_fft / 2 + 1`) per frame
    pub fn magnitude_frames(&self, samples: &[f32]) -> Vec<Vec<f32>> {
        let mut planner = self.fft_planner.lock().unwrap();
        let fft = planner.plan_fft_forward(self.n_fft);

        let mut frames = Vec::with_capacity(self.frame_count(samples.len()));
        for i in 0..self.frame_count(samples.len()) {
            let start = i * self.hop_length;
            let mut buffer: Vec<Complex<f32>> = (0..self.n_fft)
                .map(|j| {
                    let sample = samples.get(start + j).copied().unwrap_or(0.0);
                    Complex::new(sample * self.window[j], 0.0)
                })
                .collect();

            fft.process(&mut buffer);

            frames.push(buffer[..self.bin_count()].iter().map(|c| c.norm()).collect());
        }

        frames
    }
}
