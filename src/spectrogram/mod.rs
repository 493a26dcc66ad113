// Spectrogram module - log-mel spectrogram extraction
//
// Pipeline: STFT magnitude frames -> magnitude^power -> mel filterbank ->
// epsilon floor -> (20 / power) * log10. For power = 2.0 the scaling reduces
// to the conventional 10 * log10 power-to-dB transform.

mod fft;

pub use fft::StftProcessor;

use std::path::Path;

use crate::audio::read_wav;
use crate::config::SpectrogramConfig;
use crate::error::DecodeError;

/// Log-mel spectrogram extractor
///
/// Output depends only on the input samples and the configured parameters;
/// there is no randomness anywhere in the pipeline.
pub struct LogMelSpectrogram {
    stft: StftProcessor,
    /// Mel filterbank, one triangular filter per band
    mel_filters: Vec<Vec<f32>>,
    n_mels: usize,
    power: f32,
}

impl LogMelSpectrogram {
    /// Create an extractor for the given parameters and sample rate
    ///
    /// The filterbank spans 0 Hz to Nyquist with `n_mels` triangular filters
    /// on the mel scale.
    pub fn new(config: &SpectrogramConfig, sample_rate: u32) -> Self {
        let stft = StftProcessor::new(config.n_fft, config.hop_length);
        let mel_filters = mel_filterbank(config.n_fft, config.n_mels, sample_rate);
        Self {
            stft,
            mel_filters,
            n_mels: config.n_mels,
            power: config.power,
        }
    }

    /// Compute the log-mel spectrogram of a single channel
    ///
    /// # Returns
    /// Matrix indexed by `[mel_band][time_frame]`; every entry is finite
    pub fn compute(&self, samples: &[f32]) -> Vec<Vec<f32>> {
        let magnitude_frames = self.stft.magnitude_frames(samples);
        let frame_count = magnitude_frames.len();

        let mut mel = vec![vec![0.0f32; frame_count]; self.n_mels];
        for (t, frame) in magnitude_frames.iter().enumerate() {
            for (band, filter) in self.mel_filters.iter().enumerate() {
                let energy: f32 = filter
                    .iter()
                    .zip(frame.iter())
                    .map(|(f, m)| f * m.powf(self.power))
                    .sum();
                mel[band][t] = energy;
            }
        }

        self.log_scale(&mut mel);
        mel
    }

    /// Floor entries below machine epsilon, then apply the dB-like transform
    fn log_scale(&self, mel: &mut [Vec<f32>]) {
        let scale = 20.0 / self.power;
        for row in mel.iter_mut() {
            for value in row.iter_mut() {
                *value = scale * value.max(f32::EPSILON).log10();
            }
        }
    }
}

/// Decode a waveform file and extract its log-mel spectrogram
///
/// Channels are merged to mono by per-frame average and the audio stays at
/// its native sample rate. Decode failures are reported as a typed error
/// naming the path; they never panic.
pub fn log_mel_from_file(
    path: &Path,
    config: &SpectrogramConfig,
) -> Result<Vec<Vec<f32>>, DecodeError> {
    let wave = read_wav(path)?;
    let extractor = LogMelSpectrogram::new(config, wave.sample_rate());
    Ok(extractor.compute(&wave.to_mono()))
}

/// Hz to mel conversion (HTK formula)
fn hz_to_mel(hz: f32) -> f32 {
    2595.0 * (1.0 + hz / 700.0).log10()
}

/// Mel to Hz conversion
fn mel_to_hz(mel: f32) -> f32 {
    700.0 * (10.0f32.powf(mel / 2595.0) - 1.0)
}

/// Build a triangular mel filterbank over `n_fft / 2 + 1` frequency bins
fn mel_filterbank(n_fft: usize, n_mels: usize, sample_rate: u32) -> Vec<Vec<f32>> {
    let n_freqs = n_fft / 2 + 1;
    let freq_bins: Vec<f32> = (0..n_freqs)
        .map(|i| i as f32 * sample_rate as f32 / n_fft as f32)
        .collect();

    let mel_max = hz_to_mel(sample_rate as f32 / 2.0);
    let mel_points: Vec<f32> = (0..n_mels + 2)
        .map(|i| mel_to_hz(mel_max * i as f32 / (n_mels + 1) as f32))
        .collect();

    let mut filters = vec![vec![0.0; n_freqs]; n_mels];
    for i in 0..n_mels {
        let left = mel_points[i];
        let center = mel_points[i + 1];
        let right = mel_points[i + 2];

        for (j, &freq) in freq_bins.iter().enumerate() {
            if freq >= left && freq <= center && center > left {
                filters[i][j] = (freq - left) / (center - left);
            } else if freq > center && freq <= right && right > center {
                filters[i][j] = (right - freq) / (right - center);
            }
        }
    }

    filters
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor(power: f32) -> LogMelSpectrogram {
        let config = SpectrogramConfig {
            power,
            ..SpectrogramConfig::default()
        };
        LogMelSpectrogram::new(&config, 16_000)
    }

    #[test]
    fn test_all_zero_input_has_no_infinities() {
        let mel = extractor(2.0).compute(&vec![0.0; 4096]);
        assert_eq!(mel.len(), 128);
        for row in &mel {
            for &value in row {
                assert!(value.is_finite(), "expected finite entry, got {}", value);
            }
        }
    }

    #[test]
    fn test_noise_input_is_finite() {
        // Deterministic pseudo-noise, no seed dependence needed here
        let samples: Vec<f32> = (0..8192usize)
            .map(|i| (i.wrapping_mul(2654435761) % 1000) as f32 / 500.0 - 1.0)
            .collect();
        let mel = extractor(2.0).compute(&samples);
        assert!(mel
            .iter()
            .flatten()
            .all(|v| v.is_finite() && !v.is_nan()));
    }

    #[test]
    fn test_power_two_reduces_to_ten_log_ten() {
        // Drive log_scale directly with known values
        let ex = extractor(2.0);
        let mut matrix = vec![vec![1.0f32, 0.1, 0.0]];
        ex.log_scale(&mut matrix);

        assert!((matrix[0][0] - 0.0).abs() < 1e-4);
        assert!((matrix[0][1] - (-10.0)).abs() < 1e-3);
        // Zero entries are floored to epsilon, not -infinity
        assert!(matrix[0][2].is_finite());
        assert!((matrix[0][2] - 10.0 * f32::EPSILON.log10()).abs() < 1e-3);
    }

    #[test]
    fn test_power_one_uses_twenty_log_ten() {
        let ex = extractor(1.0);
        let mut matrix = vec![vec![0.1f32]];
        ex.log_scale(&mut matrix);
        assert!((matrix[0][0] - (-20.0)).abs() < 1e-3);
    }

    #[test]
    fn test_matrix_dimensions_follow_config() {
        let config = SpectrogramConfig::default();
        let ex = LogMelSpectrogram::new(&config, 16_000);
        // 3 full hops past the first window
        let mel = ex.compute(&vec![0.25; 1024 + 3 * 512]);
        assert_eq!(mel.len(), config.n_mels);
        assert!(mel.iter().all(|row| row.len() == 4));
    }

    #[test]
    fn test_filterbank_shape_and_range() {
        let filters = mel_filterbank(1024, 128, 16_000);
        assert_eq!(filters.len(), 128);
        for filter in &filters {
            assert_eq!(filter.len(), 513);
            assert!(filter.iter().all(|&w| (0.0..=1.0).contains(&w)));
        }
        // Filterbank must not be degenerate
        assert!(filters.iter().flatten().any(|&w| w > 0.0));
    }

    #[test]
    fn test_from_file_missing_path_is_typed_error() {
        let result = log_mel_from_file(Path::new("nope.wav"), &SpectrogramConfig::default());
        assert!(matches!(result, Err(DecodeError::Open { .. })));
    }
}
