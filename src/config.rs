//! Configuration for spectrogram extraction and batch augmentation
//!
//! This module provides runtime configuration loading from JSON files so
//! extraction parameters and the batch seed can be adjusted without
//! recompilation. Missing or invalid files fall back to defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub spectrogram: SpectrogramConfig,
    pub batch: BatchConfig,
}

/// Log-mel spectrogram extraction parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpectrogramConfig {
    /// FFT window size in samples
    pub n_fft: usize,
    /// Hop length between successive frames
    pub hop_length: usize,
    /// Number of mel bands
    pub n_mels: usize,
    /// Exponent applied to the magnitude spectrum (2.0 = power spectrum)
    pub power: f32,
}

impl Default for SpectrogramConfig {
    fn default() -> Self {
        Self {
            n_fft: 1024,
            hop_length: 512,
            n_mels: 128,
            power: 2.0,
        }
    }
}

/// Batch augmentation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Seed for the run-scoped random generator; identical seeds reproduce
    /// identical output files
    pub seed: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            spectrogram: SpectrogramConfig::default(),
            batch: BatchConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// Loaded configuration, or defaults (with a logged warning) if the file
    /// is missing or invalid
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.spectrogram.n_fft, 1024);
        assert_eq!(config.spectrogram.hop_length, 512);
        assert_eq!(config.spectrogram.n_mels, 128);
        assert_eq!(config.spectrogram.power, 2.0);
        assert_eq!(config.batch.seed, 42);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = AppConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.spectrogram.n_fft, config.spectrogram.n_fft);
        assert_eq!(parsed.batch.seed, config.batch.seed);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = AppConfig::load_from_file("no/such/config.json");
        assert_eq!(config.batch.seed, 42);
    }
}
