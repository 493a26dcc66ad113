// soundaug - Deterministic audio augmentation and log-mel spectrogram extraction
// Batch processing core for anomaly-detection sound datasets

// Module declarations
pub mod audio;
pub mod augment;
pub mod batch;
pub mod config;
pub mod error;
pub mod spectrogram;

// Re-exports for convenience
pub use audio::Waveform;
pub use augment::{default_transforms, Transform, TransformDescriptor};
pub use batch::{BatchRunner, BatchSummary, DEFAULT_SEED};
pub use config::{AppConfig, BatchConfig, SpectrogramConfig};
pub use error::{BatchError, DecodeError, ErrorCode, TransformError};
pub use spectrogram::{log_mel_from_file, LogMelSpectrogram};
