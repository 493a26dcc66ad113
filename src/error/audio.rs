// Decode error types

use crate::error::ErrorCode;
use log::error;
use std::fmt;
use std::path::PathBuf;

/// Errors raised while decoding a waveform file
///
/// Decode failures are recoverable at single-file granularity: the batch
/// runner logs them and continues with the remaining files. Callers that
/// need the waveform receive the typed error instead of a silent empty
/// result, so "no audio" and "decode failed" stay distinguishable.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// File is missing, unreadable, or not a parseable WAV container
    Open { path: PathBuf, reason: String },

    /// Container parsed but the sample encoding is not supported
    UnsupportedFormat { path: PathBuf, bits_per_sample: u16 },

    /// Sample data ended early or failed to read
    Malformed { path: PathBuf, reason: String },
}

impl DecodeError {
    /// Path of the file that failed to decode
    pub fn path(&self) -> &PathBuf {
        match self {
            DecodeError::Open { path, .. }
            | DecodeError::UnsupportedFormat { path, .. }
            | DecodeError::Malformed { path, .. } => path,
        }
    }
}

impl ErrorCode for DecodeError {
    fn code(&self) -> i32 {
        match self {
            DecodeError::Open { .. } => 101,
            DecodeError::UnsupportedFormat { .. } => 102,
            DecodeError::Malformed { .. } => 103,
        }
    }

    fn message(&self) -> String {
        match self {
            DecodeError::Open { path, reason } => {
                format!("Failed to open {}: {}", path.display(), reason)
            }
            DecodeError::UnsupportedFormat {
                path,
                bits_per_sample,
            } => {
                format!(
                    "Unsupported bits per sample {} in {}",
                    bits_per_sample,
                    path.display()
                )
            }
            DecodeError::Malformed { path, reason } => {
                format!("Malformed sample data in {}: {}", path.display(), reason)
            }
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for DecodeError {}

/// Log a decode error with the pipeline stage it occurred in
pub fn log_decode_error(err: &DecodeError, context: &str) {
    error!(
        "Decode error in {}: code={}, path={}, message={}",
        context,
        err.code(),
        err.path().display(),
        err.message()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_codes() {
        let err = DecodeError::Open {
            path: PathBuf::from("missing.wav"),
            reason: "not found".to_string(),
        };
        assert_eq!(err.code(), 101);

        let err = DecodeError::UnsupportedFormat {
            path: PathBuf::from("odd.wav"),
            bits_per_sample: 12,
        };
        assert_eq!(err.code(), 102);

        let err = DecodeError::Malformed {
            path: PathBuf::from("truncated.wav"),
            reason: "early EOF".to_string(),
        };
        assert_eq!(err.code(), 103);
    }

    #[test]
    fn test_decode_error_names_path() {
        let err = DecodeError::Open {
            path: PathBuf::from("clips/fan_id_00.wav"),
            reason: "permission denied".to_string(),
        };
        assert!(err.message().contains("fan_id_00.wav"));
        assert!(err.message().contains("permission denied"));
        assert_eq!(err.path(), &PathBuf::from("clips/fan_id_00.wav"));
    }
}
