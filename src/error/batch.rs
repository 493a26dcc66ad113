// Transform and batch error types

use crate::error::ErrorCode;
use std::fmt;
use std::path::PathBuf;

/// Exit codes used by the augmentation CLI
///
/// These constants provide a single source of truth for the process exit
/// status of recoverable-vs-fatal batch outcomes.
pub struct BatchErrorCodes {}

impl BatchErrorCodes {
    /// Input directory contains no waveform files
    pub const NO_INPUT_FILES: i32 = 2;

    /// Output directory could not be created or is not writable
    pub const OUTPUT_DIR_UNWRITABLE: i32 = 3;

    /// Writing an augmented file failed mid-batch
    pub const WRITE_FAILED: i32 = 4;
}

/// Errors raised by a single transform application
///
/// Recoverable at (file, transform) granularity: the runner logs the
/// condition, skips writing that one output file, and continues.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformError {
    /// The transform does not support the input's channel configuration
    UnsupportedChannelLayout {
        transform: &'static str,
        channels: usize,
    },
}

impl ErrorCode for TransformError {
    fn code(&self) -> i32 {
        match self {
            TransformError::UnsupportedChannelLayout { .. } => 201,
        }
    }

    fn message(&self) -> String {
        match self {
            TransformError::UnsupportedChannelLayout {
                transform,
                channels,
            } => {
                format!(
                    "{} does not support {}-channel audio",
                    transform, channels
                )
            }
        }
    }
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for TransformError {}

/// Fatal batch-level errors
///
/// Any of these aborts the whole run; there is no partial-result recovery
/// for filesystem failures.
#[derive(Debug)]
pub enum BatchError {
    /// No `.wav` files were found in the input directory
    NoInputFiles { dir: PathBuf },

    /// The output directory could not be created
    OutputDirUnwritable { dir: PathBuf, reason: String },

    /// Writing one augmented output file failed
    WriteFailed { path: PathBuf, reason: String },
}

impl ErrorCode for BatchError {
    fn code(&self) -> i32 {
        match self {
            BatchError::NoInputFiles { .. } => BatchErrorCodes::NO_INPUT_FILES,
            BatchError::OutputDirUnwritable { .. } => BatchErrorCodes::OUTPUT_DIR_UNWRITABLE,
            BatchError::WriteFailed { .. } => BatchErrorCodes::WRITE_FAILED,
        }
    }

    fn message(&self) -> String {
        match self {
            BatchError::NoInputFiles { dir } => {
                format!("No .wav files found under {}", dir.display())
            }
            BatchError::OutputDirUnwritable { dir, reason } => {
                format!(
                    "Output directory {} is not writable: {}",
                    dir.display(),
                    reason
                )
            }
            BatchError::WriteFailed { path, reason } => {
                format!("Failed to write {}: {}", path.display(), reason)
            }
        }
    }
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for BatchError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_error_codes() {
        assert_eq!(
            BatchError::NoInputFiles {
                dir: PathBuf::from("empty")
            }
            .code(),
            BatchErrorCodes::NO_INPUT_FILES
        );
        assert_eq!(
            BatchError::OutputDirUnwritable {
                dir: PathBuf::from("out"),
                reason: "read-only".to_string()
            }
            .code(),
            BatchErrorCodes::OUTPUT_DIR_UNWRITABLE
        );
        assert_eq!(
            BatchError::WriteFailed {
                path: PathBuf::from("out/a_TimeMask.wav"),
                reason: "disk full".to_string()
            }
            .code(),
            BatchErrorCodes::WRITE_FAILED
        );
    }

    #[test]
    fn test_unsupported_channel_layout_message() {
        let err = TransformError::UnsupportedChannelLayout {
            transform: "TimeStretch",
            channels: 2,
        };
        assert_eq!(err.code(), 201);
        assert_eq!(err.message(), "TimeStretch does not support 2-channel audio");
    }
}
