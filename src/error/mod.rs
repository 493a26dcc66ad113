// Error types for the augmentation and spectrogram pipeline
//
// This module defines custom error types for decode, transform, and batch
// operations, providing structured error handling with numeric codes that
// double as process exit codes for the CLI.

mod audio;
mod batch;

pub use audio::{log_decode_error, DecodeError};
pub use batch::{BatchError, BatchErrorCodes, TransformError};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, enabling consistent exit-status mapping in
/// the CLI binaries.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
