//! Batch augmentation runner.
//!
//! Discovers waveform files in an input directory, applies the fixed
//! transform list to each, and writes one output file per (input, transform)
//! pair. Processing is fully sequential: each file is decoded, transformed,
//! and encoded before the next one starts. The only state crossing file
//! boundaries is the run-scoped random generator, seeded exactly once so
//! repeated runs reproduce identical output bytes.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::audio::{read_wav, write_wav};
use crate::augment::{default_transforms, TransformDescriptor};
use crate::error::{log_decode_error, BatchError, ErrorCode};

/// Default seed for the run generator
pub const DEFAULT_SEED: u64 = 42;

/// Outcome counts for one batch run
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    /// Input files discovered
    pub files_found: usize,
    /// Augmented files written
    pub files_written: usize,
    /// (file, transform) pairs skipped for unsupported channel layouts
    pub skipped_unsupported: usize,
    /// Decode failure messages, one per unreadable input file
    pub decode_failures: Vec<String>,
}

/// Sequential augmentation batch runner
pub struct BatchRunner {
    transforms: Vec<TransformDescriptor>,
    seed: u64,
}

impl BatchRunner {
    /// Create a runner over the fixed six-transform list
    pub fn new(seed: u64) -> Self {
        Self {
            transforms: default_transforms(),
            seed,
        }
    }

    /// Replace the transform list (primarily for tests)
    pub fn with_transforms(mut self, transforms: Vec<TransformDescriptor>) -> Self {
        self.transforms = transforms;
        self
    }

    /// Run the batch: one output file per (input, transform, run) triple.
    ///
    /// Decode failures and unsupported channel layouts are logged and
    /// skipped at single-file / single-transform granularity. Filesystem
    /// failures on the output side abort the whole batch.
    pub fn run(&self, input_dir: &Path, output_dir: &Path) -> Result<BatchSummary, BatchError> {
        fs::create_dir_all(output_dir).map_err(|err| BatchError::OutputDirUnwritable {
            dir: output_dir.to_path_buf(),
            reason: err.to_string(),
        })?;

        let inputs = discover_wav_files(input_dir);
        if inputs.is_empty() {
            return Err(BatchError::NoInputFiles {
                dir: input_dir.to_path_buf(),
            });
        }

        // Seeded once before the first transform application; every
        // parameter draw for the whole batch flows from this generator.
        let mut rng = StdRng::seed_from_u64(self.seed);

        let mut summary = BatchSummary {
            files_found: inputs.len(),
            files_written: 0,
            skipped_unsupported: 0,
            decode_failures: Vec::new(),
        };

        for path in &inputs {
            let wave = match read_wav(path) {
                Ok(wave) => wave,
                Err(err) => {
                    log_decode_error(&err, "batch input");
                    summary.decode_failures.push(err.message());
                    continue;
                }
            };

            info!(
                "Transforming {} ({} channels, {} samples @ {} Hz)",
                path.display(),
                wave.channel_count(),
                wave.len(),
                wave.sample_rate()
            );

            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default();

            for descriptor in &self.transforms {
                for _ in 0..descriptor.runs {
                    let out_path =
                        output_dir.join(format!("{}_{}.wav", stem, descriptor.transform.name()));

                    match descriptor.apply(&wave, &mut rng) {
                        Ok(augmented) => {
                            write_wav(&out_path, &augmented).map_err(|err| {
                                BatchError::WriteFailed {
                                    path: out_path.clone(),
                                    reason: err.to_string(),
                                }
                            })?;
                            summary.files_written += 1;
                        }
                        Err(err) => {
                            warn!("Skipping {}: {}", out_path.display(), err.message());
                            summary.skipped_unsupported += 1;
                        }
                    }
                }
            }
        }

        info!(
            "Batch complete: {} written, {} skipped, {} decode failures",
            summary.files_written,
            summary.skipped_unsupported,
            summary.decode_failures.len()
        );
        Ok(summary)
    }
}

impl Default for BatchRunner {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

/// List `.wav` files in a directory, sorted by name for reproducible order.
fn discover_wav_files(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            warn!("Failed to read input directory {}: {}", dir.display(), err);
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file() && path.extension().and_then(|ext| ext.to_str()) == Some("wav")
        })
        .collect();
    files.sort();
    files
}
