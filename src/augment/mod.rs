// Augmentation module - the closed set of waveform transformations
//
// Each transform maps (waveform, sample_rate) -> waveform, drawing its
// parameters from a configured range using the caller's random generator.
// Transforms are applied independently to the original waveform and are
// never chained onto each other's output.

mod filters;
mod masking;
mod noise;
mod stretch;

pub use filters::FilterKind;
pub use stretch::time_stretch;

use rand::Rng;

use crate::audio::Waveform;
use crate::error::TransformError;

/// One augmentation with its parameter range.
///
/// A closed enum rather than an open trait: the transform set is fixed and
/// each variant carries its own numeric bounds.
#[derive(Debug, Clone, PartialEq)]
pub enum Transform {
    /// Additive Gaussian noise with amplitude drawn from the range
    AddGaussianNoise { min_amplitude: f32, max_amplitude: f32 },
    /// Zero a frequency band covering a fraction of the spectrum
    FrequencyMask { min_band: f32, max_band: f32 },
    /// Zero a time span covering a fraction of the signal
    TimeMask { min_part: f32, max_part: f32 },
    /// Phase-vocoder stretch by a rate factor (mono only)
    TimeStretch { min_rate: f32, max_rate: f32 },
    /// First-order low-pass with cutoff drawn from the range (Hz)
    LowPassFilter { min_cutoff: f32, max_cutoff: f32 },
    /// First-order high-pass with cutoff drawn from the range (Hz)
    HighPassFilter { min_cutoff: f32, max_cutoff: f32 },
}

impl Transform {
    /// Stable identifier used in output file names
    pub fn name(&self) -> &'static str {
        match self {
            Transform::AddGaussianNoise { .. } => "AddGaussianNoise",
            Transform::FrequencyMask { .. } => "FrequencyMask",
            Transform::TimeMask { .. } => "TimeMask",
            Transform::TimeStretch { .. } => "TimeStretch",
            Transform::LowPassFilter { .. } => "LowPassFilter",
            Transform::HighPassFilter { .. } => "HighPassFilter",
        }
    }

    /// Apply this transform to a waveform.
    ///
    /// Parameter draws come from `rng`, so a seeded generator reproduces the
    /// exact output. Returns `UnsupportedChannelLayout` when the input's
    /// channel configuration cannot be handled (time stretch is mono only).
    pub fn apply<R: Rng>(
        &self,
        wave: &Waveform,
        rng: &mut R,
    ) -> Result<Waveform, TransformError> {
        match *self {
            Transform::AddGaussianNoise {
                min_amplitude,
                max_amplitude,
            } => Ok(noise::add_gaussian_noise(
                wave,
                min_amplitude,
                max_amplitude,
                rng,
            )),
            Transform::FrequencyMask { min_band, max_band } => {
                Ok(masking::frequency_mask(wave, min_band, max_band, rng))
            }
            Transform::TimeMask { min_part, max_part } => {
                Ok(masking::time_mask(wave, min_part, max_part, rng))
            }
            Transform::TimeStretch { min_rate, max_rate } => {
                if wave.channel_count() != 1 {
                    return Err(TransformError::UnsupportedChannelLayout {
                        transform: self.name(),
                        channels: wave.channel_count(),
                    });
                }
                let rate = rng.gen_range(min_rate..=max_rate);
                let stretched = stretch::time_stretch(&wave.channels()[0], rate);
                Ok(Waveform::mono(stretched, wave.sample_rate()))
            }
            Transform::LowPassFilter {
                min_cutoff,
                max_cutoff,
            } => {
                let cutoff = rng.gen_range(min_cutoff..=max_cutoff);
                Ok(filters::apply_filter(wave, FilterKind::LowPass, cutoff))
            }
            Transform::HighPassFilter {
                min_cutoff,
                max_cutoff,
            } => {
                let cutoff = rng.gen_range(min_cutoff..=max_cutoff);
                Ok(filters::apply_filter(wave, FilterKind::HighPass, cutoff))
            }
        }
    }
}

/// A transform plus its application probability and repetition count.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformDescriptor {
    pub transform: Transform,
    /// Probability that the transform is actually applied; on a negative
    /// draw the original waveform passes through unchanged
    pub probability: f64,
    /// Number of independent applications per input file
    pub runs: u32,
}

impl TransformDescriptor {
    pub fn new(transform: Transform, probability: f64, runs: u32) -> Self {
        Self {
            transform,
            probability,
            runs,
        }
    }

    /// Bernoulli-gate and apply the transform.
    pub fn apply<R: Rng>(
        &self,
        wave: &Waveform,
        rng: &mut R,
    ) -> Result<Waveform, TransformError> {
        if !rng.gen_bool(self.probability.clamp(0.0, 1.0)) {
            return Ok(wave.clone());
        }
        self.transform.apply(wave, rng)
    }
}

/// The fixed six-transform list applied by the batch runner, in file-naming
/// order.
pub fn default_transforms() -> Vec<TransformDescriptor> {
    vec![
        TransformDescriptor::new(
            Transform::AddGaussianNoise {
                min_amplitude: 0.001,
                max_amplitude: 0.005,
            },
            1.0,
            1,
        ),
        TransformDescriptor::new(
            Transform::FrequencyMask {
                min_band: 0.34,
                max_band: 0.5,
            },
            1.0,
            1,
        ),
        TransformDescriptor::new(
            Transform::TimeMask {
                min_part: 0.0,
                max_part: 0.01,
            },
            1.0,
            1,
        ),
        TransformDescriptor::new(
            Transform::TimeStretch {
                min_rate: 0.5,
                max_rate: 1.5,
            },
            1.0,
            1,
        ),
        TransformDescriptor::new(
            Transform::LowPassFilter {
                min_cutoff: 150.0,
                max_cutoff: 7500.0,
            },
            1.0,
            1,
        ),
        TransformDescriptor::new(
            Transform::HighPassFilter {
                min_cutoff: 20.0,
                max_cutoff: 2400.0,
            },
            1.0,
            1,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_transform_list_order_and_names() {
        let transforms = default_transforms();
        let names: Vec<&str> = transforms.iter().map(|d| d.transform.name()).collect();
        assert_eq!(
            names,
            [
                "AddGaussianNoise",
                "FrequencyMask",
                "TimeMask",
                "TimeStretch",
                "LowPassFilter",
                "HighPassFilter"
            ]
        );
        assert!(transforms.iter().all(|d| d.probability == 1.0 && d.runs == 1));
    }

    #[test]
    fn test_time_stretch_rejects_multichannel() {
        let wave = Waveform::from_interleaved(&[0.1; 64], 2, 16_000);
        let descriptor = TransformDescriptor::new(
            Transform::TimeStretch {
                min_rate: 0.5,
                max_rate: 1.5,
            },
            1.0,
            1,
        );
        let mut rng = StdRng::seed_from_u64(42);
        let err = descriptor.apply(&wave, &mut rng).unwrap_err();
        assert_eq!(
            err,
            TransformError::UnsupportedChannelLayout {
                transform: "TimeStretch",
                channels: 2,
            }
        );
    }

    #[test]
    fn test_zero_probability_passes_input_through() {
        let wave = Waveform::mono(vec![0.5; 128], 16_000);
        let descriptor = TransformDescriptor::new(
            Transform::TimeMask {
                min_part: 0.5,
                max_part: 0.5,
            },
            0.0,
            1,
        );
        let mut rng = StdRng::seed_from_u64(42);
        let out = descriptor.apply(&wave, &mut rng).unwrap();
        assert_eq!(out, wave);
    }

    #[test]
    fn test_every_supported_transform_preserves_channel_count() {
        let stereo = Waveform::from_interleaved(&[0.25; 512], 2, 16_000);
        let mut rng = StdRng::seed_from_u64(42);
        for descriptor in default_transforms() {
            match descriptor.apply(&stereo, &mut rng) {
                Ok(out) => assert_eq!(out.channel_count(), 2, "{}", descriptor.transform.name()),
                Err(TransformError::UnsupportedChannelLayout { transform, .. }) => {
                    assert_eq!(transform, "TimeStretch");
                }
            }
        }
    }
}
