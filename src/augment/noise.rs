// Additive Gaussian noise

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::audio::Waveform;

/// Add zero-mean Gaussian noise to every channel.
///
/// The noise amplitude (standard deviation) is drawn once per call from
/// `[min_amplitude, max_amplitude]`; per-sample draws then come from the
/// shared run generator, so a fixed seed reproduces the exact noise floor.
pub fn add_gaussian_noise<R: Rng>(
    wave: &Waveform,
    min_amplitude: f32,
    max_amplitude: f32,
    rng: &mut R,
) -> Waveform {
    let amplitude = rng.gen_range(min_amplitude..=max_amplitude);
    // std dev is strictly positive and finite here, Normal::new cannot fail
    let normal = Normal::new(0.0f32, amplitude.max(f32::MIN_POSITIVE)).unwrap();

    let channels = wave
        .channels()
        .iter()
        .map(|channel| {
            channel
                .iter()
                .map(|&sample| sample + normal.sample(rng))
                .collect()
        })
        .collect();

    wave.with_channels(channels)
}
