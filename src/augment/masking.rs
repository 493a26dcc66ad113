// Frequency and time masking
//
// Frequency masking zeroes a contiguous band of full-signal FFT bins (and
// their conjugate mirrors, keeping the signal real). Time masking zeroes a
// contiguous span of samples. Both draw their band once per call and apply
// the same region to every channel.

use rand::Rng;
use rustfft::{num_complex::Complex, FftPlanner};

use crate::audio::Waveform;

/// Mask a random frequency band in every channel.
///
/// The masked band covers a fraction of the spectrum drawn from
/// `[min_band, max_band]`, starting at a uniformly drawn offset such that
/// the band fits below Nyquist.
pub fn frequency_mask<R: Rng>(
    wave: &Waveform,
    min_band: f32,
    max_band: f32,
    rng: &mut R,
) -> Waveform {
    let band = rng.gen_range(min_band..=max_band).clamp(0.0, 1.0);
    let start = rng.gen_range(0.0..=(1.0 - band).max(0.0));

    let n = wave.len();
    if n == 0 || band <= 0.0 {
        return wave.clone();
    }

    // Positive-frequency bin range to zero
    let half = n / 2;
    let bin_start = (start * half as f32) as usize;
    let bin_end = ((start + band) * half as f32).ceil() as usize;

    let mut planner = FftPlanner::new();
    let forward = planner.plan_fft_forward(n);
    let inverse = planner.plan_fft_inverse(n);

    let channels = wave
        .channels()
        .iter()
        .map(|channel| {
            let mut spectrum: Vec<Complex<f32>> =
                channel.iter().map(|&s| Complex::new(s, 0.0)).collect();
            forward.process(&mut spectrum);

            for bin in bin_start..bin_end.min(half + 1) {
                spectrum[bin] = Complex::new(0.0, 0.0);
                if bin > 0 && bin < n {
                    // Conjugate mirror keeps the inverse transform real
                    spectrum[n - bin] = Complex::new(0.0, 0.0);
                }
            }

            inverse.process(&mut spectrum);
            spectrum.iter().map(|c| c.re / n as f32).collect()
        })
        .collect();

    wave.with_channels(channels)
}

/// Zero a random span of samples in every channel.
///
/// The span length is a fraction of the total drawn from
/// `[min_part, max_part]`; its start offset is uniform over the positions
/// where the span still fits.
pub fn time_mask<R: Rng>(wave: &Waveform, min_part: f32, max_part: f32, rng: &mut R) -> Waveform {
    let n = wave.len();
    let part = rng.gen_range(min_part..=max_part).clamp(0.0, 1.0);
    let mask_len = (n as f32 * part) as usize;
    if mask_len == 0 {
        return wave.clone();
    }
    let start = rng.gen_range(0..=n - mask_len);

    let mut masked = wave.clone();
    for channel in masked.channels_mut() {
        for sample in &mut channel[start..start + mask_len] {
            *sample = 0.0;
        }
    }
    masked
}
