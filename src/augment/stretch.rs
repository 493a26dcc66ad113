// Phase-vocoder time stretching
//
// Stretches a mono signal by a rate factor without shifting pitch: STFT
// analysis, per-bin phase accumulation at the resampled frame positions,
// then windowed overlap-add resynthesis. Output length is trimmed/padded to
// round(input_len / rate).

use rustfft::{num_complex::Complex, FftPlanner};
use std::f32::consts::PI;

/// Analysis window size for the vocoder
const N_FFT: usize = 2048;
/// Analysis and synthesis hop
const HOP: usize = 512;

/// Time-stretch a mono signal by `rate` (>1.0 speeds up, <1.0 slows down).
pub fn time_stretch(samples: &[f32], rate: f32) -> Vec<f32> {
    let rate = rate.max(0.05);
    if samples.is_empty() {
        return Vec::new();
    }
    let target_len = (samples.len() as f32 / rate).round().max(1.0) as usize;
    if (rate - 1.0).abs() < 1e-6 {
        return samples.to_vec();
    }
    // Too short for windowed analysis, fall back to sample interpolation
    if samples.len() < N_FFT * 2 {
        return linear_stretch(samples, target_len);
    }

    let window: Vec<f32> = (0..N_FFT)
        .map(|i| 0.5 * (1.0 - ((2.0 * PI * i as f32) / N_FFT as f32).cos()))
        .collect();

    let mut planner = FftPlanner::new();
    let forward = planner.plan_fft_forward(N_FFT);
    let inverse = planner.plan_fft_inverse(N_FFT);

    // Analysis frames (full complex spectra)
    let frame_count = (samples.len() - N_FFT) / HOP + 1;
    let mut frames: Vec<Vec<Complex<f32>>> = Vec::with_capacity(frame_count);
    for i in 0..frame_count {
        let start = i * HOP;
        let mut buffer: Vec<Complex<f32>> = (0..N_FFT)
            .map(|j| Complex::new(samples[start + j] * window[j], 0.0))
            .collect();
        forward.process(&mut buffer);
        frames.push(buffer);
    }

    // Expected per-hop phase advance for each bin. For bins above Nyquist
    // this differs from the aliased negative frequency by a multiple of 2*pi,
    // so the wrapped deviation below stays correct.
    let expected: Vec<f32> = (0..N_FFT)
        .map(|k| 2.0 * PI * k as f32 * HOP as f32 / N_FFT as f32)
        .collect();

    let mut phase_acc: Vec<f32> = frames[0].iter().map(|c| c.arg()).collect();
    let mut out_frames: Vec<Vec<Complex<f32>>> = Vec::new();

    let mut t = 0.0f32;
    while (t as usize) < frames.len() {
        let i = t as usize;
        let next = (i + 1).min(frames.len() - 1);
        let frac = t - i as f32;

        let frame: Vec<Complex<f32>> = (0..N_FFT)
            .map(|k| {
                let mag = (1.0 - frac) * frames[i][k].norm() + frac * frames[next][k].norm();
                Complex::from_polar(mag, phase_acc[k])
            })
            .collect();
        out_frames.push(frame);

        for k in 0..N_FFT {
            let deviation = wrap_phase(frames[next][k].arg() - frames[i][k].arg() - expected[k]);
            phase_acc[k] = wrap_phase(phase_acc[k] + expected[k] + deviation);
        }

        t += rate;
    }

    if out_frames.is_empty() {
        return linear_stretch(samples, target_len);
    }

    // Overlap-add resynthesis with squared-window normalization
    let out_len = (out_frames.len() - 1) * HOP + N_FFT;
    let mut signal = vec![0.0f32; out_len];
    let mut weight = vec![0.0f32; out_len];
    for (idx, mut frame) in out_frames.into_iter().enumerate() {
        inverse.process(&mut frame);
        let start = idx * HOP;
        for j in 0..N_FFT {
            signal[start + j] += frame[j].re / N_FFT as f32 * window[j];
            weight[start + j] += window[j] * window[j];
        }
    }
    for (sample, &w) in signal.iter_mut().zip(weight.iter()) {
        if w > 1e-8 {
            *sample /= w;
        }
    }

    signal.resize(target_len, 0.0);
    signal
}

/// Nearest-sample linear interpolation stretch for very short inputs.
fn linear_stretch(samples: &[f32], target_len: usize) -> Vec<f32> {
    if samples.len() < 2 {
        return vec![samples.first().copied().unwrap_or(0.0); target_len];
    }
    let step = (samples.len() - 1) as f32 / (target_len.max(2) - 1) as f32;
    (0..target_len)
        .map(|i| {
            let pos = i as f32 * step;
            let idx = (pos as usize).min(samples.len() - 2);
            let frac = pos - idx as f32;
            samples[idx] * (1.0 - frac) + samples[idx + 1] * frac
        })
        .collect()
}

/// Wrap a phase value into (-pi, pi]
fn wrap_phase(phase: f32) -> f32 {
    phase - 2.0 * PI * (phase / (2.0 * PI)).round()
}
