// First-order low-pass / high-pass filters
//
// Butterworth first-order sections discretized with the bilinear transform.
// Filter state is reset per channel so channels stay independent.

use std::f32::consts::PI;

use crate::audio::Waveform;

/// Filter response kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    LowPass,
    HighPass,
}

/// First-order IIR section: y[n] = b0*x[n] + b1*x[n-1] - a1*y[n-1]
struct FirstOrderSection {
    b0: f32,
    b1: f32,
    a1: f32,
    x1: f32,
    y1: f32,
}

impl FirstOrderSection {
    fn new(kind: FilterKind, cutoff_hz: f32, sample_rate: u32) -> Self {
        // Pre-warped analog prototype, clamped inside (0, Nyquist)
        let nyquist = sample_rate as f32 / 2.0;
        let cutoff = cutoff_hz.clamp(1.0, nyquist * 0.999);
        let c = (PI * cutoff / sample_rate as f32).tan();

        let (b0, b1) = match kind {
            FilterKind::LowPass => (c / (1.0 + c), c / (1.0 + c)),
            FilterKind::HighPass => (1.0 / (1.0 + c), -1.0 / (1.0 + c)),
        };
        let a1 = (c - 1.0) / (1.0 + c);

        Self {
            b0,
            b1,
            a1,
            x1: 0.0,
            y1: 0.0,
        }
    }

    fn process(&mut self, x: f32) -> f32 {
        let y = self.b0 * x + self.b1 * self.x1 - self.a1 * self.y1;
        self.x1 = x;
        self.y1 = y;
        y
    }
}

/// Apply a first-order filter with the given cutoff to every channel.
pub fn apply_filter(wave: &Waveform, kind: FilterKind, cutoff_hz: f32) -> Waveform {
    let channels = wave
        .channels()
        .iter()
        .map(|channel| {
            let mut section = FirstOrderSection::new(kind, cutoff_hz, wave.sample_rate());
            channel.iter().map(|&sample| section.process(sample)).collect()
        })
        .collect();

    wave.with_channels(channels)
}
