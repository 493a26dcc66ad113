// Waveform type - channel-major sample buffers with explicit layout
//
// The channel count comes from the container header, never from a matrix
// shape heuristic, so the layout is metadata rather than an inference.

/// A decoded waveform: one `Vec<f32>` per channel plus a sample rate.
///
/// Invariant: every channel holds the same number of samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    channels: Vec<Vec<f32>>,
    sample_rate: u32,
}

impl Waveform {
    /// Build a mono waveform from a single sample buffer.
    pub fn mono(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            channels: vec![samples],
            sample_rate,
        }
    }

    /// Build a waveform from interleaved frames as stored on disk.
    ///
    /// Frames are deinterleaved into channel-major buffers. A trailing
    /// partial frame is dropped.
    pub fn from_interleaved(samples: &[f32], channel_count: usize, sample_rate: u32) -> Self {
        let channel_count = channel_count.max(1);
        let frames = samples.len() / channel_count;
        let mut channels: Vec<Vec<f32>> = (0..channel_count)
            .map(|_| Vec::with_capacity(frames))
            .collect();
        for frame in samples.chunks_exact(channel_count) {
            for (channel, &sample) in channels.iter_mut().zip(frame.iter()) {
                channel.push(sample);
            }
        }
        Self {
            channels,
            sample_rate,
        }
    }

    /// Number of channels.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Samples per channel.
    pub fn len(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// True when no channel holds any samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Channel-major sample buffers.
    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    /// Mutable access to the channel buffers.
    ///
    /// Callers must keep all channels the same length.
    pub(crate) fn channels_mut(&mut self) -> &mut [Vec<f32>] {
        &mut self.channels
    }

    /// Replace the channel buffers, keeping the sample rate.
    pub(crate) fn with_channels(&self, channels: Vec<Vec<f32>>) -> Self {
        debug_assert!(channels.windows(2).all(|w| w[0].len() == w[1].len()));
        Self {
            channels,
            sample_rate: self.sample_rate,
        }
    }

    /// Merge all channels into one by per-frame average.
    pub fn to_mono(&self) -> Vec<f32> {
        if self.channels.len() == 1 {
            return self.channels[0].clone();
        }
        let count = self.channels.len() as f32;
        (0..self.len())
            .map(|i| self.channels.iter().map(|c| c[i]).sum::<f32>() / count)
            .collect()
    }

    /// Re-interleave channel-major buffers into on-disk frame order.
    pub fn to_interleaved(&self) -> Vec<f32> {
        let mut interleaved = Vec::with_capacity(self.len() * self.channels.len());
        for i in 0..self.len() {
            for channel in &self.channels {
                interleaved.push(channel[i]);
            }
        }
        interleaved
    }
}
