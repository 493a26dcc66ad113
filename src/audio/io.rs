// WAV file decoding and encoding
//
// Decoding preserves the on-disk channel layout: the header's channel count
// drives deinterleaving into the channel-major `Waveform`. Audio is kept at
// its native sample rate; this crate never resamples.

use std::io;
use std::path::Path;

use crate::audio::Waveform;
use crate::error::DecodeError;

/// Decode a PCM WAV file into a channel-major waveform.
///
/// Supports 16/24/32-bit integer and 32-bit float sample formats. Integer
/// samples are normalized to [-1.0, 1.0].
pub fn read_wav(path: &Path) -> Result<Waveform, DecodeError> {
    let mut reader = hound::WavReader::open(path).map_err(|err| DecodeError::Open {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })?;
    let spec = reader.spec();
    let sample_rate = spec.sample_rate;

    let interleaved = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<Vec<f32>, _>>()
            .map_err(|err| malformed(path, err))?,
        hound::SampleFormat::Int => {
            let max = ((1i64 << (spec.bits_per_sample - 1)) - 1) as f32;
            match spec.bits_per_sample {
                16 => reader
                    .samples::<i16>()
                    .map(|sample| sample.map(|value| value as f32 / max))
                    .collect::<Result<Vec<f32>, _>>()
                    .map_err(|err| malformed(path, err))?,
                24 | 32 => reader
                    .samples::<i32>()
                    .map(|sample| sample.map(|value| value as f32 / max))
                    .collect::<Result<Vec<f32>, _>>()
                    .map_err(|err| malformed(path, err))?,
                other => {
                    return Err(DecodeError::UnsupportedFormat {
                        path: path.to_path_buf(),
                        bits_per_sample: other,
                    })
                }
            }
        }
    };

    Ok(Waveform::from_interleaved(
        &interleaved,
        spec.channels as usize,
        sample_rate,
    ))
}

fn malformed(path: &Path, err: hound::Error) -> DecodeError {
    DecodeError::Malformed {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}

/// Encode a waveform as a 32-bit float WAV file at its source sample rate.
pub fn write_wav(path: &Path, wave: &Waveform) -> Result<(), io::Error> {
    let spec = hound::WavSpec {
        channels: wave.channel_count() as u16,
        sample_rate: wave.sample_rate(),
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };

    let mut writer = hound::WavWriter::create(path, spec).map_err(to_io_error)?;
    for sample in wave.to_interleaved() {
        writer.write_sample(sample).map_err(to_io_error)?;
    }
    writer.finalize().map_err(to_io_error)
}

fn to_io_error(err: hound::Error) -> io::Error {
    match err {
        hound::Error::IoError(io_err) => io_err,
        other => io::Error::other(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_nonexistent_file_is_typed_failure() {
        let result = read_wav(Path::new("does/not/exist.wav"));
        match result {
            Err(DecodeError::Open { path, .. }) => {
                assert_eq!(path, Path::new("does/not/exist.wav"));
            }
            other => panic!("expected DecodeError::Open, got {:?}", other),
        }
    }

    #[test]
    fn test_wav_round_trip_preserves_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stereo.wav");

        let wave = Waveform::from_interleaved(&[0.25, -0.25, 0.5, -0.5], 2, 16_000);
        write_wav(&path, &wave).unwrap();

        let decoded = read_wav(&path).unwrap();
        assert_eq!(decoded.channel_count(), 2);
        assert_eq!(decoded.sample_rate(), 16_000);
        assert_eq!(decoded.channels(), wave.channels());
    }

    #[test]
    fn test_read_corrupt_file_is_typed_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.wav");
        std::fs::write(&path, b"not a riff header at all").unwrap();

        assert!(matches!(read_wav(&path), Err(DecodeError::Open { .. })));
    }
}
