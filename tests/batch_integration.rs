// End-to-end batch runner tests against real files on disk

use std::fs;
use std::path::Path;

use soundaug::audio::{read_wav, write_wav, Waveform};
use soundaug::{BatchRunner, DEFAULT_SEED};

fn write_sine_wav(path: &Path, channels: usize, frames: usize, sample_rate: u32) {
    let interleaved: Vec<f32> = (0..frames)
        .flat_map(|i| {
            (0..channels).map(move |c| {
                let phase = i as f32 * (220.0 * (c + 1) as f32) / sample_rate as f32;
                (2.0 * std::f32::consts::PI * phase).sin() * 0.4
            })
        })
        .collect();
    let wave = Waveform::from_interleaved(&interleaved, channels, sample_rate);
    write_wav(path, &wave).unwrap();
}

fn output_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn mono_inputs_produce_six_outputs_each() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_sine_wav(&input.path().join("fan.wav"), 1, 8_192, 16_000);
    write_sine_wav(&input.path().join("pump.wav"), 1, 8_192, 16_000);

    let summary = BatchRunner::default()
        .run(input.path(), output.path())
        .unwrap();

    assert_eq!(summary.files_found, 2);
    assert_eq!(summary.files_written, 12);
    assert_eq!(summary.skipped_unsupported, 0);
    assert!(summary.decode_failures.is_empty());

    let names = output_names(output.path());
    for stem in ["fan", "pump"] {
        for transform in [
            "AddGaussianNoise",
            "FrequencyMask",
            "TimeMask",
            "TimeStretch",
            "LowPassFilter",
            "HighPassFilter",
        ] {
            assert!(
                names.contains(&format!("{stem}_{transform}.wav")),
                "missing {stem}_{transform}.wav in {names:?}"
            );
        }
    }
}

#[test]
fn fixed_seed_reproduces_identical_bytes() {
    let input = tempfile::tempdir().unwrap();
    write_sine_wav(&input.path().join("clip.wav"), 1, 12_000, 16_000);

    let out_a = tempfile::tempdir().unwrap();
    let out_b = tempfile::tempdir().unwrap();
    BatchRunner::new(DEFAULT_SEED)
        .run(input.path(), out_a.path())
        .unwrap();
    BatchRunner::new(DEFAULT_SEED)
        .run(input.path(), out_b.path())
        .unwrap();

    let names = output_names(out_a.path());
    assert_eq!(names, output_names(out_b.path()));
    for name in names {
        let bytes_a = fs::read(out_a.path().join(&name)).unwrap();
        let bytes_b = fs::read(out_b.path().join(&name)).unwrap();
        assert_eq!(bytes_a, bytes_b, "{name} differs between runs");
    }
}

#[test]
fn different_seeds_produce_different_noise() {
    let input = tempfile::tempdir().unwrap();
    write_sine_wav(&input.path().join("clip.wav"), 1, 8_192, 16_000);

    let out_a = tempfile::tempdir().unwrap();
    let out_b = tempfile::tempdir().unwrap();
    BatchRunner::new(1).run(input.path(), out_a.path()).unwrap();
    BatchRunner::new(2).run(input.path(), out_b.path()).unwrap();

    let a = fs::read(out_a.path().join("clip_AddGaussianNoise.wav")).unwrap();
    let b = fs::read(out_b.path().join("clip_AddGaussianNoise.wav")).unwrap();
    assert_ne!(a, b);
}

#[test]
fn multichannel_skips_time_stretch_but_keeps_channel_count() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_sine_wav(&input.path().join("stereo.wav"), 2, 4_096, 16_000);

    let summary = BatchRunner::default()
        .run(input.path(), output.path())
        .unwrap();

    assert_eq!(summary.files_written, 5);
    assert_eq!(summary.skipped_unsupported, 1);
    assert!(!output.path().join("stereo_TimeStretch.wav").exists());

    for name in output_names(output.path()) {
        let wave = read_wav(&output.path().join(&name)).unwrap();
        assert_eq!(wave.channel_count(), 2, "{name}");
        assert_eq!(wave.sample_rate(), 16_000, "{name}");
    }
}

#[test]
fn channel_major_storage_survives_many_channels_few_samples() {
    // More channels than samples per channel; layout comes from the header,
    // not from matrix shape
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_sine_wav(&input.path().join("dense.wav"), 4, 3, 8_000);

    BatchRunner::default()
        .run(input.path(), output.path())
        .unwrap();

    let noisy = read_wav(&output.path().join("dense_AddGaussianNoise.wav")).unwrap();
    assert_eq!(noisy.channel_count(), 4);
    assert_eq!(noisy.len(), 3);
}

#[test]
fn corrupt_file_does_not_abort_batch() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_sine_wav(&input.path().join("good.wav"), 1, 4_096, 16_000);
    fs::write(input.path().join("broken.wav"), b"definitely not RIFF").unwrap();

    let summary = BatchRunner::default()
        .run(input.path(), output.path())
        .unwrap();

    assert_eq!(summary.files_found, 2);
    assert_eq!(summary.decode_failures.len(), 1);
    assert!(summary.decode_failures[0].contains("broken.wav"));
    // The valid file still produced all six outputs
    assert_eq!(summary.files_written, 6);
}

#[test]
fn rerun_overwrites_existing_outputs() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_sine_wav(&input.path().join("clip.wav"), 1, 4_096, 16_000);

    BatchRunner::default()
        .run(input.path(), output.path())
        .unwrap();
    let first = fs::read(output.path().join("clip_TimeMask.wav")).unwrap();

    BatchRunner::default()
        .run(input.path(), output.path())
        .unwrap();
    let second = fs::read(output.path().join("clip_TimeMask.wav")).unwrap();

    assert_eq!(first, second);
    assert_eq!(output_names(output.path()).len(), 6);
}
