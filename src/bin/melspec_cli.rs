use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use soundaug::{log_mel_from_file, AppConfig, SpectrogramConfig};
use tracing::Level;

#[derive(Parser, Debug)]
#[command(
    name = "melspec_cli",
    about = "Extract a log-mel spectrogram from a waveform file as JSON"
)]
struct Cli {
    /// Input .wav file
    #[arg(short, long)]
    input: PathBuf,

    /// Write JSON here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// FFT window size in samples
    #[arg(long)]
    n_fft: Option<usize>,

    /// Hop length between frames
    #[arg(long)]
    hop_length: Option<usize>,

    /// Number of mel bands
    #[arg(long)]
    n_mels: Option<usize>,

    /// Spectrum power exponent (2.0 = power spectrum)
    #[arg(long)]
    power: Option<f32>,

    /// Optional JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct SpectrogramPayload<'a> {
    input: &'a str,
    n_mels: usize,
    frames: usize,
    data: &'a [Vec<f32>],
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::from(0),
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .init();

    let base = cli
        .config
        .as_ref()
        .map(AppConfig::load_from_file)
        .unwrap_or_default();
    let config = SpectrogramConfig {
        n_fft: cli.n_fft.unwrap_or(base.spectrogram.n_fft),
        hop_length: cli.hop_length.unwrap_or(base.spectrogram.hop_length),
        n_mels: cli.n_mels.unwrap_or(base.spectrogram.n_mels),
        power: cli.power.unwrap_or(base.spectrogram.power),
    };

    let mel = log_mel_from_file(&cli.input, &config)
        .with_context(|| format!("extracting spectrogram from {}", cli.input.display()))?;

    let payload = SpectrogramPayload {
        input: &cli.input.to_string_lossy(),
        n_mels: mel.len(),
        frames: mel.first().map_or(0, Vec::len),
        data: &mel,
    };
    let json = serde_json::to_string(&payload)?;

    if let Some(path) = cli.output {
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    } else {
        println!("{json}");
    }

    Ok(())
}
