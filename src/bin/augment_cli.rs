use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use soundaug::{AppConfig, BatchRunner, ErrorCode};
use tracing::Level;

#[derive(Parser, Debug)]
#[command(
    name = "augment_cli",
    about = "Apply the fixed augmentation set to every waveform file in a directory"
)]
struct Cli {
    /// Directory containing input .wav files
    #[arg(short, long, default_value = ".")]
    input: PathBuf,

    /// Directory for augmented output files (created if absent)
    #[arg(short, long, default_value = "aug_output")]
    output: PathBuf,

    /// Seed for the run generator; identical seeds reproduce identical files
    #[arg(long)]
    seed: Option<u64>,

    /// Optional JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = cli
        .config
        .as_ref()
        .map(AppConfig::load_from_file)
        .unwrap_or_default();
    let seed = cli.seed.unwrap_or(config.batch.seed);

    let runner = BatchRunner::new(seed);
    match runner.run(&cli.input, &cli.output) {
        Ok(summary) => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(ExitCode::from(0))
        }
        Err(err) => {
            eprintln!("Error: {}", err.message());
            // Error codes double as exit statuses (2 = no inputs,
            // 3 = output dir unwritable, 4 = write failure)
            Ok(ExitCode::from(err.code() as u8))
        }
    }
}
