//! inverter - invert photographs and stretch their tonal range
//!
//! Host binary for the inverter pipeline: decodes a file, runs an editing
//! session and encodes the result.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use inverter_edit::PipelineConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "inverter")]
#[command(author, version, about = "Invert photographs with auto or manual levels")]
#[command(long_about = "
Inverts the colors of a photograph (for example a scanned negative) and then
stretches its contrast between a black point and a white point. In auto mode
the points are the darkest and brightest luminance of the inverted image;
in manual mode they come from --black/--white on a 0-100 scale.

Examples:
  inverter process scan.jpg -o positive.jpg            # Auto levels
  inverter process scan.jpg -o out.jpg --black 10 --white 85
  inverter process scan.tif -o out.png --sidecar       # Also write metadata
  inverter invert scan.png -o inverted.png             # Inversion only
  inverter scan photo.jpg --inverted --json            # Luminance extremes
  inverter --config levels.yaml process in.jpg -o out.jpg
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// Pipeline settings file (YAML); command-line flags take precedence
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Invert and apply auto or manual levels (full edit)
    #[command(visible_alias = "p")]
    Process(commands::process::ProcessArgs),

    /// Invert colors only
    Invert(commands::invert::InvertArgs),

    /// Print the luminance extremes of an image
    Scan(commands::scan::ScanArgs),

    /// List execution backends
    Backends,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    let config = match &cli.config {
        Some(path) => PipelineConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => PipelineConfig::default(),
    };

    match cli.command {
        Commands::Process(args) => commands::process::run(args, config),
        Commands::Invert(args) => commands::invert::run(args, &config),
        Commands::Scan(args) => commands::scan::run(args, &config),
        Commands::Backends => commands::backends::run(),
    }
}
