//! Process command.
//!
//! Runs a full editing session: invert, pick the black/white point, stretch,
//! encode, and optionally write the adjustment sidecar.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use inverter_edit::{EditingSession, Mode, PipelineConfig};
use inverter_ops::OutputRange;
use tracing::{info, warn};

use inverter_cli::io::{self, EncoderSink, DEFAULT_JPEG_QUALITY};

/// Arguments for the `process` command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input image
    pub input: PathBuf,

    /// Output image (format from extension)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Contrast mode: auto or manual
    #[arg(short, long)]
    pub mode: Option<Mode>,

    /// Black point on the slider scale (implies manual mode)
    #[arg(short, long)]
    pub black: Option<f32>,

    /// White point on the slider scale (implies manual mode)
    #[arg(short, long)]
    pub white: Option<f32>,

    /// Do not clamp stretched values to [0, 1] before encoding
    #[arg(long)]
    pub unclamped: bool,

    /// JPEG quality (1-100)
    #[arg(short, long, default_value_t = DEFAULT_JPEG_QUALITY, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: u8,

    /// Write adjustment metadata to <output>.adjustment.json
    #[arg(long)]
    pub sidecar: bool,
}

/// Run the process command.
pub fn run(args: ProcessArgs, mut config: PipelineConfig) -> Result<()> {
    let manual_points = args.black.is_some() || args.white.is_some();
    match args.mode {
        Some(mode) => config.mode = mode,
        None if manual_points => config.mode = Mode::Manual,
        None => {}
    }
    if args.unclamped {
        config.output_range = OutputRange::Unclamped;
    }

    if manual_points && config.mode == Mode::Auto {
        warn!("--black/--white are ignored in auto mode");
    }
    let config = config.with_slider_points(args.black, args.white)?;

    info!("Processing: {}", args.input.display());
    let input = io::load_image(&args.input)?.convert_format::<f32>();
    let mut session = EditingSession::start(input, &config)?;

    let mut sink = EncoderSink::new(&args.output, args.quality);
    let output = session.finish(&mut sink)?;

    let (black, white) = session.controller().slider_values();
    println!(
        "{} -> {} ({} mode, black {:.1}, white {:.1})",
        args.input.display(),
        args.output.display(),
        session.controller().mode(),
        black,
        white
    );

    if args.sidecar {
        let path = io::write_sidecar(&args.output, &output.adjustment)?;
        info!("Wrote {}", path.display());
    }
    Ok(())
}
