//! Invert command.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use inverter_edit::PipelineConfig;
use inverter_ops::transform::{self, Transform, TransformParams};
use tracing::{debug, info};

use inverter_cli::io::{self, DEFAULT_JPEG_QUALITY};

/// Arguments for the `invert` command.
#[derive(Args)]
pub struct InvertArgs {
    /// Input image
    pub input: PathBuf,

    /// Output image
    #[arg(short, long)]
    pub output: PathBuf,

    /// JPEG quality (1-100)
    #[arg(short, long, default_value_t = DEFAULT_JPEG_QUALITY, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: u8,
}

/// Run the invert command.
pub fn run(args: InvertArgs, config: &PipelineConfig) -> Result<()> {
    info!("Inverting: {}", args.input.display());
    let params = TransformParams {
        backend: config.backend,
        ..TransformParams::default()
    };
    let invert = Transform::named(transform::COLOR_INVERT, params)?;
    debug!(backend = invert.backend().name(), "transform ready");

    let image = io::load_image(&args.input)?;
    let inverted = invert.apply(&image)?;
    io::save_image(&args.output, &inverted, args.quality)?;

    println!("{} -> {}", args.input.display(), args.output.display());
    Ok(())
}
