//! Scan command.
//!
//! Prints the minimum and maximum BT.709 luminance of an image.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use inverter_edit::PipelineConfig;
use inverter_ops::{extrema, invert, LuminanceExtremes};
use tracing::trace;

use inverter_cli::io;

/// Arguments for the `scan` command.
#[derive(Args)]
pub struct ScanArgs {
    /// Input image
    pub input: PathBuf,

    /// Also scan the color-inverted image
    #[arg(long)]
    pub inverted: bool,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

fn to_json(ext: &LuminanceExtremes) -> serde_json::Value {
    serde_json::json!({ "min": ext.min, "max": ext.max })
}

/// Run the scan command.
pub fn run(args: ScanArgs, config: &PipelineConfig) -> Result<()> {
    trace!(input = %args.input.display(), "scan");
    let image = io::load_image(&args.input)?;
    let original = extrema::scan_with(&image, config.backend)?;

    let inverted = if args.inverted {
        let inv = invert::invert_with(&image, config.backend)?;
        Some(extrema::scan_with(&inv, config.backend)?)
    } else {
        None
    };

    if args.json {
        let mut json = serde_json::json!({
            "file": args.input.display().to_string(),
            "width": image.width(),
            "height": image.height(),
            "luminance": to_json(&original),
        });
        if let Some(inv) = &inverted {
            json["inverted"] = to_json(inv);
        }
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        println!("{}: {}x{}", args.input.display(), image.width(), image.height());
        println!("  luminance  min {:.4}  max {:.4}", original.min, original.max);
        if let Some(inv) = &inverted {
            println!("  inverted   min {:.4}  max {:.4}", inv.min, inv.max);
        }
    }
    Ok(())
}
