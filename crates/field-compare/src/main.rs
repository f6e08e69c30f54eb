//! field-compare: CLI for comparing interpolated 1D field maps
//!
//! With no arguments it reads the default map names from the current
//! directory and writes every comparison image there.

use anyhow::{Context, Result};
use clap::Parser;
use field_compare::{ComparisonConfig, ComparisonPlotter, ImageFormat, InputPaths, Operation};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "field-compare")]
#[command(about = "Plot interpolated 1D BDSIM field maps against the original samples")]
#[command(version)]
struct Args {
    /// Original (ground truth) field map
    #[arg(long, default_value = "1dexample.dat.gz")]
    original: PathBuf,

    /// Nearest-neighbour interpolated map
    #[arg(long, default_value = "1d_interpolated_nearest.dat")]
    nearest: PathBuf,

    /// Linearly interpolated map
    #[arg(long, default_value = "1d_interpolated_linear.dat")]
    linear: PathBuf,

    /// Magnitude-preserving linear interpolated map
    #[arg(long, default_value = "1d_interpolated_linear_mag.dat")]
    linear_mag: PathBuf,

    /// Cubic interpolated map
    #[arg(long, default_value = "1d_interpolated_cubic.dat")]
    cubic: PathBuf,

    /// Directory for the images
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Image format (svg, png)
    #[arg(long, default_value = "svg")]
    format: String,

    /// Only run these comparisons (original, nearest, linear,
    /// linear-mag-comparison, linear-mag, cubic, compare-1d)
    #[arg(long)]
    only: Vec<String>,

    /// Write manifest.json describing each figure
    #[arg(long)]
    manifest: bool,
}

fn parse_operation(s: &str) -> Result<Operation> {
    Operation::from_name(s).with_context(|| {
        let names: Vec<_> = Operation::ALL.iter().map(|op| op.name()).collect();
        format!("Unknown comparison: {}. Use one of: {}", s, names.join(", "))
    })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let format: ImageFormat = args.format.parse().map_err(anyhow::Error::msg)?;
    let only = args
        .only
        .iter()
        .map(|s| parse_operation(s))
        .collect::<Result<Vec<_>>>()?;

    let config = ComparisonConfig {
        inputs: InputPaths {
            original: args.original,
            nearest: args.nearest,
            linear: args.linear,
            linear_mag: args.linear_mag,
            cubic: args.cubic,
        },
        output_dir: args.output_dir,
        format,
        only,
        manifest: args.manifest,
    };

    let written = ComparisonPlotter::new(config)
        .run()
        .context("Comparison failed")?;

    info!("Generated {} images", written.len());
    Ok(())
}
