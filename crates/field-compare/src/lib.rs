//! field-compare: plot interpolated 1D BDSIM field maps against the original
//!
//! This crate provides:
//! - Loading of BDSIM field maps (plain or gzip)
//! - Figure descriptions for each interpolation comparison
//! - SVG/PNG rendering via plotters
//!
//! Positions are in cm and fields in T, as written by BDSIM. No interpolation
//! happens here; the interpolated maps are produced elsewhere.

pub mod dataset;
pub mod error;
pub mod field;
pub mod figure;
pub mod loader;
pub mod manifest;
pub mod plots;
pub mod plotter;
pub mod render;

pub use dataset::{ComparisonSet, Dataset, InputPaths};
pub use error::{LoadError, PlotError};
pub use field::{Axis, FieldRecord, FieldSample};
pub use figure::{Figure, Series, SeriesStyle};
pub use plotter::{ComparisonPlotter, Operation};

use std::path::PathBuf;

/// Main entry point: render every selected comparison, returning the image paths
pub fn run(config: ComparisonConfig) -> error::Result<Vec<PathBuf>> {
    ComparisonPlotter::new(config).run()
}

/// Configuration for a comparison run
#[derive(Debug, Clone)]
pub struct ComparisonConfig {
    pub inputs: InputPaths,
    /// Directory receiving the images (default: current directory)
    pub output_dir: PathBuf,
    pub format: ImageFormat,
    /// Operations to run; empty means all of them
    pub only: Vec<Operation>,
    /// Also write manifest.json describing each figure
    pub manifest: bool,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            inputs: InputPaths::default(),
            output_dir: PathBuf::from("."),
            format: ImageFormat::Svg,
            only: Vec::new(),
            manifest: false,
        }
    }
}

impl ComparisonConfig {
    pub fn runs(&self, op: Operation) -> bool {
        self.only.is_empty() || self.only.contains(&op)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Svg,
    Png,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Svg => "svg",
            ImageFormat::Png => "png",
        }
    }

    pub fn file_name(&self, stem: &str) -> String {
        format!("{}.{}", stem, self.extension())
    }
}

impl std::str::FromStr for ImageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "svg" => Ok(ImageFormat::Svg),
            "png" => Ok(ImageFormat::Png),
            _ => Err(format!("Unknown image format: {}. Use: svg or png", s)),
        }
    }
}
