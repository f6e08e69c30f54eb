//! Comparison plotter: load field maps, build figures, write images
//!
//! Each operation reads only the files it needs, so a broken map fails the
//! first operation that touches it. Images written before a failure are left
//! in place.

use crate::dataset::{load_sample, ComparisonSet, Dataset};
use crate::error::{PlotError, Result};
use crate::field::FieldSample;
use crate::figure::Figure;
use crate::manifest::Manifest;
use crate::{plots, render, ComparisonConfig};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

/// The comparison charts, in the order they are produced
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    PlotOriginal,
    PlotNearest,
    PlotLinear,
    CompareLinearMagnitudes,
    PlotLinearMag,
    PlotCubic,
    Compare1D,
}

impl Operation {
    pub const ALL: [Operation; 7] = [
        Operation::PlotOriginal,
        Operation::PlotNearest,
        Operation::PlotLinear,
        Operation::CompareLinearMagnitudes,
        Operation::PlotLinearMag,
        Operation::PlotCubic,
        Operation::Compare1D,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::PlotOriginal => "original",
            Operation::PlotNearest => "nearest",
            Operation::PlotLinear => "linear",
            Operation::CompareLinearMagnitudes => "linear-mag-comparison",
            Operation::PlotLinearMag => "linear-mag",
            Operation::PlotCubic => "cubic",
            Operation::Compare1D => "compare-1d",
        }
    }

    /// Parse a name as printed by `name`
    pub fn from_name(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name() == s.to_lowercase())
    }
}

pub struct ComparisonPlotter {
    config: ComparisonConfig,
    rendered: Vec<(Figure, PathBuf)>,
}

impl ComparisonPlotter {
    pub fn new(config: ComparisonConfig) -> Self {
        Self {
            config,
            rendered: Vec::new(),
        }
    }

    /// Run the selected operations in fixed order, returning every written
    /// image path
    pub fn run(&mut self) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.config.output_dir).map_err(|source| PlotError::OutputDir {
            path: self.config.output_dir.clone(),
            source,
        })?;

        let mut written = Vec::new();
        for op in Operation::ALL {
            if !self.config.runs(op) {
                continue;
            }
            info!("Running {}", op.name());
            written.extend(self.execute(op)?);
        }

        if self.config.manifest {
            let path = self.write_manifest()?;
            info!("Wrote manifest {:?}", path);
        }

        Ok(written)
    }

    pub fn execute(&mut self, op: Operation) -> Result<Vec<PathBuf>> {
        match op {
            Operation::PlotOriginal => self.plot_original().map(|p| vec![p]),
            Operation::PlotNearest => self.plot_nearest().map(|p| vec![p]),
            Operation::PlotLinear => self.plot_linear().map(|p| vec![p]),
            Operation::CompareLinearMagnitudes => self.compare_linear_magnitudes().map(|p| vec![p]),
            Operation::PlotLinearMag => self.plot_linear_mag().map(|p| vec![p]),
            Operation::PlotCubic => self.plot_cubic().map(|p| vec![p]),
            Operation::Compare1D => self.compare_1d().map(Vec::from),
        }
    }

    pub fn plot_original(&mut self) -> Result<PathBuf> {
        let original = self.load(Dataset::Original)?;
        self.write(plots::original_figure(&original))
    }

    pub fn plot_nearest(&mut self) -> Result<PathBuf> {
        self.plot_overlay(Dataset::Nearest, plots::nearest_figure)
    }

    pub fn plot_linear(&mut self) -> Result<PathBuf> {
        self.plot_overlay(Dataset::Linear, plots::linear_figure)
    }

    pub fn plot_linear_mag(&mut self) -> Result<PathBuf> {
        self.plot_overlay(Dataset::LinearMagnitude, plots::linear_mag_figure)
    }

    pub fn plot_cubic(&mut self) -> Result<PathBuf> {
        self.plot_overlay(Dataset::Cubic, plots::cubic_figure)
    }

    pub fn compare_linear_magnitudes(&mut self) -> Result<PathBuf> {
        let linear = self.load(Dataset::Linear)?;
        let linear_mag = self.load(Dataset::LinearMagnitude)?;
        let original = self.load(Dataset::Original)?;
        self.write(plots::linear_magnitude_figure(&linear, &linear_mag, &original))
    }

    /// Writes exactly three images: X, Y, Z
    pub fn compare_1d(&mut self) -> Result<[PathBuf; 3]> {
        let set = ComparisonSet::load(&self.config.inputs)?;
        let [x, y, z] = plots::compare_1d_figures(&set);
        Ok([self.write(x)?, self.write(y)?, self.write(z)?])
    }

    fn plot_overlay(
        &mut self,
        dataset: Dataset,
        build: fn(&FieldSample, &FieldSample) -> Figure,
    ) -> Result<PathBuf> {
        let interpolated = self.load(dataset)?;
        let original = self.load(Dataset::Original)?;

        if interpolated.positions_aligned(&original) {
            debug!("{} positions match the original samples", dataset.label());
        } else {
            info!(
                "{} has {} rows on its own grid, original has {}",
                dataset.label(),
                interpolated.len(),
                original.len()
            );
        }

        self.write(build(&interpolated, &original))
    }

    fn load(&self, dataset: Dataset) -> Result<FieldSample> {
        load_sample(self.config.inputs.get(dataset))
    }

    fn write(&mut self, figure: Figure) -> Result<PathBuf> {
        let path = render::render(&figure, &self.config.output_dir, self.config.format)?;
        self.rendered.push((figure, path.clone()));
        Ok(path)
    }

    fn write_manifest(&self) -> Result<PathBuf> {
        let manifest = Manifest::from_rendered(&self.rendered);
        let path = self.config.output_dir.join(crate::manifest::MANIFEST_FILE);
        manifest.write(&path)?;
        Ok(path)
    }
}
