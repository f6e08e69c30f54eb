//! The five field maps under comparison and where they live on disk

use crate::error::{PlotError, Result};
use crate::field::FieldSample;
use crate::loader;
use std::path::{Path, PathBuf};

/// Which field map a sample came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dataset {
    /// Ground truth samples the interpolators were built from
    Original,
    Nearest,
    Linear,
    /// Linear interpolation preserving |B|
    LinearMagnitude,
    Cubic,
}

impl Dataset {
    pub const ALL: [Dataset; 5] = [
        Dataset::Original,
        Dataset::Nearest,
        Dataset::Linear,
        Dataset::LinearMagnitude,
        Dataset::Cubic,
    ];

    /// Legend text
    pub fn label(self) -> &'static str {
        match self {
            Dataset::Original => "Original",
            Dataset::Nearest => "Nearest",
            Dataset::Linear => "Linear",
            Dataset::LinearMagnitude => "Linear Mag",
            Dataset::Cubic => "Cubic",
        }
    }

    /// File name used when no path is given
    pub fn default_file(self) -> &'static str {
        match self {
            Dataset::Original => "1dexample.dat.gz",
            Dataset::Nearest => "1d_interpolated_nearest.dat",
            Dataset::Linear => "1d_interpolated_linear.dat",
            Dataset::LinearMagnitude => "1d_interpolated_linear_mag.dat",
            Dataset::Cubic => "1d_interpolated_cubic.dat",
        }
    }
}

/// Input file locations
#[derive(Debug, Clone, PartialEq)]
pub struct InputPaths {
    pub original: PathBuf,
    pub nearest: PathBuf,
    pub linear: PathBuf,
    pub linear_mag: PathBuf,
    pub cubic: PathBuf,
}

impl Default for InputPaths {
    fn default() -> Self {
        Self::in_dir(".")
    }
}

impl InputPaths {
    /// Default file names inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let path = |d: Dataset| dir.join(d.default_file());
        Self {
            original: path(Dataset::Original),
            nearest: path(Dataset::Nearest),
            linear: path(Dataset::Linear),
            linear_mag: path(Dataset::LinearMagnitude),
            cubic: path(Dataset::Cubic),
        }
    }

    pub fn get(&self, dataset: Dataset) -> &Path {
        match dataset {
            Dataset::Original => &self.original,
            Dataset::Nearest => &self.nearest,
            Dataset::Linear => &self.linear,
            Dataset::LinearMagnitude => &self.linear_mag,
            Dataset::Cubic => &self.cubic,
        }
    }
}

/// Load one field map, tagging failures with the path
pub fn load_sample(path: &Path) -> Result<FieldSample> {
    loader::load(path).map_err(|source| PlotError::Load {
        path: path.to_path_buf(),
        source,
    })
}

/// All five field maps, loaded
#[derive(Debug, Clone)]
pub struct ComparisonSet {
    pub original: FieldSample,
    pub nearest: FieldSample,
    pub linear: FieldSample,
    pub linear_mag: FieldSample,
    pub cubic: FieldSample,
}

impl ComparisonSet {
    pub fn load(paths: &InputPaths) -> Result<Self> {
        Ok(Self {
            original: load_sample(&paths.original)?,
            nearest: load_sample(&paths.nearest)?,
            linear: load_sample(&paths.linear)?,
            linear_mag: load_sample(&paths.linear_mag)?,
            cubic: load_sample(&paths.cubic)?,
        })
    }

    pub fn get(&self, dataset: Dataset) -> &FieldSample {
        match dataset {
            Dataset::Original => &self.original,
            Dataset::Nearest => &self.nearest,
            Dataset::Linear => &self.linear,
            Dataset::LinearMagnitude => &self.linear_mag,
            Dataset::Cubic => &self.cubic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths_match_file_names() {
        let paths = InputPaths::in_dir("maps");
        assert_eq!(paths.get(Dataset::Original), Path::new("maps/1dexample.dat.gz"));
        assert_eq!(
            paths.get(Dataset::LinearMagnitude),
            Path::new("maps/1d_interpolated_linear_mag.dat")
        );
    }

    #[test]
    fn test_load_failure_names_path() {
        let paths = InputPaths::in_dir("/nonexistent");
        let err = ComparisonSet::load(&paths).unwrap_err();
        match err {
            PlotError::Load { path, .. } => assert_eq!(path, paths.original),
            other => panic!("unexpected error: {other}"),
        }
    }
}
