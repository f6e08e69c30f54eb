//! Error types for field-map loading and figure rendering

use std::path::PathBuf;
use thiserror::Error;

/// Failure while reading a BDSIM field map
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read field map {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: cannot parse {token:?} as a number")]
    BadNumber { line: usize, token: String },

    #[error("line {line}: expected {expected} columns, found {found}")]
    ColumnCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("field map needs at least 4 columns (position, Fx, Fy, Fz), found {0}")]
    TooFewColumns(usize),

    #[error("column line names {0:?} but not all of Fx, Fy, Fz")]
    MissingComponents(Vec<String>),

    #[error("field map contains no data rows")]
    Empty,
}

/// Failure while producing comparison images
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("loading {path:?}")]
    Load {
        path: PathBuf,
        #[source]
        source: LoadError,
    },

    #[error("rendering {path:?} failed: {message}")]
    Render { path: PathBuf, message: String },

    #[error("cannot create output directory {path:?}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("writing manifest {path:?} failed: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serializing manifest: {0}")]
    ManifestJson(#[from] serde_json::Error),
}

pub type Result<T, E = PlotError> = std::result::Result<T, E>;
