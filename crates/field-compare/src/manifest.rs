//! JSON summary of the images written in one run

use crate::error::{PlotError, Result};
use crate::figure::Figure;
use serde::Serialize;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesEntry {
    pub label: Option<String>,
    pub points: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FigureEntry {
    pub stem: String,
    /// File name relative to the output directory
    pub file: String,
    pub title: Option<String>,
    pub x_label: String,
    pub y_label: String,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub series: Vec<SeriesEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Manifest {
    pub figures: Vec<FigureEntry>,
}

impl Manifest {
    pub fn from_rendered(rendered: &[(Figure, PathBuf)]) -> Self {
        let figures = rendered
            .iter()
            .map(|(fig, path)| FigureEntry {
                stem: fig.stem.clone(),
                file: path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                title: fig.title.clone(),
                x_label: fig.x_label.clone(),
                y_label: fig.y_label.clone(),
                x_range: fig.x_range.clone(),
                y_range: fig.y_range.clone(),
                series: fig
                    .series
                    .iter()
                    .map(|s| SeriesEntry {
                        label: s.label.clone(),
                        points: s.points.len(),
                    })
                    .collect(),
            })
            .collect();

        Self { figures }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| PlotError::Manifest {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldRecord, FieldSample};
    use crate::plots;

    #[test]
    fn test_manifest_lists_series() {
        let sample = FieldSample::from_records(vec![
            FieldRecord::new(0.0, 1.0, 2.0, 3.0),
            FieldRecord::new(10.0, 1.1, 2.1, 3.1),
        ]);
        let fig = plots::nearest_figure(&sample, &sample);
        let manifest = Manifest::from_rendered(&[(fig, PathBuf::from("out/1d_nearest_xyz.svg"))]);

        let entry = &manifest.figures[0];
        assert_eq!(entry.file, "1d_nearest_xyz.svg");
        assert_eq!(entry.series.len(), 6);
        assert_eq!(entry.series[0].label, None);
        assert_eq!(entry.series[3].label.as_deref(), Some("X"));
        assert!(entry.series.iter().all(|s| s.points == 2));

        let json: serde_json::Value = serde_json::from_str(&manifest.to_json().unwrap()).unwrap();
        assert_eq!(json["figures"][0]["stem"], "1d_nearest_xyz");
        assert_eq!(json["figures"][0]["x_range"]["start"], -50.0);
    }
}
