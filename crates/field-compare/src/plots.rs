//! Figure builders for each comparison
//!
//! Pure functions from loaded samples to `Figure`s. Axis limits, colours and
//! markers are fixed per chart so repeated runs give identical images.

use crate::dataset::{ComparisonSet, Dataset};
use crate::field::{Axis, FieldSample};
use crate::figure::{Figure, LegendPosition, LineStyle, Marker, Rgb, Series, SeriesStyle};

/// 6x4 inch figures at 100 dpi
const COMPONENT_SIZE: (u32, u32) = (600, 400);
/// Default figure size
const COMPARISON_SIZE: (u32, u32) = (640, 480);

const DISTANCE_LABEL: &str = "Distance (cm)";
const COMPONENT_LABEL: &str = "Field Component (T)";

/// Opacity of ground truth markers behind interpolated lines
const FAINT: f64 = 0.2;

/// Output stems, one per written image
pub mod stems {
    pub const ORIGINAL: &str = "original_data";
    pub const NEAREST: &str = "1d_nearest_xyz";
    pub const LINEAR: &str = "1d_linear_xyz";
    pub const LINEAR_MAG_COMPARISON: &str = "1d_linear_mag_comparison";
    pub const LINEAR_MAG: &str = "1d_linear_mag_xyz";
    pub const CUBIC: &str = "1d_cubic_xyz";
    pub const INTERPOLATED_PREFIX: &str = "1d_interpolated_";
}

/// Colour convention for field components
pub fn axis_colour(axis: Axis) -> Rgb {
    match axis {
        Axis::X => Rgb::BLUE,
        Axis::Y => Rgb::RED,
        Axis::Z => Rgb::GREEN,
    }
}

/// Marker convention for field components
pub fn axis_marker(axis: Axis) -> Marker {
    match axis {
        Axis::X => Marker::Circle,
        Axis::Y => Marker::Square,
        Axis::Z => Marker::Triangle,
    }
}

fn component_figure(stem: &str, x_range: std::ops::Range<f64>, series: Vec<Series>) -> Figure {
    Figure {
        stem: stem.to_string(),
        title: None,
        x_label: DISTANCE_LABEL.to_string(),
        y_label: COMPONENT_LABEL.to_string(),
        x_range,
        y_range: -4.8..5.0,
        size: COMPONENT_SIZE,
        legend: LegendPosition::UpperLeft,
        series,
    }
}

/// Ground truth X/Y/Z as markers only
pub fn original_figure(original: &FieldSample) -> Figure {
    let series = Axis::ALL
        .iter()
        .map(|&axis| {
            Series::new(
                axis.name(),
                original.component_points(axis),
                SeriesStyle::markers(axis_colour(axis), axis_marker(axis)),
            )
        })
        .collect();

    component_figure(stems::ORIGINAL, -35.0..30.0, series)
}

/// Faint ground truth markers under solid interpolated X/Y/Z lines
pub fn overlay_figure(stem: &str, interpolated: &FieldSample, original: &FieldSample) -> Figure {
    let mut series = Vec::with_capacity(6);

    for axis in Axis::ALL {
        series.push(Series::unlabelled(
            original.component_points(axis),
            SeriesStyle::markers(axis_colour(axis), axis_marker(axis)).with_opacity(FAINT),
        ));
    }
    for axis in Axis::ALL {
        series.push(Series::new(
            axis.name(),
            interpolated.component_points(axis),
            SeriesStyle::line(axis_colour(axis), LineStyle::Solid),
        ));
    }

    component_figure(stem, -50.0..40.0, series)
}

pub fn nearest_figure(nearest: &FieldSample, original: &FieldSample) -> Figure {
    overlay_figure(stems::NEAREST, nearest, original)
}

pub fn linear_figure(linear: &FieldSample, original: &FieldSample) -> Figure {
    overlay_figure(stems::LINEAR, linear, original)
}

pub fn linear_mag_figure(linear_mag: &FieldSample, original: &FieldSample) -> Figure {
    overlay_figure(stems::LINEAR_MAG, linear_mag, original)
}

pub fn cubic_figure(cubic: &FieldSample, original: &FieldSample) -> Figure {
    overlay_figure(stems::CUBIC, cubic, original)
}

/// |B|² of linear and magnitude-preserving linear interpolation against the
/// ground truth
pub fn linear_magnitude_figure(
    linear: &FieldSample,
    linear_mag: &FieldSample,
    original: &FieldSample,
) -> Figure {
    let series = vec![
        Series::new(
            "original",
            original.magnitude_points(),
            SeriesStyle::markers(Rgb::GREEN, Marker::Point),
        ),
        Series::new(
            "linear",
            linear.magnitude_points(),
            SeriesStyle::line(Rgb::BLUE, LineStyle::Solid),
        ),
        Series::new(
            "linear magnitude",
            linear_mag.magnitude_points(),
            SeriesStyle::line(Rgb::RED, LineStyle::Dashed),
        ),
    ];

    Figure {
        stem: stems::LINEAR_MAG_COMPARISON.to_string(),
        title: None,
        x_label: DISTANCE_LABEL.to_string(),
        y_label: "Field Magnitude Squared (T²)".to_string(),
        x_range: -50.0..40.0,
        y_range: -5.0..25.0,
        size: COMPARISON_SIZE,
        legend: LegendPosition::UpperLeft,
        series,
    }
}

/// Style of each data set in the per-axis comparison
fn comparison_style(dataset: Dataset) -> SeriesStyle {
    match dataset {
        Dataset::Original => SeriesStyle::markers(Rgb::BLUE, Marker::Circle).with_opacity(0.8),
        Dataset::Nearest => SeriesStyle::line(Rgb::BLUE, LineStyle::Dotted),
        Dataset::Linear => SeriesStyle::line(Rgb::RED, LineStyle::Dashed),
        Dataset::LinearMagnitude => SeriesStyle::line(Rgb::GREEN, LineStyle::DashDot),
        Dataset::Cubic => SeriesStyle::line(Rgb::GREY, LineStyle::Solid),
    }
}

/// All five data sets for a single field component
pub fn axis_comparison_figure(set: &ComparisonSet, axis: Axis) -> Figure {
    let series = Dataset::ALL
        .iter()
        .map(|&d| Series::new(d.label(), set.get(d).component_points(axis), comparison_style(d)))
        .collect();

    let y_range = match axis {
        Axis::X => -3.5..4.5,
        Axis::Y | Axis::Z => -2.5..2.5,
    };

    Figure {
        stem: format!("{}{}", stems::INTERPOLATED_PREFIX, axis.suffix()),
        title: Some(format!("{}-Component of B Field", axis.name())),
        x_label: format!("{} (cm)", axis.name()),
        y_label: "Field (T)".to_string(),
        x_range: -65.0..65.0,
        y_range,
        size: COMPARISON_SIZE,
        legend: LegendPosition::UpperRight,
        series,
    }
}

/// One figure per field component, in X, Y, Z order
pub fn compare_1d_figures(set: &ComparisonSet) -> [Figure; 3] {
    Axis::ALL.map(|axis| axis_comparison_figure(set, axis))
}
