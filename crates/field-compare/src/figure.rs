//! Backend-independent chart descriptions
//!
//! A `Figure` holds everything needed to draw one image: axis setup, legend
//! placement and the styled data series. Builders in `plots` produce them,
//! `render` turns them into files.

use std::ops::Range;

/// 8-bit RGB colour
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    // matplotlib single-letter colours
    pub const BLUE: Rgb = Rgb(0, 0, 255);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const GREEN: Rgb = Rgb(0, 128, 0);
    pub const GREY: Rgb = Rgb(128, 128, 128);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
    None,
    Circle,
    Square,
    Triangle,
    /// Small dot
    Point,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStyle {
    None,
    Solid,
    Dotted,
    Dashed,
    DashDot,
}

impl LineStyle {
    /// Dash length and gap in pixels for the broken styles
    pub fn dash_pattern(self) -> Option<(u32, u32)> {
        match self {
            LineStyle::Dotted => Some((2, 3)),
            LineStyle::Dashed => Some((8, 4)),
            LineStyle::DashDot => Some((10, 3)),
            LineStyle::None | LineStyle::Solid => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LegendPosition {
    UpperLeft,
    UpperRight,
}

/// How a series is drawn
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeriesStyle {
    pub colour: Rgb,
    pub opacity: f64,
    pub marker: Marker,
    pub line: LineStyle,
}

impl SeriesStyle {
    /// Unconnected markers
    pub fn markers(colour: Rgb, marker: Marker) -> Self {
        Self {
            colour,
            opacity: 1.0,
            marker,
            line: LineStyle::None,
        }
    }

    /// A line without markers
    pub fn line(colour: Rgb, line: LineStyle) -> Self {
        Self {
            colour,
            opacity: 1.0,
            marker: Marker::None,
            line,
        }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }
}

/// One plotted data set
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    /// Legend entry; unlabelled series are left out of the legend
    pub label: Option<String>,
    pub points: Vec<(f64, f64)>,
    pub style: SeriesStyle,
}

impl Series {
    pub fn new(label: impl Into<String>, points: Vec<(f64, f64)>, style: SeriesStyle) -> Self {
        Self {
            label: Some(label.into()),
            points,
            style,
        }
    }

    pub fn unlabelled(points: Vec<(f64, f64)>, style: SeriesStyle) -> Self {
        Self {
            label: None,
            points,
            style,
        }
    }
}

/// A complete chart, written to `<stem>.<ext>`
#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    pub stem: String,
    pub title: Option<String>,
    pub x_label: String,
    pub y_label: String,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    /// Width and height in pixels
    pub size: (u32, u32),
    pub legend: LegendPosition,
    pub series: Vec<Series>,
}

impl Figure {
    pub fn has_legend(&self) -> bool {
        self.series.iter().any(|s| s.label.is_some())
    }

    pub fn series_by_label(&self, label: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.label.as_deref() == Some(label))
    }
}
