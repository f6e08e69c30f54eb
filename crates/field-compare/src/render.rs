//! Draw `Figure`s to SVG or PNG files with plotters

use crate::error::{PlotError, Result};
use crate::figure::{Figure, LegendPosition, LineStyle, Marker, Series};
use crate::ImageFormat;
use plotters::coord::types::RangedCoordf64;
use plotters::element::DashedPathElement;
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};
use std::error::Error;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::info;

type Chart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

const LINE_WIDTH: u32 = 2;
const MARKER_SIZE: i32 = 4;
/// Width of a legend line sample (px)
const LEGEND_SAMPLE: i32 = 20;

const FONT_FAMILY: &str = "sans-serif";
static FONT: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// Register the bundled font with plotters once per process; every label,
/// caption and legend entry is drawn with it
fn ensure_font() -> std::result::Result<(), String> {
    static REGISTERED: OnceLock<std::result::Result<(), String>> = OnceLock::new();
    REGISTERED
        .get_or_init(|| {
            register_font(FONT_FAMILY, FontStyle::Normal, FONT)
                .map_err(|_| "bundled font rejected: InvalidFont".to_string())
        })
        .clone()
}

/// Render `figure` into `dir`, returning the written path
pub fn render(figure: &Figure, dir: &Path, format: ImageFormat) -> Result<PathBuf> {
    let path = dir.join(format.file_name(&figure.stem));
    let render_error = |message: String| PlotError::Render {
        path: path.clone(),
        message,
    };

    ensure_font().map_err(render_error)?;
    let drawn = match format {
        ImageFormat::Svg => draw(SVGBackend::new(&path, figure.size), figure),
        ImageFormat::Png => draw(BitMapBackend::new(&path, figure.size), figure),
    };
    drawn.map_err(|e| render_error(e.to_string()))?;

    info!("Wrote {:?} ({} series)", path, figure.series.len());
    Ok(path)
}

fn draw<DB: DrawingBackend>(backend: DB, figure: &Figure) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&WHITE)?;

    let mut builder = ChartBuilder::on(&root);
    builder.margin(15).x_label_area_size(45).y_label_area_size(60);
    if let Some(title) = &figure.title {
        builder.caption(title, (FONT_FAMILY, 20));
    }
    let mut chart = builder.build_cartesian_2d(figure.x_range.clone(), figure.y_range.clone())?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(figure.x_label.as_str())
        .y_desc(figure.y_label.as_str())
        .label_style((FONT_FAMILY, 14))
        .axis_desc_style((FONT_FAMILY, 16))
        .draw()?;

    for series in &figure.series {
        draw_series(&mut chart, series, figure)?;
    }

    if figure.has_legend() {
        let position = match figure.legend {
            LegendPosition::UpperLeft => SeriesLabelPosition::UpperLeft,
            LegendPosition::UpperRight => SeriesLabelPosition::UpperRight,
        };
        chart
            .configure_series_labels()
            .position(position)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font((FONT_FAMILY, 14))
            .draw()?;
    }

    root.present()?;
    Ok(())
}

/// Markers drawn by the chart: those inside both ranges
fn visible_markers(series: &Series, figure: &Figure) -> Vec<(f64, f64)> {
    series
        .points
        .iter()
        .copied()
        .filter(|(x, y)| figure.x_range.contains(x) && figure.y_range.contains(y))
        .collect()
}

/// Cut a polyline to the plot window. Segments leaving the window end on its
/// border, and each unbroken stretch becomes its own run.
fn clip_line(points: &[(f64, f64)], x: &Range<f64>, y: &Range<f64>) -> Vec<Vec<(f64, f64)>> {
    let mut runs: Vec<Vec<(f64, f64)>> = Vec::new();
    let mut open = false;

    for pair in points.windows(2) {
        let Some((start, end)) = clip_segment(pair[0], pair[1], x, y) else {
            open = false;
            continue;
        };
        match runs.last_mut() {
            Some(run) if open && run.last() == Some(&start) => run.push(end),
            _ => runs.push(vec![start, end]),
        }
        // the next segment continues this run only if this one reached its end point
        open = end == pair[1];
    }
    runs
}

/// Liang-Barsky clipping of the segment `a`-`b` against the closed window
fn clip_segment(
    a: (f64, f64),
    b: (f64, f64),
    x: &Range<f64>,
    y: &Range<f64>,
) -> Option<((f64, f64), (f64, f64))> {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);

    for (p, q) in [
        (-dx, a.0 - x.start),
        (dx, x.end - a.0),
        (-dy, a.1 - y.start),
        (dy, y.end - a.1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    let at = |t: f64| {
        if t == 0.0 {
            a
        } else if t == 1.0 {
            b
        } else {
            (a.0 + t * dx, a.1 + t * dy)
        }
    };
    Some((at(t0), at(t1)))
}

fn draw_series<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    series: &Series,
    figure: &Figure,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let style = series.style;
    let (r, g, b) = (style.colour.0, style.colour.1, style.colour.2);
    let colour = RGBColor(r, g, b).mix(style.opacity);
    let stroke = colour.stroke_width(LINE_WIDTH);
    let fill = colour.filled();

    // lines under markers
    if style.line != LineStyle::None {
        for run in clip_line(&series.points, &figure.x_range, &figure.y_range) {
            match style.line.dash_pattern() {
                None => {
                    chart.draw_series(LineSeries::new(run, stroke))?;
                }
                Some((size, spacing)) => {
                    chart.draw_series(DashedLineSeries::new(run, size, spacing, stroke))?;
                }
            }
        }
    }

    let points = visible_markers(series, figure);
    match style.marker {
        Marker::None => {}
        Marker::Circle => {
            chart.draw_series(points.iter().map(|&p| Circle::new(p, MARKER_SIZE, fill)))?;
        }
        Marker::Point => {
            chart.draw_series(points.iter().map(|&p| Circle::new(p, 2, fill)))?;
        }
        Marker::Square => {
            chart.draw_series(points.iter().map(|&p| {
                EmptyElement::at(p)
                    + Rectangle::new([(-MARKER_SIZE, -MARKER_SIZE), (MARKER_SIZE, MARKER_SIZE)], fill)
            }))?;
        }
        Marker::Triangle => {
            chart.draw_series(points.iter().map(|&p| TriangleMarker::new(p, MARKER_SIZE + 1, fill)))?;
        }
    }

    let Some(label) = &series.label else {
        return Ok(());
    };

    // Legend entry only, nothing is drawn for it on the plot itself
    let anno = chart.draw_series(std::iter::empty::<Circle<(f64, f64), i32>>())?;
    anno.label(label.as_str());
    if style.line != LineStyle::None {
        match style.line.dash_pattern() {
            None => {
                anno.legend(move |(x, y)| PathElement::new(vec![(x, y), (x + LEGEND_SAMPLE, y)], stroke));
            }
            Some((size, spacing)) => {
                anno.legend(move |(x, y)| {
                    DashedPathElement::new(vec![(x, y), (x + LEGEND_SAMPLE, y)], size, spacing, stroke)
                });
            }
        }
        return Ok(());
    }
    match style.marker {
        Marker::Circle => {
            anno.legend(move |(x, y)| Circle::new((x + 10, y), MARKER_SIZE, fill));
        }
        Marker::Point => {
            anno.legend(move |(x, y)| Circle::new((x + 10, y), 2, fill));
        }
        Marker::Square => {
            anno.legend(move |(x, y)| {
                Rectangle::new(
                    [(x + 10 - MARKER_SIZE, y - MARKER_SIZE), (x + 10 + MARKER_SIZE, y + MARKER_SIZE)],
                    fill,
                )
            });
        }
        Marker::Triangle => {
            anno.legend(move |(x, y)| TriangleMarker::new((x + 10, y), MARKER_SIZE + 1, fill));
        }
        Marker::None => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::ComparisonSet;
    use crate::field::{FieldRecord, FieldSample};
    use crate::figure::{Rgb, SeriesStyle};
    use crate::plots;

    fn figure() -> Figure {
        Figure {
            stem: "sketch".into(),
            title: Some("Sketch".into()),
            x_label: "x".into(),
            y_label: "y".into(),
            x_range: -1.0..1.0,
            y_range: -1.0..1.0,
            size: (320, 240),
            legend: LegendPosition::UpperLeft,
            series: vec![
                Series::new(
                    "line",
                    vec![(-0.5, 0.0), (0.5, 0.5)],
                    SeriesStyle::line(Rgb::RED, LineStyle::Dashed),
                ),
                Series::unlabelled(
                    vec![(0.0, 0.0), (2.0, 0.0)],
                    SeriesStyle::markers(Rgb::BLUE, Marker::Square).with_opacity(0.2),
                ),
            ],
        }
    }

    fn sample(rows: &[(f64, f64, f64, f64)]) -> FieldSample {
        FieldSample::from_records(
            rows.iter()
                .map(|&(x, bx, by, bz)| FieldRecord::new(x, bx, by, bz))
                .collect(),
        )
    }

    #[test]
    fn test_markers_clip_to_both_ranges() {
        let fig = figure();
        assert_eq!(visible_markers(&fig.series[1], &fig), vec![(0.0, 0.0)]);

        let tall = Series::unlabelled(vec![(0.0, 5.0)], SeriesStyle::markers(Rgb::RED, Marker::Circle));
        assert!(visible_markers(&tall, &fig).is_empty());
    }

    #[test]
    fn test_line_breaks_where_it_leaves_the_window() {
        let window = -1.0..1.0;
        let runs = clip_line(&[(-0.5, 0.0), (0.0, 2.0), (0.5, 0.0)], &window, &window);
        assert_eq!(
            runs,
            vec![vec![(-0.5, 0.0), (-0.25, 1.0)], vec![(0.25, 1.0), (0.5, 0.0)]]
        );
    }

    #[test]
    fn test_line_inside_window_stays_whole() {
        let window = -1.0..1.0;
        let points = vec![(-0.5, 0.0), (0.0, 0.5), (0.5, -0.5)];
        assert_eq!(clip_line(&points, &window, &window), vec![points]);
    }

    #[test]
    fn test_line_outside_window_is_dropped() {
        let window = -1.0..1.0;
        assert!(clip_line(&[(-0.5, 3.0), (0.5, 4.0)], &window, &window).is_empty());
        assert!(clip_line(&[(0.0, 0.0)], &window, &window).is_empty());

        // x clipping ends the line on the window edge
        let runs = clip_line(&[(0.0, 0.0), (2.0, 0.0)], &window, &window);
        assert_eq!(runs, vec![vec![(0.0, 0.0), (1.0, 0.0)]]);
    }

    #[test]
    fn test_svg_render_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let fig = figure();

        let path = render(&fig, dir.path(), ImageFormat::Svg).unwrap();
        assert_eq!(path, dir.path().join("sketch.svg"));
        let first = std::fs::read(&path).unwrap();
        assert!(String::from_utf8_lossy(&first).contains("<svg"));

        render(&fig, dir.path(), ImageFormat::Svg).unwrap();
        assert_eq!(first, std::fs::read(&path).unwrap());
    }

    #[test]
    fn test_legend_sample_follows_dash_pattern() {
        let dir = tempfile::tempdir().unwrap();

        // Data lies off the chart, so red strokes only come from the legend
        let red_strokes = |line: LineStyle| {
            let fig = Figure {
                title: None,
                series: vec![Series::new(
                    "line",
                    vec![(5.0, 5.0), (6.0, 6.0)],
                    SeriesStyle::line(Rgb::RED, line),
                )],
                ..figure()
            };
            let path = render(&fig, dir.path(), ImageFormat::Svg).unwrap();
            let svg = std::fs::read_to_string(path).unwrap().to_lowercase();
            svg.matches("#ff0000").count()
        };

        assert_eq!(red_strokes(LineStyle::Solid), 1);
        // 8 px dashes with 4 px gaps fit twice in the 20 px sample
        assert!(red_strokes(LineStyle::Dashed) >= 2);
        assert!(red_strokes(LineStyle::Dotted) > red_strokes(LineStyle::Dashed));
    }

    #[test]
    fn test_png_render_every_figure_kind() {
        let dir = tempfile::tempdir().unwrap();
        let truth = sample(&[(-20.0, 1.0, -2.0, 3.0), (0.0, 4.0, 0.5, -1.0), (20.0, -3.0, 2.0, 1.5)]);
        let set = ComparisonSet {
            original: truth.clone(),
            nearest: truth.clone(),
            linear: truth.clone(),
            linear_mag: truth.clone(),
            cubic: truth.clone(),
        };

        let mut figures = vec![
            plots::original_figure(&truth),
            plots::nearest_figure(&truth, &truth),
            plots::linear_magnitude_figure(&truth, &truth, &truth),
        ];
        figures.extend(plots::compare_1d_figures(&set));

        for fig in &figures {
            let path = render(fig, dir.path(), ImageFormat::Png).unwrap();
            let bytes = std::fs::read(&path).unwrap();
            assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n", "{:?}", path);
        }
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 6);
    }

    #[test]
    fn test_render_into_missing_dir_fails() {
        let err = render(&figure(), Path::new("/nonexistent/out"), ImageFormat::Svg).unwrap_err();
        assert!(matches!(err, PlotError::Render { .. }));
    }
}
