//! Scatter plots of benchmark series.
//!
//! Charts are drawn with `plotters`; the path's extension picks the backend.
//! Each series gets one color from a fixed palette (green, then red, then the
//! rest) and the same circular marker; a comparison run shares one figure and
//! one legend.

use std::ops::Range;
use std::path::Path;

use plotters::coord::combinators::{IntoLogRange, LogCoord};
use plotters::coord::ranged1d::{Ranged, ValueFormatter};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use sweepbench_config::PlotConfig;
use sweepbench_core::{BoxError, Result, SweepBenchError};

use crate::result::BenchmarkRun;

const PALETTE: [RGBColor; 7] = [GREEN, RED, BLUE, MAGENTA, CYAN, BLACK, YELLOW];

const MARKER_SIZE: i32 = 3;

/// Renders all series of a run into one artifact at `path`.
pub trait PlotSink {
    fn render(&mut self, run: &BenchmarkRun, chart: &PlotConfig, path: &Path) -> Result<()>;
}

/// Image formats the scatter plot can write.
///
/// ```
/// use std::path::Path;
/// use sweepbench_benchmark::PlotFormat;
///
/// assert_eq!(PlotFormat::from_path(Path::new("sp_random_50.png")), Some(PlotFormat::Png));
/// assert_eq!(PlotFormat::from_path(Path::new("ladder.SVG")), Some(PlotFormat::Svg));
/// assert_eq!(PlotFormat::from_path(Path::new("antichain-based-55n-1s.pdf")), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotFormat {
    Svg,
    Png,
}

impl PlotFormat {
    /// Picks the format from the extension, ignoring case.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "svg" => Some(Self::Svg),
            "png" => Some(Self::Png),
            _ => None,
        }
    }
}

/// Scatter-plot renderer.
///
/// Writes `.svg` and `.png` files. Any other extension fails with
/// [`SweepBenchError::UnsupportedFormat`] before a file is created.
///
/// # Example
///
/// ```
/// use sweepbench_benchmark::{BenchmarkRun, Measurement, ScatterPlot};
/// use sweepbench_config::PlotConfig;
///
/// let mut run = BenchmarkRun::new("Strong parity", "Random graph", ["Execution time"]);
/// run.record(0, Measurement::from_secs(1, 0.002));
/// run.record(0, Measurement::from_secs(11, 0.03));
///
/// let svg = ScatterPlot::to_svg(&run, &PlotConfig::default()).unwrap();
/// assert!(svg.contains("<svg"));
/// assert_eq!(svg.matches("<circle").count(), 2 + 1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ScatterPlot;

impl ScatterPlot {
    pub fn new() -> Self {
        Self
    }

    /// Draws `run` into an in-memory SVG document.
    pub fn to_svg(run: &BenchmarkRun, chart: &PlotConfig) -> std::result::Result<String, BoxError> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, canvas_size(chart)).into_drawing_area();
            draw(&root, run, chart)?;
            root.present()?;
        }
        Ok(svg)
    }
}

impl PlotSink for ScatterPlot {
    fn render(&mut self, run: &BenchmarkRun, chart: &PlotConfig, path: &Path) -> Result<()> {
        let format = PlotFormat::from_path(path).ok_or_else(|| SweepBenchError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;

        let size = canvas_size(chart);
        let drawn = match format {
            PlotFormat::Svg => present(SVGBackend::new(path, size).into_drawing_area(), run, chart),
            PlotFormat::Png => {
                present(BitMapBackend::new(path, size).into_drawing_area(), run, chart)
            }
        };
        drawn.map_err(|source| SweepBenchError::Rendering {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn canvas_size(chart: &PlotConfig) -> (u32, u32) {
    (chart.width.max(200), chart.height.max(150))
}

/// Draws the chart and flushes the backend to its target.
fn present<DB>(
    root: DrawingArea<DB, Shift>,
    run: &BenchmarkRun,
    chart: &PlotConfig,
) -> std::result::Result<(), BoxError>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    draw(&root, run, chart)?;
    root.present()?;
    Ok(())
}

fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    run: &BenchmarkRun,
    chart: &PlotConfig,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;
    let x = parameter_range(run);
    if chart.log_scale {
        let (low, high) = positive_bounds(run);
        let y: LogCoord<f64> = (low..high).log_scale().into();
        draw_series(root, run, chart, x, y)
    } else {
        let high = run
            .series()
            .iter()
            .flat_map(|s| s.values())
            .fold(0.0, f64::max);
        let high = if high > 0.0 { high * 1.1 } else { 1.0 };
        let y: RangedCoordf64 = (0.0..high).into();
        draw_series(root, run, chart, x, y)
    }
}

fn draw_series<DB, Y>(
    root: &DrawingArea<DB, Shift>,
    run: &BenchmarkRun,
    chart: &PlotConfig,
    x: Range<i64>,
    y: Y,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>>
where
    DB: DrawingBackend,
    Y: Ranged<ValueType = f64> + ValueFormatter<f64>,
{
    let title = chart.title.as_deref().unwrap_or(&run.name);
    let mut context = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 20))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x, y)?;

    context
        .configure_mesh()
        .x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label.as_str())
        .draw()?;

    for (index, series) in run.series().iter().enumerate() {
        let color = PALETTE[index % PALETTE.len()];
        // A logarithmic axis cannot place zero.
        let points: Vec<(i64, f64)> = series
            .measurements()
            .iter()
            .filter(|m| !chart.log_scale || m.value() > 0.0)
            .map(|m| (m.parameter(), m.value()))
            .collect();
        context
            .draw_series(
                points
                    .into_iter()
                    .map(|point| Circle::new(point, MARKER_SIZE, color.filled())),
            )?
            .label(series.label())
            .legend(move |(x, y)| Circle::new((x, y), MARKER_SIZE, color.filled()));
    }

    context
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    Ok(())
}

/// Swept parameters padded by a twentieth of their span on each side.
fn parameter_range(run: &BenchmarkRun) -> Range<i64> {
    let (low, high) = run
        .series()
        .iter()
        .flat_map(|s| s.parameters())
        .fold((i64::MAX, i64::MIN), |(lo, hi), p| (lo.min(p), hi.max(p)));
    if low > high {
        return 0..1;
    }
    let pad = ((high - low) / 20).max(1);
    low.saturating_sub(pad)..high.saturating_add(pad)
}

fn positive_bounds(run: &BenchmarkRun) -> (f64, f64) {
    let (low, high) = run
        .series()
        .iter()
        .flat_map(|s| s.values())
        .filter(|v| v.is_finite() && *v > 0.0)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if low > high {
        (1e-6, 1.0)
    } else {
        (low / 2.0, high * 2.0)
    }
}
