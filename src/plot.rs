//! # Trend chart rendering
//!
//! Draws one fitted segment per file (over that file's own elapsed-time range) on a
//! shared chart and writes it as an SVG document. Colours follow a fixed 12-entry
//! palette, cycled in file order. The legend is laid out in rows of five below the
//! plot area so that long file names never cover the lines.

use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use tracing::info;

use crate::{apsis_errors::ApsisError, quantity::Quantity, trend::TrendLine};

pub const X_AXIS_LABEL: &str = "Elapsed Time / hours";
pub const TITLE_SUFFIX: &str = " - OLS reg";

/// aqua, crimson, blue, blueviolet, brown, cadetblue, chartreuse, black,
/// darkgoldenrod, darkgreen, darkslateblue, darkslategray.
pub const PALETTE: [RGBColor; 12] = [
    RGBColor(0, 255, 255),
    RGBColor(220, 20, 60),
    RGBColor(0, 0, 255),
    RGBColor(138, 43, 226),
    RGBColor(165, 42, 42),
    RGBColor(95, 158, 160),
    RGBColor(127, 255, 0),
    RGBColor(0, 0, 0),
    RGBColor(184, 134, 11),
    RGBColor(0, 100, 0),
    RGBColor(72, 61, 139),
    RGBColor(47, 79, 79),
];

const GRID_COLOR: RGBColor = RGBColor(128, 128, 128);
const GRID_LINES: usize = 8;
const LEGEND_COLUMNS: usize = 5;
const LEGEND_ROW_HEIGHT: u32 = 22;

/// Drawing parameters of one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec<'a> {
    pub output: &'a camino::Utf8Path,
    pub size: (u32, u32),
    pub quantity: Quantity,
    /// Chart title, without the regression suffix.
    pub title: &'a str,
    pub scatter: bool,
}

impl ChartSpec<'_> {
    pub fn caption(&self) -> String {
        format!("{}{TITLE_SUFFIX}", self.title).trim().to_string()
    }
}

/// Colour of the `index`-th file.
pub fn palette_color(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

fn plot_err<E: std::fmt::Display>(e: E) -> ApsisError {
    ApsisError::Plot(e.to_string())
}

/// `(x_min, x_max, y_min, y_max)` covering every segment, and the markers when drawn.
fn bounds(lines: &[TrendLine], scatter: bool) -> (f64, f64, f64, f64) {
    let mut b = (
        f64::INFINITY,
        f64::NEG_INFINITY,
        f64::INFINITY,
        f64::NEG_INFINITY,
    );
    let mut include = |(x, y): (f64, f64)| {
        b = (b.0.min(x), b.1.max(x), b.2.min(y), b.3.max(y));
    };

    for line in lines {
        line.segment().into_iter().for_each(&mut include);
        if scatter {
            line.points
                .iter()
                .for_each(|p| include((p.elapsed_hours, p.value)));
        }
    }
    b
}

/// Widen `lo..hi` by 5 % on each side, or by one unit when the range is flat.
fn padded(lo: f64, hi: f64) -> (f64, f64) {
    let span = hi - lo;
    let pad = if span > 0.0 { 0.05 * span } else { 1.0 };
    (lo - pad, hi + pad)
}

/// Render the trend chart to `spec.output`.
///
/// Arguments
/// -----------------
/// * `lines` – Fitted lines, in legend order.
/// * `spec` – Output file, size, labels and marker switch.
///
/// Return
/// ----------
/// * [`ApsisError::Plot`] if there is nothing to draw or the backend fails.
pub fn render_trend_chart(lines: &[TrendLine], spec: &ChartSpec<'_>) -> Result<(), ApsisError> {
    if lines.is_empty() {
        return Err(ApsisError::Plot("no trend line to draw".into()));
    }

    if let Some(parent) = spec.output.parent().filter(|p| !p.as_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(plot_err)?;
    }

    let (width, height) = spec.size;
    let root = SVGBackend::new(spec.output, spec.size).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let legend_rows = lines.len().div_ceil(LEGEND_COLUMNS) as u32;
    let legend_height = (legend_rows * LEGEND_ROW_HEIGHT + 16).min(height / 2);
    let (chart_area, legend_area) = root.split_vertically((height - legend_height) as i32);

    let (x_min, x_max, y_min, y_max) = bounds(lines, spec.scatter);
    let (x0, x1) = padded(x_min, x_max);
    let (y0, y1) = padded(y_min, y_max);

    let mut chart = ChartBuilder::on(&chart_area)
        .caption(spec.caption(), ("sans-serif", 22).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(90)
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(X_AXIS_LABEL)
        .y_desc(spec.quantity.axis_label())
        .y_label_formatter(&|v| format!("{v:.3}"))
        .draw()
        .map_err(plot_err)?;

    // dashed horizontal grid
    for k in 1..GRID_LINES {
        let y = y0 + (y1 - y0) * k as f64 / GRID_LINES as f64;
        chart
            .draw_series(DashedLineSeries::new(
                [(x0, y), (x1, y)],
                6,
                4,
                GRID_COLOR.stroke_width(1),
            ))
            .map_err(plot_err)?;
    }

    for (i, line) in lines.iter().enumerate() {
        let color = palette_color(i);
        if spec.scatter {
            chart
                .draw_series(
                    line.points
                        .iter()
                        .map(|p| Circle::new((p.elapsed_hours, p.value), 3, color.filled())),
                )
                .map_err(plot_err)?;
        }
        chart
            .draw_series(LineSeries::new(line.segment(), color.stroke_width(2)))
            .map_err(plot_err)?;
    }

    let column_width = (width as i32 - 40) / LEGEND_COLUMNS as i32;
    for (i, line) in lines.iter().enumerate() {
        let x = 20 + (i % LEGEND_COLUMNS) as i32 * column_width;
        let y = 8 + (i / LEGEND_COLUMNS) as i32 * LEGEND_ROW_HEIGHT as i32;
        legend_area
            .draw(&PathElement::new(
                vec![(x, y + 7), (x + 24, y + 7)],
                palette_color(i).stroke_width(3),
            ))
            .map_err(plot_err)?;
        legend_area
            .draw(&Text::new(
                line.file_name.clone(),
                (x + 32, y),
                ("sans-serif", 14).into_font(),
            ))
            .map_err(plot_err)?;
    }

    root.present().map_err(plot_err)?;
    info!(output = spec.output.as_str(), lines = lines.len(), "trend chart written");
    Ok(())
}

#[cfg(test)]
mod plot_test {
    use camino::Utf8PathBuf;

    use super::*;
    use crate::{
        formats::FileFormat,
        series::ExtremumPoint,
        trend::LinearFit,
    };

    fn line(name: &str, slope: f64) -> TrendLine {
        TrendLine {
            file_name: name.to_string(),
            format: FileFormat::classify(name),
            fit: LinearFit {
                slope,
                intercept: 6_790.0,
            },
            x_range: (0.0, 24.0),
            points: vec![
                ExtremumPoint {
                    elapsed_hours: 0.0,
                    value: 6_790.5,
                },
                ExtremumPoint {
                    elapsed_hours: 24.0,
                    value: 6_789.0,
                },
            ],
        }
    }

    #[test]
    fn test_palette_cycles() {
        assert_eq!(palette_color(0), RGBColor(0, 255, 255));
        assert_eq!(palette_color(12), palette_color(0));
        assert_eq!(palette_color(7), BLACK);
    }

    #[test]
    fn test_padding_and_bounds() {
        assert_eq!(padded(0.0, 10.0), (-0.5, 10.5));
        assert_eq!(padded(3.0, 3.0), (2.0, 4.0));

        let lines = [line("a_OPS.txt", -0.1)];
        let (x0, x1, y0, y1) = bounds(&lines, false);
        assert_eq!((x0, x1), (0.0, 24.0));
        assert!((y0 - (6_790.0 - 2.4)).abs() < 1e-9);
        assert_eq!(y1, 6_790.0);
        assert_eq!(bounds(&lines, true).3, 6_790.5);
    }

    #[test]
    fn test_caption_suffix() {
        let output = Utf8PathBuf::from("x.svg");
        let spec = ChartSpec {
            output: &output,
            size: (800, 400),
            quantity: Quantity::Altitude,
            title: "",
            scatter: false,
        };
        assert_eq!(spec.caption(), "- OLS reg");
        let spec = ChartSpec {
            title: "Simulated Orbits vs Actual, Starting Day 001 of 2021",
            ..spec
        };
        assert_eq!(
            spec.caption(),
            "Simulated Orbits vs Actual, Starting Day 001 of 2021 - OLS reg"
        );
    }

    #[test]
    fn test_render_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let output = Utf8PathBuf::from_path_buf(dir.path().join("charts/trend.svg")).unwrap();
        let lines = [line("a_OPS_2021_001.txt", -0.1), line("b_GPS_2021_001.txt", -0.05)];
        let spec = ChartSpec {
            output: &output,
            size: (1000, 400),
            quantity: Quantity::SemiMajorAxis,
            title: "Trend",
            scatter: true,
        };

        render_trend_chart(&lines, &spec).unwrap();

        let svg = std::fs::read_to_string(&output).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("b_GPS_2021_001.txt"));
        assert!(svg.contains("Semi-Major Axis / km"));
    }

    #[test]
    fn test_nothing_to_draw() {
        let output = Utf8PathBuf::from("unused.svg");
        let spec = ChartSpec {
            output: &output,
            size: (800, 400),
            quantity: Quantity::Altitude,
            title: "",
            scatter: false,
        };
        assert!(matches!(
            render_trend_chart(&[], &spec),
            Err(ApsisError::Plot(_))
        ));
    }
}
