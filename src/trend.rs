//! # Linear trend of the extrema
//!
//! Each file's extrema are summarised by an ordinary-least-squares line
//! `value = slope · elapsed_hours + intercept`. The slope is the orbit decay (or
//! growth) rate in km per hour, which is what the comparison chart is about.
//!
//! ## Start alignment
//! -----------------
//! Predicted orbits and the measured one rarely start from the exact same value,
//! which hides the slope differences on a shared axis. With start alignment, every
//! line keeps its own slope but takes a common intercept: the mean of the first
//! extremum of each predicted (non-GPS) file. Without any predicted file the fitted
//! intercepts are kept.

use comfy_table::{presets::UTF8_FULL, Cell, Table};
use nalgebra::{DMatrix, DVector};
use tracing::debug;

use crate::{
    apsis_errors::ApsisError,
    formats::FileFormat,
    loader::{FileSeries, PlotDataset},
    series::ExtremumPoint,
};

/// Relative threshold on the singular values below which the design matrix is rank deficient.
const RANK_EPS: f64 = 1e-12;

/// `y = slope · x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Least-squares line through `(x, y)`.
    ///
    /// The system `[x 1] · [slope intercept]ᵀ = y` is solved with an SVD so that
    /// poorly scaled abscissae (hundreds of hours) stay well conditioned.
    ///
    /// Arguments
    /// -----------------
    /// * `file` – File name, only used in error messages.
    /// * `x`, `y` – Abscissae and ordinates, same length.
    ///
    /// Return
    /// ----------
    /// * [`ApsisError::InsufficientPoints`] with fewer than 2 points.
    /// * [`ApsisError::SingularFit`] when all abscissae are equal.
    pub fn fit(file: &str, x: &[f64], y: &[f64]) -> Result<LinearFit, ApsisError> {
        let n = x.len().min(y.len());
        if n < 2 {
            return Err(ApsisError::InsufficientPoints {
                file: file.to_string(),
                found: n,
            });
        }

        let design = DMatrix::from_fn(n, 2, |i, j| if j == 0 { x[i] } else { 1.0 });
        let rhs = DVector::from_column_slice(&y[..n]);

        let svd = design.svd(true, true);
        let eps = RANK_EPS * svd.singular_values.max();
        if svd.rank(eps) < 2 {
            return Err(ApsisError::SingularFit {
                file: file.to_string(),
            });
        }
        let solution = svd
            .solve(&rhs, eps)
            .map_err(|_| ApsisError::SingularFit {
                file: file.to_string(),
            })?;

        Ok(LinearFit {
            slope: solution[0],
            intercept: solution[1],
        })
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fitted line of one file, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendLine {
    pub file_name: String,
    pub format: FileFormat,
    pub fit: LinearFit,
    /// First and last elapsed hour of the file's extrema.
    pub x_range: (f64, f64),
    pub points: Vec<ExtremumPoint>,
}

impl TrendLine {
    fn from_file(file: &FileSeries) -> Result<TrendLine, ApsisError> {
        let x = file.series.elapsed_hours();
        let y = file.series.values();
        let fit = LinearFit::fit(&file.file_name, &x, &y)?;

        let x_range = x
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });

        Ok(TrendLine {
            file_name: file.file_name.clone(),
            format: file.format,
            fit,
            x_range,
            points: file.series.points().to_vec(),
        })
    }

    /// The two end points of the fitted segment.
    pub fn segment(&self) -> [(f64, f64); 2] {
        let (x0, x1) = self.x_range;
        [(x0, self.fit.evaluate(x0)), (x1, self.fit.evaluate(x1))]
    }
}

/// Mean first value of the predicted (non-measured) files, `None` without any.
pub fn aligned_intercept(dataset: &PlotDataset) -> Option<f64> {
    let firsts: Vec<f64> = dataset
        .iter()
        .filter(|f| !f.format.is_measured())
        .filter_map(|f| f.series.first().map(|p| p.value))
        .collect();

    if firsts.is_empty() {
        None
    } else {
        Some(firsts.iter().sum::<f64>() / firsts.len() as f64)
    }
}

/// Fit a line to every file of the dataset, in dataset order.
///
/// With `start_aligned`, the intercepts are replaced by [`aligned_intercept`].
pub fn fit_dataset(dataset: &PlotDataset, start_aligned: bool) -> Result<Vec<TrendLine>, ApsisError> {
    let mut lines = dataset
        .iter()
        .map(TrendLine::from_file)
        .collect::<Result<Vec<_>, _>>()?;

    if start_aligned {
        if let Some(intercept) = aligned_intercept(dataset) {
            debug!(intercept, "aligning trend lines on a common start");
            for line in &mut lines {
                line.fit.intercept = intercept;
            }
        }
    }

    for line in &lines {
        debug!(
            file = line.file_name.as_str(),
            slope = line.fit.slope,
            intercept = line.fit.intercept,
            "trend fitted"
        );
    }
    Ok(lines)
}

/// Tabular summary of the fitted trends.
pub fn summary_table(lines: &[TrendLine]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "file",
        "format",
        "extrema",
        "first h",
        "last h",
        "slope (km/h)",
        "intercept (km)",
    ]);

    for line in lines {
        table.add_row(vec![
            Cell::new(&line.file_name),
            Cell::new(line.format),
            Cell::new(line.points.len()),
            Cell::new(format!("{:.3}", line.x_range.0)),
            Cell::new(format!("{:.3}", line.x_range.1)),
            Cell::new(format!("{:.6e}", line.fit.slope)),
            Cell::new(format!("{:.6}", line.fit.intercept)),
        ]);
    }
    table
}
