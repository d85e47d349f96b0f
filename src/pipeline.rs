//! # End-to-end run
//!
//! [`run`] chains the stages of one invocation:
//!
//! 1. load every input file of [`PipelineConfig::input_dir`] into a [`PlotDataset`],
//! 2. fit a linear trend per file (optionally start-aligned),
//! 3. render the SVG chart.
//!
//! The returned [`RunReport`] keeps the intermediate products so that callers can print
//! a summary or inspect the extrema without re-reading the files.

use tracing::info;

use crate::{
    apsis_errors::ApsisError,
    config::PipelineConfig,
    loader::{load_dataset, PlotDataset},
    plot::{render_trend_chart, ChartSpec},
    trend::{fit_dataset, summary_table, TrendLine},
};

#[derive(Debug, Clone)]
pub struct RunReport {
    pub dataset: PlotDataset,
    pub trends: Vec<TrendLine>,
    /// Title drawn on the chart, without the regression suffix.
    pub title: String,
}

impl RunReport {
    pub fn summary(&self) -> comfy_table::Table {
        summary_table(&self.trends)
    }
}

/// Load, fit and render according to `config`.
pub fn run(config: &PipelineConfig) -> Result<RunReport, ApsisError> {
    let dataset = load_dataset(&config.input_dir, &config.read_options())?;
    let trends = fit_dataset(&dataset, config.start_aligned)?;

    let title = config
        .title
        .clone()
        .or_else(|| dataset.title())
        .unwrap_or_default();

    let spec = ChartSpec {
        output: &config.output,
        size: config.plot_size,
        quantity: config.quantity,
        title: &title,
        scatter: config.scatter,
    };
    render_trend_chart(&trends, &spec)?;

    info!(
        files = dataset.len(),
        quantity = %config.quantity,
        output = config.output.as_str(),
        "run complete"
    );
    Ok(RunReport {
        dataset,
        trends,
        title,
    })
}
