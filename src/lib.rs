pub mod apsis_errors;
pub mod config;
pub mod constants;
pub mod extrema;
pub mod formats;
pub mod loader;
pub mod orbit_quantity;
pub mod pipeline;
pub mod plot;
pub mod quantity;
pub mod series;
pub mod time;
pub mod trend;

pub use apsis_errors::ApsisError;
pub use config::PipelineConfig;
pub use formats::FileFormat;
pub use loader::PlotDataset;
pub use pipeline::{run, RunReport};
pub use quantity::Quantity;
