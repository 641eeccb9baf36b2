//! Time-series charts of heat pump run results.
//!
//! [`HeatPumpVisualizer`] turns result rows into a three-panel figure
//! (COP, compressor power, exchanger duties over the hour index, labelled
//! with dataset timestamps when present) and renders
//! it with `plotters`, as SVG or as a bitmap depending on the file extension.

pub mod config;
pub mod timeseries;

pub use config::PlotConfig;
pub use timeseries::{Figure, HeatPumpVisualizer};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Nothing to render: call plot_timeseries first")]
    NothingPrepared,

    #[error("Drawing backend error: {0}")]
    Backend(String),

    #[error("Failed to register chart font family '{0}'")]
    Font(String),

    #[error("Invalid plot configuration: {0}")]
    InvalidConfig(String),
}

pub type PlotResult<T> = Result<T, PlotError>;
