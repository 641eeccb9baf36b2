//! Application service layer for the heat pump workspace.
//!
//! Builds the cycle model from a configuration, reads hourly datasets, runs
//! one off-design solve per row and persists the outcome.

pub mod dataset;
pub mod error;
pub mod model;
pub mod progress;
pub mod project_service;
pub mod run_service;
pub mod runner;

pub use dataset::{ColumnMap, Dataset, DatasetRow, SideColumns, TableLayout, find_col};
pub use error::{AppError, AppResult};
pub use model::{
    CycleResults, DesignPoint, Diagnostic, HeatPumpModel, NetworkExport, OffDesignInputs,
    OffDesignOutcome, labels,
};
pub use progress::{ProgressCallback, RowProgress, RunProgressEvent, RunStage};
pub use project_service::{ConfigSummary, init_config, load_config, save_config, summarize};
pub use run_service::{
    DatasetSource, RunOptions, RunRequest, RunResponse, ensure_run, ensure_run_with_progress,
    list_runs,
};
pub use runner::{CycleModel, TimeSeriesRunner};
