//! hp-results: result tables, run manifests and run storage.

pub mod hash;
pub mod store;
pub mod table;
pub mod types;

pub use hash::{compute_config_id, compute_run_id, digest_bytes};
pub use store::RunStore;
pub use table::{read_failures_csv, read_results_csv, write_failures_csv, write_results_csv};
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Run not found: {run_id}")]
    RunNotFound { run_id: String },

    #[error("Invalid path: {message}")]
    InvalidPath { message: String },
}
