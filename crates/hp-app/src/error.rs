//! Error types for the hp-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates
/// and provides a unified error interface for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read {path}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Model error: {0}")]
    Model(String),

    #[error("Solver error: {0}")]
    Solver(String),

    #[error("Fluid property error: {0}")]
    Fluid(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Column not found among {candidates:?} in {table} (columns: {columns:?})")]
    MissingColumn {
        table: String,
        candidates: Vec<String>,
        columns: Vec<String>,
    },

    #[error("Row {row}: {message}")]
    Row { row: usize, message: String },

    #[error("Design state was produced by config {found}, current config is {expected}")]
    DesignStateMismatch { expected: String, found: String },

    #[error("Plot error: {0}")]
    Plot(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for hp-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<hp_project::ProjectError> for AppError {
    fn from(err: hp_project::ProjectError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<hp_project::ValidationError> for AppError {
    fn from(err: hp_project::ValidationError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<hp_solver::SolverError> for AppError {
    fn from(err: hp_solver::SolverError) -> Self {
        AppError::Solver(err.to_string())
    }
}

impl From<hp_components::ComponentError> for AppError {
    fn from(err: hp_components::ComponentError) -> Self {
        AppError::Model(err.to_string())
    }
}

impl From<hp_fluids::FluidError> for AppError {
    fn from(err: hp_fluids::FluidError) -> Self {
        AppError::Fluid(err.to_string())
    }
}

impl From<hp_results::ResultsError> for AppError {
    fn from(err: hp_results::ResultsError) -> Self {
        AppError::Results(err.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::Dataset(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Results(err.to_string())
    }
}

impl From<hp_plot::PlotError> for AppError {
    fn from(err: hp_plot::PlotError) -> Self {
        AppError::Plot(err.to_string())
    }
}
