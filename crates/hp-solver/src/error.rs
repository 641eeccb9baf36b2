//! Error types for solver operations.

use hp_components::ComponentError;
use hp_core::CoreError;
use hp_fluids::FluidError;
use hp_graph::GraphError;
use thiserror::Error;

/// Errors that can occur during network solving.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Problem setup error: {what}")]
    ProblemSetup { what: String },

    #[error("Under-determined system: {equations} equations for {unknowns} unknowns")]
    UnderDetermined { equations: usize, unknowns: usize },

    #[error("Over-determined system: {equations} equations for {unknowns} unknowns")]
    OverDetermined { equations: usize, unknowns: usize },

    #[error("Unknown connection '{label}'")]
    UnknownConnection { label: String },

    #[error("Unknown component '{label}'")]
    UnknownComponent { label: String },

    #[error("Convergence failed: {what}")]
    ConvergenceFailed { what: String },

    #[error("Invalid state: {what}")]
    InvalidState { what: String },

    #[error("Component error: {0}")]
    Component(#[from] ComponentError),

    #[error("Fluid error: {0}")]
    Fluid(#[from] FluidError),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Numeric error: {what}")]
    Numeric { what: String },
}

pub type SolverResult<T> = Result<T, SolverError>;

impl From<SolverError> for CoreError {
    fn from(e: SolverError) -> Self {
        match e {
            SolverError::ProblemSetup { .. }
            | SolverError::UnderDetermined { .. }
            | SolverError::OverDetermined { .. }
            | SolverError::UnknownConnection { .. }
            | SolverError::UnknownComponent { .. } => CoreError::InvalidArg {
                what: e.to_string(),
            },
            other => CoreError::Invariant {
                what: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_in_message() {
        let err = SolverError::UnderDetermined {
            equations: 26,
            unknowns: 27,
        };
        assert!(err.to_string().contains("26 equations for 27 unknowns"));
        assert!(matches!(CoreError::from(err), CoreError::InvalidArg { .. }));
    }
}
