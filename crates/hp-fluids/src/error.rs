//! Fluid property errors.

use hp_core::CoreError;
use thiserror::Error;

/// Result type for fluid operations.
pub type FluidResult<T> = Result<T, FluidError>;

/// Errors that can occur during fluid property calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// Non-physical values (negative pressure, quality outside [0, 1], etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Value out of valid range.
    #[error("Value out of range for {what}")]
    OutOfRange { what: &'static str },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Operation not supported by the backend (e.g. saturation for a liquid-only model).
    #[error("Not supported: {what}")]
    NotSupported { what: &'static str },

    /// Backend (CoolProp) error.
    #[error("Backend error: {message}")]
    Backend { message: String },

    /// Unknown fluid name.
    #[error("Unknown fluid: {name}")]
    UnknownFluid { name: String },
}

impl From<FluidError> for CoreError {
    fn from(err: FluidError) -> Self {
        match err {
            FluidError::OutOfRange { .. }
            | FluidError::InvalidArg { .. }
            | FluidError::UnknownFluid { .. } => CoreError::InvalidArg {
                what: format!("fluid: {err}"),
            },
            other => CoreError::Invariant {
                what: format!("fluid: {other}"),
            },
        }
    }
}
