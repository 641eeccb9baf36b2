//! Error types for component operations.

use hp_core::CoreError;
use hp_fluids::FluidError;
use thiserror::Error;

/// Errors that can occur during component calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Fluid property error: {0}")]
    Fluid(#[from] FluidError),

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Component '{component}' has no parameter '{name}'")]
    UnknownParameter { component: String, name: String },

    #[error("Component '{component}' expects {expected} streams, got {actual}")]
    PortCount {
        component: String,
        expected: usize,
        actual: usize,
    },
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl From<ComponentError> for CoreError {
    fn from(e: ComponentError) -> Self {
        match e {
            ComponentError::NonPhysical { .. } | ComponentError::Fluid(_) => CoreError::Invariant {
                what: e.to_string(),
            },
            other => CoreError::InvalidArg {
                what: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ComponentError::UnknownParameter {
            component: "compressor".into(),
            name: "kA".into(),
        };
        assert!(err.to_string().contains("kA"));
    }

    #[test]
    fn error_conversion() {
        let comp_err = ComponentError::InvalidArg { what: "test" };
        let core_err: CoreError = comp_err.into();
        assert!(matches!(core_err, CoreError::InvalidArg { .. }));

        let fluid: ComponentError = FluidError::NotSupported { what: "x" }.into();
        assert!(matches!(CoreError::from(fluid), CoreError::Invariant { .. }));
    }
}
