//! Graph-specific error types.

use hp_core::{CompId, CoreError, PortId};

pub type GraphResult<T> = Result<T, GraphError>;

/// Graph construction and validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A port name is not of the form `inN` / `outN`.
    InvalidPortName { name: String },

    /// A component has no port with the given name.
    UnknownPort { comp: String, port: String },

    /// A component ID does not exist.
    UnknownComponent { comp: CompId },

    /// A connection must run from an outlet to an inlet.
    WrongPortDirection { label: String, port: String },

    /// A port already carries a connection.
    PortAlreadyConnected { comp: String, port: String },

    /// A port was left unconnected at build time.
    UnconnectedPort { comp: String, port: String },

    /// Two connections share a label.
    DuplicateConnectionLabel { label: String },

    /// Two components share a label.
    DuplicateComponentLabel { label: String },

    /// A port refers to a component that doesn't exist.
    InvalidCompRef { port: PortId, comp: CompId },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::InvalidPortName { name } => {
                write!(f, "Invalid port name '{}' (expected inN or outN)", name)
            }
            GraphError::UnknownPort { comp, port } => {
                write!(f, "Component '{}' has no port '{}'", comp, port)
            }
            GraphError::UnknownComponent { comp } => {
                write!(f, "Component {} does not exist", comp)
            }
            GraphError::WrongPortDirection { label, port } => {
                write!(
                    f,
                    "Connection '{}' uses port '{}' in the wrong direction",
                    label, port
                )
            }
            GraphError::PortAlreadyConnected { comp, port } => {
                write!(f, "Port '{}' of '{}' is already connected", port, comp)
            }
            GraphError::UnconnectedPort { comp, port } => {
                write!(f, "Port '{}' of '{}' is not connected", port, comp)
            }
            GraphError::DuplicateConnectionLabel { label } => {
                write!(f, "Connection label '{}' is used more than once", label)
            }
            GraphError::DuplicateComponentLabel { label } => {
                write!(f, "Component label '{}' is used more than once", label)
            }
            GraphError::InvalidCompRef { port, comp } => {
                write!(f, "Port {} refers to non-existent component {}", port, comp)
            }
        }
    }
}

impl std::error::Error for GraphError {}

impl From<GraphError> for CoreError {
    fn from(err: GraphError) -> Self {
        CoreError::Invariant {
            what: err.to_string(),
        }
    }
}
