//! Equation-oriented steady-state solver for heat pump networks.
//!
//! Unknowns are mass flow, pressure and specific enthalpy of every connection.
//! Components and fixed connection values contribute scaled residuals; the
//! system must be square before it is handed to a damped Newton iteration with
//! a finite-difference Jacobian. Temperature is never an unknown; it is computed
//! from (p, h) whenever a residual or result needs it.

pub(crate) mod assembly;
pub mod description;
pub mod error;
pub(crate) mod initialization;
pub mod jacobian;
pub mod network;
pub mod newton;
pub mod solve;
pub mod state;

pub use description::{ComponentDescription, ConnectionDescription, NetworkDescription};
pub use error::{SolverError, SolverResult};
pub use network::{ConnectionSpec, Network, NetworkBuilder};
pub use newton::{JacobianScheme, NewtonConfig, NewtonResult};
pub use solve::{SolveMode, solve};
pub use state::{ConnectionState, NetworkState};
