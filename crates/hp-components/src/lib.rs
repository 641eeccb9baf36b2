//! hp-components: component library for vapour-compression cycles.
//!
//! Provides equation models for:
//! - Compressor with isentropic efficiency
//! - Heat exchanger and condenser (two streams)
//! - Isenthalpic expansion valve
//! - Cycle closer for closed loops
//! - Sources and sinks
//!
//! All components implement the `Component` trait: given the streams at their
//! ports they produce scaled residuals (zero at the solution) and derived results.
//!
//! # Example
//!
//! ```
//! use hp_components::{Component, PortStreams, Stream, Valve};
//! use hp_fluids::{IncompressibleModel, Species};
//!
//! let fluid = IncompressibleModel::water();
//! let inlet = [Stream::new(Species::Water, 1.0, 4e5, 1.2e5)];
//! let outlet = [Stream::new(Species::Water, 1.0, 1e5, 1.2e5)];
//! let ports = PortStreams { inlets: &inlet, outlets: &outlet };
//!
//! let mut residuals = Vec::new();
//! Valve::new("valve").residuals(&fluid, ports, &mut residuals).unwrap();
//! assert!(residuals.iter().all(|r| r.abs() < 1e-12));
//! ```

pub mod boundary;
pub mod common;
pub mod compressor;
pub mod cycle_closer;
pub mod error;
pub mod heat_exchanger;
pub mod traits;
pub mod valve;

// Re-exports
pub use boundary::Boundary;
pub use compressor::Compressor;
pub use cycle_closer::CycleCloser;
pub use error::{ComponentError, ComponentResult};
pub use heat_exchanger::{ExchangerVariant, HeatExchanger};
pub use traits::{Component, ComponentKind, ComponentResults, PortStreams, Stream};
pub use valve::Valve;
