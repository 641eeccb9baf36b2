//! hp-fluids: fluid property calculations for the heat pump model.
//!
//! Provides:
//! - Species catalog (water and common refrigerants)
//! - Thermodynamic state representation
//! - `FluidModel` trait for property calculations
//! - CoolProp backend for real fluid properties (refrigerant cycle, water loops)
//! - Incompressible liquid backend for secondary loops and tests
//!
//! # Architecture
//!
//! The `FluidModel` trait isolates the cycle solver from backend dependencies.
//! CoolProp (via `rfluids`) is the primary backend; the incompressible model
//! covers sensible-heat-only water loops where phase change never occurs.
//!
//! # Example
//!
//! ```no_run
//! use hp_fluids::{CoolPropModel, FluidModel, Species, StateInput};
//! use hp_core::units::{bar, celsius};
//!
//! let model = CoolPropModel::new();
//! let state = model
//!     .state(Species::Water, StateInput::PT { p: bar(1.0), t: celsius(40.0) })
//!     .unwrap();
//! println!("h = {} J/kg", state.enthalpy());
//! ```

pub mod coolprop;
pub mod error;
pub mod incompressible;
pub mod model;
pub mod species;
pub mod state;

// Re-exports for ergonomics
pub use coolprop::CoolPropModel;
pub use error::{FluidError, FluidResult};
pub use incompressible::IncompressibleModel;
pub use model::FluidModel;
pub use species::Species;
pub use state::{SpecEnthalpy, SpecEntropy, StateInput, ThermoState};
