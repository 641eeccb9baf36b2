//! hp-core: stable foundation for the heat pump workspace.
//!
//! Contains:
//! - units (uom SI types + constructors for the engineering units used in configs)
//! - numeric (Real + tolerances + float helpers)
//! - ids (compact IDs for topology objects)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

pub use error::{CoreError, CoreResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
