//! Solved network state.

use std::fmt;

use hp_components::Stream;
use hp_fluids::Species;
use serde::{Deserialize, Serialize};

use crate::error::{SolverError, SolverResult};

/// Solved values of one connection, in SI units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionState {
    pub label: String,
    /// Fluid key (see `Species::key`)
    pub fluid: String,
    /// Mass flow [kg/s]
    pub m: f64,
    /// Pressure [Pa]
    pub p: f64,
    /// Specific enthalpy [J/kg]
    pub h: f64,
    /// Temperature [K]
    pub t: f64,
    /// Vapour quality, when two-phase
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
}

/// Full solved state of a network, in connection order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkState {
    pub connections: Vec<ConnectionState>,
    pub residual_norm: f64,
    pub iterations: usize,
}

impl NetworkState {
    /// Connection state by label.
    pub fn conn(&self, label: &str) -> SolverResult<&ConnectionState> {
        self.connections
            .iter()
            .find(|c| c.label == label)
            .ok_or_else(|| SolverError::UnknownConnection {
                label: label.to_string(),
            })
    }

    pub(crate) fn streams(&self) -> SolverResult<Vec<Stream>> {
        self.connections
            .iter()
            .map(|c| {
                let species: Species = c.fluid.parse()?;
                Ok(Stream::new(species, c.m, c.p, c.h))
            })
            .collect()
    }
}

impl fmt::Display for NetworkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>6} {:>8} {:>12} {:>10} {:>12} {:>10} {:>6}",
            "conn", "fluid", "m [kg/s]", "p [bar]", "h [kJ/kg]", "T [°C]", "x"
        )?;
        for c in &self.connections {
            let x = c.x.map_or_else(|| "-".to_string(), |x| format!("{x:.3}"));
            writeln!(
                f,
                "{:>6} {:>8} {:>12.4} {:>10.4} {:>12.3} {:>10.2} {:>6}",
                c.label,
                c.fluid,
                c.m,
                c.p / hp_core::units::PA_PER_BAR,
                c.h / 1e3,
                c.t - hp_core::units::KELVIN_OFFSET,
                x
            )?;
        }
        write!(
            f,
            "residual norm {:.3e} after {} iterations",
            self.residual_norm, self.iterations
        )
    }
}
