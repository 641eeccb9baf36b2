//! Thermodynamic state definitions.

use crate::error::{FluidError, FluidResult};
use crate::species::Species;
use hp_core::units::{Pressure, Temperature};

/// Specific enthalpy [J/kg].
///
/// Not part of uom's standard set, so we use f64 with clear documentation.
pub type SpecEnthalpy = f64;

/// Specific entropy [J/(kg·K)].
pub type SpecEntropy = f64;

/// Input pair specification for creating a thermodynamic state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StateInput {
    /// Pressure and temperature.
    PT { p: Pressure, t: Temperature },
    /// Pressure and specific enthalpy.
    PH { p: Pressure, h: SpecEnthalpy },
    /// Pressure and specific entropy.
    PS { p: Pressure, s: SpecEntropy },
    /// Pressure and vapour quality (saturation).
    PQ { p: Pressure, q: f64 },
    /// Temperature and vapour quality (saturation).
    TQ { t: Temperature, q: f64 },
}

/// Fully resolved thermodynamic state of a pure fluid.
#[derive(Debug, Clone, PartialEq)]
pub struct ThermoState {
    species: Species,
    p: Pressure,
    t: Temperature,
    h: SpecEnthalpy,
    s: SpecEntropy,
    quality: Option<f64>,
}

impl ThermoState {
    /// Assemble a state from backend outputs.
    ///
    /// Validates that pressure and temperature are positive and that all values are finite.
    pub fn new(
        species: Species,
        p: Pressure,
        t: Temperature,
        h: SpecEnthalpy,
        s: SpecEntropy,
        quality: Option<f64>,
    ) -> FluidResult<Self> {
        if !p.value.is_finite() || p.value <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "pressure must be positive and finite",
            });
        }
        if !t.value.is_finite() || t.value <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "temperature must be positive and finite",
            });
        }
        if !h.is_finite() {
            return Err(FluidError::NonPhysical {
                what: "enthalpy must be finite",
            });
        }
        if !s.is_finite() {
            return Err(FluidError::NonPhysical {
                what: "entropy must be finite",
            });
        }
        // Single-phase states report no quality.
        let quality = quality.filter(|q| q.is_finite() && (0.0..=1.0).contains(q));
        Ok(Self {
            species,
            p,
            t,
            h,
            s,
            quality,
        })
    }

    pub fn species(&self) -> Species {
        self.species
    }

    pub fn pressure(&self) -> Pressure {
        self.p
    }

    pub fn temperature(&self) -> Temperature {
        self.t
    }

    pub fn enthalpy(&self) -> SpecEnthalpy {
        self.h
    }

    pub fn entropy(&self) -> SpecEntropy {
        self.s
    }

    /// Vapour quality inside the two-phase dome, `None` for single-phase states.
    pub fn quality(&self) -> Option<f64> {
        self.quality
    }

    pub fn is_two_phase(&self) -> bool {
        self.quality.is_some()
    }
}
