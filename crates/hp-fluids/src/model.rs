//! Fluid property model trait and validation helpers.

use crate::error::{FluidError, FluidResult};
use crate::species::Species;
use crate::state::{SpecEnthalpy, SpecEntropy, StateInput, ThermoState};
use hp_core::units::{Pressure, Temperature};

/// Trait for fluid property models.
///
/// Implementations must be thread-safe (Send + Sync) so one model can back
/// several networks. All methods validate inputs before touching the backend.
pub trait FluidModel: Send + Sync {
    /// Get the model name (for debugging/logging).
    fn name(&self) -> &str;

    /// Check if this model can evaluate the given species.
    fn supports(&self, species: Species) -> bool;

    /// Create a thermodynamic state from an input pair.
    fn state(&self, species: Species, input: StateInput) -> FluidResult<ThermoState>;

    /// Saturation pressure at the given temperature.
    fn saturation_pressure(&self, species: Species, t: Temperature) -> FluidResult<Pressure> {
        Ok(self
            .state(species, StateInput::TQ { t, q: 0.0 })?
            .pressure())
    }

    /// Saturation temperature at the given pressure.
    fn saturation_temperature(&self, species: Species, p: Pressure) -> FluidResult<Temperature> {
        Ok(self
            .state(species, StateInput::PQ { p, q: 0.0 })?
            .temperature())
    }

    /// Specific enthalpy from pressure and temperature.
    fn h_pt(&self, species: Species, p: Pressure, t: Temperature) -> FluidResult<SpecEnthalpy> {
        Ok(self.state(species, StateInput::PT { p, t })?.enthalpy())
    }

    /// Temperature from pressure and specific enthalpy.
    fn t_ph(&self, species: Species, p: Pressure, h: SpecEnthalpy) -> FluidResult<Temperature> {
        Ok(self.state(species, StateInput::PH { p, h })?.temperature())
    }

    /// Specific enthalpy from pressure and specific entropy.
    fn h_ps(&self, species: Species, p: Pressure, s: SpecEntropy) -> FluidResult<SpecEnthalpy> {
        Ok(self.state(species, StateInput::PS { p, s })?.enthalpy())
    }

    /// Specific entropy from pressure and specific enthalpy.
    fn s_ph(&self, species: Species, p: Pressure, h: SpecEnthalpy) -> FluidResult<SpecEntropy> {
        Ok(self.state(species, StateInput::PH { p, h })?.entropy())
    }

    /// Vapour quality from pressure and specific enthalpy, `None` outside the dome.
    fn x_ph(&self, species: Species, p: Pressure, h: SpecEnthalpy) -> FluidResult<Option<f64>> {
        Ok(self.state(species, StateInput::PH { p, h })?.quality())
    }

    /// Saturated liquid enthalpy at the given pressure.
    fn h_sat_liquid(&self, species: Species, p: Pressure) -> FluidResult<SpecEnthalpy> {
        Ok(self
            .state(species, StateInput::PQ { p, q: 0.0 })?
            .enthalpy())
    }

    /// Saturated vapour enthalpy at the given pressure.
    fn h_sat_vapor(&self, species: Species, p: Pressure) -> FluidResult<SpecEnthalpy> {
        Ok(self
            .state(species, StateInput::PQ { p, q: 1.0 })?
            .enthalpy())
    }
}

/// Validation helpers for fluid property inputs.
pub(crate) mod validation {
    use super::*;

    /// Ensure pressure is positive and finite.
    pub fn validate_pressure(p: Pressure) -> FluidResult<()> {
        if !p.value.is_finite() || p.value <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "pressure must be positive and finite",
            });
        }
        Ok(())
    }

    /// Ensure temperature is positive and finite.
    pub fn validate_temperature(t: Temperature) -> FluidResult<()> {
        if !t.value.is_finite() || t.value <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "temperature must be positive and finite",
            });
        }
        Ok(())
    }

    /// Ensure quality lies in [0, 1].
    pub fn validate_quality(q: f64) -> FluidResult<()> {
        if !q.is_finite() || !(0.0..=1.0).contains(&q) {
            return Err(FluidError::NonPhysical {
                what: "quality must lie in [0, 1]",
            });
        }
        Ok(())
    }

    /// Ensure a caloric property (enthalpy, entropy) is finite.
    pub fn validate_finite(value: f64, what: &'static str) -> FluidResult<()> {
        if !value.is_finite() {
            return Err(FluidError::NonPhysical { what });
        }
        Ok(())
    }

    /// Validate every field of an input pair.
    pub fn validate_input(input: &StateInput) -> FluidResult<()> {
        match *input {
            StateInput::PT { p, t } => {
                validate_pressure(p)?;
                validate_temperature(t)
            }
            StateInput::PH { p, h } => {
                validate_pressure(p)?;
                validate_finite(h, "enthalpy must be finite")
            }
            StateInput::PS { p, s } => {
                validate_pressure(p)?;
                validate_finite(s, "entropy must be finite")
            }
            StateInput::PQ { p, q } => {
                validate_pressure(p)?;
                validate_quality(q)
            }
            StateInput::TQ { t, q } => {
                validate_temperature(t)?;
                validate_quality(q)
            }
        }
    }
}
