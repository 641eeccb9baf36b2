//! Incompressible liquid model with constant heat capacity.
//!
//! Sensible heat only: `h = h_ref + cp (T - T_ref)` and `s = s_ref + cp ln(T / T_ref)`.
//! Pressure has no effect on the caloric properties and phase change is not modelled,
//! so saturation queries return [`FluidError::NotSupported`].

use crate::error::{FluidError, FluidResult};
use crate::model::{FluidModel, validation};
use crate::species::Species;
use crate::state::{StateInput, ThermoState};
use hp_core::units::{Temperature, k};

/// Constant-cp liquid model for a single species.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncompressibleModel {
    species: Species,
    cp: f64,
    t_ref: f64,
}

impl IncompressibleModel {
    /// Liquid water with `cp = 4184 J/(kg·K)` referenced to 25 °C.
    pub fn water() -> Self {
        Self {
            species: Species::Water,
            cp: 4184.0,
            t_ref: 298.15,
        }
    }

    /// Custom liquid with the given heat capacity [J/(kg·K)] and reference temperature.
    pub fn new(species: Species, cp: f64, t_ref: Temperature) -> FluidResult<Self> {
        if !cp.is_finite() || cp <= 0.0 {
            return Err(FluidError::InvalidArg {
                what: "cp must be positive and finite",
            });
        }
        validation::validate_temperature(t_ref)?;
        Ok(Self {
            species,
            cp,
            t_ref: t_ref.value,
        })
    }

    pub fn cp(&self) -> f64 {
        self.cp
    }

    fn h_of_t(&self, t: f64) -> f64 {
        self.cp * (t - self.t_ref)
    }

    fn s_of_t(&self, t: f64) -> f64 {
        self.cp * (t / self.t_ref).ln()
    }
}

impl FluidModel for IncompressibleModel {
    fn name(&self) -> &str {
        "Incompressible"
    }

    fn supports(&self, species: Species) -> bool {
        species == self.species
    }

    fn state(&self, species: Species, input: StateInput) -> FluidResult<ThermoState> {
        if !self.supports(species) {
            return Err(FluidError::NotSupported {
                what: "species not covered by incompressible model",
            });
        }
        validation::validate_input(&input)?;

        let (p, t) = match input {
            StateInput::PT { p, t } => (p, t.value),
            StateInput::PH { p, h } => (p, self.t_ref + h / self.cp),
            StateInput::PS { p, s } => (p, self.t_ref * (s / self.cp).exp()),
            StateInput::PQ { .. } | StateInput::TQ { .. } => {
                return Err(FluidError::NotSupported {
                    what: "saturation states in incompressible model",
                });
            }
        };
        if t <= 0.0 {
            return Err(FluidError::OutOfRange {
                what: "enthalpy below absolute zero",
            });
        }

        ThermoState::new(species, p, k(t), self.h_of_t(t), self.s_of_t(t), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hp_core::units::{bar, celsius};

    #[test]
    fn heating_water_by_50k() {
        let model = IncompressibleModel::water();
        let h1 = model.h_pt(Species::Water, bar(4.0), celsius(40.0)).unwrap();
        let h2 = model.h_pt(Species::Water, bar(4.0), celsius(90.0)).unwrap();
        assert!((h2 - h1 - 4184.0 * 50.0).abs() < 1e-6);
    }

    #[test]
    fn ph_inverts_pt() {
        let model = IncompressibleModel::water();
        let h = model.h_pt(Species::Water, bar(1.0), celsius(12.5)).unwrap();
        let t = model.t_ph(Species::Water, bar(1.0), h).unwrap();
        assert!((t.value - celsius(12.5).value).abs() < 1e-9);

        let s = model.s_ph(Species::Water, bar(1.0), h).unwrap();
        let h_back = model.h_ps(Species::Water, bar(1.0), s).unwrap();
        assert!((h_back - h).abs() < 1e-6);
    }

    #[test]
    fn saturation_not_supported() {
        let model = IncompressibleModel::water();
        let err = model
            .saturation_pressure(Species::Water, celsius(95.0))
            .unwrap_err();
        assert!(matches!(err, FluidError::NotSupported { .. }));
    }

    #[test]
    fn other_species_rejected() {
        let model = IncompressibleModel::water();
        assert!(!model.supports(Species::R134a));
        assert!(
            model
                .h_pt(Species::R134a, bar(1.0), celsius(20.0))
                .is_err()
        );
    }

    #[test]
    fn invalid_cp_rejected() {
        assert!(IncompressibleModel::new(Species::Water, 0.0, celsius(25.0)).is_err());
    }
}
