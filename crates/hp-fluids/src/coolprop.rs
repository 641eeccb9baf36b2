//! CoolProp-based fluid property model.

use crate::error::{FluidError, FluidResult};
use crate::model::{FluidModel, validation};
use crate::species::Species;
use crate::state::{StateInput, ThermoState};
use hp_core::units::{k, pa};
use rfluids::prelude::*;

/// CoolProp backend for fluid properties.
///
/// Every state is a direct flash on the requested input pair, so two-phase
/// states (PH inside the dome, PQ, TQ) are handled by CoolProp itself.
///
/// Thread-safe: rfluids Fluid instances are created per call.
#[derive(Debug, Default, Clone, Copy)]
pub struct CoolPropModel;

impl CoolPropModel {
    /// Create a new CoolProp model.
    pub fn new() -> Self {
        Self
    }

    fn input_pair(input: StateInput) -> (FluidInput, FluidInput) {
        match input {
            StateInput::PT { p, t } => (
                FluidInput::pressure(p.value),
                FluidInput::temperature(t.value),
            ),
            StateInput::PH { p, h } => (FluidInput::pressure(p.value), FluidInput::enthalpy(h)),
            StateInput::PS { p, s } => (FluidInput::pressure(p.value), FluidInput::entropy(s)),
            StateInput::PQ { p, q } => (FluidInput::pressure(p.value), FluidInput::quality(q)),
            StateInput::TQ { t, q } => (
                FluidInput::temperature(t.value),
                FluidInput::quality(q),
            ),
        }
    }
}

fn backend_err<E: std::fmt::Display>(context: &'static str) -> impl FnOnce(E) -> FluidError {
    move |e| FluidError::Backend {
        message: format!("rfluids error {context}: {e}"),
    }
}

impl FluidModel for CoolPropModel {
    fn name(&self) -> &str {
        "CoolProp"
    }

    fn supports(&self, _species: Species) -> bool {
        true
    }

    fn state(&self, species: Species, input: StateInput) -> FluidResult<ThermoState> {
        validation::validate_input(&input)?;
        let (first, second) = Self::input_pair(input);

        let mut fluid = Fluid::from(species.rfluids_pure())
            .in_state(first, second)
            .map_err(|e| FluidError::Backend {
                message: format!("rfluids error for {species} at {input:?}: {e}"),
            })?;

        let p = fluid.pressure().map_err(backend_err("getting pressure"))?;
        let t = fluid
            .temperature()
            .map_err(backend_err("getting temperature"))?;
        let h = fluid.enthalpy().map_err(backend_err("getting enthalpy"))?;
        let s = fluid.entropy().map_err(backend_err("getting entropy"))?;
        // Single-phase states have no quality; CoolProp reports that as an error or -1.
        let quality = fluid.quality().ok();

        ThermoState::new(species, pa(p), k(t), h, s, quality)
    }
}
