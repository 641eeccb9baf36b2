//! Cycle closer for closed loops.

use crate::common::{ENTHALPY_SCALE, PRESSURE_SCALE};
use crate::error::ComponentResult;
use crate::traits::{
    Component, ComponentKind, ComponentResults, PortStreams, unknown_parameter,
};
use hp_fluids::FluidModel;

/// Breaks a closed loop so the equation system is not singular.
///
/// Pressure and enthalpy pass through unchanged. Mass flow is left free on
/// both sides, the loop's mass balance being implied by the other components;
/// the remaining mismatch is reported as `mass_deviation`.
#[derive(Debug, Clone)]
pub struct CycleCloser {
    label: String,
}

impl CycleCloser {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Component for CycleCloser {
    fn label(&self) -> &str {
        &self.label
    }

    fn kind(&self) -> ComponentKind {
        ComponentKind::CycleCloser
    }

    fn port_counts(&self) -> (u8, u8) {
        (1, 1)
    }

    fn fluid_paths(&self) -> &'static [(u8, u8)] {
        &[(1, 1)]
    }

    fn equation_count(&self) -> usize {
        2
    }

    fn residuals(
        &self,
        _fluid: &dyn FluidModel,
        ports: PortStreams<'_>,
        out: &mut Vec<f64>,
    ) -> ComponentResult<()> {
        ports.expect(self)?;
        let inlet = &ports.inlets[0];
        let outlet = &ports.outlets[0];
        out.push((outlet.p - inlet.p) / PRESSURE_SCALE);
        out.push((outlet.h - inlet.h) / ENTHALPY_SCALE);
        Ok(())
    }

    fn results(
        &self,
        _fluid: &dyn FluidModel,
        ports: PortStreams<'_>,
    ) -> ComponentResult<ComponentResults> {
        ports.expect(self)?;
        Ok(ComponentResults::new().with("mass_deviation", ports.inlets[0].m - ports.outlets[0].m))
    }

    fn parameters(&self) -> Vec<(&'static str, Option<f64>)> {
        Vec::new()
    }

    fn set_parameter(&mut self, name: &str, _value: Option<f64>) -> ComponentResult<()> {
        Err(unknown_parameter(&self.label, name))
    }
}
