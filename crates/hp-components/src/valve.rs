//! Isenthalpic expansion valve.

use crate::common::{ENTHALPY_SCALE, check_pressure_ratio, mass_residual, pressure_ratio_residual};
use crate::error::ComponentResult;
use crate::traits::{
    Component, ComponentKind, ComponentResults, PortStreams, unknown_parameter,
};
use hp_fluids::FluidModel;

/// Throttling valve: `h_out = h_in`, optional pressure ratio.
#[derive(Debug, Clone)]
pub struct Valve {
    label: String,
    /// Pressure ratio p_out / p_in
    pub pr: Option<f64>,
}

impl Valve {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            pr: None,
        }
    }
}

impl Component for Valve {
    fn label(&self) -> &str {
        &self.label
    }

    fn kind(&self) -> ComponentKind {
        ComponentKind::Valve
    }

    fn port_counts(&self) -> (u8, u8) {
        (1, 1)
    }

    fn fluid_paths(&self) -> &'static [(u8, u8)] {
        &[(1, 1)]
    }

    fn equation_count(&self) -> usize {
        2 + usize::from(self.pr.is_some())
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

        out.push(mass_residual(inlet.m, outlet.m));
        // Isenthalpic (throttling) process
        out.push((outlet.h - inlet.h) / ENTHALPY_SCALE);
        if let Some(pr) = self.pr {
            out.push(pressure_ratio_residual(inlet.p, outlet.p, pr));
        }
        Ok(())
    }

    fn results(
        &self,
        _fluid: &dyn FluidModel,
        ports: PortStreams<'_>,
    ) -> ComponentResult<ComponentResults> {
        ports.expect(self)?;
        Ok(ComponentResults::new().with("pr", ports.outlets[0].p / ports.inlets[0].p))
    }

    fn parameters(&self) -> Vec<(&'static str, Option<f64>)> {
        vec![("pr", self.pr)]
    }

    fn set_parameter(&mut self, name: &str, value: Option<f64>) -> ComponentResult<()> {
        match name {
            "pr" => {
                check_pressure_ratio(value)?;
                self.pr = value;
                Ok(())
            }
            _ => Err(unknown_parameter(&self.label, name)),
        }
    }
}
