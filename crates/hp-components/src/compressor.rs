//! Compressor component model.

use crate::common::{
    ENTHALPY_SCALE, check_finite, check_pressure_ratio, mass_residual, pressure_ratio_residual,
};
use crate::error::{ComponentError, ComponentResult};
use crate::traits::{
    Component, ComponentKind, ComponentResults, PortStreams, unknown_parameter,
};
use hp_fluids::FluidModel;

/// Adiabatic compressor with isentropic efficiency.
///
/// ## Model
///
/// ```text
/// m_in = m_out
/// eta_s * (h_out - h_in) = h_s(p_out, s(p_in, h_in)) - h_in      (if eta_s set)
/// p_out = pr * p_in                                                (if pr set)
/// ```
///
/// Power `P = m (h_out - h_in)` is positive when the shaft drives the fluid.
#[derive(Debug, Clone)]
pub struct Compressor {
    label: String,
    /// Isentropic efficiency (0 < eta_s <= 1)
    pub eta_s: Option<f64>,
    /// Pressure ratio p_out / p_in
    pub pr: Option<f64>,
}

impl Compressor {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            eta_s: None,
            pr: None,
        }
    }

    /// Set the isentropic efficiency.
    pub fn with_eta_s(mut self, eta_s: f64) -> ComponentResult<Self> {
        self.set_parameter("eta_s", Some(eta_s))?;
        Ok(self)
    }

    fn isentropic_outlet_enthalpy(
        fluid: &dyn FluidModel,
        ports: &PortStreams<'_>,
    ) -> ComponentResult<f64> {
        let inlet = &ports.inlets[0];
        let outlet = &ports.outlets[0];
        let s_in = fluid.s_ph(inlet.species, inlet.pressure(), inlet.h)?;
        Ok(fluid.h_ps(outlet.species, outlet.pressure(), s_in)?)
    }
}

impl Component for Compressor {
    fn label(&self) -> &str {
        &self.label
    }

    fn kind(&self) -> ComponentKind {
        ComponentKind::Compressor
    }

    fn port_counts(&self) -> (u8, u8) {
        (1, 1)
    }

    fn fluid_paths(&self) -> &'static [(u8, u8)] {
        &[(1, 1)]
    }

    fn equation_count(&self) -> usize {
        1 + usize::from(self.eta_s.is_some()) + usize::from(self.pr.is_some())
    }

    fn residuals(
        &self,
        fluid: &dyn FluidModel,
        ports: PortStreams<'_>,
        out: &mut Vec<f64>,
    ) -> ComponentResult<()> {
        ports.expect(self)?;
        let inlet = &ports.inlets[0];
        let outlet = &ports.outlets[0];

        out.push(mass_residual(inlet.m, outlet.m));
        if let Some(eta_s) = self.eta_s {
            let h_s = Self::isentropic_outlet_enthalpy(fluid, &ports)?;
            check_finite(h_s, "isentropic outlet enthalpy")?;
            out.push((eta_s * (outlet.h - inlet.h) - (h_s - inlet.h)) / ENTHALPY_SCALE);
        }
        if let Some(pr) = self.pr {
            out.push(pressure_ratio_residual(inlet.p, outlet.p, pr));
        }
        Ok(())
    }

    fn results(
        &self,
        fluid: &dyn FluidModel,
        ports: PortStreams<'_>,
    ) -> ComponentResult<ComponentResults> {
        ports.expect(self)?;
        let inlet = &ports.inlets[0];
        let outlet = &ports.outlets[0];

        let dh = outlet.h - inlet.h;
        let h_s = Self::isentropic_outlet_enthalpy(fluid, &ports)?;
        let eta_s = if dh.abs() > f64::EPSILON {
            (h_s - inlet.h) / dh
        } else {
            f64::NAN
        };

        Ok(ComponentResults::new()
            .with("P", inlet.m * dh)
            .with("pr", outlet.p / inlet.p)
            .with("eta_s", eta_s))
    }

    fn parameters(&self) -> Vec<(&'static str, Option<f64>)> {
        vec![("eta_s", self.eta_s), ("pr", self.pr)]
    }

    fn set_parameter(&mut self, name: &str, value: Option<f64>) -> ComponentResult<()> {
        match name {
            "eta_s" => {
                if let Some(v) = value
                    && (!v.is_finite() || v <= 0.0 || v > 1.0)
                {
                    return Err(ComponentError::InvalidArg {
                        what: "isentropic efficiency must be in (0, 1]",
                    });
                }
                self.eta_s = value;
            }
            "pr" => {
                check_pressure_ratio(value)?;
                self.pr = value;
            }
            _ => return Err(unknown_parameter(&self.label, name)),
        }
        Ok(())
    }
}
