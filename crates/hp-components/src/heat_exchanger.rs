//! Two-stream heat exchanger and condenser.

use crate::common::{
    ENTHALPY_SCALE, POWER_SCALE, check_finite, check_pressure_ratio, mass_residual,
    pressure_ratio_residual,
};
use crate::error::{ComponentError, ComponentResult};
use crate::traits::{
    Component, ComponentKind, ComponentResults, PortStreams, unknown_parameter,
};
use hp_fluids::FluidModel;

/// Heat exchanger variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangerVariant {
    /// Plain counter-flow heat exchanger.
    Plain,
    /// Hot side leaves as saturated liquid (`h_out1 = h'(p_out1)`).
    Condenser,
}

/// Counter-flow heat exchanger between a hot side (in1/out1) and a cold side (in2/out2).
///
/// ## Model
///
/// ```text
/// m_in1 = m_out1,  m_in2 = m_out2
/// m1 (h_out1 - h_in1) + m2 (h_out2 - h_in2) = 0
/// Q = m1 (h_out1 - h_in1)                       (if Q set; negative for the hot side)
/// p_out1 = pr1 p_in1,  p_out2 = pr2 p_in2        (if set)
/// h_out1 = h'(p_out1)                            (condenser only)
/// ```
///
/// Terminal temperature differences are reported in the results:
/// `ttd_u = T_in1 - T_out2` and `ttd_l = T_out1 - T_in2`.
#[derive(Debug, Clone)]
pub struct HeatExchanger {
    label: String,
    variant: ExchangerVariant,
    /// Heat duty of the hot side [W]
    pub q: Option<f64>,
    /// Hot side pressure ratio
    pub pr1: Option<f64>,
    /// Cold side pressure ratio
    pub pr2: Option<f64>,
}

impl HeatExchanger {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            variant: ExchangerVariant::Plain,
            q: None,
            pr1: None,
            pr2: None,
        }
    }

    /// Heat exchanger whose hot side condenses to saturated liquid.
    pub fn condenser(label: impl Into<String>) -> Self {
        Self {
            variant: ExchangerVariant::Condenser,
            ..Self::new(label)
        }
    }

    pub fn variant(&self) -> ExchangerVariant {
        self.variant
    }
}

impl Component for HeatExchanger {
    fn label(&self) -> &str {
        &self.label
    }

    fn kind(&self) -> ComponentKind {
        match self.variant {
            ExchangerVariant::Plain => ComponentKind::HeatExchanger,
            ExchangerVariant::Condenser => ComponentKind::Condenser,
        }
    }

    fn port_counts(&self) -> (u8, u8) {
        (2, 2)
    }

    fn fluid_paths(&self) -> &'static [(u8, u8)] {
        &[(1, 1), (2, 2)]
    }

    fn equation_count(&self) -> usize {
        3 + usize::from(self.q.is_some())
            + usize::from(self.pr1.is_some())
            + usize::from(self.pr2.is_some())
            + usize::from(self.variant == ExchangerVariant::Condenser)
    }

    fn residuals(
        &self,
        fluid: &dyn FluidModel,
        ports: PortStreams<'_>,
        out: &mut Vec<f64>,
    ) -> ComponentResult<()> {
        ports.expect(self)?;
        let [hot_in, cold_in] = [&ports.inlets[0], &ports.inlets[1]];
        let [hot_out, cold_out] = [&ports.outlets[0], &ports.outlets[1]];

        out.push(mass_residual(hot_in.m, hot_out.m));
        out.push(mass_residual(cold_in.m, cold_out.m));

        let q_hot = hot_in.m * (hot_out.h - hot_in.h);
        let q_cold = cold_in.m * (cold_out.h - cold_in.h);
        out.push((q_hot + q_cold) / POWER_SCALE);

        if let Some(q) = self.q {
            out.push((q_hot - q) / POWER_SCALE);
        }
        if let Some(pr1) = self.pr1 {
            out.push(pressure_ratio_residual(hot_in.p, hot_out.p, pr1));
        }
        if let Some(pr2) = self.pr2 {
            out.push(pressure_ratio_residual(cold_in.p, cold_out.p, pr2));
        }
        if self.variant == ExchangerVariant::Condenser {
            let h_sat = fluid.h_sat_liquid(hot_out.species, hot_out.pressure())?;
            check_finite(h_sat, "saturated liquid enthalpy")?;
            out.push((hot_out.h - h_sat) / ENTHALPY_SCALE);
        }
        Ok(())
    }

    fn results(
        &self,
        fluid: &dyn FluidModel,
        ports: PortStreams<'_>,
    ) -> ComponentResult<ComponentResults> {
        ports.expect(self)?;
        let [hot_in, cold_in] = [&ports.inlets[0], &ports.inlets[1]];
        let [hot_out, cold_out] = [&ports.outlets[0], &ports.outlets[1]];

        let t_hot_in = hot_in.temperature(fluid)?.value;
        let t_hot_out = hot_out.temperature(fluid)?.value;
        let t_cold_in = cold_in.temperature(fluid)?.value;
        let t_cold_out = cold_out.temperature(fluid)?.value;

        Ok(ComponentResults::new()
            .with("Q", hot_in.m * (hot_out.h - hot_in.h))
            .with("pr1", hot_out.p / hot_in.p)
            .with("pr2", cold_out.p / cold_in.p)
            .with("ttd_u", t_hot_in - t_cold_out)
            .with("ttd_l", t_hot_out - t_cold_in))
    }

    fn parameters(&self) -> Vec<(&'static str, Option<f64>)> {
        vec![("Q", self.q), ("pr1", self.pr1), ("pr2", self.pr2)]
    }

    fn set_parameter(&mut self, name: &str, value: Option<f64>) -> ComponentResult<()> {
        match name {
            "Q" => {
                if let Some(v) = value {
                    check_finite(v, "heat duty").map_err(|_| ComponentError::InvalidArg {
                        what: "heat duty must be finite",
                    })?;
                }
                self.q = value;
            }
            "pr1" => {
                check_pressure_ratio(value)?;
                self.pr1 = value;
            }
            "pr2" => {
                check_pressure_ratio(value)?;
                self.pr2 = value;
            }
            _ => return Err(unknown_parameter(&self.label, name)),
        }
        Ok(())
    }
}
