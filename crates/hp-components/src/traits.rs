//! Core traits for component models.

use crate::error::{ComponentError, ComponentResult};
use hp_core::units::{Pressure, Temperature, pa};
use hp_fluids::{FluidModel, FluidResult, SpecEnthalpy, Species, StateInput, ThermoState};

/// Primitive state of one connection: mass flow [kg/s], pressure [Pa], enthalpy [J/kg].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stream {
    pub species: Species,
    pub m: f64,
    pub p: f64,
    pub h: SpecEnthalpy,
}

impl Stream {
    pub fn new(species: Species, m: f64, p: f64, h: SpecEnthalpy) -> Self {
        Self { species, m, p, h }
    }

    pub fn pressure(&self) -> Pressure {
        pa(self.p)
    }

    /// Resolve the full thermodynamic state from (p, h).
    pub fn state(&self, fluid: &dyn FluidModel) -> FluidResult<ThermoState> {
        fluid.state(
            self.species,
            StateInput::PH {
                p: self.pressure(),
                h: self.h,
            },
        )
    }

    pub fn temperature(&self, fluid: &dyn FluidModel) -> FluidResult<Temperature> {
        fluid.t_ph(self.species, self.pressure(), self.h)
    }
}

/// Streams at a component's ports, ordered `in1, in2, ...` and `out1, out2, ...`.
#[derive(Clone, Copy)]
pub struct PortStreams<'a> {
    pub inlets: &'a [Stream],
    pub outlets: &'a [Stream],
}

impl<'a> PortStreams<'a> {
    /// Check the port counts against the component's declaration.
    pub fn expect(&self, component: &dyn Component) -> ComponentResult<()> {
        let (n_in, n_out) = component.port_counts();
        let expected = usize::from(n_in) + usize::from(n_out);
        let actual = self.inlets.len() + self.outlets.len();
        if self.inlets.len() != usize::from(n_in) || self.outlets.len() != usize::from(n_out) {
            return Err(ComponentError::PortCount {
                component: component.label().to_string(),
                expected,
                actual,
            });
        }
        Ok(())
    }
}

/// Component family, used for descriptions and persisted network layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Compressor,
    HeatExchanger,
    Condenser,
    Valve,
    CycleCloser,
    Source,
    Sink,
}

impl ComponentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Compressor => "Compressor",
            ComponentKind::HeatExchanger => "HeatExchanger",
            ComponentKind::Condenser => "Condenser",
            ComponentKind::Valve => "Valve",
            ComponentKind::CycleCloser => "CycleCloser",
            ComponentKind::Source => "Source",
            ComponentKind::Sink => "Sink",
        }
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named scalar results of a solved component, in SI units.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentResults {
    values: Vec<(&'static str, f64)>,
}

impl ComponentResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &'static str, value: f64) -> Self {
        self.values.push((name, value));
        self
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.values.iter().copied()
    }
}

/// A network component contributing residual equations.
///
/// Components are deterministic functions of their port streams and
/// parameters. Each optional parameter that is set adds one equation.
pub trait Component: Send + Sync + std::fmt::Debug {
    /// Unique label within the network.
    fn label(&self) -> &str;

    fn kind(&self) -> ComponentKind;

    /// Number of (inlet, outlet) ports.
    fn port_counts(&self) -> (u8, u8);

    /// Inlet/outlet pairs (1-based) through which the same fluid flows.
    fn fluid_paths(&self) -> &'static [(u8, u8)];

    /// Number of residuals produced by `residuals` with the current parameters.
    fn equation_count(&self) -> usize;

    /// Append scaled residuals to `out`; zero at the solution.
    fn residuals(
        &self,
        fluid: &dyn FluidModel,
        ports: PortStreams<'_>,
        out: &mut Vec<f64>,
    ) -> ComponentResult<()>;

    /// Evaluate derived results (power, duty, ratios, terminal temperature differences).
    fn results(
        &self,
        fluid: &dyn FluidModel,
        ports: PortStreams<'_>,
    ) -> ComponentResult<ComponentResults>;

    /// Current parameter specifications by name (`None` = unset).
    fn parameters(&self) -> Vec<(&'static str, Option<f64>)>;

    /// Set or release (`None`) a named parameter.
    fn set_parameter(&mut self, name: &str, value: Option<f64>) -> ComponentResult<()>;

    fn parameter(&self, name: &str) -> ComponentResult<Option<f64>> {
        self.parameters()
            .into_iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
            .ok_or_else(|| ComponentError::UnknownParameter {
                component: self.label().to_string(),
                name: name.to_string(),
            })
    }
}

pub(crate) fn unknown_parameter(component: &str, name: &str) -> ComponentError {
    ComponentError::UnknownParameter {
        component: component.to_string(),
        name: name.to_string(),
    }
}
