//! Network boundaries: sources and sinks.

use crate::error::ComponentResult;
use crate::traits::{
    Component, ComponentKind, ComponentResults, PortStreams, unknown_parameter,
};
use hp_fluids::FluidModel;

/// Boundary where fluid enters (`Source`, one outlet) or leaves (`Sink`, one inlet).
///
/// Boundaries add no equations; their streams are fixed by connection specifications.
#[derive(Debug, Clone)]
pub struct Boundary {
    label: String,
    kind: ComponentKind,
}

impl Boundary {
    pub fn source(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: ComponentKind::Source,
        }
    }

    pub fn sink(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: ComponentKind::Sink,
        }
    }
}

impl Component for Boundary {
    fn label(&self) -> &str {
        &self.label
    }

    fn kind(&self) -> ComponentKind {
        self.kind
    }

    fn port_counts(&self) -> (u8, u8) {
        match self.kind {
            ComponentKind::Source => (0, 1),
            _ => (1, 0),
        }
    }

    fn fluid_paths(&self) -> &'static [(u8, u8)] {
        &[]
    }

    fn equation_count(&self) -> usize {
        0
    }

    fn residuals(
        &self,
        _fluid: &dyn FluidModel,
        ports: PortStreams<'_>,
        _out: &mut Vec<f64>,
    ) -> ComponentResult<()> {
        ports.expect(self)
    }

    fn results(
        &self,
        _fluid: &dyn FluidModel,
        ports: PortStreams<'_>,
    ) -> ComponentResult<ComponentResults> {
        ports.expect(self)?;
        Ok(ComponentResults::new())
    }

    fn parameters(&self) -> Vec<(&'static str, Option<f64>)> {
        Vec::new()
    }

    fn set_parameter(&mut self, name: &str, _value: Option<f64>) -> ComponentResult<()> {
        Err(unknown_parameter(&self.label, name))
    }
}
