//! Network: topology, component models and connection specifications.

use hp_components::Component;
use hp_core::units::{MassRate, Pressure, Temperature};
use hp_core::{CompId, ConnId};
use hp_fluids::{SpecEnthalpy, Species};
use hp_graph::{Graph, GraphBuilder};

use crate::error::{SolverError, SolverResult};

/// Fixed values and starting values of one connection, in SI units.
///
/// Every fixed value (`m`, `p`, `h`, `t`, `x`) adds one equation. Start values
/// (`m0`, `p0`, `h0`) only seed the design-mode initial guess.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionSpec {
    pub fluid: Option<Species>,
    /// Mass flow [kg/s]
    pub m: Option<f64>,
    /// Pressure [Pa]
    pub p: Option<f64>,
    /// Specific enthalpy [J/kg]
    pub h: Option<SpecEnthalpy>,
    /// Temperature [K]
    pub t: Option<f64>,
    /// Vapour quality [-]
    pub x: Option<f64>,
    pub m0: Option<f64>,
    pub p0: Option<f64>,
    pub h0: Option<SpecEnthalpy>,
}

impl ConnectionSpec {
    /// Number of equations contributed by fixed values.
    pub fn equation_count(&self) -> usize {
        [self.m, self.p, self.h, self.t, self.x]
            .iter()
            .filter(|v| v.is_some())
            .count()
    }

    pub fn set_fluid(&mut self, species: Species) -> &mut Self {
        self.fluid = Some(species);
        self
    }

    pub fn set_mass_flow(&mut self, m: Option<MassRate>) -> &mut Self {
        self.m = m.map(|v| v.value);
        self
    }

    pub fn set_pressure(&mut self, p: Option<Pressure>) -> &mut Self {
        self.p = p.map(|v| v.value);
        self
    }

    pub fn set_temperature(&mut self, t: Option<Temperature>) -> &mut Self {
        self.t = t.map(|v| v.value);
        self
    }

    pub fn set_enthalpy(&mut self, h: Option<SpecEnthalpy>) -> &mut Self {
        self.h = h;
        self
    }

    pub fn set_quality(&mut self, x: Option<f64>) -> &mut Self {
        self.x = x;
        self
    }

    /// Starting values for the design-mode initial guess.
    pub fn set_start(
        &mut self,
        m0: Option<f64>,
        p0: Option<f64>,
        h0: Option<SpecEnthalpy>,
    ) -> &mut Self {
        self.m0 = m0;
        self.p0 = p0;
        self.h0 = h0;
        self
    }
}

/// Incremental network builder.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    graph: GraphBuilder,
    components: Vec<Box<dyn Component>>,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component and return its ID.
    pub fn add(&mut self, component: impl Component + 'static) -> CompId {
        let (n_in, n_out) = component.port_counts();
        let id = self.graph.add_component(component.label(), n_in, n_out);
        self.components.push(Box::new(component));
        id
    }

    /// Connect an outlet port to an inlet port under a unique label.
    pub fn connect(
        &mut self,
        label: &str,
        source: CompId,
        source_port: &str,
        target: CompId,
        target_port: &str,
    ) -> SolverResult<ConnId> {
        Ok(self
            .graph
            .connect(label, source, source_port, target, target_port)?)
    }

    /// Validate the topology and freeze it.
    pub fn build(self) -> SolverResult<Network> {
        let graph = self.graph.build()?;

        let mut comp_conns = Vec::with_capacity(self.components.len());
        for comp in graph.components() {
            let inlets = collect_conns(&comp.inlets, &graph)?;
            let outlets = collect_conns(&comp.outlets, &graph)?;
            comp_conns.push((inlets, outlets));
        }

        let specs = vec![ConnectionSpec::default(); graph.connections().len()];
        Ok(Network {
            graph,
            components: self.components,
            comp_conns,
            specs,
        })
    }
}

fn collect_conns(ports: &[hp_core::PortId], graph: &Graph) -> SolverResult<Vec<usize>> {
    ports
        .iter()
        .map(|&port| {
            graph
                .port_connection(port)
                .map(ConnId::idx)
                .ok_or_else(|| SolverError::ProblemSetup {
                    what: format!("port {port} has no connection"),
                })
        })
        .collect()
}

/// A validated network ready to be specified and solved.
///
/// Unknowns are `(m, p, h)` for every connection, in connection order.
#[derive(Debug)]
pub struct Network {
    pub(crate) graph: Graph,
    pub(crate) components: Vec<Box<dyn Component>>,
    /// Per component: connection indices at (inlets, outlets).
    pub(crate) comp_conns: Vec<(Vec<usize>, Vec<usize>)>,
    pub(crate) specs: Vec<ConnectionSpec>,
}

impl Network {
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Number of unknowns (three per connection).
    pub fn unknown_count(&self) -> usize {
        3 * self.specs.len()
    }

    /// Number of equations from components and connection specifications.
    pub fn equation_count(&self) -> usize {
        self.components
            .iter()
            .map(|c| c.equation_count())
            .sum::<usize>()
            + self
                .specs
                .iter()
                .map(ConnectionSpec::equation_count)
                .sum::<usize>()
    }

    /// Fail unless equations and unknowns balance.
    pub fn check_determined(&self) -> SolverResult<()> {
        let equations = self.equation_count();
        let unknowns = self.unknown_count();
        match equations.cmp(&unknowns) {
            std::cmp::Ordering::Less => Err(SolverError::UnderDetermined {
                equations,
                unknowns,
            }),
            std::cmp::Ordering::Greater => Err(SolverError::OverDetermined {
                equations,
                unknowns,
            }),
            std::cmp::Ordering::Equal => Ok(()),
        }
    }

    pub(crate) fn conn_index(&self, label: &str) -> SolverResult<usize> {
        self.graph
            .connection_by_label(label)
            .map(|c| c.id.idx())
            .ok_or_else(|| SolverError::UnknownConnection {
                label: label.to_string(),
            })
    }

    fn comp_index(&self, label: &str) -> SolverResult<usize> {
        self.components
            .iter()
            .position(|c| c.label() == label)
            .ok_or_else(|| SolverError::UnknownComponent {
                label: label.to_string(),
            })
    }

    /// Specification of a connection by label.
    pub fn conn(&self, label: &str) -> SolverResult<&ConnectionSpec> {
        let idx = self.conn_index(label)?;
        Ok(&self.specs[idx])
    }

    /// Mutable specification of a connection by label.
    pub fn conn_mut(&mut self, label: &str) -> SolverResult<&mut ConnectionSpec> {
        let idx = self.conn_index(label)?;
        Ok(&mut self.specs[idx])
    }

    /// Component model by label.
    pub fn component(&self, label: &str) -> SolverResult<&dyn Component> {
        let idx = self.comp_index(label)?;
        Ok(self.components[idx].as_ref())
    }

    /// Set or release a component parameter.
    pub fn set_component_param(
        &mut self,
        label: &str,
        name: &str,
        value: Option<f64>,
    ) -> SolverResult<()> {
        let idx = self.comp_index(label)?;
        self.components[idx].set_parameter(name, value)?;
        Ok(())
    }

    /// Connection labels in solver order.
    pub fn connection_labels(&self) -> impl Iterator<Item = &str> {
        self.graph.connections().iter().map(|c| c.label.as_str())
    }

    /// Resolve the fluid of every connection.
    ///
    /// Fluids given on connections spread along component fluid paths; a
    /// connection reached with two different fluids or with none is an error.
    pub fn propagate_fluids(&self) -> SolverResult<Vec<Species>> {
        let n = self.specs.len();
        let mut fluids: Vec<Option<Species>> = self.specs.iter().map(|s| s.fluid).collect();

        // Pairs of connections that must carry the same fluid.
        let mut links = Vec::new();
        for (comp, (inlets, outlets)) in self.components.iter().zip(&self.comp_conns) {
            for &(i, o) in comp.fluid_paths() {
                let a = inlets.get(usize::from(i) - 1);
                let b = outlets.get(usize::from(o) - 1);
                if let (Some(&a), Some(&b)) = (a, b) {
                    links.push((a, b));
                }
            }
        }

        let mut changed = true;
        while changed {
            changed = false;
            for &(a, b) in &links {
                match (fluids[a], fluids[b]) {
                    (Some(fa), Some(fb)) if fa != fb => {
                        return Err(SolverError::ProblemSetup {
                            what: format!(
                                "connections '{}' and '{}' carry different fluids ({fa} / {fb})",
                                self.graph.connections()[a].label,
                                self.graph.connections()[b].label
                            ),
                        });
                    }
                    (Some(fa), None) => {
                        fluids[b] = Some(fa);
                        changed = true;
                    }
                    (None, Some(fb)) => {
                        fluids[a] = Some(fb);
                        changed = true;
                    }
                    _ => {}
                }
            }
        }

        (0..n)
            .map(|i| {
                fluids[i].ok_or_else(|| SolverError::ProblemSetup {
                    what: format!(
                        "no fluid reaches connection '{}'",
                        self.graph.connections()[i].label
                    ),
                })
            })
            .collect()
    }
}
