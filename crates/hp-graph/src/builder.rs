//! Incremental graph builder.

use hp_core::{CompId, ConnId, PortId};

use crate::error::{GraphError, GraphResult};
use crate::graph::{Component, Connection, Graph, Port, PortKind, parse_port_name};
use crate::validate;

/// Builder for constructing a graph incrementally.
///
/// Use `add_component` and `connect` to build up the topology,
/// then call `build()` to validate and freeze it into an immutable `Graph`.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    components: Vec<Component>,
    ports: Vec<Port>,
    connections: Vec<Connection>,
    port_conn: Vec<Option<ConnId>>,
}

impl GraphBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component with the given number of inlet and outlet ports.
    pub fn add_component(&mut self, label: impl Into<String>, n_in: u8, n_out: u8) -> CompId {
        let comp_id = CompId::from_index(self.components.len() as u32);

        let inlets = (1..=n_in)
            .map(|n| self.push_port(comp_id, PortKind::Inlet, n))
            .collect();
        let outlets = (1..=n_out)
            .map(|n| self.push_port(comp_id, PortKind::Outlet, n))
            .collect();

        self.components.push(Component {
            id: comp_id,
            label: label.into(),
            inlets,
            outlets,
        });
        comp_id
    }

    fn push_port(&mut self, comp: CompId, kind: PortKind, number: u8) -> PortId {
        let id = PortId::from_index(self.ports.len() as u32);
        self.ports.push(Port {
            id,
            comp,
            kind,
            number,
        });
        self.port_conn.push(None);
        id
    }

    fn resolve_port(&self, comp: CompId, name: &str) -> GraphResult<PortId> {
        let component = self
            .components
            .get(comp.idx())
            .ok_or(GraphError::UnknownComponent { comp })?;
        let (kind, number) = parse_port_name(name)?;
        let port = match kind {
            PortKind::Inlet => component.inlet(number),
            PortKind::Outlet => component.outlet(number),
        };
        port.ok_or_else(|| GraphError::UnknownPort {
            comp: component.label.clone(),
            port: name.to_string(),
        })
    }

    /// Connect `source_port` (an outlet) of `source` to `target_port` (an inlet) of `target`.
    pub fn connect(
        &mut self,
        label: impl Into<String>,
        source: CompId,
        source_port: &str,
        target: CompId,
        target_port: &str,
    ) -> GraphResult<ConnId> {
        let label = label.into();
        let src = self.resolve_port(source, source_port)?;
        let dst = self.resolve_port(target, target_port)?;

        if self.ports[src.idx()].kind != PortKind::Outlet {
            return Err(GraphError::WrongPortDirection {
                label,
                port: source_port.to_string(),
            });
        }
        if self.ports[dst.idx()].kind != PortKind::Inlet {
            return Err(GraphError::WrongPortDirection {
                label,
                port: target_port.to_string(),
            });
        }
        for (port, comp, name) in [(src, source, source_port), (dst, target, target_port)] {
            if self.port_conn[port.idx()].is_some() {
                return Err(GraphError::PortAlreadyConnected {
                    comp: self.components[comp.idx()].label.clone(),
                    port: name.to_string(),
                });
            }
        }

        let id = ConnId::from_index(self.connections.len() as u32);
        self.port_conn[src.idx()] = Some(id);
        self.port_conn[dst.idx()] = Some(id);
        self.connections.push(Connection {
            id,
            label,
            source: src,
            target: dst,
        });
        Ok(id)
    }

    /// Build and validate the graph, returning an immutable `Graph`.
    pub fn build(self) -> GraphResult<Graph> {
        validate::validate_labels(&self.components, &self.connections)?;
        let port_conn = validate::validate_ports(&self.components, &self.ports, &self.port_conn)?;

        Ok(Graph {
            components: self.components,
            ports: self.ports,
            connections: self.connections,
            port_conn,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_assigns_contiguous_ids() {
        let mut builder = GraphBuilder::new();
        let a = builder.add_component("a", 0, 1);
        let b = builder.add_component("b", 2, 2);
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(builder.ports.len(), 5);
    }

    #[test]
    fn connect_rejects_inlet_as_source() {
        let mut builder = GraphBuilder::new();
        let a = builder.add_component("a", 1, 1);
        let b = builder.add_component("b", 1, 1);
        let err = builder.connect("x", a, "in1", b, "in1").unwrap_err();
        assert!(matches!(err, GraphError::WrongPortDirection { .. }));
    }

    #[test]
    fn connect_rejects_double_use() {
        let mut builder = GraphBuilder::new();
        let a = builder.add_component("a", 0, 1);
        let b = builder.add_component("b", 1, 0);
        let c = builder.add_component("c", 1, 0);
        builder.connect("1", a, "out1", b, "in1").unwrap();
        let err = builder.connect("2", a, "out1", c, "in1").unwrap_err();
        assert!(matches!(err, GraphError::PortAlreadyConnected { .. }));
    }

    #[test]
    fn connect_rejects_missing_port() {
        let mut builder = GraphBuilder::new();
        let a = builder.add_component("a", 0, 1);
        let b = builder.add_component("b", 1, 0);
        let err = builder.connect("1", a, "out2", b, "in1").unwrap_err();
        assert!(matches!(err, GraphError::UnknownPort { .. }));
    }
}
