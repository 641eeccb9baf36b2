//! Core topology data structures.

use hp_core::{CompId, ConnId, PortId};

use crate::error::{GraphError, GraphResult};

/// Direction/kind of a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortKind {
    /// Inlet port (fluid enters the component).
    Inlet,
    /// Outlet port (fluid leaves the component).
    Outlet,
}

/// A numbered port on a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Port {
    pub id: PortId,
    pub comp: CompId,
    pub kind: PortKind,
    /// 1-based port number within its kind.
    pub number: u8,
}

impl Port {
    /// Port name, e.g. `in1` or `out2`.
    pub fn name(&self) -> String {
        match self.kind {
            PortKind::Inlet => format!("in{}", self.number),
            PortKind::Outlet => format!("out{}", self.number),
        }
    }
}

/// Parse a port name like `in2` into its kind and 1-based number.
pub(crate) fn parse_port_name(name: &str) -> GraphResult<(PortKind, u8)> {
    let invalid = || GraphError::InvalidPortName {
        name: name.to_string(),
    };
    let (kind, digits) = if let Some(rest) = name.strip_prefix("out") {
        (PortKind::Outlet, rest)
    } else if let Some(rest) = name.strip_prefix("in") {
        (PortKind::Inlet, rest)
    } else {
        return Err(invalid());
    };
    let number: u8 = digits.parse().map_err(|_| invalid())?;
    if number == 0 {
        return Err(invalid());
    }
    Ok((kind, number))
}

/// A component placeholder in the topology (physics live in `hp-components`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub id: CompId,
    pub label: String,
    /// Inlet ports in order (`in1`, `in2`, ...).
    pub inlets: Vec<PortId>,
    /// Outlet ports in order (`out1`, `out2`, ...).
    pub outlets: Vec<PortId>,
}

impl Component {
    /// Get the n-th inlet port (1-based).
    pub fn inlet(&self, number: u8) -> Option<PortId> {
        self.inlets.get(usize::from(number).checked_sub(1)?).copied()
    }

    /// Get the n-th outlet port (1-based).
    pub fn outlet(&self, number: u8) -> Option<PortId> {
        self.outlets.get(usize::from(number).checked_sub(1)?).copied()
    }
}

/// A labelled stream from an outlet port to an inlet port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub id: ConnId,
    pub label: String,
    pub source: PortId,
    pub target: PortId,
}

/// The graph: a validated, immutable collection of components, ports and connections.
///
/// Every port carries exactly one connection; `port_conn[port]` gives it in O(1).
#[derive(Debug, Clone)]
pub struct Graph {
    pub(crate) components: Vec<Component>,
    pub(crate) ports: Vec<Port>,
    pub(crate) connections: Vec<Connection>,
    pub(crate) port_conn: Vec<ConnId>,
}

impl Graph {
    /// Return all components.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Return all ports.
    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    /// Return all connections in insertion order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Get a component by ID (returns None if ID out of bounds).
    pub fn component(&self, id: CompId) -> Option<&Component> {
        self.components.get(id.idx())
    }

    /// Get a port by ID (returns None if ID out of bounds).
    pub fn port(&self, id: PortId) -> Option<&Port> {
        self.ports.get(id.idx())
    }

    /// Get a connection by ID (returns None if ID out of bounds).
    pub fn connection(&self, id: ConnId) -> Option<&Connection> {
        self.connections.get(id.idx())
    }

    /// Find a component by label.
    pub fn component_by_label(&self, label: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.label == label)
    }

    /// Find a connection by label.
    pub fn connection_by_label(&self, label: &str) -> Option<&Connection> {
        self.connections.iter().find(|c| c.label == label)
    }

    /// Connection attached to a port.
    pub fn port_connection(&self, port: PortId) -> Option<ConnId> {
        self.port_conn.get(port.idx()).copied()
    }

    /// Connection entering a component through its n-th inlet (1-based).
    pub fn inlet_conn(&self, comp: CompId, number: u8) -> Option<ConnId> {
        let port = self.component(comp)?.inlet(number)?;
        self.port_connection(port)
    }

    /// Connection leaving a component through its n-th outlet (1-based).
    pub fn outlet_conn(&self, comp: CompId, number: u8) -> Option<ConnId> {
        let port = self.component(comp)?.outlet(number)?;
        self.port_connection(port)
    }

    /// Component and port name at the upstream end of a connection.
    pub fn conn_source(&self, conn: ConnId) -> Option<(&Component, String)> {
        let port = self.port(self.connection(conn)?.source)?;
        Some((self.component(port.comp)?, port.name()))
    }

    /// Component and port name at the downstream end of a connection.
    pub fn conn_target(&self, conn: ConnId) -> Option<(&Component, String)> {
        let port = self.port(self.connection(conn)?.target)?;
        Some((self.component(port.comp)?, port.name()))
    }
}
