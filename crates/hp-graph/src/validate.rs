//! Graph validation logic.

use std::collections::HashSet;

use hp_core::ConnId;

use crate::error::{GraphError, GraphResult};
use crate::graph::{Component, Connection, Port};

/// Component and connection labels must be unique.
pub(crate) fn validate_labels(
    components: &[Component],
    connections: &[Connection],
) -> GraphResult<()> {
    let mut seen = HashSet::new();
    for comp in components {
        if !seen.insert(comp.label.as_str()) {
            return Err(GraphError::DuplicateComponentLabel {
                label: comp.label.clone(),
            });
        }
    }

    let mut seen = HashSet::new();
    for conn in connections {
        if !seen.insert(conn.label.as_str()) {
            return Err(GraphError::DuplicateConnectionLabel {
                label: conn.label.clone(),
            });
        }
    }
    Ok(())
}

/// Every port must reference a real component and carry exactly one connection.
///
/// Returns the dense port → connection table.
pub(crate) fn validate_ports(
    components: &[Component],
    ports: &[Port],
    port_conn: &[Option<ConnId>],
) -> GraphResult<Vec<ConnId>> {
    let mut table = Vec::with_capacity(ports.len());
    for (port, conn) in ports.iter().zip(port_conn) {
        let comp = components
            .get(port.comp.idx())
            .ok_or(GraphError::InvalidCompRef {
                port: port.id,
                comp: port.comp,
            })?;
        let conn = conn.ok_or_else(|| GraphError::UnconnectedPort {
            comp: comp.label.clone(),
            port: port.name(),
        })?;
        table.push(conn);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::PortKind;
    use hp_core::Id;

    #[test]
    fn validate_empty_graph() {
        assert!(validate_labels(&[], &[]).is_ok());
        assert!(validate_ports(&[], &[], &[]).unwrap().is_empty());
    }

    #[test]
    fn validate_invalid_comp_ref() {
        let ports = vec![Port {
            id: Id::from_index(0),
            comp: Id::from_index(99),
            kind: PortKind::Inlet,
            number: 1,
        }];
        let result = validate_ports(&[], &ports, &[Some(Id::from_index(0))]);
        assert!(matches!(result, Err(GraphError::InvalidCompRef { .. })));
    }

    #[test]
    fn validate_duplicate_component_label() {
        let comp = |i| Component {
            id: Id::from_index(i),
            label: "valve".into(),
            inlets: vec![],
            outlets: vec![],
        };
        let result = validate_labels(&[comp(0), comp(1)], &[]);
        assert!(matches!(
            result,
            Err(GraphError::DuplicateComponentLabel { .. })
        ));
    }
}
