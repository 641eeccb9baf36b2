//! Serializable description of a network's layout and specifications.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::network::Network;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDescription {
    pub label: String,
    pub kind: String,
    /// Parameter values in SI units (`null` = released).
    pub parameters: BTreeMap<String, Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionDescription {
    pub label: String,
    pub source: String,
    pub source_port: String,
    pub target: String,
    pub target_port: String,
    pub fluid: Option<String>,
    /// Fixed values in SI units keyed `m`, `p`, `h`, `T`, `x`.
    pub specs: BTreeMap<String, f64>,
}

/// Layout and specifications of a network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkDescription {
    pub components: Vec<ComponentDescription>,
    pub connections: Vec<ConnectionDescription>,
    pub equations: usize,
    pub unknowns: usize,
}

impl Network {
    /// Describe components, parameters, connections and their fixed values.
    pub fn describe(&self) -> NetworkDescription {
        let components = self
            .components
            .iter()
            .map(|c| ComponentDescription {
                label: c.label().to_string(),
                kind: c.kind().to_string(),
                parameters: c
                    .parameters()
                    .into_iter()
                    .map(|(name, value)| (name.to_string(), value))
                    .collect(),
            })
            .collect();

        let connections = self
            .graph
            .connections()
            .iter()
            .zip(&self.specs)
            .map(|(conn, spec)| {
                let (source, source_port) = self
                    .graph
                    .conn_source(conn.id)
                    .map(|(c, p)| (c.label.clone(), p))
                    .unwrap_or_default();
                let (target, target_port) = self
                    .graph
                    .conn_target(conn.id)
                    .map(|(c, p)| (c.label.clone(), p))
                    .unwrap_or_default();
                let specs = [
                    ("m", spec.m),
                    ("p", spec.p),
                    ("h", spec.h),
                    ("T", spec.t),
                    ("x", spec.x),
                ]
                .into_iter()
                .filter_map(|(k, v)| v.map(|v| (k.to_string(), v)))
                .collect();

                ConnectionDescription {
                    label: conn.label.clone(),
                    source,
                    source_port,
                    target,
                    target_port,
                    fluid: spec.fluid.map(|s| s.key().to_string()),
                    specs,
                }
            })
            .collect();

        NetworkDescription {
            components,
            connections,
            equations: self.equation_count(),
            unknowns: self.unknown_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::network::NetworkBuilder;
    use hp_components::{Boundary, Compressor};
    use hp_core::units::bar;
    use hp_fluids::Species;

    #[test]
    fn describe_lists_ports_and_specs() {
        let mut nb = NetworkBuilder::new();
        let so = nb.add(Boundary::source("source"));
        let cp = nb.add(Compressor::new("compressor").with_eta_s(0.85).unwrap());
        let si = nb.add(Boundary::sink("sink"));
        nb.connect("1", so, "out1", cp, "in1").unwrap();
        nb.connect("2", cp, "out1", si, "in1").unwrap();
        let mut nw = nb.build().unwrap();
        nw.conn_mut("1")
            .unwrap()
            .set_fluid(Species::R134a)
            .set_pressure(Some(bar(3.0)));

        let desc = nw.describe();
        assert_eq!(desc.components.len(), 3);
        assert_eq!(desc.components[1].kind, "Compressor");
        assert_eq!(desc.components[1].parameters["eta_s"], Some(0.85));
        assert_eq!(desc.components[1].parameters["pr"], None);

        let c1 = &desc.connections[0];
        assert_eq!(c1.source, "source");
        assert_eq!(c1.target_port, "in1");
        assert_eq!(c1.fluid.as_deref(), Some("R134a"));
        assert_eq!(c1.specs["p"], 3e5);
        assert_eq!(desc.unknowns, 6);
    }
}
