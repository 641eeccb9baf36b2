//! Integration tests for hp-graph.

use hp_graph::{GraphBuilder, GraphError, PortKind};

#[test]
fn build_closed_refrigerant_loop() {
    let mut builder = GraphBuilder::new();
    let valve = builder.add_component("expansion valve", 1, 1);
    let closer = builder.add_component("cycle closer", 1, 1);
    let evaporator = builder.add_component("evaporator", 2, 2);
    let compressor = builder.add_component("compressor", 1, 1);
    let condenser = builder.add_component("condenser", 2, 2);
    let src_in = builder.add_component("source in", 0, 1);
    let src_out = builder.add_component("source out", 1, 0);
    let snk_in = builder.add_component("sink in", 0, 1);
    let snk_out = builder.add_component("sink out", 1, 0);

    builder.connect("0", valve, "out1", closer, "in1").unwrap();
    builder.connect("1", closer, "out1", evaporator, "in2").unwrap();
    builder.connect("2", evaporator, "out2", compressor, "in1").unwrap();
    builder.connect("3", compressor, "out1", condenser, "in1").unwrap();
    builder.connect("4", condenser, "out1", valve, "in1").unwrap();
    builder.connect("11", src_in, "out1", evaporator, "in1").unwrap();
    builder.connect("12", evaporator, "out1", src_out, "in1").unwrap();
    builder.connect("21", snk_in, "out1", condenser, "in2").unwrap();
    builder.connect("22", condenser, "out2", snk_out, "in1").unwrap();

    let graph = builder.build().expect("valid topology");
    assert_eq!(graph.components().len(), 9);
    assert_eq!(graph.connections().len(), 9);
    assert_eq!(graph.ports().len(), 18);

    let c2 = graph.connection_by_label("2").expect("connection 2");
    let (from, from_port) = graph.conn_source(c2.id).unwrap();
    let (to, to_port) = graph.conn_target(c2.id).unwrap();
    assert_eq!(from.label, "evaporator");
    assert_eq!(from_port, "out2");
    assert_eq!(to.label, "compressor");
    assert_eq!(to_port, "in1");

    assert_eq!(graph.inlet_conn(evaporator, 2), Some(graph.connection_by_label("1").unwrap().id));
    assert_eq!(graph.outlet_conn(condenser, 2), Some(graph.connection_by_label("22").unwrap().id));

    let port = graph.port(c2.source).unwrap();
    assert_eq!(port.kind, PortKind::Outlet);
}

#[test]
fn unconnected_port_fails_build() {
    let mut builder = GraphBuilder::new();
    let a = builder.add_component("a", 0, 1);
    let b = builder.add_component("b", 2, 0);
    builder.connect("1", a, "out1", b, "in1").unwrap();

    let err = builder.build().unwrap_err();
    assert_eq!(
        err,
        GraphError::UnconnectedPort {
            comp: "b".into(),
            port: "in2".into()
        }
    );
}

#[test]
fn duplicate_connection_label_fails_build() {
    let mut builder = GraphBuilder::new();
    let a = builder.add_component("a", 0, 2);
    let b = builder.add_component("b", 2, 0);
    builder.connect("x", a, "out1", b, "in1").unwrap();
    builder.connect("x", a, "out2", b, "in2").unwrap();

    let err = builder.build().unwrap_err();
    assert!(matches!(err, GraphError::DuplicateConnectionLabel { .. }));
    assert!(err.to_string().contains("'x'"));
}
