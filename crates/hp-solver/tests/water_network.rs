//! Integration tests for the network solver on water-only networks.

use hp_components::{Boundary, HeatExchanger, Valve};
use hp_core::units::{bar, celsius, kgps, to_celsius};
use hp_fluids::{IncompressibleModel, Species};
use hp_solver::{Network, NetworkBuilder, NewtonConfig, SolveMode, SolverError, solve};

fn exchanger_network() -> Network {
    let mut nb = NetworkBuilder::new();
    let hot_in = nb.add(Boundary::source("hot in"));
    let cold_in = nb.add(Boundary::source("cold in"));
    let hx = nb.add(HeatExchanger::new("hx"));
    let hot_out = nb.add(Boundary::sink("hot out"));
    let cold_out = nb.add(Boundary::sink("cold out"));
    nb.connect("h1", hot_in, "out1", hx, "in1").unwrap();
    nb.connect("c1", cold_in, "out1", hx, "in2").unwrap();
    nb.connect("h2", hx, "out1", hot_out, "in1").unwrap();
    nb.connect("c2", hx, "out2", cold_out, "in1").unwrap();
    let mut nw = nb.build().unwrap();

    nw.set_component_param("hx", "pr1", Some(1.0)).unwrap();
    nw.set_component_param("hx", "pr2", Some(1.0)).unwrap();
    nw.conn_mut("h1")
        .unwrap()
        .set_fluid(Species::Water)
        .set_mass_flow(Some(kgps(2.0)))
        .set_pressure(Some(bar(2.0)))
        .set_temperature(Some(celsius(80.0)));
    nw.conn_mut("c1")
        .unwrap()
        .set_fluid(Species::Water)
        .set_pressure(Some(bar(1.0)))
        .set_temperature(Some(celsius(20.0)));
    nw.conn_mut("h2")
        .unwrap()
        .set_temperature(Some(celsius(60.0)));
    nw.conn_mut("c2")
        .unwrap()
        .set_temperature(Some(celsius(30.0)));
    nw
}

#[test]
fn exchanger_balances_cold_side_flow() {
    let nw = exchanger_network();
    let fluid = IncompressibleModel::water();

    let state = solve(&nw, &fluid, SolveMode::Design, &NewtonConfig::default())
        .expect("design solve");

    let c1 = state.conn("c1").unwrap();
    assert!((c1.m - 4.0).abs() < 1e-6, "m_cold = {}", c1.m);
    assert!((state.conn("h2").unwrap().p - 2e5).abs() < 1e-3);

    let results = nw.component_results("hx", &fluid, &state).unwrap();
    let q = results.get("Q").unwrap();
    assert!((q + 2.0 * 4184.0 * 20.0).abs() < 1e-2, "Q = {q}");
    assert!((results.get("ttd_u").unwrap() - 50.0).abs() < 1e-6);
}

#[test]
fn offdesign_restarts_from_stored_state() {
    let mut nw = exchanger_network();
    let fluid = IncompressibleModel::water();
    let design = solve(&nw, &fluid, SolveMode::Design, &NewtonConfig::default()).unwrap();

    // Hotter supply: cold side now needs more flow.
    nw.conn_mut("h1")
        .unwrap()
        .set_temperature(Some(celsius(90.0)));
    let off = solve(
        &nw,
        &fluid,
        SolveMode::OffDesign(&design),
        &NewtonConfig::default(),
    )
    .expect("off-design solve");

    let c1 = off.conn("c1").unwrap();
    assert!((c1.m - 6.0).abs() < 1e-6, "m_cold = {}", c1.m);
    let t_h1 = to_celsius(hp_core::units::k(off.conn("h1").unwrap().t));
    assert!((t_h1 - 90.0).abs() < 1e-6);
}

#[test]
fn released_specification_is_underdetermined() {
    let mut nw = exchanger_network();
    nw.conn_mut("c2").unwrap().set_temperature(None);
    let fluid = IncompressibleModel::water();

    let err = solve(&nw, &fluid, SolveMode::Design, &NewtonConfig::default()).unwrap_err();
    assert_eq!(
        err,
        SolverError::UnderDetermined {
            equations: 11,
            unknowns: 12
        }
    );
}

#[test]
fn solve_is_deterministic() {
    let nw = exchanger_network();
    let fluid = IncompressibleModel::water();
    let a = solve(&nw, &fluid, SolveMode::Design, &NewtonConfig::default()).unwrap();
    let b = solve(&nw, &fluid, SolveMode::Design, &NewtonConfig::default()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn throttling_line_keeps_enthalpy() {
    let mut nb = NetworkBuilder::new();
    let so = nb.add(Boundary::source("source"));
    let va = nb.add(Valve::new("valve"));
    let si = nb.add(Boundary::sink("sink"));
    nb.connect("a", so, "out1", va, "in1").unwrap();
    nb.connect("b", va, "out1", si, "in1").unwrap();
    let mut nw = nb.build().unwrap();
    nw.set_component_param("valve", "pr", Some(0.25)).unwrap();
    nw.conn_mut("a")
        .unwrap()
        .set_fluid(Species::Water)
        .set_mass_flow(Some(kgps(1.0)))
        .set_pressure(Some(bar(8.0)))
        .set_temperature(Some(celsius(35.0)));

    let fluid = IncompressibleModel::water();
    let state = solve(&nw, &fluid, SolveMode::Design, &NewtonConfig::default()).unwrap();
    let a = state.conn("a").unwrap();
    let b = state.conn("b").unwrap();
    assert!((b.p - 2e5).abs() < 1e-3);
    assert!((a.h - b.h).abs() < 1e-3);
    assert_eq!(b.fluid, "water");
}
