use hp_project::HeatPumpConfig;

#[test]
fn defaults_match_reference_design_point() {
    let config = HeatPumpConfig::default();
    let design = &config.design;

    assert_eq!(config.working_fluid, "R134a");
    assert_eq!(design.compressor.eta_s, 0.85);
    assert_eq!(design.condenser.q_kw, -1012.0);
    assert_eq!(design.evaporator.q_kw, -1000.0);
    assert_eq!(design.compressor_outlet.t_c, 170.0);
    assert_eq!(design.compressor_outlet.t_sat_c, 95.0);
    assert!(design.compressor_outlet.p_bar.is_none());
    assert_eq!(
        (design.source.p_bar, design.source.t_in_c, design.source.t_out_c),
        (1.0, 40.0, 10.0)
    );
    assert_eq!(
        (design.sink.p_bar, design.sink.t_in_c, design.sink.t_out_c),
        (4.0, 40.0, 90.0)
    );
}

#[test]
fn default_dataset_candidates_cover_unit_suffixes() {
    let dataset = HeatPumpConfig::default().dataset;
    assert!(dataset.source_t_in.iter().any(|c| c == "T_in[degC]"));
    assert!(dataset.source_flow.iter().any(|c| c == "flow[kg/s]"));
    assert!(dataset.sink_energy.iter().any(|c| c == "Energy[kWh]"));
}
