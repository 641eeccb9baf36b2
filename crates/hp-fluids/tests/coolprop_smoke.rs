//! CoolProp integration tests.
//!
//! Broad tolerances avoid backend version issues while still enforcing physical plausibility.

use hp_core::units::{bar, celsius, to_bar, to_celsius};
use hp_fluids::{CoolPropModel, FluidModel, Species, StateInput};

#[test]
fn water_at_1bar_40c_is_liquid() {
    let model = CoolPropModel::new();
    let state = model
        .state(
            Species::Water,
            StateInput::PT {
                p: bar(1.0),
                t: celsius(40.0),
            },
        )
        .expect("water PT state");

    // h(40 °C) is about 167.5 kJ/kg with the IAPWS reference.
    assert!(
        state.enthalpy() > 160e3 && state.enthalpy() < 175e3,
        "h = {}",
        state.enthalpy()
    );
    assert!(!state.is_two_phase());
}

#[test]
fn water_saturation_pressure_at_95c() {
    let model = CoolPropModel::new();
    let p = model
        .saturation_pressure(Species::Water, celsius(95.0))
        .expect("saturation pressure");
    // About 0.845 bar.
    assert!(to_bar(p) > 0.8 && to_bar(p) < 0.9, "p_sat = {} bar", to_bar(p));

    let t = model
        .saturation_temperature(Species::Water, p)
        .expect("saturation temperature");
    assert!((to_celsius(t) - 95.0).abs() < 0.05);
}

#[test]
fn ph_flash_inside_dome_reports_quality() {
    let model = CoolPropModel::new();
    let p = bar(5.0);
    let h_l = model.h_sat_liquid(Species::R134a, p).expect("h'");
    let h_v = model.h_sat_vapor(Species::R134a, p).expect("h''");
    assert!(h_v > h_l);

    let h_mid = 0.5 * (h_l + h_v);
    let x = model
        .x_ph(Species::R134a, p, h_mid)
        .expect("quality")
        .expect("two-phase state");
    assert!((x - 0.5).abs() < 0.01, "x = {x}");
}

#[test]
fn isentropic_compression_raises_enthalpy() {
    let model = CoolPropModel::new();
    let p_low = bar(3.0);
    let p_high = bar(12.0);
    let h_in = model
        .h_pt(Species::R134a, p_low, celsius(10.0))
        .expect("suction enthalpy");
    let s_in = model.s_ph(Species::R134a, p_low, h_in).expect("entropy");
    let h_out_s = model.h_ps(Species::R134a, p_high, s_in).expect("h_s");
    assert!(h_out_s > h_in);

    let t_out = model.t_ph(Species::R134a, p_high, h_out_s).expect("T out");
    assert!(to_celsius(t_out) > 10.0);
}

#[test]
fn pt_and_ph_agree() {
    let model = CoolPropModel::new();
    let p = bar(4.0);
    let h = model
        .h_pt(Species::Water, p, celsius(90.0))
        .expect("h(p, T)");
    let t = model.t_ph(Species::Water, p, h).expect("T(p, h)");
    assert!((to_celsius(t) - 90.0).abs() < 1e-3);
}
