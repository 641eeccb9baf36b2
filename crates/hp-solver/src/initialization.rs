//! Initial guesses for the solver vector.
//!
//! Design mode builds the guess from fixed values, derived values (T or x with
//! a known pressure) and start values. Off-design mode starts from a stored
//! state and overwrites it with the current fixed values.

use hp_components::Stream;
use hp_core::units::{k, pa};
use hp_fluids::{FluidModel, Species, StateInput};

use crate::error::{SolverError, SolverResult};
use crate::network::{ConnectionSpec, Network};
use crate::state::NetworkState;

/// Mass flow used when nothing better is known [kg/s].
const DEFAULT_MASS_FLOW: f64 = 1.0;
/// Pressure used when nothing better is known [Pa].
const DEFAULT_PRESSURE: f64 = 1e5;
/// Temperature used to seed an unknown enthalpy [K].
const DEFAULT_TEMPERATURE: f64 = 293.15;
/// Enthalpy used when even the seed temperature fails [J/kg].
const DEFAULT_ENTHALPY: f64 = 2e5;

/// Enthalpy implied by the fixed values of a connection, if any.
fn implied_enthalpy(
    fluid: &dyn FluidModel,
    species: Species,
    spec: &ConnectionSpec,
    p: f64,
) -> Option<f64> {
    if let Some(h) = spec.h {
        return Some(h);
    }
    if let Some(t) = spec.t {
        return fluid.h_pt(species, pa(p), k(t)).ok();
    }
    if let Some(q) = spec.x {
        return fluid
            .state(species, StateInput::PQ { p: pa(p), q })
            .ok()
            .map(|s| s.enthalpy());
    }
    None
}

/// Spread known mass flows along component fluid paths.
fn propagate_mass_flows(network: &Network, m: &mut [Option<f64>]) {
    let mut changed = true;
    while changed {
        changed = false;
        for (comp, (ins, outs)) in network.components.iter().zip(&network.comp_conns) {
            for &(i, o) in comp.fluid_paths() {
                let (Some(&a), Some(&b)) =
                    (ins.get(usize::from(i) - 1), outs.get(usize::from(o) - 1))
                else {
                    continue;
                };
                match (m[a], m[b]) {
                    (Some(v), None) => {
                        m[b] = Some(v);
                        changed = true;
                    }
                    (None, Some(v)) => {
                        m[a] = Some(v);
                        changed = true;
                    }
                    _ => {}
                }
            }
        }
    }
}

/// Design-mode guess from fixed values and start values.
pub(crate) fn design_guess(
    network: &Network,
    fluid: &dyn FluidModel,
    species: &[Species],
) -> Vec<Stream> {
    let mut m: Vec<Option<f64>> = network.specs.iter().map(|s| s.m.or(s.m0)).collect();
    propagate_mass_flows(network, &mut m);

    network
        .specs
        .iter()
        .zip(species)
        .zip(m)
        .map(|((spec, &s), m)| {
            let p = spec.p.or(spec.p0).unwrap_or(DEFAULT_PRESSURE);
            let h = implied_enthalpy(fluid, s, spec, p)
                .or(spec.h0)
                .unwrap_or_else(|| {
                    fluid
                        .h_pt(s, pa(p), k(DEFAULT_TEMPERATURE))
                        .unwrap_or(DEFAULT_ENTHALPY)
                });
            Stream::new(s, m.unwrap_or(DEFAULT_MASS_FLOW), p, h)
        })
        .collect()
}

/// Off-design guess: a stored state overwritten with the current fixed values.
pub(crate) fn offdesign_guess(
    network: &Network,
    fluid: &dyn FluidModel,
    species: &[Species],
    reference: &NetworkState,
) -> SolverResult<Vec<Stream>> {
    let labels: Vec<&str> = network.connection_labels().collect();
    let stored: Vec<&str> = reference
        .connections
        .iter()
        .map(|c| c.label.as_str())
        .collect();
    if labels != stored {
        return Err(SolverError::ProblemSetup {
            what: "stored state does not match the network's connections".to_string(),
        });
    }

    let mut streams = reference.streams()?;
    for ((stream, spec), &s) in streams.iter_mut().zip(&network.specs).zip(species) {
        if stream.species != s {
            return Err(SolverError::ProblemSetup {
                what: format!(
                    "stored state carries {} where the network carries {s}",
                    stream.species
                ),
            });
        }
        if let Some(m) = spec.m {
            stream.m = m;
        }
        if let Some(p) = spec.p {
            stream.p = p;
        }
        if let Some(h) = implied_enthalpy(fluid, s, spec, stream.p) {
            stream.h = h;
        }
    }
    Ok(streams)
}
