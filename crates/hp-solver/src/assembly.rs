//! Residual assembly over components and connection specifications.

use hp_components::common::{
    ENTHALPY_SCALE, MASS_SCALE, PRESSURE_SCALE, TEMPERATURE_SCALE,
};
use hp_components::{PortStreams, Stream};
use hp_core::units::pa;
use hp_fluids::{FluidModel, Species, StateInput};
use nalgebra::DVector;

use crate::error::SolverResult;
use crate::network::Network;

/// Unpack the solver vector `[m0, p0, h0, m1, p1, h1, ...]` into streams.
pub(crate) fn unpack(species: &[Species], x: &DVector<f64>) -> Vec<Stream> {
    species
        .iter()
        .enumerate()
        .map(|(i, &s)| Stream::new(s, x[3 * i], x[3 * i + 1], x[3 * i + 2]))
        .collect()
}

/// Pack streams into the solver vector.
pub(crate) fn pack(streams: &[Stream]) -> DVector<f64> {
    DVector::from_iterator(
        3 * streams.len(),
        streams.iter().flat_map(|s| [s.m, s.p, s.h]),
    )
}

/// Evaluate all scaled residuals at `x`.
pub(crate) fn residuals(
    network: &Network,
    fluid: &dyn FluidModel,
    species: &[Species],
    x: &DVector<f64>,
) -> SolverResult<DVector<f64>> {
    let streams = unpack(species, x);
    let mut out = Vec::with_capacity(network.equation_count());

    let mut inlets = Vec::with_capacity(2);
    let mut outlets = Vec::with_capacity(2);
    for (comp, (ins, outs)) in network.components.iter().zip(&network.comp_conns) {
        inlets.clear();
        inlets.extend(ins.iter().map(|&c| streams[c]));
        outlets.clear();
        outlets.extend(outs.iter().map(|&c| streams[c]));
        comp.residuals(
            fluid,
            PortStreams {
                inlets: &inlets,
                outlets: &outlets,
            },
            &mut out,
        )?;
    }

    for (spec, stream) in network.specs.iter().zip(&streams) {
        if let Some(m) = spec.m {
            out.push((stream.m - m) / MASS_SCALE);
        }
        if let Some(p) = spec.p {
            out.push((stream.p - p) / PRESSURE_SCALE);
        }
        if let Some(h) = spec.h {
            out.push((stream.h - h) / ENTHALPY_SCALE);
        }
        if let Some(t) = spec.t {
            let t_actual = stream.temperature(fluid)?;
            out.push((t_actual.value - t) / TEMPERATURE_SCALE);
        }
        if let Some(q) = spec.x {
            let h_q = fluid
                .state(
                    stream.species,
                    StateInput::PQ {
                        p: pa(stream.p),
                        q,
                    },
                )?
                .enthalpy();
            out.push((stream.h - h_q) / ENTHALPY_SCALE);
        }
    }

    Ok(DVector::from_vec(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_unpack_layout() {
        let streams = vec![
            Stream::new(Species::Water, 1.0, 2e5, 3e5),
            Stream::new(Species::R134a, 4.0, 5e5, 6e5),
        ];
        let x = pack(&streams);
        assert_eq!(x.len(), 6);
        assert_eq!(x[4], 5e5);
        let back = unpack(&[Species::Water, Species::R134a], &x);
        assert_eq!(back, streams);
    }
}
