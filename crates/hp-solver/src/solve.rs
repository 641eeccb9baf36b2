//! High-level solver interface.

use hp_components::{ComponentResults, PortStreams};
use hp_fluids::{FluidModel, Species};
use nalgebra::DVector;
use tracing::{debug, info};

use crate::assembly::{pack, residuals, unpack};
use crate::error::{SolverError, SolverResult};
use crate::initialization::{design_guess, offdesign_guess};
use crate::jacobian::{central_difference_jacobian, finite_difference_jacobian};
use crate::network::Network;
use crate::newton::{JacobianScheme, NewtonConfig, newton_solve};
use crate::state::{ConnectionState, NetworkState};

/// Where the initial guess comes from.
#[derive(Debug, Clone, Copy)]
pub enum SolveMode<'a> {
    /// Guess from fixed values and start values.
    Design,
    /// Start from a stored (design) state.
    OffDesign(&'a NetworkState),
}

/// Solve the network for its current specifications.
///
/// This function:
/// 1. Checks that equations and unknowns balance
/// 2. Resolves the fluid of every connection
/// 3. Builds the initial guess for the mode
/// 4. Runs Newton iteration on the scaled residuals
pub fn solve(
    network: &Network,
    fluid: &dyn FluidModel,
    mode: SolveMode<'_>,
    config: &NewtonConfig,
) -> SolverResult<NetworkState> {
    network.check_determined()?;
    let species = network.propagate_fluids()?;

    let guess = match mode {
        SolveMode::Design => design_guess(network, fluid, &species),
        SolveMode::OffDesign(reference) => offdesign_guess(network, fluid, &species, reference)?,
    };
    debug!(
        equations = network.equation_count(),
        unknowns = network.unknown_count(),
        "starting solve"
    );

    let residual_fn =
        |x: &DVector<f64>| -> SolverResult<DVector<f64>> { residuals(network, fluid, &species, x) };
    let jacobian_fn = |x: &DVector<f64>, r: &DVector<f64>| match config.jacobian_scheme {
        JacobianScheme::Forward => {
            finite_difference_jacobian(x, r, residual_fn, config.jacobian_epsilon)
        }
        JacobianScheme::Central => {
            central_difference_jacobian(x, residual_fn, config.jacobian_epsilon)
        }
    };

    let result = newton_solve(pack(&guess), residual_fn, jacobian_fn, config)?;
    info!(
        iterations = result.iterations,
        residual_norm = result.residual_norm,
        "network solved"
    );

    build_state(network, fluid, &species, &result.x, result.residual_norm, result.iterations)
}

fn build_state(
    network: &Network,
    fluid: &dyn FluidModel,
    species: &[Species],
    x: &DVector<f64>,
    residual_norm: f64,
    iterations: usize,
) -> SolverResult<NetworkState> {
    let connections = network
        .connection_labels()
        .zip(unpack(species, x))
        .map(|(label, stream)| {
            let state = stream.state(fluid).map_err(|e| SolverError::InvalidState {
                what: format!("connection '{label}': {e}"),
            })?;
            Ok(ConnectionState {
                label: label.to_string(),
                fluid: stream.species.key().to_string(),
                m: stream.m,
                p: stream.p,
                h: stream.h,
                t: state.temperature().value,
                x: state.quality(),
            })
        })
        .collect::<SolverResult<Vec<_>>>()?;

    Ok(NetworkState {
        connections,
        residual_norm,
        iterations,
    })
}

impl Network {
    /// Derived results of a component at a solved state.
    pub fn component_results(
        &self,
        label: &str,
        fluid: &dyn FluidModel,
        state: &NetworkState,
    ) -> SolverResult<ComponentResults> {
        let idx = self
            .components
            .iter()
            .position(|c| c.label() == label)
            .ok_or_else(|| SolverError::UnknownComponent {
                label: label.to_string(),
            })?;
        if state.connections.len() != self.specs.len() {
            return Err(SolverError::ProblemSetup {
                what: "state does not match the network's connections".to_string(),
            });
        }

        let streams = state.streams()?;
        let (ins, outs) = &self.comp_conns[idx];
        let inlets: Vec<_> = ins.iter().map(|&c| streams[c]).collect();
        let outlets: Vec<_> = outs.iter().map(|&c| streams[c]).collect();
        Ok(self.components[idx].results(
            fluid,
            PortStreams {
                inlets: &inlets,
                outlets: &outlets,
            },
        )?)
    }
}
