//! Configuration validation logic.

use std::str::FromStr;

use hp_fluids::Species;

use crate::schema::{CONFIG_VERSION, DatasetDef, ExchangerDef, HeatPumpConfig, WaterLoopDef};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown fluid '{name}' in {field}")]
    UnknownFluid { field: String, name: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_config(config: &HeatPumpConfig) -> Result<(), ValidationError> {
    if config.version == 0 || config.version > CONFIG_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: config.version,
        });
    }

    let species = parse_species("working_fluid", &config.working_fluid)?;
    if !species.is_refrigerant() {
        return Err(ValidationError::InvalidValue {
            field: "working_fluid".to_string(),
            value: config.working_fluid.clone(),
            reason: "not a refrigerant".to_string(),
        });
    }

    let design = &config.design;
    let eta = design.compressor.eta_s;
    if !eta.is_finite() || eta <= 0.0 || eta > 1.0 {
        return Err(invalid(
            "design.compressor.eta_s",
            eta,
            "must lie in (0, 1]",
        ));
    }

    validate_exchanger("design.condenser", &design.condenser)?;
    validate_exchanger("design.evaporator", &design.evaporator)?;

    let outlet = &design.compressor_outlet;
    finite("design.compressor_outlet.t_c", outlet.t_c)?;
    finite("design.compressor_outlet.t_sat_c", outlet.t_sat_c)?;
    if let Some(p) = outlet.p_bar {
        positive("design.compressor_outlet.p_bar", p)?;
    }
    if outlet.t_c <= outlet.t_sat_c {
        return Err(invalid(
            "design.compressor_outlet.t_c",
            outlet.t_c,
            "discharge must be superheated above t_sat_c",
        ));
    }

    validate_loop("design.source", &design.source)?;
    validate_loop("design.sink", &design.sink)?;
    if design.source.t_out_c >= design.source.t_in_c {
        return Err(invalid(
            "design.source.t_out_c",
            design.source.t_out_c,
            "heat source must cool down",
        ));
    }
    if design.sink.t_out_c <= design.sink.t_in_c {
        return Err(invalid(
            "design.sink.t_out_c",
            design.sink.t_out_c,
            "heat sink must warm up",
        ));
    }

    let solver = &config.solver;
    if solver.max_iterations == 0 {
        return Err(invalid("solver.max_iterations", 0.0, "must be at least 1"));
    }
    positive("solver.abs_tol", solver.abs_tol)?;
    finite("solver.rel_tol", solver.rel_tol)?;
    if solver.rel_tol < 0.0 {
        return Err(invalid("solver.rel_tol", solver.rel_tol, "must not be negative"));
    }
    if !(solver.line_search_beta > 0.0 && solver.line_search_beta < 1.0) {
        return Err(invalid(
            "solver.line_search_beta",
            solver.line_search_beta,
            "must lie in (0, 1)",
        ));
    }
    positive("solver.jacobian_epsilon", solver.jacobian_epsilon)?;

    validate_dataset(&config.dataset)?;

    Ok(())
}

fn validate_exchanger(field: &str, hx: &ExchangerDef) -> Result<(), ValidationError> {
    finite(&format!("{field}.q_kw"), hx.q_kw)?;
    positive(&format!("{field}.pr1"), hx.pr1)?;
    positive(&format!("{field}.pr2"), hx.pr2)?;
    Ok(())
}

fn validate_loop(field: &str, water: &WaterLoopDef) -> Result<(), ValidationError> {
    parse_species(&format!("{field}.fluid"), &water.fluid)?;
    positive(&format!("{field}.p_bar"), water.p_bar)?;
    finite(&format!("{field}.t_in_c"), water.t_in_c)?;
    finite(&format!("{field}.t_out_c"), water.t_out_c)?;
    Ok(())
}

fn validate_dataset(dataset: &DatasetDef) -> Result<(), ValidationError> {
    let required = [
        ("dataset.source_t_in", &dataset.source_t_in),
        ("dataset.source_t_out", &dataset.source_t_out),
        ("dataset.sink_t_in", &dataset.sink_t_in),
        ("dataset.sink_t_out", &dataset.sink_t_out),
    ];
    for (field, candidates) in required {
        if candidates.iter().all(|c| c.trim().is_empty()) {
            return Err(ValidationError::InvalidValue {
                field: field.to_string(),
                value: format!("{candidates:?}"),
                reason: "required column needs at least one candidate name".to_string(),
            });
        }
    }
    Ok(())
}

fn parse_species(field: &str, name: &str) -> Result<Species, ValidationError> {
    Species::from_str(name).map_err(|_| ValidationError::UnknownFluid {
        field: field.to_string(),
        name: name.to_string(),
    })
}

fn finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, value, "must be finite"))
    }
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be positive and finite"))
    }
}

fn invalid(field: &str, value: f64, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
