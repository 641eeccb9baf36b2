//! Configuration schema definitions.
//!
//! Values are stored in the units an operator types: bar, °C, kW. Conversion to
//! SI happens where the model is built.

use serde::{Deserialize, Serialize};

pub const CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeatPumpConfig {
    pub version: u32,
    #[serde(default = "default_name")]
    pub name: String,
    /// Working fluid key, e.g. `R134a`, `R290`, `R717`.
    #[serde(default = "default_working_fluid")]
    pub working_fluid: String,
    #[serde(default)]
    pub design: DesignDef,
    #[serde(default)]
    pub solver: SolverDef,
    #[serde(default)]
    pub dataset: DatasetDef,
}

impl Default for HeatPumpConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            name: default_name(),
            working_fluid: default_working_fluid(),
            design: DesignDef::default(),
            solver: SolverDef::default(),
            dataset: DatasetDef::default(),
        }
    }
}

fn default_name() -> String {
    "heat pump".to_string()
}

fn default_working_fluid() -> String {
    "R134a".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DesignDef {
    pub compressor: CompressorDef,
    pub condenser: ExchangerDef,
    pub evaporator: ExchangerDef,
    pub compressor_outlet: CompressorOutletDef,
    pub source: WaterLoopDef,
    pub sink: WaterLoopDef,
}

impl Default for DesignDef {
    fn default() -> Self {
        Self {
            compressor: CompressorDef::default(),
            condenser: ExchangerDef {
                q_kw: -1012.0,
                pr1: 1.0,
                pr2: 1.0,
            },
            evaporator: ExchangerDef {
                q_kw: -1000.0,
                pr1: 1.0,
                pr2: 1.0,
            },
            compressor_outlet: CompressorOutletDef::default(),
            source: WaterLoopDef {
                fluid: "water".to_string(),
                p_bar: 1.0,
                t_in_c: 40.0,
                t_out_c: 10.0,
            },
            sink: WaterLoopDef {
                fluid: "water".to_string(),
                p_bar: 4.0,
                t_in_c: 40.0,
                t_out_c: 90.0,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompressorDef {
    pub eta_s: f64,
}

impl Default for CompressorDef {
    fn default() -> Self {
        Self { eta_s: 0.85 }
    }
}

/// Heat exchanger duty and pressure ratios.
///
/// Side 1 is the hot side, side 2 the cold side. A negative duty means heat
/// leaves the hot side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExchangerDef {
    pub q_kw: f64,
    #[serde(default = "unit_ratio")]
    pub pr1: f64,
    #[serde(default = "unit_ratio")]
    pub pr2: f64,
}

fn unit_ratio() -> f64 {
    1.0
}

/// Compressor discharge specification.
///
/// The discharge pressure is either given directly or derived from the
/// working fluid's saturation pressure at `t_sat_c`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompressorOutletDef {
    pub t_c: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p_bar: Option<f64>,
    #[serde(default = "default_t_sat_c")]
    pub t_sat_c: f64,
}

impl Default for CompressorOutletDef {
    fn default() -> Self {
        Self {
            t_c: 170.0,
            p_bar: None,
            t_sat_c: default_t_sat_c(),
        }
    }
}

fn default_t_sat_c() -> f64 {
    95.0
}

/// Secondary loop boundary: inlet state and outlet temperature.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WaterLoopDef {
    #[serde(default = "default_loop_fluid")]
    pub fluid: String,
    pub p_bar: f64,
    pub t_in_c: f64,
    pub t_out_c: f64,
}

fn default_loop_fluid() -> String {
    "water".to_string()
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum JacobianDef {
    #[default]
    Forward,
    Central,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SolverDef {
    pub max_iterations: usize,
    pub abs_tol: f64,
    pub rel_tol: f64,
    pub line_search_beta: f64,
    pub max_line_search_iters: usize,
    pub jacobian_epsilon: f64,
    pub jacobian: JacobianDef,
}

impl Default for SolverDef {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            abs_tol: 1e-6,
            rel_tol: 1e-10,
            line_search_beta: 0.5,
            max_line_search_iters: 30,
            jacobian_epsilon: 1e-6,
            jacobian: JacobianDef::Forward,
        }
    }
}

/// Candidate column names for the dataset tables.
///
/// Each list is tried in order: exact matches first, then a case-insensitive
/// substring match with brackets stripped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatasetDef {
    pub source_t_in: Vec<String>,
    pub source_t_out: Vec<String>,
    pub source_p: Vec<String>,
    pub source_flow: Vec<String>,
    pub timestamp: Vec<String>,
    pub sink_t_in: Vec<String>,
    pub sink_t_out: Vec<String>,
    pub sink_p: Vec<String>,
    pub sink_energy: Vec<String>,
}

fn names(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for DatasetDef {
    fn default() -> Self {
        Self {
            source_t_in: names(&["T_in[degC", "T_in[degC]"]),
            source_t_out: names(&["T_out[degC", "T_out[degC]"]),
            source_p: names(&["P[bar]"]),
            source_flow: names(&["flow[kg/s]", "flow"]),
            timestamp: names(&["timestamp", "time"]),
            sink_t_in: names(&["T_in[degC", "T_in[degC]"]),
            sink_t_out: names(&["T_out[degC", "T_out[degC]"]),
            sink_p: names(&["P[bar]"]),
            sink_energy: names(&["Energy[kWh]", "Energy"]),
        }
    }
}
