//! Result data types.

use serde::{Deserialize, Serialize};

pub type RunId = String;

/// One solved dataset row.
///
/// Inputs are kept in the dataset's units (°C, bar, kg/s, kWh); outputs are
/// in kW. Field order is the column order of the results table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultRow {
    pub row_index: usize,
    pub timestamp: Option<String>,
    pub t_source_in_c: f64,
    pub t_source_out_c: f64,
    pub p_source_bar: Option<f64>,
    pub flow_source_kg_s: Option<f64>,
    pub t_sink_in_c: f64,
    pub t_sink_out_c: f64,
    pub p_sink_bar: Option<f64>,
    pub energy_kwh: Option<f64>,
    pub cop: f64,
    pub p_comp_kw: f64,
    pub q_evap_kw: f64,
    pub q_cond_kw: f64,
    /// Number of diagnostic warnings raised by the solve.
    pub warnings: usize,
}

/// A dataset row that produced no result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FailedRow {
    pub row_index: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunManifest {
    pub run_id: RunId,
    pub config_id: String,
    pub config_name: String,
    pub working_fluid: String,
    pub timestamp: String,
    #[serde(default)]
    pub datasets: Vec<String>,
    pub rows_total: usize,
    pub rows_solved: usize,
    pub rows_failed: usize,
    pub tool_version: String,
}

impl RunManifest {
    pub fn new(
        run_id: RunId,
        config: &hp_project::HeatPumpConfig,
        config_id: String,
        datasets: Vec<String>,
    ) -> Self {
        Self {
            run_id,
            config_id,
            config_name: config.name.clone(),
            working_fluid: config.working_fluid.clone(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            datasets,
            rows_total: 0,
            rows_solved: 0,
            rows_failed: 0,
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn with_counts(mut self, solved: usize, failed: usize) -> Self {
        self.rows_solved = solved;
        self.rows_failed = failed;
        self.rows_total = solved + failed;
        self
    }
}

/// Aggregate figures over a result table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub rows: usize,
    pub mean_cop: f64,
    pub min_cop: f64,
    pub max_cop: f64,
    /// Sum of condenser duty over all rows, kWh for hourly rows.
    pub heat_delivered_kwh: f64,
    /// Sum of compressor power over all rows, kWh for hourly rows.
    pub electricity_kwh: f64,
    pub rows_with_warnings: usize,
}

impl RunSummary {
    /// Returns `None` for an empty table.
    pub fn from_rows(rows: &[ResultRow]) -> Option<Self> {
        if rows.is_empty() {
            return None;
        }
        let mut min_cop = f64::INFINITY;
        let mut max_cop = f64::NEG_INFINITY;
        let mut sum_cop = 0.0;
        let mut heat = 0.0;
        let mut electricity = 0.0;
        let mut warned = 0;
        for row in rows {
            min_cop = min_cop.min(row.cop);
            max_cop = max_cop.max(row.cop);
            sum_cop += row.cop;
            heat += row.q_cond_kw.abs();
            electricity += row.p_comp_kw;
            if row.warnings > 0 {
                warned += 1;
            }
        }
        Some(Self {
            rows: rows.len(),
            mean_cop: sum_cop / rows.len() as f64,
            min_cop,
            max_cop,
            heat_delivered_kwh: heat,
            electricity_kwh: electricity,
            rows_with_warnings: warned,
        })
    }

    /// Seasonal performance: delivered heat over consumed electricity.
    pub fn seasonal_cop(&self) -> Option<f64> {
        (self.electricity_kwh > 0.0).then(|| self.heat_delivered_kwh / self.electricity_kwh)
    }
}
