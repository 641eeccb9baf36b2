//! Time-series runner: one off-design solve per dataset row.

use std::path::Path;
use std::time::Instant;

use hp_core::units::{to_bar, to_celsius, to_kw};
use hp_results::{FailedRow, ResultRow};
use tracing::{info, warn};

use crate::dataset::{Dataset, DatasetRow};
use crate::error::{AppError, AppResult};
use crate::model::{DesignPoint, HeatPumpModel, OffDesignInputs, OffDesignOutcome};
use crate::progress::{ProgressCallback, RowProgress, RunProgressEvent, RunStage};

/// The two solves the runner needs from a cycle model.
pub trait CycleModel {
    fn solve_design(&mut self) -> AppResult<DesignPoint>;

    fn solve_offdesign(
        &mut self,
        design: &DesignPoint,
        inputs: &OffDesignInputs,
    ) -> AppResult<OffDesignOutcome>;
}

impl CycleModel for HeatPumpModel {
    fn solve_design(&mut self) -> AppResult<DesignPoint> {
        HeatPumpModel::solve_design(self)
    }

    fn solve_offdesign(
        &mut self,
        design: &DesignPoint,
        inputs: &OffDesignInputs,
    ) -> AppResult<OffDesignOutcome> {
        HeatPumpModel::solve_offdesign(self, design, inputs)
    }
}

/// Drives a cycle model through every row of a dataset.
///
/// Rows are solved in file order. A failing row is recorded and skipped; a
/// failing design solve aborts the pass.
#[derive(Debug)]
pub struct TimeSeriesRunner<M> {
    model: M,
    dataset: Dataset,
    design: Option<DesignPoint>,
    results: Vec<ResultRow>,
    failures: Vec<FailedRow>,
}

impl<M: CycleModel> TimeSeriesRunner<M> {
    pub fn new(model: M, dataset: Dataset) -> Self {
        Self {
            model,
            dataset,
            design: None,
            results: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Use an existing design point instead of solving one.
    pub fn with_design(mut self, design: DesignPoint) -> Self {
        self.design = Some(design);
        self
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn design(&self) -> Option<&DesignPoint> {
        self.design.as_ref()
    }

    pub fn results(&self) -> &[ResultRow] {
        &self.results
    }

    pub fn failures(&self) -> &[FailedRow] {
        &self.failures
    }

    pub fn into_parts(self) -> (M, Option<DesignPoint>, Vec<ResultRow>, Vec<FailedRow>) {
        (self.model, self.design, self.results, self.failures)
    }

    /// Solve every row.
    pub fn run_all(&mut self) -> AppResult<&[ResultRow]> {
        self.run_all_with_progress(None)
    }

    /// Solve every row and report progress after each one.
    pub fn run_all_with_progress(
        &mut self,
        mut progress: ProgressCallback<'_>,
    ) -> AppResult<&[ResultRow]> {
        let started = Instant::now();
        self.results.clear();
        self.failures.clear();

        let design = self.take_design(&mut progress, started)?;
        let total = self.dataset.len();
        info!(rows = total, "running off-design rows");

        let mut counts = RowProgress {
            total,
            ..RowProgress::default()
        };
        for row in self.dataset.rows() {
            match solve_row(&mut self.model, &design, row) {
                Ok(result) => {
                    self.results.push(result);
                    counts.solved += 1;
                }
                Err(err) => {
                    let failed = failed_row(row.index, err);
                    warn!(row = failed.row_index, reason = %failed.reason, "row failed");
                    self.failures.push(failed);
                    counts.failed += 1;
                }
            }
            counts.done += 1;
            emit(
                &mut progress,
                RunProgressEvent {
                    stage: RunStage::SolvingRows,
                    elapsed_wall_s: started.elapsed().as_secs_f64(),
                    message: None,
                    rows: Some(counts),
                },
            );
        }
        self.design = Some(design);

        info!(
            solved = counts.solved,
            failed = counts.failed,
            "off-design pass finished"
        );
        emit(
            &mut progress,
            RunProgressEvent {
                stage: RunStage::Completed,
                elapsed_wall_s: started.elapsed().as_secs_f64(),
                message: Some(format!(
                    "{} solved, {} failed",
                    counts.solved, counts.failed
                )),
                rows: Some(counts),
            },
        );
        Ok(&self.results)
    }

    /// Solve a single row, for debugging.
    ///
    /// The design point is solved first when the runner has none. The result
    /// tables are replaced by this row's outcome.
    pub fn run_one(&mut self, row_index: usize) -> AppResult<ResultRow> {
        let design = self.take_design(&mut None, Instant::now())?;
        let outcome = match self.dataset.row(row_index) {
            Some(row) => solve_row(&mut self.model, &design, row),
            None => Err(AppError::InvalidInput(format!(
                "row {row_index} out of range (dataset has {} rows)",
                self.dataset.len()
            ))),
        };
        self.design = Some(design);

        self.results.clear();
        self.failures.clear();
        match outcome {
            Ok(result) => {
                self.results.push(result.clone());
                Ok(result)
            }
            Err(err) => {
                let message = err.to_string();
                self.failures.push(failed_row(row_index, err));
                Err(AppError::Row {
                    row: row_index,
                    message,
                })
            }
        }
    }

    pub fn save_results(&self, path: &Path) -> AppResult<()> {
        hp_results::write_results_csv(path, &self.results)?;
        Ok(())
    }

    pub fn save_failures(&self, path: &Path) -> AppResult<()> {
        hp_results::write_failures_csv(path, &self.failures)?;
        Ok(())
    }

    /// Read a results table written by [`save_results`](Self::save_results).
    pub fn load_results(path: &Path) -> AppResult<Vec<ResultRow>> {
        Ok(hp_results::read_results_csv(path)?)
    }

    fn take_design(
        &mut self,
        progress: &mut ProgressCallback<'_>,
        started: Instant,
    ) -> AppResult<DesignPoint> {
        if let Some(design) = self.design.take() {
            return Ok(design);
        }
        emit(
            progress,
            RunProgressEvent::stage(
                RunStage::SolvingDesign,
                started.elapsed().as_secs_f64(),
                Some("Solving design point".to_string()),
            ),
        );
        self.model.solve_design()
    }
}

fn emit(progress: &mut ProgressCallback<'_>, event: RunProgressEvent) {
    if let Some(cb) = progress.as_deref_mut() {
        cb(event);
    }
}

fn failed_row(row_index: usize, err: AppError) -> FailedRow {
    let reason = match err {
        AppError::Row { message, .. } => message,
        other => other.to_string(),
    };
    FailedRow { row_index, reason }
}

fn solve_row<M: CycleModel>(
    model: &mut M,
    design: &DesignPoint,
    row: &DatasetRow,
) -> AppResult<ResultRow> {
    let inputs = row.inputs()?;
    let outcome = model
        .solve_offdesign(design, &inputs)
        .map_err(|e| AppError::Row {
            row: row.index,
            message: e.to_string(),
        })?;
    for d in &outcome.diagnostics {
        warn!(row = row.index, diagnostic = %d, "row solved with diagnostic");
    }

    let r = &outcome.results;
    Ok(ResultRow {
        row_index: row.index,
        timestamp: row.timestamp.clone(),
        t_source_in_c: to_celsius(inputs.t_source_in),
        t_source_out_c: to_celsius(inputs.t_source_out),
        p_source_bar: inputs.p_source.map(to_bar),
        flow_source_kg_s: inputs.m_source.map(|m| m.value),
        t_sink_in_c: to_celsius(inputs.t_sink_in),
        t_sink_out_c: to_celsius(inputs.t_sink_out),
        p_sink_bar: inputs.p_sink.map(to_bar),
        energy_kwh: row.energy,
        cop: r.cop,
        p_comp_kw: to_kw(r.p_comp),
        q_evap_kw: to_kw(r.q_evap),
        q_cond_kw: to_kw(r.q_cond),
        warnings: outcome.diagnostics.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CycleResults, Diagnostic};
    use hp_core::units::{kw, w};
    use hp_fluids::Species;
    use hp_solver::NetworkState;

    /// Stand-in model: COP falls with lift, fails above 95 °C sink outlet.
    #[derive(Default)]
    struct FakeModel {
        design_calls: usize,
        offdesign_calls: usize,
        fail_design: bool,
    }

    fn empty_state() -> NetworkState {
        NetworkState {
            connections: Vec::new(),
            residual_norm: 0.0,
            iterations: 0,
        }
    }

    impl CycleModel for FakeModel {
        fn solve_design(&mut self) -> AppResult<DesignPoint> {
            self.design_calls += 1;
            if self.fail_design {
                return Err(AppError::Solver("did not converge".to_string()));
            }
            Ok(DesignPoint::new("fake".into(), Species::R134a, empty_state()))
        }

        fn solve_offdesign(
            &mut self,
            _design: &DesignPoint,
            inputs: &OffDesignInputs,
        ) -> AppResult<OffDesignOutcome> {
            self.offdesign_calls += 1;
            let lift = inputs.t_sink_out.value - inputs.t_source_out.value;
            if inputs.t_sink_out.value > 368.15 {
                return Err(AppError::Solver("no convergence".to_string()));
            }
            let q_cond = inputs.q_cond.unwrap_or(kw(-1000.0));
            let cop = 300.0 / lift;
            let p = w(q_cond.value.abs() / cop);
            let diagnostics = if lift > 85.0 {
                vec![Diagnostic {
                    component: "evaporator".into(),
                    quantity: "ttd_l",
                    value: -1.0,
                }]
            } else {
                Vec::new()
            };
            Ok(OffDesignOutcome {
                results: CycleResults {
                    cop,
                    p_comp: p,
                    q_evap: w(-(q_cond.value.abs() - p.value)),
                    q_cond,
                },
                diagnostics,
                state: empty_state(),
            })
        }
    }

    fn row(t_src_out: f64, t_sink_out: f64) -> DatasetRow {
        DatasetRow {
            t_source_in: Some(40.0),
            t_source_out: Some(t_src_out),
            flow_source: Some(8.0),
            t_sink_in: Some(40.0),
            t_sink_out: Some(t_sink_out),
            energy: Some(900.0),
            ..DatasetRow::default()
        }
    }

    fn dataset() -> Dataset {
        let mut missing = row(10.0, 90.0);
        missing.t_sink_in = None;
        Dataset::from_rows(vec![
            row(10.0, 70.0),
            missing,
            row(10.0, 100.0),
            row(5.0, 95.0),
            row(15.0, 60.0),
        ])
    }

    #[test]
    fn run_all_keeps_order_and_records_failures() {
        let mut runner = TimeSeriesRunner::new(FakeModel::default(), dataset());
        let results = runner.run_all().unwrap();

        let indices: Vec<usize> = results.iter().map(|r| r.row_index).collect();
        assert_eq!(indices, [0, 3, 4]);
        assert!((results[0].cop - 5.0).abs() < 1e-9);
        assert!((results[0].q_cond_kw + 900.0).abs() < 1e-9);
        assert_eq!(results[1].warnings, 1);

        let failed: Vec<usize> = runner.failures().iter().map(|f| f.row_index).collect();
        assert_eq!(failed, [1, 2]);
        assert!(runner.failures()[0].reason.contains("sink inlet"));

        // The row with a missing value never reaches the model.
        assert_eq!(runner.model().offdesign_calls, 4);
        assert_eq!(runner.model().design_calls, 1);
    }

    #[test]
    fn design_is_solved_once_across_passes() {
        let mut runner = TimeSeriesRunner::new(FakeModel::default(), dataset());
        runner.run_all().unwrap();
        runner.run_all().unwrap();
        assert_eq!(runner.model().design_calls, 1);
        assert_eq!(runner.results().len(), 3);
    }

    #[test]
    fn supplied_design_skips_design_solve() {
        let design = DesignPoint::new("fake".into(), Species::R134a, empty_state());
        let mut runner =
            TimeSeriesRunner::new(FakeModel::default(), dataset()).with_design(design);
        runner.run_all().unwrap();
        assert_eq!(runner.model().design_calls, 0);
    }

    #[test]
    fn design_failure_aborts_the_pass() {
        let model = FakeModel {
            fail_design: true,
            ..FakeModel::default()
        };
        let mut runner = TimeSeriesRunner::new(model, dataset());
        assert!(runner.run_all().is_err());
        assert_eq!(runner.model().offdesign_calls, 0);
        assert!(runner.results().is_empty());
    }

    #[test]
    fn progress_reports_every_row() {
        let mut events = Vec::new();
        let mut runner = TimeSeriesRunner::new(FakeModel::default(), dataset());
        runner
            .run_all_with_progress(Some(&mut |e| events.push(e)))
            .unwrap();

        assert_eq!(events[0].stage, RunStage::SolvingDesign);
        let row_events: Vec<_> = events
            .iter()
            .filter(|e| e.stage == RunStage::SolvingRows)
            .collect();
        assert_eq!(row_events.len(), 5);
        let last = events.last().unwrap();
        assert_eq!(last.stage, RunStage::Completed);
        let counts = last.rows.unwrap();
        assert_eq!((counts.done, counts.solved, counts.failed), (5, 3, 2));
        assert_eq!(counts.fraction(), 1.0);
    }

    #[test]
    fn run_one_solves_a_single_row() {
        let mut runner = TimeSeriesRunner::new(FakeModel::default(), dataset());
        let result = runner.run_one(4).unwrap();
        assert_eq!(result.row_index, 4);
        assert_eq!(runner.results().len(), 1);
        assert_eq!(runner.model().design_calls, 1);

        assert!(runner.run_one(1).is_err());
        assert_eq!(runner.failures().len(), 1);
        assert!(runner.results().is_empty());
        assert!(runner.run_one(99).is_err());
    }

    #[test]
    fn empty_dataset_yields_empty_tables() {
        let mut runner = TimeSeriesRunner::new(FakeModel::default(), Dataset::default());
        assert!(runner.run_all().unwrap().is_empty());
        assert!(runner.failures().is_empty());
    }

    #[test]
    fn results_survive_save_and_load() {
        let mut runner = TimeSeriesRunner::new(FakeModel::default(), dataset());
        runner.run_all().unwrap();

        let dir = std::env::temp_dir();
        let path = dir.join("hp_app_runner_results.csv");
        runner.save_results(&path).unwrap();
        runner
            .save_failures(&dir.join("hp_app_runner_failures.csv"))
            .unwrap();

        let loaded = TimeSeriesRunner::<FakeModel>::load_results(&path).unwrap();
        assert_eq!(loaded.len(), runner.results().len());
        for (a, b) in loaded.iter().zip(runner.results()) {
            assert_eq!(a.row_index, b.row_index);
            assert!((a.cop - b.cop).abs() < 1e-9);
            assert!((a.p_comp_kw - b.p_comp_kw).abs() < 1e-9);
        }
    }
}
