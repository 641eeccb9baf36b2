//! Run execution and caching service.
//!
//! A run is identified by the configuration and the content of its dataset
//! files. Finished runs are kept in a [`RunStore`] next to the configuration
//! and reused when the same inputs come back.

use std::path::{Path, PathBuf};
use std::time::Instant;

use hp_results::{FailedRow, ResultRow, RunManifest, RunStore, RunSummary};
use hp_results::store::DESIGN_STATE_FILE;
use tracing::info;

use crate::dataset::Dataset;
use crate::error::AppResult;
use crate::model::HeatPumpModel;
use crate::progress::{ProgressCallback, RunProgressEvent, RunStage};
use crate::project_service;
use crate::runner::TimeSeriesRunner;

pub const NETWORK_FILE: &str = "network.json";

/// Where the dataset comes from.
#[derive(Debug, Clone)]
pub enum DatasetSource {
    /// Heat source table and heat sink table.
    Split { source: PathBuf, sink: PathBuf },
    /// One table with both column sets.
    Combined(PathBuf),
}

impl DatasetSource {
    pub fn load(&self, def: &hp_project::DatasetDef) -> AppResult<Dataset> {
        match self {
            DatasetSource::Split { source, sink } => Dataset::load(source, sink, def),
            DatasetSource::Combined(path) => Dataset::load_combined(path, def),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub use_cache: bool,
    /// Persisted design state to start from instead of solving one.
    pub design_state: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            design_state: None,
        }
    }
}

/// Request to execute a run.
pub struct RunRequest<'a> {
    pub config_path: &'a Path,
    pub dataset: DatasetSource,
    pub options: RunOptions,
}

/// Response from a run execution.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub run_id: String,
    pub manifest: RunManifest,
    pub run_dir: PathBuf,
    pub loaded_from_cache: bool,
    pub results: Vec<ResultRow>,
    pub failures: Vec<FailedRow>,
    pub summary: Option<RunSummary>,
}

fn emit(progress: &mut ProgressCallback<'_>, stage: RunStage, started: Instant, message: &str) {
    if let Some(cb) = progress.as_deref_mut() {
        cb(RunProgressEvent::stage(
            stage,
            started.elapsed().as_secs_f64(),
            Some(message.to_string()),
        ));
    }
}

/// Execute or load a run.
pub fn ensure_run(request: &RunRequest) -> AppResult<RunResponse> {
    ensure_run_with_progress(request, None)
}

/// Execute or load a run and stream progress events.
pub fn ensure_run_with_progress(
    request: &RunRequest,
    mut progress: ProgressCallback<'_>,
) -> AppResult<RunResponse> {
    let started = Instant::now();
    let config = project_service::load_config(request.config_path)?;

    emit(&mut progress, RunStage::LoadingDataset, started, "Loading dataset");
    let dataset = request.dataset.load(&config.dataset)?;

    let config_id = hp_results::compute_config_id(&config);
    let tool_version = env!("CARGO_PKG_VERSION");
    let run_id = hp_results::compute_run_id(
        &config_id,
        &dataset.layout_key(),
        dataset.digests(),
        tool_version,
    );
    let store = RunStore::for_config(request.config_path)?;
    let run_dir = store.run_dir(&run_id);

    if request.options.use_cache && store.has_run(&run_id) {
        info!(run_id = %run_id, "loading cached run");
        let manifest = store.load_manifest(&run_id)?;
        let results = store.load_results(&run_id)?;
        let failures = store.load_failures(&run_id)?;
        emit(&mut progress, RunStage::Completed, started, "Loaded cached run");
        return Ok(RunResponse {
            run_id,
            manifest,
            run_dir,
            loaded_from_cache: true,
            summary: RunSummary::from_rows(&results),
            results,
            failures,
        });
    }

    let datasets = dataset
        .paths()
        .iter()
        .map(|p| p.display().to_string())
        .collect();
    let manifest_base = RunManifest::new(run_id.clone(), &config, config_id, datasets);

    let model = HeatPumpModel::new(config)?;
    let mut runner = match &request.options.design_state {
        Some(path) => {
            let design = model.load_design_state(path)?;
            TimeSeriesRunner::new(model, dataset).with_design(design)
        }
        None => TimeSeriesRunner::new(model, dataset),
    };
    let mut forward = |event: RunProgressEvent| {
        if let Some(cb) = progress.as_deref_mut() {
            cb(event);
        }
    };
    runner.run_all_with_progress(Some(&mut forward))?;

    emit(&mut progress, RunStage::SavingResults, started, "Saving run output");
    let (model, design, results, failures) = runner.into_parts();
    let manifest = manifest_base.with_counts(results.len(), failures.len());
    store.save_run(&manifest, &results, &failures)?;
    if let Some(design) = &design {
        model.save_design_state(design, &run_dir.join(DESIGN_STATE_FILE))?;
    }
    model.save_network_config(&run_dir.join(NETWORK_FILE))?;
    info!(
        run_id = %run_id,
        solved = manifest.rows_solved,
        failed = manifest.rows_failed,
        "run saved"
    );
    emit(&mut progress, RunStage::Completed, started, "Run saved");

    Ok(RunResponse {
        run_id,
        manifest,
        run_dir,
        loaded_from_cache: false,
        summary: RunSummary::from_rows(&results),
        results,
        failures,
    })
}

/// Stored runs made from the configuration at `config_path`.
pub fn list_runs(config_path: &Path) -> AppResult<Vec<RunManifest>> {
    let config = project_service::load_config(config_path)?;
    let store = RunStore::for_config(config_path)?;
    Ok(store.list_runs(&hp_results::compute_config_id(&config))?)
}
