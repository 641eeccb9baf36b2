//! End-to-end runs through the run service, with caching.

use std::fs;
use std::path::PathBuf;

use hp_app::{DatasetSource, RunOptions, RunProgressEvent, RunRequest, RunStage};
use hp_project::HeatPumpConfig;

fn setup(name: &str) -> (PathBuf, DatasetSource) {
    let dir = std::env::temp_dir().join(name);
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();

    let config_path = dir.join("heatpump.yaml");
    hp_app::save_config(&config_path, &HeatPumpConfig::default()).unwrap();

    let source = dir.join("source.csv");
    fs::write(
        &source,
        "timestamp,T_in[degC],T_out[degC],flow[kg/s]\n\
         2024-01-01 00:00,40,10,7.9\n\
         2024-01-01 01:00,40,10,\n\
         2024-01-01 02:00,40,,7.9\n",
    )
    .unwrap();
    let sink = dir.join("sink.csv");
    fs::write(
        &sink,
        "T_in[degC],T_out[degC],Energy[kWh]\n40,90,1012\n40,90,1012\n40,90,1012\n",
    )
    .unwrap();

    (config_path, DatasetSource::Split { source, sink })
}

#[test]
fn run_solves_rows_saves_and_reuses_cache() {
    let (config_path, dataset) = setup("hp_app_run_service_cache");
    let request = RunRequest {
        config_path: &config_path,
        dataset,
        options: RunOptions::default(),
    };

    let mut stages = Vec::new();
    let mut on_event = |event: RunProgressEvent| stages.push(event.stage);
    let first = hp_app::ensure_run_with_progress(&request, Some(&mut on_event)).unwrap();

    assert!(!first.loaded_from_cache);
    assert_eq!(first.results.len(), 1);
    assert_eq!(first.failures.len(), 2);
    assert_eq!(first.results[0].row_index, 0);
    assert_eq!(
        first.results[0].timestamp.as_deref(),
        Some("2024-01-01 00:00")
    );
    assert!(first.results[0].cop > 1.0);
    assert_eq!(first.failures[0].row_index, 1);
    assert_eq!(first.failures[1].row_index, 2);
    assert_eq!(first.manifest.rows_total, 3);
    assert!(first.summary.is_some());

    assert!(first.run_dir.join("manifest.json").exists());
    assert!(first.run_dir.join("results.csv").exists());
    assert!(first.run_dir.join("design_state.json").exists());
    assert!(first.run_dir.join("network.json").exists());

    assert_eq!(stages.first(), Some(&RunStage::LoadingDataset));
    assert!(stages.contains(&RunStage::SolvingDesign));
    assert_eq!(stages.last(), Some(&RunStage::Completed));

    let second = hp_app::ensure_run(&request).unwrap();
    assert!(second.loaded_from_cache);
    assert_eq!(second.run_id, first.run_id);
    assert_eq!(second.results.len(), 1);
    assert_eq!(second.failures.len(), 2);
    assert!((second.results[0].cop - first.results[0].cop).abs() < 1e-9);

    let runs = hp_app::list_runs(&config_path).unwrap();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].run_id, first.run_id);
}

#[test]
fn changed_dataset_gets_new_run_id() {
    let (config_path, dataset) = setup("hp_app_run_service_digest");
    let request = RunRequest {
        config_path: &config_path,
        dataset: dataset.clone(),
        options: RunOptions::default(),
    };
    let first = hp_app::ensure_run(&request).unwrap();

    if let DatasetSource::Split { sink, .. } = &dataset {
        fs::write(sink, "T_in[degC],T_out[degC],Energy[kWh]\n40,90,1000\n").unwrap();
    }
    let second = hp_app::ensure_run(&request).unwrap();
    assert_ne!(first.run_id, second.run_id);
    assert!(!second.loaded_from_cache);
    // Rows past the end of the sink table fail.
    assert!(second.failures.iter().any(|f| f.row_index == 2));
}

#[test]
fn remapped_columns_get_new_run_id() {
    let (config_path, dataset) = setup("hp_app_run_service_columns");
    if let DatasetSource::Split { source, .. } = &dataset {
        fs::write(
            source,
            "T_in[degC],T_in_2[degC],T_out[degC],flow[kg/s]\n40,35,10,7.9\n40,35,10,7.9\n",
        )
        .unwrap();
    }
    let request = RunRequest {
        config_path: &config_path,
        dataset,
        options: RunOptions::default(),
    };
    let first = hp_app::ensure_run(&request).unwrap();

    let mut config = HeatPumpConfig::default();
    config.dataset.source_t_in = vec!["T_in_2[degC]".to_string()];
    hp_app::save_config(&config_path, &config).unwrap();

    let second = hp_app::ensure_run(&request).unwrap();
    assert!(!second.loaded_from_cache);
    assert_ne!(first.run_id, second.run_id);
    assert_eq!(first.manifest.config_id, second.manifest.config_id);
    for row in &second.results {
        assert_eq!(row.t_source_in_c, 35.0);
    }
    assert_eq!(second.results.len() + second.failures.len(), 2);
}

#[test]
fn missing_config_is_reported() {
    let dir = std::env::temp_dir().join("hp_app_run_service_missing");
    let request = RunRequest {
        config_path: &dir.join("absent.yaml"),
        dataset: DatasetSource::Combined(dir.join("absent.csv")),
        options: RunOptions::default(),
    };
    assert!(matches!(
        hp_app::ensure_run(&request),
        Err(hp_app::AppError::FileRead { .. })
    ));
}
