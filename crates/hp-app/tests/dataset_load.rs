use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use hp_app::{AppError, Dataset, TableLayout};
use hp_project::DatasetDef;

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("{}_{}", prefix, nanos));
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}

const SOURCE: &str = "\
time,T_in[degC],T_out[degC],P[bar],flow[kg/s]
2024-01-01 00:00,40,10,1.0,7.9
2024-01-01 01:00,38,,1.0,7.5
2024-01-01 02:00,39,11,,abc
";

const SINK: &str = "\
T_in[degC],T_out[degC],Energy[kWh]
40,90,1012
41,88,
";

#[test]
fn split_tables_join_by_row() {
    let dir = unique_temp_dir("hp_app_split");
    let source = dir.join("source.csv");
    let sink = dir.join("sink.csv");
    fs::write(&source, SOURCE).unwrap();
    fs::write(&sink, SINK).unwrap();

    let dataset = Dataset::load(&source, &sink, &DatasetDef::default()).unwrap();
    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.digests().len(), 2);
    assert_eq!(dataset.columns().source.extra.as_deref(), Some("flow[kg/s]"));
    assert_eq!(dataset.columns().sink.extra.as_deref(), Some("Energy[kWh]"));

    let first = &dataset.rows()[0];
    assert_eq!(first.timestamp.as_deref(), Some("2024-01-01 00:00"));
    assert_eq!(first.t_source_in, Some(40.0));
    assert_eq!(first.p_source, Some(1.0));
    assert_eq!(first.flow_source, Some(7.9));
    assert_eq!(first.energy, Some(1012.0));
    assert!(first.inputs().is_ok());

    let second = &dataset.rows()[1];
    assert_eq!(second.t_source_out, None);
    assert_eq!(second.energy, None);
    assert!(matches!(second.inputs(), Err(AppError::Row { row: 1, .. })));

    let third = &dataset.rows()[2];
    assert_eq!(third.p_source, None);
    assert_eq!(third.problems.len(), 2, "{:?}", third.problems);
    assert!(third.inputs().is_err());
}

#[test]
fn missing_required_column_fails_the_load() {
    let dir = unique_temp_dir("hp_app_missing_col");
    let source = dir.join("source.csv");
    let sink = dir.join("sink.csv");
    fs::write(&source, SOURCE).unwrap();
    fs::write(&sink, "T_in[degC],Energy[kWh]\n40,1000\n").unwrap();

    let err = Dataset::load(&source, &sink, &DatasetDef::default()).unwrap_err();
    match err {
        AppError::MissingColumn { candidates, .. } => {
            assert!(candidates.iter().any(|c| c.starts_with("T_out")));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn combined_table_splits_by_side_prefix() {
    let dir = unique_temp_dir("hp_app_combined");
    let path = dir.join("hours.csv");
    fs::write(
        &path,
        "timestamp,source T_in[degC],source T_out[degC],sink T_in[degC],sink T_out[degC],\
         sink Energy[kWh],source flow[kg/s]\n\
         h0,40,10,40,90,1000,7.9\n\
         h1,35,8,42,85,,7.0\n",
    )
    .unwrap();

    let dataset = Dataset::load_combined(&path, &DatasetDef::default()).unwrap();
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.columns().source.t_in, "source T_in[degC]");
    assert_eq!(dataset.columns().sink.t_in, "sink T_in[degC]");

    let row = &dataset.rows()[1];
    assert_eq!(row.timestamp.as_deref(), Some("h1"));
    assert_eq!(row.t_source_in, Some(35.0));
    assert_eq!(row.t_sink_in, Some(42.0));
    assert_eq!(row.t_sink_out, Some(85.0));
    assert_eq!(row.flow_source, Some(7.0));
    assert_eq!(row.energy, None);
}

#[test]
fn custom_candidates_are_honoured() {
    let dir = unique_temp_dir("hp_app_custom_cols");
    let source = dir.join("source.csv");
    let sink = dir.join("sink.csv");
    fs::write(&source, "Tvl,Trl,mdot\n40,10,8\n").unwrap();
    fs::write(&sink, "T_in[degC],T_out[degC]\n40,90\n").unwrap();

    let def = DatasetDef {
        source_t_in: vec!["Tvl".to_string()],
        source_t_out: vec!["Trl".to_string()],
        source_flow: vec!["mdot".to_string()],
        ..DatasetDef::default()
    };
    let dataset = Dataset::load(&source, &sink, &def).unwrap();
    assert_eq!(dataset.rows()[0].flow_source, Some(8.0));
    assert_eq!(dataset.rows()[0].t_source_out, Some(10.0));
}

#[test]
fn source_without_flow_column_fails_the_load() {
    let dir = unique_temp_dir("hp_app_no_flow");
    let source = dir.join("source.csv");
    let sink = dir.join("sink.csv");
    fs::write(&source, "T_in[degC],T_out[degC]\n40,10\n").unwrap();
    fs::write(&sink, SINK).unwrap();

    let err = Dataset::load(&source, &sink, &DatasetDef::default()).unwrap_err();
    match err {
        AppError::MissingColumn { table, candidates, .. } => {
            assert!(table.contains("source"), "{table}");
            assert!(candidates.iter().any(|c| c == "flow[kg/s]"));
        }
        other => panic!("unexpected error {other:?}"),
    }

    let combined = dir.join("hours.csv");
    fs::write(
        &combined,
        "source T_in[degC],source T_out[degC],sink T_in[degC],sink T_out[degC],sink flow[kg/s]\n\
         40,10,40,90,5\n",
    )
    .unwrap();
    let err = Dataset::load_combined(&combined, &DatasetDef::default()).unwrap_err();
    assert!(matches!(err, AppError::MissingColumn { .. }), "{err:?}");
}

#[test]
fn sink_energy_column_is_optional() {
    let dir = unique_temp_dir("hp_app_no_energy");
    let source = dir.join("source.csv");
    let sink = dir.join("sink.csv");
    fs::write(&source, SOURCE).unwrap();
    fs::write(&sink, "T_in[degC],T_out[degC]\n40,90\n").unwrap();

    let dataset = Dataset::load(&source, &sink, &DatasetDef::default()).unwrap();
    assert_eq!(dataset.columns().sink.extra, None);
    let inputs = dataset.rows()[0].inputs().unwrap();
    assert!(inputs.q_cond.is_none());
    assert!(inputs.m_source.is_some());
}

#[test]
fn layout_key_tracks_mode_and_columns() {
    let dir = unique_temp_dir("hp_app_layout_key");
    let source = dir.join("source.csv");
    let sink = dir.join("sink.csv");
    fs::write(
        &source,
        "T_in[degC],T_in_2[degC],T_out[degC],flow[kg/s]\n40,35,10,7.9\n",
    )
    .unwrap();
    fs::write(&sink, SINK).unwrap();

    let default = Dataset::load(&source, &sink, &DatasetDef::default()).unwrap();
    assert_eq!(default.layout(), TableLayout::Split);
    assert!(default.layout_key().contains("\"split\""));

    let def = DatasetDef {
        source_t_in: vec!["T_in_2[degC]".to_string()],
        ..DatasetDef::default()
    };
    let remapped = Dataset::load(&source, &sink, &def).unwrap();
    assert_eq!(remapped.rows()[0].t_source_in, Some(35.0));
    assert_eq!(default.digests(), remapped.digests());
    assert_ne!(default.layout_key(), remapped.layout_key());

    let again = Dataset::load(&source, &sink, &DatasetDef::default()).unwrap();
    assert_eq!(default.layout_key(), again.layout_key());
}
