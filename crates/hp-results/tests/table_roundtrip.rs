use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use hp_results::{
    FailedRow, ResultRow, read_failures_csv, read_results_csv, write_failures_csv,
    write_results_csv,
};

fn unique_temp_path(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    std::env::temp_dir().join(format!("{}_{}", nanos, name))
}

fn sample_rows() -> Vec<ResultRow> {
    vec![
        ResultRow {
            row_index: 0,
            timestamp: Some("2024-01-01 00:00".to_string()),
            t_source_in_c: 40.0,
            t_source_out_c: 10.0,
            p_source_bar: Some(1.0),
            flow_source_kg_s: Some(7.9),
            t_sink_in_c: 40.0,
            t_sink_out_c: 90.0,
            p_sink_bar: None,
            energy_kwh: Some(950.5),
            cop: 3.125_678_9,
            p_comp_kw: 304.1,
            q_evap_kw: -646.4,
            q_cond_kw: -950.5,
            warnings: 0,
        },
        ResultRow {
            row_index: 2,
            timestamp: None,
            t_source_in_c: 38.5,
            t_source_out_c: 12.25,
            p_source_bar: None,
            flow_source_kg_s: Some(7.5),
            t_sink_in_c: 41.0,
            t_sink_out_c: 88.0,
            p_sink_bar: Some(4.0),
            energy_kwh: None,
            cop: 83.9,
            p_comp_kw: 12.06,
            q_evap_kw: -1000.0,
            q_cond_kw: -1012.0,
            warnings: 2,
        },
    ]
}

#[test]
fn results_survive_save_and_load() {
    let path = unique_temp_path("results.csv");
    let rows = sample_rows();

    write_results_csv(&path, &rows).unwrap();
    let loaded = read_results_csv(&path).unwrap();

    assert_eq!(loaded.len(), rows.len());
    for (a, b) in rows.iter().zip(&loaded) {
        assert_eq!(a.row_index, b.row_index);
        assert_eq!(a.timestamp, b.timestamp);
        assert_eq!(a.p_sink_bar, b.p_sink_bar);
        assert_eq!(a.energy_kwh, b.energy_kwh);
        assert!((a.cop - b.cop).abs() < 1e-9);
        assert!((a.q_cond_kw - b.q_cond_kw).abs() < 1e-9);
        assert_eq!(a.warnings, b.warnings);
    }
}

#[test]
fn header_lists_columns_in_order() {
    let path = unique_temp_path("header.csv");
    write_results_csv(&path, &sample_rows()).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    let header = text.lines().next().unwrap();
    assert_eq!(
        header,
        "row_index,timestamp,t_source_in_c,t_source_out_c,p_source_bar,flow_source_kg_s,\
         t_sink_in_c,t_sink_out_c,p_sink_bar,energy_kwh,cop,p_comp_kw,q_evap_kw,q_cond_kw,warnings"
    );
}

#[test]
fn empty_table_keeps_header() {
    let path = unique_temp_path("empty.csv");
    write_results_csv(&path, &[]).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("row_index,timestamp"));
    assert!(read_results_csv(&path).unwrap().is_empty());
}

#[test]
fn failures_roundtrip_with_commas_in_reason() {
    let path = unique_temp_path("failures.csv");
    let rows = vec![
        FailedRow {
            row_index: 1,
            reason: "missing value for T_in[degC], sink table".to_string(),
        },
        FailedRow {
            row_index: 5,
            reason: "Newton did not converge".to_string(),
        },
    ];
    write_failures_csv(&path, &rows).unwrap();
    assert_eq!(read_failures_csv(&path).unwrap(), rows);
}
