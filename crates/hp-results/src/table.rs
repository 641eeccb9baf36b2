//! CSV tables for results and failed rows.

use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::ResultsResult;
use crate::types::{FailedRow, ResultRow};

pub fn write_results_csv(path: &Path, rows: &[ResultRow]) -> ResultsResult<()> {
    write_rows(path, rows, &RESULT_HEADER)
}

pub fn read_results_csv(path: &Path) -> ResultsResult<Vec<ResultRow>> {
    read_rows(path)
}

pub fn write_failures_csv(path: &Path, rows: &[FailedRow]) -> ResultsResult<()> {
    write_rows(path, rows, &["row_index", "reason"])
}

pub fn read_failures_csv(path: &Path) -> ResultsResult<Vec<FailedRow>> {
    read_rows(path)
}

const RESULT_HEADER: [&str; 15] = [
    "row_index",
    "timestamp",
    "t_source_in_c",
    "t_source_out_c",
    "p_source_bar",
    "flow_source_kg_s",
    "t_sink_in_c",
    "t_sink_out_c",
    "p_sink_bar",
    "energy_kwh",
    "cop",
    "p_comp_kw",
    "q_evap_kw",
    "q_cond_kw",
    "warnings",
];

// The header is written explicitly so an empty table still carries its columns.
fn write_rows<T: Serialize>(path: &Path, rows: &[T], header: &[&str]) -> ResultsResult<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(header)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> ResultsResult<Vec<T>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for record in reader.deserialize() {
        out.push(record?);
    }
    Ok(out)
}
