//! Hourly operating data for the heat source and the heat sink.
//!
//! The data comes either as two CSV tables joined by row index, or as one
//! table whose headers name the side (`source T_in[degC]`, `sink T_in[degC]`).

use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use hp_core::units::{bar, celsius, hourly_energy_to_power, kgps, kwh};
use hp_project::DatasetDef;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};
use crate::model::OffDesignInputs;

/// Find a column among `candidates`.
///
/// Exact names are tried first, in candidate order. Otherwise the first
/// header (in header order) that contains a candidate, compared without
/// surrounding brackets and ignoring case.
pub fn find_col<S: AsRef<str>>(headers: &[S], candidates: &[String]) -> Option<usize> {
    for cand in candidates {
        if let Some(i) = headers.iter().position(|h| h.as_ref() == cand) {
            return Some(i);
        }
    }

    let cleaned: Vec<String> = candidates
        .iter()
        .map(|c| c.trim_matches(|ch| ch == '[' || ch == ']').to_lowercase())
        .filter(|c| !c.is_empty())
        .collect();
    headers.iter().position(|h| {
        let lower = h.as_ref().to_lowercase();
        cleaned.iter().any(|c| lower.contains(c.as_str()))
    })
}

/// One hour of measurements. Temperatures in °C, pressures in bar, flow in
/// kg/s, energy in kWh.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DatasetRow {
    pub index: usize,
    pub timestamp: Option<String>,
    pub t_source_in: Option<f64>,
    pub t_source_out: Option<f64>,
    pub p_source: Option<f64>,
    pub flow_source: Option<f64>,
    pub t_sink_in: Option<f64>,
    pub t_sink_out: Option<f64>,
    pub p_sink: Option<f64>,
    pub energy: Option<f64>,
    /// Cells that could not be read.
    pub problems: Vec<String>,
}

impl DatasetRow {
    /// Boundary values for the off-design solve of this row.
    ///
    /// The evaporator duty is released and the source flow fixed in its
    /// place; an hourly energy becomes the condenser duty `-kWh × 1000` W.
    pub fn inputs(&self) -> AppResult<OffDesignInputs> {
        if !self.problems.is_empty() {
            return Err(AppError::Row {
                row: self.index,
                message: self.problems.join("; "),
            });
        }
        let required = |value: Option<f64>, what: &str| {
            value.ok_or_else(|| AppError::Row {
                row: self.index,
                message: format!("missing value for {what}"),
            })
        };

        Ok(OffDesignInputs {
            t_source_in: celsius(required(self.t_source_in, "source inlet temperature")?),
            t_source_out: celsius(required(self.t_source_out, "source outlet temperature")?),
            p_source: self.p_source.map(bar),
            m_source: Some(kgps(required(self.flow_source, "source mass flow")?)),
            t_sink_in: celsius(required(self.t_sink_in, "sink inlet temperature")?),
            t_sink_out: celsius(required(self.t_sink_out, "sink outlet temperature")?),
            p_sink: self.p_sink.map(bar),
            q_cond: self.energy.map(|e| -hourly_energy_to_power(kwh(e))),
            q_evap: None,
        })
    }
}

/// Detected columns of one table side.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SideColumns {
    pub t_in: String,
    pub t_out: String,
    pub p: Option<String>,
    /// Source: mass flow. Sink: hourly energy.
    pub extra: Option<String>,
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ColumnMap {
    pub source: SideColumns,
    pub sink: SideColumns,
}

/// How the tables were laid out on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TableLayout {
    #[default]
    Memory,
    Split,
    Combined,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    rows: Vec<DatasetRow>,
    layout: TableLayout,
    columns: ColumnMap,
    paths: Vec<PathBuf>,
    digests: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Source,
    Sink,
}

impl Side {
    fn name(self) -> &'static str {
        match self {
            Side::Source => "source",
            Side::Sink => "sink",
        }
    }
}

struct Table {
    name: String,
    headers: Vec<String>,
    records: Vec<StringRecord>,
    digest: String,
}

impl Table {
    fn read(path: &Path) -> AppResult<Self> {
        let content = std::fs::read(path).map_err(|e| AppError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(content.as_slice());
        let headers = reader.headers()?.iter().map(str::to_string).collect();
        let records = reader.records().collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name: path.display().to_string(),
            headers,
            records,
            digest: hp_results::digest_bytes(&content),
        })
    }
}

/// Column indices of one side within a table.
struct SideIndices {
    t_in: usize,
    t_out: usize,
    p: Option<usize>,
    extra: Option<usize>,
    timestamp: Option<usize>,
}

impl SideIndices {
    fn columns(&self, headers: &[String]) -> SideColumns {
        let name = |i: usize| headers[i].clone();
        SideColumns {
            t_in: name(self.t_in),
            t_out: name(self.t_out),
            p: self.p.map(name),
            extra: self.extra.map(name),
            timestamp: self.timestamp.map(name),
        }
    }
}

/// Detect one side's columns among the headers allowed by `scope`.
fn detect(
    table: &Table,
    side: Side,
    def: &DatasetDef,
    scope: impl Fn(&str) -> bool,
) -> AppResult<SideIndices> {
    let allowed: Vec<usize> = (0..table.headers.len())
        .filter(|&i| scope(&table.headers[i]))
        .collect();
    let names: Vec<&str> = allowed.iter().map(|&i| table.headers[i].as_str()).collect();
    let find = |candidates: &[String]| find_col(&names, candidates).map(|i| allowed[i]);
    let require = |candidates: &[String]| {
        find(candidates).ok_or_else(|| AppError::MissingColumn {
            table: format!("{} ({})", table.name, side.name()),
            candidates: candidates.to_vec(),
            columns: table.headers.clone(),
        })
    };

    let (t_in, t_out, p, extra) = match side {
        Side::Source => (
            &def.source_t_in,
            &def.source_t_out,
            &def.source_p,
            &def.source_flow,
        ),
        Side::Sink => (&def.sink_t_in, &def.sink_t_out, &def.sink_p, &def.sink_energy),
    };
    let t_in = require(t_in)?;
    let t_out = require(t_out)?;
    // Off-design fixes the source flow in place of the evaporator duty, so a
    // source table without it cannot solve any row. Sink energy is optional.
    let extra = match side {
        Side::Source => Some(require(extra)?),
        Side::Sink => find(extra),
    };
    let indices = SideIndices {
        t_in,
        t_out,
        p: find(p),
        extra,
        timestamp: find_col(&table.headers, &def.timestamp),
    };
    if indices.t_in == indices.t_out {
        return Err(AppError::Dataset(format!(
            "{}: inlet and outlet temperature resolve to the same column '{}'",
            table.name, table.headers[indices.t_in]
        )));
    }
    Ok(indices)
}

/// Read an optional numeric cell. Blank and non-finite cells are missing.
fn cell(
    record: &StringRecord,
    idx: Option<usize>,
    what: &str,
    problems: &mut Vec<String>,
) -> Option<f64> {
    let raw = record.get(idx?)?.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        Ok(_) => None,
        Err(_) => {
            problems.push(format!("cannot read {what} from '{raw}'"));
            None
        }
    }
}

fn fill_side(
    row: &mut DatasetRow,
    record: &StringRecord,
    cols: &SideIndices,
    side: Side,
) {
    let problems = &mut row.problems;
    let t_in = cell(record, Some(cols.t_in), "inlet temperature", problems);
    let t_out = cell(record, Some(cols.t_out), "outlet temperature", problems);
    let p = cell(record, cols.p, "pressure", problems);
    match side {
        Side::Source => {
            row.flow_source = cell(record, cols.extra, "mass flow", problems);
            row.t_source_in = t_in;
            row.t_source_out = t_out;
            row.p_source = p;
        }
        Side::Sink => {
            row.energy = cell(record, cols.extra, "energy", problems);
            row.t_sink_in = t_in;
            row.t_sink_out = t_out;
            row.p_sink = p;
        }
    }
    if row.timestamp.is_none() {
        row.timestamp = cols
            .timestamp
            .and_then(|i| record.get(i))
            .filter(|s| !s.is_empty())
            .map(str::to_string);
    }
}

impl Dataset {
    /// Load a heat source table and a heat sink table.
    ///
    /// Rows are joined by position; the source table sets the row count.
    pub fn load(source: &Path, sink: &Path, def: &DatasetDef) -> AppResult<Self> {
        let source_table = Table::read(source)?;
        let sink_table = Table::read(sink)?;
        let src = detect(&source_table, Side::Source, def, |_| true)?;
        let snk = detect(&sink_table, Side::Sink, def, |_| true)?;

        if sink_table.records.len() != source_table.records.len() {
            warn!(
                source_rows = source_table.records.len(),
                sink_rows = sink_table.records.len(),
                "source and sink tables differ in length"
            );
        }

        let rows = source_table
            .records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let mut row = DatasetRow {
                    index,
                    ..DatasetRow::default()
                };
                fill_side(&mut row, record, &src, Side::Source);
                match sink_table.records.get(index) {
                    Some(sink_record) => fill_side(&mut row, sink_record, &snk, Side::Sink),
                    None => row.problems.push(format!("sink table has no row {index}")),
                }
                row
            })
            .collect();

        let columns = ColumnMap {
            source: src.columns(&source_table.headers),
            sink: snk.columns(&sink_table.headers),
        };
        debug!(?columns, "dataset columns detected");
        Ok(Self {
            rows,
            layout: TableLayout::Split,
            columns,
            paths: vec![source.to_path_buf(), sink.to_path_buf()],
            digests: vec![source_table.digest, sink_table.digest],
        })
    }

    /// Load one table holding both sides; each header names its side.
    pub fn load_combined(path: &Path, def: &DatasetDef) -> AppResult<Self> {
        let table = Table::read(path)?;
        let has = |word: &'static str| move |h: &str| h.to_lowercase().contains(word);
        let src = detect(&table, Side::Source, def, has("source"))?;
        let snk = detect(&table, Side::Sink, def, has("sink"))?;

        let rows = table
            .records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let mut row = DatasetRow {
                    index,
                    ..DatasetRow::default()
                };
                fill_side(&mut row, record, &src, Side::Source);
                fill_side(&mut row, record, &snk, Side::Sink);
                row
            })
            .collect();

        let columns = ColumnMap {
            source: src.columns(&table.headers),
            sink: snk.columns(&table.headers),
        };
        debug!(?columns, "dataset columns detected");
        Ok(Self {
            rows,
            layout: TableLayout::Combined,
            columns,
            paths: vec![path.to_path_buf()],
            digests: vec![table.digest],
        })
    }

    /// Dataset built in memory; row indices are renumbered in order.
    pub fn from_rows(rows: Vec<DatasetRow>) -> Self {
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| DatasetRow { index, ..row })
            .collect();
        Self {
            rows,
            ..Self::default()
        }
    }

    pub fn rows(&self) -> &[DatasetRow] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&DatasetRow> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> &ColumnMap {
        &self.columns
    }

    pub fn layout(&self) -> TableLayout {
        self.layout
    }

    /// Layout and resolved columns as one string. Two loads of the same
    /// files read the same values exactly when their keys match.
    pub fn layout_key(&self) -> String {
        serde_json::to_string(&(self.layout, &self.columns)).unwrap_or_default()
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Content digests of the files the dataset was read from.
    pub fn digests(&self) -> &[String] {
        &self.digests
    }
}
