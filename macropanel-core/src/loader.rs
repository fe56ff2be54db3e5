//! Series loading — one raw two-column CSV file into a `RawSeries`.
//!
//! Column selection is positional: the first column is the date, the second
//! is the value, anything further is ignored. Header names are not trusted;
//! a mismatch is reported as a warning instead of silently renamed away.
//!
//! Parse policy per row:
//! - unparseable date → the row is dropped (a record without a date anchors
//!   nothing)
//! - unparseable or blank value → the row is kept with the missing marker

use crate::series::{Observation, RawSeries};
use chrono::NaiveDate;
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    /// Fewer than two columns — the source cannot carry a (date, value) pair.
    #[error("'{id}': malformed source: {columns} column(s), need at least 2")]
    MalformedSource { id: String, columns: usize },

    #[error("'{id}': read failed: {source}")]
    Io {
        id: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{id}': csv error: {source}")]
    Csv {
        id: String,
        #[source]
        source: csv::Error,
    },
}

impl LoadError {
    /// The identifier of the series the failure belongs to.
    pub fn series_id(&self) -> &str {
        match self {
            LoadError::MalformedSource { id, .. }
            | LoadError::Io { id, .. }
            | LoadError::Csv { id, .. } => id,
        }
    }
}

/// Row-level accounting for one loaded file.
#[derive(Debug, Clone, Serialize)]
pub struct LoadOutcome {
    pub id: String,
    pub rows_read: usize,
    /// Rows that survived date parsing (before duplicate-date resolution).
    pub rows_used: usize,
    /// Rows dropped because the date failed to parse.
    pub dropped_dates: usize,
    /// Rows kept with the missing marker in place of a value.
    pub blank_values: usize,
    /// Set when the header does not look like the expected date/value pair.
    pub header_warning: Option<String>,
}

/// Series identifier for a source file: the file stem, sans extension.
pub fn series_id_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Load one series file from disk.
pub fn load_series(path: &Path) -> Result<(RawSeries, LoadOutcome), LoadError> {
    let id = series_id_from_path(path);
    let file = File::open(path).map_err(|e| LoadError::Io {
        id: id.clone(),
        source: e,
    })?;
    load_series_from_reader(&id, file)
}

/// Parse a two-column series from any reader.
pub fn load_series_from_reader<R: Read>(
    id: &str,
    reader: R,
) -> Result<(RawSeries, LoadOutcome), LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| LoadError::Csv {
            id: id.to_string(),
            source: e,
        })?
        .clone();

    if headers.len() < 2 {
        return Err(LoadError::MalformedSource {
            id: id.to_string(),
            columns: headers.len(),
        });
    }

    let header_warning = check_header(id, &headers);

    let mut observations = Vec::new();
    let mut rows_read = 0;
    let mut dropped_dates = 0;
    let mut blank_values = 0;

    for record in csv_reader.records() {
        let record = record.map_err(|e| LoadError::Csv {
            id: id.to_string(),
            source: e,
        })?;
        rows_read += 1;

        let Some(date) = record.get(0).and_then(parse_date) else {
            dropped_dates += 1;
            continue;
        };
        let value = record.get(1).and_then(parse_value);
        if value.is_none() {
            blank_values += 1;
        }
        observations.push(Observation { date, value });
    }

    let rows_used = rows_read - dropped_dates;
    let series = RawSeries::from_observations(id, observations);
    let outcome = LoadOutcome {
        id: id.to_string(),
        rows_read,
        rows_used,
        dropped_dates,
        blank_values,
        header_warning,
    };
    Ok((series, outcome))
}

fn check_header(id: &str, headers: &csv::StringRecord) -> Option<String> {
    let first = headers.get(0).unwrap_or("");
    let second = headers.get(1).unwrap_or("");

    let date_like =
        first.eq_ignore_ascii_case("date") || first.eq_ignore_ascii_case("observation_date");
    if !date_like {
        return Some(format!("first column is '{first}', expected a date column"));
    }
    if !second.eq_ignore_ascii_case(id) {
        return Some(format!("value column is '{second}', used as '{id}'"));
    }
    None
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if raw.is_empty() {
        return None;
    }
    // Re-saved files sometimes carry a midnight timestamp suffix.
    let raw = raw.split_whitespace().next().unwrap_or(raw);
    const FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

fn parse_value(raw: &str) -> Option<f64> {
    // FRED publishes missing observations as a bare dot.
    if raw.is_empty() || raw == "." {
        return None;
    }
    raw.parse::<f64>().ok()
}
