//! Panel export — the curated panel as a durable CSV file.
//!
//! Layout: a `date` header column (ISO-8601, one row per period end) followed
//! by one column per surviving series in lexicographic order. Missing values
//! render as empty fields; the recession indicator renders as integers. The
//! same panel always renders to the same bytes.

use macropanel_core::{ClassRules, ColumnClass, Panel};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to flush CSV writer: {0}")]
    Flush(String),

    #[error("CSV output is not valid UTF-8")]
    Utf8,

    #[error("serialize report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Render the panel as CSV text.
pub fn render_panel_csv(panel: &Panel, rules: &ClassRules) -> Result<String, PersistError> {
    let mut writer = csv::Writer::from_writer(vec![]);

    let columns: Vec<(&str, &[Option<f64>], ColumnClass)> = panel
        .columns()
        .filter_map(|id| panel.column(id).map(|col| (id, col, rules.classify(id))))
        .collect();

    let mut header = vec!["date"];
    header.extend(columns.iter().map(|(id, _, _)| *id));
    writer.write_record(&header)?;

    for (row, date) in panel.dates().iter().enumerate() {
        let mut record = Vec::with_capacity(columns.len() + 1);
        record.push(date.format("%Y-%m-%d").to_string());
        for (_, col, class) in &columns {
            record.push(match col[row] {
                None => String::new(),
                Some(v) => format_value(v, *class),
            });
        }
        writer.write_record(&record)?;
    }

    let data = writer
        .into_inner()
        .map_err(|e| PersistError::Flush(e.to_string()))?;
    String::from_utf8(data).map_err(|_| PersistError::Utf8)
}

fn format_value(value: f64, class: ColumnClass) -> String {
    match class {
        ColumnClass::RecessionIndicator => format!("{}", value as i64),
        ColumnClass::YieldCurve | ColumnClass::Macro => format!("{value}"),
    }
}

/// Write file contents through a temp file plus rename, so readers never see
/// a partially written panel.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), PersistError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        PersistError::Io(e)
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use macropanel_core::{build_panel, curate, resample, CurateOptions, Frequency, Observation, RawSeries};

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn series(id: &str, points: &[(&str, Option<f64>)]) -> RawSeries {
        RawSeries::from_observations(
            id,
            points.iter().map(|(date, value)| Observation {
                date: d(date),
                value: *value,
            }),
        )
    }

    #[test]
    fn renders_date_then_columns_in_lexicographic_order() {
        let b = series("UNRATE", &[("2020-01-31", Some(3.5))]);
        let a = series("DGS10", &[("2020-01-31", Some(1.88))]);
        let panel = build_panel([&b, &a]);

        let csv = render_panel_csv(&panel, &ClassRules::default()).unwrap();

        assert_eq!(csv, "date,DGS10,UNRATE\n2020-01-31,1.88,3.5\n");
    }

    #[test]
    fn missing_values_render_as_empty_fields() {
        let a = series("DGS10", &[("2020-01-31", Some(1.88)), ("2020-02-29", None)]);
        let panel = build_panel([&a]);

        let csv = render_panel_csv(&panel, &ClassRules::default()).unwrap();

        assert_eq!(csv, "date,DGS10\n2020-01-31,1.88\n2020-02-29,\n");
    }

    #[test]
    fn recession_indicator_renders_as_integers() {
        let rec = series("USREC", &[("2020-01-31", Some(1.0)), ("2020-03-31", None)]);
        let anchor = series("UNRATE", &[("2020-02-29", Some(3.5))]);
        let panel = build_panel([&rec, &anchor]);
        let monthly = resample(&panel, Frequency::MonthEnd);
        let curated = curate(
            monthly,
            &CurateOptions {
                start_cutoff: d("2020-01-01"),
                ..CurateOptions::default()
            },
        );

        let csv = render_panel_csv(&curated, &ClassRules::default()).unwrap();

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "date,UNRATE,USREC");
        assert_eq!(lines[1], "2020-01-31,,1");
        assert_eq!(lines[2], "2020-02-29,3.5,0");
        assert_eq!(lines[3], "2020-03-31,3.5,0");
    }

    #[test]
    fn rendering_is_deterministic() {
        let a = series("DGS10", &[("2020-01-31", Some(1.88))]);
        let b = series("UNRATE", &[("2020-02-29", Some(3.5))]);

        let once = render_panel_csv(&build_panel([&a, &b]), &ClassRules::default()).unwrap();
        let twice = render_panel_csv(&build_panel([&b, &a]), &ClassRules::default()).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn empty_panel_renders_just_the_date_header() {
        let csv = render_panel_csv(&Panel::empty(), &ClassRules::default()).unwrap();
        assert_eq!(csv, "date\n");
    }

    #[test]
    fn atomic_write_replaces_existing_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("master.csv");

        write_atomic(&path, "first\n").unwrap();
        write_atomic(&path, "second\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second\n");
        assert!(!path.with_extension("tmp").exists());
    }
}
