//! The pipeline run — scan, load, align, resample, curate, persist.
//!
//! Files load in parallel (each is independent and read-only); everything
//! from alignment onward is a sequential fold over the single panel. A
//! failing file is reported and skipped, never fatal; only zero loadable
//! series or an output write failure aborts the run.

use crate::config::{ConfigError, PipelineConfig};
use crate::persist::{self, PersistError};
use macropanel_core::{build_panel, curate, resample, LoadOutcome};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("scan of raw directory failed: {0}")]
    Scan(std::io::Error),

    #[error("no series could be loaded from '{dir}'")]
    EmptyInput { dir: PathBuf },

    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// A raw file the run had to leave out.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    pub id: String,
    pub reason: String,
}

/// Everything a run did, for reporting and the `report.json` manifest.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub loaded: Vec<LoadOutcome>,
    pub skipped: Vec<SkippedFile>,
    pub aligned_rows: usize,
    pub aligned_cols: usize,
    pub resampled_rows: usize,
    pub final_rows: usize,
    pub final_cols: usize,
    /// BLAKE3 hash of the rendered panel bytes; identical inputs reproduce
    /// identical output, so re-runs hash the same.
    pub panel_hash: String,
    pub output_path: PathBuf,
}

/// Execute the full pipeline for one config.
pub fn run(config: &PipelineConfig) -> Result<RunReport, PipelineError> {
    config.validate()?;

    let files = scan_raw_dir(&config.raw_dir)?;

    let results: Vec<_> = files
        .par_iter()
        .map(|path| macropanel_core::load_series(path))
        .collect();

    let mut series = Vec::new();
    let mut loaded = Vec::new();
    let mut skipped = Vec::new();
    for result in results {
        match result {
            Ok((s, outcome)) => {
                series.push(s);
                loaded.push(outcome);
            }
            Err(e) => skipped.push(SkippedFile {
                id: e.series_id().to_string(),
                reason: e.to_string(),
            }),
        }
    }

    if series.is_empty() {
        return Err(PipelineError::EmptyInput {
            dir: config.raw_dir.clone(),
        });
    }

    let aligned = build_panel(&series);
    let aligned_rows = aligned.n_rows();
    let aligned_cols = aligned.n_cols();

    let resampled = resample(&aligned, config.frequency);
    let resampled_rows = resampled.n_rows();

    let curated = curate(resampled, &config.curate_options());

    let csv_text = persist::render_panel_csv(&curated, &config.rules)?;
    let panel_hash = blake3::hash(csv_text.as_bytes()).to_hex().to_string();

    let output_path = config.output_path();
    persist::write_atomic(&output_path, &csv_text)?;

    let report = RunReport {
        loaded,
        skipped,
        aligned_rows,
        aligned_cols,
        resampled_rows,
        final_rows: curated.n_rows(),
        final_cols: curated.n_cols(),
        panel_hash,
        output_path,
    };

    let report_json = serde_json::to_string_pretty(&report).map_err(PersistError::Json)?;
    persist::write_atomic(&config.report_path(), &report_json)?;

    Ok(report)
}

/// All `.csv` files in the raw directory, sorted by file name so runs are
/// reproducible regardless of directory iteration order.
///
/// A missing directory scans as empty: the run then fails with `EmptyInput`
/// rather than an I/O error, since "no downloads ever happened" and "no file
/// survived loading" are the same condition to the caller.
fn scan_raw_dir(raw_dir: &Path) -> Result<Vec<PathBuf>, PipelineError> {
    if !raw_dir.exists() {
        return Ok(Vec::new());
    }
    let entries = std::fs::read_dir(raw_dir).map_err(PipelineError::Scan)?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(PipelineError::Scan)?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some("csv") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_raw(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(name), body).unwrap();
    }

    fn test_config(root: &Path) -> PipelineConfig {
        PipelineConfig {
            raw_dir: root.join("raw"),
            clean_dir: root.join("clean"),
            start_cutoff: chrono::NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            ..PipelineConfig::default()
        }
    }

    fn setup(root: &Path) -> PipelineConfig {
        let config = test_config(root);
        fs::create_dir_all(&config.raw_dir).unwrap();
        config
    }

    #[test]
    fn two_series_build_the_expected_monthly_panel() {
        let dir = tempfile::tempdir().unwrap();
        let config = setup(dir.path());
        write_raw(&config.raw_dir, "A.csv", "date,A\n2020-01-05,1.0\n2020-02-10,2.0\n");
        write_raw(&config.raw_dir, "B.csv", "date,B\n2020-01-15,10.0\n");

        let report = run(&config).unwrap();

        assert_eq!(report.loaded.len(), 2);
        assert!(report.skipped.is_empty());
        assert_eq!(report.aligned_rows, 3);
        assert_eq!(report.aligned_cols, 2);
        assert_eq!(report.resampled_rows, 2);
        assert_eq!(report.final_rows, 2);

        // B has no February observation; the macro forward fill carries
        // January's value over.
        let csv = fs::read_to_string(&report.output_path).unwrap();
        assert_eq!(csv, "date,A,B\n2020-01-31,1,10\n2020-02-29,2,10\n");
    }

    #[test]
    fn malformed_file_is_skipped_while_the_batch_continues() {
        let dir = tempfile::tempdir().unwrap();
        let config = setup(dir.path());
        write_raw(&config.raw_dir, "A.csv", "date,A\n2020-01-05,1.0\n");
        write_raw(&config.raw_dir, "BROKEN.csv", "date\n2020-01-05\n");

        let report = run(&config).unwrap();

        assert_eq!(report.loaded.len(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].id, "BROKEN");
        assert!(report.skipped[0].reason.contains("malformed source"));

        let csv = fs::read_to_string(&report.output_path).unwrap();
        assert!(csv.starts_with("date,A\n"));
        assert!(!csv.contains("BROKEN"));
    }

    #[test]
    fn zero_loadable_series_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = setup(dir.path());
        write_raw(&config.raw_dir, "BROKEN.csv", "date\n2020-01-05\n");

        let err = run(&config).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyInput { .. }));
    }

    #[test]
    fn empty_raw_directory_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = setup(dir.path());

        let err = run(&config).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyInput { .. }));
    }

    #[test]
    fn missing_raw_directory_is_empty_input_not_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());

        let err = run(&config).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyInput { .. }));
    }

    #[test]
    fn rerunning_reproduces_the_output_byte_for_byte() {
        let dir = tempfile::tempdir().unwrap();
        let config = setup(dir.path());
        write_raw(&config.raw_dir, "A.csv", "date,A\n2020-01-05,1.0\n2020-02-10,2.0\n");
        write_raw(&config.raw_dir, "USREC.csv", "date,USREC\n2020-01-05,1\n");

        let first = run(&config).unwrap();
        let first_bytes = fs::read(&first.output_path).unwrap();

        let second = run(&config).unwrap();
        let second_bytes = fs::read(&second.output_path).unwrap();

        assert_eq!(first_bytes, second_bytes);
        assert_eq!(first.panel_hash, second.panel_hash);
    }

    #[test]
    fn report_manifest_is_written_beside_the_panel() {
        let dir = tempfile::tempdir().unwrap();
        let config = setup(dir.path());
        write_raw(&config.raw_dir, "A.csv", "date,A\n2020-01-05,1.0\n");

        let report = run(&config).unwrap();

        let manifest = fs::read_to_string(config.report_path()).unwrap();
        assert!(manifest.contains("panel_hash"));
        assert!(manifest.contains(&report.panel_hash));
    }

    #[test]
    fn non_csv_files_are_ignored_by_the_scan() {
        let dir = tempfile::tempdir().unwrap();
        let config = setup(dir.path());
        write_raw(&config.raw_dir, "A.csv", "date,A\n2020-01-05,1.0\n");
        write_raw(&config.raw_dir, "notes.txt", "not a series\n");

        let report = run(&config).unwrap();
        assert_eq!(report.loaded.len(), 1);
        assert!(report.skipped.is_empty());
    }
}
