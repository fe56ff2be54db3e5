//! Batch download — fetch each series and persist its raw CSV file.
//!
//! One failure never aborts the batch; every outcome is collected in the
//! summary. Files already present are skipped unless forced, and writes go
//! through a temp file plus rename so a crash never leaves a partial CSV
//! for the loader to trip over.

use crate::provider::{DownloadProgress, FetchError, SeriesSource};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("write failed: {0}")]
    Write(#[from] std::io::Error),
}

/// Summary of a batch download operation.
#[derive(Debug)]
pub struct DownloadSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Series skipped because the raw file already exists.
    pub skipped: usize,
    pub errors: Vec<(String, DownloadError)>,
}

impl DownloadSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

/// Raw file path for a series identifier.
pub fn raw_path(raw_dir: &Path, series_id: &str) -> PathBuf {
    raw_dir.join(format!("{series_id}.csv"))
}

/// Download a batch of series into `raw_dir`, pausing between requests.
///
/// Returns an error only when the raw directory itself cannot be created;
/// per-series fetch and write failures land in the summary instead.
pub fn download_series(
    source: &dyn SeriesSource,
    raw_dir: &Path,
    series_ids: &[&str],
    force: bool,
    pause: Duration,
    progress: &dyn DownloadProgress,
) -> Result<DownloadSummary, std::io::Error> {
    fs::create_dir_all(raw_dir)?;

    let total = series_ids.len();
    let mut succeeded = 0;
    let mut failed = 0;
    let mut skipped = 0;
    let mut errors: Vec<(String, DownloadError)> = Vec::new();

    for (i, series_id) in series_ids.iter().enumerate() {
        let dest = raw_path(raw_dir, series_id);
        if !force && dest.exists() {
            progress.on_start(series_id, i, total);
            progress.on_complete(series_id, i, total, Ok(()));
            skipped += 1;
            continue;
        }

        progress.on_start(series_id, i, total);
        match download_single(source, series_id, &dest) {
            Ok(()) => {
                progress.on_complete(series_id, i, total, Ok(()));
                succeeded += 1;
            }
            Err(e) => {
                let reason = e.to_string();
                progress.on_complete(series_id, i, total, Err(&reason));
                errors.push((series_id.to_string(), e));
                failed += 1;
            }
        }

        // Be polite to the endpoint between real requests.
        if i + 1 < total && !pause.is_zero() {
            std::thread::sleep(pause);
        }
    }

    progress.on_batch_complete(succeeded, failed, skipped, total);

    Ok(DownloadSummary {
        total,
        succeeded,
        failed,
        skipped,
        errors,
    })
}

fn download_single(
    source: &dyn SeriesSource,
    series_id: &str,
    dest: &Path,
) -> Result<(), DownloadError> {
    let body = source.fetch(series_id)?;

    let tmp = dest.with_extension("csv.tmp");
    fs::write(&tmp, &body)?;
    fs::rename(&tmp, dest).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        DownloadError::Write(e)
    })?;
    Ok(())
}
