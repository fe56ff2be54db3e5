//! Series source trait and structured fetch errors.
//!
//! The `SeriesSource` trait abstracts over where raw series files come from
//! (the FRED CSV endpoint in production, in-memory stubs in tests) so the
//! download orchestration can be exercised without a network.

use thiserror::Error;

/// Structured error types for fetch operations.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("series not found: {id}")]
    SeriesNotFound { id: String },

    #[error("server returned HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("fetch error: {0}")]
    Other(String),
}

/// A remote source of raw series files.
pub trait SeriesSource: Send + Sync {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// Fetch the raw CSV body for one series identifier.
    fn fetch(&self, series_id: &str) -> Result<String, FetchError>;
}

/// Progress callback for multi-series operations.
pub trait DownloadProgress: Send {
    /// Called when starting to fetch a series.
    fn on_start(&self, series_id: &str, index: usize, total: usize);

    /// Called when a series fetch completes.
    fn on_complete(&self, series_id: &str, index: usize, total: usize, result: Result<(), &str>);

    /// Called when the entire batch is done.
    fn on_batch_complete(&self, succeeded: usize, failed: usize, skipped: usize, total: usize);
}

/// Simple progress reporter that prints to stdout.
pub struct StdoutProgress;

impl DownloadProgress for StdoutProgress {
    fn on_start(&self, series_id: &str, index: usize, total: usize) {
        println!("[{}/{}] Fetching {series_id}...", index + 1, total);
    }

    fn on_complete(&self, series_id: &str, _index: usize, _total: usize, result: Result<(), &str>) {
        match result {
            Ok(()) => println!("  OK: {series_id}"),
            Err(e) => println!("  FAIL: {series_id}: {e}"),
        }
    }

    fn on_batch_complete(&self, succeeded: usize, failed: usize, skipped: usize, total: usize) {
        println!(
            "\nDownload complete: {succeeded}/{total} succeeded, {failed} failed, {skipped} already present"
        );
    }
}
