//! Macropanel Core — series loading, date alignment, resampling, curation.
//!
//! This crate contains the heart of the panel builder:
//! - Raw series types with a best-effort CSV parse policy
//! - Outer-join date alignment across any number of series
//! - Last-observation-of-period calendar resampling
//! - Curation: start-date cutoff, sparse-column pruning, class-specific fill
//! - FRED download support behind a swappable source trait

pub mod align;
pub mod catalog;
pub mod classify;
pub mod curate;
pub mod download;
pub mod fred;
pub mod loader;
pub mod panel;
pub mod provider;
pub mod resample;
pub mod series;

pub use align::{build_panel, merge};
pub use catalog::{Catalog, SeriesEntry};
pub use classify::{ClassRules, ColumnClass};
pub use curate::{curate, CurateOptions};
pub use download::{download_series, DownloadError, DownloadSummary};
pub use fred::FredCsvEndpoint;
pub use loader::{load_series, load_series_from_reader, LoadError, LoadOutcome};
pub use panel::Panel;
pub use provider::{DownloadProgress, FetchError, SeriesSource, StdoutProgress};
pub use resample::{resample, Frequency};
pub use series::{Observation, RawSeries};
