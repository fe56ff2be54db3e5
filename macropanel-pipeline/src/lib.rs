//! Macropanel Pipeline — configuration, batch loading, and export.
//!
//! This crate builds on `macropanel-core` to provide:
//! - A serializable per-run configuration (TOML) with validated defaults
//! - The end-to-end run: scan → parallel load → align → resample → curate
//! - CSV export with a deterministic byte layout and a JSON run manifest

pub mod config;
pub mod persist;
pub mod pipeline;

pub use config::{ConfigError, PipelineConfig};
pub use persist::{render_panel_csv, write_atomic, PersistError};
pub use pipeline::{run, PipelineError, RunReport, SkippedFile};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn config_is_send_sync() {
        assert_send::<PipelineConfig>();
        assert_sync::<PipelineConfig>();
    }

    #[test]
    fn report_is_send_sync() {
        assert_send::<RunReport>();
        assert_sync::<RunReport>();
    }
}
