//! Macropanel CLI — download and build commands.
//!
//! Commands:
//! - `download` — fetch raw series CSVs from the public FRED endpoint
//! - `build` — align, resample, and curate the raw files into one panel
//! - `catalog` — list the built-in series catalog

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use macropanel_core::{download_series, Catalog, FredCsvEndpoint, StdoutProgress};
use macropanel_pipeline::{run, PipelineConfig, RunReport};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "macropanel",
    about = "Macropanel CLI — FRED macro series to one monthly panel"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download raw series CSVs from the public FRED endpoint.
    Download {
        /// Series identifiers to fetch. Defaults to the full built-in catalog.
        series: Vec<String>,

        /// Directory raw files are written into.
        #[arg(long, default_value = "raw")]
        raw_dir: PathBuf,

        /// Re-download series whose raw file already exists.
        #[arg(long, default_value_t = false)]
        force: bool,

        /// Pause between requests, in milliseconds.
        #[arg(long, default_value_t = 500)]
        pause_ms: u64,
    },
    /// Build the curated monthly panel from the raw directory.
    Build {
        /// Path to a TOML config file. Flags below override its values.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory of raw per-series CSV files.
        #[arg(long)]
        raw_dir: Option<PathBuf>,

        /// Directory the curated panel is written into.
        #[arg(long)]
        clean_dir: Option<PathBuf>,

        /// Start-date cutoff (YYYY-MM-DD); earlier rows are dropped.
        #[arg(long)]
        cutoff: Option<String>,

        /// Sparse-column threshold in (0, 1].
        #[arg(long)]
        threshold: Option<f64>,
    },
    /// List the built-in series catalog.
    Catalog,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Download {
            series,
            raw_dir,
            force,
            pause_ms,
        } => run_download(series, raw_dir, force, pause_ms),
        Commands::Build {
            config,
            raw_dir,
            clean_dir,
            cutoff,
            threshold,
        } => run_build(config, raw_dir, clean_dir, cutoff, threshold),
        Commands::Catalog => run_catalog(),
    }
}

fn run_download(series: Vec<String>, raw_dir: PathBuf, force: bool, pause_ms: u64) -> Result<()> {
    let catalog = Catalog::default_fred();
    let ids: Vec<&str> = if series.is_empty() {
        catalog.all_ids()
    } else {
        series.iter().map(|s| s.as_str()).collect()
    };

    let source = FredCsvEndpoint::new();
    let summary = download_series(
        &source,
        &raw_dir,
        &ids,
        force,
        Duration::from_millis(pause_ms),
        &StdoutProgress,
    )?;

    if !summary.all_succeeded() {
        for (id, err) in &summary.errors {
            eprintln!("Error for {id}: {err}");
        }
        std::process::exit(1);
    }

    Ok(())
}

fn run_build(
    config_path: Option<PathBuf>,
    raw_dir: Option<PathBuf>,
    clean_dir: Option<PathBuf>,
    cutoff: Option<String>,
    threshold: Option<f64>,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => PipelineConfig::from_file(&path)?,
        None => PipelineConfig::default(),
    };

    if let Some(dir) = raw_dir {
        config.raw_dir = dir;
    }
    if let Some(dir) = clean_dir {
        config.clean_dir = dir;
    }
    if let Some(cutoff) = cutoff {
        config.start_cutoff = NaiveDate::parse_from_str(&cutoff, "%Y-%m-%d")?;
    }
    if let Some(threshold) = threshold {
        config.sparse_threshold = threshold;
    }

    let report = run(&config)?;
    print_report(&report);
    Ok(())
}

fn run_catalog() -> Result<()> {
    let catalog = Catalog::default_fred();
    for group in catalog.group_names() {
        println!("{group}:");
        if let Some(entries) = catalog.group_entries(group) {
            for entry in entries {
                println!("  {:<14} {}", entry.id, entry.description);
            }
        }
        println!();
    }
    println!("{} series total", catalog.series_count());
    Ok(())
}

fn print_report(report: &RunReport) {
    println!();
    println!("=== Panel Build ===");
    println!("Loaded {} series:", report.loaded.len());
    for outcome in &report.loaded {
        let mut notes = Vec::new();
        if outcome.dropped_dates > 0 {
            notes.push(format!("{} unparseable dates dropped", outcome.dropped_dates));
        }
        if outcome.blank_values > 0 {
            notes.push(format!("{} blank values", outcome.blank_values));
        }
        let notes = if notes.is_empty() {
            String::new()
        } else {
            format!(" ({})", notes.join(", "))
        };
        println!("  {}: {} rows{notes}", outcome.id, outcome.rows_used);
        if let Some(warning) = &outcome.header_warning {
            println!("  WARNING: {}: {warning}", outcome.id);
        }
    }

    if !report.skipped.is_empty() {
        println!("Skipped {} file(s):", report.skipped.len());
        for skipped in &report.skipped {
            println!("  {}: {}", skipped.id, skipped.reason);
        }
    }

    println!();
    println!(
        "Aligned:   {} rows x {} columns",
        report.aligned_rows, report.aligned_cols
    );
    println!("Resampled: {} rows", report.resampled_rows);
    println!(
        "Final:     {} rows x {} columns",
        report.final_rows, report.final_cols
    );
    println!("Hash:      {}", report.panel_hash);
    println!("Saved curated panel to: {}", report.output_path.display());
}
