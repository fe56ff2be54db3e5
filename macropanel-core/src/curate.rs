//! Panel curation — cutoff, sparse-column pruning, class-specific fill.
//!
//! Every step treats missing data as a value, never as an error; only the
//! surrounding pipeline can fail, and only before a well-formed panel exists.

use crate::classify::{ClassRules, ColumnClass};
use crate::panel::Panel;
use chrono::NaiveDate;

/// Knobs for the curation pass.
#[derive(Debug, Clone)]
pub struct CurateOptions {
    /// Rows strictly before this date are dropped.
    pub start_cutoff: NaiveDate,
    /// Columns whose missing-fraction over the post-cutoff range reaches this
    /// threshold are dropped.
    pub sparse_threshold: f64,
    pub rules: ClassRules,
}

impl Default for CurateOptions {
    fn default() -> Self {
        Self {
            // Earliest date considered reliable across the default catalog.
            start_cutoff: NaiveDate::from_ymd_opt(1954, 1, 31).unwrap(),
            sparse_threshold: 0.95,
            rules: ClassRules::default(),
        }
    }
}

/// Apply the four curation steps in order: start-date cutoff, sparse-column
/// pruning, class-split forward fill, recession normalization; then drop rows
/// with no informative values left.
///
/// The cutoff runs strictly before pruning — missing-fractions are always
/// computed over the post-cutoff range.
pub fn curate(panel: Panel, opts: &CurateOptions) -> Panel {
    let mut panel = drop_rows_before(panel, opts.start_cutoff);
    prune_sparse_columns(&mut panel, opts.sparse_threshold);
    forward_fill_class(&mut panel, &opts.rules, ColumnClass::YieldCurve);
    forward_fill_class(&mut panel, &opts.rules, ColumnClass::Macro);
    normalize_recession(&mut panel, &opts.rules);
    drop_all_missing_rows(panel)
}

fn drop_rows_before(panel: Panel, cutoff: NaiveDate) -> Panel {
    let keep: Vec<bool> = panel.dates.iter().map(|d| *d >= cutoff).collect();
    filter_rows(panel, &keep)
}

fn prune_sparse_columns(panel: &mut Panel, threshold: f64) {
    let n_rows = panel.dates.len();
    panel.values.retain(|_, col| {
        let missing = col.iter().filter(|v| v.is_none()).count();
        // A column with no rows counts as fully missing.
        let fraction = if n_rows == 0 {
            1.0
        } else {
            missing as f64 / n_rows as f64
        };
        fraction < threshold
    });
}

fn forward_fill_class(panel: &mut Panel, rules: &ClassRules, class: ColumnClass) {
    for (id, col) in panel.values.iter_mut() {
        if rules.classify(id) != class {
            continue;
        }
        let mut last_seen = None;
        for value in col.iter_mut() {
            match *value {
                Some(v) => last_seen = Some(v),
                None => *value = last_seen,
            }
        }
    }
}

/// Missing recession flags mean "not in recession"; surviving values are
/// truncated to whole numbers so the column is integer-valued end to end.
fn normalize_recession(panel: &mut Panel, rules: &ClassRules) {
    for (id, col) in panel.values.iter_mut() {
        if rules.classify(id) != ColumnClass::RecessionIndicator {
            continue;
        }
        for value in col.iter_mut() {
            *value = Some(value.map_or(0.0, f64::trunc));
        }
    }
}

fn drop_all_missing_rows(panel: Panel) -> Panel {
    let keep: Vec<bool> = (0..panel.dates.len())
        .map(|row| panel.values.values().any(|col| col[row].is_some()))
        .collect();
    filter_rows(panel, &keep)
}

fn filter_rows(panel: Panel, keep: &[bool]) -> Panel {
    let dates = panel
        .dates
        .into_iter()
        .zip(keep)
        .filter_map(|(d, k)| k.then_some(d))
        .collect();
    let values = panel
        .values
        .into_iter()
        .map(|(id, col)| {
            let filtered = col
                .into_iter()
                .zip(keep)
                .filter_map(|(v, k)| k.then_some(v))
                .collect();
            (id, filtered)
        })
        .collect();
    Panel::new(dates, values)
}
