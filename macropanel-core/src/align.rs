//! Date alignment — merge raw series into one panel via outer joins.
//!
//! Each merge joins on exact date equality and keeps the union of both date
//! axes, so the result is independent of merge order. The whole alignment is
//! a pure fold over the input series; no panel is mutated in place.

use crate::panel::Panel;
use crate::series::RawSeries;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Outer-join one series into a panel, producing a new panel.
///
/// The new date axis is the union of the panel's axis and the series' dates.
/// Existing columns carry the missing marker on dates they did not cover;
/// the new column carries it on dates only other series cover. Merging a
/// series with no observations is a no-op, and merging a series whose
/// identifier is already a column replaces that column.
pub fn merge(panel: &Panel, series: &RawSeries) -> Panel {
    if series.is_empty() {
        return panel.clone();
    }

    let mut axis: BTreeSet<NaiveDate> = panel.dates.iter().copied().collect();
    axis.extend(series.observations.iter().map(|obs| obs.date));
    let dates: Vec<NaiveDate> = axis.into_iter().collect();

    let index: HashMap<NaiveDate, usize> =
        dates.iter().enumerate().map(|(i, d)| (*d, i)).collect();

    let mut values: BTreeMap<String, Vec<Option<f64>>> = BTreeMap::new();
    for (id, col) in &panel.values {
        let mut remapped = vec![None; dates.len()];
        for (row, date) in panel.dates.iter().enumerate() {
            remapped[index[date]] = col[row];
        }
        values.insert(id.clone(), remapped);
    }

    let mut new_col = vec![None; dates.len()];
    for obs in &series.observations {
        new_col[index[&obs.date]] = obs.value;
    }
    values.insert(series.id.clone(), new_col);

    Panel::new(dates, values)
}

/// Fold a collection of series into one aligned panel.
///
/// Zero series produce an empty panel.
pub fn build_panel<'a>(series: impl IntoIterator<Item = &'a RawSeries>) -> Panel {
    series
        .into_iter()
        .fold(Panel::empty(), |panel, s| merge(&panel, s))
}
