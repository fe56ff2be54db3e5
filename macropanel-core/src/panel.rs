//! The wide panel — one row per date, one column per series.

use chrono::NaiveDate;
use std::collections::BTreeMap;

/// A date-indexed wide table with `Option<f64>` as the missing marker.
///
/// Invariants:
/// - `dates` is sorted ascending with no duplicates
/// - every column vector has the same length as `dates`
/// - columns are keyed by series identifier; iteration order is lexicographic,
///   which makes panel equality independent of merge order
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub(crate) dates: Vec<NaiveDate>,
    pub(crate) values: BTreeMap<String, Vec<Option<f64>>>,
}

impl Panel {
    /// Panel with no rows and no columns.
    pub fn empty() -> Self {
        Self {
            dates: Vec::new(),
            values: BTreeMap::new(),
        }
    }

    pub(crate) fn new(dates: Vec<NaiveDate>, values: BTreeMap<String, Vec<Option<f64>>>) -> Self {
        debug_assert!(dates.windows(2).all(|w| w[0] < w[1]));
        debug_assert!(values.values().all(|col| col.len() == dates.len()));
        Self { dates, values }
    }

    /// The date axis, sorted ascending.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Column identifiers in lexicographic order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|s| s.as_str())
    }

    /// Values for one column, aligned to `dates()`.
    pub fn column(&self, id: &str) -> Option<&[Option<f64>]> {
        self.values.get(id).map(|v| v.as_slice())
    }

    pub fn n_rows(&self) -> usize {
        self.dates.len()
    }

    pub fn n_cols(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() && self.values.is_empty()
    }

    /// The value for a (date, column) cell. Outer `None` means the date or
    /// column is absent from the panel; inner `None` is the missing marker.
    pub fn value(&self, date: NaiveDate, id: &str) -> Option<Option<f64>> {
        let row = self.dates.binary_search(&date).ok()?;
        self.values.get(id).map(|col| col[row])
    }

    /// Fraction of missing cells in one column. A panel with no rows counts
    /// as fully missing.
    pub fn missing_fraction(&self, id: &str) -> Option<f64> {
        let col = self.values.get(id)?;
        if col.is_empty() {
            return Some(1.0);
        }
        let missing = col.iter().filter(|v| v.is_none()).count();
        Some(missing as f64 / col.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample() -> Panel {
        let mut values = BTreeMap::new();
        values.insert("UNRATE".to_string(), vec![Some(3.5), None, Some(3.8)]);
        values.insert("DGS10".to_string(), vec![None, None, Some(1.5)]);
        Panel::new(vec![d("2020-01-31"), d("2020-02-29"), d("2020-03-31")], values)
    }

    #[test]
    fn columns_are_lexicographic() {
        let panel = sample();
        let cols: Vec<&str> = panel.columns().collect();
        assert_eq!(cols, vec!["DGS10", "UNRATE"]);
    }

    #[test]
    fn value_distinguishes_absent_from_missing() {
        let panel = sample();
        assert_eq!(panel.value(d("2020-01-31"), "UNRATE"), Some(Some(3.5)));
        assert_eq!(panel.value(d("2020-02-29"), "UNRATE"), Some(None));
        assert_eq!(panel.value(d("2020-01-15"), "UNRATE"), None);
        assert_eq!(panel.value(d("2020-01-31"), "GDP"), None);
    }

    #[test]
    fn missing_fraction_per_column() {
        let panel = sample();
        assert_eq!(panel.missing_fraction("UNRATE"), Some(1.0 / 3.0));
        assert_eq!(panel.missing_fraction("DGS10"), Some(2.0 / 3.0));
        assert_eq!(panel.missing_fraction("GDP"), None);
    }

    #[test]
    fn empty_panel_has_no_shape() {
        let panel = Panel::empty();
        assert!(panel.is_empty());
        assert_eq!(panel.n_rows(), 0);
        assert_eq!(panel.n_cols(), 0);
    }
}
