//! Raw series types — one parsed input file before alignment.

use chrono::NaiveDate;
use std::collections::BTreeMap;

/// A single dated observation.
///
/// `value` is `None` when the source carried a blank or unparseable value on
/// that date. A missing value keeps its date anchor; a missing date drops the
/// whole row before an `Observation` is ever built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

/// One input time series, named after its source file.
///
/// Dates are unique and sorted: duplicate dates in the source resolve
/// last-write-wins during construction.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSeries {
    pub id: String,
    pub observations: Vec<Observation>,
}

impl RawSeries {
    /// Build a series from observations in source order. Later observations
    /// on the same date overwrite earlier ones.
    pub fn from_observations(
        id: impl Into<String>,
        observations: impl IntoIterator<Item = Observation>,
    ) -> Self {
        let mut by_date: BTreeMap<NaiveDate, Option<f64>> = BTreeMap::new();
        for obs in observations {
            by_date.insert(obs.date, obs.value);
        }
        Self {
            id: id.into(),
            observations: by_date
                .into_iter()
                .map(|(date, value)| Observation { date, value })
                .collect(),
        }
    }

    /// Series with an identifier but no observations.
    pub fn empty(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            observations: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}
