//! Calendar resampling — last observation per period.

use crate::panel::Panel;
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Target calendar frequency for the resampled panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    MonthEnd,
    QuarterEnd,
    YearEnd,
}

impl Frequency {
    /// Last calendar day of the period containing `date`.
    pub fn period_end(self, date: NaiveDate) -> NaiveDate {
        let (year, month) = match self {
            Frequency::MonthEnd => (date.year(), date.month()),
            Frequency::QuarterEnd => (date.year(), (date.month0() / 3) * 3 + 3),
            Frequency::YearEnd => (date.year(), 12),
        };
        last_day_of_month(year, month)
    }
}

fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap()
        .pred_opt()
        .unwrap()
}

/// Downsample a panel to period-end rows.
///
/// For each period and column the output is the last non-missing observation
/// recorded within that period; a period with no observations is missing.
/// The output axis covers every period between the panel's first and last
/// date, including periods with no input rows at all.
pub fn resample(panel: &Panel, frequency: Frequency) -> Panel {
    let (Some(first), Some(last)) = (panel.dates.first(), panel.dates.last()) else {
        // No date axis: nothing to span. Columns without rows stay empty.
        return panel.clone();
    };

    let mut period_ends = Vec::new();
    let mut end = frequency.period_end(*first);
    let last_end = frequency.period_end(*last);
    while end <= last_end {
        period_ends.push(end);
        end = frequency.period_end(end + Duration::days(1));
    }

    let index: HashMap<NaiveDate, usize> = period_ends
        .iter()
        .enumerate()
        .map(|(i, d)| (*d, i))
        .collect();

    let mut values: BTreeMap<String, Vec<Option<f64>>> = BTreeMap::new();
    for (id, col) in &panel.values {
        let mut out = vec![None; period_ends.len()];
        // Rows are date-sorted, so the last write per period wins.
        for (row, date) in panel.dates.iter().enumerate() {
            if let Some(v) = col[row] {
                out[index[&frequency.period_end(*date)]] = Some(v);
            }
        }
        values.insert(id.clone(), out);
    }

    Panel::new(period_ends, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::build_panel;
    use crate::series::{Observation, RawSeries};

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn series(id: &str, points: &[(&str, Option<f64>)]) -> RawSeries {
        RawSeries::from_observations(
            id,
            points.iter().map(|(date, value)| Observation {
                date: d(date),
                value: *value,
            }),
        )
    }

    #[test]
    fn period_end_covers_leap_years() {
        assert_eq!(
            Frequency::MonthEnd.period_end(d("2020-02-10")),
            d("2020-02-29")
        );
        assert_eq!(
            Frequency::MonthEnd.period_end(d("2021-02-10")),
            d("2021-02-28")
        );
        assert_eq!(
            Frequency::MonthEnd.period_end(d("2020-12-31")),
            d("2020-12-31")
        );
    }

    #[test]
    fn quarter_and_year_ends() {
        assert_eq!(
            Frequency::QuarterEnd.period_end(d("2020-02-10")),
            d("2020-03-31")
        );
        assert_eq!(
            Frequency::QuarterEnd.period_end(d("2020-10-01")),
            d("2020-12-31")
        );
        assert_eq!(
            Frequency::YearEnd.period_end(d("2020-02-10")),
            d("2020-12-31")
        );
    }

    #[test]
    fn takes_the_last_observation_of_each_month() {
        let a = series(
            "A",
            &[
                ("2020-01-05", Some(1.0)),
                ("2020-01-20", Some(1.5)),
                ("2020-02-10", Some(2.0)),
            ],
        );
        let b = series("B", &[("2020-01-15", Some(10.0))]);

        let monthly = resample(&build_panel([&a, &b]), Frequency::MonthEnd);

        assert_eq!(monthly.dates(), &[d("2020-01-31"), d("2020-02-29")]);
        assert_eq!(monthly.value(d("2020-01-31"), "A"), Some(Some(1.5)));
        assert_eq!(monthly.value(d("2020-02-29"), "A"), Some(Some(2.0)));
        assert_eq!(monthly.value(d("2020-01-31"), "B"), Some(Some(10.0)));
        // B has no February observation: present as a row, missing as a value.
        assert_eq!(monthly.value(d("2020-02-29"), "B"), Some(None));
    }

    #[test]
    fn missing_values_do_not_shadow_earlier_observations() {
        let a = series("A", &[("2020-01-05", Some(1.0)), ("2020-01-20", None)]);

        let monthly = resample(&build_panel([&a]), Frequency::MonthEnd);

        assert_eq!(monthly.value(d("2020-01-31"), "A"), Some(Some(1.0)));
    }

    #[test]
    fn axis_spans_months_with_no_rows_at_all() {
        let a = series("A", &[("2020-01-05", Some(1.0)), ("2020-04-10", Some(4.0))]);

        let monthly = resample(&build_panel([&a]), Frequency::MonthEnd);

        assert_eq!(
            monthly.dates(),
            &[
                d("2020-01-31"),
                d("2020-02-29"),
                d("2020-03-31"),
                d("2020-04-30"),
            ]
        );
        assert_eq!(monthly.value(d("2020-02-29"), "A"), Some(None));
        assert_eq!(monthly.value(d("2020-03-31"), "A"), Some(None));
    }

    #[test]
    fn empty_panel_resamples_to_empty() {
        let resampled = resample(&Panel::empty(), Frequency::MonthEnd);
        assert!(resampled.is_empty());
    }
}
