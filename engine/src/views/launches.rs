// Launch counts: by organisation, status, country, year and month
use std::collections::BTreeMap;

use mission_shared::models::{EnrichedRecord, ViewKey, ViewRow, ViewValue};
use serde_json::Value;

use super::{ViewCalculator, LAUNCHES_MONTH_ON_MONTH};
use crate::aggregate::{count_by_key, rolling_mean};

/// Records per key, most frequent first; records without a key are skipped.
pub struct CountView<K> {
    name: &'static str,
    key: fn(&EnrichedRecord) -> Option<K>,
}

impl<K> CountView<K> {
    pub fn new(name: &'static str, key: fn(&EnrichedRecord) -> Option<K>) -> Self {
        Self { name, key }
    }
}

impl<K> ViewCalculator for CountView<K>
where
    K: Ord + Into<ViewKey>,
{
    fn name(&self) -> &str {
        self.name
    }

    fn parameters(&self) -> Value {
        Value::Null
    }

    fn calculate(&self, records: &[EnrichedRecord]) -> Vec<ViewRow> {
        count_by_key(records, self.key)
            .into_iter()
            .map(|(key, count)| ViewRow::new(key, ViewValue::Count(count)))
            .collect()
    }
}

/// Launches per calendar month in chronological order, with a trailing
/// rolling mean. Months without launches inside the observed range count as
/// zero so the window always spans `window` calendar months.
pub struct MonthOnMonthView {
    window: usize,
}

impl MonthOnMonthView {
    pub fn new(window: usize) -> Self {
        Self { window }
    }
}

impl ViewCalculator for MonthOnMonthView {
    fn name(&self) -> &str {
        LAUNCHES_MONTH_ON_MONTH
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "window": self.window })
    }

    fn calculate(&self, records: &[EnrichedRecord]) -> Vec<ViewRow> {
        let mut counts: BTreeMap<(i32, u32), usize> = BTreeMap::new();
        for ym in records.iter().filter_map(EnrichedRecord::year_month) {
            *counts.entry(ym).or_insert(0) += 1;
        }

        let (Some(&first), Some(&last)) = (counts.keys().next(), counts.keys().next_back()) else {
            return Vec::new();
        };

        let months: Vec<(i32, u32)> = month_range(first, last);
        let series: Vec<usize> = months.iter().map(|m| counts.get(m).copied().unwrap_or(0)).collect();
        let values: Vec<f64> = series.iter().map(|&n| n as f64).collect();
        let means = rolling_mean(&values, self.window);

        months
            .into_iter()
            .zip(series)
            .zip(means)
            .map(|((month, count), rolling_mean)| {
                ViewRow::new(month, ViewValue::Series { count, rolling_mean })
            })
            .collect()
    }
}

fn month_range(first: (i32, u32), last: (i32, u32)) -> Vec<(i32, u32)> {
    let mut months = Vec::new();
    let (mut year, mut month) = first;
    while (year, month) <= last {
        months.push((year, month));
        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }
    months
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::test_support::launch;

    fn org(r: &EnrichedRecord) -> Option<String> {
        r.organisation().map(str::to_string)
    }

    #[test]
    fn test_count_view_by_organisation() {
        let records = vec![
            launch("A", "USA", Some(2000), Some(1), "Success", None),
            launch("A", "USA", Some(2000), Some(1), "Success", None),
            launch("B", "USA", Some(2000), Some(1), "Success", None),
        ];
        let rows = CountView::new("orgs", org).calculate(&records);
        assert_eq!(
            rows,
            vec![
                ViewRow::new("A".to_string(), ViewValue::Count(2)),
                ViewRow::new("B".to_string(), ViewValue::Count(1)),
            ]
        );
    }

    #[test]
    fn test_count_view_skips_undated_records() {
        let records = vec![
            launch("A", "USA", Some(1999), Some(1), "Success", None),
            launch("A", "USA", None, None, "Success", None),
        ];
        let rows = CountView::new("years", |r| r.year).calculate(&records);
        assert_eq!(rows, vec![ViewRow::new(1999i32, ViewValue::Count(1))]);
    }

    #[test]
    fn test_month_on_month_fills_gaps() {
        let records = vec![
            launch("A", "USA", Some(1999), Some(11), "Success", None),
            launch("A", "USA", Some(2000), Some(2), "Success", None),
            launch("A", "USA", Some(2000), Some(2), "Success", None),
        ];
        let rows = MonthOnMonthView::new(2).calculate(&records);
        let keys: Vec<String> = rows.iter().map(|r| r.key.to_string()).collect();
        assert_eq!(keys, vec!["1999-11", "1999-12", "2000-01", "2000-02"]);

        assert_eq!(rows[0].value, ViewValue::Series { count: 1, rolling_mean: None });
        assert_eq!(rows[1].value, ViewValue::Series { count: 0, rolling_mean: Some(0.5) });
        assert_eq!(rows[3].value, ViewValue::Series { count: 2, rolling_mean: Some(1.0) });
    }

    #[test]
    fn test_month_range_single_month() {
        assert_eq!(month_range((2020, 5), (2020, 5)), vec![(2020, 5)]);
    }
}
