// Group-by aggregates over enriched records.
//
// Every function is pure and generic over the record type. Key, period and
// value functions return `Option`; `None` drops the record from that
// aggregate only.
pub mod histogram;
pub mod rolling;

pub use histogram::{histogram, HistogramBin};
pub use rolling::rolling_mean;

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

/// Counts records per key, most frequent first. Equal counts are ordered by key.
pub fn count_by_key<T, K, F>(records: &[T], key_fn: F) -> Vec<(K, usize)>
where
    K: Ord,
    F: Fn(&T) -> Option<K>,
{
    let mut counts: BTreeMap<K, usize> = BTreeMap::new();
    for key in records.iter().filter_map(&key_fn) {
        *counts.entry(key).or_insert(0) += 1;
    }

    let mut ordered: Vec<(K, usize)> = counts.into_iter().collect();
    // Stable sort keeps the BTreeMap key order among equal counts.
    ordered.sort_by(|a, b| b.1.cmp(&a.1));
    ordered
}

/// Sums `value_fn` per key. Keys without a single non-null value are omitted.
pub fn sum_by_key<T, K, F, V>(records: &[T], key_fn: F, value_fn: V) -> BTreeMap<K, f64>
where
    K: Ord,
    F: Fn(&T) -> Option<K>,
    V: Fn(&T) -> Option<f64>,
{
    accumulate(records, key_fn, value_fn)
        .into_iter()
        .map(|(key, (sum, _))| (key, sum))
        .collect()
}

/// Mean of `value_fn` per key, over non-null values only.
pub fn mean_by_key<T, K, F, V>(records: &[T], key_fn: F, value_fn: V) -> BTreeMap<K, f64>
where
    K: Ord,
    F: Fn(&T) -> Option<K>,
    V: Fn(&T) -> Option<f64>,
{
    accumulate(records, key_fn, value_fn)
        .into_iter()
        .map(|(key, (sum, n))| (key, sum / n as f64))
        .collect()
}

fn accumulate<T, K, F, V>(records: &[T], key_fn: F, value_fn: V) -> BTreeMap<K, (f64, usize)>
where
    K: Ord,
    F: Fn(&T) -> Option<K>,
    V: Fn(&T) -> Option<f64>,
{
    let mut acc: BTreeMap<K, (f64, usize)> = BTreeMap::new();
    for record in records {
        if let (Some(key), Some(value)) = (key_fn(record), value_fn(record)) {
            let entry = acc.entry(key).or_insert((0.0, 0));
            entry.0 += value;
            entry.1 += 1;
        }
    }
    acc
}

/// The `k` most frequent keys with their counts. Equal counts keep the order
/// in which the keys were first seen.
pub fn top_k_by_count<T, K, F>(records: &[T], key_fn: F, k: usize) -> Vec<(K, usize)>
where
    K: Eq + Hash + Clone,
    F: Fn(&T) -> Option<K>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<(K, usize)> = Vec::new();
    for key in records.iter().filter_map(&key_fn) {
        match index.get(&key) {
            Some(&pos) => counts[pos].1 += 1,
            None => {
                index.insert(key.clone(), counts.len());
                counts.push((key, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(k);
    counts
}

/// For every period, the key with the most records and its count.
/// Ties go to the smallest key. Periods come back in ascending order.
pub fn leading_key_per_period<T, P, K, PF, KF>(
    records: &[T],
    period_fn: PF,
    key_fn: KF,
) -> Vec<(P, K, usize)>
where
    P: Ord,
    K: Ord,
    PF: Fn(&T) -> Option<P>,
    KF: Fn(&T) -> Option<K>,
{
    count_by_period_and_key(records, period_fn, key_fn)
        .into_iter()
        .filter_map(|(period, counts)| {
            // Iterating keys in ascending order and replacing only on a strictly
            // greater count keeps the smallest key among ties.
            let mut best: Option<(K, usize)> = None;
            for (key, count) in counts {
                if best.as_ref().map_or(true, |(_, best_count)| count > *best_count) {
                    best = Some((key, count));
                }
            }
            best.map(|(key, count)| (period, key, count))
        })
        .collect()
}

/// Record counts per (period, key), both levels ordered.
pub fn count_by_period_and_key<T, P, K, PF, KF>(
    records: &[T],
    period_fn: PF,
    key_fn: KF,
) -> BTreeMap<P, BTreeMap<K, usize>>
where
    P: Ord,
    K: Ord,
    PF: Fn(&T) -> Option<P>,
    KF: Fn(&T) -> Option<K>,
{
    let mut grouped: BTreeMap<P, BTreeMap<K, usize>> = BTreeMap::new();
    for record in records {
        if let (Some(period), Some(key)) = (period_fn(record), key_fn(record)) {
            *grouped.entry(period).or_default().entry(key).or_insert(0) += 1;
        }
    }
    grouped
}

/// Share of records satisfying `predicate_fn` per observed period, in percent.
pub fn percentage_of_total<T, P, PF, Q>(
    records: &[T],
    period_fn: PF,
    predicate_fn: Q,
) -> BTreeMap<P, Option<f64>>
where
    P: Ord + Clone,
    PF: Fn(&T) -> Option<P>,
    Q: Fn(&T) -> bool,
{
    let periods: Vec<P> = records.iter().filter_map(&period_fn).collect();
    percentage_over_periods(records, periods, period_fn, predicate_fn)
}

/// Like `percentage_of_total`, but reports every period in `periods`.
/// A period without any records maps to `None`.
pub fn percentage_over_periods<T, P, I, PF, Q>(
    records: &[T],
    periods: I,
    period_fn: PF,
    predicate_fn: Q,
) -> BTreeMap<P, Option<f64>>
where
    P: Ord + Clone,
    I: IntoIterator<Item = P>,
    PF: Fn(&T) -> Option<P>,
    Q: Fn(&T) -> bool,
{
    let mut tallies: BTreeMap<P, (usize, usize)> =
        periods.into_iter().map(|p| (p, (0, 0))).collect();
    for record in records {
        let Some(period) = period_fn(record) else {
            continue;
        };
        if let Some(tally) = tallies.get_mut(&period) {
            tally.1 += 1;
            if predicate_fn(record) {
                tally.0 += 1;
            }
        }
    }

    tallies
        .into_iter()
        .map(|(period, (hits, total))| {
            let pct = (total > 0).then(|| 100.0 * hits as f64 / total as f64);
            (period, pct)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Row {
        year: Option<i32>,
        org: &'static str,
        price: Option<f64>,
        failed: bool,
    }

    fn row(year: i32, org: &'static str) -> Row {
        Row {
            year: Some(year),
            org,
            price: None,
            failed: false,
        }
    }

    fn priced(org: &'static str, price: Option<f64>) -> Row {
        Row {
            year: Some(2000),
            org,
            price,
            failed: false,
        }
    }

    fn org_key(r: &Row) -> Option<String> {
        Some(r.org.to_string())
    }

    #[test]
    fn test_count_by_key_orders_by_count() {
        let rows = vec![row(2000, "A"), row(2000, "B"), row(2000, "A")];
        let counts = count_by_key(&rows, org_key);
        assert_eq!(counts, vec![("A".to_string(), 2), ("B".to_string(), 1)]);
    }

    #[test]
    fn test_count_by_key_ties_by_key() {
        let rows = vec![row(2000, "C"), row(2000, "A"), row(2000, "B")];
        let counts = count_by_key(&rows, org_key);
        let keys: Vec<_> = counts.into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_count_by_key_skips_missing_keys() {
        let mut rows = vec![row(2000, "A"), row(2001, "A")];
        rows[1].year = None;
        let counts = count_by_key(&rows, |r: &Row| r.year);
        assert_eq!(counts, vec![(2000, 1)]);
    }

    #[test]
    fn test_count_by_key_empty() {
        let rows: Vec<Row> = Vec::new();
        assert!(count_by_key(&rows, org_key).is_empty());
    }

    #[test]
    fn test_sum_and_mean_skip_nulls() {
        let rows = vec![
            priced("A", Some(10.0)),
            priced("A", None),
            priced("A", Some(20.0)),
            priced("B", None),
        ];
        let sums = sum_by_key(&rows, org_key, |r| r.price);
        let means = mean_by_key(&rows, org_key, |r| r.price);

        assert_eq!(sums.get("A"), Some(&30.0));
        assert_eq!(means.get("A"), Some(&15.0));
        // B has no priced launches: omitted rather than reported as zero
        assert!(!sums.contains_key("B"));
        assert!(!means.contains_key("B"));
    }

    #[test]
    fn test_top_k_ties_keep_first_seen_order() {
        let rows = vec![
            row(2000, "Z"),
            row(2000, "M"),
            row(2000, "A"),
            row(2000, "A"),
            row(2000, "M"),
            row(2000, "Z"),
            row(2000, "Q"),
        ];
        let top = top_k_by_count(&rows, org_key, 3);
        let keys: Vec<_> = top.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["Z", "M", "A"]);
        assert!(top.iter().all(|(_, n)| *n == 2));
    }

    #[test]
    fn test_top_k_larger_than_keys() {
        let rows = vec![row(2000, "A"), row(2000, "B"), row(2000, "B")];
        let top = top_k_by_count(&rows, org_key, 10);
        assert_eq!(top, vec![("B".to_string(), 2), ("A".to_string(), 1)]);
    }

    #[test]
    fn test_leading_key_per_period() {
        let rows = vec![
            row(1960, "USA"),
            row(1960, "USA"),
            row(1960, "Russia"),
            row(1961, "Russia"),
        ];
        let leaders = leading_key_per_period(&rows, |r| r.year, org_key);
        assert_eq!(
            leaders,
            vec![
                (1960, "USA".to_string(), 2),
                (1961, "Russia".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_leading_key_tie_is_deterministic() {
        let forward = vec![row(1970, "USA"), row(1970, "Russia")];
        let backward = vec![row(1970, "Russia"), row(1970, "USA")];

        let first = leading_key_per_period(&forward, |r| r.year, org_key);
        let second = leading_key_per_period(&forward, |r| r.year, org_key);
        let reordered = leading_key_per_period(&backward, |r| r.year, org_key);

        assert_eq!(first, second);
        assert_eq!(first, reordered);
        assert_eq!(first, vec![(1970, "Russia".to_string(), 1)]);
    }

    #[test]
    fn test_percentage_of_total() {
        let mut rows = vec![row(1960, "A"), row(1960, "A"), row(1960, "A"), row(1960, "A")];
        rows[0].failed = true;
        let pct = percentage_of_total(&rows, |r| r.year, |r| r.failed);
        assert_eq!(pct.get(&1960), Some(&Some(25.0)));
    }

    #[test]
    fn test_percentage_zero_total_is_none() {
        let rows = vec![row(1960, "A")];
        let pct = percentage_over_periods(&rows, 1960..=1962, |r| r.year, |r| r.failed);
        assert_eq!(pct.get(&1960), Some(&Some(0.0)));
        assert_eq!(pct.get(&1961), Some(&None));
        assert_eq!(pct.get(&1962), Some(&None));
    }

    #[test]
    fn test_percentage_of_total_empty() {
        let rows: Vec<Row> = Vec::new();
        assert!(percentage_of_total(&rows, |r| r.year, |r| r.failed).is_empty());
    }
}
