// Launch price views. Records without a parsed price never contribute.
use mission_shared::models::{EnrichedRecord, ViewKey, ViewRow, ViewValue};
use serde_json::Value;

use super::{ViewCalculator, PRICE_DISTRIBUTION};
use crate::aggregate::{histogram, mean_by_key, sum_by_key};

/// Histogram of launch prices (USD millions).
pub struct PriceDistributionView {
    bins: usize,
}

impl PriceDistributionView {
    pub fn new(bins: usize) -> Self {
        Self { bins }
    }
}

impl ViewCalculator for PriceDistributionView {
    fn name(&self) -> &str {
        PRICE_DISTRIBUTION
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "bins": self.bins })
    }

    fn calculate(&self, records: &[EnrichedRecord]) -> Vec<ViewRow> {
        let prices: Vec<f64> = records.iter().filter_map(|r| r.price_value).collect();
        histogram(&prices, self.bins)
            .into_iter()
            .map(|bin| {
                ViewRow::new(
                    ViewKey::Bin {
                        lower: bin.lower,
                        upper: bin.upper,
                    },
                    ViewValue::Count(bin.count),
                )
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceAggregate {
    Sum,
    Mean,
}

/// Total or mean price per key. Rows are ordered by value, highest first,
/// unless built with `chronological`, which keeps key order.
pub struct PriceByKeyView<K> {
    name: &'static str,
    key: fn(&EnrichedRecord) -> Option<K>,
    aggregate: PriceAggregate,
    by_key: bool,
}

impl<K> PriceByKeyView<K> {
    pub fn new(name: &'static str, key: fn(&EnrichedRecord) -> Option<K>, aggregate: PriceAggregate) -> Self {
        Self {
            name,
            key,
            aggregate,
            by_key: false,
        }
    }

    pub fn chronological(name: &'static str, key: fn(&EnrichedRecord) -> Option<K>, aggregate: PriceAggregate) -> Self {
        Self {
            by_key: true,
            ..Self::new(name, key, aggregate)
        }
    }
}

impl<K> ViewCalculator for PriceByKeyView<K>
where
    K: Ord + Into<ViewKey>,
{
    fn name(&self) -> &str {
        self.name
    }

    fn parameters(&self) -> Value {
        let aggregate = match self.aggregate {
            PriceAggregate::Sum => "sum",
            PriceAggregate::Mean => "mean",
        };
        serde_json::json!({ "aggregate": aggregate })
    }

    fn calculate(&self, records: &[EnrichedRecord]) -> Vec<ViewRow> {
        let price = |r: &EnrichedRecord| r.price_value;
        let keyed = match self.aggregate {
            PriceAggregate::Sum => sum_by_key(records, self.key, price),
            PriceAggregate::Mean => mean_by_key(records, self.key, price),
        };

        let mut rows: Vec<(K, f64)> = keyed.into_iter().collect();
        if !self.by_key {
            // Stable: equal values stay in key order
            rows.sort_by(|a, b| b.1.total_cmp(&a.1));
        }
        rows.into_iter()
            .map(|(key, value)| ViewRow::new(key, ViewValue::Number(value)))
            .collect()
    }
}
