// Who led each year, and how the biggest organisations evolved
use std::collections::HashSet;

use mission_shared::models::{EnrichedRecord, ViewRow, ViewValue};
use serde_json::Value;

use super::{ViewCalculator, TOP_ORGANISATIONS_BY_YEAR};
use crate::aggregate::{count_by_period_and_key, leading_key_per_period, top_k_by_count};

/// The key with the most launches in each year, among records accepted by
/// `filter`. Ties go to the alphabetically first key.
pub struct LeadingByYearView {
    name: &'static str,
    key: fn(&EnrichedRecord) -> Option<String>,
    filter: fn(&EnrichedRecord) -> bool,
}

impl LeadingByYearView {
    pub fn new(
        name: &'static str,
        key: fn(&EnrichedRecord) -> Option<String>,
        filter: fn(&EnrichedRecord) -> bool,
    ) -> Self {
        Self { name, key, filter }
    }
}

impl ViewCalculator for LeadingByYearView {
    fn name(&self) -> &str {
        self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "tie_break": "key_ascending" })
    }

    fn calculate(&self, records: &[EnrichedRecord]) -> Vec<ViewRow> {
        leading_key_per_period(
            records,
            |r| (self.filter)(r).then_some(r.year).flatten(),
            self.key,
        )
        .into_iter()
        .map(|(year, label, count)| ViewRow::new(year, ViewValue::Leader { label, count }))
        .collect()
    }
}

/// Yearly launch counts of the `k` organisations with the most launches overall.
pub struct TopOrganisationsByYearView {
    k: usize,
}

impl TopOrganisationsByYearView {
    pub fn new(k: usize) -> Self {
        Self { k }
    }
}

impl ViewCalculator for TopOrganisationsByYearView {
    fn name(&self) -> &str {
        TOP_ORGANISATIONS_BY_YEAR
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "k": self.k })
    }

    fn calculate(&self, records: &[EnrichedRecord]) -> Vec<ViewRow> {
        let top: HashSet<String> = top_k_by_count(records, |r| r.organisation().map(str::to_string), self.k)
            .into_iter()
            .map(|(org, _)| org)
            .collect();

        count_by_period_and_key(
            records,
            |r| r.year,
            |r| r.organisation().filter(|org| top.contains(*org)).map(str::to_string),
        )
        .into_iter()
        .flat_map(|(year, orgs)| {
            orgs.into_iter()
                .map(move |(org, count)| ViewRow::new((year, org), ViewValue::Count(count)))
        })
        .collect()
    }
}
