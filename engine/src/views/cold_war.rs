// USA vs USSR comparisons and failure trends. The Soviet-era merge of
// Kazakhstan into Russia is applied here only.
use mission_shared::models::{EnrichedRecord, ViewRow, ViewValue};
use serde_json::Value;

use super::{ViewCalculator, COLD_WAR_LAUNCHES_BY_COUNTRY, COLD_WAR_LAUNCHES_BY_YEAR};
use crate::aggregate::{count_by_key, count_by_period_and_key, percentage_over_periods};
use crate::normalize::cold_war_country;

const SUPERPOWERS: [&str; 2] = ["USA", "Russia"];

/// The superpower a launch counts for, if it is dated within the Cold War
/// (up to and including `end_year`) and launched by either side.
fn superpower(r: &EnrichedRecord, end_year: i32) -> Option<String> {
    if r.year? > end_year {
        return None;
    }
    let side = cold_war_country(r.country()?);
    SUPERPOWERS.contains(&side).then(|| side.to_string())
}

fn in_scope(r: &EnrichedRecord, end_year: Option<i32>) -> bool {
    match end_year {
        Some(end_year) => superpower(r, end_year).is_some(),
        None => true,
    }
}

/// Total launches of each superpower during the Cold War.
pub struct ColdWarLaunchesByCountry {
    end_year: i32,
}

impl ColdWarLaunchesByCountry {
    pub fn new(end_year: i32) -> Self {
        Self { end_year }
    }
}

impl ViewCalculator for ColdWarLaunchesByCountry {
    fn name(&self) -> &str {
        COLD_WAR_LAUNCHES_BY_COUNTRY
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "end_year": self.end_year })
    }

    fn calculate(&self, records: &[EnrichedRecord]) -> Vec<ViewRow> {
        count_by_key(records, |r| superpower(r, self.end_year))
            .into_iter()
            .map(|(side, count)| ViewRow::new(side, ViewValue::Count(count)))
            .collect()
    }
}

/// Launches per year for each superpower.
pub struct ColdWarLaunchesByYear {
    end_year: i32,
}

impl ColdWarLaunchesByYear {
    pub fn new(end_year: i32) -> Self {
        Self { end_year }
    }
}

impl ViewCalculator for ColdWarLaunchesByYear {
    fn name(&self) -> &str {
        COLD_WAR_LAUNCHES_BY_YEAR
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "end_year": self.end_year })
    }

    fn calculate(&self, records: &[EnrichedRecord]) -> Vec<ViewRow> {
        count_by_period_and_key(records, |r| r.year, |r| superpower(r, self.end_year))
            .into_iter()
            .flat_map(|(year, sides)| {
                sides
                    .into_iter()
                    .map(move |(side, count)| ViewRow::new((year, side), ViewValue::Count(count)))
            })
            .collect()
    }
}

/// Failed launches per year, chronological. With `cold_war_end` set only
/// superpower launches up to that year are counted.
pub struct FailuresByYear {
    name: &'static str,
    cold_war_end: Option<i32>,
}

impl FailuresByYear {
    pub fn new(name: &'static str, cold_war_end: Option<i32>) -> Self {
        Self { name, cold_war_end }
    }
}

impl ViewCalculator for FailuresByYear {
    fn name(&self) -> &str {
        self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "end_year": self.cold_war_end })
    }

    fn calculate(&self, records: &[EnrichedRecord]) -> Vec<ViewRow> {
        let mut counts = count_by_key(records, |r| {
            (r.raw.is_failure() && in_scope(r, self.cold_war_end))
                .then_some(r.year)
                .flatten()
        });
        counts.sort_by_key(|(year, _)| *year);
        counts
            .into_iter()
            .map(|(year, count)| ViewRow::new(year, ViewValue::Count(count)))
            .collect()
    }
}

/// Share of failed launches per year over every year between the first and
/// last dated launch in scope. A year with no launches is reported as missing.
pub struct FailurePercentageByYear {
    name: &'static str,
    cold_war_end: Option<i32>,
}

impl FailurePercentageByYear {
    pub fn new(name: &'static str, cold_war_end: Option<i32>) -> Self {
        Self { name, cold_war_end }
    }
}

impl ViewCalculator for FailurePercentageByYear {
    fn name(&self) -> &str {
        self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "end_year": self.cold_war_end })
    }

    fn calculate(&self, records: &[EnrichedRecord]) -> Vec<ViewRow> {
        let period = |r: &EnrichedRecord| in_scope(r, self.cold_war_end).then_some(r.year).flatten();
        let years: Vec<i32> = records.iter().filter_map(period).collect();
        let (Some(&first), Some(&last)) = (years.iter().min(), years.iter().max()) else {
            return Vec::new();
        };

        percentage_over_periods(records, first..=last, period, |r| r.raw.is_failure())
            .into_iter()
            .map(|(year, pct)| ViewRow::new(year, ViewValue::from(pct)))
            .collect()
    }
}
