// Named views: one per analytical question asked of the launch table
pub mod cold_war;
pub mod launches;
pub mod leaders;
pub mod spending;

use mission_shared::models::{EnrichedRecord, ViewResult, ViewRow};
use serde_json::Value;

use crate::config::PipelineSettings;

pub use cold_war::{ColdWarLaunchesByCountry, ColdWarLaunchesByYear, FailurePercentageByYear, FailuresByYear};
pub use launches::{CountView, MonthOnMonthView};
pub use leaders::{LeadingByYearView, TopOrganisationsByYearView};
pub use spending::{PriceAggregate, PriceByKeyView, PriceDistributionView};

pub const LAUNCHES_BY_ORGANISATION: &str = "launches_by_organisation";
pub const ROCKET_STATUS: &str = "rocket_status";
pub const MISSION_STATUS: &str = "mission_status";
pub const LAUNCHES_BY_COUNTRY: &str = "launches_by_country";
pub const LAUNCHES_BY_COUNTRY_ORGANISATION_STATUS: &str = "launches_by_country_organisation_status";
pub const FAILURES_BY_COUNTRY: &str = "failures_by_country";
pub const PRICE_DISTRIBUTION: &str = "price_distribution";
pub const TOTAL_SPENDING_BY_ORGANISATION: &str = "total_spending_by_organisation";
pub const MEAN_PRICE_BY_ORGANISATION: &str = "mean_price_by_organisation";
pub const MEAN_PRICE_BY_YEAR: &str = "mean_price_by_year";
pub const LAUNCHES_BY_YEAR: &str = "launches_by_year";
pub const LAUNCHES_BY_MONTH: &str = "launches_by_month";
pub const LAUNCHES_MONTH_ON_MONTH: &str = "launches_month_on_month";
pub const TOP_ORGANISATIONS_BY_YEAR: &str = "top_organisations_by_year";
pub const COLD_WAR_LAUNCHES_BY_COUNTRY: &str = "cold_war_launches_by_country";
pub const COLD_WAR_LAUNCHES_BY_YEAR: &str = "cold_war_launches_by_year";
pub const COLD_WAR_FAILURES_BY_YEAR: &str = "cold_war_failures_by_year";
pub const COLD_WAR_FAILURE_PERCENTAGE_BY_YEAR: &str = "cold_war_failure_percentage_by_year";
pub const FAILURES_BY_YEAR: &str = "failures_by_year";
pub const FAILURE_PERCENTAGE_BY_YEAR: &str = "failure_percentage_by_year";
pub const LEADING_COUNTRY_BY_YEAR: &str = "leading_country_by_year";
pub const LEADING_COUNTRY_BY_YEAR_SUCCESSFUL: &str = "leading_country_by_year_successful";
pub const LEADING_ORGANISATION_BY_YEAR: &str = "leading_organisation_by_year";

// Common trait for all views
pub trait ViewCalculator: Send + Sync {
    fn name(&self) -> &str;
    fn parameters(&self) -> Value; // Parameters used for this view instance
    fn calculate(&self, records: &[EnrichedRecord]) -> Vec<ViewRow>;

    fn evaluate(&self, records: &[EnrichedRecord]) -> ViewResult {
        let rows = self.calculate(records);
        tracing::debug!(view = self.name(), rows = rows.len(), "Computed view");
        ViewResult {
            name: self.name().to_string(),
            parameters: self.parameters(),
            rows,
        }
    }
}

fn organisation(r: &EnrichedRecord) -> Option<String> {
    r.organisation().map(str::to_string)
}

fn country(r: &EnrichedRecord) -> Option<String> {
    r.country().map(str::to_string)
}

// Records missing any of the three levels are skipped.
fn country_organisation_status(r: &EnrichedRecord) -> Option<(String, String, String)> {
    Some((
        country(r)?,
        organisation(r)?,
        r.mission_status()?.to_string(),
    ))
}

fn year(r: &EnrichedRecord) -> Option<i32> {
    r.year
}

/// Every view the pipeline publishes, configured from `settings`.
pub fn default_views(settings: &PipelineSettings) -> Vec<Box<dyn ViewCalculator>> {
    vec![
        Box::new(CountView::new(LAUNCHES_BY_ORGANISATION, organisation)),
        Box::new(CountView::new(ROCKET_STATUS, |r| r.rocket_status().map(str::to_string))),
        Box::new(CountView::new(MISSION_STATUS, |r| r.mission_status().map(str::to_string))),
        Box::new(CountView::new(LAUNCHES_BY_COUNTRY, country)),
        Box::new(CountView::new(LAUNCHES_BY_COUNTRY_ORGANISATION_STATUS, country_organisation_status)),
        Box::new(CountView::new(FAILURES_BY_COUNTRY, |r| {
            r.raw.is_failure().then(|| country(r)).flatten()
        })),
        Box::new(PriceDistributionView::new(settings.price_histogram_bins)),
        Box::new(PriceByKeyView::new(
            TOTAL_SPENDING_BY_ORGANISATION,
            organisation,
            PriceAggregate::Sum,
        )),
        Box::new(PriceByKeyView::new(
            MEAN_PRICE_BY_ORGANISATION,
            organisation,
            PriceAggregate::Mean,
        )),
        Box::new(PriceByKeyView::chronological(MEAN_PRICE_BY_YEAR, year, PriceAggregate::Mean)),
        Box::new(CountView::new(LAUNCHES_BY_YEAR, year)),
        Box::new(CountView::new(LAUNCHES_BY_MONTH, |r| r.month)),
        Box::new(MonthOnMonthView::new(settings.rolling_window)),
        Box::new(TopOrganisationsByYearView::new(settings.top_organisations)),
        Box::new(ColdWarLaunchesByCountry::new(settings.cold_war_end_year)),
        Box::new(ColdWarLaunchesByYear::new(settings.cold_war_end_year)),
        Box::new(FailuresByYear::new(COLD_WAR_FAILURES_BY_YEAR, Some(settings.cold_war_end_year))),
        Box::new(FailurePercentageByYear::new(
            COLD_WAR_FAILURE_PERCENTAGE_BY_YEAR,
            Some(settings.cold_war_end_year),
        )),
        Box::new(FailuresByYear::new(FAILURES_BY_YEAR, None)),
        Box::new(FailurePercentageByYear::new(FAILURE_PERCENTAGE_BY_YEAR, None)),
        Box::new(LeadingByYearView::new(LEADING_COUNTRY_BY_YEAR, country, |_| true)),
        Box::new(LeadingByYearView::new(
            LEADING_COUNTRY_BY_YEAR_SUCCESSFUL,
            country,
            |r| r.raw.is_success(),
        )),
        Box::new(LeadingByYearView::new(LEADING_ORGANISATION_BY_YEAR, organisation, |_| true)),
    ]
}


#[cfg(test)]
mod tests {
    use super::*;
    use mission_shared::models::ViewValue;
    use std::collections::HashSet;

    #[test]
    fn test_default_view_names_are_unique() {
        let views = default_views(&PipelineSettings::default());
        let names: HashSet<&str> = views.iter().map(|v| v.name()).collect();
        assert_eq!(names.len(), views.len());
        assert_eq!(views.len(), 23);
    }

    #[test]
    fn test_country_organisation_status_counts() {
        let records = vec![
            test_support::launch("SpaceX", "USA", Some(2020), Some(8), "Success", None),
            test_support::launch("SpaceX", "USA", Some(2020), Some(9), "Success", None),
            test_support::launch("SpaceX", "USA", Some(2006), Some(3), "Failure", None),
            test_support::launch("CASC", "China", Some(2019), Some(1), "Success", None),
            test_support::launch("", "China", Some(2019), Some(2), "Success", None),
        ];
        let view = CountView::new(LAUNCHES_BY_COUNTRY_ORGANISATION_STATUS, country_organisation_status);
        let rows = view.evaluate(&records).rows;

        let key = |c: &str, o: &str, s: &str| (c.to_string(), o.to_string(), s.to_string());
        assert_eq!(
            rows,
            vec![
                ViewRow::new(key("USA", "SpaceX", "Success"), ViewValue::Count(2)),
                ViewRow::new(key("China", "CASC", "Success"), ViewValue::Count(1)),
                ViewRow::new(key("USA", "SpaceX", "Failure"), ViewValue::Count(1)),
            ]
        );
    }

    #[test]
    fn test_views_over_empty_input_are_empty() {
        for view in default_views(&PipelineSettings::default()) {
            assert!(view.evaluate(&[]).is_empty(), "view {} not empty", view.name());
        }
    }
}
