// Enrichment and view orchestration over a fully loaded launch table
use std::path::Path;

use mission_shared::models::{EnrichedRecord, MissionRecord, ViewResult, ViewSet};
use serde::Serialize;

use crate::config::PipelineSettings;
use crate::data::csv_loader::{MissionCsvLoader, COL_DATE, COL_LOCATION, COL_MISSION_STATUS, COL_ORGANISATION};
use crate::data::dataset::{EnrichedDataset, FailureSummary, RecordFailure};
use crate::error::{EngineError, RecordError, Result};
use crate::normalize::{normalize_country, normalize_price, parse_launch_date};
use crate::views::{default_views, ViewCalculator};

#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub summary: FailureSummary,
    pub failures: Vec<RecordFailure>,
    pub views: ViewSet,
}

impl PipelineReport {
    pub fn view(&self, name: &str) -> Option<&ViewResult> {
        self.views.get(name)
    }
}

pub struct ReportPipeline {
    views: Vec<Box<dyn ViewCalculator>>,
}

impl ReportPipeline {
    pub fn new(settings: PipelineSettings) -> Self {
        ReportPipeline {
            views: default_views(&settings),
        }
    }

    pub fn view_names(&self) -> impl Iterator<Item = &str> {
        self.views.iter().map(|v| v.name())
    }

    /// Loads the CSV at `path` and runs every view over it.
    pub fn run_file(&self, path: &Path) -> Result<PipelineReport> {
        let records = MissionCsvLoader::load_records_from_csv(path)?;
        Ok(self.run(&records))
    }

    pub fn run(&self, records: &[MissionRecord]) -> PipelineReport {
        let dataset = self.enrich(records);
        let views = self
            .views
            .iter()
            .map(|view| (view.name().to_string(), view.evaluate(dataset.records())))
            .collect();

        PipelineReport {
            summary: dataset.summary(),
            failures: dataset.failures().to_vec(),
            views,
        }
    }

    pub fn run_view(&self, records: &[MissionRecord], name: &str) -> Result<ViewResult> {
        let view = self
            .views
            .iter()
            .find(|v| v.name() == name)
            .ok_or_else(|| EngineError::UnknownView(name.to_string()))?;
        let dataset = self.enrich(records);
        Ok(view.evaluate(dataset.records()))
    }

    /// Attaches year, month, country and price to every record. Failures are
    /// collected per record; the record is still kept and simply lacks the
    /// derived value it failed on.
    pub fn enrich(&self, records: &[MissionRecord]) -> EnrichedDataset {
        let mut failures = Vec::new();
        let enriched: Vec<EnrichedRecord> = records
            .iter()
            .enumerate()
            .map(|(row, record)| {
                let (enriched, errors) = enrich_record(record);
                failures.extend(errors.into_iter().map(|error| RecordFailure { row, error }));
                enriched
            })
            .collect();

        if !failures.is_empty() {
            tracing::warn!(
                failures = failures.len(),
                records = enriched.len(),
                "Some records could not be fully enriched"
            );
        }
        tracing::info!(records = enriched.len(), "Enriched mission records");
        EnrichedDataset::new(enriched, failures)
    }
}

/// Derives the enriched columns of one record. Source fields are copied
/// untouched, so enriching `enriched.raw` again yields the same record.
pub fn enrich_record(record: &MissionRecord) -> (EnrichedRecord, Vec<RecordError>) {
    let mut errors = Vec::new();

    for (field, value) in [
        (COL_ORGANISATION, &record.organisation),
        (COL_LOCATION, &record.location),
        (COL_MISSION_STATUS, &record.mission_status),
    ] {
        if value.trim().is_empty() {
            errors.push(RecordError::MissingValue {
                field: field.to_string(),
            });
        }
    }

    let date = if record.date.trim().is_empty() {
        errors.push(RecordError::MissingValue {
            field: COL_DATE.to_string(),
        });
        None
    } else {
        match parse_launch_date(&record.date) {
            Ok(date) => Some(date),
            Err(e) => {
                tracing::debug!(date = %record.date, "Unparsable launch date");
                errors.push(e);
                None
            }
        }
    };

    let price_value = normalize_price(record.price.as_deref()).unwrap_or_else(|e| {
        errors.push(e);
        None
    });

    let enriched = EnrichedRecord {
        raw: record.clone(),
        year: date.map(|d| d.year),
        month: date.map(|d| d.month),
        country: normalize_country(&record.location),
        price_value,
    };
    (enriched, errors)
}
