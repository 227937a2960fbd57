// The enriched record set every view is computed from, plus the per-record
// failures collected while building it. Built once, then only read.
use mission_shared::models::EnrichedRecord;
use serde::Serialize;

use crate::error::RecordError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordFailure {
    /// Zero-based position of the record in the loaded table.
    pub row: usize,
    pub error: RecordError,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FailureSummary {
    pub total_records: usize,
    pub date_failures: usize,
    pub price_failures: usize,
    pub missing_values: usize,
}

#[derive(Debug, Clone, Default)]
pub struct EnrichedDataset {
    records: Vec<EnrichedRecord>,
    failures: Vec<RecordFailure>,
}

impl EnrichedDataset {
    pub fn new(records: Vec<EnrichedRecord>, failures: Vec<RecordFailure>) -> Self {
        EnrichedDataset { records, failures }
    }

    pub fn records(&self) -> &[EnrichedRecord] {
        &self.records
    }

    pub fn failures(&self) -> &[RecordFailure] {
        &self.failures
    }

    pub fn failures_for(&self, row: usize) -> impl Iterator<Item = &RecordFailure> {
        self.failures.iter().filter(move |f| f.row == row)
    }

    pub fn summary(&self) -> FailureSummary {
        let mut summary = FailureSummary {
            total_records: self.records.len(),
            ..FailureSummary::default()
        };
        for failure in &self.failures {
            match failure.error {
                RecordError::DateFormat { .. } => summary.date_failures += 1,
                RecordError::PriceFormat { .. } => summary.price_failures += 1,
                RecordError::MissingValue { .. } => summary.missing_values += 1,
            }
        }
        summary
    }
}
