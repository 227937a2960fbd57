use serde::Serialize;
use thiserror::Error;

/// Failure to derive a column for a single record. These never abort a run;
/// the pipeline records them and drops the record from the affected views.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordError {
    #[error("Unrecognised date format: '{input}'")]
    DateFormat { input: String },

    #[error("Unparsable price: '{input}'")]
    PriceFormat { input: String },

    #[error("Missing value in required field '{field}'")]
    MissingValue { field: String },
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Configuration parse error: {source}")]
    ConfigParseError {
        #[from]
        source: serde_json::Error,
    },

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("CSV data format error: {0}")]
    CsvDataFormatError(String),

    #[error("Unknown view: {0}")]
    UnknownView(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_error_serialises_with_kind_tag() {
        let err = RecordError::PriceFormat { input: "abc".to_string() };
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "price_format", "input": "abc" }));
    }

    #[test]
    fn record_error_messages() {
        let err = RecordError::MissingValue { field: "Date".to_string() };
        assert_eq!(err.to_string(), "Missing value in required field 'Date'");
    }
}
