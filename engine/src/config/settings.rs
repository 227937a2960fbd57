// Pipeline settings, loaded from a JSON file or the embedded defaults
use std::fs;
use std::path::Path;

use mission_shared::models::ViewValue;
use mission_shared::utils::format_decimal;
use serde::Deserialize;

use crate::error::{EngineError, Result};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PipelineSettings {
    pub price_histogram_bins: usize,
    pub top_organisations: usize,
    /// Last year (inclusive) counted by the USA vs USSR views.
    pub cold_war_end_year: i32,
    /// Months averaged by the month-on-month rolling mean.
    pub rolling_window: usize,
    pub display: DisplayConfig,
}

/// How numbers are rendered by the presentation side. Handed to the renderer
/// explicitly; nothing here is process-wide.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub float_decimals: usize,
    pub thousands_separator: bool,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        PipelineSettings {
            price_histogram_bins: 10,
            top_organisations: 10,
            cold_war_end_year: 1991,
            rolling_window: 12,
            display: DisplayConfig::default(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            float_decimals: 2,
            thousands_separator: true,
        }
    }
}

impl PipelineSettings {
    pub fn load_default() -> Result<Self> {
        let config_str = include_str!("../../config/default.json");
        Self::from_json(config_str)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let settings = Self::from_json(&contents)?;
        tracing::debug!(path = %path.display(), "Loaded pipeline settings");
        Ok(settings)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        let settings: PipelineSettings = serde_json::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.price_histogram_bins == 0 {
            return Err(EngineError::ConfigError(
                "price_histogram_bins must be greater than 0".to_string(),
            ));
        }
        if self.top_organisations == 0 {
            return Err(EngineError::ConfigError(
                "top_organisations must be greater than 0".to_string(),
            ));
        }
        if self.rolling_window == 0 {
            return Err(EngineError::ConfigError(
                "rolling_window must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl DisplayConfig {
    pub fn format_number(&self, value: f64) -> String {
        format_decimal(value, self.float_decimals, self.thousands_separator)
    }

    pub fn format_value(&self, value: &ViewValue) -> String {
        match value {
            ViewValue::Count(count) => count.to_string(),
            ViewValue::Number(number) => self.format_number(*number),
            ViewValue::Leader { label, count } => format!("{} ({})", label, count),
            ViewValue::Series {
                count,
                rolling_mean,
            } => match rolling_mean {
                Some(mean) => format!("{} (avg {})", count, self.format_number(*mean)),
                None => count.to_string(),
            },
            ViewValue::Missing => "-".to_string(),
        }
    }
}
