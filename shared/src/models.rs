use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const MISSION_SUCCESS: &str = "Success";
pub const MISSION_FAILURE: &str = "Failure";

/// One row of the launch table as it was read. Text fields are kept verbatim;
/// missing cells are empty strings, except `price` which is genuinely optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionRecord {
    pub organisation: String,
    pub location: String,
    pub date: String,
    pub detail: String,
    pub rocket_status: String,
    pub price: Option<String>,
    pub mission_status: String,
}

impl MissionRecord {
    pub fn is_failure(&self) -> bool {
        self.mission_status == MISSION_FAILURE
    }

    pub fn is_success(&self) -> bool {
        self.mission_status == MISSION_SUCCESS
    }
}

/// A `MissionRecord` with its derived columns attached.
///
/// `year`/`month` are `None` when the date could not be parsed and
/// `price_value` is `None` when the price was missing or unparsable.
/// `country` is always set, falling back to the raw trailing location segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    pub raw: MissionRecord,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub country: String,
    pub price_value: Option<f64>,
}

impl EnrichedRecord {
    // Blank text maps to None so key functions can drop the record from an aggregate.
    pub fn organisation(&self) -> Option<&str> {
        non_blank(&self.raw.organisation)
    }

    pub fn country(&self) -> Option<&str> {
        non_blank(&self.country)
    }

    pub fn rocket_status(&self) -> Option<&str> {
        non_blank(&self.raw.rocket_status)
    }

    pub fn mission_status(&self) -> Option<&str> {
        non_blank(&self.raw.mission_status)
    }

    pub fn year_month(&self) -> Option<(i32, u32)> {
        Some((self.year?, self.month?))
    }
}

fn non_blank(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Grouping key of one row in a view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ViewKey {
    Label(String),
    Period(i32),
    YearMonth(i32, u32),
    PeriodLabel(i32, String),
    /// Nested grouping levels, outermost first.
    Hierarchy(Vec<String>),
    Bin { lower: f64, upper: f64 },
}

impl fmt::Display for ViewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewKey::Label(label) => write!(f, "{}", label),
            ViewKey::Period(period) => write!(f, "{}", period),
            ViewKey::YearMonth(year, month) => write!(f, "{}-{:02}", year, month),
            ViewKey::PeriodLabel(period, label) => write!(f, "{} {}", period, label),
            ViewKey::Hierarchy(levels) => write!(f, "{}", levels.join(" / ")),
            ViewKey::Bin { lower, upper } => write!(f, "[{}, {}]", lower, upper),
        }
    }
}

impl From<String> for ViewKey {
    fn from(label: String) -> Self {
        ViewKey::Label(label)
    }
}

impl From<i32> for ViewKey {
    fn from(period: i32) -> Self {
        ViewKey::Period(period)
    }
}

impl From<u32> for ViewKey {
    fn from(month: u32) -> Self {
        ViewKey::Period(month as i32)
    }
}

impl From<(i32, u32)> for ViewKey {
    fn from((year, month): (i32, u32)) -> Self {
        ViewKey::YearMonth(year, month)
    }
}

impl From<(i32, String)> for ViewKey {
    fn from((period, label): (i32, String)) -> Self {
        ViewKey::PeriodLabel(period, label)
    }
}

impl From<(String, String, String)> for ViewKey {
    fn from((first, second, third): (String, String, String)) -> Self {
        ViewKey::Hierarchy(vec![first, second, third])
    }
}

/// Value attached to a view row. `Missing` serialises as `null` and stands for
/// "no data", e.g. a failure percentage for a year without launches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ViewValue {
    Count(usize),
    Number(f64),
    Leader { label: String, count: usize },
    Series { count: usize, rolling_mean: Option<f64> },
    Missing,
}

impl From<Option<f64>> for ViewValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(ViewValue::Missing, ViewValue::Number)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewRow {
    pub key: ViewKey,
    pub value: ViewValue,
}

impl ViewRow {
    pub fn new(key: impl Into<ViewKey>, value: ViewValue) -> Self {
        Self { key: key.into(), value }
    }
}

/// One named aggregate produced by the pipeline, ready for a presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewResult {
    pub name: String,
    pub parameters: serde_json::Value,
    pub rows: Vec<ViewRow>,
}

impl ViewResult {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

pub type ViewSet = BTreeMap<String, ViewResult>;
