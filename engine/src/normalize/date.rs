// Launch timestamps come as "Fri Aug 07, 2020 05:12 UTC", or without the
// time and zone for older launches ("Fri Sep 01, 1989").
use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::error::RecordError;

const DATE_TIME_FORMAT: &str = "%b %d, %Y %H:%M";
const DATE_ONLY_FORMAT: &str = "%b %d, %Y";
const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchDate {
    pub year: i32,
    pub month: u32,
}

/// Parses a launch timestamp into its calendar year and month.
///
/// The full form with time and a trailing alphabetic zone token is tried
/// first, then the date-only form. Anything else is a `DateFormat` error.
/// The leading weekday has to be an English abbreviation but is not checked
/// against the date.
pub fn parse_launch_date(text: &str) -> Result<LaunchDate, RecordError> {
    let text = text.trim();
    let date = strip_weekday(text)
        .and_then(|rest| {
            parse_with_time_and_zone(rest)
                .or_else(|| NaiveDate::parse_from_str(rest, DATE_ONLY_FORMAT).ok())
        })
        .ok_or_else(|| RecordError::DateFormat {
            input: text.to_string(),
        })?;

    Ok(LaunchDate {
        year: date.year(),
        month: date.month(),
    })
}

fn strip_weekday(text: &str) -> Option<&str> {
    let (weekday, rest) = text.split_once(' ')?;
    WEEKDAYS
        .iter()
        .any(|day| day.eq_ignore_ascii_case(weekday))
        .then(|| rest.trim_start())
}

fn parse_with_time_and_zone(text: &str) -> Option<NaiveDate> {
    let (date_time, zone) = text.rsplit_once(' ')?;
    if zone.is_empty() || !zone.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    NaiveDateTime::parse_from_str(date_time, DATE_TIME_FORMAT)
        .ok()
        .map(|dt| dt.date())
}
