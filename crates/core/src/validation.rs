//! Input rules shared by every create/update operation.
//!
//! Required fields are checked in a fixed order so the error always names the
//! first missing one. Date and time strings are parsed with the same rules the
//! serializer's output satisfies, so rendered values parse back unchanged.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

use crate::errors::{OpsError, OpsResult};

/// Format of `start_time` / `end_time` on the wire.
pub const TIME_OF_DAY_FORMAT: &str = "%H:%M";

const OFFSET_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M%:z",
];
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Fails with the first field (in slice order) flagged as missing.
pub fn check_required(fields: &[(&'static str, bool)]) -> OpsResult<()> {
    match fields.iter().find(|(_, missing)| *missing) {
        Some((field, _)) => Err(OpsError::MissingField(field)),
        None => Ok(()),
    }
}

/// Parses an ISO-8601 date-time.
///
/// A trailing `Z` is read as `+00:00`. Values without an offset, including a
/// bare `YYYY-MM-DD`, are taken as UTC.
pub fn parse_scheduled_date(input: &str) -> OpsResult<DateTime<FixedOffset>> {
    let input = input.trim();
    let normalized = match input.strip_suffix('Z').or_else(|| input.strip_suffix('z')) {
        Some(stripped) => format!("{}+00:00", stripped),
        None => input.to_string(),
    };
    let utc = FixedOffset::east_opt(0).ok_or(OpsError::InvalidDateTime)?;

    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(&normalized, format) {
            return Ok(parsed);
        }
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(&normalized) {
        return Ok(parsed);
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, format) {
            return Ok(utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| utc.from_utc_datetime(&naive))
        .ok_or(OpsError::InvalidDateTime)
}

/// Parses a strict 24-hour `HH:MM` time of day.
pub fn parse_time_of_day(input: &str) -> OpsResult<NaiveTime> {
    let bytes = input.as_bytes();
    let well_formed = bytes.len() == 5
        && bytes[2] == b':'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 2 || b.is_ascii_digit());

    if !well_formed {
        return Err(OpsError::InvalidDateTime);
    }

    NaiveTime::parse_from_str(input, TIME_OF_DAY_FORMAT).map_err(|_| OpsError::InvalidDateTime)
}

/// Renders a date-time the way `parse_scheduled_date` reads it back.
pub fn render_datetime(value: &DateTime<FixedOffset>) -> String {
    value.to_rfc3339()
}

pub fn render_time_of_day(value: &NaiveTime) -> String {
    value.format(TIME_OF_DAY_FORMAT).to_string()
}
