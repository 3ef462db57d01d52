//! Normalization of caller-supplied analysis timestamps.
//!
//! Clients send whatever their platform produces: JavaScript `toISOString()`,
//! naive ISO strings, or the slash-separated local time the analysis service
//! writes. Everything is reduced to a naive wall-clock time at second
//! precision. When an offset is present the wall-clock time is kept as
//! written, not shifted to UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound};

use crate::constants::ANALYSIS_DATE_FORMAT;
use crate::error::ValidationError;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Parse a timestamp string into the normalized `analysis_date`.
pub fn parse_analysis_date(raw: &str) -> Result<NaiveDateTime, ValidationError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(ValidationError::InvalidTimestamp(raw.to_owned()));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.naive_local().trunc_subsecs(0));
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Ok(dt.naive_local().trunc_subsecs(0));
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(dt.trunc_subsecs(0));
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Ok(dt.naive_local());
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    Err(ValidationError::InvalidTimestamp(raw.to_owned()))
}

/// Render an `analysis_date` in the `YYYY-MM-DD HH:MM:SS` wire format.
pub fn format_analysis_date(dt: &NaiveDateTime) -> String {
    dt.format(ANALYSIS_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalized(raw: &str) -> String {
        format_analysis_date(&parse_analysis_date(raw).unwrap())
    }

    #[test]
    fn naive_iso_timestamp() {
        assert_eq!(normalized("2024-01-15T10:30:00"), "2024-01-15 10:30:00");
    }

    #[test]
    fn javascript_iso_string_keeps_wall_clock() {
        assert_eq!(normalized("2024-01-15T10:30:00.123Z"), "2024-01-15 10:30:00");
        assert_eq!(normalized("2024-01-15T10:30:00+07:00"), "2024-01-15 10:30:00");
    }

    #[test]
    fn offset_without_colon_keeps_wall_clock() {
        assert_eq!(normalized("2024-01-15T10:30:00+0700"), "2024-01-15 10:30:00");
        assert_eq!(normalized("2024-01-15 10:30:00.5-0300"), "2024-01-15 10:30:00");
    }

    #[test]
    fn already_normalized_is_unchanged() {
        assert_eq!(normalized("2024-01-15 10:30:00"), "2024-01-15 10:30:00");
    }

    #[test]
    fn analysis_service_slash_format() {
        assert_eq!(normalized("2024/01/15 10:30:45"), "2024-01-15 10:30:45");
    }

    #[test]
    fn minute_precision_and_bare_date() {
        assert_eq!(normalized("2024-01-15T10:30"), "2024-01-15 10:30:00");
        assert_eq!(normalized("2024-01-15"), "2024-01-15 00:00:00");
    }

    #[test]
    fn rfc2822() {
        assert_eq!(normalized("Mon, 15 Jan 2024 10:30:00 +0000"), "2024-01-15 10:30:00");
    }

    #[test]
    fn fractional_seconds_are_truncated() {
        assert_eq!(normalized("2024-01-15 10:30:59.999"), "2024-01-15 10:30:59");
    }

    #[test]
    fn rejects_garbage() {
        for raw in ["", "   ", "yesterday", "2024-13-45T10:00:00", "15/01/2024"] {
            assert_eq!(
                parse_analysis_date(raw),
                Err(ValidationError::InvalidTimestamp(raw.to_owned())),
                "{raw:?} should be rejected"
            );
        }
    }
}
