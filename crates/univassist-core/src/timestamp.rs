//! Local wall-clock timestamps as stored in the collections.
//!
//! Records are written as `YYYY-MM-DDTHH:MM:SS.ffffff` without an offset.
//! Parsing also accepts RFC 3339 (the offset is dropped and the local wall
//! time kept), minute precision, and bare dates.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::TimestampError;

const STORED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

pub fn format(at: NaiveDateTime) -> String {
    at.format(STORED_FORMAT).to_string()
}

pub fn parse(text: &str) -> Result<NaiveDateTime, TimestampError> {
    let text = text.trim();

    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Ok(at.naive_local());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(at) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(at);
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| TimestampError(text.to_string()))
}
