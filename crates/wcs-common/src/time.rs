//! Temporal extent of a coverage.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Begin/end positions of a coverage's temporal domain, as advertised.
///
/// Values are kept verbatim; servers use a variety of ISO 8601 profiles
/// (and sometimes non-Gregorian calendars), so parsing is opt-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeLimits {
    pub begin: String,
    pub end: String,
}

impl TimeLimits {
    pub fn new(begin: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            begin: begin.into(),
            end: end.into(),
        }
    }

    /// Parse both positions into UTC datetimes.
    pub fn parse(&self) -> Result<(DateTime<Utc>, DateTime<Utc>), TimeParseError> {
        Ok((parse_iso8601(&self.begin)?, parse_iso8601(&self.end)?))
    }
}

/// Parse an ISO 8601 time position.
///
/// Accepts RFC 3339, a naive datetime (assumed UTC, optional fractional
/// seconds) or a bare date.
pub fn parse_iso8601(s: &str) -> Result<DateTime<Utc>, TimeParseError> {
    let s = s.trim();

    // Try full datetime with timezone
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    // Try without timezone (assume UTC)
    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(Utc.from_utc_datetime(&ndt));
    }

    // Try date only
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(ndt) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&ndt));
        }
    }

    Err(TimeParseError::InvalidFormat(s.to_string()))
}

#[derive(Debug, thiserror::Error)]
pub enum TimeParseError {
    #[error("Invalid time format: {0}")]
    InvalidFormat(String),
}
