//! # Temporal Types: UTC-Only Timestamps
//!
//! Defines `Timestamp`, a UTC timestamp truncated to seconds precision.
//! Every elapsed-time rule (10-hour off-duty reset, annual Clearinghouse
//! query) is computed between two `Timestamp`s, so both sides of every
//! comparison share the same zone and resolution.
//!
//! Two parsers are provided:
//!
//! - [`Timestamp::parse()`] accepts only the `Z` suffix. Use it for values
//!   this stack produces itself.
//! - [`Timestamp::parse_lenient()`] accepts any RFC 3339 offset and converts
//!   to UTC. Use it for snapshots loaded from carrier systems, which emit
//!   local offsets (e.g. `2026-03-01T06:00:00-05:00`).

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::HaulError;

/// A UTC-only timestamp, truncated to seconds precision.
///
/// # Construction
///
/// - [`Timestamp::now()`]: current UTC time, truncated.
/// - [`Timestamp::from_utc()`]: from a `DateTime<Utc>`, truncating sub-seconds.
/// - [`Timestamp::parse()`]: from an ISO8601 string, rejecting non-UTC offsets.
/// - [`Timestamp::parse_lenient()`]: from any RFC 3339 string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp from the current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`, truncating sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// Parse a timestamp from an RFC 3339 string with a `Z` suffix.
    ///
    /// Explicit offsets, including `+00:00`, are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`HaulError::InvalidTimestamp`] if the string is not valid
    /// RFC 3339 or does not end in `Z`.
    pub fn parse(s: &str) -> Result<Self, HaulError> {
        if !s.ends_with('Z') {
            return Err(HaulError::InvalidTimestamp {
                input: s.to_string(),
                reason: "must use Z suffix (UTC only)".into(),
            });
        }
        Self::parse_lenient(s)
    }

    /// Parse a timestamp from an RFC 3339 string, accepting any timezone
    /// offset and converting to UTC.
    pub fn parse_lenient(s: &str) -> Result<Self, HaulError> {
        let dt = DateTime::parse_from_rfc3339(s.trim()).map_err(|e| {
            HaulError::InvalidTimestamp {
                input: s.to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))))
    }

    /// Parse a record field that may be either an RFC 3339 timestamp or a
    /// bare calendar date (`YYYY-MM-DD`, taken as midnight UTC).
    ///
    /// Signed paperwork such as lease agreements is often dated without a
    /// time of day.
    pub fn parse_date_or_datetime(s: &str) -> Result<Self, HaulError> {
        let trimmed = s.trim();
        if let Ok(ts) = Self::parse_lenient(trimmed) {
            return Ok(ts);
        }
        let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|e| {
            HaulError::InvalidTimestamp {
                input: s.to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self(date.and_time(NaiveTime::MIN).and_utc()))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Time elapsed from `earlier` to `self`. Negative when `earlier` is
    /// actually in the future.
    pub fn since(&self, earlier: &Timestamp) -> Duration {
        self.0.signed_duration_since(earlier.0)
    }

    /// Elapsed time from `earlier` to `self` in fractional hours.
    pub fn hours_since(&self, earlier: &Timestamp) -> f64 {
        self.since(earlier).num_seconds() as f64 / 3600.0
    }

    /// Shift by a signed duration. Saturates to `self` on overflow.
    pub fn offset(&self, delta: Duration) -> Self {
        Self(self.0.checked_add_signed(delta).unwrap_or(self.0))
    }

    /// Render as ISO8601 with Z suffix (e.g., `2026-01-15T12:00:00Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl std::str::FromStr for Timestamp {
    type Err = HaulError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_lenient(s)
    }
}

/// Truncate a `DateTime<Utc>` to seconds precision (discard nanoseconds).
fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}
