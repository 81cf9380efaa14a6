//! # Record Snapshots
//!
//! Plain records supplied by the caller for a single evaluation. The engine
//! only reads them. Timestamps are kept as the raw strings received from
//! storage and are parsed at evaluation time, so a malformed value surfaces
//! as a violation instead of being lost at load time.

use serde::{Deserialize, Serialize};

use haul_core::{DriverId, ShipmentId, Timestamp};

/// Outcome of the driver's most recent FMCSA Clearinghouse query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearinghouseStatus {
    /// Query returned no violations.
    Clear,
    /// Query has been requested but not completed (e.g. awaiting driver consent).
    Pending,
    /// Query reported a drug or alcohol program violation.
    Violation,
}

impl ClearinghouseStatus {
    /// Canonical snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Pending => "pending",
            Self::Violation => "violation",
        }
    }
}

impl std::fmt::Display for ClearinghouseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operational state of a driver, owned by the surrounding system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverStatus {
    /// Eligible for dispatch, subject to compliance checks.
    Active,
    /// Removed from safety-sensitive functions pending resolution.
    Suspended,
    /// Not currently working for the carrier.
    Inactive,
}

impl DriverStatus {
    /// Canonical snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Suspended => "suspended",
            Self::Inactive => "inactive",
        }
    }
}

impl std::fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Driver snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    /// Carrier-issued driver identifier.
    pub driver_id: DriverId,
    /// Operational state.
    pub status: DriverStatus,
    /// Hours driven since the last qualifying off-duty period.
    pub hos_driving_hours_today: f64,
    /// Hours on duty (driving plus other work) since the last qualifying off-duty period.
    pub hos_on_duty_hours_today: f64,
    /// Start of the most recent off-duty rest period (RFC 3339).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_off_duty: Option<String>,
    /// Result of the most recent Clearinghouse query.
    pub clearinghouse_status: ClearinghouseStatus,
    /// When the most recent annual Clearinghouse query ran (RFC 3339).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clearinghouse_last_query: Option<String>,
    /// Whether a reported violation has completed return-to-duty.
    /// Only meaningful when `clearinghouse_status` is `violation`.
    #[serde(default)]
    pub clearinghouse_resolved: bool,
    /// Whether the Truth-in-Leasing agreement is signed.
    #[serde(default)]
    pub lease_agreement_signed: bool,
    /// Date the lease agreement was signed (RFC 3339 or `YYYY-MM-DD`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lease_agreement_date: Option<String>,
}

impl Driver {
    /// Copy of this snapshot with a different status. Used by callers that
    /// apply a [`StatusTransition`](crate::status::StatusTransition).
    pub fn with_status(&self, status: DriverStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}

/// Shipment snapshot. Opaque to the rules; carried for addressing and audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    /// Carrier-issued shipment identifier.
    pub shipment_id: ShipmentId,
    /// Free-form reference (e.g. container or booking number).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// Per-dispatch route estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Projected driving hours to complete the dispatch.
    pub estimated_drive_time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
}

impl Route {
    /// Route with only a drive-time estimate.
    pub fn with_drive_time(hours: f64) -> Self {
        Self {
            estimated_drive_time: hours,
            origin: None,
            destination: None,
        }
    }
}

/// Outcome of parsing an optional timestamp field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldTime {
    Missing,
    Malformed,
    At(Timestamp),
}

/// Parse an optional RFC 3339 record field, logging malformed values.
pub(crate) fn parse_field(field: &'static str, raw: Option<&str>) -> FieldTime {
    parse_with(field, raw, Timestamp::parse_lenient)
}

/// Parse an optional date-or-datetime record field, logging malformed values.
pub(crate) fn parse_date_field(field: &'static str, raw: Option<&str>) -> FieldTime {
    parse_with(field, raw, Timestamp::parse_date_or_datetime)
}

fn parse_with(
    field: &'static str,
    raw: Option<&str>,
    parse: fn(&str) -> Result<Timestamp, haul_core::HaulError>,
) -> FieldTime {
    match raw {
        None => FieldTime::Missing,
        Some(s) if s.trim().is_empty() => FieldTime::Missing,
        Some(s) => match parse(s) {
            Ok(ts) => FieldTime::At(ts),
            Err(e) => {
                tracing::warn!(field, value = %s, error = %e, "malformed timestamp in record, failing closed");
                FieldTime::Malformed
            }
        },
    }
}
