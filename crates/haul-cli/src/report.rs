//! # Report Rendering
//!
//! One [`Report`] per command invocation, printed as human-readable text or
//! as a single JSON document. The JSON form carries the `input_digest`
//! of every record, the policy and the evaluation instant, so a logged
//! decision can be matched to the exact inputs it was computed from.

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use haul_compliance::{CompliancePolicy, Driver, Route, Shipment, StatusTransition, ValidationResult};
use haul_core::{snapshot_digest, ContentDigest, DriverId, ShipmentId, Timestamp};

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary.
    Text,
    /// Machine-readable JSON document.
    Json,
}

/// Everything an evaluation was computed from.
#[derive(Debug, Serialize)]
pub struct Inputs<'a> {
    pub driver: &'a Driver,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipment: Option<&'a Shipment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<&'a Route>,
    pub policy: &'a CompliancePolicy,
    pub as_of: Timestamp,
}

impl Inputs<'_> {
    /// Digest of the full input snapshot.
    pub fn digest(&self) -> Result<ContentDigest> {
        Ok(snapshot_digest(self)?)
    }
}

/// Outcome of one command.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    /// Which evaluator ran (`hos`, `clearinghouse`, `leasing`, `assign`, `status`).
    pub check: &'static str,
    pub driver_id: &'a DriverId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipment_id: Option<&'a ShipmentId>,
    pub as_of: Timestamp,
    pub input_digest: String,
    pub result: &'a ValidationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusTransition>,
}

impl Report<'_> {
    /// Render in the requested format.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Text => Ok(self.render_text()),
        }
    }

    fn render_text(&self) -> String {
        let subject = match self.shipment_id {
            Some(shipment) => format!("{} -> {shipment}", self.driver_id),
            None => self.driver_id.to_string(),
        };
        let verdict = if self.result.valid() {
            "PASS".to_string()
        } else {
            format!("REJECTED ({} violation(s))", self.result.len())
        };
        let mut out = format!("{} {subject} as of {}: {verdict}\n", self.check, self.as_of);
        for v in self.result.violations() {
            out.push_str(&format!("  - [{}] {}\n", v.kind.citation(), v.message));
        }
        if let Some(t) = &self.status {
            match t.reason {
                Some(reason) if t.changed() => {
                    out.push_str(&format!("  status: {} -> {} ({reason})\n", t.from, t.to))
                }
                _ => out.push_str(&format!("  status: {} (unchanged)\n", t.to)),
            }
        }
        out.push_str(&format!("  input: {}\n", self.input_digest));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use haul_compliance::{DriverStatus, ViolationKind};

    fn report<'a>(id: &'a DriverId, result: &'a ValidationResult) -> Report<'a> {
        Report {
            check: "hos",
            driver_id: id,
            shipment_id: None,
            as_of: Timestamp::parse("2026-03-01T12:00:00Z").unwrap(),
            input_digest: "sha256:00".into(),
            result,
            status: None,
        }
    }

    #[test]
    fn text_pass() {
        let id = DriverId::new("DRV-1").unwrap();
        let r = ValidationResult::pass();
        let text = report(&id, &r).render(OutputFormat::Text).unwrap();
        assert!(text.starts_with("hos driver:DRV-1 as of 2026-03-01T12:00:00Z: PASS"));
    }

    #[test]
    fn text_lists_violations_with_citations() {
        let id = DriverId::new("DRV-1").unwrap();
        let mut r = ValidationResult::pass();
        r.push(ViolationKind::DrivingLimit, "Trip would exceed the 11-hour driving limit");
        let text = report(&id, &r).render(OutputFormat::Text).unwrap();
        assert!(text.contains("REJECTED (1 violation(s))"));
        assert!(text.contains("[49 CFR 395.3(a)(3)] Trip would exceed"));
    }

    #[test]
    fn text_shows_status_change() {
        let id = DriverId::new("DRV-1").unwrap();
        let r = ValidationResult::pass();
        let mut rep = report(&id, &r);
        rep.status = Some(StatusTransition {
            from: DriverStatus::Active,
            to: DriverStatus::Suspended,
            reason: Some(ViolationKind::UnresolvedClearinghouseViolation),
        });
        let text = rep.render(OutputFormat::Text).unwrap();
        assert!(text.contains("status: active -> suspended (unresolved_clearinghouse_violation)"));
    }

    #[test]
    fn json_shape() {
        let id = DriverId::new("DRV-1").unwrap();
        let mut r = ValidationResult::pass();
        r.push(ViolationKind::LeaseNotSigned, "Lease agreement must be signed per 49 CFR Part 376");
        let json = report(&id, &r).render(OutputFormat::Json).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["check"], "hos");
        assert_eq!(v["driver_id"], "DRV-1");
        assert_eq!(v["result"]["valid"], false);
        assert_eq!(v["result"]["violations"][0]["kind"], "lease_not_signed");
        assert!(v.get("shipment_id").is_none());
        assert!(v.get("status").is_none());
    }

    #[test]
    fn input_digest_tracks_content() {
        let driver: Driver = serde_json::from_str(
            r#"{"driver_id":"DRV-1","status":"active","hos_driving_hours_today":1,"hos_on_duty_hours_today":1,"clearinghouse_status":"clear"}"#,
        )
        .unwrap();
        let policy = CompliancePolicy::federal();
        let at = Timestamp::parse("2026-03-01T12:00:00Z").unwrap();
        let a = Inputs { driver: &driver, shipment: None, route: None, policy: &policy, as_of: at };
        let short = Route::with_drive_time(1.0);
        let b = Inputs { driver: &driver, shipment: None, route: Some(&short), policy: &policy, as_of: at };
        assert_eq!(a.digest().unwrap(), a.digest().unwrap());
        assert_ne!(a.digest().unwrap(), b.digest().unwrap());
    }
}
