//! # Validation Results
//!
//! [`ValidationResult`] is the single output shape of every evaluator: an
//! ordered list of [`Violation`]s. Validity is derived from the list, so
//! `valid()` can never disagree with `errors()`.
//!
//! ## Message Contract
//!
//! Dispatch screens, API handlers and test suites match on substrings of
//! the English messages. The fragments in [`messages`] are part of the
//! public contract and every message produced for a [`ViolationKind`]
//! contains that kind's fragment verbatim.

use serde::{Serialize, Serializer};

use haul_core::Regulation;

/// Message fragments callers match on. Changing any of these is a breaking
/// change.
pub mod messages {
    /// 49 CFR 395.3(a)(3).
    pub const DRIVING_LIMIT: &str = "11-hour driving limit";
    /// 49 CFR 395.3(a)(2).
    pub const ON_DUTY_LIMIT: &str = "14-hour on-duty limit";
    /// 49 CFR 395.3(a)(1).
    pub const OFF_DUTY_RESET: &str = "10-hour off-duty";
    pub const INVALID_HOS_INPUT: &str = "HOS hours must be finite and non-negative";
    pub const QUERY_PENDING: &str = "Clearinghouse query must be completed before assignment";
    pub const UNRESOLVED_VIOLATION: &str = "unresolved Clearinghouse violation";
    pub const QUERY_OVERDUE: &str = "Annual Clearinghouse query is overdue";
    pub const LEASE_NOT_SIGNED: &str = "Lease agreement must be signed per 49 CFR Part 376";
    pub const LEASE_DATE_MISSING: &str = "Lease agreement date is required";
    pub const DRIVER_NOT_ACTIVE: &str = "Driver is not active";
}

/// Every distinguishable reason a dispatch can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Hour counters or trip estimate are NaN, infinite or negative.
    InvalidHosInput,
    /// Driving hours plus trip would exceed the daily driving limit.
    DrivingLimit,
    /// On-duty hours plus trip would exceed the duty window.
    OnDutyLimit,
    /// The driver has not completed the required off-duty rest.
    OffDutyReset,
    /// Clearinghouse query not yet completed (assignment only).
    ClearinghouseQueryPending,
    /// Clearinghouse reports a violation without return-to-duty.
    UnresolvedClearinghouseViolation,
    /// Annual Clearinghouse query older than the allowed age, missing, or unreadable.
    ClearinghouseQueryOverdue,
    /// Lease agreement unsigned.
    LeaseNotSigned,
    /// Lease agreement signed but undated or with an unreadable date.
    LeaseDateMissing,
    /// Driver status is not `active` (assignment only).
    DriverNotActive,
}

impl ViolationKind {
    /// Canonical snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidHosInput => "invalid_hos_input",
            Self::DrivingLimit => "driving_limit",
            Self::OnDutyLimit => "on_duty_limit",
            Self::OffDutyReset => "off_duty_reset",
            Self::ClearinghouseQueryPending => "clearinghouse_query_pending",
            Self::UnresolvedClearinghouseViolation => "unresolved_clearinghouse_violation",
            Self::ClearinghouseQueryOverdue => "clearinghouse_query_overdue",
            Self::LeaseNotSigned => "lease_not_signed",
            Self::LeaseDateMissing => "lease_date_missing",
            Self::DriverNotActive => "driver_not_active",
        }
    }

    /// The contractual message fragment for this kind.
    pub fn fragment(&self) -> &'static str {
        match self {
            Self::InvalidHosInput => messages::INVALID_HOS_INPUT,
            Self::DrivingLimit => messages::DRIVING_LIMIT,
            Self::OnDutyLimit => messages::ON_DUTY_LIMIT,
            Self::OffDutyReset => messages::OFF_DUTY_RESET,
            Self::ClearinghouseQueryPending => messages::QUERY_PENDING,
            Self::UnresolvedClearinghouseViolation => messages::UNRESOLVED_VIOLATION,
            Self::ClearinghouseQueryOverdue => messages::QUERY_OVERDUE,
            Self::LeaseNotSigned => messages::LEASE_NOT_SIGNED,
            Self::LeaseDateMissing => messages::LEASE_DATE_MISSING,
            Self::DriverNotActive => messages::DRIVER_NOT_ACTIVE,
        }
    }

    /// The regulation family, or `None` for carrier-policy checks.
    pub fn regulation(&self) -> Option<Regulation> {
        match self {
            Self::InvalidHosInput
            | Self::DrivingLimit
            | Self::OnDutyLimit
            | Self::OffDutyReset => Some(Regulation::HoursOfService),
            Self::ClearinghouseQueryPending
            | Self::UnresolvedClearinghouseViolation
            | Self::ClearinghouseQueryOverdue => Some(Regulation::Clearinghouse),
            Self::LeaseNotSigned | Self::LeaseDateMissing => Some(Regulation::TruthInLeasing),
            Self::DriverNotActive => None,
        }
    }

    /// Specific CFR section cited in audit output.
    pub fn citation(&self) -> &'static str {
        match self {
            Self::InvalidHosInput => "49 CFR 395.8",
            Self::DrivingLimit => "49 CFR 395.3(a)(3)",
            Self::OnDutyLimit => "49 CFR 395.3(a)(2)",
            Self::OffDutyReset => "49 CFR 395.3(a)(1)",
            Self::ClearinghouseQueryPending => "49 CFR 382.701(a)",
            Self::UnresolvedClearinghouseViolation => "49 CFR 382.501",
            Self::ClearinghouseQueryOverdue => "49 CFR 382.701(b)",
            Self::LeaseNotSigned => "49 CFR 376.11(a)",
            Self::LeaseDateMissing => "49 CFR 376.12(b)",
            Self::DriverNotActive => "carrier dispatch policy",
        }
    }
}

impl std::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fired rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// What was violated.
    pub kind: ViolationKind,
    /// Human-readable message. Always contains `kind.fragment()`.
    pub message: String,
}

impl Serialize for Violation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct View<'a> {
            kind: ViolationKind,
            citation: &'static str,
            message: &'a str,
        }
        View {
            kind: self.kind,
            citation: self.kind.citation(),
            message: &self.message,
        }
        .serialize(serializer)
    }
}

/// Ordered outcome of one or more rule evaluations.
///
/// Serializes as `{ "valid", "errors", "violations" }`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    violations: Vec<Violation>,
}

impl ValidationResult {
    /// A result with no violations.
    pub fn pass() -> Self {
        Self::default()
    }

    /// True iff no rule fired.
    pub fn valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Error messages in rule evaluation order.
    pub fn errors(&self) -> impl Iterator<Item = &str> + '_ {
        self.violations.iter().map(|v| v.message.as_str())
    }

    /// Owned copy of the error messages.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors().map(str::to_owned).collect()
    }

    /// Structured violations in rule evaluation order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Same as [`valid()`](Self::valid).
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Whether a violation of `kind` was recorded.
    pub fn has(&self, kind: ViolationKind) -> bool {
        self.violations.iter().any(|v| v.kind == kind)
    }

    /// Whether any error message contains `fragment`.
    pub fn mentions(&self, fragment: &str) -> bool {
        self.errors().any(|e| e.contains(fragment))
    }

    /// Append a violation.
    pub fn push(&mut self, kind: ViolationKind, message: impl Into<String>) {
        self.violations.push(Violation {
            kind,
            message: message.into(),
        });
    }

    /// Append all violations of `other`, preserving order.
    pub fn extend(&mut self, other: ValidationResult) {
        self.violations.extend(other.violations);
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct View<'a> {
            valid: bool,
            errors: Vec<&'a str>,
            violations: &'a [Violation],
        }
        View {
            valid: self.valid(),
            errors: self.errors().collect(),
            violations: &self.violations,
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [ViolationKind; 10] = [
        ViolationKind::InvalidHosInput,
        ViolationKind::DrivingLimit,
        ViolationKind::OnDutyLimit,
        ViolationKind::OffDutyReset,
        ViolationKind::ClearinghouseQueryPending,
        ViolationKind::UnresolvedClearinghouseViolation,
        ViolationKind::ClearinghouseQueryOverdue,
        ViolationKind::LeaseNotSigned,
        ViolationKind::LeaseDateMissing,
        ViolationKind::DriverNotActive,
    ];

    #[test]
    fn empty_result_is_valid() {
        let r = ValidationResult::pass();
        assert!(r.valid());
        assert_eq!(r.errors().count(), 0);
    }

    #[test]
    fn push_invalidates_and_preserves_order() {
        let mut r = ValidationResult::pass();
        r.push(ViolationKind::OnDutyLimit, "on-duty first");
        r.push(ViolationKind::DrivingLimit, "then this");
        assert!(!r.valid());
        assert_eq!(r.error_messages(), vec!["on-duty first", "then this"]);
        assert!(r.has(ViolationKind::DrivingLimit));
        assert!(!r.has(ViolationKind::OffDutyReset));
    }

    #[test]
    fn extend_appends_in_order() {
        let mut a = ValidationResult::pass();
        a.push(ViolationKind::LeaseNotSigned, "a");
        let mut b = ValidationResult::pass();
        b.push(ViolationKind::DrivingLimit, "b");
        a.extend(b);
        assert_eq!(a.error_messages(), vec!["a", "b"]);
    }

    #[test]
    fn as_str_matches_serde_name() {
        for kind in ALL_KINDS {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn regulated_kinds_cite_their_part() {
        for kind in ALL_KINDS {
            if let Some(reg) = kind.regulation() {
                let part = reg.cfr_part().trim_start_matches("49 CFR Part ");
                assert!(
                    kind.citation().contains(&format!("49 CFR {part}")),
                    "{kind} citation {} does not match {}",
                    kind.citation(),
                    reg.cfr_part()
                );
            }
        }
    }

    #[test]
    fn serializes_valid_and_errors() {
        let mut r = ValidationResult::pass();
        r.push(ViolationKind::LeaseDateMissing, "Lease agreement date is required");
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["valid"], false);
        assert_eq!(v["errors"][0], "Lease agreement date is required");
        assert_eq!(v["violations"][0]["kind"], "lease_date_missing");
        assert_eq!(v["violations"][0]["citation"], "49 CFR 376.12(b)");
    }
}
