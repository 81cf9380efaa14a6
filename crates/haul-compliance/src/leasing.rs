//! # Truth-in-Leasing Evaluator (49 CFR Part 376)
//!
//! An owner-operator's equipment lease must be in writing, signed, and
//! dated. Unsigned and signed-but-undated are separate failures: a signed
//! lease with no date reports only the date violation.

use crate::record::{parse_date_field, Driver, FieldTime};
use crate::result::{messages, ValidationResult, ViolationKind};
use crate::rule::{EvaluationContext, Rule, RuleSet};

/// The leasing rule set, in evaluation order.
pub fn rules() -> RuleSet<Driver> {
    RuleSet::new().with_rule(LeaseSigned).with_rule(LeaseDated)
}

/// Evaluate Truth-in-Leasing compliance.
pub fn validate_leasing_compliance(
    driver: &Driver,
    ctx: &EvaluationContext<'_>,
) -> ValidationResult {
    rules().evaluate(driver, ctx)
}

#[derive(Debug)]
struct LeaseSigned;

impl Rule<Driver> for LeaseSigned {
    fn kind(&self) -> ViolationKind {
        ViolationKind::LeaseNotSigned
    }

    fn check(&self, driver: &Driver, _ctx: &EvaluationContext<'_>) -> Option<String> {
        (!driver.lease_agreement_signed).then(|| messages::LEASE_NOT_SIGNED.to_string())
    }
}

#[derive(Debug)]
struct LeaseDated;

impl Rule<Driver> for LeaseDated {
    fn kind(&self) -> ViolationKind {
        ViolationKind::LeaseDateMissing
    }

    fn check(&self, driver: &Driver, _ctx: &EvaluationContext<'_>) -> Option<String> {
        if !driver.lease_agreement_signed {
            return None;
        }
        let raw = driver.lease_agreement_date.as_deref();
        match parse_date_field("lease_agreement_date", raw) {
            FieldTime::At(_) => None,
            FieldTime::Missing => Some(format!(
                "{} for a signed lease agreement",
                messages::LEASE_DATE_MISSING
            )),
            FieldTime::Malformed => Some(format!(
                "{}: {:?} is not a valid date",
                messages::LEASE_DATE_MISSING,
                raw.unwrap_or_default()
            )),
        }
    }
}
