//! # Clearinghouse Evaluator (49 CFR Part 382)
//!
//! Two rule sets share the same rules:
//!
//! - [`standalone_rules()`]: the compliance check usable outside a
//!   dispatch: unresolved violation, then annual query staleness.
//! - [`assignment_rules()`]: the dispatch-time check. Adds the pending
//!   query block in front, so a driver whose query has not completed can
//!   never be assigned even though a pending query is not itself a
//!   standalone compliance failure.
//!
//! The annual query is stale when strictly more than
//! `clearinghouse_query_max_age_days` whole days have elapsed. Exactly 365
//! days passes. A missing, malformed or future-dated query fails closed.
//!
//! Detecting an unresolved violation does not suspend the driver. The
//! caller applies [`status_after_clearinghouse`](crate::status::status_after_clearinghouse).

use chrono::Duration;

use crate::record::{parse_field, ClearinghouseStatus, Driver, FieldTime};
use crate::result::{messages, ValidationResult, ViolationKind};
use crate::rule::{EvaluationContext, Rule, RuleSet};

/// Rules for the standalone compliance check.
pub fn standalone_rules() -> RuleSet<Driver> {
    RuleSet::new()
        .with_rule(UnresolvedViolation)
        .with_rule(AnnualQuery)
}

/// Rules applied when assigning a driver to a shipment.
pub fn assignment_rules() -> RuleSet<Driver> {
    RuleSet::new()
        .with_rule(QueryPending)
        .with_rule(UnresolvedViolation)
        .with_rule(AnnualQuery)
}

/// Standalone Clearinghouse compliance check.
pub fn validate_clearinghouse_compliance(
    driver: &Driver,
    ctx: &EvaluationContext<'_>,
) -> ValidationResult {
    standalone_rules().evaluate(driver, ctx)
}

#[derive(Debug)]
struct QueryPending;

impl Rule<Driver> for QueryPending {
    fn kind(&self) -> ViolationKind {
        ViolationKind::ClearinghouseQueryPending
    }

    fn check(&self, driver: &Driver, _ctx: &EvaluationContext<'_>) -> Option<String> {
        (driver.clearinghouse_status == ClearinghouseStatus::Pending)
            .then(|| messages::QUERY_PENDING.to_string())
    }
}

#[derive(Debug)]
struct UnresolvedViolation;

impl Rule<Driver> for UnresolvedViolation {
    fn kind(&self) -> ViolationKind {
        ViolationKind::UnresolvedClearinghouseViolation
    }

    fn check(&self, driver: &Driver, _ctx: &EvaluationContext<'_>) -> Option<String> {
        let unresolved = driver.clearinghouse_status == ClearinghouseStatus::Violation
            && !driver.clearinghouse_resolved;
        unresolved.then(|| {
            format!(
                "Driver has an {} and may not perform safety-sensitive functions until return-to-duty is complete",
                messages::UNRESOLVED_VIOLATION
            )
        })
    }
}

#[derive(Debug)]
struct AnnualQuery;

impl Rule<Driver> for AnnualQuery {
    fn kind(&self) -> ViolationKind {
        ViolationKind::ClearinghouseQueryOverdue
    }

    fn check(&self, driver: &Driver, ctx: &EvaluationContext<'_>) -> Option<String> {
        let max_days = ctx.policy().clearinghouse_query_max_age_days;
        let raw = driver.clearinghouse_last_query.as_deref();
        match parse_field("clearinghouse_last_query", raw) {
            FieldTime::Missing => Some(format!("{}: no query on record", messages::QUERY_OVERDUE)),
            FieldTime::Malformed => Some(format!(
                "{}: last query {:?} is not a valid timestamp",
                messages::QUERY_OVERDUE,
                raw.unwrap_or_default()
            )),
            FieldTime::At(last) => {
                let elapsed = ctx.as_of.since(&last);
                let Some(window) = Duration::try_days(max_days) else {
                    return Some(format!(
                        "{}: refresh window of {max_days} days is out of range",
                        messages::QUERY_OVERDUE
                    ));
                };
                if elapsed < Duration::zero() {
                    Some(format!(
                        "{}: recorded query {last} is later than the evaluation time {}",
                        messages::QUERY_OVERDUE,
                        ctx.as_of
                    ))
                } else if elapsed > window {
                    Some(format!(
                        "{}: last query {last} was {} days ago (max {max_days})",
                        messages::QUERY_OVERDUE,
                        elapsed.num_days()
                    ))
                } else {
                    None
                }
            }
        }
    }
}
