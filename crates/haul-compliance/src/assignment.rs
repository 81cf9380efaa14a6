//! # Assignment Validator
//!
//! The single gate a dispatcher calls before pairing a driver with a
//! shipment. Every family runs, every violation is kept:
//!
//! 1. operational status (only `active` drivers are dispatchable)
//! 2. Clearinghouse, assignment rule set (a pending query always blocks)
//! 3. Hours-of-Service for the candidate route
//! 4. Truth-in-Leasing
//!
//! The shipment does not influence any rule. It is carried for the
//! decision log.

use crate::clearinghouse;
use crate::hos;
use crate::leasing;
use crate::record::{Driver, DriverStatus, Route, Shipment};
use crate::result::{messages, ValidationResult, ViolationKind};
use crate::rule::{EvaluationContext, Rule, RuleSet};

/// Dispatch eligibility rules that belong to no regulatory family.
pub fn eligibility_rules() -> RuleSet<Driver> {
    RuleSet::new().with_rule(DriverActive)
}

/// Decide whether `driver` may be assigned to `shipment` over `route`.
pub fn validate_driver_assignment(
    driver: &Driver,
    shipment: &Shipment,
    route: &Route,
    ctx: &EvaluationContext<'_>,
) -> ValidationResult {
    let mut result = eligibility_rules().evaluate(driver, ctx);
    result.extend(clearinghouse::assignment_rules().evaluate(driver, ctx));
    result.extend(hos::validate_hos_compliance(driver, route, ctx));
    result.extend(leasing::validate_leasing_compliance(driver, ctx));

    tracing::info!(
        driver_id = %driver.driver_id,
        shipment_id = %shipment.shipment_id,
        as_of = %ctx.as_of,
        valid = result.valid(),
        violations = result.len(),
        "driver assignment evaluated"
    );
    result
}

#[derive(Debug)]
struct DriverActive;

impl Rule<Driver> for DriverActive {
    fn kind(&self) -> ViolationKind {
        ViolationKind::DriverNotActive
    }

    fn check(&self, driver: &Driver, _ctx: &EvaluationContext<'_>) -> Option<String> {
        (driver.status != DriverStatus::Active).then(|| {
            format!(
                "{}: current status is {}",
                messages::DRIVER_NOT_ACTIVE,
                driver.status
            )
        })
    }
}
