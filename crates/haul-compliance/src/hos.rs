//! # Hours-of-Service Evaluator (49 CFR Part 395)
//!
//! Decides whether dispatching a driver on a trip of
//! `route.estimated_drive_time` hours would break the property-carrying
//! driver limits:
//!
//! 1. **Input sanity**: hour counters and the trip estimate must be
//!    finite and non-negative. Anything else fails closed.
//! 2. **11-hour driving limit**: driven + trip must not exceed the limit.
//! 3. **14-hour on-duty limit**: on-duty + trip must not exceed the limit.
//! 4. **10-hour off-duty**: a driver with hours on the clock must have
//!    been off duty for the full rest period before a new dispatch.
//!
//! Limits are inclusive: exactly 11.00 projected driving hours passes.
//! Comparisons allow [`HOURS_EPSILON`] so decimal inputs such as
//! `10.99 + 0.01` land on the boundary instead of a binary rounding error
//! above it.

use crate::record::{parse_field, Driver, FieldTime, Route};
use crate::result::{messages, ValidationResult, ViolationKind};
use crate::rule::{EvaluationContext, Rule, RuleSet};

/// Tolerance for hour comparisons. Far below the one-minute resolution of
/// any electronic logging device.
pub const HOURS_EPSILON: f64 = 1e-9;

/// A driver paired with the candidate route.
#[derive(Debug, Clone, Copy)]
pub struct Trip<'a> {
    pub driver: &'a Driver,
    pub route: &'a Route,
}

/// The HOS rule set, in evaluation order.
pub fn rules<'a>() -> RuleSet<Trip<'a>> {
    RuleSet::new()
        .with_rule(HoursAreSane)
        .with_rule(DrivingLimit)
        .with_rule(OnDutyLimit)
        .with_rule(OffDutyReset)
}

/// Evaluate HOS compliance for dispatching `driver` on `route`.
pub fn validate_hos_compliance(
    driver: &Driver,
    route: &Route,
    ctx: &EvaluationContext<'_>,
) -> ValidationResult {
    rules().evaluate(&Trip { driver, route }, ctx)
}

fn exceeds(total: f64, limit: f64) -> bool {
    total > limit + HOURS_EPSILON
}

fn sane(hours: f64) -> bool {
    hours.is_finite() && hours >= 0.0
}

#[derive(Debug)]
struct HoursAreSane;

impl<'a> Rule<Trip<'a>> for HoursAreSane {
    fn kind(&self) -> ViolationKind {
        ViolationKind::InvalidHosInput
    }

    fn check(&self, trip: &Trip<'a>, _ctx: &EvaluationContext<'_>) -> Option<String> {
        let driving = trip.driver.hos_driving_hours_today;
        let on_duty = trip.driver.hos_on_duty_hours_today;
        let planned = trip.route.estimated_drive_time;
        if sane(driving) && sane(on_duty) && sane(planned) {
            return None;
        }
        Some(format!(
            "{}: driving={driving}, on_duty={on_duty}, estimated_drive_time={planned}",
            messages::INVALID_HOS_INPUT
        ))
    }
}

#[derive(Debug)]
struct DrivingLimit;

impl<'a> Rule<Trip<'a>> for DrivingLimit {
    fn kind(&self) -> ViolationKind {
        ViolationKind::DrivingLimit
    }

    fn check(&self, trip: &Trip<'a>, ctx: &EvaluationContext<'_>) -> Option<String> {
        let driven = trip.driver.hos_driving_hours_today;
        let planned = trip.route.estimated_drive_time;
        let total = driven + planned;
        let max = ctx.policy().max_driving_hours;
        exceeds(total, max).then(|| {
            format!(
                "Trip would exceed the {}: {driven:.2} h driven + {planned:.2} h planned = {total:.2} h (max {max:.2} h)",
                messages::DRIVING_LIMIT
            )
        })
    }
}

#[derive(Debug)]
struct OnDutyLimit;

impl<'a> Rule<Trip<'a>> for OnDutyLimit {
    fn kind(&self) -> ViolationKind {
        ViolationKind::OnDutyLimit
    }

    fn check(&self, trip: &Trip<'a>, ctx: &EvaluationContext<'_>) -> Option<String> {
        let on_duty = trip.driver.hos_on_duty_hours_today;
        let planned = trip.route.estimated_drive_time;
        let total = on_duty + planned;
        let max = ctx.policy().max_on_duty_hours;
        exceeds(total, max).then(|| {
            format!(
                "Trip would exceed the {}: {on_duty:.2} h on duty + {planned:.2} h planned = {total:.2} h (max {max:.2} h)",
                messages::ON_DUTY_LIMIT
            )
        })
    }
}

#[derive(Debug)]
struct OffDutyReset;

impl<'a> Rule<Trip<'a>> for OffDutyReset {
    fn kind(&self) -> ViolationKind {
        ViolationKind::OffDutyReset
    }

    fn check(&self, trip: &Trip<'a>, ctx: &EvaluationContext<'_>) -> Option<String> {
        let driver = trip.driver;
        let on_the_clock =
            driver.hos_driving_hours_today > 0.0 || driver.hos_on_duty_hours_today > 0.0;
        let required = ctx.policy().min_off_duty_hours;

        match parse_field("last_off_duty", driver.last_off_duty.as_deref()) {
            FieldTime::Malformed => Some(format!(
                "Cannot verify the {} requirement: last_off_duty {:?} is not a valid timestamp",
                messages::OFF_DUTY_RESET,
                driver.last_off_duty.as_deref().unwrap_or_default()
            )),
            FieldTime::Missing if on_the_clock => Some(format!(
                "Cannot verify the {} requirement: last_off_duty is missing for a driver with hours on the clock",
                messages::OFF_DUTY_RESET
            )),
            FieldTime::Missing => None,
            FieldTime::At(start) => {
                let rested = ctx.as_of.hours_since(&start);
                (on_the_clock && rested + HOURS_EPSILON < required).then(|| {
                    format!(
                        "Driver has not completed the {} period: {rested:.2} h since {start}, {required:.2} h required",
                        messages::OFF_DUTY_RESET
                    )
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::CompliancePolicy;
    use crate::record::{ClearinghouseStatus, DriverStatus};
    use haul_core::{DriverId, Timestamp};

    const AS_OF: &str = "2026-03-01T12:00:00Z";

    fn driver(driving: f64, on_duty: f64, last_off_duty: Option<&str>) -> Driver {
        Driver {
            driver_id: DriverId::new("DRV-1").unwrap(),
            status: DriverStatus::Active,
            hos_driving_hours_today: driving,
            hos_on_duty_hours_today: on_duty,
            last_off_duty: last_off_duty.map(str::to_owned),
            clearinghouse_status: ClearinghouseStatus::Clear,
            clearinghouse_last_query: Some("2026-01-01T00:00:00Z".into()),
            clearinghouse_resolved: false,
            lease_agreement_signed: true,
            lease_agreement_date: Some("2025-06-01".into()),
        }
    }

    /// Off duty long enough ago that the reset rule never fires.
    const RESTED: Option<&str> = Some("2026-02-28T12:00:00Z");

    fn eval(d: &Driver, trip: f64) -> ValidationResult {
        eval_with(d, trip, &CompliancePolicy::default())
    }

    fn eval_with(d: &Driver, trip: f64, policy: &CompliancePolicy) -> ValidationResult {
        let ctx = EvaluationContext::new(Timestamp::parse(AS_OF).unwrap(), policy).unwrap();
        validate_hos_compliance(d, &Route::with_drive_time(trip), &ctx)
    }

    #[test]
    fn fresh_driver_short_trip_passes() {
        let r = eval(&driver(2.0, 3.0, RESTED), 4.0);
        assert!(r.valid(), "{:?}", r.error_messages());
    }

    #[test]
    fn driving_limit_boundary_is_inclusive() {
        assert!(eval(&driver(10.99, 11.0, RESTED), 0.01).valid());
        assert!(eval(&driver(5.0, 5.0, RESTED), 6.0).valid());
    }

    #[test]
    fn driving_limit_exceeded() {
        let r = eval(&driver(11.0, 11.0, RESTED), 0.1);
        assert!(!r.valid());
        assert_eq!(r.len(), 1);
        assert!(r.mentions("11-hour driving limit"));
    }

    #[test]
    fn on_duty_limit_exceeded() {
        let r = eval(&driver(2.0, 13.5, RESTED), 1.0);
        assert_eq!(r.len(), 1);
        assert!(r.mentions("14-hour on-duty limit"));
    }

    #[test]
    fn on_duty_boundary_is_inclusive() {
        assert!(eval(&driver(2.0, 13.0, RESTED), 1.0).valid());
    }

    #[test]
    fn both_limits_reported_in_rule_order() {
        let r = eval(&driver(10.5, 13.0, RESTED), 1.5);
        assert_eq!(r.len(), 2);
        assert_eq!(r.violations()[0].kind, ViolationKind::DrivingLimit);
        assert_eq!(r.violations()[1].kind, ViolationKind::OnDutyLimit);
    }

    #[test]
    fn short_rest_with_hours_fails() {
        let r = eval(&driver(3.0, 4.0, Some("2026-03-01T04:00:00Z")), 1.0);
        assert_eq!(r.len(), 1);
        assert!(r.mentions("10-hour off-duty"));
    }

    #[test]
    fn rest_of_exactly_ten_hours_passes() {
        assert!(eval(&driver(3.0, 4.0, Some("2026-03-01T02:00:00Z")), 1.0).valid());
    }

    #[test]
    fn short_rest_without_hours_passes() {
        assert!(eval(&driver(0.0, 0.0, Some("2026-03-01T10:00:00Z")), 5.0).valid());
    }

    #[test]
    fn all_three_rules_fire_together() {
        let r = eval(&driver(10.0, 13.0, Some("2026-03-01T11:00:00Z")), 2.0);
        let kinds: Vec<_> = r.violations().iter().map(|v| v.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ViolationKind::DrivingLimit,
                ViolationKind::OnDutyLimit,
                ViolationKind::OffDutyReset
            ]
        );
    }

    #[test]
    fn malformed_last_off_duty_fails_closed() {
        let r = eval(&driver(0.0, 0.0, Some("last tuesday")), 1.0);
        assert!(!r.valid());
        assert!(r.mentions("10-hour off-duty"));
    }

    #[test]
    fn missing_last_off_duty_with_hours_fails_closed() {
        let r = eval(&driver(1.0, 1.0, None), 1.0);
        assert!(r.has(ViolationKind::OffDutyReset));
        assert!(eval(&driver(0.0, 0.0, None), 1.0).valid());
    }

    #[test]
    fn non_finite_and_negative_hours_fail_closed() {
        assert!(eval(&driver(f64::NAN, 0.0, RESTED), 1.0).has(ViolationKind::InvalidHosInput));
        assert!(eval(&driver(0.0, -1.0, RESTED), 1.0).has(ViolationKind::InvalidHosInput));
        assert!(eval(&driver(0.0, 0.0, RESTED), f64::INFINITY).has(ViolationKind::InvalidHosInput));
    }

    #[test]
    fn stricter_policy_applies() {
        let policy = CompliancePolicy {
            max_driving_hours: 10.0,
            ..CompliancePolicy::default()
        };
        let r = eval_with(&driver(9.0, 9.0, RESTED), 1.5, &policy);
        assert!(r.mentions("11-hour driving limit"));
        assert!(r.mentions("max 10.00 h"));
    }

    #[test]
    fn rule_order_is_stable() {
        assert_eq!(
            rules().kinds(),
            vec![
                ViolationKind::InvalidHosInput,
                ViolationKind::DrivingLimit,
                ViolationKind::OnDutyLimit,
                ViolationKind::OffDutyReset
            ]
        );
    }
}
