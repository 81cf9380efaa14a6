//! # haul-compliance: Dispatch Compliance Rule Engine
//!
//! A pure, stateless library that decides whether a driver may be
//! dispatched on a shipment. It performs no I/O: callers load record
//! snapshots, call an evaluator, and act on the returned
//! [`ValidationResult`].
//!
//! - **HOS** ([`hos`]): 11-hour driving, 14-hour on-duty and 10-hour
//!   off-duty rules of 49 CFR Part 395.
//!
//! - **Clearinghouse** ([`clearinghouse`]): query recency and violation
//!   status under 49 CFR Part 382.
//!
//! - **Leasing** ([`leasing`]): Truth-in-Leasing signature and date under
//!   49 CFR Part 376.
//!
//! - **Assignment** ([`assignment`]): the single gate a dispatcher calls.
//!   Runs every family and unions their violations.
//!
//! - **Status** ([`status`]): explicit driver status transitions the caller
//!   applies after inspecting a result. Evaluators never mutate records.
//!
//! ## Rule Architecture
//!
//! Each family is a [`RuleSet`] of independent [`Rule`] strategies. A rule
//! set runs every rule, never short-circuits, and records one [`Violation`]
//! per fired rule in rule order. Message fragments are a versioned contract
//! owned by [`ViolationKind`] (see [`messages`]).
//!
//! ## Fail-Closed Policy
//!
//! A missing or malformed field never yields `valid() == true`. Unparseable
//! timestamps and non-finite hour counters become violations.

pub mod assignment;
pub mod clearinghouse;
pub mod hos;
pub mod leasing;
pub mod policy;
pub mod record;
pub mod result;
pub mod rule;
pub mod status;

pub use assignment::validate_driver_assignment;
pub use clearinghouse::validate_clearinghouse_compliance;
pub use hos::validate_hos_compliance;
pub use leasing::validate_leasing_compliance;
pub use policy::{CompliancePolicy, PolicyError};
pub use record::{ClearinghouseStatus, Driver, DriverStatus, Route, Shipment};
pub use result::{messages, ValidationResult, Violation, ViolationKind};
pub use rule::{EvaluationContext, Rule, RuleSet};
pub use status::{reinstate, status_after_clearinghouse, StatusError, StatusTransition};
