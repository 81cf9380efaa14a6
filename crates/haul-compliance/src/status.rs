//! # Driver Status Transitions
//!
//! Evaluators report; they never change a driver record. When a
//! Clearinghouse check finds an unresolved violation the driver must be
//! removed from safety-sensitive functions. The caller makes that change
//! explicitly with [`status_after_clearinghouse()`] and persists the
//! returned status.
//!
//! ```text
//!   active ──violation──▶ suspended ──reinstate (no violation)──▶ active
//!   inactive ─violation─▶ suspended
//! ```

use serde::Serialize;
use thiserror::Error;

use crate::record::DriverStatus;
use crate::result::{ValidationResult, ViolationKind};

/// Errors from an explicit status change.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatusError {
    /// The requested change is not a legal transition.
    #[error("invalid driver status transition from {from} to {to}: {reason}")]
    InvalidTransition {
        from: DriverStatus,
        to: DriverStatus,
        reason: &'static str,
    },

    /// Reinstatement requested while the Clearinghouse still reports an
    /// unresolved violation.
    #[error("driver cannot be reinstated: Clearinghouse violation is unresolved")]
    StillInViolation,
}

/// A status change decided from a validation result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusTransition {
    pub from: DriverStatus,
    pub to: DriverStatus,
    /// The violation that forced the change, if any.
    pub reason: Option<ViolationKind>,
}

impl StatusTransition {
    /// Whether the status actually changes.
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

/// Status a driver must have after a Clearinghouse evaluation.
///
/// An unresolved violation moves any status to `Suspended`. Otherwise the
/// status is unchanged; clearing a suspension needs [`reinstate()`].
pub fn status_after_clearinghouse(
    current: DriverStatus,
    clearinghouse: &ValidationResult,
) -> StatusTransition {
    let kind = ViolationKind::UnresolvedClearinghouseViolation;
    let transition = if clearinghouse.has(kind) {
        StatusTransition {
            from: current,
            to: DriverStatus::Suspended,
            reason: Some(kind),
        }
    } else {
        StatusTransition {
            from: current,
            to: current,
            reason: None,
        }
    };
    if transition.changed() {
        tracing::info!(from = %transition.from, to = %transition.to, "driver suspended for unresolved Clearinghouse violation");
    }
    transition
}

/// Return a suspended driver to service.
pub fn reinstate(
    current: DriverStatus,
    clearinghouse: &ValidationResult,
) -> Result<DriverStatus, StatusError> {
    if current != DriverStatus::Suspended {
        return Err(StatusError::InvalidTransition {
            from: current,
            to: DriverStatus::Active,
            reason: "only a suspended driver can be reinstated",
        });
    }
    if clearinghouse.has(ViolationKind::UnresolvedClearinghouseViolation) {
        return Err(StatusError::StillInViolation);
    }
    Ok(DriverStatus::Active)
}
