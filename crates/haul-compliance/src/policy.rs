//! # Compliance Policy
//!
//! Thresholds the evaluators apply. [`CompliancePolicy::default()`] is the
//! federal rule set. A carrier may load a stricter policy (a 10-hour
//! internal driving cap, a 180-day Clearinghouse refresh) from YAML or
//! JSON, but never a looser one: [`CompliancePolicy::validate()`] rejects
//! any threshold that would permit what the CFR forbids.
//!
//! ```yaml
//! max_driving_hours: 10.0
//! clearinghouse_query_max_age_days: 180
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Federal daily driving limit, 49 CFR 395.3(a)(3).
pub const FEDERAL_MAX_DRIVING_HOURS: f64 = 11.0;
/// Federal duty window, 49 CFR 395.3(a)(2).
pub const FEDERAL_MAX_ON_DUTY_HOURS: f64 = 14.0;
/// Federal consecutive off-duty requirement, 49 CFR 395.3(a)(1).
pub const FEDERAL_MIN_OFF_DUTY_HOURS: f64 = 10.0;
/// Federal annual query interval, 49 CFR 382.701(b).
pub const FEDERAL_QUERY_MAX_AGE_DAYS: i64 = 365;

/// Errors loading or validating a [`CompliancePolicy`].
#[derive(Error, Debug)]
pub enum PolicyError {
    /// The policy file could not be read.
    #[error("failed to read policy file {path}: {source}")]
    Io {
        /// Path that failed.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The policy document is not valid YAML/JSON or has unknown keys.
    #[error("failed to parse policy: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A threshold is non-finite, non-positive, or looser than the federal rule.
    #[error("invalid policy threshold {field} = {value}: {reason}")]
    Threshold {
        /// Offending field name.
        field: &'static str,
        /// Configured value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Evaluation thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompliancePolicy {
    /// Maximum driving hours in a duty period.
    pub max_driving_hours: f64,
    /// Maximum on-duty hours in a duty period.
    pub max_on_duty_hours: f64,
    /// Minimum consecutive off-duty hours before a new duty period.
    pub min_off_duty_hours: f64,
    /// Maximum age of the last Clearinghouse query, in days.
    pub clearinghouse_query_max_age_days: i64,
}

impl Default for CompliancePolicy {
    fn default() -> Self {
        Self::federal()
    }
}

impl CompliancePolicy {
    /// The federal minimum rule set.
    pub fn federal() -> Self {
        Self {
            max_driving_hours: FEDERAL_MAX_DRIVING_HOURS,
            max_on_duty_hours: FEDERAL_MAX_ON_DUTY_HOURS,
            min_off_duty_hours: FEDERAL_MIN_OFF_DUTY_HOURS,
            clearinghouse_query_max_age_days: FEDERAL_QUERY_MAX_AGE_DAYS,
        }
    }

    /// Check that every threshold is usable and at least as strict as the
    /// federal rule.
    pub fn validate(&self) -> Result<(), PolicyError> {
        check_hours(
            "max_driving_hours",
            self.max_driving_hours,
            |v| v <= FEDERAL_MAX_DRIVING_HOURS,
            "exceeds the federal 11-hour driving limit",
        )?;
        check_hours(
            "max_on_duty_hours",
            self.max_on_duty_hours,
            |v| v <= FEDERAL_MAX_ON_DUTY_HOURS,
            "exceeds the federal 14-hour on-duty limit",
        )?;
        check_hours(
            "min_off_duty_hours",
            self.min_off_duty_hours,
            |v| v >= FEDERAL_MIN_OFF_DUTY_HOURS,
            "is shorter than the federal 10-hour off-duty requirement",
        )?;
        let days = self.clearinghouse_query_max_age_days;
        if days <= 0 || days > FEDERAL_QUERY_MAX_AGE_DAYS {
            return Err(PolicyError::Threshold {
                field: "clearinghouse_query_max_age_days",
                value: days.to_string(),
                reason: format!("must be between 1 and {FEDERAL_QUERY_MAX_AGE_DAYS}"),
            });
        }
        Ok(())
    }

    /// Parse and validate a policy document. JSON is accepted as a subset
    /// of YAML.
    pub fn from_yaml_str(s: &str) -> Result<Self, PolicyError> {
        let policy: Self = serde_yaml::from_str(s)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Load and validate a policy file.
    pub fn from_path(path: &Path) -> Result<Self, PolicyError> {
        let text = std::fs::read_to_string(path).map_err(|source| PolicyError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let policy = Self::from_yaml_str(&text)?;
        tracing::debug!(path = %path.display(), ?policy, "loaded compliance policy");
        Ok(policy)
    }
}

fn check_hours(
    field: &'static str,
    value: f64,
    within_federal: impl Fn(f64) -> bool,
    looser: &str,
) -> Result<(), PolicyError> {
    let reason = if !value.is_finite() || value <= 0.0 {
        Some("must be a positive finite number of hours".to_string())
    } else if !within_federal(value) {
        Some(looser.to_string())
    } else {
        None
    };
    match reason {
        Some(reason) => Err(PolicyError::Threshold {
            field,
            value: value.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}
