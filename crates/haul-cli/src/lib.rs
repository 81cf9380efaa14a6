//! # haul-cli: Dispatch Compliance from the Command Line
//!
//! Provides the `haul` command. Each subcommand loads record snapshots
//! from files, runs one evaluator from `haul-compliance`, and prints the
//! result.
//!
//! ```bash
//! haul assign --driver drv-17.yaml --shipment shp-204.json --route leg.json
//! haul --format json --as-of 2026-03-01T12:00:00Z hos --driver d.json --route r.json
//! HAUL_POLICY=carrier-policy.yaml haul clearinghouse --driver d.json
//! ```
//!
//! ## Exit Codes
//!
//! - `0`: the evaluation passed.
//! - `2`: the evaluation rejected the driver.
//! - `1`: operational error (unreadable file, bad policy, parse failure).
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; handlers here take parsed args.
//! - Handlers delegate to `haul-compliance`. No rule logic here.

pub mod check;
pub mod records;
pub mod report;

use std::path::Path;

use anyhow::{Context, Result};

use haul_compliance::{CompliancePolicy, EvaluationContext};
use haul_core::Timestamp;

use report::OutputFormat;

/// Exit code for a passing evaluation.
pub const EXIT_VALID: u8 = 0;
/// Exit code for an operational failure.
pub const EXIT_ERROR: u8 = 1;
/// Exit code for a rejected evaluation.
pub const EXIT_REJECTED: u8 = 2;

/// Options shared by every subcommand, resolved from global flags.
#[derive(Debug, Clone)]
pub struct Settings {
    pub policy: CompliancePolicy,
    pub as_of: Timestamp,
    pub format: OutputFormat,
}

impl Settings {
    /// Load the policy (federal defaults when no file is given) and fix the
    /// evaluation instant (now when not given).
    pub fn resolve(
        policy_path: Option<&Path>,
        as_of: Option<Timestamp>,
        format: OutputFormat,
    ) -> Result<Self> {
        let policy = match policy_path {
            Some(path) => CompliancePolicy::from_path(path)
                .with_context(|| format!("failed to load policy {}", path.display()))?,
            None => CompliancePolicy::federal(),
        };
        let as_of = as_of.unwrap_or_else(Timestamp::now);
        tracing::debug!(%as_of, ?policy, "evaluation settings resolved");
        Ok(Self {
            policy,
            as_of,
            format,
        })
    }

    /// Evaluation context borrowing this policy. Fails when the policy was
    /// assembled without passing validation.
    pub fn context(&self) -> Result<EvaluationContext<'_>> {
        EvaluationContext::new(self.as_of, &self.policy).context("refusing to evaluate")
    }
}
