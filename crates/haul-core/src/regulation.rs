//! # Regulation: Single Source of Truth
//!
//! The federal rule families a dispatch must satisfy. This is the one
//! definition used across the stack; every `match` on `Regulation` is
//! exhaustive, so a new rule family cannot be silently skipped by any
//! evaluator or report.
//!
//! | Regulation | Citation | Subject |
//! |------------|----------|---------|
//! | `HoursOfService` | 49 CFR Part 395 | Driving, on-duty and rest limits |
//! | `Clearinghouse` | 49 CFR Part 382 | Drug & alcohol Clearinghouse |
//! | `TruthInLeasing` | 49 CFR Part 376 | Equipment lease agreements |

use serde::{Deserialize, Serialize};

/// Total number of regulation families.
pub const REGULATION_COUNT: usize = 3;

/// Federal motor carrier regulation families evaluated before dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regulation {
    /// Hours of Service of Drivers (49 CFR Part 395).
    HoursOfService,
    /// Controlled substances and alcohol testing, Clearinghouse (49 CFR Part 382).
    Clearinghouse,
    /// Lease and interchange of vehicles (49 CFR Part 376).
    TruthInLeasing,
}

impl Regulation {
    /// All families, in evaluation order.
    pub const ALL: [Regulation; REGULATION_COUNT] = [
        Self::HoursOfService,
        Self::Clearinghouse,
        Self::TruthInLeasing,
    ];

    /// Canonical snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HoursOfService => "hours_of_service",
            Self::Clearinghouse => "clearinghouse",
            Self::TruthInLeasing => "truth_in_leasing",
        }
    }

    /// The CFR part governing this family.
    pub fn cfr_part(&self) -> &'static str {
        match self {
            Self::HoursOfService => "49 CFR Part 395",
            Self::Clearinghouse => "49 CFR Part 382",
            Self::TruthInLeasing => "49 CFR Part 376",
        }
    }
}

impl std::fmt::Display for Regulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
