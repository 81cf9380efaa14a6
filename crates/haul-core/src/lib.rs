//! # haul-core: Foundational Types for Dispatch Compliance
//!
//! The leaf crate of the haul workspace. It defines the primitives every
//! other crate builds on and depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** `DriverId` and `ShipmentId` are
//!    validated newtypes. A shipment id cannot be passed where a driver id
//!    is expected.
//!
//! 2. **Single `Regulation` enum.** One definition of the federal rule
//!    families (49 CFR Parts 376, 382, 395). Every `match` on it is
//!    exhaustive, so adding a family forces every consumer to handle it.
//!
//! 3. **UTC-only timestamps.** `Timestamp` normalizes to UTC with seconds
//!    precision so that elapsed-time rules compare like with like.
//!
//! 4. **Snapshot digests.** `snapshot_digest()` ties a compliance decision
//!    to the exact records it was computed from.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `haul-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod digest;
pub mod error;
pub mod identity;
pub mod regulation;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use digest::{snapshot_digest, ContentDigest};
pub use error::HaulError;
pub use identity::{DriverId, ShipmentId};
pub use regulation::{Regulation, REGULATION_COUNT};
pub use temporal::Timestamp;
