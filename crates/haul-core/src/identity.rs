//! # Carrier Identity Newtypes
//!
//! Identifiers issued by the carrier's systems of record. They are opaque
//! strings to the compliance engine, but a driver id and a shipment id are
//! distinct types so one can never be passed for the other.

use serde::{Deserialize, Serialize};

use crate::error::HaulError;

/// Maximum identifier length accepted from external systems.
const MAX_ID_LEN: usize = 128;

/// Identifier of a driver record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DriverId(String);

/// Identifier of a shipment record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShipmentId(String);

fn validate(kind: &'static str, value: &str) -> Result<(), HaulError> {
    let reason = if value.trim().is_empty() {
        Some("must not be empty")
    } else if value.len() > MAX_ID_LEN {
        Some("must be at most 128 bytes")
    } else if value.chars().any(char::is_control) {
        Some("must not contain control characters")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(HaulError::InvalidIdentifier {
            kind,
            value: value.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

macro_rules! string_id {
    ($ty:ident, $kind:literal) => {
        impl $ty {
            /// Create a validated identifier.
            pub fn new(value: impl Into<String>) -> Result<Self, HaulError> {
                let value = value.into();
                validate($kind, &value)?;
                Ok(Self(value))
            }

            /// Access the identifier string.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $ty {
            type Error = HaulError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$ty> for String {
            fn from(id: $ty) -> String {
                id.0
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($kind, ":{}"), self.0)
            }
        }
    };
}

string_id!(DriverId, "driver");
string_id!(ShipmentId, "shipment");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_carrier_ids() {
        assert_eq!(DriverId::new("DRV-0042").unwrap().as_str(), "DRV-0042");
        assert_eq!(ShipmentId::new("SHP-1001").unwrap().as_str(), "SHP-1001");
    }

    #[test]
    fn rejects_empty_and_control_chars() {
        assert!(DriverId::new("").is_err());
        assert!(DriverId::new("   ").is_err());
        assert!(ShipmentId::new("SHP\n1").is_err());
        assert!(ShipmentId::new("x".repeat(MAX_ID_LEN + 1)).is_err());
    }

    #[test]
    fn display_is_namespaced() {
        assert_eq!(DriverId::new("d1").unwrap().to_string(), "driver:d1");
        assert_eq!(ShipmentId::new("s1").unwrap().to_string(), "shipment:s1");
    }

    #[test]
    fn deserialization_validates() {
        let ok: DriverId = serde_json::from_str("\"DRV-1\"").unwrap();
        assert_eq!(ok.as_str(), "DRV-1");
        assert!(serde_json::from_str::<DriverId>("\"\"").is_err());
    }
}
