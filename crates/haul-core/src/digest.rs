//! # Snapshot Digest
//!
//! SHA-256 over the key-sorted JSON form of a record snapshot. Identifies
//! the exact inputs a dispatch decision was computed from.
//!
//! Serialization goes through `serde_json::Value` first. Its object map is
//! ordered by key, so two snapshots with the same content produce the same
//! bytes regardless of struct field order or input file layout.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::HaulError;

/// A SHA-256 digest of a record snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentDigest {
    /// The raw 32-byte digest value.
    pub bytes: [u8; 32],
}

impl ContentDigest {
    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.bytes.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sha256:{}", self.to_hex())
    }
}

/// Compute the digest of any serializable snapshot.
pub fn snapshot_digest<T: Serialize + ?Sized>(snapshot: &T) -> Result<ContentDigest, HaulError> {
    let value = serde_json::to_value(snapshot)?;
    let bytes = serde_json::to_vec(&value)?;
    let hash = Sha256::digest(&bytes);
    let mut out = [0u8; 32];
    out.copy_from_slice(&hash);
    Ok(ContentDigest { bytes: out })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn key_order_does_not_matter() {
        let a: serde_json::Value = serde_json::from_str(r#"{"b":1,"a":2}"#).unwrap();
        let b: serde_json::Value = serde_json::from_str(r#"{"a":2,"b":1}"#).unwrap();
        assert_eq!(snapshot_digest(&a).unwrap(), snapshot_digest(&b).unwrap());
    }

    #[test]
    fn different_content_differs() {
        let a = snapshot_digest(&json!({"hours": 10.5})).unwrap();
        let b = snapshot_digest(&json!({"hours": 10.6})).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn known_vector() {
        // sha256("{}")
        let d = snapshot_digest(&json!({})).unwrap();
        assert_eq!(
            d.to_hex(),
            "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a"
        );
        assert!(d.to_string().starts_with("sha256:"));
    }

    proptest! {
        #[test]
        fn digest_is_deterministic(name in "[a-z]{0,16}", hours in 0.0f64..24.0) {
            let v = json!({"name": name, "hours": hours});
            prop_assert_eq!(snapshot_digest(&v).unwrap(), snapshot_digest(&v).unwrap());
        }
    }
}
