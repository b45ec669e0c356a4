//! Content hashes for restore gating

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::ConversionError;

/// Hex-encoded SHA-256 of the JSON encoding of `value`.
///
/// Field order follows struct declaration order and maps are expected to be
/// `BTreeMap`s, so equal values always hash equally.
pub fn content_hash<T: Serialize + ?Sized>(value: &T) -> Result<String, ConversionError> {
    let bytes = serde_json::to_vec(value)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_content_hash_is_deterministic() {
        let mut first = BTreeMap::new();
        first.insert("b", 2);
        first.insert("a", 1);
        let mut second = BTreeMap::new();
        second.insert("a", 1);
        second.insert("b", 2);

        assert_eq!(content_hash(&first).unwrap(), content_hash(&second).unwrap());
    }

    #[test]
    fn test_content_hash_distinguishes_values() {
        let none: Option<bool> = None;
        assert_ne!(content_hash(&none).unwrap(), content_hash(&Some(false)).unwrap());
        assert_eq!(content_hash("x").unwrap().len(), 64);
    }
}
