//! Canonical serialization for deterministic hashing.
//!
//! Graph fingerprints, partition hashes and config hashes all go through
//! these functions so identical inputs hash identically across runs.
//!
//! ## Determinism Guarantees
//!
//! - Stable field order: Struct fields serialize in declaration order
//! - Stable Vec order: Vectors serialize in index order
//! - No HashMap allowed: Use BTreeMap for maps in hashed data

use serde::Serialize;
use xxhash_rust::xxh64::xxh64;

use crate::types::Labeling;

/// Serialize a value to canonical JSON bytes for hashing.
pub fn to_canonical_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(value)
}

/// Compute canonical hash of a serializable value.
pub fn canonical_hash<T: Serialize>(value: &T) -> Result<u64, serde_json::Error> {
    let bytes = to_canonical_bytes(value)?;
    Ok(xxh64(&bytes, 0))
}

/// Compute canonical hash and return as hex string.
pub fn canonical_hash_hex<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    Ok(format!("{:016x}", canonical_hash(value)?))
}

/// Hash of the partition a labeling induces, independent of label values.
///
/// Classes are listed by their smallest member, so two labelings with the
/// same partition but different label numbering hash identically.
pub fn partition_hash_hex(labeling: &Labeling) -> Result<String, serde_json::Error> {
    let mut classes: Vec<_> = labeling.partition().into_values().collect();
    classes.sort();
    canonical_hash_hex(&classes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Entity, Label, NodeId};

    #[derive(Serialize)]
    struct TestStruct {
        name: String,
        value: i32,
    }

    #[test]
    fn test_determinism() {
        let s = TestStruct {
            name: "test".to_string(),
            value: 42,
        };

        let h1 = canonical_hash(&s).unwrap();
        let h2 = canonical_hash(&s).unwrap();
        assert_eq!(h1, h2);
        assert_eq!(canonical_hash_hex(&s).unwrap().len(), 16);
    }

    #[test]
    fn test_partition_hash_ignores_label_values() {
        let node = |n: u64| Entity::Node(NodeId::new(n));
        let a: Labeling = [(node(1), Label::new(0)), (node(2), Label::new(1)), (node(3), Label::new(1))]
            .into_iter()
            .collect();
        let b: Labeling = [(node(1), Label::new(4)), (node(2), Label::new(0)), (node(3), Label::new(0))]
            .into_iter()
            .collect();
        let c: Labeling = [(node(1), Label::new(0)), (node(2), Label::new(0)), (node(3), Label::new(1))]
            .into_iter()
            .collect();

        assert_eq!(partition_hash_hex(&a).unwrap(), partition_hash_hex(&b).unwrap());
        assert_ne!(partition_hash_hex(&a).unwrap(), partition_hash_hex(&c).unwrap());
    }
}
