//! Structural hashing
//!
//! Every value type computes its hash once, at construction, from all
//! declared fields in declaration order. Set-valued fields fold element
//! hashes with a commutative combine so permutations of the same elements
//! hash identically.

use serde_json::Value;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Hash a single value with the standard hasher.
pub fn hash_one<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Accumulates field hashes in declaration order.
#[derive(Debug, Default)]
pub struct FieldHasher {
    inner: DefaultHasher,
}

impl FieldHasher {
    pub fn new() -> Self {
        Self {
            inner: DefaultHasher::new(),
        }
    }

    /// Fold in one field.
    pub fn field<T: Hash + ?Sized>(mut self, value: &T) -> Self {
        value.hash(&mut self.inner);
        self
    }

    /// Fold in a decimal field by bit pattern.
    pub fn decimal(self, value: f64) -> Self {
        self.field(&value.to_bits())
    }

    /// Fold in an optional decimal field.
    pub fn optional_decimal(self, value: Option<f64>) -> Self {
        self.field(&value.map(f64::to_bits))
    }

    /// Fold in a set-valued field, independent of element order.
    pub fn unordered<T: Hash>(mut self, items: &[T]) -> Self {
        let combined = items
            .iter()
            .fold(0u64, |acc, item| acc.wrapping_add(hash_one(item)));
        self.inner.write_u64(combined);
        self.inner.write_usize(items.len());
        self
    }

    pub fn finish(self) -> u64 {
        self.inner.finish()
    }
}

/// Hash arbitrary structured content; object members combine independent of
/// key order.
pub fn hash_value(value: &Value) -> u64 {
    match value {
        Value::Null => hash_one(&0u8),
        Value::Bool(b) => hash_one(&(1u8, *b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                hash_one(&(2u8, i))
            } else if let Some(u) = n.as_u64() {
                hash_one(&(3u8, u))
            } else {
                hash_one(&(4u8, n.as_f64().map(f64::to_bits)))
            }
        }
        Value::String(s) => hash_one(&(5u8, s.as_str())),
        Value::Array(items) => {
            let mut hasher = DefaultHasher::new();
            6u8.hash(&mut hasher);
            for item in items {
                hasher.write_u64(hash_value(item));
            }
            hasher.finish()
        }
        Value::Object(map) => {
            let combined = map.iter().fold(0u64, |acc, (key, val)| {
                acc.wrapping_add(hash_one(&(key.as_str(), hash_value(val))))
            });
            hash_one(&(7u8, combined, map.len()))
        }
    }
}

/// Order-independent equality over de-duplicated slices.
pub fn set_eq<T: PartialEq>(a: &[T], b: &[T]) -> bool {
    a.len() == b.len() && a.iter().all(|item| b.contains(item))
}

/// Collapse duplicate elements, keeping first occurrences in order.
pub fn dedup<T: PartialEq>(items: Vec<T>) -> Vec<T> {
    let mut unique: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !unique.contains(&item) {
            unique.push(item);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unordered_is_permutation_invariant() {
        let a = FieldHasher::new().unordered(&[1u32, 2, 3]).finish();
        let b = FieldHasher::new().unordered(&[3u32, 1, 2]).finish();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unordered_distinguishes_different_sets() {
        let a = FieldHasher::new().unordered(&[1u32, 2, 3]).finish();
        let b = FieldHasher::new().unordered(&[1u32, 2, 4]).finish();
        assert_ne!(a, b);
    }

    #[test]
    fn test_field_order_matters() {
        let a = FieldHasher::new().field("x").field("y").finish();
        let b = FieldHasher::new().field("y").field("x").finish();
        assert_ne!(a, b);
    }

    #[test]
    fn test_hash_value_object_key_order_irrelevant() {
        // serde_json maps are keyed, but the fold must not depend on
        // iteration order either way.
        let a = json!({"x": 1, "y": [true, null]});
        let b = json!({"y": [true, null], "x": 1});
        assert_eq!(hash_value(&a), hash_value(&b));
    }

    #[test]
    fn test_hash_value_array_order_relevant() {
        let a = json!([1, 2]);
        let b = json!([2, 1]);
        assert_ne!(hash_value(&a), hash_value(&b));
    }

    #[test]
    fn test_set_eq() {
        assert!(set_eq(&[1, 2, 3], &[3, 2, 1]));
        assert!(!set_eq(&[1, 2], &[1, 3]));
        assert!(!set_eq(&[1], &[1, 2]));
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        assert_eq!(dedup(vec![2, 1, 2, 3, 1]), vec![2, 1, 3]);
    }
}
