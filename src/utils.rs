//! Utility types and algorithms for working with sets.
//!
//! Taking most of the space within the file is [`Elements`], the storage behind every [`Set`]: a
//! vector of values in insertion order, indexed by a hash table for constant-time lookups, together
//! with an order-independent digest of its contents.

use crate::prelude::*;
use hashbrown::{hash_table::Entry, HashTable};
use std::hash::DefaultHasher;

/// Hashes a value with a fixed-key hasher.
///
/// Unlike [`hashbrown::DefaultHashBuilder`], the output only depends on the value, never on the
/// table or the process. This is what allows two equal sets built independently to end up with the
/// same [`Elements::digest`].
pub fn fingerprint<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Scrambles a fingerprint before it gets summed into a digest.
///
/// Plain sums of fingerprints are too easily cancelled out, e.g. by nested sets whose fingerprints
/// differ by a constant. This is the `splitmix64` finalizer.
#[must_use]
pub const fn mix(mut hash: u64) -> u64 {
    hash ^= hash >> 30;
    hash = hash.wrapping_mul(0xbf58_476d_1ce4_e5b9);
    hash ^= hash >> 27;
    hash = hash.wrapping_mul(0x94d0_49bb_1331_11eb);
    hash ^ (hash >> 31)
}

/// Deduplicated storage for the elements of a set.
///
/// ## Invariants
///
/// - No two entries in `order` are equal.
/// - `index` holds exactly the positions `0..order.len()`, each filed under the
///   [`fingerprint`] of the value at that position.
/// - `digest` is the wrapping sum of [`mix`] applied to the fingerprints of `order`.
#[derive(Clone, Default)]
pub struct Elements {
    /// Elements in the order they were first inserted.
    order: Vec<Value>,
    /// Positions within `order`.
    index: HashTable<usize>,
    /// Order-independent summary of the contents.
    digest: u64,
}

impl Elements {
    /// Initializes empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Initializes empty storage with room for `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            order: Vec::with_capacity(capacity),
            index: HashTable::with_capacity(capacity),
            digest: 0,
        }
    }

    /// The number of distinct elements stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The elements in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[Value] {
        &self.order
    }

    /// The order-independent digest of the contents.
    #[must_use]
    pub fn digest(&self) -> u64 {
        self.digest
    }

    /// Finds the position of a value.
    #[must_use]
    pub fn position(&self, value: &Value) -> Option<usize> {
        let order = &self.order;
        self.index
            .find(fingerprint(value), |&i| order[i] == *value)
            .copied()
    }

    /// Whether a value is stored.
    #[must_use]
    pub fn contains(&self, value: &Value) -> bool {
        self.position(value).is_some()
    }

    /// Stores a value, unless an equal one is already present. Returns whether it was stored.
    pub fn push(&mut self, value: Value) -> bool {
        let hash = fingerprint(&value);
        let Self {
            order,
            index,
            digest,
        } = self;

        match index.entry(hash, |&i| order[i] == value, |&i| fingerprint(&order[i])) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(order.len());
                order.push(value);
                *digest = digest.wrapping_add(mix(hash));
                true
            }
        }
    }

    /// Returns the stored values.
    #[must_use]
    pub fn into_vec(self) -> Vec<Value> {
        self.order
    }
}

impl Extend<Value> for Elements {
    fn extend<I: IntoIterator<Item = Value>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl FromIterator<Value> for Elements {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut elements = Self::with_capacity(iter.size_hint().0);
        elements.extend(iter);
        elements
    }
}

#[cfg(test)]
mod elements {
    use super::*;

    #[test]
    fn dedup() {
        let elements: Elements = [1_i64, 2, 1, 3, 2].into_iter().map(Value::from).collect();
        assert_eq!(elements.len(), 3);
        assert_eq!(elements.position(&Value::from(3)), Some(2));
        assert!(!elements.contains(&Value::from(4)));
    }

    #[test]
    fn digest_ignores_order() {
        let fst: Elements = [1_i64, 2, 3].into_iter().map(Value::from).collect();
        let snd: Elements = [3_i64, 1, 2, 2].into_iter().map(Value::from).collect();
        assert_eq!(fst.digest(), snd.digest());
        assert_ne!(fst.digest(), Elements::new().digest());
    }

    #[test]
    fn grows() {
        // Force several rehashes.
        let mut elements = Elements::new();
        for i in 0..1000 {
            assert!(elements.push(Value::from(i)));
        }
        for i in 0..1000 {
            assert!(!elements.push(Value::from(i)));
            assert_eq!(elements.position(&Value::from(i)), Some(i as usize));
        }
    }
}
