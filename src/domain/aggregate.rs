// Aggregate count tables
use std::collections::BTreeMap;

/// Key -> count, iterated in ascending key order.
///
/// Only keys that occur are present; a table never holds a zero count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateTable<K: Ord> {
    counts: BTreeMap<K, usize>,
}

impl<K: Ord> AggregateTable<K> {
    pub fn from_keys<I: IntoIterator<Item = K>>(keys: I) -> Self {
        let mut counts = BTreeMap::new();
        for key in keys {
            *counts.entry(key).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn get(&self, key: &K) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, usize)> {
        self.counts.iter().map(|(k, v)| (k, *v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.counts.keys()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
