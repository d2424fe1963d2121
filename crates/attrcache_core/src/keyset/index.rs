//! The key-set registry.

use super::KeySet;
use std::collections::HashMap;

/// Mapping from set name to [`KeySet`], owned by one connection.
///
/// Names match by exact byte equality. A set exists only while it has at
/// least one member: removing the last member removes the set.
///
/// # Example
///
/// ```rust
/// use attrcache_core::KeySetIndex;
///
/// let mut index = KeySetIndex::new();
/// index.add_member("g1", "k1");
/// assert_eq!(index.lookup("g1").unwrap().members(), ["k1"]);
///
/// index.remove_member("g1", "k1");
/// assert!(index.lookup("g1").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct KeySetIndex {
    sets: HashMap<String, KeySet>,
}

impl KeySetIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `key` as the last member of `set`, creating the set if it
    /// is unseen. Adding a key that is already a member adds it again.
    pub fn add_member(&mut self, set: &str, key: &str) {
        let entry = self.sets.entry(set.to_string()).or_insert_with(|| {
            tracing::debug!(set, "creating key-set");
            KeySet::new(set)
        });
        entry.push(key);
    }

    /// Removes the first member of `set` equal to `key`.
    ///
    /// Returns `true` if a member was removed. A missing set or key is a
    /// no-op. If the set becomes empty it is removed from the index.
    pub fn remove_member(&mut self, set: &str, key: &str) -> bool {
        let Some(entry) = self.sets.get_mut(set) else {
            return false;
        };
        let removed = entry.remove_first(key);
        if entry.is_empty() {
            self.sets.remove(set);
        }
        removed
    }

    /// Detaches `set` from the index and returns its members in order, or
    /// `None` if there is no such set.
    pub fn remove_set(&mut self, set: &str) -> Option<Vec<String>> {
        self.sets.remove(set).map(KeySet::into_members)
    }

    /// Looks up a set by exact name.
    pub fn lookup(&self, set: &str) -> Option<&KeySet> {
        self.sets.get(set)
    }

    /// Returns `true` if `key` is a member of `set`.
    pub fn contains_member(&self, set: &str, key: &str) -> bool {
        self.lookup(set).is_some_and(|s| s.contains(key))
    }

    /// Names of all sets, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }

    /// Number of sets.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Returns `true` if there are no sets.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Drops every set.
    pub fn clear(&mut self) {
        self.sets.clear();
    }
}
