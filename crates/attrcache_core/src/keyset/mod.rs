//! Connection-scoped registry of named key groups.
//!
//! The store has no notion of grouped keys. A key-set remembers which
//! primary keys were written under a group name so that the whole group, or
//! one member of it, can be deleted later. The registry is volatile: it is
//! created empty with its connection and dropped with it.

mod index;

pub use index::KeySetIndex;

/// A named, ordered group of member keys.
///
/// Members keep insertion order. The same key may appear more than once if
/// it was added more than once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySet {
    name: String,
    members: Vec<String>,
}

impl KeySet {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Name of the set.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Member keys in insertion order.
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Number of members, duplicates included.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the set has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns `true` if `key` is a member.
    pub fn contains(&self, key: &str) -> bool {
        self.members.iter().any(|m| m == key)
    }

    pub(crate) fn push(&mut self, key: impl Into<String>) {
        self.members.push(key.into());
    }

    /// Removes the first member equal to `key`.
    pub(crate) fn remove_first(&mut self, key: &str) -> bool {
        match self.members.iter().position(|m| m == key) {
            Some(pos) => {
                self.members.remove(pos);
                true
            }
            None => false,
        }
    }

    pub(crate) fn into_members(self) -> Vec<String> {
        self.members
    }
}
