//! A single typed row.

use attrcache_codec::TypedValue;

/// One item of a result: its primary key and its attributes in store order.
///
/// Attribute names are unique within a row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    key: String,
    attributes: Vec<(String, TypedValue)>,
}

impl Row {
    /// Creates a row with no attributes.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            attributes: Vec::new(),
        }
    }

    pub(crate) fn from_parts(key: String, attributes: Vec<(String, TypedValue)>) -> Self {
        Self { key, attributes }
    }

    /// Primary key of the row.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Value of the named attribute.
    pub fn get(&self, name: &str) -> Option<&TypedValue> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Attributes in insertion order.
    pub fn attributes(&self) -> &[(String, TypedValue)] {
        &self.attributes
    }

    /// Attribute names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|(n, _)| n.as_str())
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns `true` if the row has no attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Sets an attribute. An existing name keeps its position and takes the
    /// new value; a new name is appended.
    ///
    /// Finding an existing name is a linear scan of the row.
    pub fn insert(&mut self, name: impl Into<String>, value: TypedValue) {
        let name = name.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.attributes.push((name, value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_preserves_order() {
        let mut row = Row::new("u1");
        row.insert("b", TypedValue::Int32(1));
        row.insert("a", TypedValue::Int32(2));
        assert_eq!(row.names().collect::<Vec<_>>(), ["b", "a"]);
    }

    #[test]
    fn insert_existing_name_replaces_in_place() {
        let mut row = Row::new("u1");
        row.insert("a", TypedValue::Int32(1));
        row.insert("b", TypedValue::Int32(2));
        row.insert("a", TypedValue::from("x"));

        assert_eq!(row.len(), 2);
        assert_eq!(row.names().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(row.get("a"), Some(&TypedValue::from("x")));
    }

    #[test]
    fn get_missing_is_none() {
        let row = Row::new("u1");
        assert!(row.is_empty());
        assert_eq!(row.get("a"), None);
    }
}
