//! Typed result sets built from raw store items.

mod assembler;
mod row;

pub use assembler::assemble;
pub use row::Row;

/// An ordered sequence of rows.
///
/// The count is the length of the row vector, so it can never disagree
/// with the rows actually held.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    rows: Vec<Row>,
}

impl ResultSet {
    /// Creates an empty result set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows.
    pub fn count(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in store order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// First row with the given primary key.
    pub fn get(&self, key: &str) -> Option<&Row> {
        self.rows.iter().find(|row| row.key() == key)
    }

    /// Iterates over the rows.
    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Consumes the set, returning its rows.
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

impl IntoIterator for ResultSet {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
