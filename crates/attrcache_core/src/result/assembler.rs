//! Conversion of raw store items into a typed result set.

use super::{ResultSet, Row};
use crate::error::CoreResult;
use attrcache_codec::{decode, CodecError, TypedValue};
use attrcache_store::{RawItem, StoreResult};
use std::collections::HashMap;

/// Builds a result set from raw items, in order.
///
/// Each attribute value goes through [`attrcache_codec::decode`]. An empty
/// input yields an empty set.
///
/// # Errors
///
/// Returns the first store error yielded by `items`, or
/// [`CodecError::Allocation`] if row storage cannot be reserved. No rows
/// are returned on error.
pub fn assemble<I>(items: I) -> CoreResult<ResultSet>
where
    I: IntoIterator<Item = StoreResult<RawItem>>,
{
    let mut set = ResultSet::new();
    set.populate(items)?;
    Ok(set)
}

impl ResultSet {
    /// Replaces the contents of this set with rows built from `items`.
    ///
    /// Returns the number of rows. On error the set is left empty: rows
    /// built before the failure are dropped, never exposed.
    ///
    /// # Errors
    ///
    /// Same as [`assemble`].
    pub fn populate<I>(&mut self, items: I) -> CoreResult<usize>
    where
        I: IntoIterator<Item = StoreResult<RawItem>>,
    {
        self.rows.clear();
        match self.extend_rows(items) {
            Ok(()) => Ok(self.rows.len()),
            Err(err) => {
                tracing::debug!(discarded = self.rows.len(), "result assembly failed");
                self.rows.clear();
                Err(err)
            }
        }
    }

    fn extend_rows<I>(&mut self, items: I) -> CoreResult<()>
    where
        I: IntoIterator<Item = StoreResult<RawItem>>,
    {
        for item in items {
            let row = build_row(item?)?;
            self.rows
                .try_reserve(1)
                .map_err(|_| CodecError::allocation("growing result set"))?;
            self.rows.push(row);
        }
        Ok(())
    }
}

// A repeated attribute name keeps its first position and takes the last
// value, as `Row::insert` would, without rescanning the row per attribute.
fn build_row(item: RawItem) -> CoreResult<Row> {
    let RawItem { key, attributes: raw } = item;
    let no_room = || CodecError::allocation(format!("building row {key}"));

    let mut positions: HashMap<&str, usize> = HashMap::new();
    positions.try_reserve(raw.len()).map_err(|_| no_room())?;
    let mut slots = Vec::new();
    slots.try_reserve_exact(raw.len()).map_err(|_| no_room())?;
    for (name, _) in &raw {
        let next = positions.len();
        slots.push(*positions.entry(name.as_str()).or_insert(next));
    }

    let width = positions.len();
    drop(positions);

    let mut attributes: Vec<(String, TypedValue)> = Vec::new();
    attributes.try_reserve_exact(width).map_err(|_| no_room())?;
    for ((name, value), slot) in raw.into_iter().zip(slots) {
        let value = decode(value.as_deref());
        match attributes.get_mut(slot) {
            Some((_, existing)) => *existing = value,
            None => attributes.push((name, value)),
        }
    }
    Ok(Row::from_parts(key, attributes))
}
