//! In-memory store client for testing.

use crate::client::{ItemStream, Primitive, RawItem, StoreClient, TableSpec};
use crate::error::{StoreError, StoreResult};
use bytes::Bytes;
use parking_lot::{Mutex, RwLock};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

#[derive(Debug, Default, Clone)]
struct StoredItem {
    attributes: Vec<(String, Option<Bytes>)>,
    expires_at: Option<Instant>,
}

impl StoredItem {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| deadline <= now)
    }

    fn attribute(&self, name: &str) -> Option<&Option<Bytes>> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    fn upsert(&mut self, name: &str, value: Option<Bytes>) {
        match self.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, slot)) => *slot = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    // Every write restates the lifetime; zero clears any earlier deadline.
    fn touch(&mut self, ttl_secs: u32, now: Instant) {
        self.expires_at =
            (ttl_secs > 0).then(|| now + Duration::from_secs(u64::from(ttl_secs)));
    }

    fn to_raw(&self, key: &str) -> RawItem {
        RawItem {
            key: key.to_string(),
            attributes: self.attributes.clone(),
        }
    }
}

type Table = BTreeMap<String, StoredItem>;

/// An in-memory store client.
///
/// Tables are created on first write. Items are kept in key order, so
/// scans are deterministic. Expired items behave as absent and are dropped
/// on the next write to their table.
///
/// Like a real store it answers NULL attributes on reads, treats an absent
/// counter as zero, and rejects increments of non-numeric attributes.
///
/// # Example
///
/// ```rust
/// use attrcache_store::{InMemoryStore, StoreClient, TableSpec};
///
/// let store = InMemoryStore::new();
/// let table = TableSpec::new("cache", "key");
/// assert_eq!(store.increment(&table, "hits", "value", 3, 0).unwrap(), 3);
/// assert_eq!(store.decrement(&table, "hits", "value", 1, 0).unwrap(), 2);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<HashMap<String, Table>>,
    calls: Mutex<HashMap<Primitive, usize>>,
    closed: AtomicBool,
}

impl InMemoryStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times `primitive` has been called.
    #[must_use]
    pub fn calls(&self, primitive: Primitive) -> usize {
        self.calls.lock().get(&primitive).copied().unwrap_or(0)
    }

    /// Returns `true` if a live item with `key` exists in `table`.
    #[must_use]
    pub fn contains_item(&self, table: &str, key: &str) -> bool {
        let now = Instant::now();
        self.tables
            .read()
            .get(table)
            .and_then(|t| t.get(key))
            .is_some_and(|item| !item.is_expired(now))
    }

    /// Number of live items in `table`.
    #[must_use]
    pub fn item_count(&self, table: &str) -> usize {
        let now = Instant::now();
        self.tables
            .read()
            .get(table)
            .map_or(0, |t| t.values().filter(|i| !i.is_expired(now)).count())
    }

    /// Expiry deadline of the item, if it has one.
    #[must_use]
    pub fn expires_at(&self, table: &str, key: &str) -> Option<Instant> {
        self.tables
            .read()
            .get(table)
            .and_then(|t| t.get(key))
            .and_then(|item| item.expires_at)
    }

    /// Returns `true` once [`StoreClient::shutdown`] has run.
    #[must_use]
    pub fn is_shut_down(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn enter(&self, primitive: Primitive) -> StoreResult<()> {
        *self.calls.lock().entry(primitive).or_insert(0) += 1;
        if self.is_shut_down() {
            return Err(StoreError::Closed);
        }
        Ok(())
    }

    fn write_item<T>(
        &self,
        table: &TableSpec,
        key: &str,
        apply: impl FnOnce(&mut StoredItem, Instant) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let now = Instant::now();
        let mut tables = self.tables.write();
        let items = tables.entry(table.name.clone()).or_default();
        items.retain(|_, item| !item.is_expired(now));

        let mut item = items.get(key).cloned().unwrap_or_default();
        let out = apply(&mut item, now)?;
        items.insert(key.to_string(), item);
        Ok(out)
    }

    fn adjust(
        &self,
        primitive: Primitive,
        table: &TableSpec,
        key: &str,
        attr: &str,
        delta: i64,
        ttl_secs: u32,
    ) -> StoreResult<i64> {
        self.write_item(table, key, |item, now| {
            let current = match item.attribute(attr) {
                None | Some(None) => 0,
                Some(Some(raw)) => std::str::from_utf8(raw)
                    .ok()
                    .and_then(|s| s.parse::<i64>().ok())
                    .ok_or_else(|| {
                        StoreError::rejected(primitive, format!("attribute {attr} is not numeric"))
                    })?,
            };
            let next = current.checked_add(delta).ok_or_else(|| {
                StoreError::rejected(primitive, format!("attribute {attr} would overflow"))
            })?;
            item.upsert(attr, Some(Bytes::from(next.to_string())));
            item.touch(ttl_secs, now);
            Ok(next)
        })
    }

    fn snapshot(&self, table: &TableSpec, key: Option<&str>) -> Vec<RawItem> {
        let now = Instant::now();
        let tables = self.tables.read();
        let Some(items) = tables.get(&table.name) else {
            return Vec::new();
        };
        items
            .iter()
            .filter(|(k, item)| key.map_or(true, |key| key == k.as_str()) && !item.is_expired(now))
            .map(|(k, item)| item.to_raw(k))
            .collect()
    }
}

impl StoreClient for InMemoryStore {
    fn get_attribute(
        &self,
        table: &TableSpec,
        key: &str,
        attr: &str,
    ) -> StoreResult<Option<Bytes>> {
        self.enter(Primitive::GetAttribute)?;
        let now = Instant::now();
        let tables = self.tables.read();
        let value = tables
            .get(&table.name)
            .and_then(|t| t.get(key))
            .filter(|item| !item.is_expired(now))
            .and_then(|item| item.attribute(attr).cloned())
            .flatten();
        Ok(value)
    }

    fn put_attribute(
        &self,
        table: &TableSpec,
        key: &str,
        attr: &str,
        value: Option<&[u8]>,
        ttl_secs: u32,
    ) -> StoreResult<()> {
        self.enter(Primitive::PutAttribute)?;
        if attr == table.key_attribute {
            return Err(StoreError::rejected(
                Primitive::PutAttribute,
                format!("cannot overwrite key attribute {attr}"),
            ));
        }
        self.write_item(table, key, |item, now| {
            item.upsert(attr, value.map(Bytes::copy_from_slice));
            item.touch(ttl_secs, now);
            Ok(())
        })
    }

    fn delete_item(&self, table: &TableSpec, key: &str) -> StoreResult<()> {
        self.enter(Primitive::DeleteItem)?;
        if let Some(items) = self.tables.write().get_mut(&table.name) {
            items.remove(key);
        }
        Ok(())
    }

    fn increment(
        &self,
        table: &TableSpec,
        key: &str,
        attr: &str,
        delta: i64,
        ttl_secs: u32,
    ) -> StoreResult<i64> {
        self.enter(Primitive::Increment)?;
        self.adjust(Primitive::Increment, table, key, attr, delta, ttl_secs)
    }

    fn decrement(
        &self,
        table: &TableSpec,
        key: &str,
        attr: &str,
        delta: i64,
        ttl_secs: u32,
    ) -> StoreResult<i64> {
        self.enter(Primitive::Decrement)?;
        let negated = delta.checked_neg().ok_or_else(|| {
            StoreError::rejected(Primitive::Decrement, "delta cannot be negated")
        })?;
        self.adjust(Primitive::Decrement, table, key, attr, negated, ttl_secs)
    }

    fn query(&self, table: &TableSpec, key: &str) -> StoreResult<ItemStream> {
        self.enter(Primitive::Query)?;
        let items = self.snapshot(table, Some(key));
        Ok(Box::new(items.into_iter().map(Ok)))
    }

    fn scan(&self, table: &TableSpec) -> StoreResult<ItemStream> {
        self.enter(Primitive::Scan)?;
        let items = self.snapshot(table, None);
        Ok(Box::new(items.into_iter().map(Ok)))
    }

    fn shutdown(&self) -> StoreResult<()> {
        self.enter(Primitive::Shutdown)?;
        self.closed.store(true, Ordering::SeqCst);
        tracing::debug!("in-memory store shut down");
        Ok(())
    }
}
