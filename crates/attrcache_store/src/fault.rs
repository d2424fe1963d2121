//! Failure injection around another store client.

use crate::client::{ItemStream, Primitive, RawItem, StoreClient, TableSpec};
use crate::error::{StoreError, StoreResult};
use bytes::Bytes;
use parking_lot::Mutex;
use std::collections::HashMap;

#[derive(Debug, Default)]
struct Plan {
    /// Primitive -> 1-based call numbers that fail.
    failing_calls: HashMap<Primitive, Vec<usize>>,
    /// Primitive -> 1-based item position at which the read stream fails.
    failing_items: HashMap<Primitive, usize>,
    calls: HashMap<Primitive, usize>,
}

/// A store client that fails chosen calls of an inner client.
///
/// Used to exercise partial-failure paths: a failed call never reaches the
/// inner client, so everything the inner client holds afterwards reflects
/// exactly the calls that succeeded.
///
/// # Example
///
/// ```rust
/// use attrcache_store::{FaultInjectingStore, InMemoryStore, Primitive, StoreClient, TableSpec};
///
/// let store = FaultInjectingStore::new(InMemoryStore::new());
/// store.fail_call(Primitive::DeleteItem, 2);
///
/// let table = TableSpec::new("cache", "key");
/// assert!(store.delete_item(&table, "a").is_ok());
/// assert!(store.delete_item(&table, "b").is_err());
/// assert!(store.delete_item(&table, "c").is_ok());
/// ```
#[derive(Debug, Default)]
pub struct FaultInjectingStore<S> {
    inner: S,
    plan: Mutex<Plan>,
}

impl<S: StoreClient> FaultInjectingStore<S> {
    /// Wraps `inner` with no failures planned.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            plan: Mutex::new(Plan::default()),
        }
    }

    /// Makes the `nth` call (1-based) of `primitive` fail.
    pub fn fail_call(&self, primitive: Primitive, nth: usize) {
        self.plan
            .lock()
            .failing_calls
            .entry(primitive)
            .or_default()
            .push(nth);
    }

    /// Makes every stream returned by `primitive` fail in place of its
    /// `nth` item (1-based). Streams shorter than `nth` are left alone.
    /// Only meaningful for `Query` and `Scan`.
    pub fn fail_stream_at(&self, primitive: Primitive, nth: usize) {
        self.plan.lock().failing_items.insert(primitive, nth);
    }

    /// Removes every planned failure. Call counts are kept.
    pub fn clear(&self) {
        let mut plan = self.plan.lock();
        plan.failing_calls.clear();
        plan.failing_items.clear();
    }

    /// Number of calls made to `primitive`, failed ones included.
    pub fn calls(&self, primitive: Primitive) -> usize {
        self.plan.lock().calls.get(&primitive).copied().unwrap_or(0)
    }

    /// Returns the wrapped client.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn check(&self, primitive: Primitive) -> StoreResult<()> {
        let mut plan = self.plan.lock();
        let count = plan.calls.entry(primitive).or_insert(0);
        *count += 1;
        let call = *count;
        let fails = plan
            .failing_calls
            .get(&primitive)
            .is_some_and(|calls| calls.contains(&call));
        if fails {
            tracing::debug!(%primitive, call, "injecting store failure");
            return Err(StoreError::unavailable(
                primitive,
                format!("injected failure on call {call}"),
            ));
        }
        Ok(())
    }

    fn wrap_stream(&self, primitive: Primitive, stream: ItemStream) -> ItemStream {
        let Some(nth) = self.plan.lock().failing_items.get(&primitive).copied() else {
            return stream;
        };
        let mut stream = stream;
        let head: Vec<StoreResult<RawItem>> =
            stream.by_ref().take(nth.saturating_sub(1)).collect();
        if stream.next().is_none() {
            return Box::new(head.into_iter());
        }
        let failed = std::iter::once(Err(StoreError::unavailable(
            primitive,
            format!("injected failure at item {nth}"),
        )));
        Box::new(head.into_iter().chain(failed))
    }
}

impl<S: StoreClient> StoreClient for FaultInjectingStore<S> {
    fn get_attribute(
        &self,
        table: &TableSpec,
        key: &str,
        attr: &str,
    ) -> StoreResult<Option<Bytes>> {
        self.check(Primitive::GetAttribute)?;
        self.inner.get_attribute(table, key, attr)
    }

    fn put_attribute(
        &self,
        table: &TableSpec,
        key: &str,
        attr: &str,
        value: Option<&[u8]>,
        ttl_secs: u32,
    ) -> StoreResult<()> {
        self.check(Primitive::PutAttribute)?;
        self.inner.put_attribute(table, key, attr, value, ttl_secs)
    }

    fn delete_item(&self, table: &TableSpec, key: &str) -> StoreResult<()> {
        self.check(Primitive::DeleteItem)?;
        self.inner.delete_item(table, key)
    }

    fn increment(
        &self,
        table: &TableSpec,
        key: &str,
        attr: &str,
        delta: i64,
        ttl_secs: u32,
    ) -> StoreResult<i64> {
        self.check(Primitive::Increment)?;
        self.inner.increment(table, key, attr, delta, ttl_secs)
    }

    fn decrement(
        &self,
        table: &TableSpec,
        key: &str,
        attr: &str,
        delta: i64,
        ttl_secs: u32,
    ) -> StoreResult<i64> {
        self.check(Primitive::Decrement)?;
        self.inner.decrement(table, key, attr, delta, ttl_secs)
    }

    fn query(&self, table: &TableSpec, key: &str) -> StoreResult<ItemStream> {
        self.check(Primitive::Query)?;
        let stream = self.inner.query(table, key)?;
        Ok(self.wrap_stream(Primitive::Query, stream))
    }

    fn scan(&self, table: &TableSpec) -> StoreResult<ItemStream> {
        self.check(Primitive::Scan)?;
        let stream = self.inner.scan(table)?;
        Ok(self.wrap_stream(Primitive::Scan, stream))
    }

    fn shutdown(&self) -> StoreResult<()> {
        self.check(Primitive::Shutdown)?;
        self.inner.shutdown()
    }
}
