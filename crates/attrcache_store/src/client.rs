//! Store-primitive client trait definition.

use crate::error::StoreResult;
use bytes::Bytes;
use std::fmt;
use std::sync::Arc;

/// Identity of a table and the name of its primary-key attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableSpec {
    /// Table name.
    pub name: String,
    /// Name of the primary-key attribute.
    pub key_attribute: String,
}

impl TableSpec {
    /// Creates a table spec.
    pub fn new(name: impl Into<String>, key_attribute: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key_attribute: key_attribute.into(),
        }
    }
}

/// One item as returned by a query or scan, in store order.
///
/// The primary-key attribute is lifted into `key` and not repeated in
/// `attributes`. A `None` value is an attribute stored as NULL.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawItem {
    /// Primary key of the item.
    pub key: String,
    /// Attribute names and raw values, in store order.
    pub attributes: Vec<(String, Option<Bytes>)>,
}

impl RawItem {
    /// Creates an item with no attributes.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            attributes: Vec::new(),
        }
    }

    /// Appends an attribute with a value.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl AsRef<[u8]>) -> Self {
        self.attributes
            .push((name.into(), Some(Bytes::copy_from_slice(value.as_ref()))));
        self
    }

    /// Appends a NULL attribute.
    #[must_use]
    pub fn with_null(mut self, name: impl Into<String>) -> Self {
        self.attributes.push((name.into(), None));
        self
    }
}

/// Items produced by a query or scan.
///
/// Reads are paginated by the store, so a stream can fail part way through:
/// each element is either the next item or the error that ended the read.
pub type ItemStream = Box<dyn Iterator<Item = StoreResult<RawItem>> + Send>;

/// The primitives a store client offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Primitive {
    /// [`StoreClient::get_attribute`]
    GetAttribute,
    /// [`StoreClient::put_attribute`]
    PutAttribute,
    /// [`StoreClient::delete_item`]
    DeleteItem,
    /// [`StoreClient::increment`]
    Increment,
    /// [`StoreClient::decrement`]
    Decrement,
    /// [`StoreClient::query`]
    Query,
    /// [`StoreClient::scan`]
    Scan,
    /// [`StoreClient::shutdown`]
    Shutdown,
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Primitive::GetAttribute => "get_attribute",
            Primitive::PutAttribute => "put_attribute",
            Primitive::DeleteItem => "delete_item",
            Primitive::Increment => "increment",
            Primitive::Decrement => "decrement",
            Primitive::Query => "query",
            Primitive::Scan => "scan",
            Primitive::Shutdown => "shutdown",
        };
        f.write_str(name)
    }
}

/// A client for a remote key-value store.
///
/// Clients issue single requests and report what the store answered. They
/// do not retry, do not interpret attribute text, and keep no grouping
/// state. Every call is synchronous from the caller's point of view.
///
/// # Invariants
///
/// - `put_attribute` is an upsert of one attribute on one item
/// - `increment`/`decrement` are a single atomic store operation
/// - `delete_item` of an absent item succeeds
/// - `get_attribute` maps absent item, absent attribute and NULL to `None`
///
/// # Implementors
///
/// - [`super::InMemoryStore`] - For testing
/// - [`super::FaultInjectingStore`] - Failure injection around another client
pub trait StoreClient: Send + Sync {
    /// Reads one attribute of the item identified by `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot answer.
    fn get_attribute(&self, table: &TableSpec, key: &str, attr: &str)
        -> StoreResult<Option<Bytes>>;

    /// Writes one attribute of the item identified by `key`, creating the
    /// item if needed. `None` writes a NULL attribute. A non-zero
    /// `ttl_secs` sets the item to expire that many seconds from now; zero
    /// leaves the item without an expiry, clearing any earlier one.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects or cannot apply the write.
    fn put_attribute(
        &self,
        table: &TableSpec,
        key: &str,
        attr: &str,
        value: Option<&[u8]>,
        ttl_secs: u32,
    ) -> StoreResult<()>;

    /// Deletes the whole item identified by `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot apply the delete.
    fn delete_item(&self, table: &TableSpec, key: &str) -> StoreResult<()>;

    /// Atomically adds `delta` to a numeric attribute and returns the new
    /// value. An absent attribute counts as zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the attribute is not numeric or the store cannot
    /// apply the update.
    fn increment(
        &self,
        table: &TableSpec,
        key: &str,
        attr: &str,
        delta: i64,
        ttl_secs: u32,
    ) -> StoreResult<i64>;

    /// Atomically subtracts `delta` from a numeric attribute and returns the
    /// new value. An absent attribute counts as zero.
    ///
    /// # Errors
    ///
    /// Same as [`StoreClient::increment`].
    fn decrement(
        &self,
        table: &TableSpec,
        key: &str,
        attr: &str,
        delta: i64,
        ttl_secs: u32,
    ) -> StoreResult<i64>;

    /// Reads every item whose primary key equals `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query cannot be started; later pages report
    /// their failures through the stream.
    fn query(&self, table: &TableSpec, key: &str) -> StoreResult<ItemStream>;

    /// Reads every item of the table. Unbounded.
    ///
    /// # Errors
    ///
    /// Same as [`StoreClient::query`].
    fn scan(&self, table: &TableSpec) -> StoreResult<ItemStream>;

    /// Releases the client. Later calls fail with [`crate::StoreError::Closed`].
    ///
    /// # Errors
    ///
    /// Returns an error if the client was already shut down.
    fn shutdown(&self) -> StoreResult<()>;
}

impl<S: StoreClient + ?Sized> StoreClient for Arc<S> {
    fn get_attribute(
        &self,
        table: &TableSpec,
        key: &str,
        attr: &str,
    ) -> StoreResult<Option<Bytes>> {
        (**self).get_attribute(table, key, attr)
    }

    fn put_attribute(
        &self,
        table: &TableSpec,
        key: &str,
        attr: &str,
        value: Option<&[u8]>,
        ttl_secs: u32,
    ) -> StoreResult<()> {
        (**self).put_attribute(table, key, attr, value, ttl_secs)
    }

    fn delete_item(&self, table: &TableSpec, key: &str) -> StoreResult<()> {
        (**self).delete_item(table, key)
    }

    fn increment(
        &self,
        table: &TableSpec,
        key: &str,
        attr: &str,
        delta: i64,
        ttl_secs: u32,
    ) -> StoreResult<i64> {
        (**self).increment(table, key, attr, delta, ttl_secs)
    }

    fn decrement(
        &self,
        table: &TableSpec,
        key: &str,
        attr: &str,
        delta: i64,
        ttl_secs: u32,
    ) -> StoreResult<i64> {
        (**self).decrement(table, key, attr, delta, ttl_secs)
    }

    fn query(&self, table: &TableSpec, key: &str) -> StoreResult<ItemStream> {
        (**self).query(table, key)
    }

    fn scan(&self, table: &TableSpec) -> StoreResult<ItemStream> {
        (**self).scan(table)
    }

    fn shutdown(&self) -> StoreResult<()> {
        (**self).shutdown()
    }
}
