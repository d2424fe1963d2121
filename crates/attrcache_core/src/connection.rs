//! The cache adapter: generic cache operations over store primitives.

use crate::config::ConnectionConfig;
use crate::error::{CoreError, CoreResult};
use crate::keyset::KeySetIndex;
use crate::result::{assemble, ResultSet};
use attrcache_codec::{decode, encode, CodecError, TypedValue};
use attrcache_store::{StoreClient, TableSpec};
use bytes::Bytes;
use tracing::{debug, error, warn};

/// A cache connection.
///
/// Plain cache values live in the configured value attribute of the item
/// whose primary key is the cache key. Map operations write and read
/// arbitrary attributes of an item, and may file the item's key under a
/// named key-set so the group can be removed later.
///
/// # Concurrency
///
/// A connection is meant for one worker at a time; mutating operations take
/// `&mut self` and the key-set index has no internal locking. Counter
/// updates rely on the store's atomic increment, so they stay correct
/// across connections and processes.
///
/// # Lifecycle
///
/// The key-set index starts empty at [`Connection::open`] and is dropped
/// with the connection. [`Connection::close`] shuts the store client down;
/// dropping an unclosed connection does the same.
pub struct Connection {
    config: ConnectionConfig,
    table: TableSpec,
    store: Box<dyn StoreClient>,
    key_sets: KeySetIndex,
    closed: bool,
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("config", &self.config)
            .field("key_sets", &self.key_sets)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

impl Connection {
    /// Opens a connection over `store`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInput`] if the configuration is invalid.
    pub fn open(config: ConnectionConfig, store: impl StoreClient + 'static) -> CoreResult<Self> {
        config.validate()?;
        debug!(
            table = %config.table,
            key_attribute = %config.key_attribute,
            value_attribute = %config.value_attribute,
            region = ?config.region,
            endpoint = ?config.endpoint,
            "opening cache connection"
        );
        Ok(Self {
            table: config.table_spec(),
            config,
            store: Box::new(store),
            key_sets: KeySetIndex::new(),
            closed: false,
        })
    }

    /// The configuration this connection was opened with.
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// The key-sets registered on this connection.
    pub fn key_sets(&self) -> &KeySetIndex {
        &self.key_sets
    }

    /// Reads the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] if the value is absent or null, and
    /// [`CoreError::Backend`] if the store fails.
    pub fn get(&self, key: &str) -> CoreResult<Bytes> {
        require("key", key)?;
        let value = self
            .store
            .get_attribute(&self.table, key, &self.config.value_attribute)
            .map_err(|err| {
                error!(key, %err, "get failed");
                err
            })?;
        value.ok_or_else(|| CoreError::not_found(key))
    }

    /// Reads the counter stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] if the value is absent or null,
    /// [`CoreError::Codec`] if it is not an integer, and
    /// [`CoreError::Backend`] if the store fails.
    pub fn get_counter(&self, key: &str) -> CoreResult<i64> {
        let raw = self.get(key)?;
        let value = decode(Some(&raw[..]));
        value.as_i64().ok_or_else(|| {
            CodecError::NotAnInteger {
                found: value.type_name(),
            }
            .into()
        })
    }

    /// Stores `value` under `key`. `expires` is a lifetime in seconds; zero
    /// means no expiry.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Backend`] if the write fails.
    pub fn set(&self, key: &str, value: &[u8], expires: u32) -> CoreResult<()> {
        require("key", key)?;
        self.store
            .put_attribute(
                &self.table,
                key,
                &self.config.value_attribute,
                Some(value),
                expires,
            )
            .map_err(|err| {
                error!(key, %err, "set failed");
                err.into()
            })
    }

    /// Atomically adds `delta` to the counter under `key` and returns the
    /// new value exactly as the store reports it.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Backend`] if the store rejects the update.
    pub fn add(&self, key: &str, delta: i64, expires: u32) -> CoreResult<i64> {
        require("key", key)?;
        self.store
            .increment(
                &self.table,
                key,
                &self.config.value_attribute,
                delta,
                expires,
            )
            .map_err(|err| {
                error!(key, delta, %err, "add failed");
                err.into()
            })
    }

    /// Atomically subtracts `delta` from the counter under `key` and
    /// returns the new value exactly as the store reports it.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Backend`] if the store rejects the update.
    pub fn sub(&self, key: &str, delta: i64, expires: u32) -> CoreResult<i64> {
        require("key", key)?;
        self.store
            .decrement(
                &self.table,
                key,
                &self.config.value_attribute,
                delta,
                expires,
            )
            .map_err(|err| {
                error!(key, delta, %err, "sub failed");
                err.into()
            })
    }

    /// Deletes the item under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Backend`] if the delete fails.
    pub fn remove(&self, key: &str) -> CoreResult<()> {
        require("key", key)?;
        self.store.delete_item(&self.table, key).map_err(|err| {
            error!(key, %err, "remove failed");
            err.into()
        })
    }

    /// Writes each attribute pair onto the item under `key`, one upsert per
    /// pair, then files `key` under `key_set` if one is given.
    ///
    /// A failed write of a `Null` value is tolerated. This is not a
    /// transaction: when a later pair fails, earlier pairs stay written and
    /// the key is not filed under the key-set.
    ///
    /// # Errors
    ///
    /// - [`CoreError::InvalidInput`] for an empty key, key-set name or
    ///   attribute name, before anything is written
    /// - [`CoreError::PartialFailure`] if a pair fails after others committed
    /// - the pair's own error if the first written pair fails
    pub fn map_set<I, K>(&mut self, key: &str, key_set: Option<&str>, pairs: I) -> CoreResult<()>
    where
        I: IntoIterator<Item = (K, TypedValue)>,
        K: AsRef<str>,
    {
        require("key", key)?;
        if let Some(name) = key_set {
            require("key-set name", name)?;
        }
        let pairs: Vec<(K, TypedValue)> = pairs.into_iter().collect();
        for (name, _) in &pairs {
            require("attribute name", name.as_ref())?;
        }

        let mut committed = Vec::with_capacity(pairs.len());
        for (name, value) in &pairs {
            let attr = name.as_ref();
            let raw = encode(value).map_err(|err| {
                CoreError::batch_step("map_set", committed.clone(), attr, err.into())
            })?;

            match self
                .store
                .put_attribute(&self.table, key, attr, raw.as_deref(), 0)
            {
                Ok(()) => committed.push(attr.to_string()),
                Err(err) if value.is_null() => {
                    warn!(key, attr, %err, "null attribute write failed, ignoring");
                }
                Err(err) => {
                    error!(key, attr, %err, "map_set write failed");
                    return Err(CoreError::batch_step(
                        "map_set",
                        committed,
                        attr,
                        err.into(),
                    ));
                }
            }
        }

        if let Some(name) = key_set {
            self.key_sets.add_member(name, key);
        }
        Ok(())
    }

    /// Reads items as typed rows: those under `key`, or the whole table
    /// when `key` is `None`.
    ///
    /// The full scan is unbounded and reads every item in the table.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Backend`] if the read fails at any point, and
    /// [`CoreError::Codec`] if rows cannot be allocated. No rows are
    /// returned on error.
    pub fn map_get(&self, key: Option<&str>) -> CoreResult<ResultSet> {
        let stream = match key {
            Some(key) => {
                require("key", key)?;
                self.store.query(&self.table, key)
            }
            None => {
                debug!(table = %self.table.name, "map_get without key, scanning table");
                self.store.scan(&self.table)
            }
        }
        .map_err(|err| {
            error!(?key, %err, "map_get read failed");
            CoreError::from(err)
        })?;

        assemble(stream).map_err(|err| {
            error!(?key, %err, "map_get assembly failed");
            err
        })
    }

    /// Removes an item, a key-set member, or a whole key-set.
    ///
    /// - `key` only: deletes the item under `key`.
    /// - `key` and `key_set`: drops `key` from the set and deletes its
    ///   item, whether or not `key` was a member.
    /// - `key_set` only: deletes every member's item in order, dropping
    ///   each member from the set once its item is gone, then removes the
    ///   set. On failure the remaining members stay in the set.
    ///
    /// # Errors
    ///
    /// - [`CoreError::InvalidInput`] when neither argument is given
    /// - [`CoreError::GroupNotFound`] when `key_set` names no set
    /// - [`CoreError::PartialFailure`] when a group delete fails after
    ///   earlier members were deleted
    /// - [`CoreError::Backend`] when a delete fails otherwise
    pub fn map_remove(&mut self, key: Option<&str>, key_set: Option<&str>) -> CoreResult<()> {
        match (key, key_set) {
            (None, None) => Err(CoreError::invalid_input(
                "map_remove needs a key, a key-set, or both",
            )),
            (Some(key), None) => self.remove(key),
            (Some(key), Some(set)) => {
                if self.key_sets.lookup(set).is_none() {
                    return Err(CoreError::group_not_found(set));
                }
                self.key_sets.remove_member(set, key);
                self.remove(key)
            }
            (None, Some(set)) => self.remove_key_set(set),
        }
    }

    fn remove_key_set(&mut self, set: &str) -> CoreResult<()> {
        let members = self
            .key_sets
            .lookup(set)
            .map(|s| s.members().to_vec())
            .ok_or_else(|| CoreError::group_not_found(set))?;

        debug!(set, members = members.len(), "removing key-set");
        for (done, member) in members.iter().enumerate() {
            if let Err(err) = self.remove(member) {
                return Err(CoreError::batch_step(
                    "map_remove",
                    members[..done].to_vec(),
                    member.as_str(),
                    err,
                ));
            }
            self.key_sets.remove_member(set, member);
        }
        self.key_sets.remove_set(set);
        Ok(())
    }

    /// Shuts the store client down and drops the key-set index.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Backend`] if the store reports a shutdown error.
    pub fn close(mut self) -> CoreResult<()> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> CoreResult<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.key_sets.clear();
        self.store.shutdown()?;
        Ok(())
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        if let Err(err) = self.shutdown() {
            warn!(%err, "store shutdown failed while dropping connection");
        }
    }
}

fn require(what: &str, value: &str) -> CoreResult<()> {
    if value.is_empty() {
        return Err(CoreError::invalid_input(format!("{what} is empty")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use attrcache_store::{FaultInjectingStore, InMemoryStore, Primitive, StoreError};
    use std::sync::Arc;

    type Store = Arc<FaultInjectingStore<InMemoryStore>>;

    fn open() -> (Connection, Store) {
        let store = Arc::new(FaultInjectingStore::new(InMemoryStore::new()));
        let conn = Connection::open(ConnectionConfig::new("cache"), Arc::clone(&store)).unwrap();
        (conn, store)
    }

    fn has_item(store: &Store, key: &str) -> bool {
        store.inner().contains_item("cache", key)
    }

    #[test]
    fn open_rejects_invalid_config() {
        let result = Connection::open(ConnectionConfig::new(""), InMemoryStore::new());
        assert!(matches!(result, Err(CoreError::InvalidInput { .. })));
    }

    #[test]
    fn set_then_get() {
        let (conn, _store) = open();
        conn.set("k", b"hello", 0).unwrap();
        assert_eq!(&conn.get("k").unwrap()[..], b"hello");
    }

    #[test]
    fn get_absent_is_not_found() {
        let (conn, _store) = open();
        assert!(conn.get("missing").unwrap_err().is_not_found());
    }

    #[test]
    fn get_null_is_not_found() {
        let (mut conn, _store) = open();
        conn.map_set("k", None, [("value", TypedValue::Null)]).unwrap();
        assert!(conn.get("k").unwrap_err().is_not_found());
    }

    #[test]
    fn get_backend_failure_is_not_not_found() {
        let (conn, store) = open();
        store.fail_call(Primitive::GetAttribute, 1);
        assert!(matches!(conn.get("k"), Err(CoreError::Backend(_))));
    }

    #[test]
    fn empty_key_is_invalid() {
        let (conn, store) = open();
        assert!(matches!(conn.get(""), Err(CoreError::InvalidInput { .. })));
        assert!(matches!(conn.set("", b"v", 0), Err(CoreError::InvalidInput { .. })));
        assert_eq!(store.calls(Primitive::PutAttribute), 0);
    }

    #[test]
    fn set_failure_is_backend_error() {
        let (conn, store) = open();
        store.fail_call(Primitive::PutAttribute, 1);
        assert!(matches!(conn.set("k", b"v", 0), Err(CoreError::Backend(_))));
    }

    #[test]
    fn set_with_expiry_reaches_store() {
        let (conn, store) = open();
        conn.set("k", b"v", 30).unwrap();
        assert!(store.inner().expires_at("cache", "k").is_some());
    }

    #[test]
    fn get_counter_reads_integers() {
        let (conn, _store) = open();
        conn.set("small", b"42", 0).unwrap();
        conn.set("big", b"8589934592", 0).unwrap();
        assert_eq!(conn.get_counter("small").unwrap(), 42);
        assert_eq!(conn.get_counter("big").unwrap(), 8_589_934_592);
    }

    #[test]
    fn get_counter_non_numeric_is_codec_error() {
        let (conn, _store) = open();
        conn.set("k", b"12a", 0).unwrap();
        assert!(matches!(
            conn.get_counter("k"),
            Err(CoreError::Codec(CodecError::NotAnInteger { found: "string" }))
        ));
        assert!(conn.get_counter("absent").unwrap_err().is_not_found());
    }

    #[test]
    fn add_on_unset_counter_returns_store_result() {
        let (conn, store) = open();
        assert_eq!(conn.add("counter", 3, 0).unwrap(), 3);
        assert_eq!(conn.sub("counter", 5, 0).unwrap(), -2);
        assert_eq!(conn.get_counter("counter").unwrap(), -2);
        // Single atomic primitive each, no read-modify-write.
        assert_eq!(store.calls(Primitive::Increment), 1);
        assert_eq!(store.calls(Primitive::Decrement), 1);
        assert_eq!(store.calls(Primitive::GetAttribute), 1);
    }

    #[test]
    fn add_failure_is_backend_error() {
        let (conn, _store) = open();
        conn.set("k", b"text", 0).unwrap();
        assert!(matches!(
            conn.add("k", 1, 0),
            Err(CoreError::Backend(StoreError::Rejected { .. }))
        ));
    }

    #[test]
    fn remove_deletes_item() {
        let (conn, store) = open();
        conn.set("k", b"v", 0).unwrap();
        conn.remove("k").unwrap();
        assert!(!has_item(&store, "k"));
    }

    #[test]
    fn remove_failure_is_backend_error() {
        let (mut conn, store) = open();
        conn.set("k", b"v", 0).unwrap();
        store.fail_call(Primitive::DeleteItem, 1);
        store.fail_call(Primitive::DeleteItem, 2);

        assert!(matches!(conn.remove("k"), Err(CoreError::Backend(_))));
        assert!(matches!(
            conn.map_remove(Some("k"), None),
            Err(CoreError::Backend(_))
        ));
        assert!(has_item(&store, "k"));

        conn.map_remove(Some("k"), None).unwrap();
        assert!(!has_item(&store, "k"));
    }

    #[test]
    fn map_set_then_map_get() {
        let (mut conn, _store) = open();
        conn.map_set(
            "u1",
            Some("grp"),
            [("n", TypedValue::Int32(5)), ("name", TypedValue::from("bob"))],
        )
        .unwrap();

        let set = conn.map_get(Some("u1")).unwrap();
        assert_eq!(set.count(), 1);
        let row = &set.rows()[0];
        assert_eq!(row.key(), "u1");
        assert_eq!(
            row.attributes(),
            [
                ("n".to_string(), TypedValue::Int32(5)),
                ("name".to_string(), TypedValue::from("bob")),
            ]
        );
        assert!(conn.key_sets().contains_member("grp", "u1"));
    }

    #[test]
    fn map_set_int64_roundtrips() {
        let (mut conn, _store) = open();
        conn.map_set("u1", None, [("big", TypedValue::Int64(i64::MIN))])
            .unwrap();
        let set = conn.map_get(Some("u1")).unwrap();
        assert_eq!(set.rows()[0].get("big"), Some(&TypedValue::Int64(i64::MIN)));
    }

    #[test]
    fn map_set_tolerates_failed_null_write() {
        let (mut conn, store) = open();
        store.fail_call(Primitive::PutAttribute, 1);
        conn.map_set(
            "u1",
            Some("g"),
            [("gone", TypedValue::Null), ("n", TypedValue::Int32(1))],
        )
        .unwrap();
        assert!(conn.key_sets().contains_member("g", "u1"));
    }

    #[test]
    fn map_set_partial_failure_keeps_committed_pairs() {
        let (mut conn, store) = open();
        store.fail_call(Primitive::PutAttribute, 2);

        let err = conn
            .map_set(
                "u1",
                Some("g"),
                [
                    ("a", TypedValue::Int32(1)),
                    ("b", TypedValue::Int32(2)),
                    ("c", TypedValue::Int32(3)),
                ],
            )
            .unwrap_err();
        match err {
            CoreError::PartialFailure {
                operation,
                committed,
                failed,
                ..
            } => {
                assert_eq!(operation, "map_set");
                assert_eq!(committed, ["a"]);
                assert_eq!(failed, "b");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let row = conn.map_get(Some("u1")).unwrap().into_rows().remove(0);
        assert_eq!(row.names().collect::<Vec<_>>(), ["a"]);
        assert!(conn.key_sets().lookup("g").is_none());
    }

    #[test]
    fn map_set_first_pair_failure_is_backend_error() {
        let (mut conn, store) = open();
        store.fail_call(Primitive::PutAttribute, 1);
        let result = conn.map_set("u1", None, [("a", TypedValue::Int32(1))]);
        assert!(matches!(result, Err(CoreError::Backend(_))));
    }

    #[test]
    fn map_set_rejects_empty_attribute_before_writing() {
        let (mut conn, store) = open();
        let result = conn.map_set(
            "u1",
            None,
            [("a", TypedValue::Int32(1)), ("", TypedValue::Int32(2))],
        );
        assert!(matches!(result, Err(CoreError::InvalidInput { .. })));
        assert_eq!(store.calls(Primitive::PutAttribute), 0);
    }

    #[test]
    fn map_get_without_key_scans() {
        let (mut conn, store) = open();
        conn.map_set("a", None, [("v", TypedValue::Int32(1))]).unwrap();
        conn.map_set("b", None, [("v", TypedValue::Int32(2))]).unwrap();

        let set = conn.map_get(None).unwrap();
        assert_eq!(set.count(), 2);
        assert_eq!(store.calls(Primitive::Scan), 1);
        assert_eq!(store.calls(Primitive::Query), 0);
    }

    #[test]
    fn map_get_unknown_key_is_empty() {
        let (conn, _store) = open();
        assert!(conn.map_get(Some("nope")).unwrap().is_empty());
    }

    #[test]
    fn map_get_stream_failure_returns_no_rows() {
        let (mut conn, store) = open();
        for key in ["a", "b", "c"] {
            conn.map_set(key, None, [("v", TypedValue::Int32(1))]).unwrap();
        }
        store.fail_stream_at(Primitive::Scan, 3);
        assert!(matches!(conn.map_get(None), Err(CoreError::Backend(_))));
    }

    #[test]
    fn map_remove_needs_an_argument() {
        let (mut conn, _store) = open();
        assert!(matches!(
            conn.map_remove(None, None),
            Err(CoreError::InvalidInput { .. })
        ));
    }

    #[test]
    fn map_remove_single_key() {
        let (mut conn, store) = open();
        conn.map_set("u1", None, [("v", TypedValue::Int32(1))]).unwrap();
        conn.map_remove(Some("u1"), None).unwrap();
        assert!(!has_item(&store, "u1"));
    }

    #[test]
    fn map_remove_member_of_missing_group_fails() {
        let (mut conn, store) = open();
        conn.map_set("u1", None, [("v", TypedValue::Int32(1))]).unwrap();
        assert!(matches!(
            conn.map_remove(Some("u1"), Some("nope")),
            Err(CoreError::GroupNotFound { .. })
        ));
        assert!(has_item(&store, "u1"));
    }

    #[test]
    fn map_remove_member_deletes_item_and_membership() {
        let (mut conn, store) = open();
        conn.map_set("u1", Some("g"), [("v", TypedValue::Int32(1))]).unwrap();
        conn.map_set("u2", Some("g"), [("v", TypedValue::Int32(2))]).unwrap();

        conn.map_remove(Some("u1"), Some("g")).unwrap();
        assert!(!has_item(&store, "u1"));
        assert_eq!(conn.key_sets().lookup("g").unwrap().members(), ["u2"]);
    }

    #[test]
    fn map_remove_member_delete_failure_drops_membership() {
        let (mut conn, store) = open();
        conn.map_set("u1", Some("g"), [("v", TypedValue::Int32(1))]).unwrap();
        conn.map_set("u2", Some("g"), [("v", TypedValue::Int32(2))]).unwrap();
        store.fail_call(Primitive::DeleteItem, 1);

        assert!(matches!(
            conn.map_remove(Some("u1"), Some("g")),
            Err(CoreError::Backend(StoreError::Unavailable { .. }))
        ));
        assert!(has_item(&store, "u1"));
        let set = conn.key_sets().lookup("g").unwrap();
        assert!(!set.contains("u1"));
        assert_eq!(set.members(), ["u2"]);
    }

    #[test]
    fn map_remove_non_member_still_deletes_item() {
        let (mut conn, store) = open();
        conn.map_set("u1", Some("g"), [("v", TypedValue::Int32(1))]).unwrap();
        conn.map_set("other", None, [("v", TypedValue::Int32(2))]).unwrap();

        conn.map_remove(Some("other"), Some("g")).unwrap();
        assert!(!has_item(&store, "other"));
        assert_eq!(conn.key_sets().lookup("g").unwrap().members(), ["u1"]);
    }

    #[test]
    fn map_remove_whole_group() {
        let (mut conn, store) = open();
        for key in ["k1", "k2", "k3"] {
            conn.map_set(key, Some("g1"), [("v", TypedValue::Int32(1))]).unwrap();
        }
        conn.map_set("keep", None, [("v", TypedValue::Int32(1))]).unwrap();

        conn.map_remove(None, Some("g1")).unwrap();
        for key in ["k1", "k2", "k3"] {
            assert!(!has_item(&store, key));
        }
        assert!(has_item(&store, "keep"));
        assert!(conn.key_sets().lookup("g1").is_none());
    }

    #[test]
    fn map_remove_whole_group_stops_at_failure() {
        let (mut conn, store) = open();
        for key in ["k1", "k2", "k3"] {
            conn.map_set(key, Some("g1"), [("v", TypedValue::Int32(1))]).unwrap();
        }
        store.fail_call(Primitive::DeleteItem, 2);

        let err = conn.map_remove(None, Some("g1")).unwrap_err();
        match err {
            CoreError::PartialFailure {
                committed, failed, ..
            } => {
                assert_eq!(committed, ["k1"]);
                assert_eq!(failed, "k2");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(!has_item(&store, "k1"));
        assert!(has_item(&store, "k2"));
        assert!(has_item(&store, "k3"));
        assert_eq!(conn.key_sets().lookup("g1").unwrap().members(), ["k2", "k3"]);
    }

    #[test]
    fn map_remove_missing_group_fails() {
        let (mut conn, store) = open();
        assert!(matches!(
            conn.map_remove(None, Some("nope")),
            Err(CoreError::GroupNotFound { .. })
        ));
        assert_eq!(store.calls(Primitive::DeleteItem), 0);
    }

    #[test]
    fn close_shuts_store_down_once() {
        let (conn, store) = open();
        conn.close().unwrap();
        assert!(store.inner().is_shut_down());
        assert_eq!(store.calls(Primitive::Shutdown), 1);
    }

    #[test]
    fn drop_shuts_store_down() {
        let (conn, store) = open();
        drop(conn);
        assert!(store.inner().is_shut_down());
        assert_eq!(store.calls(Primitive::Shutdown), 1);
    }

    #[test]
    fn close_reports_shutdown_failure() {
        let (conn, store) = open();
        store.fail_call(Primitive::Shutdown, 1);
        assert!(matches!(conn.close(), Err(CoreError::Backend(_))));
        assert_eq!(store.calls(Primitive::Shutdown), 1);
    }
}
