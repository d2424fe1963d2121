//! Connection fixtures.
//!
//! Provides a connection wired to an in-memory store behind a
//! fault-injecting wrapper, with the store kept reachable for assertions.

use attrcache_core::{Connection, ConnectionConfig};
use attrcache_store::{FaultInjectingStore, InMemoryStore};
use std::sync::{Arc, Once};
use tracing_subscriber::EnvFilter;

/// Table used by [`TestConnection`].
pub const TEST_TABLE: &str = "attrcache_test";

/// Store handle shared between a [`TestConnection`] and the test body.
pub type TestStore = Arc<FaultInjectingStore<InMemoryStore>>;

/// A connection plus the store it talks to.
pub struct TestConnection {
    /// The connection under test.
    pub conn: Connection,
    /// The store behind it.
    pub store: TestStore,
}

impl TestConnection {
    /// Opens a connection on [`TEST_TABLE`] with default attribute names.
    pub fn new() -> Self {
        Self::with_config(ConnectionConfig::new(TEST_TABLE))
    }

    /// Opens a connection with the given configuration.
    pub fn with_config(config: ConnectionConfig) -> Self {
        init_tracing();
        let store: TestStore = Arc::new(FaultInjectingStore::new(InMemoryStore::new()));
        let conn = Connection::open(config, Arc::clone(&store))
            .expect("Failed to open test connection");
        Self { conn, store }
    }

    /// Returns `true` if the store holds a live item under `key`.
    pub fn has_item(&self, key: &str) -> bool {
        self.store
            .inner()
            .contains_item(&self.conn.config().table, key)
    }

    /// Number of live items in the connection's table.
    pub fn item_count(&self) -> usize {
        self.store.inner().item_count(&self.conn.config().table)
    }
}

impl Default for TestConnection {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for TestConnection {
    type Target = Connection;

    fn deref(&self) -> &Self::Target {
        &self.conn
    }
}

impl std::ops::DerefMut for TestConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.conn
    }
}

/// Installs a test-friendly tracing subscriber once per process.
///
/// Honors `RUST_LOG`; stays quiet otherwise.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use attrcache_core::TypedValue;

    #[test]
    fn fixture_sees_writes() {
        let mut t = TestConnection::new();
        assert_eq!(t.item_count(), 0);
        t.map_set("a", None, [("v", TypedValue::Int32(1))]).unwrap();
        assert!(t.has_item("a"));
        assert_eq!(t.item_count(), 1);
    }

    #[test]
    fn fixture_honors_config() {
        let t = TestConnection::with_config(ConnectionConfig::new("other").with_value_attribute("v"));
        t.set("k", b"x", 0).unwrap();
        assert!(t.store.inner().contains_item("other", "k"));
        assert!(t.has_item("k"));
    }
}
