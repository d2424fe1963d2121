//! Connection configuration.

use crate::error::{CoreError, CoreResult};
use attrcache_store::TableSpec;

/// Default name of the primary-key attribute.
pub const DEFAULT_KEY_ATTRIBUTE: &str = "key";

/// Default name of the attribute that holds plain cache values.
pub const DEFAULT_VALUE_ATTRIBUTE: &str = "value";

/// Configuration for opening a connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Table holding the cache items.
    pub table: String,

    /// Name of the primary-key attribute.
    pub key_attribute: String,

    /// Attribute read and written by `get`/`set`/`add`/`sub`.
    pub value_attribute: String,

    /// Store region.
    ///
    /// The adapter never reads this itself. It is carried for whoever
    /// builds the [`StoreClient`](attrcache_store::StoreClient) handed to
    /// [`Connection::open`](crate::Connection::open), and is logged there.
    pub region: Option<String>,

    /// Store endpoint override.
    ///
    /// Like `region`, this is input for the caller's client constructor
    /// and is only logged by the adapter.
    pub endpoint: Option<String>,
}

impl ConnectionConfig {
    /// Creates a configuration for `table` with default attribute names.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            key_attribute: DEFAULT_KEY_ATTRIBUTE.to_string(),
            value_attribute: DEFAULT_VALUE_ATTRIBUTE.to_string(),
            region: None,
            endpoint: None,
        }
    }

    /// Sets the primary-key attribute name.
    #[must_use]
    pub fn with_key_attribute(mut self, name: impl Into<String>) -> Self {
        self.key_attribute = name.into();
        self
    }

    /// Sets the value attribute name.
    #[must_use]
    pub fn with_value_attribute(mut self, name: impl Into<String>) -> Self {
        self.value_attribute = name.into();
        self
    }

    /// Sets the store region.
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Sets the store endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Checks that the table and attribute names are usable.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInput`] for an empty name, or when the
    /// key and value attributes are the same.
    pub fn validate(&self) -> CoreResult<()> {
        if self.table.is_empty() {
            return Err(CoreError::invalid_input("table name is empty"));
        }
        if self.key_attribute.is_empty() {
            return Err(CoreError::invalid_input("key attribute name is empty"));
        }
        if self.value_attribute.is_empty() {
            return Err(CoreError::invalid_input("value attribute name is empty"));
        }
        if self.key_attribute == self.value_attribute {
            return Err(CoreError::invalid_input(format!(
                "key and value attribute are both {}",
                self.key_attribute
            )));
        }
        Ok(())
    }

    /// The table identity handed to store primitives.
    pub fn table_spec(&self) -> TableSpec {
        TableSpec::new(&self.table, &self.key_attribute)
    }
}
