//! # attrcache store
//!
//! The store-primitive client that the cache adapter is built on.
//!
//! A store is a remote key-value service made of tables of items. Each item
//! is identified by a primary-key string and holds flat, string-valued
//! attributes. Stores know nothing about typed values or groups of keys;
//! that lives in `attrcache_core`.
//!
//! ## Available Clients
//!
//! - [`InMemoryStore`] - For testing and ephemeral caches
//! - [`FaultInjectingStore`] - Wrapper that fails chosen primitive calls
//!
//! ## Example
//!
//! ```rust
//! use attrcache_store::{InMemoryStore, StoreClient, TableSpec};
//!
//! let store = InMemoryStore::new();
//! let table = TableSpec::new("cache", "key");
//! store.put_attribute(&table, "u1", "name", Some(b"bob".as_slice()), 0).unwrap();
//! let value = store.get_attribute(&table, "u1", "name").unwrap();
//! assert_eq!(value.as_deref(), Some(&b"bob"[..]));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod error;
mod fault;
mod memory;

pub use client::{ItemStream, Primitive, RawItem, StoreClient, TableSpec};
pub use error::{StoreError, StoreResult};
pub use fault::FaultInjectingStore;
pub use memory::InMemoryStore;
