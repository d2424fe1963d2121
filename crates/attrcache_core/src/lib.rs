//! # attrcache core
//!
//! A backend-agnostic cache interface on top of a store that only knows
//! flat, string-valued item attributes.
//!
//! This crate provides:
//! - [`Connection`], the cache operation surface (`get`, `set`, `add`,
//!   `sub`, `remove`, `map_set`, `map_get`, `map_remove`)
//! - [`assemble`], which turns raw query/scan items into a typed [`ResultSet`]
//! - [`KeySetIndex`], the connection-scoped registry of named key groups
//!   used to delete a whole group, which the store cannot do itself
//!
//! The key-set index lives only as long as its connection. It is a cache of
//! group membership, not a source of truth, and is lost on restart.
//!
//! ## Example
//!
//! ```rust
//! use attrcache_core::{Connection, ConnectionConfig, TypedValue};
//! use attrcache_store::InMemoryStore;
//!
//! let mut conn = Connection::open(ConnectionConfig::new("cache"), InMemoryStore::new()).unwrap();
//! conn.map_set("u1", Some("users"), [("n", TypedValue::Int32(5)), ("name", "bob".into())])
//!     .unwrap();
//!
//! let rows = conn.map_get(Some("u1")).unwrap();
//! assert_eq!(rows.count(), 1);
//! assert_eq!(rows.rows()[0].get("name"), Some(&TypedValue::from("bob")));
//!
//! conn.map_remove(None, Some("users")).unwrap();
//! assert!(conn.key_sets().lookup("users").is_none());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod connection;
mod error;
mod keyset;
mod result;

pub use attrcache_codec::TypedValue;
pub use config::{ConnectionConfig, DEFAULT_KEY_ATTRIBUTE, DEFAULT_VALUE_ATTRIBUTE};
pub use connection::Connection;
pub use error::{CoreError, CoreResult};
pub use keyset::{KeySet, KeySetIndex};
pub use result::{assemble, ResultSet, Row};
