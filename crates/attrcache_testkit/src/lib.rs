//! # attrcache testkit
//!
//! Test utilities for attrcache.
//!
//! This crate provides:
//! - Connection fixtures over an in-memory, fault-injectable store
//! - Property-based test generators using proptest
//! - Shared decode vectors for the type-recovery rules
//!
//! ## Usage
//!
//! ```rust
//! use attrcache_testkit::prelude::*;
//! use attrcache_core::TypedValue;
//!
//! let mut t = TestConnection::new();
//! t.conn.map_set("u1", Some("g"), [("n", TypedValue::Int32(5))]).unwrap();
//! assert!(t.has_item("u1"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod vectors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::vectors::*;
}

pub use fixtures::*;
pub use generators::*;
pub use vectors::*;
