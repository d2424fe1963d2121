//! # attrcache codec
//!
//! Conversion between the generic cache value model and the string-only
//! attribute form understood by the remote store.
//!
//! The store keeps every attribute as text and never records what type the
//! writer had in mind, so reads recover the type heuristically:
//!
//! 1. a full-token base-10 integer that fits `i32` becomes [`TypedValue::Int32`]
//! 2. otherwise one that fits `i64` becomes [`TypedValue::Int64`]
//! 3. any other present value becomes [`TypedValue::Str`], byte for byte
//! 4. an absent value becomes [`TypedValue::Null`]
//!
//! ## Usage
//!
//! ```
//! use attrcache_codec::{decode, encode, TypedValue};
//!
//! let raw = encode(&TypedValue::Int64(1 << 40)).unwrap().unwrap();
//! assert_eq!(&raw[..], b"1099511627776");
//! assert_eq!(decode(Some(&raw[..])), TypedValue::Int64(1 << 40));
//!
//! // Numeric-looking text with trailing characters stays text.
//! assert_eq!(decode(Some(b"007x".as_slice())), TypedValue::from("007x"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod decoder;
mod encoder;
mod error;
mod value;

pub use decoder::{decode, parse_i32, parse_i64};
pub use encoder::{encode, INT32_TEXT_CAPACITY, INT64_TEXT_CAPACITY};
pub use error::{CodecError, CodecResult};
pub use value::TypedValue;
