//! Type recovery for attribute text read back from the store.

use crate::value::TypedValue;
use bytes::Bytes;

/// Decode a raw attribute value into a typed value.
///
/// The store does not record types, so they are recovered in a fixed order:
/// `Int32` if the whole token is a base-10 integer in `i32` range, then
/// `Int64` if it is one in `i64` range, then `Str` for any other present
/// value, and `Null` when the value is absent.
///
/// Leading ASCII whitespace is skipped. After that a token "parses" only if
/// it is non-empty and every remaining byte is consumed: `"12a"`, `"12 "`
/// and `""` all stay strings, while `" 12"` reads as `Int32(12)`. Integers
/// outside the `i64` range also stay strings.
pub fn decode(raw: Option<&[u8]>) -> TypedValue {
    let Some(raw) = raw else {
        return TypedValue::Null;
    };

    if let Some(n) = parse_i32(raw) {
        TypedValue::Int32(n)
    } else if let Some(n) = parse_i64(raw) {
        TypedValue::Int64(n)
    } else {
        TypedValue::Str(Bytes::copy_from_slice(raw))
    }
}

/// Parse a full-token base-10 `i32`, skipping leading whitespace.
pub fn parse_i32(raw: &[u8]) -> Option<i32> {
    integer_token(raw)?.parse().ok()
}

/// Parse a full-token base-10 `i64`, skipping leading whitespace.
pub fn parse_i64(raw: &[u8]) -> Option<i64> {
    integer_token(raw)?.parse().ok()
}

fn integer_token(raw: &[u8]) -> Option<&str> {
    let start = raw
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(raw.len());
    std::str::from_utf8(&raw[start..]).ok()
}
