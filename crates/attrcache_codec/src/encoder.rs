//! Encoding of typed values into attribute text.

use crate::error::{CodecError, CodecResult};
use crate::value::TypedValue;
use bytes::Bytes;
use std::fmt::Write;

/// Buffer capacity that holds any `i32` in base 10, sign included.
pub const INT32_TEXT_CAPACITY: usize = 12;

/// Buffer capacity that holds any `i64` in base 10, sign included.
pub const INT64_TEXT_CAPACITY: usize = 20;

/// Encode a value into the form written to the store.
///
/// Integers become their canonical base-10 text (optional leading `-`, no
/// leading zeros, no separators). Strings are passed through unchanged.
/// `Null` has no string form and encodes to `None`; the caller writes a
/// null attribute instead of text.
///
/// # Errors
///
/// Returns [`CodecError::Allocation`] if the integer buffer cannot be
/// reserved. No partial output is produced in that case.
pub fn encode(value: &TypedValue) -> CodecResult<Option<Bytes>> {
    match value {
        TypedValue::Null => Ok(None),
        TypedValue::Int32(n) => encode_integer(*n, INT32_TEXT_CAPACITY, "int32").map(Some),
        TypedValue::Int64(n) => encode_integer(*n, INT64_TEXT_CAPACITY, "int64").map(Some),
        TypedValue::Str(b) => Ok(Some(b.clone())),
    }
}

fn encode_integer<N: std::fmt::Display>(
    n: N,
    capacity: usize,
    kind: &'static str,
) -> CodecResult<Bytes> {
    let mut text = String::new();
    text.try_reserve_exact(capacity)
        .map_err(|_| CodecError::allocation(format!("encoding {kind}")))?;
    write!(text, "{n}").map_err(|_| CodecError::allocation(format!("formatting {kind}")))?;
    Ok(Bytes::from(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: TypedValue) -> String {
        let bytes = encode(&value).unwrap().unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn encode_null_has_no_text() {
        assert_eq!(encode(&TypedValue::Null).unwrap(), None);
    }

    #[test]
    fn encode_int32_bounds() {
        assert_eq!(text(TypedValue::Int32(0)), "0");
        assert_eq!(text(TypedValue::Int32(-5)), "-5");
        assert_eq!(text(TypedValue::Int32(i32::MAX)), "2147483647");
        assert_eq!(text(TypedValue::Int32(i32::MIN)), "-2147483648");
    }

    #[test]
    fn encode_int64_bounds() {
        assert_eq!(text(TypedValue::Int64(i64::MAX)), "9223372036854775807");
        assert_eq!(text(TypedValue::Int64(i64::MIN)), "-9223372036854775808");
    }

    #[test]
    fn capacities_cover_full_range() {
        assert!(i32::MIN.to_string().len() <= INT32_TEXT_CAPACITY);
        assert!(i64::MIN.to_string().len() <= INT64_TEXT_CAPACITY);
    }

    #[test]
    fn encode_string_is_passthrough() {
        let raw = Bytes::from_static(b"\x00bin\xffary");
        let encoded = encode(&TypedValue::Str(raw.clone())).unwrap();
        assert_eq!(encoded, Some(raw));
    }
}
