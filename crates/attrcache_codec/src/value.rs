//! The generic cache value.

use bytes::Bytes;
use std::fmt;

/// A value exchanged with the surrounding cache abstraction.
///
/// Exactly one tag is active. String payloads are arbitrary bytes and must
/// survive a write/read cycle unchanged, so they are not required to be
/// UTF-8.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum TypedValue {
    /// No value. Has no string form.
    #[default]
    Null,
    /// 32-bit signed integer.
    Int32(i32),
    /// 64-bit signed integer.
    Int64(i64),
    /// Byte string.
    Str(Bytes),
}

impl TypedValue {
    /// Short name of the active tag, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            TypedValue::Null => "null",
            TypedValue::Int32(_) => "int32",
            TypedValue::Int64(_) => "int64",
            TypedValue::Str(_) => "string",
        }
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, TypedValue::Null)
    }

    /// Get this value as a widened integer, if it is one.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            TypedValue::Int32(n) => Some(i64::from(*n)),
            TypedValue::Int64(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the string payload, if this is a string.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            TypedValue::Str(b) => Some(b),
            _ => None,
        }
    }

    /// Get the string payload as UTF-8 text, if it is a valid string.
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }
}

impl From<i32> for TypedValue {
    fn from(n: i32) -> Self {
        TypedValue::Int32(n)
    }
}

impl From<i64> for TypedValue {
    fn from(n: i64) -> Self {
        TypedValue::Int64(n)
    }
}

impl From<&str> for TypedValue {
    fn from(s: &str) -> Self {
        TypedValue::Str(Bytes::copy_from_slice(s.as_bytes()))
    }
}

impl From<String> for TypedValue {
    fn from(s: String) -> Self {
        TypedValue::Str(Bytes::from(s))
    }
}

impl From<Vec<u8>> for TypedValue {
    fn from(b: Vec<u8>) -> Self {
        TypedValue::Str(Bytes::from(b))
    }
}

impl From<Bytes> for TypedValue {
    fn from(b: Bytes) -> Self {
        TypedValue::Str(b)
    }
}

impl<T: Into<TypedValue>> From<Option<T>> for TypedValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(TypedValue::Null, Into::into)
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::Null => f.write_str("null"),
            TypedValue::Int32(n) => write!(f, "{n}"),
            TypedValue::Int64(n) => write!(f, "{n}"),
            TypedValue::Str(b) => write!(f, "{:?}", String::from_utf8_lossy(b)),
        }
    }
}
