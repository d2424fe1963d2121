//! Shared decode vectors.
//!
//! These vectors pin down how attribute text is typed on read, so every
//! client of the same table recovers the same values.

use attrcache_codec::TypedValue;
use serde::{Deserialize, Serialize};

/// Expected decode outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Expected {
    /// Absent value.
    Null,
    /// 32-bit integer.
    Int32(i32),
    /// 64-bit integer.
    Int64(i64),
    /// String equal to the input.
    Str,
}

/// One decode case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Raw attribute text; `None` for an absent attribute.
    pub input: Option<String>,
    /// Expected outcome.
    pub expected: Expected,
}

impl DecodeVector {
    /// The typed value this vector expects.
    pub fn expected_value(&self) -> TypedValue {
        match (&self.expected, &self.input) {
            (Expected::Null, _) => TypedValue::Null,
            (Expected::Int32(n), _) => TypedValue::Int32(*n),
            (Expected::Int64(n), _) => TypedValue::Int64(*n),
            (Expected::Str, Some(s)) => TypedValue::from(s.as_str()),
            (Expected::Str, None) => TypedValue::Null,
        }
    }
}

const DECODE_VECTORS_JSON: &str = r#"[
  { "id": "absent",            "input": null,                   "expected": { "type": "null" } },
  { "id": "empty",             "input": "",                     "expected": { "type": "str" } },
  { "id": "zero",              "input": "0",                    "expected": { "type": "int32", "value": 0 } },
  { "id": "negative",          "input": "-17",                  "expected": { "type": "int32", "value": -17 } },
  { "id": "plus_sign",         "input": "+5",                   "expected": { "type": "int32", "value": 5 } },
  { "id": "i32_max",           "input": "2147483647",           "expected": { "type": "int32", "value": 2147483647 } },
  { "id": "i32_min",           "input": "-2147483648",          "expected": { "type": "int32", "value": -2147483648 } },
  { "id": "i32_max_plus_one",  "input": "2147483648",           "expected": { "type": "int64", "value": 2147483648 } },
  { "id": "i32_min_minus_one", "input": "-2147483649",          "expected": { "type": "int64", "value": -2147483649 } },
  { "id": "i64_max",           "input": "9223372036854775807",  "expected": { "type": "int64", "value": 9223372036854775807 } },
  { "id": "i64_overflow",      "input": "9223372036854775808",  "expected": { "type": "str" } },
  { "id": "trailing_alpha",    "input": "12a",                  "expected": { "type": "str" } },
  { "id": "zero_padded_alpha", "input": "007x",                 "expected": { "type": "str" } },
  { "id": "leading_space",     "input": " 12",                  "expected": { "type": "int32", "value": 12 } },
  { "id": "trailing_space",    "input": "12 ",                  "expected": { "type": "str" } },
  { "id": "decimal",           "input": "1.0",                  "expected": { "type": "str" } },
  { "id": "hex",               "input": "0x10",                 "expected": { "type": "str" } },
  { "id": "sign_only",         "input": "-",                    "expected": { "type": "str" } },
  { "id": "word",              "input": "bob",                  "expected": { "type": "str" } }
]"#;

/// All decode vectors.
pub fn decode_vectors() -> Vec<DecodeVector> {
    serde_json::from_str(DECODE_VECTORS_JSON).expect("Invalid decode vectors")
}

#[cfg(test)]
mod tests {
    use super::*;
    use attrcache_codec::decode;

    #[test]
    fn vectors_have_unique_ids() {
        let vectors = decode_vectors();
        let mut ids: Vec<_> = vectors.iter().map(|v| v.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), vectors.len());
    }

    #[test]
    fn decode_matches_vectors() {
        for vector in decode_vectors() {
            let got = decode(vector.input.as_deref().map(str::as_bytes));
            assert_eq!(got, vector.expected_value(), "vector {}", vector.id);
        }
    }

    #[test]
    fn vectors_serialize_back() {
        let json = serde_json::to_string(&decode_vectors()).unwrap();
        let again: Vec<DecodeVector> = serde_json::from_str(&json).unwrap();
        assert_eq!(again.len(), decode_vectors().len());
    }
}
