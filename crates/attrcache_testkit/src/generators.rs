//! Property-based test generators using proptest.
//!
//! Provides strategies for generating random cache data that maintains
//! the invariants the adapter relies on.

use attrcache_codec::{parse_i64, TypedValue};
use attrcache_core::DEFAULT_KEY_ATTRIBUTE;
use attrcache_store::RawItem;
use bytes::Bytes;
use proptest::prelude::*;

/// Strategy for non-empty primary keys.
pub fn key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_:]{0,15}").expect("Invalid regex")
}

/// Strategy for non-empty attribute names.
///
/// Never yields the default primary-key attribute, which stores refuse to
/// overwrite.
pub fn attribute_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_]{0,11}")
        .expect("Invalid regex")
        .prop_filter("Not the key attribute", |name| name != DEFAULT_KEY_ATTRIBUTE)
}

/// Strategy for byte strings that do not decode as integers.
pub fn non_numeric_bytes_strategy() -> impl Strategy<Value = Bytes> {
    prop::collection::vec(any::<u8>(), 0..32)
        .prop_filter("Must not parse as an integer", |b| parse_i64(b).is_none())
        .prop_map(Bytes::from)
}

/// Strategy for values that survive an encode/decode cycle unchanged.
///
/// `Int64` is drawn outside the `i32` range and strings never look like
/// integers, because the read side would otherwise narrow or retype them.
pub fn stable_value_strategy() -> impl Strategy<Value = TypedValue> {
    prop_oneof![
        any::<i32>().prop_map(TypedValue::Int32),
        any::<i64>()
            .prop_filter("Outside i32 range", |n| i32::try_from(*n).is_err())
            .prop_map(TypedValue::Int64),
        non_numeric_bytes_strategy().prop_map(TypedValue::Str),
    ]
}

/// Strategy for attribute pairs with distinct names.
pub fn attribute_pairs_strategy() -> impl Strategy<Value = Vec<(String, TypedValue)>> {
    prop::collection::btree_map(attribute_name_strategy(), stable_value_strategy(), 1..6)
        .prop_map(|pairs| pairs.into_iter().collect())
}

/// Strategy for raw store items with distinct attribute names.
pub fn raw_item_strategy() -> impl Strategy<Value = RawItem> {
    (
        key_strategy(),
        prop::collection::btree_map(
            attribute_name_strategy(),
            prop::option::of(prop::collection::vec(any::<u8>(), 0..16)),
            0..6,
        ),
    )
        .prop_map(|(key, attrs)| RawItem {
            key,
            attributes: attrs
                .into_iter()
                .map(|(name, value)| (name, value.map(Bytes::from)))
                .collect(),
        })
}

/// One step applied to a key-set index in model-based tests.
#[derive(Debug, Clone)]
pub enum KeySetOp {
    /// Add a member.
    Add {
        /// Set name.
        set: String,
        /// Member key.
        key: String,
    },
    /// Remove one member.
    RemoveMember {
        /// Set name.
        set: String,
        /// Member key.
        key: String,
    },
    /// Remove the whole set.
    RemoveSet {
        /// Set name.
        set: String,
    },
}

/// Strategy for key-set operations over a small name space, so that
/// operations collide often.
pub fn keyset_op_strategy() -> impl Strategy<Value = KeySetOp> {
    let set = (0u8..3).prop_map(|n| format!("g{n}"));
    let key = (0u8..4).prop_map(|n| format!("k{n}"));
    prop_oneof![
        3 => (set.clone(), key.clone()).prop_map(|(set, key)| KeySetOp::Add { set, key }),
        2 => (set.clone(), key).prop_map(|(set, key)| KeySetOp::RemoveMember { set, key }),
        1 => set.prop_map(|set| KeySetOp::RemoveSet { set }),
    ]
}
