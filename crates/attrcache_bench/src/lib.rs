//! Shared helpers for attrcache benchmarks.

#![warn(missing_docs)]

use attrcache_store::RawItem;

/// Builds `rows` raw items with `attrs` attributes each, alternating
/// integer and text values.
pub fn raw_items(rows: usize, attrs: usize) -> Vec<RawItem> {
    (0..rows)
        .map(|r| {
            (0..attrs).fold(RawItem::new(format!("key_{r}")), |item, a| {
                if a % 2 == 0 {
                    item.with(format!("attr_{a}"), (r * 1000 + a).to_string())
                } else {
                    item.with(format!("attr_{a}"), format!("text value {a}"))
                }
            })
        })
        .collect()
}
