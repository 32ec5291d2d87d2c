//! Effective list helpers.
//!
//! # Invariants
//! - A canonical list is sorted by `display_order` and unique by name key.

use crate::model::item::{display_order, EffectiveItem};
use std::collections::HashSet;

/// The single working list, kept in display order.
pub type EffectiveList = Vec<EffectiveItem>;

/// Re-sorts `items` from scratch into display order.
pub fn sort_items(items: &mut [EffectiveItem]) {
    items.sort_by(display_order);
}

/// Restores list invariants on externally sourced data.
///
/// Blanks out empty groups, keeps the first item per name key, sorts, and
/// returns the number of dropped duplicates.
pub fn canonicalize(items: Vec<EffectiveItem>) -> (EffectiveList, usize) {
    let before = items.len();
    let mut seen = HashSet::<String>::new();
    let mut kept: EffectiveList = items
        .into_iter()
        .filter(|item| seen.insert(item.key()))
        .map(|mut item| {
            item.clear_blank_group();
            item
        })
        .collect();
    sort_items(&mut kept);
    let dropped = before - kept.len();
    (kept, dropped)
}
