//! Item name normalization and comparison.
//!
//! # Invariants
//! - Normalized names have no leading/trailing whitespace and no internal
//!   whitespace runs longer than one space.
//! - Uniqueness keys are normalized names folded to lowercase.

use icu_collator::{Collator, CollatorOptions};
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

thread_local! {
    // Root collation; `None` only if compiled collation data fails to load.
    static COLLATOR: Option<Collator> =
        Collator::try_new(&Default::default(), CollatorOptions::new()).ok();
}

/// Trims `raw` and collapses every internal whitespace run to one space.
pub fn normalize_name(raw: &str) -> String {
    WHITESPACE_RE.replace_all(raw.trim(), " ").into_owned()
}

/// Returns the case-insensitive uniqueness key for `raw`.
pub fn name_key(raw: &str) -> String {
    normalize_name(raw).to_lowercase()
}

/// Returns whether two names collide under the uniqueness rule.
pub fn same_name(left: &str, right: &str) -> bool {
    name_key(left) == name_key(right)
}

/// Ascending name order used for display and export.
///
/// Uses Unicode root collation, so `Éclair` sorts between `Eclipse` and
/// `Eggs` rather than after `Z`. The raw text breaks collation ties to keep
/// the order total.
pub fn compare_names(left: &str, right: &str) -> Ordering {
    COLLATOR
        .with(|collator| match collator {
            Some(collator) => collator.compare(left, right),
            None => left.to_lowercase().cmp(&right.to_lowercase()),
        })
        .then_with(|| left.cmp(right))
}
