//! Static essentials catalog and its search projection.
//!
//! # Responsibility
//! - Expose the fixed, read-only taxonomy of grouped item names.
//! - Filter groups/items for catalog browsing.
//!
//! # Invariants
//! - Catalog data is immutable and never persisted.
//! - Group and item order follow declaration order.

mod essentials;

use crate::model::name::{name_key, same_name};

/// One named group of catalog items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogGroup {
    pub name: &'static str,
    pub items: &'static [&'static str],
}

/// Filtered view of one catalog group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogMatch {
    pub group: &'static str,
    /// Total items in the group, regardless of the filter.
    pub total_items: usize,
    /// Items visible under the filter, in catalog order.
    pub items: Vec<&'static str>,
}

/// Resolved catalog entry for a user-supplied name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EssentialRef {
    pub group: &'static str,
    pub name: &'static str,
}

/// Returns all built-in catalog groups.
pub fn essentials() -> &'static [CatalogGroup] {
    essentials::ESSENTIALS
}

/// Filters the catalog by a case-insensitive substring query.
///
/// # Contract
/// - Blank query returns every group with every item.
/// - A group matching the query shows all of its items.
/// - Otherwise only matching items are shown; groups with none are omitted.
pub fn filter_catalog(query: &str) -> Vec<CatalogMatch> {
    let needle = name_key(query);
    essentials()
        .iter()
        .filter_map(|group| {
            let group_hit = needle.is_empty() || group.name.to_lowercase().contains(&needle);
            let items: Vec<&'static str> = group
                .items
                .iter()
                .copied()
                .filter(|item| group_hit || item.to_lowercase().contains(&needle))
                .collect();
            if items.is_empty() {
                return None;
            }
            Some(CatalogMatch {
                group: group.name,
                total_items: group.items.len(),
                items,
            })
        })
        .collect()
}

/// Finds the first catalog entry whose name equals `name` under the
/// uniqueness rule.
pub fn find_essential(name: &str) -> Option<EssentialRef> {
    essentials().iter().find_map(|group| {
        group
            .items
            .iter()
            .find(|item| same_name(item, name))
            .map(|item| EssentialRef {
                group: group.name,
                name: *item,
            })
    })
}

#[cfg(test)]
mod tests {
    use super::{essentials, filter_catalog, find_essential};

    #[test]
    fn catalog_has_expected_groups_in_order() {
        let names: Vec<_> = essentials().iter().map(|group| group.name).collect();
        assert_eq!(
            names,
            vec!["Cleaning", "Food basics", "Fresh", "Bathroom", "Home"]
        );
    }

    #[test]
    fn blank_filter_returns_everything() {
        let matches = filter_catalog("   ");
        assert_eq!(matches.len(), essentials().len());
        assert!(matches
            .iter()
            .all(|group| group.items.len() == group.total_items));
    }

    #[test]
    fn item_filter_keeps_only_matching_items() {
        let matches = filter_catalog("SOAP");
        let groups: Vec<_> = matches.iter().map(|group| group.group).collect();
        assert_eq!(groups, vec!["Cleaning", "Bathroom"]);
        assert_eq!(matches[0].items, vec!["Dish soap"]);
        assert_eq!(matches[1].items, vec!["Hand soap"]);
        assert_eq!(matches[1].total_items, 5);
    }

    #[test]
    fn group_filter_shows_whole_group() {
        let matches = filter_catalog("fresh");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].items.len(), 5);
    }

    #[test]
    fn unmatched_filter_is_empty() {
        assert!(filter_catalog("caviar").is_empty());
    }

    #[test]
    fn find_essential_resolves_case_insensitively() {
        let found = find_essential("  olive   OIL").unwrap();
        assert_eq!(found.group, "Food basics");
        assert_eq!(found.name, "Olive oil");
        assert!(find_essential("Zebra feed").is_none());
    }
}
