//! Terminal rendering of catalog and list state.

use shoplist_core::{CatalogMatch, EffectiveItem, ItemSource};
use std::io::{self, Write};

const SHORT_ID_LEN: usize = 8;

/// Renders catalog groups with `[x]` marking items already on the list.
pub fn render_catalog(
    out: &mut impl Write,
    groups: &[CatalogMatch],
    contains: impl Fn(&str) -> bool,
) -> io::Result<()> {
    if groups.is_empty() {
        return writeln!(out, "No catalog items match.");
    }
    for group in groups {
        writeln!(out, "{} ({} items)", group.group, group.total_items)?;
        for item in &group.items {
            let mark = if contains(*item) { "x" } else { " " };
            writeln!(out, "  [{mark}] {item}")?;
        }
    }
    Ok(())
}

/// Renders the effective list in display order.
pub fn render_list(out: &mut impl Write, items: &[EffectiveItem]) -> io::Result<()> {
    let count = items.len();
    writeln!(out, "{count} item{}", if count == 1 { "" } else { "s" })?;
    if items.is_empty() {
        return writeln!(out, "Your list is empty. Check essentials or add your own items.");
    }
    for item in items {
        let short_id: String = item.id.as_str().chars().take(SHORT_ID_LEN).collect();
        writeln!(
            out,
            "  {:<8}  {:<24}  {}",
            short_id,
            source_tag(item),
            item.name
        )?;
    }
    Ok(())
}

fn source_tag(item: &EffectiveItem) -> String {
    match (item.source, item.group.as_deref()) {
        (ItemSource::Essential, Some(group)) => format!("Essential • {group}"),
        (ItemSource::Essential, None) => "Essential".to_string(),
        (ItemSource::Custom, _) => "Custom".to_string(),
    }
}
