//! Shopping list text report.
//!
//! # Invariants
//! - Rendering is a pure function of the items and the supplied timestamp.
//! - Essential groups are emitted before the custom section, each sorted
//!   independently of the list's global display order.

use crate::model::item::{EffectiveItem, ItemSource};
use crate::model::name::compare_names;
use chrono::NaiveDateTime;
use log::info;
use std::path::Path;

/// File name offered for the exported document.
pub const EXPORT_FILE_NAME: &str = "shopping-list.txt";
/// MIME type of the exported document.
pub const EXPORT_MIME_TYPE: &str = "text/plain;charset=utf-8";
/// Format of the report's timestamp line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const REPORT_TITLE: &str = "Shopping List";
const SEPARATOR_WIDTH: usize = 22;
const EMPTY_PLACEHOLDER: &str = "(empty)";
const FALLBACK_GROUP: &str = "Essentials";
const CUSTOM_SECTION: &str = "Custom";

/// Renders the report as individual lines.
pub fn render_report(items: &[EffectiveItem], generated_at: NaiveDateTime) -> Vec<String> {
    let mut lines = vec![
        REPORT_TITLE.to_string(),
        generated_at.format(TIMESTAMP_FORMAT).to_string(),
        "-".repeat(SEPARATOR_WIDTH),
    ];

    if items.is_empty() {
        lines.push(EMPTY_PLACEHOLDER.to_string());
        return lines;
    }

    let (essentials, custom): (Vec<&EffectiveItem>, Vec<&EffectiveItem>) = items
        .iter()
        .partition(|item| item.source == ItemSource::Essential);

    let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();
    for item in essentials {
        let group = item
            .group
            .as_deref()
            .filter(|group| !group.trim().is_empty())
            .unwrap_or(FALLBACK_GROUP);
        match groups.iter_mut().find(|(name, _)| *name == group) {
            Some((_, names)) => names.push(item.name.as_str()),
            None => groups.push((group, vec![item.name.as_str()])),
        }
    }
    groups.sort_by(|(left, _), (right, _)| compare_names(left, right));

    for (group, names) in groups {
        push_section(&mut lines, group, names);
    }

    if !custom.is_empty() {
        let names = custom.iter().map(|item| item.name.as_str()).collect();
        push_section(&mut lines, CUSTOM_SECTION, names);
    }

    lines
}

/// Renders the full document text (lines joined by `\n`).
pub fn report_text(items: &[EffectiveItem], generated_at: NaiveDateTime) -> String {
    render_report(items, generated_at).join("\n")
}

/// Writes the rendered document to `path` as UTF-8.
pub fn write_report(
    path: impl AsRef<Path>,
    items: &[EffectiveItem],
    generated_at: NaiveDateTime,
) -> std::io::Result<()> {
    let text = report_text(items, generated_at);
    std::fs::write(path.as_ref(), text.as_bytes())?;
    info!(
        "event=export_write module=export status=ok count={} bytes={}",
        items.len(),
        text.len()
    );
    Ok(())
}

fn push_section(lines: &mut Vec<String>, header: &str, mut names: Vec<&str>) {
    names.sort_by(|left, right| compare_names(left, right));
    lines.push(String::new());
    lines.push(format!("[{header}]"));
    lines.extend(names.into_iter().map(|name| format!("- {name}")));
}
