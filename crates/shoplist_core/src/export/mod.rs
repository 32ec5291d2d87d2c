//! Plain-text export of the effective list.
//!
//! # Responsibility
//! - Render a grouped, printable report from list state.
//! - Define the download/file contract of the exported document.

pub mod report;
