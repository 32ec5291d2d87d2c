//! Domain model for the effective shopping list.
//!
//! # Responsibility
//! - Define the canonical item record persisted and rendered by core callers.
//! - Own the name normalization and display-order rules shared by every
//!   mutation path.
//!
//! # Invariants
//! - Every item is identified by a stable `ItemId`.
//! - No two items in a list share a normalized, case-folded name.

pub mod item;
pub mod list;
pub mod name;
