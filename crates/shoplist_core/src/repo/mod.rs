//! Persistence adapters for the effective list.
//!
//! # Responsibility
//! - Define the load/save contract consumed by the list service.
//! - Isolate SQLite and JSON blob details from mutation logic.
//!
//! # Invariants
//! - Stored state is one JSON document under a fixed key.
//! - Loaded lists always satisfy the uniqueness invariant.

pub mod list_store;
