//! Core use-case services.
//!
//! # Responsibility
//! - Turn explicit View Layer commands into list mutations.
//! - Keep UI layers decoupled from storage details.

pub mod list_service;
