//! Core domain logic for the shopping list.
//! This crate is the single source of truth for list invariants.

pub mod catalog;
pub mod db;
pub mod export;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use catalog::{
    essentials, filter_catalog, find_essential, CatalogGroup, CatalogMatch, EssentialRef,
};
pub use export::report::{
    render_report, report_text, write_report, EXPORT_FILE_NAME, EXPORT_MIME_TYPE,
};
pub use logging::{default_log_level, init_logging};
pub use model::item::{EffectiveItem, ItemId, ItemOrigin, ItemSource};
pub use model::list::EffectiveList;
pub use model::name::normalize_name;
pub use repo::list_store::{
    load_or_empty, ListStore, MemoryListStore, SqliteListStore, StoreError, StoreResult,
    STORAGE_KEY,
};
pub use service::list_service::{ListService, Subscription};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
