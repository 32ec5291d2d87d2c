//! List store contracts plus SQLite and in-memory implementations.
//!
//! # Responsibility
//! - Serialize the full list as `{ "effective": [...] }`.
//! - Report structurally invalid blobs as errors; `load_or_empty` owns the
//!   fallback to an empty list.
//!
//! # Invariants
//! - Missing state is not an error: it loads as an empty list.
//! - `save` replaces the whole blob; there are no partial writes.

use crate::db::DbError;
use crate::model::item::EffectiveItem;
use crate::model::list::{canonicalize, EffectiveList};
use chrono::Utc;
use log::{info, warn};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed storage key of the persisted list document.
pub const STORAGE_KEY: &str = "shopping_list_v1";

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for list load/save operations.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// Stored blob is not a record holding an `effective` item array.
    InvalidData(String),
    Serialize(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted list data: {message}"),
            Self::Serialize(err) => write!(f, "failed to serialize list: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable storage for the effective list.
pub trait ListStore {
    /// Reads the stored list, or an empty list when nothing is stored.
    fn load(&self) -> StoreResult<EffectiveList>;
    /// Replaces the stored list with `items`.
    fn save(&self, items: &[EffectiveItem]) -> StoreResult<()>;
}

#[derive(Deserialize)]
struct PersistedState {
    effective: Vec<EffectiveItem>,
}

#[derive(Serialize)]
struct PersistedStateRef<'a> {
    effective: &'a [EffectiveItem],
}

/// Encodes `items` as the persisted JSON document.
pub fn encode_state(items: &[EffectiveItem]) -> StoreResult<String> {
    serde_json::to_string(&PersistedStateRef { effective: items }).map_err(StoreError::Serialize)
}

/// Decodes a persisted JSON document and restores list invariants.
///
/// A blank document decodes to an empty list.
pub fn decode_state(raw: &str) -> StoreResult<EffectiveList> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    let state: PersistedState =
        serde_json::from_str(raw).map_err(|err| StoreError::InvalidData(err.to_string()))?;
    let (items, dropped) = canonicalize(state.effective);
    if dropped > 0 {
        warn!("event=list_decode module=repo status=repaired dropped_duplicates={dropped}");
    }
    Ok(items)
}

/// Loads from `store`, substituting an empty list for any failure.
pub fn load_or_empty<S: ListStore + ?Sized>(store: &S) -> EffectiveList {
    match store.load() {
        Ok(items) => {
            info!(
                "event=list_load module=repo status=ok count={}",
                items.len()
            );
            items
        }
        Err(err) => {
            warn!("event=list_load module=repo status=fallback reason=load_failed error={err}");
            Vec::new()
        }
    }
}

/// SQLite-backed store using the `kv_store` table.
pub struct SqliteListStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteListStore<'conn> {
    /// `conn` must come from `db::open_db*` so the schema exists.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ListStore for SqliteListStore<'_> {
    fn load(&self) -> StoreResult<EffectiveList> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [STORAGE_KEY],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(raw) => decode_state(&raw),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, items: &[EffectiveItem]) -> StoreResult<()> {
        let encoded = encode_state(items)?;
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![STORAGE_KEY, encoded, Utc::now().timestamp_millis()],
        )?;
        Ok(())
    }
}

/// Process-local store holding the raw document; nothing survives exit.
#[derive(Debug, Default)]
pub struct MemoryListStore {
    raw: RefCell<Option<String>>,
}

impl MemoryListStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with an arbitrary raw document.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: RefCell::new(Some(raw.into())),
        }
    }

    /// Returns the currently stored raw document.
    pub fn raw(&self) -> Option<String> {
        self.raw.borrow().clone()
    }
}

impl ListStore for MemoryListStore {
    fn load(&self) -> StoreResult<EffectiveList> {
        match self.raw.borrow().as_deref() {
            Some(raw) => decode_state(raw),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, items: &[EffectiveItem]) -> StoreResult<()> {
        let encoded = encode_state(items)?;
        *self.raw.borrow_mut() = Some(encoded);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_state, encode_state, load_or_empty, MemoryListStore, StoreError};
    use crate::model::item::{EffectiveItem, ItemOrigin};

    #[test]
    fn blank_document_decodes_to_empty_list() {
        assert!(decode_state("").unwrap().is_empty());
        assert!(decode_state("  \n").unwrap().is_empty());
    }

    #[test]
    fn document_without_effective_array_is_invalid() {
        for raw in [
            "null",
            "[]",
            "42",
            "{\"effective\": {}}",
            "{\"items\": []}",
            "not json",
        ] {
            let err = decode_state(raw).unwrap_err();
            assert!(
                matches!(err, StoreError::InvalidData(_)),
                "unexpected error for {raw}: {err}"
            );
        }
    }

    #[test]
    fn encode_uses_wire_field_names() {
        let item = EffectiveItem::new("Candles", ItemOrigin::Custom);
        let encoded = encode_state(std::slice::from_ref(&item)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&encoded).unwrap();

        let entry = &value["effective"][0];
        assert_eq!(entry["id"], item.id.to_string());
        assert_eq!(entry["name"], "Candles");
        assert_eq!(entry["source"], "custom");
        assert!(entry.get("group").is_none());
        assert_eq!(entry["createdAt"], item.created_at);
    }

    #[test]
    fn load_or_empty_swallows_corrupt_state() {
        let store = MemoryListStore::with_raw("{\"effective\": 7}");
        assert!(load_or_empty(&store).is_empty());
    }
}
