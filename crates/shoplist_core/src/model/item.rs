//! Effective list item model.
//!
//! # Responsibility
//! - Define the record shape stored under the persisted `effective` array.
//! - Tie catalog provenance (`source` + `group`) to each item.
//!
//! # Invariants
//! - `id` is stable and never reused for another item.
//! - `group` is only meaningful when `source == ItemSource::Essential`.
//! - `created_at` is audit-only and never participates in ordering.

use crate::model::name::{compare_names, name_key};
use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque, stable identifier used for removal-by-reference.
///
/// New IDs are UUID v4 strings, but any stored string is accepted so lists
/// written by other producers keep their identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Generates a fresh, never-reused ID.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Where an item entered the list from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemSource {
    /// Picked from the built-in essentials catalog.
    Essential,
    /// Typed in directly by the user.
    Custom,
}

impl ItemSource {
    /// Primary sort rank: essentials before custom items.
    pub fn rank(self) -> u8 {
        match self {
            Self::Essential => 0,
            Self::Custom => 1,
        }
    }

    /// Wire/display label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Essential => "essential",
            Self::Custom => "custom",
        }
    }
}

/// Add-time provenance.
///
/// Unlike the flat persisted shape, this makes "group iff essential"
/// unrepresentable any other way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOrigin {
    Essential { group: String },
    Custom,
}

impl ItemOrigin {
    /// Shorthand for an essential origin in `group`.
    pub fn essential(group: impl Into<String>) -> Self {
        Self::Essential {
            group: group.into(),
        }
    }

    pub fn source(&self) -> ItemSource {
        match self {
            Self::Essential { .. } => ItemSource::Essential,
            Self::Custom => ItemSource::Custom,
        }
    }
}

/// One entry of the effective list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveItem {
    pub id: ItemId,
    /// Already normalized display name.
    pub name: String,
    pub source: ItemSource,
    /// Catalog group for essentials; absent on the wire when `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Unix epoch milliseconds. Serialized as `createdAt`; fractional
    /// values are truncated on read.
    #[serde(rename = "createdAt", deserialize_with = "epoch_ms_from_number")]
    pub created_at: i64,
}

impl EffectiveItem {
    /// Creates an item with a fresh ID stamped with the current time.
    ///
    /// `name` is stored as given; callers normalize before constructing.
    pub fn new(name: impl Into<String>, origin: ItemOrigin) -> Self {
        Self::with_id(
            ItemId::generate(),
            name,
            origin,
            Utc::now().timestamp_millis(),
        )
    }

    /// Creates an item with caller-provided identity and timestamp.
    ///
    /// A blank essential group is stored as `None`.
    pub fn with_id(
        id: ItemId,
        name: impl Into<String>,
        origin: ItemOrigin,
        created_at: i64,
    ) -> Self {
        let source = origin.source();
        let group = match origin {
            ItemOrigin::Essential { group } if !group.trim().is_empty() => Some(group),
            _ => None,
        };
        Self {
            id,
            name: name.into(),
            source,
            group,
            created_at,
        }
    }

    /// Case-insensitive uniqueness key of this item.
    pub fn key(&self) -> String {
        name_key(&self.name)
    }

    /// Drops a blank `group` so it reads as missing.
    pub fn clear_blank_group(&mut self) {
        if self.group.as_deref().is_some_and(|group| group.trim().is_empty()) {
            self.group = None;
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EpochMs {
    Int(i64),
    Float(f64),
}

fn epoch_ms_from_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(match EpochMs::deserialize(deserializer)? {
        EpochMs::Int(value) => value,
        EpochMs::Float(value) => value as i64,
    })
}

/// Display order: source rank first, then name.
pub fn display_order(left: &EffectiveItem, right: &EffectiveItem) -> Ordering {
    left.source
        .rank()
        .cmp(&right.source.rank())
        .then_with(|| compare_names(&left.name, &right.name))
}
