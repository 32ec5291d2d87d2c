//! Effective list use-case service.
//!
//! # Responsibility
//! - Own the single effective list and every mutation path into it.
//! - Persist after each successful mutation and notify subscribers.
//!
//! # Invariants
//! - No two items share a normalized, case-folded name.
//! - The list is re-sorted into display order after every add.
//! - No mutation fails: blank/duplicate input is a no-op and save
//!   failures only degrade the session to in-memory operation.

use crate::model::item::{EffectiveItem, ItemId, ItemOrigin};
use crate::model::list::{sort_items, EffectiveList};
use crate::model::name::{name_key, normalize_name};
use crate::repo::list_store::{load_or_empty, ListStore};
use log::{debug, info, warn};

/// Callback invoked with the new list after each successful mutation.
pub type ChangeListener = Box<dyn FnMut(&[EffectiveItem])>;

/// Handle returned by `subscribe`, used to detach the listener again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription(u64);

/// Service owning the effective list and its backing store.
pub struct ListService<S: ListStore> {
    store: S,
    items: EffectiveList,
    listeners: Vec<(Subscription, ChangeListener)>,
    next_subscription: u64,
    persistence_degraded: bool,
}

impl<S: ListStore> ListService<S> {
    /// Restores the list from `store`, starting empty when nothing usable
    /// is stored.
    pub fn open(store: S) -> Self {
        let items = load_or_empty(&store);
        Self {
            store,
            items,
            listeners: Vec::new(),
            next_subscription: 0,
            persistence_degraded: false,
        }
    }

    /// Returns the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current list in display order.
    pub fn snapshot(&self) -> &[EffectiveItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns whether an item with a normalized-equal name exists.
    pub fn contains(&self, name: &str) -> bool {
        let key = name_key(name);
        !key.is_empty() && self.items.iter().any(|item| item.key() == key)
    }

    /// Looks up an item by its stable ID.
    pub fn get(&self, id: &ItemId) -> Option<&EffectiveItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Whether a save has failed during this session.
    pub fn persistence_degraded(&self) -> bool {
        self.persistence_degraded
    }

    /// Registers a listener called after each successful mutation.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&[EffectiveItem]) + 'static,
    ) -> Subscription {
        let subscription = Subscription(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((subscription, Box::new(listener)));
        subscription
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Detaches a listener. Returns `false` when it was already detached.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(id, _)| *id != subscription);
        self.listeners.len() != before
    }

    /// Adds `name` unless it is blank or already present.
    ///
    /// # Contract
    /// - Stores the normalized name.
    /// - Returns the new item ID, or `None` when nothing changed.
    pub fn add(&mut self, name: &str, origin: ItemOrigin) -> Option<ItemId> {
        let normalized = normalize_name(name);
        if normalized.is_empty() {
            debug!("event=list_add module=service status=skipped reason=blank_name");
            return None;
        }
        if self.contains(&normalized) {
            debug!("event=list_add module=service status=skipped reason=duplicate_name");
            return None;
        }

        let item = EffectiveItem::new(normalized, origin);
        let id = item.id.clone();
        info!(
            "event=list_add module=service status=ok source={} item_id={}",
            item.source.as_str(),
            id
        );
        self.items.push(item);
        sort_items(&mut self.items);
        self.commit();
        Some(id)
    }

    /// Removes the item whose name matches `name` case-insensitively.
    ///
    /// Returns whether anything was removed.
    pub fn remove_by_name(&mut self, name: &str) -> bool {
        let key = name_key(name);
        let before = self.items.len();
        self.items.retain(|item| item.key() != key);
        let removed = before - self.items.len();
        if removed == 0 {
            return false;
        }

        info!("event=list_remove module=service status=ok by=name removed={removed}");
        self.commit();
        true
    }

    /// Removes the item with exactly `id`.
    ///
    /// Returns whether anything was removed.
    pub fn remove_by_id(&mut self, id: &ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        if self.items.len() == before {
            return false;
        }

        info!("event=list_remove module=service status=ok by=id item_id={id}");
        self.commit();
        true
    }

    /// Empties the list. Always persists and notifies, even when already
    /// empty.
    pub fn clear(&mut self) {
        let removed = self.items.len();
        self.items.clear();
        info!("event=list_clear module=service status=ok removed={removed}");
        self.commit();
    }

    /// Applies a catalog checkbox change for `name` in `group`.
    ///
    /// Returns whether the list changed.
    pub fn toggle_essential(&mut self, name: &str, group: &str, checked: bool) -> bool {
        if checked {
            self.add(name, ItemOrigin::essential(group)).is_some()
        } else {
            self.remove_by_name(name)
        }
    }

    fn commit(&mut self) {
        if let Err(err) = self.store.save(&self.items) {
            if !self.persistence_degraded {
                warn!(
                    "event=list_save module=service status=error mode=degraded count={} error={}",
                    self.items.len(),
                    err
                );
            }
            self.persistence_degraded = true;
        }

        for (_, listener) in &mut self.listeners {
            listener(&self.items);
        }
    }
}
