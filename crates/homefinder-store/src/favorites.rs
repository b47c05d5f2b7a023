//! The favorites ledger: a persisted set of favorited listing ids.
//!
//! The set lives in one key-value slot as a JSON array of integers, in the
//! order the listings were favorited. The slot is re-read on every call, so
//! several ledgers over the same store always agree.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use homefinder_core::{PropertyId, PropertyRecord};
use serde::Serialize;

use crate::kv::KeyValueStore;
use crate::LedgerError;

/// Slot key holding the favorite ids.
pub const FAVORITES_KEY: &str = "homefinder_favorites";

/// Emitted to observers after every persisted toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FavoriteChange {
    pub id: PropertyId,
    pub is_favorite: bool,
    /// Number of favorites after the change.
    pub count: usize,
}

pub type Observer = Arc<dyn Fn(&FavoriteChange) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A listing annotated with its favorite state. Serializes as the record's
/// own fields plus `isFavorite`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteListing {
    #[serde(flatten)]
    pub property: PropertyRecord,
    pub is_favorite: bool,
}

pub struct FavoritesLedger<S> {
    store: S,
    observers: Mutex<Vec<(SubscriptionId, Observer)>>,
    next_subscription: AtomicU64,
}

impl<S: KeyValueStore> FavoritesLedger<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            observers: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(1),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn is_favorite(&self, id: PropertyId) -> bool {
        self.read_ids().contains(&id)
    }

    /// Favorited ids, oldest first, without duplicates.
    #[must_use]
    pub fn list_favorite_ids(&self) -> Vec<PropertyId> {
        self.read_ids()
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.read_ids().len()
    }

    /// Adds `id` if absent and removes it if present, persists the result,
    /// then notifies observers. Returns the new membership.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Store`] if the updated set cannot be written.
    /// Observers are not notified in that case.
    pub fn toggle_favorite(&self, id: PropertyId) -> Result<bool, LedgerError> {
        let mut ids = self.read_ids();
        let is_favorite = if let Some(pos) = ids.iter().position(|&existing| existing == id) {
            ids.remove(pos);
            false
        } else {
            ids.push(id);
            true
        };

        let encoded = serde_json::to_string(&ids).map_err(LedgerError::Encode)?;
        self.store.set(FAVORITES_KEY, &encoded)?;
        tracing::debug!(id, is_favorite, count = ids.len(), "favorite toggled");

        self.notify(&FavoriteChange {
            id,
            is_favorite,
            count: ids.len(),
        });
        Ok(is_favorite)
    }

    /// Registers an observer called after every persisted toggle.
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&FavoriteChange) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.lock_observers().push((id, Arc::new(observer)));
        id
    }

    /// Returns `true` if the subscription existed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.lock_observers();
        let before = observers.len();
        observers.retain(|(existing, _)| *existing != id);
        observers.len() != before
    }

    /// Pairs every record with its favorite state, keeping record order.
    #[must_use]
    pub fn annotate(&self, records: Vec<PropertyRecord>) -> Vec<FavoriteListing> {
        let ids = self.read_ids();
        records
            .into_iter()
            .map(|property| {
                let is_favorite = ids.contains(&property.id);
                FavoriteListing {
                    property,
                    is_favorite,
                }
            })
            .collect()
    }

    /// The favorited records among `records`, in favoriting order.
    ///
    /// Favorite ids with no matching record are skipped.
    #[must_use]
    pub fn favorites_among(&self, records: Vec<PropertyRecord>) -> Vec<PropertyRecord> {
        let ids = self.read_ids();
        let mut favorites: Vec<PropertyRecord> =
            records.into_iter().filter(|r| ids.contains(&r.id)).collect();
        favorites.sort_by_key(|r| ids.iter().position(|&id| id == r.id));
        favorites
    }

    /// Reads the persisted set. A missing, unreadable or malformed slot is
    /// an empty set.
    fn read_ids(&self) -> Vec<PropertyId> {
        let raw = match self.store.get(FAVORITES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(error) => {
                tracing::warn!(
                    key = FAVORITES_KEY,
                    %error,
                    "favorites slot unreadable; treating as empty"
                );
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<PropertyId>>(&raw) {
            Ok(ids) => {
                let mut unique = Vec::with_capacity(ids.len());
                for id in ids {
                    if !unique.contains(&id) {
                        unique.push(id);
                    }
                }
                unique
            }
            Err(error) => {
                tracing::warn!(
                    key = FAVORITES_KEY,
                    %error,
                    "favorites slot malformed; treating as empty"
                );
                Vec::new()
            }
        }
    }

    fn notify(&self, change: &FavoriteChange) {
        // Snapshot so observers may subscribe or unsubscribe re-entrantly.
        let observers: Vec<Observer> = self
            .lock_observers()
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();
        for observer in observers {
            observer(change);
        }
    }

    fn lock_observers(&self) -> MutexGuard<'_, Vec<(SubscriptionId, Observer)>> {
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "favorites_test.rs"]
mod tests;
