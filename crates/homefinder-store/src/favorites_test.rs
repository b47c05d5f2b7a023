use std::sync::atomic::AtomicUsize;

use crate::kv::{FileStore, MemoryStore};
use crate::StoreError;

use super::*;

fn record(id: PropertyId, title: &str) -> PropertyRecord {
    PropertyRecord {
        id,
        title: title.to_string(),
        ..PropertyRecord::default()
    }
}

/// A slot store whose reads always fail and whose writes succeed.
struct UnreadableStore(MemoryStore);

impl KeyValueStore for UnreadableStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Read {
            path: key.to_string(),
            source: std::io::Error::other("disk on fire"),
        })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.0.set(key, value)
    }
}

/// A slot store that refuses every write.
struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Ok(None)
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Write {
            path: key.to_string(),
            source: std::io::Error::other("read-only"),
        })
    }
}

// -----------------------------------------------------------------------
// Toggle semantics
// -----------------------------------------------------------------------

#[test]
fn toggle_returns_new_membership_and_is_favorite_agrees() {
    let ledger = FavoritesLedger::new(MemoryStore::new());
    assert!(!ledger.is_favorite(7));
    assert!(ledger.toggle_favorite(7).unwrap());
    assert!(ledger.is_favorite(7));
    assert!(!ledger.toggle_favorite(7).unwrap());
    assert!(!ledger.is_favorite(7));
}

#[test]
fn toggling_twice_restores_original_state() {
    let ledger = FavoritesLedger::new(MemoryStore::new());
    ledger.toggle_favorite(1).unwrap();
    ledger.toggle_favorite(2).unwrap();
    let before = ledger.list_favorite_ids();

    for id in [1, 2, 3] {
        ledger.toggle_favorite(id).unwrap();
        ledger.toggle_favorite(id).unwrap();
        assert_eq!(ledger.list_favorite_ids(), before, "id {id}");
    }
}

#[test]
fn toggle_persists_json_array_in_favoriting_order() {
    let store = MemoryStore::new();
    let ledger = FavoritesLedger::new(&store);
    ledger.toggle_favorite(5).unwrap();
    ledger.toggle_favorite(2).unwrap();
    ledger.toggle_favorite(9).unwrap();
    ledger.toggle_favorite(2).unwrap();

    assert_eq!(store.get(FAVORITES_KEY).unwrap().as_deref(), Some("[5,9]"));
    assert_eq!(ledger.list_favorite_ids(), vec![5, 9]);
    assert_eq!(ledger.count(), 2);
}

// -----------------------------------------------------------------------
// Degraded slots
// -----------------------------------------------------------------------

#[test]
fn corrupted_slot_reads_as_empty_and_toggle_still_succeeds() {
    let store = MemoryStore::new();
    store.set(FAVORITES_KEY, "{not json").unwrap();
    let ledger = FavoritesLedger::new(&store);

    assert!(ledger.list_favorite_ids().is_empty());
    assert!(ledger.toggle_favorite(42).unwrap());
    assert_eq!(store.get(FAVORITES_KEY).unwrap().as_deref(), Some("[42]"));
}

#[test]
fn wrongly_typed_slot_reads_as_empty() {
    let store = MemoryStore::new();
    store.set(FAVORITES_KEY, r#"["a", "b"]"#).unwrap();
    let ledger = FavoritesLedger::new(&store);
    assert_eq!(ledger.count(), 0);
}

#[test]
fn duplicate_ids_in_slot_are_collapsed() {
    let store = MemoryStore::new();
    store.set(FAVORITES_KEY, "[3,3,4,3]").unwrap();
    let ledger = FavoritesLedger::new(&store);
    assert_eq!(ledger.list_favorite_ids(), vec![3, 4]);
    assert!(!ledger.toggle_favorite(3).unwrap());
    assert!(!ledger.is_favorite(3));
}

#[test]
fn unreadable_slot_reads_as_empty() {
    let ledger = FavoritesLedger::new(UnreadableStore(MemoryStore::new()));
    assert!(!ledger.is_favorite(1));
    assert!(ledger.toggle_favorite(1).unwrap());
}

#[test]
fn failed_write_is_an_error_and_skips_observers() {
    let ledger = FavoritesLedger::new(ReadOnlyStore);
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    ledger.subscribe(move |_| {
        seen.fetch_add(1, Ordering::SeqCst);
    });

    let err = ledger.toggle_favorite(1).unwrap_err();
    assert!(matches!(err, LedgerError::Store(StoreError::Write { .. })));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn file_backed_ledgers_share_the_slot() {
    let tmp = tempfile::tempdir().unwrap();
    let first = FavoritesLedger::new(FileStore::new(tmp.path()));
    let second = FavoritesLedger::new(FileStore::new(tmp.path()));

    first.toggle_favorite(11).unwrap();
    assert!(second.is_favorite(11));
}

// -----------------------------------------------------------------------
// Observers
// -----------------------------------------------------------------------

#[test]
fn observers_receive_changes_until_unsubscribed() {
    let ledger = FavoritesLedger::new(MemoryStore::new());
    let changes: Arc<Mutex<Vec<FavoriteChange>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&changes);
    let subscription = ledger.subscribe(move |change| {
        sink.lock().unwrap().push(*change);
    });

    ledger.toggle_favorite(4).unwrap();
    ledger.toggle_favorite(8).unwrap();
    assert!(ledger.unsubscribe(subscription));
    assert!(!ledger.unsubscribe(subscription));
    ledger.toggle_favorite(4).unwrap();

    let seen = changes.lock().unwrap().clone();
    assert_eq!(
        seen,
        vec![
            FavoriteChange {
                id: 4,
                is_favorite: true,
                count: 1
            },
            FavoriteChange {
                id: 8,
                is_favorite: true,
                count: 2
            },
        ]
    );
}

// -----------------------------------------------------------------------
// Annotation
// -----------------------------------------------------------------------

#[test]
fn annotate_marks_favorites_and_keeps_order() {
    let ledger = FavoritesLedger::new(MemoryStore::new());
    ledger.toggle_favorite(2).unwrap();

    let listings = ledger.annotate(vec![record(1, "A"), record(2, "B"), record(3, "C")]);
    let flags: Vec<(PropertyId, bool)> = listings
        .iter()
        .map(|l| (l.property.id, l.is_favorite))
        .collect();
    assert_eq!(flags, vec![(1, false), (2, true), (3, false)]);
}

#[test]
fn favorites_among_returns_favoriting_order_and_skips_missing() {
    let ledger = FavoritesLedger::new(MemoryStore::new());
    for id in [3, 99, 1] {
        ledger.toggle_favorite(id).unwrap();
    }

    let favorites =
        ledger.favorites_among(vec![record(1, "A"), record(2, "B"), record(3, "C")]);
    let ids: Vec<PropertyId> = favorites.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![3, 1]);
}

#[test]
fn favorite_listing_serializes_flat_with_is_favorite() {
    let listing = FavoriteListing {
        property: record(5, "Flat"),
        is_favorite: true,
    };
    let value = serde_json::to_value(&listing).unwrap();
    assert_eq!(value["id"], 5);
    assert_eq!(value["title"], "Flat");
    assert_eq!(value["isFavorite"], true);
}
