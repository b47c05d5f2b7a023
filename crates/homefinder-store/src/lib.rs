pub mod favorites;
pub mod kv;

pub use favorites::{
    FavoriteChange, FavoriteListing, FavoritesLedger, Observer, SubscriptionId, FAVORITES_KEY,
};
pub use kv::{FileStore, KeyValueStore, MemoryStore};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid slot key \"{0}\"")]
    InvalidKey(String),

    #[error("failed to read slot {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write slot {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to encode favorites: {0}")]
    Encode(#[source] serde_json::Error),
}
