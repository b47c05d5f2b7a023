pub mod client;
pub mod debounce;
pub mod error;
pub mod fields;
pub mod normalize;
pub mod pagination;
pub mod service;
pub mod static_store;
pub mod store;
pub mod types;

pub use client::RemoteRecordStore;
pub use debounce::{DebouncedQuery, QuerySequencer, QueryTicket};
pub use error::{RecordError, ServiceError};
pub use normalize::{normalize, record_id};
pub use service::{PropertyService, SearchSession};
pub use static_store::StaticRecordStore;
pub use store::{ConfiguredStore, RecordStore};
