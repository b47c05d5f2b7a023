//! Record Store port.
//!
//! A record store supplies raw listing rows. It never normalizes them; that
//! is the job of [`crate::normalize`], which the query service applies to
//! every row it receives.

use std::future::Future;

use homefinder_core::{AppConfig, FilterCriteria, PropertyId, RecordSource};
use serde_json::Value;

use crate::client::RemoteRecordStore;
use crate::error::RecordError;
use crate::static_store::StaticRecordStore;

/// Source of raw listing rows.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - `fetch_by_id` reports a missing record as `Ok(None)`, never as an error
/// - `query` may apply any subset of the criteria; callers re-apply the full
///   criteria locally, so a store that ignores them entirely is correct
pub trait RecordStore: Send + Sync {
    /// Every row the store holds.
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<Value>, RecordError>> + Send;

    /// The row with the given id, if any.
    fn fetch_by_id(
        &self,
        id: PropertyId,
    ) -> impl Future<Output = Result<Option<Value>, RecordError>> + Send;

    /// Rows matching as much of `criteria` as the store can evaluate itself.
    ///
    /// Defaults to [`Self::fetch_all`].
    fn query(
        &self,
        _criteria: &FilterCriteria,
    ) -> impl Future<Output = Result<Vec<Value>, RecordError>> + Send {
        self.fetch_all()
    }
}

/// The record store selected by [`AppConfig::record_source`].
pub enum ConfiguredStore {
    Static(StaticRecordStore),
    Remote(RemoteRecordStore),
}

impl ConfiguredStore {
    /// Builds the store named by the configuration.
    ///
    /// # Errors
    ///
    /// - [`RecordError::DatasetIo`] / [`RecordError::DatasetParse`] if a
    ///   dataset file cannot be read or is not a JSON array.
    /// - [`RecordError::InvalidBaseUrl`] / [`RecordError::Http`] if the
    ///   remote client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, RecordError> {
        match &config.record_source {
            RecordSource::Bundled => Ok(Self::Static(StaticRecordStore::bundled()?)),
            RecordSource::File(path) => Ok(Self::Static(StaticRecordStore::from_path(path)?)),
            RecordSource::Remote { base_url } => {
                Ok(Self::Remote(RemoteRecordStore::with_base_url(
                    base_url,
                    config.api_key.as_deref(),
                    config.request_timeout_secs,
                    config.page_size,
                )?))
            }
        }
    }
}

impl RecordStore for ConfiguredStore {
    async fn fetch_all(&self) -> Result<Vec<Value>, RecordError> {
        match self {
            Self::Static(store) => store.fetch_all().await,
            Self::Remote(store) => store.fetch_all().await,
        }
    }

    async fn fetch_by_id(&self, id: PropertyId) -> Result<Option<Value>, RecordError> {
        match self {
            Self::Static(store) => store.fetch_by_id(id).await,
            Self::Remote(store) => store.fetch_by_id(id).await,
        }
    }

    async fn query(&self, criteria: &FilterCriteria) -> Result<Vec<Value>, RecordError> {
        match self {
            Self::Static(store) => store.query(criteria).await,
            Self::Remote(store) => store.query(criteria).await,
        }
    }
}
