//! Query orchestration: record store → normalizer → search engine.

use std::time::Duration;

use homefinder_core::{
    search, FilterCriteria, PropertyId, PropertyRecord, PropertyStatus, PropertyType,
};
use serde_json::Value;

use crate::debounce::DebouncedQuery;
use crate::error::ServiceError;
use crate::normalize::normalize;
use crate::store::RecordStore;

/// Entry point the presentation layer uses to read listings.
///
/// Every row from the store is normalized, rows without a usable id are
/// dropped, and the full criteria are applied locally even when the store
/// already evaluated some of them. The engine is idempotent, so that second
/// pass never changes a correctly filtered result.
pub struct PropertyService<S> {
    store: S,
}

impl<S: RecordStore> PropertyService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Listings matching `criteria`, in the requested order.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::DataSourceUnavailable`] if the record store
    /// fails. The call is not retried.
    pub async fn search_properties(
        &self,
        criteria: &FilterCriteria,
    ) -> Result<Vec<PropertyRecord>, ServiceError> {
        let rows = self.store.query(criteria).await?;
        let fetched = rows.len();
        let results = search(normalize_rows(&rows), criteria);
        tracing::debug!(
            fetched,
            matched = results.len(),
            sort = %criteria.sort_by,
            "search completed"
        );
        Ok(results)
    }

    /// Every listing, in store order.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::DataSourceUnavailable`] if the record store
    /// fails.
    pub async fn get_all(&self) -> Result<Vec<PropertyRecord>, ServiceError> {
        let rows = self.store.fetch_all().await?;
        Ok(normalize_rows(&rows))
    }

    /// The listing with the given id. A missing listing is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::DataSourceUnavailable`] if the record store
    /// fails.
    pub async fn get_by_id(&self, id: PropertyId) -> Result<Option<PropertyRecord>, ServiceError> {
        let Some(row) = self.store.fetch_by_id(id).await? else {
            tracing::debug!(id, "listing not found");
            return Ok(None);
        };
        let record = normalize(&row);
        if record.id == id {
            Ok(Some(record))
        } else {
            tracing::warn!(
                requested = id,
                returned = record.id,
                "record store returned a different listing"
            );
            Ok(None)
        }
    }

    /// Property types offered by filter controls.
    #[must_use]
    pub fn property_types(&self) -> &'static [PropertyType] {
        &PropertyType::ALL
    }

    /// Listing statuses offered by filter controls.
    #[must_use]
    pub fn status_types(&self) -> &'static [PropertyStatus] {
        &PropertyStatus::ALL
    }
}

fn normalize_rows(rows: &[Value]) -> Vec<PropertyRecord> {
    rows.iter()
        .filter_map(|row| {
            let record = normalize(row);
            if record.id == 0 {
                tracing::warn!("dropping listing row without a positive id");
                None
            } else {
                Some(record)
            }
        })
        .collect()
}

/// A search box bound to one view.
///
/// Input is debounced, and a result (or error) that arrives after a newer
/// search was started is discarded. Superseded searches resolve to `None`.
#[derive(Debug)]
pub struct SearchSession {
    debouncer: DebouncedQuery,
}

impl SearchSession {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            debouncer: DebouncedQuery::new(delay),
        }
    }

    /// Debounces `criteria`, runs the search, and returns its outcome only if
    /// this is still the latest search.
    pub async fn run<S: RecordStore>(
        &self,
        service: &PropertyService<S>,
        criteria: FilterCriteria,
    ) -> Option<Result<Vec<PropertyRecord>, ServiceError>> {
        let (ticket, criteria) = self.debouncer.settle_ticketed(criteria).await?;
        let outcome = service.search_properties(&criteria).await;
        self.debouncer.sequencer().accept(ticket, outcome)
    }
}
