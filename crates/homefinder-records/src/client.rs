//! HTTP client for the remote record service.
//!
//! Wraps `reqwest` with the service's JSON envelope handling, optional API
//! key, and offset pagination. Every response body is checked for
//! `"success": false` and surfaced as [`RecordError::Api`].

use std::time::Duration;

use homefinder_core::{FilterCriteria, PropertyId};
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;

use crate::error::RecordError;
use crate::pagination::next_offset;
use crate::store::RecordStore;
use crate::types::{ItemResponse, ListResponse};

/// Maximum number of pages to fetch before returning an error.
/// Prevents infinite loops on a service that never reports a short page.
const MAX_PAGES: usize = 200;

const DEFAULT_PAGE_SIZE: u32 = 100;

const API_KEY_HEADER: &str = "X-Api-Key";

/// Record store backed by the remote record service.
///
/// Evaluates filter criteria server-side via query parameters. Free-text
/// matching is always requested as a substring match so results agree with
/// the local search engine.
pub struct RemoteRecordStore {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
    page_size: u32,
}

impl RemoteRecordStore {
    /// Creates a client with the default page size.
    ///
    /// # Errors
    ///
    /// See [`Self::with_base_url`].
    pub fn new(
        base_url: &str,
        api_key: Option<&str>,
        timeout_secs: u64,
    ) -> Result<Self, RecordError> {
        Self::with_base_url(base_url, api_key, timeout_secs, DEFAULT_PAGE_SIZE)
    }

    /// Creates a client for the service rooted at `base_url`.
    ///
    /// A `page_size` of `0` is treated as the default page size.
    ///
    /// # Errors
    ///
    /// - [`RecordError::InvalidBaseUrl`] if `base_url` does not parse or is
    ///   not `http`/`https`.
    /// - [`RecordError::Http`] if the underlying `reqwest::Client` cannot be
    ///   constructed.
    pub fn with_base_url(
        base_url: &str,
        api_key: Option<&str>,
        timeout_secs: u64,
        page_size: u32,
    ) -> Result<Self, RecordError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("homefinder/0.1 (listing-browser)")
            .build()?;

        // Ensure exactly one trailing slash so `Url::join` appends to the
        // configured path instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim().trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| RecordError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(RecordError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
            api_key: api_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_owned),
            page_size: if page_size == 0 {
                DEFAULT_PAGE_SIZE
            } else {
                page_size
            },
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetches every page of `GET /properties` with the given filter
    /// parameters.
    ///
    /// # Errors
    ///
    /// - [`RecordError::Api`] if the service reports a failure.
    /// - [`RecordError::UnexpectedStatus`] on a non-2xx status.
    /// - [`RecordError::Http`] on network failure.
    /// - [`RecordError::Deserialize`] if a page does not match the envelope.
    /// - [`RecordError::PaginationLimit`] after [`MAX_PAGES`] pages.
    async fn fetch_pages(
        &self,
        params: &[(&'static str, String)],
    ) -> Result<Vec<Value>, RecordError> {
        let mut rows: Vec<Value> = Vec::new();
        let mut offset: u64 = 0;
        let mut page_count = 0usize;

        loop {
            page_count += 1;
            if page_count > MAX_PAGES {
                return Err(RecordError::PaginationLimit {
                    max_pages: MAX_PAGES,
                });
            }

            let url = self.list_url(params, offset);
            tracing::debug!(%url, page = page_count, "fetching listings page");

            let body = self
                .request_json(&url)
                .await?
                .ok_or_else(|| RecordError::UnexpectedStatus {
                    status: StatusCode::NOT_FOUND.as_u16(),
                    url: url.to_string(),
                })?;
            Self::check_api_error(&body)?;

            let page: ListResponse =
                serde_json::from_value(body).map_err(|e| RecordError::Deserialize {
                    context: format!("listings page at offset {offset}"),
                    source: e,
                })?;

            let page_len = page.data.len();
            rows.extend(page.data);

            match next_offset(offset, page_len, self.page_size, page.total) {
                Some(next) => offset = next,
                None => break,
            }
        }

        tracing::debug!(rows = rows.len(), pages = page_count, "fetched listings");
        Ok(rows)
    }

    fn list_url(&self, params: &[(&'static str, String)], offset: u64) -> Url {
        let mut url = self.endpoint("properties");
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("limit", &self.page_size.to_string());
            pairs.append_pair("offset", &offset.to_string());
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    fn item_url(&self, id: PropertyId) -> Url {
        self.endpoint(&format!("properties/{id}"))
    }

    fn endpoint(&self, path: &str) -> Url {
        // `path` is a fixed relative segment, so joining onto a valid base
        // cannot fail; fall back to the base itself to stay panic-free.
        self.base_url
            .join(path)
            .unwrap_or_else(|_| self.base_url.clone())
    }

    /// Sends a GET request and parses the body as JSON.
    ///
    /// Returns `Ok(None)` for HTTP 404 so item lookups can report a missing
    /// record without an error.
    async fn request_json(&self, url: &Url) -> Result<Option<Value>, RecordError> {
        let mut request = self.client.get(url.clone());
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            tracing::warn!(
                %url,
                status = status.as_u16(),
                "record service returned an error status"
            );
            return Err(RecordError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| RecordError::Deserialize {
                context: url.to_string(),
                source: e,
            })
    }

    /// Checks the `"success"` flag of the envelope and returns the service's
    /// message when it is `false`.
    fn check_api_error(body: &Value) -> Result<(), RecordError> {
        if body.get("success").and_then(Value::as_bool) == Some(false) {
            let msg = body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            tracing::warn!(message = %msg, "record service reported a failure");
            return Err(RecordError::Api(msg));
        }
        Ok(())
    }
}

/// Translates filter criteria into list-endpoint query parameters.
///
/// Only constrained predicates are sent. The sort key is always sent.
pub(crate) fn query_params(criteria: &FilterCriteria) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    let query = criteria.search_query.trim();
    if !query.is_empty() {
        params.push(("q", query.to_string()));
        params.push(("match", "contains".to_string()));
    }
    if let Some(min) = criteria.price_min {
        params.push(("priceMin", min.to_string()));
    }
    if let Some(max) = criteria.price_max {
        params.push(("priceMax", max.to_string()));
    }
    if let Some(bedrooms) = criteria.bedrooms {
        params.push(("bedrooms", bedrooms.to_string()));
    }
    if let Some(bathrooms) = criteria.bathrooms {
        params.push(("bathrooms", bathrooms.to_string()));
    }
    if !criteria.property_type.is_empty() {
        let types: Vec<&str> = criteria.property_type.iter().map(|t| t.as_str()).collect();
        params.push(("propertyType", types.join(",")));
    }
    if !criteria.status.is_empty() {
        let statuses: Vec<&str> = criteria.status.iter().map(|s| s.as_str()).collect();
        params.push(("status", statuses.join(",")));
    }
    params.push(("sortBy", criteria.sort_by.as_str().to_string()));
    params
}

impl RecordStore for RemoteRecordStore {
    async fn fetch_all(&self) -> Result<Vec<Value>, RecordError> {
        self.fetch_pages(&[]).await
    }

    async fn fetch_by_id(&self, id: PropertyId) -> Result<Option<Value>, RecordError> {
        let url = self.item_url(id);
        tracing::debug!(%url, id, "fetching listing");

        let Some(body) = self.request_json(&url).await? else {
            return Ok(None);
        };
        Self::check_api_error(&body)?;

        let item: ItemResponse =
            serde_json::from_value(body).map_err(|e| RecordError::Deserialize {
                context: format!("listing {id}"),
                source: e,
            })?;
        Ok(item.data.filter(|data| !data.is_null()))
    }

    async fn query(&self, criteria: &FilterCriteria) -> Result<Vec<Value>, RecordError> {
        self.fetch_pages(&query_params(criteria)).await
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
