//! Record service response envelopes.
//!
//! Every response is wrapped in `{"success": bool, ...}`. Failures carry a
//! `message`; the client checks for them before deserializing into these
//! types, so only the success shapes are modelled here.
//!
//! Rows are kept as raw [`serde_json::Value`]s. Their field names and value
//! encodings vary (see [`crate::fields`]) and are resolved by the normalizer,
//! not by serde.

use serde::Deserialize;
use serde_json::Value;

/// `GET /properties` page: `{"success": true, "data": [...], "total": N}`.
#[derive(Debug, Deserialize)]
pub struct ListResponse {
    #[serde(default)]
    pub data: Vec<Value>,
    /// Total rows matching the query across all pages. Some deployments omit it.
    #[serde(default)]
    pub total: Option<u64>,
}

/// `GET /properties/{id}`: `{"success": true, "data": {...}}`.
///
/// `data` is `null` when the id has no matching record.
#[derive(Debug, Deserialize)]
pub struct ItemResponse {
    #[serde(default)]
    pub data: Option<Value>,
}
