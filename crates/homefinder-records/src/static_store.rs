//! Record store backed by a static dataset held in memory.

use std::path::Path;

use homefinder_core::PropertyId;
use serde_json::Value;

use crate::error::RecordError;
use crate::normalize::record_id;
use crate::store::RecordStore;

const BUNDLED_DATASET: &str = include_str!("../data/properties.json");

/// Serves rows from a fixed in-memory dataset.
///
/// It evaluates no criteria itself, so `query` returns every row and the
/// query service filters locally.
#[derive(Debug, Clone, Default)]
pub struct StaticRecordStore {
    rows: Vec<Value>,
}

impl StaticRecordStore {
    /// The sample dataset compiled into this crate.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::DatasetParse`] if the bundled file is not a
    /// JSON array.
    pub fn bundled() -> Result<Self, RecordError> {
        Self::from_json(BUNDLED_DATASET)
    }

    /// Loads a JSON array of listing rows from disk.
    ///
    /// # Errors
    ///
    /// - [`RecordError::DatasetIo`] if the file cannot be read.
    /// - [`RecordError::DatasetParse`] if it is not a JSON array.
    pub fn from_path(path: &Path) -> Result<Self, RecordError> {
        let text = std::fs::read_to_string(path).map_err(|source| RecordError::DatasetIo {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    #[must_use]
    pub fn from_rows(rows: Vec<Value>) -> Self {
        Self { rows }
    }

    fn from_json(text: &str) -> Result<Self, RecordError> {
        let rows: Vec<Value> = serde_json::from_str(text).map_err(RecordError::DatasetParse)?;
        Ok(Self { rows })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl RecordStore for StaticRecordStore {
    async fn fetch_all(&self) -> Result<Vec<Value>, RecordError> {
        Ok(self.rows.clone())
    }

    async fn fetch_by_id(&self, id: PropertyId) -> Result<Option<Value>, RecordError> {
        Ok(self
            .rows
            .iter()
            .find(|row| record_id(row) == Some(id))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::json;

    use super::*;

    #[test]
    fn bundled_dataset_parses_and_every_row_has_an_id() {
        let store = StaticRecordStore::bundled().expect("bundled dataset parses");
        assert!(!store.is_empty());
        for row in &store.rows {
            assert!(record_id(row).is_some(), "row without id: {row}");
        }
    }

    #[tokio::test]
    async fn fetch_by_id_matches_any_id_key() {
        let store = StaticRecordStore::from_rows(vec![
            json!({ "Id": 1, "title": "A" }),
            json!({ "id": "2", "title": "B" }),
        ]);
        let found = store.fetch_by_id(2).await.unwrap().expect("row 2 exists");
        assert_eq!(found["title"], "B");
        assert!(store.fetch_by_id(3).await.unwrap().is_none());
    }

    #[test]
    fn from_path_reads_dataset_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"Id": 5, "title": "On disk"}}]"#).unwrap();
        let store = StaticRecordStore::from_path(file.path()).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn from_path_rejects_non_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"Id": 5}}"#).unwrap();
        let err = StaticRecordStore::from_path(file.path()).unwrap_err();
        assert!(matches!(err, RecordError::DatasetParse(_)));
    }

    #[test]
    fn from_path_missing_file_is_io_error() {
        let err = StaticRecordStore::from_path(Path::new("/nonexistent/listings.json"))
            .unwrap_err();
        assert!(matches!(err, RecordError::DatasetIo { .. }));
    }
}
