//! In-process [`MovieCatalog`](super::MovieCatalog) implementation.

use std::sync::RwLock;

use async_trait::async_trait;

use super::MovieCatalog;
use crate::error::{CatalogError, Result};
use crate::movie::{MovieRecord, TITLE_FIELD};

/// Process-local [`MovieCatalog`] with the same query semantics as the
/// Postgres store. Used for tests and for running without a database.
#[derive(Debug, Default)]
pub struct InMemoryMovieCatalog {
    records: RwLock<Vec<MovieRecord>>,
}

impl InMemoryMovieCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `records` already stored, in order.
    pub fn with_records(records: Vec<MovieRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<MovieRecord>>> {
        self.records
            .read()
            .map_err(|_| CatalogError::Internal("in-memory catalog lock poisoned".to_string()))
    }
}

#[async_trait]
impl MovieCatalog for InMemoryMovieCatalog {
    async fn list_all(&self) -> Result<Vec<MovieRecord>> {
        Ok(self.read()?.clone())
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<MovieRecord>> {
        // Exact string comparison on the raw field, like `document ->> 'title'`.
        Ok(self
            .read()?
            .iter()
            .find(|record| record.get(TITLE_FIELD).and_then(|v| v.as_str()) == Some(title))
            .cloned())
    }

    async fn find_by_genre(&self, genre: &str) -> Result<Vec<MovieRecord>> {
        Ok(self
            .read()?
            .iter()
            .filter(|record| record.has_genre(genre))
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.read()?.len() as u64)
    }

    async fn insert_many(&self, records: Vec<MovieRecord>) -> Result<u64> {
        let inserted = records.len() as u64;
        self.records
            .write()
            .map_err(|_| CatalogError::Internal("in-memory catalog lock poisoned".to_string()))?
            .extend(records);
        Ok(inserted)
    }
}
