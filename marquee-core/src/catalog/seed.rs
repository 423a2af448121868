//! First-start population of an empty catalog from a JSON export.

use std::path::Path;

use serde_json::Value;
use tracing::{info, warn};

use super::MovieCatalog;
use crate::error::{CatalogError, Result};
use crate::movie::MovieRecord;

/// What [`seed_if_empty`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The catalog already had documents; nothing was read.
    AlreadyPopulated { count: u64 },
    /// The seed file was loaded into an empty catalog.
    Seeded { inserted: u64 },
    /// The catalog is empty and no seed file exists at the given path.
    NoSeedFile,
}

/// Read a JSON array of movie documents, flattening extended-JSON `_id`s.
pub async fn load_seed_file(path: &Path) -> Result<Vec<MovieRecord>> {
    let raw = tokio::fs::read(path).await?;
    let value: Value = serde_json::from_slice(&raw)?;

    let Value::Array(items) = value else {
        return Err(CatalogError::MalformedRecord(format!(
            "seed file {} must contain a JSON array",
            path.display()
        )));
    };

    items
        .into_iter()
        .map(|item| {
            let mut record = MovieRecord::try_from(item)?;
            record.flatten_object_id();
            Ok(record)
        })
        .collect()
}

/// Populate `catalog` from the JSON array at `path`, but only when the
/// catalog holds no documents. A missing file is reported, not an error.
pub async fn seed_if_empty(catalog: &dyn MovieCatalog, path: &Path) -> Result<SeedOutcome> {
    let count = catalog.count().await?;
    if count > 0 {
        info!(count, "movie catalog already populated; skipping seed");
        return Ok(SeedOutcome::AlreadyPopulated { count });
    }

    if !tokio::fs::try_exists(path).await? {
        warn!(path = %path.display(), "movie catalog is empty and no seed file was found");
        return Ok(SeedOutcome::NoSeedFile);
    }

    let records = load_seed_file(path).await?;
    let inserted = catalog.insert_many(records).await?;
    info!(inserted, path = %path.display(), "seeded movie catalog");
    Ok(SeedOutcome::Seeded { inserted })
}
