//! Movie catalog storage and retrieval.
//!
//! [`MovieCatalog`] is the document store behind the movies service;
//! [`MovieSource`] is how the random-movies service reads that catalog over
//! HTTP.

pub mod memory;
pub mod postgres;
pub mod seed;
pub mod source;

use async_trait::async_trait;

use crate::error::Result;
use crate::movie::MovieRecord;

pub use memory::InMemoryMovieCatalog;
pub use postgres::{MIGRATOR, PostgresMovieCatalog};
pub use seed::{SeedOutcome, load_seed_file, seed_if_empty};
pub use source::{HttpMovieSource, MovieSource};

/// Document store holding the movie collection.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Every record, in insertion order.
    async fn list_all(&self) -> Result<Vec<MovieRecord>>;

    /// First record whose title matches exactly.
    async fn find_by_title(&self, title: &str) -> Result<Option<MovieRecord>>;

    /// Records whose `genres` contain `genre` (exact match).
    async fn find_by_genre(&self, genre: &str) -> Result<Vec<MovieRecord>>;

    /// Number of stored records.
    async fn count(&self) -> Result<u64>;

    /// Insert records as-is, returning how many were written.
    async fn insert_many(&self, records: Vec<MovieRecord>) -> Result<u64>;
}
