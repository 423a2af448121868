//! PostgreSQL-backed movie catalog.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::{
    PgPool,
    migrate::Migrator,
    postgres::PgPoolOptions,
    types::Json,
};
use tracing::info;

use super::MovieCatalog;
use crate::error::{CatalogError, Result};
use crate::movie::MovieRecord;

/// Embedded schema migrations for the `movies` table.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Movie documents stored as JSONB rows; `seq` preserves insertion order.
#[derive(Clone)]
pub struct PostgresMovieCatalog {
    pool: PgPool,
}

impl fmt::Debug for PostgresMovieCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresMovieCatalog")
            .field("pool_size", &self.pool.size())
            .field("idle_connections", &self.pool.num_idle())
            .finish()
    }
}

impl PostgresMovieCatalog {
    /// Open a connection pool to `database_url`. Does not run migrations;
    /// call [`initialize_schema`](Self::initialize_schema) for that.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections.max(1))
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        info!(max_connections, "movie catalog pool initialized");
        Ok(Self { pool })
    }

    /// Underlying pool, for maintenance queries.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply any pending migrations.
    pub async fn initialize_schema(&self) -> Result<()> {
        MIGRATOR.run(&self.pool).await?;
        info!("movie catalog schema is up to date");
        Ok(())
    }
}

fn documents(rows: Vec<(Json<MovieRecord>,)>) -> Vec<MovieRecord> {
    rows.into_iter().map(|(Json(record),)| record).collect()
}

#[async_trait]
impl MovieCatalog for PostgresMovieCatalog {
    async fn list_all(&self) -> Result<Vec<MovieRecord>> {
        let rows = sqlx::query_as::<_, (Json<MovieRecord>,)>(
            "SELECT document FROM movies ORDER BY seq",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(documents(rows))
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<MovieRecord>> {
        let row = sqlx::query_as::<_, (Json<MovieRecord>,)>(
            r#"
            SELECT document FROM movies
            WHERE document ->> 'title' = $1
            ORDER BY seq
            LIMIT 1
            "#,
        )
        .bind(title)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|(Json(record),)| record))
    }

    async fn find_by_genre(&self, genre: &str) -> Result<Vec<MovieRecord>> {
        let rows = sqlx::query_as::<_, (Json<MovieRecord>,)>(
            r#"
            SELECT document FROM movies
            WHERE document -> 'genres' @> jsonb_build_array($1::text)
            ORDER BY seq
            "#,
        )
        .bind(genre)
        .fetch_all(&self.pool)
        .await?;
        Ok(documents(rows))
    }

    async fn count(&self) -> Result<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM movies")
            .fetch_one(&self.pool)
            .await?;
        u64::try_from(count).map_err(|_| CatalogError::Internal(format!("negative row count {count}")))
    }

    async fn insert_many(&self, records: Vec<MovieRecord>) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0u64;

        for record in &records {
            let result = sqlx::query("INSERT INTO movies (document) VALUES ($1)")
                .bind(Json(record))
                .execute(&mut *tx)
                .await?;
            inserted += result.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }
}
