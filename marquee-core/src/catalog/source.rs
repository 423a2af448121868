//! Reading the movie collection from the movies service.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::error::{CatalogError, Result};
use crate::http::{RetryPolicy, ensure_success};
use crate::movie::MovieRecord;

/// Supplies the full movie collection to the sampling endpoints.
#[async_trait]
pub trait MovieSource: Send + Sync {
    /// Every record in the collection, in upstream order. Elements that are
    /// not JSON objects are skipped.
    async fn fetch_all(&self) -> Result<Vec<MovieRecord>>;
}

/// Reads the collection from the movies service's list endpoint.
#[derive(Debug, Clone)]
pub struct HttpMovieSource {
    client: reqwest::Client,
    url: Url,
    retry: RetryPolicy,
}

impl HttpMovieSource {
    /// Fails only if `url` does not parse.
    pub fn new(client: reqwest::Client, url: &str, retry: RetryPolicy) -> Result<Self> {
        Ok(Self {
            client,
            url: Url::parse(url)?,
            retry,
        })
    }

    /// Endpoint this source reads from.
    pub fn url(&self) -> &Url {
        &self.url
    }

    async fn fetch_once(&self) -> Result<Value> {
        let response = self.client.get(self.url.clone()).send().await?;
        let response = ensure_success(response)?;
        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl MovieSource for HttpMovieSource {
    async fn fetch_all(&self) -> Result<Vec<MovieRecord>> {
        let body = self.retry.run("movie_source", || self.fetch_once()).await?;

        let Value::Array(items) = body else {
            return Err(CatalogError::MalformedRecord(format!(
                "{} did not return a JSON array",
                self.url
            )));
        };

        let total = items.len();
        let records: Vec<MovieRecord> = items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match MovieRecord::try_from(item) {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!(index, url = %self.url, error = %err, "skipping malformed movie document");
                    None
                }
            })
            .collect();
        debug!(count = records.len(), total, url = %self.url, "fetched movie collection");
        Ok(records)
    }
}
