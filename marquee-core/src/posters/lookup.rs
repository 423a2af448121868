//! Poster lookup against the OMDb title endpoint.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::{CatalogError, Result};
use crate::http::{RetryPolicy, ensure_success};

const OMDB_NO_IMAGE: &str = "N/A";
/// Public OMDb endpoint.
pub const DEFAULT_OMDB_URL: &str = "https://www.omdbapi.com/";

/// Maps a movie title to a candidate poster URL.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PosterLookup: Send + Sync {
    /// Returns [`CatalogError::LookupFailed`] (or a transport error) when no
    /// usable poster is known for `title`.
    async fn lookup(&self, title: &str) -> Result<String>;
}

/// Title key sent to the metadata service: whitespace runs become `-`.
pub fn normalize_title(title: &str) -> String {
    title.split_whitespace().collect::<Vec<_>>().join("-")
}

/// Where and how to reach OMDb.
#[derive(Debug, Clone)]
pub struct OmdbSettings {
    /// Endpoint the title query is sent to.
    pub base_url: Url,
    /// Sent as the `apikey` query parameter.
    pub api_key: String,
}

impl OmdbSettings {
    /// Fails if `base_url` does not parse.
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            api_key: api_key.into(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct OmdbTitleResponse {
    #[serde(rename = "Poster", default)]
    poster: Option<String>,
    #[serde(rename = "Response", default)]
    response: Option<String>,
    #[serde(rename = "Error", default)]
    error: Option<String>,
}

impl OmdbTitleResponse {
    fn into_poster(self, title: &str) -> Result<String> {
        if self.response.as_deref() == Some("False") {
            let reason = self.error.unwrap_or_else(|| "no match".to_string());
            return Err(CatalogError::LookupFailed(format!("{title}: {reason}")));
        }

        match self.poster {
            Some(poster) if !poster.trim().is_empty() && poster != OMDB_NO_IMAGE => Ok(poster),
            _ => Err(CatalogError::LookupFailed(format!(
                "{title}: no poster in metadata response"
            ))),
        }
    }
}

/// [`PosterLookup`] backed by the OMDb title endpoint.
#[derive(Debug, Clone)]
pub struct OmdbPosterLookup {
    client: reqwest::Client,
    settings: OmdbSettings,
    retry: RetryPolicy,
}

impl OmdbPosterLookup {
    /// Lookups go through `client` under `retry`.
    pub fn new(client: reqwest::Client, settings: OmdbSettings, retry: RetryPolicy) -> Self {
        Self {
            client,
            settings,
            retry,
        }
    }

    async fn fetch(&self, key: &str) -> Result<OmdbTitleResponse> {
        let response = self
            .client
            .get(self.settings.base_url.clone())
            .query(&[
                ("t", key),
                ("plot", "full"),
                ("apikey", self.settings.api_key.as_str()),
            ])
            .send()
            .await?;

        let response = ensure_success(response)?;
        Ok(response.json::<OmdbTitleResponse>().await?)
    }
}

#[async_trait]
impl PosterLookup for OmdbPosterLookup {
    async fn lookup(&self, title: &str) -> Result<String> {
        let key = normalize_title(title);
        if key.is_empty() {
            return Err(CatalogError::MalformedRecord(
                "cannot look up a blank title".to_string(),
            ));
        }

        debug!(title, key = %key, "looking up poster");
        let body = self.retry.run("poster_lookup", || self.fetch(&key)).await?;
        body.into_poster(title)
    }
}
