//! Poster URL reachability checks.

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::error::{CatalogError, Result};
use crate::http::{RetryPolicy, ensure_success};

/// Reachability check for poster URLs. Implementations never fail: every
/// problem is reported as `false`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PosterProbe: Send + Sync {
    /// `true` only when `url` is http(s) and serves a success response.
    async fn is_reachable(&self, url: &str) -> bool;
}

/// Probes a poster by downloading it and checking for a success status.
#[derive(Debug, Clone)]
pub struct HttpPosterProbe {
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl HttpPosterProbe {
    /// Probes go through `client`; transient failures are retried per `retry`.
    pub fn new(client: reqwest::Client, retry: RetryPolicy) -> Self {
        Self { client, retry }
    }

    async fn fetch(&self, url: &Url) -> Result<usize> {
        let response = self.client.get(url.clone()).send().await?;
        let response = ensure_success(response)?;
        let body = response.bytes().await?;
        Ok(body.len())
    }
}

#[async_trait]
impl PosterProbe for HttpPosterProbe {
    async fn is_reachable(&self, url: &str) -> bool {
        let parsed = match Url::parse(url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => parsed,
            Ok(parsed) => {
                debug!(url, scheme = parsed.scheme(), "poster url has unsupported scheme");
                return false;
            }
            Err(err) => {
                debug!(url, error = %CatalogError::from(err), "poster url does not parse");
                return false;
            }
        };

        match self.retry.run("poster_probe", || self.fetch(&parsed)).await {
            Ok(bytes) => {
                debug!(url, bytes, "poster reachable");
                true
            }
            Err(err) => {
                debug!(url, error = %err, "poster unreachable");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        http::StatusCode,
        response::{IntoResponse, Response},
        routing::get,
    };
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    /// Serves `first` on the first request and `rest` afterwards, counting hits.
    fn flaky_image(first: StatusCode, rest: StatusCode) -> (Router, Arc<AtomicU32>) {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let router = Router::new().route(
            "/poster.jpg",
            get(move || {
                let counter = counter.clone();
                async move {
                    let status = if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                        first
                    } else {
                        rest
                    };
                    let response: Response = if status.is_success() {
                        vec![0xFF_u8, 0xD8, 0xFF, 0xE0].into_response()
                    } else {
                        status.into_response()
                    };
                    response
                }
            }),
        );
        (router, calls)
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn probe() -> HttpPosterProbe {
        let client = crate::http::build_client(Duration::from_secs(2)).unwrap();
        HttpPosterProbe::new(
            client,
            RetryPolicy {
                max_retries: 1,
                base_delay: Duration::from_millis(1),
                max_delay: Duration::from_millis(2),
            },
        )
    }

    #[tokio::test]
    async fn success_status_is_reachable() {
        let base = serve(Router::new().route(
            "/poster.jpg",
            get(|| async { vec![0xFF_u8, 0xD8, 0xFF, 0xE0] }),
        ))
        .await;

        assert!(probe().is_reachable(&format!("{base}/poster.jpg")).await);
    }

    #[tokio::test]
    async fn error_status_is_unreachable() {
        let base = serve(Router::new().route(
            "/gone.jpg",
            get(|| async { StatusCode::NOT_FOUND }),
        ))
        .await;

        assert!(!probe().is_reachable(&format!("{base}/gone.jpg")).await);
    }

    #[tokio::test]
    async fn transient_server_error_is_retried() {
        let (router, calls) = flaky_image(StatusCode::SERVICE_UNAVAILABLE, StatusCode::OK);
        let base = serve(router).await;

        assert!(probe().is_reachable(&format!("{base}/poster.jpg")).await);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn not_found_is_tried_once() {
        let (router, calls) = flaky_image(StatusCode::NOT_FOUND, StatusCode::OK);
        let base = serve(router).await;

        assert!(!probe().is_reachable(&format!("{base}/poster.jpg")).await);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unparseable_and_non_http_urls_are_unreachable() {
        let probe = probe();
        assert!(!probe.is_reachable("404.jpeg").await);
        assert!(!probe.is_reachable("ftp://images.test/poster.jpg").await);
    }

    #[tokio::test]
    async fn refused_connection_is_unreachable() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        assert!(!probe().is_reachable(&format!("http://{addr}/poster.jpg")).await);
    }
}
