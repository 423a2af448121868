//! Shared fakes and request helpers for the router tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, StatusCode},
};
use rand::{SeedableRng, rngs::StdRng};
use serde_json::Value;
use tower::ServiceExt;

use marquee_core::{
    CatalogError, MovieRecord, Result,
    catalog::MovieSource,
    clicks::{ClickEvent, ClickPublisher},
    posters::{PosterLookup, PosterProbe, PosterRepairSettings, PosterRepairer},
};
use marquee_server::RandomMoviesState;

/// Serves a fixed collection.
pub struct StaticSource(pub Vec<MovieRecord>);

#[async_trait]
impl MovieSource for StaticSource {
    async fn fetch_all(&self) -> Result<Vec<MovieRecord>> {
        Ok(self.0.clone())
    }
}

/// Behaves like a movies service that cannot be reached.
pub struct UnreachableSource;

#[async_trait]
impl MovieSource for UnreachableSource {
    async fn fetch_all(&self) -> Result<Vec<MovieRecord>> {
        Err(CatalogError::Internal("connection refused".to_string()))
    }
}

/// Only URLs under `http://valid.` resolve.
pub struct PrefixProbe;

#[async_trait]
impl PosterProbe for PrefixProbe {
    async fn is_reachable(&self, url: &str) -> bool {
        url.starts_with("http://valid.")
    }
}

/// Knows posters for a fixed set of titles.
pub struct TableLookup(pub Vec<(&'static str, &'static str)>);

#[async_trait]
impl PosterLookup for TableLookup {
    async fn lookup(&self, title: &str) -> Result<String> {
        self.0
            .iter()
            .find(|(known, _)| *known == title)
            .map(|(_, poster)| poster.to_string())
            .ok_or_else(|| CatalogError::LookupFailed(title.to_string()))
    }
}

#[derive(Default)]
pub struct RecordingPublisher {
    pub events: Mutex<Vec<ClickEvent>>,
}

#[async_trait]
impl ClickPublisher for RecordingPublisher {
    async fn publish(&self, event: &ClickEvent) -> Result<()> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

pub struct FailingPublisher;

#[async_trait]
impl ClickPublisher for FailingPublisher {
    async fn publish(&self, _event: &ClickEvent) -> Result<()> {
        Err(CatalogError::Internal("queue unavailable".to_string()))
    }
}

pub fn random_state(source: impl MovieSource + 'static, lookup: TableLookup) -> RandomMoviesState {
    let repairer = PosterRepairer::new(
        Arc::new(PrefixProbe),
        Arc::new(lookup),
        PosterRepairSettings::default(),
    );
    RandomMoviesState::with_rng(Arc::new(source), repairer, 10, StdRng::seed_from_u64(17))
}

pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response: Response<Body> = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

pub async fn get(router: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    send(router, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(router, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
