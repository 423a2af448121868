mod common;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::json;

use common::{FailingPublisher, RecordingPublisher, get_json, post_json, send};
use marquee_core::clicks::{ClickCounter, ClickEvent, ClickPublisher, ClickTracker};
use marquee_server::{ClicksState, clicks_router};

fn router_with(publisher: Arc<dyn ClickPublisher>) -> axum::Router {
    let tracker = ClickTracker::new(Arc::new(ClickCounter::new()), publisher);
    clicks_router(ClicksState::new(tracker))
}

#[tokio::test]
async fn registering_a_click_publishes_the_running_count() {
    let publisher = Arc::new(RecordingPublisher::default());
    let router = router_with(publisher.clone());

    for _ in 0..2 {
        let (status, body) = send(
            router.clone(),
            post_json("/register-click", &json!({ "movieId": "573a1390f29313caabcd4135" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"click registered");
    }

    let events = publisher.events.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![
            ClickEvent { movie_id: "573a1390f29313caabcd4135".into(), clicks: 1 },
            ClickEvent { movie_id: "573a1390f29313caabcd4135".into(), clicks: 2 },
        ]
    );

    let (status, body) = get_json(router, "/clicks/573a1390f29313caabcd4135").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "movieId": "573a1390f29313caabcd4135", "clicks": 2 }));
}

#[tokio::test]
async fn missing_movie_id_is_rejected() {
    let publisher = Arc::new(RecordingPublisher::default());
    let router = router_with(publisher.clone());

    let (status, _) = send(router.clone(), post_json("/register-click", &json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(router, post_json("/register-click", &json!({ "movieId": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(publisher.events.lock().unwrap().is_empty());
}

#[tokio::test]
async fn numeric_movie_id_is_registered_as_a_string() {
    let publisher = Arc::new(RecordingPublisher::default());
    let router = router_with(publisher.clone());

    let (status, _) = send(router.clone(), post_json("/register-click", &json!({ "movieId": 1337 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        publisher.events.lock().unwrap().clone(),
        vec![ClickEvent { movie_id: "1337".into(), clicks: 1 }]
    );

    let (_, body) = get_json(router, "/clicks/1337").await;
    assert_eq!(body["clicks"], 1);
}

#[tokio::test]
async fn non_scalar_movie_id_is_rejected() {
    let router = router_with(Arc::new(RecordingPublisher::default()));

    for id in [json!(null), json!(true), json!(["m1"]), json!({ "id": "m1" })] {
        let (status, _) = send(router.clone(), post_json("/register-click", &json!({ "movieId": id }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn unparseable_body_is_a_bad_request() {
    let request = Request::post("/register-click")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send(router_with(Arc::new(RecordingPublisher::default())), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn publish_failure_still_registers_the_click() {
    let router = router_with(Arc::new(FailingPublisher));

    let (status, _) = send(router.clone(), post_json("/register-click", &json!({ "movieId": "m1" }))).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get_json(router, "/clicks/m1").await;
    assert_eq!(body["clicks"], 1);
}

#[tokio::test]
async fn unclicked_movie_has_zero_clicks() {
    let (status, body) = get_json(router_with(Arc::new(RecordingPublisher::default())), "/clicks/never").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["clicks"], 0);
}
