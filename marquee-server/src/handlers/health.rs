use axum::Json;
use serde_json::{Value, json};

pub async fn health(service: &'static str) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": service,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}
