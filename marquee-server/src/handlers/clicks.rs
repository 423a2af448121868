use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use marquee_core::clicks::ClickEvent;

use crate::infra::{
    app_state::ClicksState,
    errors::{AppError, AppResult},
};

#[derive(Debug, Deserialize)]
pub struct RegisterClickRequest {
    #[serde(rename = "movieId", default)]
    pub movie_id: Option<Value>,
}

impl RegisterClickRequest {
    /// The id as a string. Numbers are accepted; blanks and other JSON types
    /// are not.
    pub fn movie_id(&self) -> Option<String> {
        match self.movie_id.as_ref()? {
            Value::String(id) if !id.trim().is_empty() => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }
}

pub async fn register_click(
    State(state): State<ClicksState>,
    payload: Result<Json<RegisterClickRequest>, JsonRejection>,
) -> AppResult<&'static str> {
    let Json(request) = payload.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;

    let movie_id = request
        .movie_id()
        .ok_or_else(|| AppError::bad_request("movieId is required"))?;

    let event = state.tracker.register(&movie_id).await;
    info!(movie_id = %event.movie_id, clicks = event.clicks, "click registered");
    Ok("click registered")
}

pub async fn get_clicks(
    State(state): State<ClicksState>,
    Path(movie_id): Path<String>,
) -> Json<ClickEvent> {
    let clicks = state.tracker.clicks(&movie_id);
    Json(ClickEvent { movie_id, clicks })
}
