use axum::{
    Json,
    extract::{Path, State},
};
use tracing::debug;

use marquee_core::movie::MovieRecord;

use crate::infra::{
    app_state::MoviesState,
    errors::{AppError, AppResult},
};

pub async fn list_movies(State(state): State<MoviesState>) -> AppResult<Json<Vec<MovieRecord>>> {
    let movies = state.catalog.list_all().await?;
    debug!(count = movies.len(), "listing movies");
    Ok(Json(movies))
}

pub async fn movie_by_title(
    State(state): State<MoviesState>,
    Path(title): Path<String>,
) -> AppResult<Json<MovieRecord>> {
    state
        .catalog
        .find_by_title(&title)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("no movie titled {title:?}")))
}

pub async fn movies_by_genre(
    State(state): State<MoviesState>,
    Path(genre): Path<String>,
) -> AppResult<Json<Vec<MovieRecord>>> {
    let movies = state.catalog.find_by_genre(&genre).await?;
    if movies.is_empty() {
        return Err(AppError::not_found(format!("no movies in genre {genre:?}")));
    }
    Ok(Json(movies))
}
