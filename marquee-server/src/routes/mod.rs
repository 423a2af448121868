use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{clicks, health::health, movies, random};
use crate::infra::app_state::{ClicksState, MoviesState, RandomMoviesState};

fn with_common_layers(router: Router) -> Router {
    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

pub fn movies_router(state: MoviesState) -> Router {
    let router = Router::new()
        .route("/health", get(|| health("movies")))
        .route("/movies", get(movies::list_movies))
        .route("/movies/title/{title}", get(movies::movie_by_title))
        .route("/movies/genre/{genre}", get(movies::movies_by_genre))
        .with_state(state);
    with_common_layers(router)
}

pub fn clicks_router(state: ClicksState) -> Router {
    let router = Router::new()
        .route("/health", get(|| health("clicks")))
        .route("/register-click", post(clicks::register_click))
        .route("/clicks/{movie_id}", get(clicks::get_clicks))
        .with_state(state);
    with_common_layers(router)
}

pub fn random_movies_router(state: RandomMoviesState) -> Router {
    let router = Router::new()
        .route("/health", get(|| health("random-movies")))
        .route("/random-movies", get(random::random_movies))
        .route("/random-movies-by-genres", get(random::random_movies_by_genres))
        .with_state(state);
    with_common_layers(router)
}
