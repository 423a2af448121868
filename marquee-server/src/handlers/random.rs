use axum::{Json, extract::State};
use futures::future::join_all;
use serde::{Serialize, Serializer, ser::SerializeMap};
use tracing::info;

use marquee_core::{movie::MovieRecord, sampling::FEATURED_GENRES};

use crate::infra::{
    app_state::RandomMoviesState,
    errors::{AppError, AppResult},
};

/// Per-genre samples, serialized as a JSON object in genre order.
#[derive(Debug, Default)]
pub struct GenreSamples(pub Vec<(&'static str, Vec<MovieRecord>)>);

impl Serialize for GenreSamples {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (genre, records) in &self.0 {
            map.serialize_entry(genre, records)?;
        }
        map.end()
    }
}

async fn fetch_collection(state: &RandomMoviesState) -> AppResult<Vec<MovieRecord>> {
    let records = state.source.fetch_all().await?;
    if records.is_empty() {
        return Err(AppError::not_found("no movies available"));
    }
    Ok(records)
}

pub async fn random_movies(State(state): State<RandomMoviesState>) -> AppResult<Json<Vec<MovieRecord>>> {
    let records = fetch_collection(&state).await?;
    let picked = state.sample(&records)?;
    info!(available = records.len(), picked = picked.len(), "sampled random movies");

    Ok(Json(state.repairer.repair_batch(picked).await))
}

pub async fn random_movies_by_genres(
    State(state): State<RandomMoviesState>,
) -> AppResult<Json<GenreSamples>> {
    let records = fetch_collection(&state).await?;

    let mut picks = Vec::with_capacity(FEATURED_GENRES.len());
    for genre in FEATURED_GENRES {
        picks.push((genre, state.sample_by_genre(&records, genre)?));
    }

    // All genres share the repairer's permits, so the bound holds overall.
    let repaired = join_all(picks.into_iter().map(|(genre, picked)| {
        let repairer = &state.repairer;
        async move { (genre, repairer.repair_batch(picked).await) }
    }))
    .await;

    Ok(Json(GenreSamples(repaired)))
}
