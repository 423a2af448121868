//! Builds each service's state from [`Config`].

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use marquee_core::{
    catalog::{
        HttpMovieSource, InMemoryMovieCatalog, MovieCatalog, PostgresMovieCatalog, SeedOutcome,
        seed_if_empty,
    },
    clicks::{ClickCounter, ClickTracker, RedisClickPublisher},
    http::{RetryPolicy, build_client},
    posters::{
        HttpPosterProbe, OmdbPosterLookup, OmdbSettings, PosterRepairSettings, PosterRepairer,
    },
};

use super::{
    app_state::{ClicksState, MoviesState, RandomMoviesState},
    config::Config,
};

pub async fn movies_state(config: &Config) -> anyhow::Result<MoviesState> {
    let catalog: Arc<dyn MovieCatalog> = match config.database_url.as_deref() {
        Some(url) => {
            let pg = PostgresMovieCatalog::connect(url, config.database_max_connections)
                .await
                .context("failed to connect to PostgreSQL")?;
            pg.initialize_schema()
                .await
                .context("movie catalog migration failed")?;
            Arc::new(pg)
        }
        None => {
            warn!("DATABASE_URL is not set; serving the catalog from memory");
            Arc::new(InMemoryMovieCatalog::new())
        }
    };

    let outcome = seed_if_empty(catalog.as_ref(), &config.movies_seed_path)
        .await
        .with_context(|| {
            format!(
                "failed to seed movie catalog from {}",
                config.movies_seed_path.display()
            )
        })?;
    if let SeedOutcome::Seeded { inserted } = outcome {
        info!(inserted, "movie catalog ready");
    }

    Ok(MoviesState::new(catalog))
}

pub async fn clicks_state(config: &Config) -> anyhow::Result<ClicksState> {
    let publisher = RedisClickPublisher::connect(&config.redis_url, config.click_queue.clone())
        .await
        .context("failed to connect click publisher to Redis")?;

    let tracker = ClickTracker::new(Arc::new(ClickCounter::new()), Arc::new(publisher));
    Ok(ClicksState::new(tracker))
}

pub fn random_movies_state(config: &Config) -> anyhow::Result<RandomMoviesState> {
    if config.omdb_api_key.is_empty() {
        warn!("OMDB_API_KEY is not set; poster lookups will fail and fall back to the placeholder");
    }

    let client = build_client(config.http_timeout).context("failed to build HTTP client")?;
    let retry = RetryPolicy::with_max_retries(config.lookup_retries);

    let source = HttpMovieSource::new(client.clone(), &config.movies_api_url, retry)
        .with_context(|| format!("invalid MOVIES_API_URL {:?}", config.movies_api_url))?;
    let settings = OmdbSettings::new(&config.omdb_api_url, config.omdb_api_key.clone())
        .with_context(|| format!("invalid OMDB_API_URL {:?}", config.omdb_api_url))?;

    let repairer = PosterRepairer::new(
        Arc::new(HttpPosterProbe::new(client.clone(), retry)),
        Arc::new(OmdbPosterLookup::new(client, settings, retry)),
        PosterRepairSettings {
            placeholder: config.poster_placeholder.clone(),
            max_concurrency: config.repair_concurrency,
        },
    );

    info!(
        source = %source.url(),
        sample_size = config.sample_size,
        concurrency = config.repair_concurrency,
        "random-movies service configured"
    );
    Ok(RandomMoviesState::new(Arc::new(source), repairer, config.sample_size))
}
