use std::{env, fmt, path::PathBuf, str::FromStr, time::Duration};

use anyhow::{Context, anyhow};
use marquee_core::{
    clicks::DEFAULT_CLICK_QUEUE,
    http::DEFAULT_TIMEOUT,
    posters::{DEFAULT_PLACEHOLDER, lookup::DEFAULT_OMDB_URL, repair::DEFAULT_MAX_CONCURRENCY},
    sampling::DEFAULT_SAMPLE_SIZE,
};

/// Which of the three services this process runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    Movies,
    Clicks,
    RandomMovies,
}

impl ServiceKind {
    pub fn name(self) -> &'static str {
        match self {
            ServiceKind::Movies => "movies",
            ServiceKind::Clicks => "clicks",
            ServiceKind::RandomMovies => "random-movies",
        }
    }

    pub fn default_port(self) -> u16 {
        match self {
            ServiceKind::Movies => 3000,
            ServiceKind::Clicks => 5000,
            ServiceKind::RandomMovies => 4000,
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Service configuration loaded from environment variables (and `.env`).
///
/// Every service reads the same struct; each only looks at the fields it
/// needs.
#[derive(Debug, Clone)]
pub struct Config {
    pub service: ServiceKind,
    pub env_file_loaded: bool,

    // Server settings
    pub server_host: String,
    pub server_port: u16,

    // movies
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub movies_seed_path: PathBuf,

    // clicks
    pub redis_url: String,
    pub click_queue: String,

    // random-movies
    pub movies_api_url: String,
    pub omdb_api_url: String,
    pub omdb_api_key: String,
    pub poster_placeholder: String,
    pub lookup_retries: u32,
    pub repair_concurrency: usize,
    pub sample_size: usize,
    pub http_timeout: Duration,
}

impl Config {
    pub fn from_env(service: ServiceKind) -> anyhow::Result<Self> {
        let env_file_loaded = dotenvy::dotenv().is_ok();

        Ok(Self {
            service,
            env_file_loaded,

            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: parse_var("SERVER_PORT", service.default_port())?,

            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            database_max_connections: parse_var("DATABASE_MAX_CONNECTIONS", 5)?,
            movies_seed_path: env::var("MOVIES_SEED_PATH")
                .unwrap_or_else(|_| "movies.json".to_string())
                .into(),

            redis_url: env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string()),
            click_queue: env::var("CLICK_QUEUE").unwrap_or_else(|_| DEFAULT_CLICK_QUEUE.to_string()),

            movies_api_url: env::var("MOVIES_API_URL")
                .unwrap_or_else(|_| "http://movies:3000/movies".to_string()),
            omdb_api_url: env::var("OMDB_API_URL").unwrap_or_else(|_| DEFAULT_OMDB_URL.to_string()),
            omdb_api_key: env::var("OMDB_API_KEY").unwrap_or_default(),
            poster_placeholder: env::var("POSTER_PLACEHOLDER")
                .unwrap_or_else(|_| DEFAULT_PLACEHOLDER.to_string()),
            lookup_retries: parse_var("LOOKUP_RETRIES", 3)?,
            repair_concurrency: parse_var("REPAIR_CONCURRENCY", DEFAULT_MAX_CONCURRENCY)?,
            sample_size: parse_var("SAMPLE_SIZE", DEFAULT_SAMPLE_SIZE)?,
            http_timeout: Duration::from_secs(parse_var(
                "HTTP_TIMEOUT_SECS",
                DEFAULT_TIMEOUT.as_secs(),
            )?),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server_port == 0 {
            return Err(anyhow!("SERVER_PORT must be non-zero"));
        }
        if self.service == ServiceKind::RandomMovies && self.repair_concurrency == 0 {
            return Err(anyhow!("REPAIR_CONCURRENCY must be at least 1"));
        }
        if self.service == ServiceKind::RandomMovies && self.poster_placeholder.trim().is_empty() {
            return Err(anyhow!("POSTER_PLACEHOLDER must not be blank"));
        }
        Ok(())
    }
}

fn parse_var<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {key}: {raw:?}")),
        _ => Ok(default),
    }
}
