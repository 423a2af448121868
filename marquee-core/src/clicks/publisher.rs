//! Click-event publishing onto a Redis-backed queue.

use std::fmt;

use async_trait::async_trait;
use redis::{AsyncCommands, aio::ConnectionManager};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;

/// Queue name used when none is configured.
pub const DEFAULT_CLICK_QUEUE: &str = "movie_clicks";

/// Message published after every registered click.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickEvent {
    /// Id of the clicked movie.
    #[serde(rename = "movieId")]
    pub movie_id: String,
    /// Running total including this click.
    pub clicks: u64,
}

/// Emits click events to downstream consumers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickPublisher: Send + Sync {
    /// Deliver one event. Errors are left to the caller to handle.
    async fn publish(&self, event: &ClickEvent) -> Result<()>;
}

/// Appends click events as JSON to a Redis list used as a work queue.
#[derive(Clone)]
pub struct RedisClickPublisher {
    conn: ConnectionManager,
    queue: String,
}

impl fmt::Debug for RedisClickPublisher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisClickPublisher")
            .field("connection", &"ConnectionManager")
            .field("queue", &self.queue)
            .finish()
    }
}

impl RedisClickPublisher {
    /// Connect to Redis and publish onto `queue`.
    pub async fn connect(redis_url: &str, queue: impl Into<String>) -> Result<Self> {
        let queue = queue.into();
        info!(queue = %queue, "connecting click publisher to Redis");

        let client = redis::Client::open(redis_url)?;
        let conn = ConnectionManager::new(client).await?;

        info!("click publisher connected");
        Ok(Self { conn, queue })
    }

    /// Name of the list events are pushed onto.
    pub fn queue(&self) -> &str {
        &self.queue
    }
}

#[async_trait]
impl ClickPublisher for RedisClickPublisher {
    async fn publish(&self, event: &ClickEvent) -> Result<()> {
        let payload = serde_json::to_string(event)?;
        let mut conn = self.conn.clone();
        conn.rpush::<_, _, ()>(&self.queue, payload).await?;
        debug!(queue = %self.queue, movie_id = %event.movie_id, "published click event");
        Ok(())
    }
}
