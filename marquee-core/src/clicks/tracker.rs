//! Click registration: count, then publish.

use std::fmt;
use std::sync::Arc;

use tracing::warn;

use super::{ClickCounter, ClickEvent, ClickPublisher};

/// Counts clicks and forwards each new total to the publisher.
///
/// Publishing is best-effort: a failed publish is logged and the click still
/// counts.
#[derive(Clone)]
pub struct ClickTracker {
    counter: Arc<ClickCounter>,
    publisher: Arc<dyn ClickPublisher>,
}

impl fmt::Debug for ClickTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClickTracker")
            .field("tracked_movies", &self.counter.len())
            .finish_non_exhaustive()
    }
}

impl ClickTracker {
    /// Count into `counter` and publish through `publisher`.
    pub fn new(counter: Arc<ClickCounter>, publisher: Arc<dyn ClickPublisher>) -> Self {
        Self { counter, publisher }
    }

    /// Returns the event that was (or should have been) published.
    pub async fn register(&self, movie_id: &str) -> ClickEvent {
        let clicks = self.counter.increment(movie_id);
        let event = ClickEvent {
            movie_id: movie_id.to_string(),
            clicks,
        };

        if let Err(err) = self.publisher.publish(&event).await {
            warn!(movie_id, clicks, error = %err, "failed to publish click event");
        }
        event
    }

    /// Current total for `movie_id`.
    pub fn clicks(&self, movie_id: &str) -> u64 {
        self.counter.get(movie_id)
    }
}
