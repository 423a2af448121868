//! Per-record and per-batch poster repair.
//!
//! A record's poster is kept when it still resolves, replaced with a freshly
//! looked-up URL when that one resolves, and set to the placeholder token
//! otherwise. No failure of a single record ever leaves this module: the
//! batch always comes back complete and in input order.

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use super::{PosterLookup, PosterProbe};
use crate::movie::{MovieRecord, PosterStatus};

/// Fallback poster value.
pub const DEFAULT_PLACEHOLDER: &str = "404.jpeg";
/// Records repaired at once by default.
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

/// Tunables for [`PosterRepairer`].
#[derive(Debug, Clone)]
pub struct PosterRepairSettings {
    /// Value written to `poster` when nothing better can be found.
    pub placeholder: String,
    /// Maximum number of records being repaired at the same time.
    pub max_concurrency: usize,
}

impl Default for PosterRepairSettings {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

/// What a repair pass did to one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairOutcome {
    /// The existing poster was kept.
    Unchanged,
    /// A looked-up poster was written.
    Replaced,
    /// Nothing usable was found; the placeholder was written.
    Placeholder,
}

/// Validates and repairs record posters using a probe and a lookup.
#[derive(Clone)]
pub struct PosterRepairer {
    probe: Arc<dyn PosterProbe>,
    lookup: Arc<dyn PosterLookup>,
    placeholder: String,
    permits: Arc<Semaphore>,
}

impl std::fmt::Debug for PosterRepairer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PosterRepairer")
            .field("placeholder", &self.placeholder)
            .field("permits_available", &self.permits.available_permits())
            .finish_non_exhaustive()
    }
}

impl PosterRepairer {
    /// A blank placeholder in `settings` is replaced by [`DEFAULT_PLACEHOLDER`].
    pub fn new(
        probe: Arc<dyn PosterProbe>,
        lookup: Arc<dyn PosterLookup>,
        settings: PosterRepairSettings,
    ) -> Self {
        let placeholder = if settings.placeholder.trim().is_empty() {
            warn!(default = DEFAULT_PLACEHOLDER, "blank poster placeholder configured; using default");
            DEFAULT_PLACEHOLDER.to_string()
        } else {
            settings.placeholder
        };

        Self {
            probe,
            lookup,
            placeholder,
            permits: Arc::new(Semaphore::new(settings.max_concurrency.max(1))),
        }
    }

    /// Value written when no poster can be found.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Classify the current poster. The placeholder counts as valid so that
    /// repeated passes settle instead of retrying the lookup forever.
    pub async fn classify(&self, record: &MovieRecord) -> PosterStatus {
        match record.poster() {
            None => PosterStatus::Missing,
            Some(poster) if poster == self.placeholder => PosterStatus::Valid,
            Some(poster) if self.probe.is_reachable(poster).await => PosterStatus::Valid,
            Some(_) => PosterStatus::Invalid,
        }
    }

    /// Repair one record; see [`repair_with_outcome`](Self::repair_with_outcome).
    pub async fn repair(&self, record: MovieRecord) -> MovieRecord {
        self.repair_with_outcome(record).await.0
    }

    /// Repair one record and report what happened. Never fails: every
    /// problem ends in the placeholder.
    pub async fn repair_with_outcome(&self, mut record: MovieRecord) -> (MovieRecord, RepairOutcome) {
        let status = self.classify(&record).await;
        if !status.needs_repair() {
            return (record, RepairOutcome::Unchanged);
        }

        debug!(
            title = record.title().unwrap_or("<untitled>"),
            ?status,
            "poster needs repair"
        );

        match self.find_replacement(&record).await {
            Some(poster) => {
                record.set_poster(poster);
                (record, RepairOutcome::Replaced)
            }
            None => {
                record.set_poster(self.placeholder.clone());
                (record, RepairOutcome::Placeholder)
            }
        }
    }

    async fn find_replacement(&self, record: &MovieRecord) -> Option<String> {
        let Some(title) = record.title() else {
            warn!(id = record.id().unwrap_or("<unknown>"), "record has no title; using placeholder");
            return None;
        };

        let candidate = match self.lookup.lookup(title).await {
            Ok(candidate) => candidate,
            Err(err) => {
                warn!(title, error = %err, "poster lookup failed; using placeholder");
                return None;
            }
        };

        if self.probe.is_reachable(&candidate).await {
            Some(candidate)
        } else {
            warn!(title, poster = %candidate, "looked-up poster is unreachable; using placeholder");
            None
        }
    }

    /// Repair every record concurrently (bounded by the configured permits)
    /// and return them in their original order.
    pub async fn repair_batch(&self, records: Vec<MovieRecord>) -> Vec<MovieRecord> {
        let total = records.len();
        let results = join_all(records.into_iter().map(|record| async move {
            // The semaphore is never closed, so acquisition only fails if that changes.
            let _permit = self.permits.acquire().await.ok();
            self.repair_with_outcome(record).await
        }))
        .await;

        let mut replaced = 0usize;
        let mut placeholders = 0usize;
        let repaired = results
            .into_iter()
            .map(|(record, outcome)| {
                match outcome {
                    RepairOutcome::Replaced => replaced += 1,
                    RepairOutcome::Placeholder => placeholders += 1,
                    RepairOutcome::Unchanged => {}
                }
                record
            })
            .collect();

        info!(total, replaced, placeholders, "poster repair pass complete");
        repaired
    }
}
