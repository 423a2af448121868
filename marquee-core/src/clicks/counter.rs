//! Process-wide click totals.

use dashmap::DashMap;

/// Per-movie click totals for the lifetime of the process.
///
/// Counts start at zero on first increment. Concurrent increments for the
/// same id are serialized by the map's shard lock, so none are lost.
#[derive(Debug, Default)]
pub struct ClickCounter {
    counts: DashMap<String, u64>,
}

impl ClickCounter {
    /// An empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one click and return the new total.
    pub fn increment(&self, movie_id: &str) -> u64 {
        let mut entry = self.counts.entry(movie_id.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }

    /// Current total for `movie_id`; zero if it was never clicked.
    pub fn get(&self, movie_id: &str) -> u64 {
        self.counts.get(movie_id).map(|count| *count).unwrap_or(0)
    }

    /// Forget every count.
    pub fn reset(&self) {
        self.counts.clear();
    }

    /// Number of distinct movies clicked so far.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no movie has been clicked since creation or the last reset.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
