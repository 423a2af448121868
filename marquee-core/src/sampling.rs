//! Random sampling of catalog records for display.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::movie::MovieRecord;

/// Genres shown by the per-genre sampling endpoint, in response order.
pub const FEATURED_GENRES: [&str; 5] = ["Horror", "Adventure", "Action", "Drama", "Comedy"];

/// Records returned per sample unless configured otherwise.
pub const DEFAULT_SAMPLE_SIZE: usize = 10;

/// Pick up to `count` records uniformly at random without replacement.
pub fn sample<R>(records: &[MovieRecord], count: usize, rng: &mut R) -> Vec<MovieRecord>
where
    R: Rng + ?Sized,
{
    records.choose_multiple(rng, count).cloned().collect()
}

/// Pick up to `count` records whose genres contain `genre` (exact,
/// case-sensitive). Fewer matches than requested yields every match.
pub fn sample_by_genre<R>(
    records: &[MovieRecord],
    genre: &str,
    count: usize,
    rng: &mut R,
) -> Vec<MovieRecord>
where
    R: Rng + ?Sized,
{
    let matching: Vec<&MovieRecord> = records.iter().filter(|record| record.has_genre(genre)).collect();
    matching
        .choose_multiple(rng, count)
        .map(|record| (*record).clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn catalog() -> Vec<MovieRecord> {
        (0..20)
            .map(|i| {
                let genre = if i % 4 == 0 { "Horror" } else { "Drama" };
                MovieRecord::with_title(format!("movie-{i}")).with_genres([genre])
            })
            .collect()
    }

    #[test]
    fn fewer_matches_than_requested_returns_all_matches() {
        let mut rng = StdRng::seed_from_u64(7);
        let picked = sample_by_genre(&catalog(), "Horror", 10, &mut rng);

        assert_eq!(picked.len(), 5);
        assert!(picked.iter().all(|record| record.has_genre("Horror")));
    }

    #[test]
    fn sample_never_repeats_records() {
        let mut rng = StdRng::seed_from_u64(11);
        let picked = sample_by_genre(&catalog(), "Drama", 10, &mut rng);

        assert_eq!(picked.len(), 10);
        let titles: HashSet<_> = picked.iter().filter_map(|record| record.title()).collect();
        assert_eq!(titles.len(), 10);
        assert!(picked.iter().all(|record| record.has_genre("Drama")));
    }

    #[test]
    fn genre_filter_is_case_sensitive() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(sample_by_genre(&catalog(), "horror", 10, &mut rng).is_empty());
    }

    #[test]
    fn seeded_sampling_is_reproducible() {
        let records = catalog();
        let first = sample(&records, 6, &mut StdRng::seed_from_u64(42));
        let second = sample(&records, 6, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn unfiltered_sample_is_capped_by_collection_size() {
        let records = catalog();
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(sample(&records, 50, &mut rng).len(), 20);
        assert_eq!(sample(&records, 0, &mut rng).len(), 0);
    }
}
