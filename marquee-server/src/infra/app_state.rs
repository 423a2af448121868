use std::{
    fmt,
    sync::{Arc, Mutex},
};

use rand::{SeedableRng, rngs::StdRng};

use marquee_core::{
    catalog::{MovieCatalog, MovieSource},
    clicks::ClickTracker,
    movie::MovieRecord,
    posters::PosterRepairer,
    sampling,
};

use super::errors::{AppError, AppResult};

#[derive(Clone)]
pub struct MoviesState {
    pub catalog: Arc<dyn MovieCatalog>,
}

impl fmt::Debug for MoviesState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MoviesState").finish_non_exhaustive()
    }
}

impl MoviesState {
    pub fn new(catalog: Arc<dyn MovieCatalog>) -> Self {
        Self { catalog }
    }
}

#[derive(Debug, Clone)]
pub struct ClicksState {
    pub tracker: ClickTracker,
}

impl ClicksState {
    pub fn new(tracker: ClickTracker) -> Self {
        Self { tracker }
    }
}

#[derive(Clone)]
pub struct RandomMoviesState {
    pub source: Arc<dyn MovieSource>,
    pub repairer: PosterRepairer,
    pub sample_size: usize,
    rng: Arc<Mutex<StdRng>>,
}

impl fmt::Debug for RandomMoviesState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomMoviesState")
            .field("repairer", &self.repairer)
            .field("sample_size", &self.sample_size)
            .finish_non_exhaustive()
    }
}

impl RandomMoviesState {
    pub fn new(source: Arc<dyn MovieSource>, repairer: PosterRepairer, sample_size: usize) -> Self {
        Self::with_rng(source, repairer, sample_size, StdRng::from_os_rng())
    }

    /// Use a caller-supplied generator, e.g. a seeded one for reproducible
    /// sampling.
    pub fn with_rng(
        source: Arc<dyn MovieSource>,
        repairer: PosterRepairer,
        sample_size: usize,
        rng: StdRng,
    ) -> Self {
        Self {
            source,
            repairer,
            sample_size,
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    /// Run `f` with exclusive access to the sampling generator.
    pub fn with_sampler<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> AppResult<T> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| AppError::internal("sampling generator lock poisoned"))?;
        Ok(f(&mut rng))
    }

    pub fn sample(&self, records: &[MovieRecord]) -> AppResult<Vec<MovieRecord>> {
        self.with_sampler(|rng| sampling::sample(records, self.sample_size, rng))
    }

    pub fn sample_by_genre(&self, records: &[MovieRecord], genre: &str) -> AppResult<Vec<MovieRecord>> {
        self.with_sampler(|rng| sampling::sample_by_genre(records, genre, self.sample_size, rng))
    }
}
