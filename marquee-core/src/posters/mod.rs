//! Poster validation and repair.
//!
//! [`probe`] answers "does this URL serve an image", [`lookup`] finds a
//! candidate poster for a title, and [`repair`] combines the two into the
//! per-record and per-batch repair pass.

pub mod lookup;
pub mod probe;
pub mod repair;

pub use lookup::{OmdbPosterLookup, OmdbSettings, PosterLookup, normalize_title};
pub use probe::{HttpPosterProbe, PosterProbe};
pub use repair::{DEFAULT_PLACEHOLDER, PosterRepairSettings, PosterRepairer, RepairOutcome};
