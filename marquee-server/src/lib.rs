//! HTTP front for the Marquee movie services.
//!
//! One binary, three services: the catalog (`movies`), click tracking
//! (`clicks`) and random sampling with poster repair (`random-movies`).

pub mod handlers;
pub mod infra;
pub mod routes;

pub use infra::app_state::{ClicksState, MoviesState, RandomMoviesState};
pub use infra::config::{Config, ServiceKind};
pub use infra::errors::{AppError, AppResult};
pub use routes::{clicks_router, movies_router, random_movies_router};
