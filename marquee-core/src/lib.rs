//! Core library for the Marquee movie services.
//!
//! - [`movie`]: schema-less movie documents and poster classification
//! - [`posters`]: poster probing, metadata lookup and batch repair
//! - [`sampling`]: random selection, optionally by genre
//! - [`catalog`]: the document store behind the movies service, its seed
//!   loader and the HTTP source the sampler reads from
//! - [`clicks`]: click counting and event publishing

pub mod catalog;
pub mod clicks;
pub mod error;
pub mod http;
pub mod movie;
pub mod posters;
pub mod sampling;

pub use error::{CatalogError, Result};
pub use movie::{MovieRecord, PosterStatus};
