pub mod clicks;
pub mod health;
pub mod movies;
pub mod random;
