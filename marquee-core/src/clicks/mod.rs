//! Click counting and click-event publishing.

pub mod counter;
pub mod publisher;
pub mod tracker;

pub use counter::ClickCounter;
pub use publisher::{ClickEvent, ClickPublisher, DEFAULT_CLICK_QUEUE, RedisClickPublisher};
pub use tracker::ClickTracker;
