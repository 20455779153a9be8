//! Publish execution

pub mod publisher;

pub use publisher::{index_line, Publisher, PublishError, PublishEvent, PublishOutcome};
