//! wheel-publish - CI post-build hook that uploads wheels to anaconda.org

pub mod cli;
pub mod core;
pub mod execution;
pub mod upload;

// Re-export commonly used types
pub use crate::core::{Channel, CiEnvironment, Decision, EventType, PublisherConfig, SkipReason};
pub use execution::{Publisher, PublishError, PublishEvent, PublishOutcome};
pub use upload::{AnacondaClient, UploadClient, UploadError, UploadRequest};
