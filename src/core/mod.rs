//! Core domain models for publishing
//!
//! This module defines the configuration, the CI environment snapshot,
//! the publish decision, and artifact discovery.

pub mod artifacts;
pub mod config;
pub mod destination;
pub mod environment;

pub use artifacts::ArtifactPattern;
pub use config::{ChannelConfig, PublisherConfig};
pub use destination::{Channel, Decision, SkipReason};
pub use environment::{CiEnvironment, EventType};
