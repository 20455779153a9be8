//! Publish decision: skip, or which channel to upload to

use crate::core::config::{ChannelConfig, PublisherConfig};
use crate::core::environment::{CiEnvironment, EventType};
use serde::Serialize;
use std::fmt;

/// Upload channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Scheduled builds
    Nightly,
    /// Every other publishing build
    Staging,
}

impl Channel {
    /// Channel configuration for this channel
    pub fn config<'a>(&self, config: &'a PublisherConfig) -> &'a ChannelConfig {
        match self {
            Channel::Nightly => &config.nightly,
            Channel::Staging => &config.staging,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Nightly => write!(f, "nightly"),
            Channel::Staging => write!(f, "staging"),
        }
    }
}

/// Why a run does not publish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The job did not build wheels
    WheelsNotBuilt,
    /// Pull-request builds never publish
    PullRequest,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::WheelsNotBuilt => write!(f, "wheels were not built"),
            SkipReason::PullRequest => write!(f, "pull request build"),
        }
    }
}

/// Outcome of inspecting the environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "detail", rename_all = "lowercase")]
pub enum Decision {
    Skip(SkipReason),
    Publish(Channel),
}

impl Decision {
    /// Decide from an environment snapshot. Performs no I/O.
    pub fn from_environment(env: &CiEnvironment) -> Self {
        if !env.build_wheel {
            return Decision::Skip(SkipReason::WheelsNotBuilt);
        }

        match env.event_type {
            EventType::PullRequest => Decision::Skip(SkipReason::PullRequest),
            EventType::Cron => Decision::Publish(Channel::Nightly),
            _ => Decision::Publish(Channel::Staging),
        }
    }

    /// The selected channel, if publishing
    pub fn channel(&self) -> Option<Channel> {
        match self {
            Decision::Publish(channel) => Some(*channel),
            Decision::Skip(_) => None,
        }
    }
}
