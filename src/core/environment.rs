//! Snapshot of the CI environment

use crate::core::config::PublisherConfig;
use serde::Serialize;
use std::fmt;

/// How the CI run was triggered
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Push,
    PullRequest,
    Cron,
    Api,
    /// Any other trigger, including an unset variable (empty string)
    Other(String),
}

impl EventType {
    /// Parse an event type string as CI systems report it
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "push" => EventType::Push,
            "pull_request" => EventType::PullRequest,
            "cron" => EventType::Cron,
            "api" => EventType::Api,
            _ => EventType::Other(trimmed.to_string()),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventType::Push => write!(f, "push"),
            EventType::PullRequest => write!(f, "pull_request"),
            EventType::Cron => write!(f, "cron"),
            EventType::Api => write!(f, "api"),
            EventType::Other(s) if s.is_empty() => write!(f, "<unset>"),
            EventType::Other(s) => write!(f, "{}", s),
        }
    }
}

/// Parse a boolean-like flag. Unset or unrecognized values are false.
pub fn parse_flag(value: Option<&str>) -> bool {
    match value {
        Some(v) => matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes" | "on"
        ),
        None => false,
    }
}

/// Environment values read once at startup
///
/// Secrets are not captured here; they are resolved lazily through the
/// lookup only after a publish decision has been made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CiEnvironment {
    /// Whether this job produced wheels
    pub build_wheel: bool,

    /// How the run was triggered
    pub event_type: EventType,
}

impl CiEnvironment {
    /// Read the environment variables named in `config` through `lookup`
    pub fn from_lookup<F>(config: &PublisherConfig, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let build_wheel = parse_flag(lookup(config.build_wheel_env.as_str()).as_deref());
        let event_type = EventType::parse(
            lookup(config.event_type_env.as_str()).as_deref().unwrap_or_default(),
        );

        Self {
            build_wheel,
            event_type,
        }
    }

    /// Read from the process environment
    pub fn from_process(config: &PublisherConfig) -> Self {
        Self::from_lookup(config, process_lookup)
    }
}

/// Lookup backed by the process environment
pub fn process_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}
