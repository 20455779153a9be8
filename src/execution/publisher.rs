//! Publisher - runs the decide, resolve, upload sequence

use crate::{
    core::{
        artifacts::ArtifactPattern,
        config::PublisherConfig,
        destination::{Channel, Decision, SkipReason},
        environment::CiEnvironment,
    },
    upload::{UploadClient, UploadError, UploadRequest},
};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Error types for a publish run
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("no upload token for {channel} channel: environment variable {var} is unset or empty")]
    MissingCredential { channel: Channel, var: String },

    #[error("no artifacts match '{pattern}'")]
    NoArtifacts { pattern: String },

    #[error("invalid artifact pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("failed to read artifacts for '{pattern}': {source}")]
    Io {
        pattern: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Upload(#[from] UploadError),
}

impl PublishError {
    /// Process exit code for this failure
    ///
    /// External tool failures pass their own exit code through.
    pub fn exit_code(&self) -> i32 {
        match self {
            PublishError::Upload(e) => e.exit_code().filter(|c| *c != 0).unwrap_or(1),
            _ => 1,
        }
    }
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// Preconditions not met; nothing was done
    Skipped(SkipReason),

    /// Files were uploaded
    Published {
        channel: Channel,
        org: String,
        files: Vec<PathBuf>,
        index_url: String,
    },

    /// Dry run: everything was resolved but the upload was not run
    DryRun {
        channel: Channel,
        org: String,
        files: Vec<PathBuf>,
        command: Vec<String>,
    },
}

/// Events that can occur during a publish run
#[derive(Debug, Clone)]
pub enum PublishEvent {
    Skipped {
        reason: SkipReason,
    },
    ChannelSelected {
        channel: Channel,
        org: String,
    },
    ArtifactsFound {
        count: usize,
    },
    ClientReady,
    UploadStarted {
        org: String,
        count: usize,
    },
    Published {
        org: String,
        index_url: String,
    },
}

/// Type for event handlers
pub type EventHandler = Arc<dyn Fn(PublishEvent) + Send + Sync>;

/// Conditional artifact publisher
pub struct Publisher<C> {
    config: PublisherConfig,
    client: C,
    dry_run: bool,
    event_handlers: Vec<EventHandler>,
}

impl<C: UploadClient> Publisher<C> {
    pub fn new(config: PublisherConfig, client: C) -> Self {
        Self {
            config,
            client,
            dry_run: false,
            event_handlers: Vec::new(),
        }
    }

    /// Resolve everything but do not install or upload
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Add an event handler
    pub fn add_event_handler<F>(&mut self, handler: F)
    where
        F: Fn(PublishEvent) + Send + Sync + 'static,
    {
        self.event_handlers.push(Arc::new(handler));
    }

    fn emit_event(&self, event: PublishEvent) {
        for handler in &self.event_handlers {
            handler(event.clone());
        }
    }

    /// The upload client
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Run against an environment snapshot, reading secrets through `lookup`
    pub async fn publish<F>(
        &self,
        env: &CiEnvironment,
        lookup: F,
    ) -> Result<PublishOutcome, PublishError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let channel = match Decision::from_environment(env) {
            Decision::Skip(reason) => {
                info!(
                    "Not publishing: {} (build_wheel={}, event={})",
                    reason, env.build_wheel, env.event_type
                );
                self.emit_event(PublishEvent::Skipped { reason });
                return Ok(PublishOutcome::Skipped(reason));
            }
            Decision::Publish(channel) => channel,
        };

        let channel_config = channel.config(&self.config);
        let org = channel_config.org.clone();
        info!("Publishing to {} channel ({}), event={}", channel, org, env.event_type);
        self.emit_event(PublishEvent::ChannelSelected {
            channel,
            org: org.clone(),
        });

        let token = lookup(channel_config.token_env.as_str())
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| PublishError::MissingCredential {
                channel,
                var: channel_config.token_env.clone(),
            })?;

        let files = self.collect_artifacts()?;
        self.emit_event(PublishEvent::ArtifactsFound { count: files.len() });

        let request = UploadRequest {
            org: org.clone(),
            token,
            files,
        };

        if self.dry_run {
            let mut command = self.config.upload_command.clone();
            command.extend(request.redacted_args());
            info!("Dry run, would run: {}", command.join(" "));
            return Ok(PublishOutcome::DryRun {
                channel,
                org,
                files: request.files,
                command,
            });
        }

        self.client.ensure_available().await?;
        self.emit_event(PublishEvent::ClientReady);

        self.emit_event(PublishEvent::UploadStarted {
            org: org.clone(),
            count: request.files.len(),
        });
        self.client.upload(&request).await?;

        let index_url = self.config.index_url(&org);
        info!("Uploaded {} file(s) to {}", request.files.len(), org);
        self.emit_event(PublishEvent::Published {
            org: org.clone(),
            index_url: index_url.clone(),
        });

        Ok(PublishOutcome::Published {
            channel,
            org,
            files: request.files,
            index_url,
        })
    }

    fn collect_artifacts(&self) -> Result<Vec<PathBuf>, PublishError> {
        let pattern_str = &self.config.artifacts;
        let pattern = ArtifactPattern::new(pattern_str).map_err(|e| PublishError::InvalidPattern {
            pattern: pattern_str.clone(),
            message: e.to_string(),
        })?;

        let files = pattern.expand().map_err(|source| PublishError::Io {
            pattern: pattern_str.clone(),
            source,
        })?;

        if files.is_empty() {
            return Err(PublishError::NoArtifacts {
                pattern: pattern_str.clone(),
            });
        }

        debug!("Matched {} artifact(s) for {}", files.len(), pattern.as_str());
        Ok(files)
    }
}

/// Line printed after a successful upload
pub fn index_line(index_url: &str) -> String {
    format!("Index: {}", index_url)
}
