//! CLI command definitions

use clap::Args;
use crate::core::config::PublisherConfig;

/// Upload artifacts
#[derive(Debug, Args, Clone)]
pub struct PublishCommand {
    /// Glob of files to upload (overrides config)
    #[arg(short, long)]
    pub artifacts: Option<String>,

    /// Resolve everything but do not install or upload
    #[arg(long)]
    pub dry_run: bool,
}

impl PublishCommand {
    /// Apply command-line overrides on top of the loaded config
    pub fn apply(&self, config: &mut PublisherConfig) {
        if let Some(artifacts) = &self.artifacts {
            config.artifacts = artifacts.clone();
        }
    }
}

/// Show the publish decision
#[derive(Debug, Args, Clone)]
pub struct PlanCommand {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
