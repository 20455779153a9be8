//! Command-line interface

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use commands::{PlanCommand, PublishCommand};
use std::ffi::OsString;

/// Upload CI-built wheels to anaconda.org
#[derive(Debug, Parser, Clone)]
#[command(name = "wheel-publish")]
#[command(author = "wheel-publish Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Upload CI-built wheels to the nightly or staging anaconda.org channel", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to publisher configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Upload artifacts if this build should publish
    Publish(PublishCommand),

    /// Show what a publish run would decide, without reading secrets
    Plan(PlanCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}
