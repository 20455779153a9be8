//! CLI output formatting

use crate::{
    core::{
        config::PublisherConfig,
        destination::Decision,
        environment::CiEnvironment,
    },
    execution::{PublishError, PublishEvent},
};
use console::Emoji;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static SPINNER: Emoji<'_, '_> = Emoji("⏳ ", "~ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");

/// Format a publish event for display
pub fn format_publish_event(event: &PublishEvent) -> String {
    match event {
        PublishEvent::Skipped { reason } => {
            format!("{} Skipping upload: {}", INFO, style(reason).dim())
        }
        PublishEvent::ChannelSelected { channel, org } => format!(
            "{} Publishing to {} channel {}",
            ROCKET,
            style(channel).bold(),
            style(org).cyan()
        ),
        PublishEvent::ArtifactsFound { count } => {
            format!("{} Found {} artifact(s)", INFO, style(count).cyan())
        }
        PublishEvent::ClientReady => format!("{} Upload client ready", CHECK),
        PublishEvent::UploadStarted { org, count } => format!(
            "{} Uploading {} file(s) to {}",
            SPINNER,
            style(count).cyan(),
            style(org).bold()
        ),
        PublishEvent::Published { org, .. } => {
            format!("{} Uploaded to {}", CHECK, style(org).green())
        }
    }
}

/// Status line for a failed run
pub fn format_failure(error: &PublishError) -> String {
    format!("{} {}: {}", CROSS, style("publish failed").red(), error)
}

/// Format a decision for the plan command
pub fn format_decision(decision: &Decision, env: &CiEnvironment, config: &PublisherConfig) -> String {
    let header = format!(
        "{} build_wheel={} event={}",
        INFO,
        style(env.build_wheel).cyan(),
        style(&env.event_type).cyan()
    );

    match decision {
        Decision::Skip(reason) => format!("{}\n  Skip: {}", header, style(reason).dim()),
        Decision::Publish(channel) => {
            let channel_config = channel.config(config);
            format!(
                "{}\n  Publish: {} channel\n  Org: {}\n  Token from: ${}\n  Index: {}",
                header,
                style(channel).bold(),
                style(&channel_config.org).cyan(),
                channel_config.token_env,
                config.index_url(&channel_config.org)
            )
        }
    }
}

/// Plan as JSON
pub fn decision_json(decision: &Decision, env: &CiEnvironment, config: &PublisherConfig) -> serde_json::Value {
    let mut value = serde_json::json!({
        "environment": env,
        "decision": decision,
    });

    if let Some(channel) = decision.channel() {
        let channel_config = channel.config(config);
        value["org"] = serde_json::json!(channel_config.org);
        value["token_env"] = serde_json::json!(channel_config.token_env);
        value["index_url"] = serde_json::json!(config.index_url(&channel_config.org));
    }

    value
}
