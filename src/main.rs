use wheel_publish::cli::commands::{PlanCommand, PublishCommand};
use wheel_publish::cli::output::*;
use wheel_publish::cli::{Cli, Command};
use wheel_publish::core::{environment::process_lookup, CiEnvironment, Decision, PublisherConfig};
use wheel_publish::execution::{index_line, PublishOutcome, Publisher};
use wheel_publish::upload::AnacondaClient;

use anyhow::{Context, Result};
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging; stdout is reserved for the index line
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    let config = load_config(cli.config.as_deref())?;

    match &cli.command {
        Command::Publish(cmd) => publish(cmd, config).await?,
        Command::Plan(cmd) => plan(cmd, &config)?,
    }

    Ok(())
}

fn load_config(path: Option<&str>) -> Result<PublisherConfig> {
    match path {
        Some(path) => PublisherConfig::from_file(path)
            .with_context(|| format!("Failed to load publisher config from {}", path)),
        None => Ok(PublisherConfig::default()),
    }
}

async fn publish(cmd: &PublishCommand, mut config: PublisherConfig) -> Result<()> {
    cmd.apply(&mut config);
    config.validate().context("Invalid publisher config")?;

    let env = CiEnvironment::from_process(&config);
    let client = AnacondaClient::new(
        config.upload_command.clone(),
        config.install_command.clone(),
    )
    .context("Invalid upload client config")?;

    let mut publisher = Publisher::new(config, client).with_dry_run(cmd.dry_run);
    publisher.add_event_handler(|event| {
        eprintln!("{}", format_publish_event(&event));
    });

    match publisher.publish(&env, process_lookup).await {
        Ok(PublishOutcome::Published { index_url, .. }) => {
            println!("{}", index_line(&index_url));
        }
        Ok(PublishOutcome::DryRun { command, .. }) => {
            eprintln!("{} Dry run: {}", INFO, style(command.join(" ")).dim());
        }
        Ok(PublishOutcome::Skipped(_)) => {}
        Err(e) => {
            eprintln!("{}", format_failure(&e));
            error!("{}", e);
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}

fn plan(cmd: &PlanCommand, config: &PublisherConfig) -> Result<()> {
    let env = CiEnvironment::from_process(config);
    let decision = Decision::from_environment(&env);

    if cmd.json {
        let json = decision_json(&decision, &env, config);
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        println!("{}", format_decision(&decision, &env, config));
    }

    Ok(())
}
