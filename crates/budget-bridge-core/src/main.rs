//! Budget Bridge CLI
//!
//! Runs the budget alert handler against an event document.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use budget_bridge::alerting::WebhookDispatcher;
use budget_bridge::config::LoggingConfig;
use budget_bridge::handler::render;
use budget_bridge::models::SnsEvent;
use budget_bridge::{BudgetAlertHandler, Config};
use clap::{Parser, Subcommand};
use tracing::info;

/// Budget Bridge - forward budget alerts to Slack
#[derive(Parser)]
#[command(name = "budget-bridge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "BUDGET_BRIDGE_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process one event and deliver the alert
    Handle {
        /// Event document ("-" reads stdin)
        #[arg(long, default_value = "-")]
        event: String,
    },

    /// Render the alert for an event without sending it
    Preview {
        /// Event document ("-" reads stdin)
        #[arg(long, default_value = "-")]
        event: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config.logging, cli.verbose);

    let result = match cli.command {
        Commands::Handle { event } => run_handle(config, &event).await,
        Commands::Preview { event } => run_preview(&config, &event),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(logging: &LoggingConfig, verbose: bool) {
    let log_level = if verbose { "debug" } else { logging.level.as_str() };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if logging.format.eq_ignore_ascii_case("json") {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn read_event(source: &str) -> anyhow::Result<String> {
    if source == "-" {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("failed to read event from stdin")?;
        Ok(raw)
    } else {
        std::fs::read_to_string(source).with_context(|| format!("failed to read event {source}"))
    }
}

async fn run_handle(config: Config, source: &str) -> anyhow::Result<()> {
    let raw = read_event(source)?;

    let handler = BudgetAlertHandler::new(config, WebhookDispatcher::new()?);
    let response = handler.handle_json(&raw).await?;

    info!(status_code = response.status_code, "Invocation completed");
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}

fn run_preview(config: &Config, source: &str) -> anyhow::Result<()> {
    let raw = read_event(source)?;
    let event: SnsEvent = serde_json::from_str(&raw).context("invalid event document")?;

    let payload = render(&event, config.environment_name())?;
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}
