//! Paydesk - command line merchant dashboard
//!
//! This is the main entry point for the paydesk binary.

#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod cli;
mod commands;
mod config;
mod error;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;
use config::CliConfig;

#[tokio::main]
async fn main() {
    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,paydesk=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = CliConfig::from_env();
    cli.apply(&mut config);

    tracing::debug!(
        api_url = %config.api_url,
        data_dir = %config.data_dir.display(),
        token_configured = %config.token.is_some(),
        "Dashboard configuration loaded"
    );

    if let Err(e) = commands::run(cli.command, &config).await {
        tracing::error!(error = %e, "Command failed");
        eprintln!("error: {e}");
        std::process::exit(e.exit_code());
    }
}
