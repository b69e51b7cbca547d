mod cli;
mod commands;
mod config;
mod engine;
mod error;
mod prelude;
mod store;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Global};
use crate::config::Config;
use crate::store::DynamoDbStore;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.global);

    let config = Config::from_cli(&cli);
    let action = cli.action();
    tracing::debug!(?action, endpoint = %config.aws.target_display(), "Starting");

    let store = DynamoDbStore::connect(&config.aws).await;
    commands::run(&store, action, &config, &cli.global).await?;

    Ok(())
}

/// Logs go to stderr so that table listings on stdout stay clean.
fn init_tracing(global: &Global) {
    let default_filter = if global.is_silent() {
        "dynamoman=warn"
    } else if global.is_verbose() {
        "dynamoman=debug"
    } else {
        "dynamoman=info"
    };

    let registry = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()));

    if global.log_json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
