//! plushy-relay - logo to plush render relay
//!
//! Loads configuration, sets up logging and serves the relay endpoint.

#![allow(missing_docs)]

use anyhow::Context;
use clap::Parser;
use plushy_relay::config::Config;
use plushy_relay::server::builder::run_server;
use plushy_relay::utils::logging::{init_logging, redact_secret};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "plushy-relay", version, about)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, env = "RELAY_CONFIG", default_value = "config/relay.yaml")]
    config: PathBuf,

    /// Override the bind host
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Print the effective configuration as YAML and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Display with causes, not Debug
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    let mut config = Config::load(&cli.config)
        .await
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;

    if let Some(host) = cli.host {
        config.relay.server.host = host;
    }
    if let Some(port) = cli.port {
        config.relay.server.port = port;
    }
    if let Some(level) = cli.log_level {
        config.relay.logging.level = level;
    }

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    init_logging(config.logging())?;

    info!(
        version = plushy_relay::VERSION,
        api_base = %config.provider().api_base,
        api_key = %redact_secret(&config.provider().api_key),
        model = %config.provider().model,
        "Starting plushy-relay"
    );

    run_server(config).await.context("relay server failed")?;
    Ok(())
}
