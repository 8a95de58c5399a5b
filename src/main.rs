//! Depth Aggregator
//!
//! Fetches one order book snapshot from Binance, groups it by a decimal
//! bucket size and prints the aggregated bids and asks.

use clap::Parser;
use std::env;
use std::process::ExitCode;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use depth_aggregator::{presenter, Cli, Config, DepthClient, GroupSpec, GroupedBook};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::from(1)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::from_cli(cli)?;

    // Reject a bad group size before touching the network
    let spec = GroupSpec::parse(&config.group_size)?;
    info!(
        symbol = %config.symbol,
        limit = config.limit,
        group_size = %spec,
        precision = spec.precision(),
        "Configuration loaded"
    );

    let client = DepthClient::from_config(&config)?;
    let snapshot = client.fetch_snapshot(&config.symbol, config.limit).await?;

    let book = GroupedBook::from_snapshot(&snapshot, &spec)?;
    println!("{}", presenter::render(&book, &config)?);

    Ok(())
}

/// Logs go to stderr so stdout carries only the tables
fn init_tracing(verbose: bool) {
    let default_level = if verbose { Level::INFO } else { Level::WARN };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let registry = tracing_subscriber::registry().with(filter);
    if env::var("LOG_FORMAT").map(|f| f == "json").unwrap_or(false) {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}
