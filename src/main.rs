mod config;
mod fetcher;
mod inject;
mod page;
mod record;
mod render;

use crate::config::AppConfig;
use crate::fetcher::HttpPriceFetcher;
use crate::inject::{FetchMode, inject_prices};
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tracing_subscriber::EnvFilter;

/// Fill the price slots of an HTML page with the current plan prices.
#[derive(Debug, Parser)]
#[command(name = "price-slots", version, about)]
struct Cli {
    /// HTML page to fill in.
    input: PathBuf,
    /// Where to write the result; stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Price endpoint, overriding PRICE_ENDPOINT.
    #[arg(long)]
    endpoint: Option<String>,
    /// Fetch prices separately for every slot.
    #[arg(long)]
    per_slot: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let mut config = AppConfig::from_env()?;
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }
    if cli.per_slot {
        config.fetch_mode = FetchMode::PerSlot;
    }

    let html = tokio::fs::read_to_string(&cli.input)
        .await
        .with_context(|| format!("reading page {:?}", cli.input))?;
    let fetcher = HttpPriceFetcher::new(&config.endpoint)?;
    tracing::info!(
        endpoint = %fetcher.endpoint(),
        slots = config.bindings.len(),
        "filling price slots"
    );
    let rendered = inject_prices(&html, &config.bindings, &fetcher, config.fetch_mode).await;

    match &cli.output {
        Some(path) => tokio::fs::write(path, rendered)
            .await
            .with_context(|| format!("writing page {path:?}"))?,
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(rendered.as_bytes()).await?;
            stdout.flush().await?;
        }
    }
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}
