//! wallet-scout - First-Buyer Wallet Discovery for Solana
//!
//! Discovers early buyers of a configured token, scores them by reported PnL
//! and persists wallet and token records to Supabase.

mod adapters;
mod application;
mod config;
mod domain;
mod ports;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use crate::adapters::cli::{
    CliApp, Command, DiscoverCmd, HoldersCmd, NewTokensCmd, PnlCmd, ProfitabilityCmd, TokenCmd,
};
use crate::adapters::moralis::{MoralisClient, MoralisConfig};
use crate::adapters::solana_tracker::{SolanaTrackerClient, TrackerConfig};
use crate::adapters::supabase::SupabaseStore;
use crate::application::DiscoveryPipeline;
use crate::config::{load_config, Config, Secrets};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (secrets go here, not in config.toml)
    dotenvy::dotenv().ok();

    let app = CliApp::parse();
    init_logging(app.verbose, app.debug)?;

    match app.command {
        Command::Discover(cmd) => discover_command(cmd).await,
        Command::NewTokens(cmd) => new_tokens_command(cmd).await,
        Command::Holders(cmd) => holders_command(cmd).await,
        Command::Profitability(cmd) => profitability_command(cmd).await,
        Command::Token(cmd) => token_command(cmd).await,
        Command::Pnl(cmd) => pnl_command(cmd).await,
    }
}

fn init_logging(verbose: bool, debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new("warn")
    };

    fmt().with_env_filter(filter).init();
    Ok(())
}

fn moralis_client(config: &Config, secrets: &Secrets) -> Result<MoralisClient> {
    MoralisClient::with_config(MoralisConfig {
        base_url: config.moralis.base_url.clone(),
        api_key: secrets.moralis_api_key.clone(),
        ..MoralisConfig::default()
    })
    .context("Failed to create Moralis client")
}

fn tracker_client(config: &Config, secrets: &Secrets) -> SolanaTrackerClient {
    SolanaTrackerClient::with_config(TrackerConfig {
        base_url: config.tracker.base_url.clone(),
        api_key: secrets.tracker_api_key.clone(),
    })
}

async fn discover_command(cmd: DiscoverCmd) -> Result<()> {
    tracing::info!("Starting wallet-scout discovery...");

    let config = load_config(&cmd.config).context("Failed to load configuration")?;
    let secrets = Secrets::from_env();

    let store = SupabaseStore::from_secrets(
        secrets.supabase_url.clone(),
        secrets.supabase_anon_key.clone(),
    );
    if !store.is_connected() {
        println!("Cannot proceed without Supabase credentials. Exiting.");
        return Ok(());
    }

    let tracker = tracker_client(&config, &secrets);
    let pipeline = DiscoveryPipeline::new(tracker, store, config.discovery.token_mint.clone());
    let summary = pipeline.run().await;

    println!(
        "Discovery finished for {}: {} wallets processed ({} inserted, {} updated, {} skipped), \
         {} metadata writes",
        config.discovery.token_mint,
        summary.processed,
        summary.inserted,
        summary.updated,
        summary.skipped,
        summary.metadata_writes
    );
    Ok(())
}

async fn new_tokens_command(cmd: NewTokensCmd) -> Result<()> {
    let config = load_config(&cmd.config).context("Failed to load configuration")?;
    let secrets = Secrets::from_env();
    let moralis = moralis_client(&config, &secrets)?;

    let limit = cmd.limit.unwrap_or(config.discovery.fetch_limit);
    match moralis.new_tokens(&cmd.exchange, limit).await {
        Some(tokens) => println!("{}", serde_json::to_string_pretty(&tokens)?),
        None => println!("No new tokens available for {}", cmd.exchange),
    }
    Ok(())
}

async fn holders_command(cmd: HoldersCmd) -> Result<()> {
    let config = load_config(&cmd.config).context("Failed to load configuration")?;
    let secrets = Secrets::from_env();
    let moralis = moralis_client(&config, &secrets)?;

    let limit = cmd.limit.unwrap_or(config.discovery.fetch_limit);
    match moralis.top_holders(&cmd.mint, limit).await {
        Some(holders) => println!("{}", serde_json::to_string_pretty(&holders)?),
        None => println!("No holder data available for {}", cmd.mint),
    }
    Ok(())
}

async fn profitability_command(cmd: ProfitabilityCmd) -> Result<()> {
    let config = load_config(&cmd.config).context("Failed to load configuration")?;
    let secrets = Secrets::from_env();
    let moralis = moralis_client(&config, &secrets)?;

    match moralis.wallet_profitability(&cmd.wallet).await {
        Some(metrics) => println!("{}", serde_json::to_string_pretty(&metrics)?),
        None => println!("No profitability data available for {}", cmd.wallet),
    }
    Ok(())
}

async fn token_command(cmd: TokenCmd) -> Result<()> {
    let config = load_config(&cmd.config).context("Failed to load configuration")?;
    let secrets = Secrets::from_env();
    let moralis = moralis_client(&config, &secrets)?;
    let tracker = tracker_client(&config, &secrets);

    match moralis.token_metadata(&cmd.mint).await {
        Some(meta) => println!("Moralis metadata:\n{}", serde_json::to_string_pretty(&meta)?),
        None => println!("Moralis metadata unavailable for {}", cmd.mint),
    }
    match moralis.token_price(&cmd.mint).await {
        Some(price) => println!("Moralis price:\n{}", serde_json::to_string_pretty(&price)?),
        None => println!("Moralis price unavailable for {}", cmd.mint),
    }
    match tracker.fetch_token_metadata(&cmd.mint).await {
        Some(meta) => println!(
            "Tracker metadata: {} ({}) decimals={} price_usd={}",
            meta.name.as_deref().unwrap_or("?"),
            meta.symbol.as_deref().unwrap_or("?"),
            meta.decimals.map(|d| d.to_string()).unwrap_or_else(|| "?".to_string()),
            meta.price_usd.map(|p| p.to_string()).unwrap_or_else(|| "?".to_string()),
        ),
        None => println!("Tracker metadata unavailable for {}", cmd.mint),
    }
    Ok(())
}

async fn pnl_command(cmd: PnlCmd) -> Result<()> {
    let config = load_config(&cmd.config).context("Failed to load configuration")?;
    let secrets = Secrets::from_env();
    let tracker = tracker_client(&config, &secrets);

    match tracker.fetch_wallet_pnl(&cmd.wallet, cmd.token.as_deref()).await {
        Some(pnl) => println!("{}", serde_json::to_string_pretty(&pnl)?),
        None => println!("No PnL data available for {}", cmd.wallet),
    }
    Ok(())
}
