//! CLI Command Definitions
//!
//! Argument structs for all wallet-scout commands.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// wallet-scout - First-Buyer Wallet Discovery for Solana
#[derive(Parser, Debug)]
#[command(
    name = "wallet-scout",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = "First-buyer wallet discovery for Solana",
    long_about = "wallet-scout discovers the first buyers of a configured token, scores \
                  each wallet by its reported PnL and persists wallet and token records \
                  to Supabase."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the wallet discovery pipeline for the configured token
    Discover(DiscoverCmd),

    /// List newly listed tokens on an exchange
    NewTokens(NewTokensCmd),

    /// List the top holders of a token
    Holders(HoldersCmd),

    /// Show profitability metrics for a wallet
    Profitability(ProfitabilityCmd),

    /// Show metadata and price for a token
    Token(TokenCmd),

    /// Show profit and loss for a wallet
    Pnl(PnlCmd),
}

/// Run the discovery pipeline
#[derive(Parser, Debug)]
pub struct DiscoverCmd {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    pub config: PathBuf,
}

/// List new tokens by exchange
#[derive(Parser, Debug)]
pub struct NewTokensCmd {
    /// Exchange to list new tokens for (e.g., Raydium, Jupiter)
    #[arg(short, long, value_name = "NAME", default_value = "Raydium")]
    pub exchange: String,

    /// Number of tokens to fetch (defaults to the configured fetch limit)
    #[arg(short, long, value_name = "N")]
    pub limit: Option<u32>,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    pub config: PathBuf,
}

/// List top token holders
#[derive(Parser, Debug)]
pub struct HoldersCmd {
    /// Token mint address
    #[arg(value_name = "MINT")]
    pub mint: String,

    /// Number of holders to fetch (defaults to the configured fetch limit)
    #[arg(short, long, value_name = "N")]
    pub limit: Option<u32>,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    pub config: PathBuf,
}

/// Show wallet profitability
#[derive(Parser, Debug)]
pub struct ProfitabilityCmd {
    /// Wallet address
    #[arg(value_name = "WALLET")]
    pub wallet: String,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    pub config: PathBuf,
}

/// Show token metadata and price
#[derive(Parser, Debug)]
pub struct TokenCmd {
    /// Token mint address
    #[arg(value_name = "MINT")]
    pub mint: String,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    pub config: PathBuf,
}

/// Show wallet PnL
#[derive(Parser, Debug)]
pub struct PnlCmd {
    /// Wallet address
    #[arg(value_name = "WALLET")]
    pub wallet: String,

    /// Restrict PnL to a single token
    #[arg(short, long, value_name = "MINT")]
    pub token: Option<String>,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    pub config: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_defaults() {
        let app = CliApp::parse_from(["wallet-scout", "discover"]);
        match app.command {
            Command::Discover(cmd) => {
                assert_eq!(cmd.config, PathBuf::from("config.toml"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(!app.verbose);
        assert!(!app.debug);
    }

    #[test]
    fn test_new_tokens_defaults() {
        let app = CliApp::parse_from(["wallet-scout", "new-tokens"]);
        match app.command {
            Command::NewTokens(cmd) => {
                assert_eq!(cmd.exchange, "Raydium");
                assert!(cmd.limit.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_holders_explicit_limit() {
        let app = CliApp::parse_from(["wallet-scout", "holders", "MintA", "--limit", "25"]);
        match app.command {
            Command::Holders(cmd) => {
                assert_eq!(cmd.mint, "MintA");
                assert_eq!(cmd.limit, Some(25));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_pnl_with_token_scope() {
        let app = CliApp::parse_from(["wallet-scout", "pnl", "W1", "--token", "MintA"]);
        match app.command {
            Command::Pnl(cmd) => {
                assert_eq!(cmd.wallet, "W1");
                assert_eq!(cmd.token.as_deref(), Some("MintA"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_verbose_flag() {
        let app = CliApp::parse_from(["wallet-scout", "discover", "--verbose"]);
        assert!(app.verbose);
    }
}
