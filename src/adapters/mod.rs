//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits:
//! - Moralis: Solana gateway API client (provider A)
//! - Solana Tracker: data API client (provider B, MarketDataFeed)
//! - Supabase: hosted table store (WalletStore)
//! - CLI: command-line interface definitions

pub mod cli;
pub mod moralis;
pub mod solana_tracker;
pub mod supabase;

pub use cli::CliApp;
pub use moralis::MoralisClient;
pub use solana_tracker::SolanaTrackerClient;
pub use supabase::SupabaseStore;
