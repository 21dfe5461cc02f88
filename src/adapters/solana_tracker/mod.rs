//! Solana Tracker Adapter
//!
//! Implementation of the MarketDataFeed port for the Solana Tracker data API
//! (first-buyer cohorts, wallet PnL, token metadata).

mod client;

pub use client::{SolanaTrackerClient, TrackerConfig, TrackerError};
