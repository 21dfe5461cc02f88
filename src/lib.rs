//! wallet-scout - First-Buyer Wallet Discovery Library
//!
//! Discovers the first buyers of a configured Solana token, scores each
//! wallet by its reported PnL and persists wallet and token records to
//! Supabase.
//!
//! # Modules
//!
//! - `domain`: Pure wallet scoring logic (WalletProfile)
//! - `ports`: Trait abstractions (MarketDataFeed, WalletStore) and mocks
//! - `adapters`: External implementations (Moralis, Solana Tracker, Supabase, CLI)
//! - `config`: Configuration loading and environment secrets
//! - `application`: The discovery pipeline

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
