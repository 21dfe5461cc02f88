//! Ports Layer - Trait definitions for external dependencies
//!
//! This module defines the interfaces (ports) that adapters must implement.
//! Following hexagonal architecture, these traits abstract:
//! - Market data feeds (first buyers, token metadata)
//! - The wallet/token datastore (get, insert, update, upsert)

pub mod market_data;
pub mod mocks;
pub mod store;

pub use market_data::{FirstBuyer, MarketDataFeed, TokenMeta};
pub use store::{NewWallet, TokenMetadataUpsert, WalletPatch, WalletRow, WalletStore};
