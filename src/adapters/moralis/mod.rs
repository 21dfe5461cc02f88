//! Moralis Adapter
//!
//! HTTP client for the Moralis Solana gateway (new token listings, holders,
//! wallet profitability, token metadata and price).

mod client;

pub use client::{MoralisClient, MoralisConfig, MoralisError};
