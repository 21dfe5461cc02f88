//! Market Data Port
//!
//! Trait abstraction over the provider that reports a token's first buyer
//! cohort and metadata, plus the record types crossing that boundary.

use async_trait::async_trait;
use serde::Deserialize;

/// One early-buyer observation as reported by the first-buyers endpoint.
///
/// PnL figures default to 0.0 when the provider omits them; timestamps are
/// epoch milliseconds and may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FirstBuyer {
    /// Public address of the buying wallet
    #[serde(default)]
    pub wallet: Option<String>,
    /// Realized profit and loss in USD
    #[serde(default)]
    pub realized: f64,
    /// Unrealized profit and loss in USD
    #[serde(default)]
    pub unrealized: f64,
    /// Total profit and loss in USD
    #[serde(default)]
    pub total: f64,
    /// Time of the first buy, epoch milliseconds
    #[serde(default)]
    pub first_buy_time: Option<i64>,
    /// Time of the most recent transaction, epoch milliseconds
    #[serde(default)]
    pub last_transaction_time: Option<i64>,
}

/// Token metadata snapshot as reported by the data provider.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenMeta {
    #[serde(default)]
    pub mint: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub decimals: Option<u8>,
    /// Token image URL
    #[serde(default)]
    pub image: Option<String>,
    /// Last known USD price
    #[serde(default, rename = "priceUsd")]
    pub price_usd: Option<f64>,
}

/// Market data feed port trait.
///
/// Implementations never surface errors to the caller: every failure mode
/// (missing credential, transport, unexpected shape) is logged and collapsed
/// to an absent result.
#[async_trait]
pub trait MarketDataFeed: Send + Sync {
    /// The first cohort of buyers for a token, in provider order.
    async fn first_buyers(&self, token_mint: &str) -> Option<Vec<FirstBuyer>>;

    /// The latest metadata snapshot for a token.
    async fn token_metadata(&self, token_mint: &str) -> Option<TokenMeta>;
}
