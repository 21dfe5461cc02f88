//! Datastore Port
//!
//! Trait abstraction over the hosted table store holding wallet and token
//! metadata rows, plus the row/payload types crossing that boundary.
//!
//! Write operations report plain success/failure; read operations report the
//! row or absent. Backend errors are logged by the implementation and never
//! surfaced to the caller.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted wallet row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletRow {
    pub wallet_address: String,
    pub label: String,
    pub score: f64,
    pub is_bot: bool,
    #[serde(default)]
    pub first_seen: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_active: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Insert payload for a newly discovered wallet.
///
/// Timestamps left as `None` are stamped with the current UTC time by the
/// store before the write.
#[derive(Debug, Clone, Serialize)]
pub struct NewWallet {
    pub wallet_address: String,
    pub label: String,
    pub score: f64,
    pub is_bot: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_seen: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_active: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Update payload for a wallet observed again.
///
/// Only score, last-active and label are overwritten; `updated_at` is always
/// stamped by the store.
#[derive(Debug, Clone, Serialize)]
pub struct WalletPatch {
    pub label: String,
    pub score: f64,
    pub last_active: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Upsert payload for the token metadata table, keyed on the mint column.
#[derive(Debug, Clone, Serialize)]
pub struct TokenMetadataUpsert {
    pub token_mint: String,
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub decimals: Option<u8>,
    pub image_url: Option<String>,
    pub last_price_usd: Option<f64>,
    pub last_price_updated: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Wallet/token datastore port trait.
#[async_trait]
pub trait WalletStore: Send + Sync {
    /// Point lookup by wallet address. Absent on zero matches or any backend
    /// error.
    async fn get_wallet(&self, address: &str) -> Option<WalletRow>;

    /// Insert a new wallet row. False on any backend error.
    async fn insert_wallet(&self, wallet: NewWallet) -> bool;

    /// Apply a patch to the wallet row keyed by address. False when the row
    /// does not exist or on any backend error.
    async fn update_wallet(&self, address: &str, patch: WalletPatch) -> bool;

    /// Insert-or-replace a token metadata row keyed on the mint column.
    async fn upsert_token_metadata(&self, row: TokenMetadataUpsert) -> bool;
}
