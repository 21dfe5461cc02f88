//! Supabase Table Store
//!
//! REST client for the two hosted tables (wallets, token_metadata). The store
//! is constructed explicitly from credentials and injected into the pipeline;
//! when either credential is missing it comes up *disconnected* and every
//! operation logs a warning and returns its failure value without a network
//! call.
//!
//! Writes report plain success/failure: the backend must echo written rows
//! (`Prefer: return=representation`) for a write to count. Backend errors and
//! transport errors both collapse to the failure value after logging.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::ports::store::{NewWallet, TokenMetadataUpsert, WalletPatch, WalletRow, WalletStore};

const WALLETS_TABLE: &str = "wallets";
const TOKEN_METADATA_TABLE: &str = "token_metadata";

/// Datastore errors. Internal only; the port surface collapses every variant
/// to `None`/`false` after logging it.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Backend error {status}: {body}")]
    Backend { status: StatusCode, body: String },
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

/// Supabase project credentials
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://xyzcompany.supabase.co`
    pub url: String,
    /// Anon key, sent as both `apikey` and bearer token
    pub anon_key: String,
}

/// Wallet/token datastore backed by Supabase.
#[derive(Debug, Clone)]
pub struct SupabaseStore {
    conn: Option<Connection>,
}

impl SupabaseStore {
    /// Build a store from optional credentials. Missing credentials yield a
    /// disconnected store whose operations all fail soft.
    pub fn from_secrets(url: Option<String>, anon_key: Option<String>) -> Self {
        match (url, anon_key) {
            (Some(url), Some(anon_key)) => {
                tracing::info!("Supabase client initialized");
                Self::connected(SupabaseConfig { url, anon_key })
            }
            _ => {
                tracing::error!(
                    "Supabase URL or anon key not found; set SUPABASE_URL and \
                     SUPABASE_ANON_KEY in your environment or .env file"
                );
                Self::disconnected()
            }
        }
    }

    /// Build a store with known-good credentials.
    pub fn connected(config: SupabaseConfig) -> Self {
        Self {
            conn: Some(Connection::new(config)),
        }
    }

    /// Build a store with no backend; every operation fails soft.
    pub fn disconnected() -> Self {
        Self { conn: None }
    }

    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    fn conn(&self, operation: &str) -> Option<&Connection> {
        if self.conn.is_none() {
            tracing::warn!("Supabase client not initialized; skipping {operation}");
        }
        self.conn.as_ref()
    }
}

#[async_trait]
impl WalletStore for SupabaseStore {
    async fn get_wallet(&self, address: &str) -> Option<WalletRow> {
        let conn = self.conn("wallet lookup")?;
        match conn.fetch_wallet(address).await {
            Ok(rows) => rows.into_iter().next(),
            Err(e) => {
                tracing::warn!("Error retrieving wallet {address}: {e}");
                None
            }
        }
    }

    async fn insert_wallet(&self, wallet: NewWallet) -> bool {
        let Some(conn) = self.conn("wallet insert") else {
            return false;
        };

        let mut wallet = wallet;
        stamp_new_wallet(&mut wallet, Utc::now());
        let address = wallet.wallet_address.clone();

        match conn.insert(WALLETS_TABLE, &wallet).await {
            Ok(written) if written > 0 => {
                tracing::info!("Wallet {address} inserted");
                true
            }
            Ok(_) => {
                tracing::warn!("Failed to insert wallet {address}: no rows written");
                false
            }
            Err(e) => {
                tracing::warn!("Error inserting wallet {address}: {e}");
                false
            }
        }
    }

    async fn update_wallet(&self, address: &str, patch: WalletPatch) -> bool {
        let Some(conn) = self.conn("wallet update") else {
            return false;
        };

        let mut patch = patch;
        patch.updated_at = Some(Utc::now());

        match conn.update_wallet(address, &patch).await {
            Ok(written) if written > 0 => {
                tracing::info!("Wallet {address} updated");
                true
            }
            Ok(_) => {
                tracing::warn!("Failed to update wallet {address}: no rows written");
                false
            }
            Err(e) => {
                tracing::warn!("Error updating wallet {address}: {e}");
                false
            }
        }
    }

    async fn upsert_token_metadata(&self, row: TokenMetadataUpsert) -> bool {
        let Some(conn) = self.conn("token metadata upsert") else {
            return false;
        };

        let mut row = row;
        stamp_metadata(&mut row, Utc::now());
        let mint = row.token_mint.clone();

        match conn.upsert_token_metadata(&row).await {
            Ok(written) if written > 0 => {
                tracing::info!("Token metadata for {mint} upserted");
                true
            }
            Ok(_) => {
                tracing::warn!("Failed to upsert token metadata {mint}: no rows written");
                false
            }
            Err(e) => {
                tracing::warn!("Error upserting token metadata {mint}: {e}");
                false
            }
        }
    }
}

#[derive(Debug, Clone)]
struct Connection {
    config: SupabaseConfig,
    http: Client,
}

impl Connection {
    fn new(config: SupabaseConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn endpoint(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.url.trim_end_matches('/'), table)
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&self.config.anon_key)
    }

    async fn fetch_wallet(&self, address: &str) -> Result<Vec<WalletRow>, StoreError> {
        let response = self
            .authed(self.http.get(self.endpoint(WALLETS_TABLE)))
            .query(&[
                ("wallet_address", format!("eq.{address}")),
                ("select", "*".to_string()),
                ("limit", "1".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Backend { status, body });
        }

        response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn insert<T: Serialize>(&self, table: &str, row: &T) -> Result<usize, StoreError> {
        let response = self
            .authed(self.http.post(self.endpoint(table)))
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await?;

        written_rows(response).await
    }

    async fn update_wallet(&self, address: &str, patch: &WalletPatch) -> Result<usize, StoreError> {
        let response = self
            .authed(self.http.patch(self.endpoint(WALLETS_TABLE)))
            .query(&[("wallet_address", format!("eq.{address}"))])
            .header("Prefer", "return=representation")
            .json(patch)
            .send()
            .await?;

        written_rows(response).await
    }

    async fn upsert_token_metadata(&self, row: &TokenMetadataUpsert) -> Result<usize, StoreError> {
        let response = self
            .authed(self.http.post(self.endpoint(TOKEN_METADATA_TABLE)))
            .query(&[("on_conflict", "token_mint")])
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(row)
            .send()
            .await?;

        written_rows(response).await
    }
}

/// Count of rows the backend echoed back for a write.
async fn written_rows(response: reqwest::Response) -> Result<usize, StoreError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(StoreError::Backend { status, body });
    }

    let rows: Vec<Value> = response
        .json()
        .await
        .map_err(|e| StoreError::Decode(e.to_string()))?;
    Ok(rows.len())
}

/// Fill the insert payload's timestamps with `now` where the caller left them
/// unset.
fn stamp_new_wallet(wallet: &mut NewWallet, now: DateTime<Utc>) {
    wallet.first_seen.get_or_insert(now);
    wallet.last_active.get_or_insert(now);
    wallet.created_at.get_or_insert(now);
    wallet.updated_at.get_or_insert(now);
}

/// Always stamp `updated_at`; stamp `created_at` only when unset.
fn stamp_metadata(row: &mut TokenMetadataUpsert, now: DateTime<Utc>) {
    row.updated_at = Some(now);
    row.created_at.get_or_insert(now);
}
