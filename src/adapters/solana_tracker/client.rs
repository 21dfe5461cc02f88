//! Solana Tracker API Client
//!
//! HTTP client for the Solana Tracker data API. Like the Moralis client, the
//! public surface collapses every failure to an absent result after logging
//! the detail; callers never distinguish causes.
//!
//! The tracker's metadata endpoint wraps its payload in a `{status, data}`
//! envelope; only a `success` envelope with non-empty data counts.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;

use crate::ports::market_data::{FirstBuyer, MarketDataFeed, TokenMeta};

/// Solana Tracker client errors. Internal only; collapsed to absent results
/// at the public boundary.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Solana Tracker API key not set; set SOLANA_TRACKER_API_KEY in your environment")]
    MissingApiKey,
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),
}

/// Solana Tracker client configuration
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Base URL for the Solana Tracker data API
    pub base_url: String,
    /// API key; calls degrade to absent results without one
    pub api_key: Option<String>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://data.solanatracker.io".to_string(),
            api_key: None,
        }
    }
}

/// Solana Tracker data API client
#[derive(Debug, Clone)]
pub struct SolanaTrackerClient {
    config: TrackerConfig,
    http: Client,
}

impl SolanaTrackerClient {
    /// Create a new tracker client with default configuration
    pub fn new() -> Self {
        Self::with_config(TrackerConfig::default())
    }

    /// Create a new tracker client with custom configuration
    pub fn with_config(config: TrackerConfig) -> Self {
        // No request timeout here; only the Moralis gateway carries one.
        Self {
            config,
            http: Client::new(),
        }
    }

    /// Get the configured base URL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// First cohort of buyers for a token, in provider order. Absent unless
    /// the response body is a JSON array.
    pub async fn fetch_first_buyers(&self, token_mint: &str) -> Option<Vec<FirstBuyer>> {
        tracing::info!("Fetching first buyers for token {token_mint}");
        let result = self
            .get(&format!("first-buyers/{token_mint}"))
            .await
            .and_then(parse_buyers);

        let buyers = log_absent("first buyers", result)?;
        tracing::info!("Fetched {} first buyers for {token_mint}", buyers.len());
        Some(buyers)
    }

    /// Profit and loss for a wallet, optionally scoped to one token. Absent
    /// unless the response body is truthy.
    pub async fn fetch_wallet_pnl(
        &self,
        wallet_address: &str,
        token_mint: Option<&str>,
    ) -> Option<Value> {
        tracing::info!("Fetching PnL for wallet {wallet_address}");
        let result = self.get(&pnl_path(wallet_address, token_mint)).await;

        let value = log_absent("wallet PnL", result)?;
        if !is_truthy(&value) {
            tracing::warn!("No PnL data found for {wallet_address}");
            return None;
        }
        tracing::debug!("Fetched PnL data for {wallet_address}");
        Some(value)
    }

    /// Token metadata. Absent unless the envelope reports success with a
    /// non-empty data payload; returns the unwrapped payload.
    pub async fn fetch_token_metadata(&self, token_mint: &str) -> Option<TokenMeta> {
        tracing::info!("Fetching token metadata for {token_mint}");
        let result = self
            .get(&format!("tokens/{token_mint}"))
            .await
            .and_then(unwrap_envelope);

        log_absent("token metadata", result)
    }

    async fn get(&self, path: &str) -> Result<Value, TrackerError> {
        let Some(api_key) = self.config.api_key.clone() else {
            return Err(TrackerError::MissingApiKey);
        };

        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), path);
        let response = self
            .http
            .get(&url)
            .header("x-api-key", &api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TrackerError::Status { status, body });
        }

        Ok(response.json().await?)
    }
}

impl Default for SolanaTrackerClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataFeed for SolanaTrackerClient {
    async fn first_buyers(&self, token_mint: &str) -> Option<Vec<FirstBuyer>> {
        self.fetch_first_buyers(token_mint).await
    }

    async fn token_metadata(&self, token_mint: &str) -> Option<TokenMeta> {
        self.fetch_token_metadata(token_mint).await
    }
}

fn pnl_path(wallet_address: &str, token_mint: Option<&str>) -> String {
    match token_mint {
        Some(mint) => format!("pnl/{wallet_address}/{mint}"),
        None => format!("pnl/{wallet_address}"),
    }
}

/// Log the failure detail and collapse the result to an absent value.
fn log_absent<T>(operation: &str, result: Result<T, TrackerError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Solana Tracker {operation} unavailable: {e}");
            None
        }
    }
}

fn parse_buyers(value: Value) -> Result<Vec<FirstBuyer>, TrackerError> {
    if !value.is_array() {
        return Err(TrackerError::UnexpectedShape(format!(
            "expected a JSON array of buyers, got {value}"
        )));
    }
    serde_json::from_value(value)
        .map_err(|e| TrackerError::UnexpectedShape(format!("buyer record: {e}")))
}

fn unwrap_envelope(value: Value) -> Result<TokenMeta, TrackerError> {
    let status = value.get("status").and_then(Value::as_str);
    if status != Some("success") {
        return Err(TrackerError::UnexpectedShape(format!(
            "envelope status is {status:?}, expected \"success\""
        )));
    }

    let data = value.get("data").cloned().unwrap_or(Value::Null);
    if !is_truthy(&data) {
        return Err(TrackerError::UnexpectedShape(
            "envelope carries no data".to_string(),
        ));
    }

    serde_json::from_value(data)
        .map_err(|e| TrackerError::UnexpectedShape(format!("metadata payload: {e}")))
}

/// Truthiness in the upstream provider's sense: null, false, zero, and empty
/// strings/arrays/objects all count as "no data".
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
