//! Moralis API Client
//!
//! HTTP client for the Moralis Solana gateway. Every public operation returns
//! an absent result on failure instead of an error: the internal error detail
//! is logged and collapsed at this boundary, so callers treat a failed call
//! exactly like "no data".

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::{Map, Value};
use thiserror::Error;

/// Moralis API client errors. Internal only; the public surface collapses
/// every variant to an absent result after logging it.
#[derive(Debug, Error)]
pub enum MoralisError {
    #[error("Moralis API key not set; set MORALIS_API_KEY in your environment")]
    MissingApiKey,
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),
}

/// Moralis API client configuration
#[derive(Debug, Clone)]
pub struct MoralisConfig {
    /// Base URL for the Moralis Solana gateway
    pub base_url: String,
    /// API key; calls degrade to absent results without one
    pub api_key: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
    /// Fixed pause after every attempted call, as naive rate limiting
    pub pause: Duration,
}

impl Default for MoralisConfig {
    fn default() -> Self {
        Self {
            base_url: "https://solana-gateway.moralis.io".to_string(),
            api_key: None,
            timeout: Duration::from_secs(10),
            pause: Duration::from_millis(100),
        }
    }
}

/// Moralis Solana gateway client
#[derive(Debug, Clone)]
pub struct MoralisClient {
    config: MoralisConfig,
    http: Client,
}

impl MoralisClient {
    /// Create a new Moralis client with default configuration
    pub fn new() -> Result<Self, MoralisError> {
        Self::with_config(MoralisConfig::default())
    }

    /// Create a new Moralis client with custom configuration
    pub fn with_config(config: MoralisConfig) -> Result<Self, MoralisError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, http })
    }

    /// Get the configured base URL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Newly listed tokens on an exchange. Absent unless the response body is
    /// a JSON array.
    pub async fn new_tokens(&self, exchange: &str, limit: u32) -> Option<Vec<Value>> {
        tracing::info!("Fetching new tokens from {exchange}");
        let result = self
            .get(
                &format!("token/mainnet/exchange/{exchange}/new"),
                &[("limit", limit.to_string())],
            )
            .await
            .and_then(expect_array);

        let tokens = log_absent("new tokens listing", result)?;
        tracing::info!("Found {} new tokens from {exchange}", tokens.len());
        Some(tokens)
    }

    /// Top holders for a token. Absent unless the response is an object
    /// carrying a `result` array; returns that array.
    pub async fn top_holders(&self, token_mint: &str, limit: u32) -> Option<Vec<Value>> {
        tracing::info!("Fetching top holders for token {token_mint}");
        let result = self
            .get(
                &format!("token/mainnet/holders/{token_mint}"),
                &[("limit", limit.to_string())],
            )
            .await
            .and_then(expect_result_list);

        let holders = log_absent("top holders", result)?;
        tracing::info!("Found {} top holders for {token_mint}", holders.len());
        Some(holders)
    }

    /// Profitability metrics for a wallet. Absent unless the response is a
    /// JSON object.
    pub async fn wallet_profitability(&self, wallet_address: &str) -> Option<Map<String, Value>> {
        tracing::info!("Fetching profitability for wallet {wallet_address}");
        let result = self
            .get(&format!("account/mainnet/{wallet_address}/profitability"), &[])
            .await
            .and_then(expect_object);

        let metrics = log_absent("wallet profitability", result)?;
        tracing::debug!("Fetched profitability for {wallet_address}");
        Some(metrics)
    }

    /// Metadata for a token. Absent unless the response is a JSON object.
    pub async fn token_metadata(&self, token_mint: &str) -> Option<Map<String, Value>> {
        tracing::info!("Fetching token metadata for {token_mint}");
        let result = self
            .get(&format!("token/mainnet/{token_mint}/metadata"), &[])
            .await
            .and_then(expect_object);

        log_absent("token metadata", result)
    }

    /// Current price for a token. Absent unless the response is a JSON object.
    pub async fn token_price(&self, token_mint: &str) -> Option<Map<String, Value>> {
        tracing::info!("Fetching token price for {token_mint}");
        let result = self
            .get(&format!("token/mainnet/{token_mint}/price"), &[])
            .await
            .and_then(expect_object);

        log_absent("token price", result)
    }

    /// GET a gateway path. Without an API key no network call is attempted
    /// (and no pause is taken); every attempted call is followed by the fixed
    /// pause regardless of outcome.
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, MoralisError> {
        let Some(api_key) = self.config.api_key.clone() else {
            return Err(MoralisError::MissingApiKey);
        };

        let url = endpoint(&self.config.base_url, path);
        let result = self.send(&url, &api_key, query).await;
        tokio::time::sleep(self.config.pause).await;
        result
    }

    async fn send(
        &self,
        url: &str,
        api_key: &str,
        query: &[(&str, String)],
    ) -> Result<Value, MoralisError> {
        let response = self
            .http
            .get(url)
            .query(query)
            .header("X-API-Key", api_key)
            .header("accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MoralisError::Status { status, body });
        }

        Ok(response.json().await?)
    }
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path)
}

/// Log the failure detail and collapse the result to an absent value.
fn log_absent<T>(operation: &str, result: Result<T, MoralisError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Moralis {operation} unavailable: {e}");
            None
        }
    }
}

fn expect_array(value: Value) -> Result<Vec<Value>, MoralisError> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(MoralisError::UnexpectedShape(format!(
            "expected a JSON array, got {other}"
        ))),
    }
}

fn expect_object(value: Value) -> Result<Map<String, Value>, MoralisError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(MoralisError::UnexpectedShape(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}

fn expect_result_list(value: Value) -> Result<Vec<Value>, MoralisError> {
    let mut map = expect_object(value)?;
    match map.remove("result") {
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(MoralisError::UnexpectedShape(format!(
            "expected `result` to be an array, got {other}"
        ))),
        None => Err(MoralisError::UnexpectedShape(
            "response object has no `result` field".to_string(),
        )),
    }
}
