//! Recording mocks for the port traits, used by unit and integration tests.
//!
//! Each mock keeps an `Arc<Mutex<_>>` call log so tests can assert which
//! operations ran and in what order, and allows controlled responses via
//! builder methods.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use super::market_data::{FirstBuyer, MarketDataFeed, TokenMeta};
use super::store::{NewWallet, TokenMetadataUpsert, WalletPatch, WalletRow, WalletStore};

/// Mock market data feed with scripted responses.
#[derive(Debug, Default, Clone)]
pub struct MockFeed {
    buyers: Option<Vec<FirstBuyer>>,
    metadata: Option<TokenMeta>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to script the first-buyers response
    pub fn with_buyers(mut self, buyers: Vec<FirstBuyer>) -> Self {
        self.buyers = Some(buyers);
        self
    }

    /// Builder method to script the token metadata response
    pub fn with_metadata(mut self, metadata: TokenMeta) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Get all recorded calls, formatted as `operation:token_mint`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MarketDataFeed for MockFeed {
    async fn first_buyers(&self, token_mint: &str) -> Option<Vec<FirstBuyer>> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("first_buyers:{token_mint}"));
        self.buyers.clone()
    }

    async fn token_metadata(&self, token_mint: &str) -> Option<TokenMeta> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("token_metadata:{token_mint}"));
        self.metadata.clone()
    }
}

/// One recorded datastore operation, keyed by the address/mint it touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Get(String),
    Insert(String),
    Update(String),
    UpsertMetadata(String),
}

/// In-memory mock store that records calls and models the real store's
/// keyed-write semantics (insert fails on duplicates, upsert replaces).
#[derive(Debug, Default, Clone)]
pub struct MockStore {
    wallets: Arc<Mutex<HashMap<String, WalletRow>>>,
    metadata: Arc<Mutex<HashMap<String, TokenMetadataUpsert>>>,
    calls: Arc<Mutex<Vec<StoreCall>>>,
    fail_writes: bool,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to seed an existing wallet row
    pub fn with_wallet(self, row: WalletRow) -> Self {
        self.wallets
            .lock()
            .unwrap()
            .insert(row.wallet_address.clone(), row);
        self
    }

    /// Builder method to make every write report failure
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn wallet(&self, address: &str) -> Option<WalletRow> {
        self.wallets.lock().unwrap().get(address).cloned()
    }

    pub fn wallet_count(&self) -> usize {
        self.wallets.lock().unwrap().len()
    }

    pub fn metadata_row(&self, mint: &str) -> Option<TokenMetadataUpsert> {
        self.metadata.lock().unwrap().get(mint).cloned()
    }

    pub fn metadata_count(&self) -> usize {
        self.metadata.lock().unwrap().len()
    }
}

#[async_trait]
impl WalletStore for MockStore {
    async fn get_wallet(&self, address: &str) -> Option<WalletRow> {
        self.calls
            .lock()
            .unwrap()
            .push(StoreCall::Get(address.to_string()));
        self.wallets.lock().unwrap().get(address).cloned()
    }

    async fn insert_wallet(&self, wallet: NewWallet) -> bool {
        self.calls
            .lock()
            .unwrap()
            .push(StoreCall::Insert(wallet.wallet_address.clone()));
        if self.fail_writes {
            return false;
        }

        let mut wallets = self.wallets.lock().unwrap();
        if wallets.contains_key(&wallet.wallet_address) {
            return false;
        }

        let now = Utc::now();
        let row = WalletRow {
            wallet_address: wallet.wallet_address.clone(),
            label: wallet.label,
            score: wallet.score,
            is_bot: wallet.is_bot,
            first_seen: wallet.first_seen.or(Some(now)),
            last_active: wallet.last_active.or(Some(now)),
            created_at: wallet.created_at.or(Some(now)),
            updated_at: wallet.updated_at.or(Some(now)),
        };
        wallets.insert(wallet.wallet_address, row);
        true
    }

    async fn update_wallet(&self, address: &str, patch: WalletPatch) -> bool {
        self.calls
            .lock()
            .unwrap()
            .push(StoreCall::Update(address.to_string()));
        if self.fail_writes {
            return false;
        }

        let mut wallets = self.wallets.lock().unwrap();
        match wallets.get_mut(address) {
            Some(row) => {
                row.label = patch.label;
                row.score = patch.score;
                row.last_active = Some(patch.last_active);
                row.updated_at = Some(patch.updated_at.unwrap_or_else(Utc::now));
                true
            }
            None => false,
        }
    }

    async fn upsert_token_metadata(&self, row: TokenMetadataUpsert) -> bool {
        self.calls
            .lock()
            .unwrap()
            .push(StoreCall::UpsertMetadata(row.token_mint.clone()));
        if self.fail_writes {
            return false;
        }

        self.metadata
            .lock()
            .unwrap()
            .insert(row.token_mint.clone(), row);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buyer(wallet: &str) -> FirstBuyer {
        FirstBuyer {
            wallet: Some(wallet.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_mock_feed_records_calls() {
        let feed = MockFeed::new().with_buyers(vec![buyer("W1")]);

        let buyers = feed.first_buyers("MintA").await.unwrap();
        assert_eq!(buyers.len(), 1);
        assert!(feed.token_metadata("MintA").await.is_none());
        assert_eq!(
            feed.calls(),
            vec!["first_buyers:MintA".to_string(), "token_metadata:MintA".to_string()]
        );
    }

    #[tokio::test]
    async fn test_mock_store_insert_then_get() {
        let store = MockStore::new();

        let inserted = store
            .insert_wallet(NewWallet {
                wallet_address: "W1".to_string(),
                label: "First Buyer".to_string(),
                score: 1.5,
                is_bot: false,
                first_seen: None,
                last_active: None,
                created_at: None,
                updated_at: None,
            })
            .await;
        assert!(inserted);

        let row = store.get_wallet("W1").await.unwrap();
        assert_eq!(row.score, 1.5);
        assert!(row.first_seen.is_some());
        assert_eq!(
            store.calls(),
            vec![
                StoreCall::Insert("W1".to_string()),
                StoreCall::Get("W1".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_mock_store_update_missing_row_fails() {
        let store = MockStore::new();

        let updated = store
            .update_wallet(
                "W9",
                WalletPatch {
                    label: "First Buyer".to_string(),
                    score: 0.0,
                    last_active: Utc::now(),
                    updated_at: None,
                },
            )
            .await;
        assert!(!updated);
    }

    #[tokio::test]
    async fn test_mock_store_failing_writes() {
        let store = MockStore::new().failing_writes();

        let inserted = store
            .insert_wallet(NewWallet {
                wallet_address: "W1".to_string(),
                label: "First Buyer".to_string(),
                score: 0.0,
                is_bot: false,
                first_seen: None,
                last_active: None,
                created_at: None,
                updated_at: None,
            })
            .await;
        assert!(!inserted);
        assert_eq!(store.wallet_count(), 0);
    }
}
