//! Wallet Discovery Pipeline
//!
//! Fetches the first-buyer cohort for one configured token, derives a
//! profitability score per wallet and writes each wallet to the store:
//! an update when the wallet is already known, an insert otherwise. Each
//! iteration also refreshes the configured token's metadata row.
//!
//! Processing is strictly sequential in provider order, with a fixed pause
//! between buyers as a crude guard for the provider's published rate limits.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::domain::WalletProfile;
use crate::ports::market_data::{MarketDataFeed, TokenMeta};
use crate::ports::store::{TokenMetadataUpsert, WalletStore};

const BUYER_PAUSE: Duration = Duration::from_secs(1);

/// Aggregate counters for one discovery run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoverySummary {
    /// Buyers with a wallet address that went through lookup and write
    pub processed: usize,
    /// New wallet rows written
    pub inserted: usize,
    /// Existing wallet rows patched
    pub updated: usize,
    /// Buyers skipped for lack of a wallet address
    pub skipped: usize,
    /// Token metadata rows upserted
    pub metadata_writes: usize,
}

/// Discovers wallets from a token's first-buyer cohort and persists them.
pub struct DiscoveryPipeline<F, S> {
    feed: F,
    store: S,
    token_mint: String,
    pause: Duration,
}

impl<F: MarketDataFeed, S: WalletStore> DiscoveryPipeline<F, S> {
    /// Create a pipeline for one configured discovery token.
    pub fn new(feed: F, store: S, token_mint: impl Into<String>) -> Self {
        Self {
            feed,
            store,
            token_mint: token_mint.into(),
            pause: BUYER_PAUSE,
        }
    }

    /// Override the per-buyer pause
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// Run one full discovery pass over the configured token's first buyers.
    pub async fn run(&self) -> DiscoverySummary {
        tracing::info!("Starting wallet discovery for token {}", self.token_mint);
        let mut summary = DiscoverySummary::default();

        let Some(buyers) = self.feed.first_buyers(&self.token_mint).await else {
            tracing::warn!(
                "No first buyers found for token {} or the fetch failed; ending discovery run",
                self.token_mint
            );
            return summary;
        };

        tracing::info!("Processing {} potential wallets", buyers.len());

        for buyer in &buyers {
            let now = Utc::now();
            let Some(profile) = WalletProfile::from_buyer(buyer, now) else {
                tracing::info!("Skipping buyer with no wallet address");
                summary.skipped += 1;
                continue;
            };

            let existing = self.store.get_wallet(&profile.wallet_address).await;
            if existing.is_some() {
                tracing::info!("Updating existing wallet {}", profile.wallet_address);
                if self
                    .store
                    .update_wallet(&profile.wallet_address, profile.as_patch())
                    .await
                {
                    summary.updated += 1;
                }
            } else {
                tracing::info!("Inserting new wallet {}", profile.wallet_address);
                if self.store.insert_wallet(profile.as_insert()).await {
                    summary.inserted += 1;
                }
            }

            // Refresh the discovery token's metadata row alongside each
            // buyer. The write is idempotent on the mint key.
            if let Some(meta) = self.feed.token_metadata(&self.token_mint).await {
                match metadata_row(meta, now) {
                    Some(row) => {
                        if self.store.upsert_token_metadata(row).await {
                            summary.metadata_writes += 1;
                        }
                    }
                    None => {
                        tracing::warn!("Token metadata response carries no mint; skipping upsert")
                    }
                }
            }

            summary.processed += 1;
            tokio::time::sleep(self.pause).await;
        }

        tracing::info!(
            "Wallet discovery complete: {} processed, {} inserted, {} updated, {} skipped, \
             {} metadata writes",
            summary.processed,
            summary.inserted,
            summary.updated,
            summary.skipped,
            summary.metadata_writes
        );
        summary
    }
}

/// Map a provider metadata snapshot onto the metadata table row, stamping the
/// price-updated time. Absent when the snapshot carries no mint to key on.
fn metadata_row(meta: TokenMeta, now: DateTime<Utc>) -> Option<TokenMetadataUpsert> {
    let token_mint = meta.mint.filter(|m| !m.is_empty())?;

    Some(TokenMetadataUpsert {
        token_mint,
        symbol: meta.symbol,
        name: meta.name,
        decimals: meta.decimals,
        image_url: meta.image,
        last_price_usd: meta.price_usd,
        last_price_updated: now,
        created_at: None,
        updated_at: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FIRST_BUYER_LABEL;
    use crate::ports::market_data::FirstBuyer;
    use crate::ports::mocks::{MockFeed, MockStore, StoreCall};
    use crate::ports::store::WalletRow;

    const MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

    fn buyer(wallet: Option<&str>, total: f64) -> FirstBuyer {
        FirstBuyer {
            wallet: wallet.map(str::to_string),
            total,
            ..Default::default()
        }
    }

    fn meta() -> TokenMeta {
        TokenMeta {
            mint: Some(MINT.to_string()),
            symbol: Some("USDC".to_string()),
            name: Some("USD Coin".to_string()),
            decimals: Some(6),
            image: None,
            price_usd: Some(1.0),
        }
    }

    fn pipeline(feed: MockFeed, store: MockStore) -> DiscoveryPipeline<MockFeed, MockStore> {
        DiscoveryPipeline::new(feed, store, MINT).with_pause(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_unknown_wallet_is_inserted() {
        let feed = MockFeed::new().with_buyers(vec![buyer(Some("W1"), 5.0)]);
        let store = MockStore::new();

        let summary = pipeline(feed, store.clone()).run().await;

        assert_eq!(summary.inserted, 1);
        assert_eq!(summary.updated, 0);
        assert_eq!(
            store.calls(),
            vec![
                StoreCall::Get("W1".to_string()),
                StoreCall::Insert("W1".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_known_wallet_is_updated_not_inserted() {
        let feed = MockFeed::new().with_buyers(vec![buyer(Some("W1"), 5.0)]);
        let store = MockStore::new().with_wallet(WalletRow {
            wallet_address: "W1".to_string(),
            label: "Old Label".to_string(),
            score: -1.0,
            is_bot: false,
            first_seen: None,
            last_active: None,
            created_at: None,
            updated_at: None,
        });

        let summary = pipeline(feed, store.clone()).run().await;

        assert_eq!(summary.inserted, 0);
        assert_eq!(summary.updated, 1);
        assert_eq!(
            store.calls(),
            vec![
                StoreCall::Get("W1".to_string()),
                StoreCall::Update("W1".to_string())
            ]
        );

        let row = store.wallet("W1").unwrap();
        assert_eq!(row.score, 5.0);
        assert_eq!(row.label, FIRST_BUYER_LABEL);
    }

    #[tokio::test]
    async fn test_addressless_buyer_is_skipped_without_store_calls() {
        let feed = MockFeed::new().with_buyers(vec![
            buyer(None, 9.0),
            buyer(Some("W2"), 1.0),
        ]);
        let store = MockStore::new();

        let summary = pipeline(feed, store.clone()).run().await;

        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.inserted, 1);
        // No lookup or write happened for the addressless record.
        assert_eq!(
            store.calls(),
            vec![
                StoreCall::Get("W2".to_string()),
                StoreCall::Insert("W2".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_outage_terminates_with_zero_writes() {
        let feed = MockFeed::new();
        let store = MockStore::new();

        let summary = pipeline(feed.clone(), store.clone()).run().await;

        assert_eq!(summary, DiscoverySummary::default());
        assert!(store.calls().is_empty());
        assert_eq!(feed.calls(), vec![format!("first_buyers:{MINT}")]);
    }

    #[tokio::test]
    async fn test_metadata_refreshed_once_per_buyer_for_configured_token() {
        let feed = MockFeed::new()
            .with_buyers(vec![buyer(Some("W1"), 1.0), buyer(Some("W2"), 2.0)])
            .with_metadata(meta());
        let store = MockStore::new();

        let summary = pipeline(feed.clone(), store.clone()).run().await;

        assert_eq!(summary.metadata_writes, 2);
        assert_eq!(store.metadata_count(), 1);
        assert_eq!(
            feed.calls(),
            vec![
                format!("first_buyers:{MINT}"),
                format!("token_metadata:{MINT}"),
                format!("token_metadata:{MINT}"),
            ]
        );
    }

    #[tokio::test]
    async fn test_buyers_processed_in_provider_order() {
        let feed = MockFeed::new().with_buyers(vec![
            buyer(Some("W3"), 0.0),
            buyer(Some("W1"), 0.0),
            buyer(Some("W2"), 0.0),
        ]);
        let store = MockStore::new();

        pipeline(feed, store.clone()).run().await;

        let lookups: Vec<StoreCall> = store
            .calls()
            .into_iter()
            .filter(|c| matches!(c, StoreCall::Get(_)))
            .collect();
        assert_eq!(
            lookups,
            vec![
                StoreCall::Get("W3".to_string()),
                StoreCall::Get("W1".to_string()),
                StoreCall::Get("W2".to_string())
            ]
        );
    }

    #[test]
    fn test_metadata_row_maps_provider_fields() {
        let now = Utc::now();
        let row = metadata_row(meta(), now).unwrap();

        assert_eq!(row.token_mint, MINT);
        assert_eq!(row.symbol.as_deref(), Some("USDC"));
        assert_eq!(row.decimals, Some(6));
        assert_eq!(row.last_price_usd, Some(1.0));
        assert_eq!(row.last_price_updated, now);
        assert!(row.created_at.is_none());
        assert!(row.updated_at.is_none());
    }

    #[test]
    fn test_metadata_row_requires_mint() {
        let now = Utc::now();
        let mut snapshot = meta();
        snapshot.mint = None;
        assert!(metadata_row(snapshot, now).is_none());

        let mut snapshot = meta();
        snapshot.mint = Some(String::new());
        assert!(metadata_row(snapshot, now).is_none());
    }
}
