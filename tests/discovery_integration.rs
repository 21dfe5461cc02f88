//! Discovery Pipeline Integration Tests
//!
//! Exercise the full pipeline against the recording mocks: insert/update
//! decisions, timestamp derivation, outage handling and the idempotency of
//! token metadata upserts.

use std::time::Duration;

use chrono::{TimeZone, Utc};

use wallet_scout::application::{DiscoveryPipeline, DiscoverySummary};
use wallet_scout::domain::FIRST_BUYER_LABEL;
use wallet_scout::ports::market_data::{FirstBuyer, TokenMeta};
use wallet_scout::ports::mocks::{MockFeed, MockStore, StoreCall};
use wallet_scout::ports::store::{TokenMetadataUpsert, WalletRow, WalletStore};

const DISCOVERY_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

fn discovery_meta() -> TokenMeta {
    TokenMeta {
        mint: Some(DISCOVERY_MINT.to_string()),
        symbol: Some("USDC".to_string()),
        name: Some("USD Coin".to_string()),
        decimals: Some(6),
        image: Some("https://img.example/usdc.png".to_string()),
        price_usd: Some(1.0),
    }
}

fn pipeline(feed: MockFeed, store: MockStore) -> DiscoveryPipeline<MockFeed, MockStore> {
    DiscoveryPipeline::new(feed, store, DISCOVERY_MINT).with_pause(Duration::ZERO)
}

#[tokio::test]
async fn end_to_end_two_buyers_on_empty_table() {
    let feed = MockFeed::new()
        .with_buyers(vec![
            FirstBuyer {
                wallet: Some("W1".to_string()),
                total: 12.5,
                last_transaction_time: Some(1_700_000_000_000),
                ..Default::default()
            },
            FirstBuyer {
                wallet: Some("W2".to_string()),
                total: -3.0,
                ..Default::default()
            },
        ])
        .with_metadata(discovery_meta());
    let store = MockStore::new();

    let summary = pipeline(feed.clone(), store.clone()).run().await;

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.inserted, 2);
    assert_eq!(summary.updated, 0);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.metadata_writes, 2);

    // W1 carries the derived instant for 1700000000000 ms.
    let w1 = store.wallet("W1").unwrap();
    assert_eq!(w1.score, 12.5);
    assert_eq!(
        w1.last_active,
        Some(Utc.with_ymd_and_hms(2023, 11, 14, 22, 13, 20).unwrap())
    );
    assert_eq!(w1.label, FIRST_BUYER_LABEL);
    assert!(!w1.is_bot);

    // W2 had no transaction time, so last_active is approximately now.
    let w2 = store.wallet("W2").unwrap();
    assert_eq!(w2.score, -3.0);
    let age = Utc::now() - w2.last_active.unwrap();
    assert!(age.num_seconds().abs() < 5);
    assert_eq!(w2.label, FIRST_BUYER_LABEL);
    assert!(!w2.is_bot);

    // Two metadata upserts for the configured discovery token, one per buyer.
    let metadata_calls: Vec<StoreCall> = store
        .calls()
        .into_iter()
        .filter(|c| matches!(c, StoreCall::UpsertMetadata(_)))
        .collect();
    assert_eq!(
        metadata_calls,
        vec![
            StoreCall::UpsertMetadata(DISCOVERY_MINT.to_string()),
            StoreCall::UpsertMetadata(DISCOVERY_MINT.to_string())
        ]
    );
    assert_eq!(store.metadata_count(), 1);
}

#[tokio::test]
async fn insert_xor_update_keyed_on_lookup() {
    let feed = MockFeed::new().with_buyers(vec![
        FirstBuyer {
            wallet: Some("KNOWN".to_string()),
            total: 7.0,
            ..Default::default()
        },
        FirstBuyer {
            wallet: Some("FRESH".to_string()),
            total: 2.0,
            ..Default::default()
        },
    ]);
    let store = MockStore::new().with_wallet(WalletRow {
        wallet_address: "KNOWN".to_string(),
        label: "Stale".to_string(),
        score: 0.0,
        is_bot: false,
        first_seen: None,
        last_active: None,
        created_at: None,
        updated_at: None,
    });

    let summary = pipeline(feed, store.clone()).run().await;

    assert_eq!(summary.inserted, 1);
    assert_eq!(summary.updated, 1);

    let wallet_calls: Vec<StoreCall> = store
        .calls()
        .into_iter()
        .filter(|c| !matches!(c, StoreCall::UpsertMetadata(_)))
        .collect();
    assert_eq!(
        wallet_calls,
        vec![
            StoreCall::Get("KNOWN".to_string()),
            StoreCall::Update("KNOWN".to_string()),
            StoreCall::Get("FRESH".to_string()),
            StoreCall::Insert("FRESH".to_string()),
        ]
    );

    // The stale label is overwritten on re-observation.
    assert_eq!(store.wallet("KNOWN").unwrap().label, FIRST_BUYER_LABEL);
}

#[tokio::test]
async fn provider_outage_means_zero_store_writes() {
    let feed = MockFeed::new();
    let store = MockStore::new();

    let summary = pipeline(feed, store.clone()).run().await;

    assert_eq!(summary, DiscoverySummary::default());
    assert!(store.calls().is_empty());
    assert_eq!(store.wallet_count(), 0);
    assert_eq!(store.metadata_count(), 0);
}

#[tokio::test]
async fn addressless_buyer_does_not_stop_the_run() {
    let feed = MockFeed::new().with_buyers(vec![
        FirstBuyer::default(),
        FirstBuyer {
            wallet: Some("W2".to_string()),
            total: 1.0,
            ..Default::default()
        },
    ]);
    let store = MockStore::new();

    let summary = pipeline(feed, store.clone()).run().await;

    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.inserted, 1);
    assert!(store.wallet("W2").is_some());
}

#[tokio::test]
async fn metadata_upsert_is_idempotent_on_the_mint_key() {
    let store = MockStore::new();

    let first = TokenMetadataUpsert {
        token_mint: DISCOVERY_MINT.to_string(),
        symbol: Some("USDC".to_string()),
        name: Some("USD Coin".to_string()),
        decimals: Some(6),
        image_url: None,
        last_price_usd: Some(0.99),
        last_price_updated: Utc::now(),
        created_at: None,
        updated_at: None,
    };
    let mut second = first.clone();
    second.last_price_usd = Some(1.01);

    assert!(store.upsert_token_metadata(first).await);
    assert!(store.upsert_token_metadata(second).await);

    assert_eq!(store.metadata_count(), 1);
    let row = store.metadata_row(DISCOVERY_MINT).unwrap();
    assert_eq!(row.last_price_usd, Some(1.01));
}
