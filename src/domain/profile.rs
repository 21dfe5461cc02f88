//! Wallet Profile Derivation
//!
//! Turns one early-buyer observation into the wallet record the store keeps:
//! a profitability-derived score, a last-active timestamp and a fixed label.

use chrono::{DateTime, Utc};

use crate::ports::market_data::FirstBuyer;
use crate::ports::store::{NewWallet, WalletPatch};

/// Label assigned to every wallet discovered through the first-buyer cohort.
pub const FIRST_BUYER_LABEL: &str = "First Buyer";

/// Derived wallet attributes for one buyer observation.
#[derive(Debug, Clone, PartialEq)]
pub struct WalletProfile {
    pub wallet_address: String,
    pub label: String,
    pub score: f64,
    pub is_bot: bool,
    pub last_active: DateTime<Utc>,
}

impl WalletProfile {
    /// Derive the stored profile for one buyer observation.
    ///
    /// Returns `None` when the observation carries no wallet address. The
    /// score is the buyer's total PnL (0.0 when the provider omitted it) and
    /// last-active falls back to `now` when the provider reported no
    /// transaction time. The bot flag is a fixed placeholder; no detection
    /// heuristic exists.
    pub fn from_buyer(buyer: &FirstBuyer, now: DateTime<Utc>) -> Option<Self> {
        let wallet_address = buyer.wallet.clone().filter(|w| !w.is_empty())?;

        Some(Self {
            wallet_address,
            label: FIRST_BUYER_LABEL.to_string(),
            score: buyer.total,
            is_bot: false,
            last_active: last_active_from(buyer, now),
        })
    }

    /// Full insert payload for a wallet seen for the first time.
    pub fn as_insert(&self) -> NewWallet {
        NewWallet {
            wallet_address: self.wallet_address.clone(),
            label: self.label.clone(),
            score: self.score,
            is_bot: self.is_bot,
            first_seen: None,
            last_active: Some(self.last_active),
            created_at: None,
            updated_at: None,
        }
    }

    /// Patch payload for a wallet observed again: score, last-active and
    /// label only.
    pub fn as_patch(&self) -> WalletPatch {
        WalletPatch {
            label: self.label.clone(),
            score: self.score,
            last_active: self.last_active,
            updated_at: None,
        }
    }
}

/// Last-active instant for a buyer: the reported last-transaction time when
/// present and positive, otherwise `now`. Epoch-millisecond zero is treated
/// as absent.
fn last_active_from(buyer: &FirstBuyer, now: DateTime<Utc>) -> DateTime<Utc> {
    buyer
        .last_transaction_time
        .filter(|&ms| ms > 0)
        .and_then(DateTime::from_timestamp_millis)
        .unwrap_or(now)
}
