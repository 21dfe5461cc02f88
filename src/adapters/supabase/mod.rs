//! Supabase Adapter
//!
//! Implementation of the WalletStore port over Supabase's PostgREST
//! interface (wallets and token_metadata tables).

mod store;

pub use store::{StoreError, SupabaseConfig, SupabaseStore};
