//! Environment Secrets
//!
//! Provider API keys and Supabase credentials are read from the process
//! environment (or a local .env file loaded at startup), never from config.toml.

/// Credential bundle read from the environment.
///
/// Every field is optional: a missing provider key degrades the affected API
/// calls to absent results, while missing Supabase credentials leave the
/// datastore disconnected.
#[derive(Debug, Clone, Default)]
pub struct Secrets {
    /// Moralis Solana gateway API key (`MORALIS_API_KEY`)
    pub moralis_api_key: Option<String>,
    /// Solana Tracker data API key (`SOLANA_TRACKER_API_KEY`)
    pub tracker_api_key: Option<String>,
    /// Supabase project URL (`SUPABASE_URL`)
    pub supabase_url: Option<String>,
    /// Supabase anon key (`SUPABASE_ANON_KEY`)
    pub supabase_anon_key: Option<String>,
}

impl Secrets {
    /// Read all credentials from the environment. Empty values count as unset.
    pub fn from_env() -> Self {
        Self {
            moralis_api_key: env_var("MORALIS_API_KEY"),
            tracker_api_key: env_var("SOLANA_TRACKER_API_KEY"),
            supabase_url: env_var("SUPABASE_URL"),
            supabase_anon_key: env_var("SUPABASE_ANON_KEY"),
        }
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_value_counts_as_unset() {
        std::env::set_var("WALLET_SCOUT_TEST_EMPTY", "");
        assert_eq!(env_var("WALLET_SCOUT_TEST_EMPTY"), None);
        std::env::remove_var("WALLET_SCOUT_TEST_EMPTY");
    }

    #[test]
    fn test_set_value_is_read() {
        std::env::set_var("WALLET_SCOUT_TEST_KEY", "abc123");
        assert_eq!(env_var("WALLET_SCOUT_TEST_KEY"), Some("abc123".to_string()));
        std::env::remove_var("WALLET_SCOUT_TEST_KEY");
    }

    #[test]
    fn test_default_is_all_unset() {
        let secrets = Secrets::default();
        assert!(secrets.moralis_api_key.is_none());
        assert!(secrets.tracker_api_key.is_none());
        assert!(secrets.supabase_url.is_none());
        assert!(secrets.supabase_anon_key.is_none());
    }
}
