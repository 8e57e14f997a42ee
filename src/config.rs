//! Environment-driven configuration.

use std::path::PathBuf;

use crate::auth::{CREDENTIALS_ENV, DEFAULT_KEY_PATH};
use crate::error::SdkError;
use crate::network::{DEFAULT_API_URL, DEFAULT_BATCH_URL};

/// Issuer account ID.
pub const ISSUER_ID_ENV: &str = "WALLET_ISSUER_ID";
/// Comma-separated origins allowed to render save buttons.
pub const ORIGINS_ENV: &str = "WALLET_ORIGINS";
/// REST base URL override.
pub const API_URL_ENV: &str = "WALLET_API_URL";
/// Batch endpoint override.
pub const BATCH_URL_ENV: &str = "WALLET_BATCH_URL";

/// Settings for a [`crate::client::WalletClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct WalletConfig {
    pub key_path: PathBuf,
    pub issuer_id: Option<String>,
    pub origins: Vec<String>,
    pub api_url: String,
    pub batch_url: String,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            key_path: PathBuf::from(DEFAULT_KEY_PATH),
            issuer_id: None,
            origins: Vec::new(),
            api_url: DEFAULT_API_URL.to_string(),
            batch_url: DEFAULT_BATCH_URL.to_string(),
        }
    }
}

impl WalletConfig {
    /// Read the configuration from process environment variables.
    pub fn from_env() -> Result<Self, SdkError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through `lookup`. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SdkError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let issuer_id = get(ISSUER_ID_ENV);
        if let Some(id) = &issuer_id {
            if !id.chars().all(|c| c.is_ascii_digit()) {
                return Err(SdkError::Config(format!(
                    "{} must be numeric, got '{}'",
                    ISSUER_ID_ENV, id
                )));
            }
        }

        Ok(Self {
            key_path: get(CREDENTIALS_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.key_path),
            issuer_id,
            origins: get(ORIGINS_ENV)
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|o| !o.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
            api_url: get(API_URL_ENV).unwrap_or(defaults.api_url),
            batch_url: get(BATCH_URL_ENV).unwrap_or(defaults.batch_url),
        })
    }

    /// The issuer ID, or a config error naming the variable to set.
    pub fn require_issuer_id(&self) -> Result<&str, SdkError> {
        self.issuer_id
            .as_deref()
            .ok_or_else(|| SdkError::Config(format!("{} is not set", ISSUER_ID_ENV)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = WalletConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, WalletConfig::default());
        assert_eq!(config.key_path, PathBuf::from("/path/to/key.json"));
        assert!(config.require_issuer_id().is_err());
    }

    #[test]
    fn test_reads_every_variable() {
        let config = WalletConfig::from_lookup(lookup(&[
            ("GOOGLE_APPLICATION_CREDENTIALS", "/etc/wallet/key.json"),
            ("WALLET_ISSUER_ID", "3388000000022125581"),
            ("WALLET_ORIGINS", "www.example.com, shop.example.com,,"),
            ("WALLET_API_URL", "http://localhost:8080/walletobjects/v1"),
            ("WALLET_BATCH_URL", "http://localhost:8080/batch"),
        ]))
        .unwrap();

        assert_eq!(config.key_path, PathBuf::from("/etc/wallet/key.json"));
        assert_eq!(config.require_issuer_id().unwrap(), "3388000000022125581");
        assert_eq!(config.origins, vec!["www.example.com", "shop.example.com"]);
        assert_eq!(config.api_url, "http://localhost:8080/walletobjects/v1");
        assert_eq!(config.batch_url, "http://localhost:8080/batch");
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = WalletConfig::from_lookup(lookup(&[("WALLET_API_URL", "  ")])).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_non_numeric_issuer_is_rejected() {
        let err = WalletConfig::from_lookup(lookup(&[("WALLET_ISSUER_ID", "issuer-abc")])).unwrap_err();
        assert!(matches!(err, SdkError::Config(_)));
    }
}
