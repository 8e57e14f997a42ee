//! Authentication: service-account credentials and access tokens.
//!
//! ## Credential Model
//!
//! A service account is identified by its `client_email` and owns an RSA
//! private key. The same key is used for two things:
//!
//! - signing the OAuth2 JWT-bearer assertion that is exchanged for a
//!   short-lived access token (see [`token`], `http` feature), and
//! - signing save-to-wallet claims locally (see [`crate::domain::save_link`]).
//!
//! The key is loaded once and never mutated. Its `Debug` output never shows
//! the private key.

#[cfg(feature = "http")]
pub mod token;

use jsonwebtoken::{EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::AuthError;

/// Environment variable holding the key file path.
pub const CREDENTIALS_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";

/// Key file path used when [`CREDENTIALS_ENV`] is unset.
pub const DEFAULT_KEY_PATH: &str = "/path/to/key.json";

fn default_token_uri() -> String {
    crate::network::DEFAULT_TOKEN_URI.to_string()
}

/// A service-account JSON key file.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceAccountKey {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub key_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key_id: Option<String>,
    /// PEM-encoded RSA private key (PKCS#8 or PKCS#1).
    pub private_key: String,
    /// Service identity; used as the `iss` of every token.
    pub client_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl ServiceAccountKey {
    /// Parse a key from its JSON text.
    pub fn from_json(json: &str) -> Result<Self, AuthError> {
        serde_json::from_str(json).map_err(|e| AuthError::KeyFile {
            path: "<inline>".to_string(),
            reason: e.to_string(),
        })
    }

    /// Read and parse a key file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AuthError> {
        let path = path.as_ref();
        let key_file_error = |reason: String| AuthError::KeyFile {
            path: path.display().to_string(),
            reason,
        };
        let text = std::fs::read_to_string(path).map_err(|e| key_file_error(e.to_string()))?;
        serde_json::from_str(&text).map_err(|e| key_file_error(e.to_string()))
    }

    /// Load the key named by `GOOGLE_APPLICATION_CREDENTIALS`, or the default path.
    pub fn from_env() -> Result<Self, AuthError> {
        Self::from_file(key_path_from_env())
    }

    /// Parse the private key for RS256 signing.
    pub fn encoding_key(&self) -> Result<EncodingKey, AuthError> {
        EncodingKey::from_rsa_pem(self.private_key.as_bytes())
            .map_err(|e| AuthError::InvalidKey(e.to_string()))
    }

    /// RS256 JWT header carrying this key's ID.
    pub fn jwt_header(&self) -> Header {
        let mut header = Header::new(jsonwebtoken::Algorithm::RS256);
        header.kid = self.private_key_id.clone();
        header
    }
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key_id", &self.private_key_id)
            .field("project_id", &self.project_id)
            .field("token_uri", &self.token_uri)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Key file path from the environment, or [`DEFAULT_KEY_PATH`].
pub fn key_path_from_env() -> PathBuf {
    std::env::var(CREDENTIALS_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_KEY_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_JSON: &str = include_str!("../../tests/fixtures/service_account.json");

    #[test]
    fn test_parse_key_file() {
        let key = ServiceAccountKey::from_json(KEY_JSON).unwrap();
        assert_eq!(key.client_email, "wallet-issuer@wallet-demo.iam.gserviceaccount.com");
        assert_eq!(key.token_uri, "https://oauth2.googleapis.com/token");
        assert!(key.encoding_key().is_ok());
    }

    #[test]
    fn test_token_uri_defaults_when_absent() {
        let key = ServiceAccountKey::from_json(
            r#"{"client_email": "a@b.iam.gserviceaccount.com", "private_key": "x"}"#,
        )
        .unwrap();
        assert_eq!(key.token_uri, crate::network::DEFAULT_TOKEN_URI);
    }

    #[test]
    fn test_malformed_private_key_is_rejected() {
        let key = ServiceAccountKey::from_json(
            r#"{"client_email": "a@b.iam.gserviceaccount.com", "private_key": "not a pem"}"#,
        )
        .unwrap();
        assert!(matches!(key.encoding_key(), Err(AuthError::InvalidKey(_))));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = ServiceAccountKey::from_file("/nonexistent/key.json").unwrap_err();
        match err {
            AuthError::KeyFile { path, .. } => assert_eq!(path, "/nonexistent/key.json"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let key = ServiceAccountKey::from_json(KEY_JSON).unwrap();
        let debug = format!("{key:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("BEGIN PRIVATE KEY"));
    }

    #[test]
    fn test_header_carries_key_id() {
        let key = ServiceAccountKey::from_json(KEY_JSON).unwrap();
        let header = key.jwt_header();
        assert_eq!(header.alg, jsonwebtoken::Algorithm::RS256);
        assert_eq!(header.kid, key.private_key_id);
    }
}
