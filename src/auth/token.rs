//! OAuth2 access tokens for a service account (JWT-bearer grant).
//!
//! The provider signs a one-hour assertion with the service-account key,
//! exchanges it at the key's `token_uri`, and caches the access token until
//! shortly before it expires.

use std::sync::Arc;

use async_lock::RwLock;
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::auth::ServiceAccountKey;
use crate::error::AuthError;

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime requested for each assertion.
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// A cached token is refreshed once it is this close to expiry.
const REFRESH_MARGIN_SECS: i64 = 60;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub(crate) struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

/// A bearer token and its expiry.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    fn is_fresh(&self) -> bool {
        Utc::now() + Duration::seconds(REFRESH_MARGIN_SECS) < self.expires_at
    }
}

/// Exchanges service-account assertions for cached access tokens.
#[derive(Clone)]
pub struct TokenProvider {
    key: Arc<ServiceAccountKey>,
    scope: String,
    client: Client,
    cached: Arc<RwLock<Option<AccessToken>>>,
}

impl TokenProvider {
    pub fn new(key: Arc<ServiceAccountKey>, scope: impl Into<String>, client: Client) -> Self {
        Self {
            key,
            scope: scope.into(),
            client,
            cached: Arc::new(RwLock::new(None)),
        }
    }

    /// Build and sign the assertion for a token request issued at `now`.
    pub fn assertion(&self, now: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = AssertionClaims {
            iss: self.key.client_email.clone(),
            scope: self.scope.clone(),
            aud: self.key.token_uri.clone(),
            iat: now.timestamp(),
            exp: now.timestamp() + ASSERTION_LIFETIME_SECS,
        };
        let encoding_key = self.key.encoding_key()?;
        jsonwebtoken::encode(&self.key.jwt_header(), &claims, &encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// A valid access token, exchanging a new assertion when the cache is stale.
    pub async fn access_token(&self) -> Result<String, AuthError> {
        if let Some(token) = self.cached.read().await.as_ref() {
            if token.is_fresh() {
                return Ok(token.token.clone());
            }
        }

        let mut slot = self.cached.write().await;
        // Another caller may have refreshed while we waited for the lock.
        if let Some(token) = slot.as_ref() {
            if token.is_fresh() {
                return Ok(token.token.clone());
            }
        }

        let fresh = self.exchange().await?;
        let token = fresh.token.clone();
        *slot = Some(fresh);
        Ok(token)
    }

    /// Drop the cached token so the next call performs a fresh exchange.
    pub async fn invalidate(&self) {
        *self.cached.write().await = None;
    }

    async fn exchange(&self) -> Result<AccessToken, AuthError> {
        let now = Utc::now();
        let assertion = self.assertion(now)?;

        tracing::debug!(
            token_uri = %self.key.token_uri,
            client_email = %self.key.client_email,
            "Exchanging service account assertion"
        );

        let response = self
            .client
            .post(&self.key.token_uri)
            .form(&[
                ("grant_type", JWT_BEARER_GRANT),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::TokenExchange(format!("HTTP {}: {}", status, body)));
        }

        let parsed: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::TokenExchange(format!("Failed to parse response: {}", e)))?;

        let lifetime = parsed.expires_in.unwrap_or(ASSERTION_LIFETIME_SECS);
        Ok(AccessToken {
            token: parsed.access_token,
            expires_at: now + Duration::seconds(lifetime),
        })
    }
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider")
            .field("client_email", &self.key.client_email)
            .field("scope", &self.scope)
            .finish()
    }
}
