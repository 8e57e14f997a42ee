//! High-level client: `WalletClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, the credential state, and the
//! existence-checked resource operations the sub-clients share.

use crate::auth::token::TokenProvider;
use crate::auth::ServiceAccountKey;
use crate::config::WalletConfig;
use crate::domain::common::{AddMessageRequest, Message};
use crate::domain::save_link::client::Links;
use crate::domain::save_link::SaveLinkIssuer;
use crate::domain::transit_class::client::Classes;
use crate::domain::transit_object::client::Objects;
use crate::domain::{CreateOutcome, WalletResource};
use crate::error::{HttpError, SdkError};
use crate::http::batch::BatchItemResult;
use crate::http::client::DEFAULT_TIMEOUT;
use crate::http::WalletHttp;
use crate::shared::ResourceId;

use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::domain::save_link::client::Links as LinksClient;
pub use crate::domain::transit_class::client::Classes as ClassesClient;
pub use crate::domain::transit_object::client::Objects as ObjectsClient;

/// The primary entry point for the SDK.
///
/// Provides nested sub-client accessors for each resource:
/// `client.classes()`, `client.objects()`, `client.links()`.
pub struct WalletClient {
    pub(crate) http: WalletHttp,
    /// Exchanges the service-account key for access tokens. `None` when a
    /// static bearer token was supplied.
    pub(crate) tokens: Option<TokenProvider>,
    /// Signs save-to-wallet links. `None` without a service-account key.
    pub(crate) issuer: Option<SaveLinkIssuer>,
    pub(crate) origins: Vec<String>,
}

impl WalletClient {
    pub fn builder() -> WalletClientBuilder {
        WalletClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn classes(&self) -> Classes<'_> {
        Classes { client: self }
    }

    pub fn objects(&self) -> Objects<'_> {
        Objects { client: self }
    }

    pub fn links(&self) -> Links<'_> {
        Links { client: self }
    }

    /// The low-level HTTP client.
    pub fn http(&self) -> &WalletHttp {
        &self.http
    }

    // ── Shared resource operations ───────────────────────────────────────

    /// Refresh the bearer token on the HTTP client if it is stale.
    pub(crate) async fn authorize(&self) -> Result<(), SdkError> {
        if let Some(tokens) = &self.tokens {
            let token = tokens.access_token().await?;
            self.http.set_auth_token(Some(token)).await;
        }
        Ok(())
    }

    pub(crate) async fn fetch<R: WalletResource>(&self, id: &ResourceId) -> Result<R, SdkError> {
        self.authorize().await?;
        match self.http.get_resource::<R>(id).await {
            Ok(resource) => Ok(resource),
            Err(e) => Err(self.fail::<R>("get", id, e.into()).await),
        }
    }

    /// Insert `resource` unless a resource with its ID already exists.
    pub(crate) async fn create<R: WalletResource>(
        &self,
        resource: R,
    ) -> Result<CreateOutcome<R>, SdkError> {
        let id = resource.resource_id().clone();
        self.authorize().await?;

        match self.http.get_resource::<R>(&id).await {
            Ok(existing) => {
                tracing::info!(collection = %R::collection(), id = %id, "Resource already exists");
                return Ok(CreateOutcome::Existing(existing));
            }
            Err(HttpError::NotFound(_)) => {}
            Err(e) => return Err(self.fail::<R>("get", &id, e.into()).await),
        }

        match self.http.insert_resource(&resource).await {
            Ok(created) => {
                tracing::info!(collection = %R::collection(), id = %id, "Resource created");
                Ok(CreateOutcome::Created(created))
            }
            Err(e) => Err(self.fail::<R>("insert", &id, e.into()).await),
        }
    }

    /// Fetch, apply `mutate`, and `PUT` the whole record back.
    pub(crate) async fn update<R, F>(&self, id: &ResourceId, mutate: F) -> Result<R, SdkError>
    where
        R: WalletResource,
        F: FnOnce(&mut R),
    {
        let mut resource = self.fetch::<R>(id).await?;
        mutate(&mut resource);

        if resource.resource_id() != id {
            return Err(SdkError::Validation(format!(
                "update of {} must not change its id (got {})",
                id,
                resource.resource_id()
            )));
        }

        match self.http.update_resource(&resource).await {
            Ok(updated) => {
                tracing::info!(collection = %R::collection(), id = %id, "Resource updated");
                Ok(updated)
            }
            Err(e) => Err(self.fail::<R>("update", id, e.into()).await),
        }
    }

    /// Fetch, build a partial body from the current record, and `PATCH` it.
    pub(crate) async fn patch<R, B, F>(&self, id: &ResourceId, build: F) -> Result<R, SdkError>
    where
        R: WalletResource,
        B: Serialize,
        F: FnOnce(&R) -> B,
    {
        let current = self.fetch::<R>(id).await?;
        let body = build(&current);

        match self.http.patch_resource::<R, B>(id, &body).await {
            Ok(patched) => {
                tracing::info!(collection = %R::collection(), id = %id, "Resource patched");
                Ok(patched)
            }
            Err(e) => Err(self.fail::<R>("patch", id, e.into()).await),
        }
    }

    pub(crate) async fn add_message<R: WalletResource>(
        &self,
        id: &ResourceId,
        message: Message,
    ) -> Result<R, SdkError> {
        self.fetch::<R>(id).await?;
        let request = AddMessageRequest { message };

        match self.http.add_message::<R>(id, &request).await {
            Ok(response) => {
                tracing::info!(collection = %R::collection(), id = %id, "Message added");
                Ok(response.resource)
            }
            Err(e) => Err(self.fail::<R>("addMessage", id, e.into()).await),
        }
    }

    /// Insert every resource in one batch call. Item failures are logged and
    /// returned, never raised.
    pub(crate) async fn batch_insert<R: WalletResource>(
        &self,
        resources: &[R],
    ) -> Result<Vec<BatchItemResult>, SdkError> {
        if resources.is_empty() {
            return Ok(Vec::new());
        }

        let requests = resources
            .iter()
            .map(|r| self.http.batch_insert_request(r))
            .collect::<Result<Vec<_>, _>>()?;

        self.authorize().await?;
        let results = match self.http.batch(&requests).await {
            Ok(results) => results,
            Err(e) => {
                let err = SdkError::from(e);
                tracing::error!(collection = %R::collection(), error = %err, "Batch request failed");
                return Err(err);
            }
        };

        for item in &results {
            match &item.outcome {
                Ok(_) => tracing::info!(
                    collection = %R::collection(),
                    id = item.id().unwrap_or_default(),
                    "Batch item created"
                ),
                Err(error) => tracing::error!(
                    collection = %R::collection(),
                    content_id = item.content_id.as_deref().unwrap_or_default(),
                    status = item.status,
                    reason = error.reason().unwrap_or_default(),
                    "Batch item failed: {}",
                    error.message
                ),
            }
        }

        Ok(results)
    }

    /// Log a failed call and drop a rejected access token.
    async fn fail<R: WalletResource>(&self, op: &str, id: &ResourceId, err: SdkError) -> SdkError {
        if err.is_not_found() {
            tracing::warn!(op, collection = %R::collection(), id = %id, "Resource not found");
        } else {
            tracing::error!(op, collection = %R::collection(), id = %id, error = %err, "Request failed");
        }

        if let (SdkError::Http(HttpError::Unauthorized(_)), Some(tokens)) = (&err, &self.tokens) {
            tokens.invalidate().await;
        }
        err
    }
}

impl Clone for WalletClient {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            tokens: self.tokens.clone(),
            issuer: self.issuer.clone(),
            origins: self.origins.clone(),
        }
    }
}

impl std::fmt::Debug for WalletClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletClient")
            .field("http", &self.http)
            .field("tokens", &self.tokens)
            .field("can_issue_links", &self.issuer.is_some())
            .field("origins", &self.origins)
            .finish()
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct WalletClientBuilder {
    api_url: String,
    batch_url: String,
    timeout: Duration,
    scope: String,
    service_account: Option<ServiceAccountKey>,
    credentials_file: Option<PathBuf>,
    bearer_token: Option<String>,
    origins: Vec<String>,
}

impl Default for WalletClientBuilder {
    fn default() -> Self {
        Self {
            api_url: crate::network::DEFAULT_API_URL.to_string(),
            batch_url: crate::network::DEFAULT_BATCH_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            scope: crate::network::WALLET_ISSUER_SCOPE.to_string(),
            service_account: None,
            credentials_file: None,
            bearer_token: None,
            origins: Vec::new(),
        }
    }
}

impl WalletClientBuilder {
    /// Start from an environment-derived configuration.
    pub fn from_config(config: &WalletConfig) -> Self {
        Self::default()
            .api_url(&config.api_url)
            .batch_url(&config.batch_url)
            .credentials_file(config.key_path.clone())
            .origins(config.origins.clone())
    }

    pub fn api_url(mut self, url: &str) -> Self {
        self.api_url = url.to_string();
        self
    }

    pub fn batch_url(mut self, url: &str) -> Self {
        self.batch_url = url.to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn scope(mut self, scope: &str) -> Self {
        self.scope = scope.to_string();
        self
    }

    /// Authenticate and sign links with this key.
    pub fn service_account(mut self, key: ServiceAccountKey) -> Self {
        self.service_account = Some(key);
        self
    }

    /// Load the service-account key from `path` on [`build`](Self::build).
    /// Ignored when a key was given directly.
    pub fn credentials_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_file = Some(path.into());
        self
    }

    /// Send this bearer token instead of exchanging the key for one.
    pub fn bearer_token(mut self, token: &str) -> Self {
        self.bearer_token = Some(token.to_string());
        self
    }

    /// Origins embedded in issued save links.
    pub fn origins(mut self, origins: Vec<String>) -> Self {
        self.origins = origins;
        self
    }

    pub fn build(self) -> Result<WalletClient, SdkError> {
        let http = WalletHttp::new(&self.api_url, &self.batch_url, self.timeout)?;

        let key = match (self.service_account, self.credentials_file) {
            (Some(key), _) => Some(key),
            (None, Some(path)) => Some(ServiceAccountKey::from_file(path)?),
            (None, None) => None,
        };

        let issuer = key.as_ref().map(SaveLinkIssuer::new).transpose()?;

        let (http, tokens) = match (self.bearer_token, key) {
            (Some(token), _) => (http.with_static_token(token), None),
            (None, Some(key)) => {
                let tokens = TokenProvider::new(Arc::new(key), self.scope, http.client().clone());
                (http, Some(tokens))
            }
            (None, None) => (http, None),
        };

        Ok(WalletClient {
            http,
            tokens,
            issuer,
            origins: self.origins,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthError;

    const KEY_JSON: &str = include_str!("../tests/fixtures/service_account.json");

    #[test]
    fn test_build_without_credentials() {
        let client = WalletClient::builder().build().unwrap();
        assert!(client.tokens.is_none());
        assert!(client.issuer.is_none());
        assert_eq!(client.http().api_url(), crate::network::DEFAULT_API_URL);
    }

    #[test]
    fn test_build_with_key_enables_tokens_and_links() {
        let client = WalletClient::builder()
            .service_account(ServiceAccountKey::from_json(KEY_JSON).unwrap())
            .build()
            .unwrap();
        assert!(client.tokens.is_some());
        assert!(client.issuer.is_some());
    }

    #[test]
    fn test_static_bearer_token_replaces_exchange() {
        let client = WalletClient::builder()
            .service_account(ServiceAccountKey::from_json(KEY_JSON).unwrap())
            .bearer_token("static")
            .build()
            .unwrap();
        assert!(client.tokens.is_none());
        assert!(client.issuer.is_some());
    }

    #[test]
    fn test_missing_key_file_fails_build() {
        let err = WalletClient::builder()
            .credentials_file("/nonexistent/key.json")
            .build()
            .unwrap_err();
        assert!(matches!(err, SdkError::Auth(AuthError::KeyFile { .. })));
    }

    #[test]
    fn test_from_config_carries_urls_and_origins() {
        let config = WalletConfig {
            key_path: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/service_account.json")),
            issuer_id: Some("3388000000022125581".to_string()),
            origins: vec!["www.example.com".to_string()],
            api_url: "http://localhost:9000/walletobjects/v1".to_string(),
            batch_url: "http://localhost:9000/batch".to_string(),
        };
        let client = WalletClientBuilder::from_config(&config).build().unwrap();
        assert_eq!(client.http().api_url(), "http://localhost:9000/walletobjects/v1");
        assert_eq!(client.http().batch_url(), "http://localhost:9000/batch");
        assert_eq!(client.origins, vec!["www.example.com"]);
        assert!(client.issuer.is_some());
    }
}
