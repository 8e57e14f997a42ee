//! Low-level HTTP client: `WalletHttp`.
//!
//! One method per REST endpoint. Existence checks, merges and logging of
//! outcomes happen in the sub-clients; this layer only moves JSON and
//! classifies remote errors.

use crate::domain::common::{AddMessageRequest, AddMessageResponse};
use crate::domain::WalletResource;
use crate::error::{HttpError, SdkError};
use crate::http::batch::{self, BatchItemResult, BatchRequest};
use crate::shared::ResourceId;

use async_lock::RwLock;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Low-level HTTP client for the wallet objects REST API.
pub struct WalletHttp {
    api_url: String,
    /// Path component of `api_url`, used inside batch parts.
    api_path: String,
    batch_url: String,
    client: Client,
    /// Bearer token. NEVER exposed publicly.
    auth_token: Arc<RwLock<Option<String>>>,
}

impl WalletHttp {
    pub fn new(api_url: &str, batch_url: &str, timeout: Duration) -> Result<Self, SdkError> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .build()
            .map_err(HttpError::from)?;
        Self::with_client(client, api_url, batch_url)
    }

    /// Build on an existing `reqwest` client (shares its connection pool).
    pub fn with_client(client: Client, api_url: &str, batch_url: &str) -> Result<Self, SdkError> {
        let api_url = api_url.trim_end_matches('/').to_string();
        let parsed = reqwest::Url::parse(&api_url)
            .map_err(|e| SdkError::Config(format!("Invalid API URL '{}': {}", api_url, e)))?;
        reqwest::Url::parse(batch_url)
            .map_err(|e| SdkError::Config(format!("Invalid batch URL '{}': {}", batch_url, e)))?;

        Ok(Self {
            api_path: parsed.path().trim_end_matches('/').to_string(),
            api_url,
            batch_url: batch_url.to_string(),
            client,
            auth_token: Arc::new(RwLock::new(None)),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn batch_url(&self) -> &str {
        &self.batch_url
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    pub(crate) async fn set_auth_token(&self, token: Option<String>) {
        *self.auth_token.write().await = token;
    }

    /// Use a fixed bearer token instead of exchanged ones.
    pub(crate) fn with_static_token(mut self, token: String) -> Self {
        self.auth_token = Arc::new(RwLock::new(Some(token)));
        self
    }

    fn collection_url<R: WalletResource>(&self) -> String {
        format!("{}/{}", self.api_url, R::collection())
    }

    fn resource_url<R: WalletResource>(&self, id: &ResourceId) -> String {
        format!(
            "{}/{}/{}",
            self.api_url,
            R::collection(),
            urlencoding::encode(id.as_str())
        )
    }

    // ── Resources ────────────────────────────────────────────────────────

    pub async fn get_resource<R: WalletResource>(&self, id: &ResourceId) -> Result<R, HttpError> {
        let url = self.resource_url::<R>(id);
        self.do_request(&Method::GET, &url, None::<&()>).await
    }

    pub async fn insert_resource<R: WalletResource>(&self, resource: &R) -> Result<R, HttpError> {
        let url = self.collection_url::<R>();
        self.do_request(&Method::POST, &url, Some(resource)).await
    }

    /// `PUT`: replaces every attribute of the stored resource.
    pub async fn update_resource<R: WalletResource>(&self, resource: &R) -> Result<R, HttpError> {
        let url = self.resource_url::<R>(resource.resource_id());
        self.do_request(&Method::PUT, &url, Some(resource)).await
    }

    /// `PATCH`: merges `body` into the stored resource.
    pub async fn patch_resource<R: WalletResource, B: Serialize>(
        &self,
        id: &ResourceId,
        body: &B,
    ) -> Result<R, HttpError> {
        let url = self.resource_url::<R>(id);
        self.do_request(&Method::PATCH, &url, Some(body)).await
    }

    pub async fn add_message<R: WalletResource>(
        &self,
        id: &ResourceId,
        request: &AddMessageRequest,
    ) -> Result<AddMessageResponse<R>, HttpError> {
        let url = format!("{}/addMessage", self.resource_url::<R>(id));
        self.do_request(&Method::POST, &url, Some(request)).await
    }

    // ── Batch ────────────────────────────────────────────────────────────

    /// An insert of `resource` framed for [`WalletHttp::batch`].
    pub fn batch_insert_request<R: WalletResource>(
        &self,
        resource: &R,
    ) -> Result<BatchRequest, serde_json::Error> {
        BatchRequest::insert(&self.api_path, resource)
    }

    /// Send `requests` as one multipart call. Per-item failures are returned
    /// in the results, not as an error.
    pub async fn batch(&self, requests: &[BatchRequest]) -> Result<Vec<BatchItemResult>, HttpError> {
        let boundary = batch::new_boundary();
        let body = batch::encode_batch(&boundary, requests);

        tracing::debug!(items = requests.len(), url = %self.batch_url, "Sending batch request");

        let req = self
            .authorize(self.client.post(&self.batch_url))
            .await
            .header(reqwest::header::CONTENT_TYPE, batch::content_type(&boundary))
            .body(body);

        let resp = req.send().await?;
        let status = resp.status();
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(HttpError::from_response(status.as_u16(), &text));
        }

        batch::parse_batch_response(&content_type, &text)
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.auth_token.read().await.as_ref() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Send once. Failures are classified, never retried.
    async fn do_request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: &Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<T, HttpError> {
        let mut req = self.authorize(self.client.request(method.clone(), url)).await;

        if let Some(b) = body {
            req = req.json(b);
        }

        tracing::debug!(%method, url, "Sending request");

        let resp = req.send().await?;
        let status = resp.status();

        if status.is_success() {
            let parsed = resp.json::<T>().await?;
            return Ok(parsed);
        }

        let body_text = resp.text().await.unwrap_or_default();
        Err(HttpError::from_response(status.as_u16(), &body_text))
    }
}

impl Clone for WalletHttp {
    fn clone(&self) -> Self {
        Self {
            api_url: self.api_url.clone(),
            api_path: self.api_path.clone(),
            batch_url: self.batch_url.clone(),
            client: self.client.clone(),
            auth_token: self.auth_token.clone(),
        }
    }
}

impl std::fmt::Debug for WalletHttp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletHttp")
            .field("api_url", &self.api_url)
            .field("batch_url", &self.batch_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transit_class::TransitClass;
    use crate::domain::transit_object::TransitObject;

    fn http() -> WalletHttp {
        WalletHttp::new(
            crate::network::DEFAULT_API_URL,
            crate::network::DEFAULT_BATCH_URL,
            DEFAULT_TIMEOUT,
        )
        .unwrap()
    }

    #[test]
    fn test_resource_urls() {
        let http = http();
        let id = ResourceId::new("3388000000022125581", "myClass");
        assert_eq!(
            http.resource_url::<TransitClass>(&id),
            "https://walletobjects.googleapis.com/walletobjects/v1/transitClass/3388000000022125581.myClass"
        );
        assert_eq!(
            http.collection_url::<TransitObject>(),
            "https://walletobjects.googleapis.com/walletobjects/v1/transitObject"
        );
    }

    #[test]
    fn test_batch_parts_use_api_path() {
        let http = http();
        let object = TransitObject::new(ResourceId::new("1", "a"), ResourceId::new("1", "b"));
        let request = http.batch_insert_request(&object).unwrap();
        assert_eq!(request.path, "/walletobjects/v1/transitObject");
    }

    #[test]
    fn test_invalid_api_url_is_config_error() {
        let err = WalletHttp::new("not a url", crate::network::DEFAULT_BATCH_URL, DEFAULT_TIMEOUT)
            .unwrap_err();
        assert!(matches!(err, SdkError::Config(_)));
    }
}
