//! HTTP client with bearer token injection.
//!
//! Thin wrapper over `reqwest` that owns the backend base URL and the
//! in-memory access token. The token is read at call time; persisting it
//! between invocations is the session module's job.

use reqwest::{Client, Response};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

/// HTTP client wrapper for SecureVault backend communication.
///
/// Attaches `Authorization: Bearer <token>` to every authenticated request
/// once a token has been set.
pub struct ApiClient {
    client: Client,
    base_url: String,
    access_token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    /// Create a new API client with the given base URL.
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: Arc::new(RwLock::new(None)),
        }
    }

    /// Store the access token for authenticated requests.
    pub async fn set_access_token(&self, token: String) {
        let mut guard = self.access_token.write().await;
        *guard = Some(token);
    }

    /// Clear the access token (used on logout).
    pub async fn clear_access_token(&self) {
        let mut guard = self.access_token.write().await;
        *guard = None;
    }

    /// Send an unauthenticated POST request with a JSON body.
    /// Used for login and register where no access token exists yet.
    pub async fn post<T: Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Response, reqwest::Error> {
        let url = format!("{}{}", self.base_url, path);
        self.client.post(&url).json(body).send().await
    }

    /// Send an authenticated GET request to a relative API path.
    pub async fn authenticated_get(&self, path: &str) -> Result<Response, reqwest::Error> {
        let url = format!("{}{}", self.base_url, path);
        let token = self.access_token.read().await;

        let mut builder = self.client.get(&url);
        if let Some(ref t) = *token {
            builder = builder.bearer_auth(t);
        }
        builder.send().await
    }

    /// Send an authenticated POST request with a JSON body to a relative API path.
    pub async fn authenticated_post<T: Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Response, reqwest::Error> {
        let url = format!("{}{}", self.base_url, path);
        let token = self.access_token.read().await;

        let mut builder = self.client.post(&url).json(body);
        if let Some(ref t) = *token {
            builder = builder.bearer_auth(t);
        }
        builder.send().await
    }

    /// Send an authenticated DELETE request to a relative API path.
    pub async fn authenticated_delete(&self, path: &str) -> Result<Response, reqwest::Error> {
        let url = format!("{}{}", self.base_url, path);
        let token = self.access_token.read().await;

        let mut builder = self.client.delete(&url);
        if let Some(ref t) = *token {
            builder = builder.bearer_auth(t);
        }
        builder.send().await
    }

    /// Send an authenticated multipart POST request (file uploads).
    pub async fn authenticated_multipart_post(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<Response, reqwest::Error> {
        let url = format!("{}{}", self.base_url, path);
        let token = self.access_token.read().await;

        let mut builder = self.client.post(&url).multipart(form);
        if let Some(ref t) = *token {
            builder = builder.bearer_auth(t);
        }
        builder.send().await
    }
}
