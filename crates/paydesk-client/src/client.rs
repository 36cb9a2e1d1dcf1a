//! Paydesk HTTP client implementation.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Payments platform API client.
///
/// Resource methods live in the `api` modules; this type owns the
/// transport, authentication, and error mapping they share.
#[derive(Debug, Clone)]
pub struct PaydeskClient {
    http: Client,
    base: Url,
    token: Option<String>,
}

impl PaydeskClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the platform API (e.g., `"https://api.example.com/api"`)
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Configuration` if the URL is invalid.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_options(base_url, ClientOptions::default())
    }

    /// Create a new client with custom options.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Configuration` if the URL is invalid or the HTTP
    /// client cannot be built.
    pub fn with_options(base_url: &str, options: ClientOptions) -> Result<Self, ClientError> {
        let base = Url::parse(base_url.trim()).map_err(|e| {
            ClientError::Configuration(format!("invalid base URL {base_url:?}: {e}"))
        })?;
        if base.cannot_be_a_base() {
            return Err(ClientError::Configuration(format!(
                "base URL cannot carry paths: {base_url}"
            )));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .user_agent(options.user_agent)
            .build()
            .map_err(|e| ClientError::Configuration(e.to_string()))?;

        Ok(Self {
            http,
            base,
            token: options.token,
        })
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base.as_str().trim_end_matches('/')
    }

    /// Attach a bearer token to every subsequent request.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Stop sending a bearer token.
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Builder-style [`Self::set_token`].
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.set_token(token);
        self
    }

    /// Whether a bearer token is configured.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    // =========================================================================
    // Transport helpers used by the resource modules
    // =========================================================================

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &[&str]) -> Result<T, ClientError> {
        let response = self.request(Method::GET, path)?.send().await?;
        handle_response(response).await
    }

    pub(crate) async fn get_query<T, Q>(&self, path: &[&str], query: &Q) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self.request(Method::GET, path)?.query(query).send().await?;
        handle_response(response).await
    }

    pub(crate) async fn post<B, T>(&self, path: &[&str], body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.request(Method::POST, path)?.json(body).send().await?;
        handle_response(response).await
    }

    pub(crate) async fn post_empty<T: DeserializeOwned>(
        &self,
        path: &[&str],
    ) -> Result<T, ClientError> {
        let response = self.request(Method::POST, path)?.send().await?;
        handle_response(response).await
    }

    /// POST whose response body is irrelevant.
    pub(crate) async fn post_discard<B: Serialize + ?Sized>(
        &self,
        path: &[&str],
        body: &B,
    ) -> Result<(), ClientError> {
        let response = self.request(Method::POST, path)?.json(body).send().await?;
        check_status(response).await.map(drop)
    }

    pub(crate) async fn put<B, T>(&self, path: &[&str], body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.request(Method::PUT, path)?.json(body).send().await?;
        handle_response(response).await
    }

    pub(crate) async fn delete(&self, path: &[&str]) -> Result<(), ClientError> {
        let response = self.request(Method::DELETE, path)?.send().await?;
        check_status(response).await.map(drop)
    }

    fn request(&self, method: Method, path: &[&str]) -> Result<RequestBuilder, ClientError> {
        let url = self.url(path)?;
        tracing::debug!(method = %method, url = %url, "Sending platform request");

        let mut builder = self
            .http
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    /// Append percent-encoded path segments to the base URL.
    fn url(&self, path: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::Configuration("base URL cannot carry paths".into()))?
            .pop_if_empty()
            .extend(path);
        Ok(url)
    }
}

/// Payloads may arrive bare or wrapped in `{ "data": ... }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

/// Handle API response and convert errors.
async fn handle_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let bytes = check_status(response).await?;
    let envelope: Envelope<T> = serde_json::from_slice(&bytes)?;
    Ok(envelope.into_inner())
}

/// Return the body of a successful response, or the mapped error.
async fn check_status(response: reqwest::Response) -> Result<Vec<u8>, ClientError> {
    let status = response.status();
    let body = response.bytes().await?.to_vec();

    if status.is_success() {
        return Ok(body);
    }

    let message = serde_json::from_slice::<serde_json::Value>(&body)
        .ok()
        .and_then(|value| extract_error_message(&value))
        .unwrap_or_else(|| format!("HTTP {status}"));

    tracing::warn!(status = %status, message = %message, "Platform request failed");

    Err(match status.as_u16() {
        401 => ClientError::Unauthorized { message },
        404 => ClientError::NotFound { message },
        code => ClientError::Api {
            status: code,
            message,
        },
    })
}

/// Pull a human-readable message out of an error body.
///
/// Looks at `message`, then `error` (string or object with `message`), then the
/// first entry of `errors` (string or object with `message`/`msg`).
#[must_use]
pub fn extract_error_message(body: &serde_json::Value) -> Option<String> {
    fn non_empty(value: Option<&serde_json::Value>) -> Option<String> {
        value
            .and_then(serde_json::Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    if let Some(message) = non_empty(body.get("message")) {
        return Some(message);
    }

    if let Some(error) = body.get("error") {
        if let Some(message) = non_empty(Some(error)).or_else(|| non_empty(error.get("message"))) {
            return Some(message);
        }
    }

    let first = body.get("errors")?.as_array()?.first()?;
    non_empty(Some(first))
        .or_else(|| non_empty(first.get("message")))
        .or_else(|| non_empty(first.get("msg")))
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
    /// User agent header.
    pub user_agent: String,
    /// Bearer token to start with.
    pub token: Option<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: concat!("paydesk/", env!("CARGO_PKG_VERSION")).to_string(),
            token: None,
        }
    }
}

impl ClientOptions {
    /// Options carrying a bearer token.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::default()
        }
    }
}
