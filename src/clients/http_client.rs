//! HTTP client for commerce API communication.
//!
//! This module provides the [`HttpClient`] type, the transport every SDK
//! module sends its requests through.

use std::collections::HashMap;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::de::DeserializeOwned;

use crate::auth::{CredentialStore, Token};
use crate::clients::errors::{HttpError, HttpResponseError, MaxHttpRetriesExceededError};
use crate::clients::http_request::{HttpMethod, HttpRequest, RequestAuth};
use crate::clients::http_response::HttpResponse;
use crate::config::{AuthMode, BaseUrl, ClientConfig};

/// Fixed retry wait time in seconds.
pub const RETRY_WAIT_TIME: u64 = 1;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Header carrying the publishable key.
pub const PUBLISHABLE_KEY_HEADER: &str = "x-publishable-api-key";

/// HTTP client for making requests to the commerce API.
///
/// The client handles:
/// - URL construction from the configured base URL
/// - Default headers (User-Agent, Accept, global headers, publishable key)
/// - Credential attachment per request, read from the shared
///   [`CredentialStore`] in bearer mode
/// - Cookie persistence in session mode
/// - Automatic retry logic for 429 and 500 responses
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use commerce_sdk::{BaseUrl, ClientConfig, MemoryCredentialStore};
/// use commerce_sdk::clients::{HttpClient, HttpMethod, HttpRequest};
///
/// let config = ClientConfig::builder()
///     .base_url(BaseUrl::new("http://localhost:9000").unwrap())
///     .build()
///     .unwrap();
/// let client = HttpClient::new(&config, Arc::new(MemoryCredentialStore::new()))?;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "/store/regions").build()?;
/// let response = client.request(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URL every request path is appended to.
    base_url: BaseUrl,
    /// Fixed at construction.
    auth_mode: AuthMode,
    /// Basic credentials derived from the secret API key.
    api_key_header: Option<String>,
    /// Default headers to include in all requests, keyed by lowercase name.
    default_headers: HashMap<String, String>,
    /// Credential slot shared with the auth service.
    credentials: Arc<dyn CredentialStore>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Arguments
    ///
    /// * `config` - Base URL, auth mode, keys and headers
    /// * `credentials` - The store the client reads bearer tokens from
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(
        config: &ClientConfig,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Commerce SDK v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("user-agent".to_string(), user_agent);
        default_headers.insert("accept".to_string(), "application/json".to_string());

        for (key, value) in config.global_headers() {
            default_headers.insert(key.to_ascii_lowercase(), value.clone());
        }

        if let Some(key) = config.publishable_key() {
            default_headers.insert(PUBLISHABLE_KEY_HEADER.to_string(), key.as_ref().to_string());
        }

        let api_key_header = config
            .api_key()
            .map(|key| format!("Basic {}", STANDARD.encode(format!("{}:", key.as_ref()))));

        let mut builder = reqwest::Client::builder()
            .use_rustls_tls()
            .cookie_store(config.auth_mode() == AuthMode::Session);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        tracing::debug!(
            base_url = %config.base_url(),
            auth_mode = %config.auth_mode(),
            "Created commerce HTTP client"
        );

        Ok(Self {
            client,
            base_url: config.base_url().clone(),
            auth_mode: config.auth_mode(),
            api_key_header,
            default_headers,
            credentials,
        })
    }

    /// Returns the base URL for this client.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the authentication mode this client was built with.
    #[must_use]
    pub const fn auth_mode(&self) -> AuthMode {
        self.auth_mode
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the credential store this client reads from.
    #[must_use]
    pub const fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    /// Resolves the full header set for a request.
    ///
    /// Precedence, lowest first: defaults (including global headers and the
    /// publishable key), API key, credential, per-request extra headers.
    #[must_use]
    pub fn resolve_headers(&self, request: &HttpRequest) -> HashMap<String, String> {
        let mut headers = self.default_headers.clone();

        if request.body.is_some() {
            headers.insert("content-type".to_string(), "application/json".to_string());
        }

        match &request.auth {
            RequestAuth::Explicit(token) => {
                headers.insert("authorization".to_string(), bearer(token));
            }
            RequestAuth::Ambient => {
                if let Some(basic) = &self.api_key_header {
                    headers.insert("authorization".to_string(), basic.clone());
                }
                if self.auth_mode == AuthMode::Bearer {
                    if let Some(token) = self.credentials.get() {
                        headers.insert("authorization".to_string(), bearer(&token));
                    }
                }
            }
            RequestAuth::Anonymous => {}
        }

        for (key, value) in &request.extra_headers {
            headers.insert(key.clone(), value.clone());
        }

        headers
    }

    /// Sends an HTTP request to the commerce API.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs (`Network`)
    /// - Non-2xx response received (`Response`)
    /// - Max retries exceeded (`MaxRetries`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.base_url.join(&request.path);
        let headers = self.resolve_headers(&request);

        let mut tries: u32 = 0;
        loop {
            tries += 1;

            let mut req_builder = match request.http_method {
                HttpMethod::Get => self.client.get(&url),
                HttpMethod::Post => self.client.post(&url),
                HttpMethod::Put => self.client.put(&url),
                HttpMethod::Delete => self.client.delete(&url),
            };

            for (key, value) in &headers {
                req_builder = req_builder.header(key, value);
            }

            if !request.query.is_empty() {
                req_builder = req_builder.query(&request.query);
            }

            if let Some(body) = &request.body {
                req_builder = req_builder.body(body.to_string());
            }

            tracing::debug!(
                method = %request.http_method,
                path = %request.path,
                attempt = tries,
                "Sending request"
            );

            let res = req_builder.send().await?;

            let code = res.status().as_u16();
            let res_headers = Self::parse_response_headers(res.headers());
            let body_text = res.text().await?;

            let body = if body_text.trim().is_empty() {
                serde_json::json!({})
            } else {
                serde_json::from_str(&body_text).unwrap_or_else(|_| {
                    // Keep unparseable server errors for the error message
                    if code >= 500 {
                        serde_json::json!({ "raw_body": body_text })
                    } else {
                        serde_json::json!({})
                    }
                })
            };

            let response = HttpResponse::new(code, res_headers, body);

            tracing::debug!(
                method = %request.http_method,
                path = %request.path,
                status = code,
                "Received response"
            );

            if response.is_ok() {
                return Ok(response);
            }

            let error_message = response.error_message();

            let should_retry = code == 429 || code == 500;
            if !should_retry || request.tries <= 1 {
                return Err(HttpError::Response(HttpResponseError {
                    code,
                    message: error_message,
                    error_reference: response.request_id().map(String::from),
                }));
            }

            if tries >= request.tries {
                return Err(HttpError::MaxRetries(MaxHttpRetriesExceededError {
                    code,
                    tries: request.tries,
                    message: error_message,
                    error_reference: response.request_id().map(String::from),
                }));
            }

            let delay = Self::calculate_retry_delay(&response, code);
            tracing::warn!(
                path = %request.path,
                status = code,
                delay_secs = delay.as_secs_f64(),
                "Retrying request"
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// Sends a request and deserializes the JSON response body.
    ///
    /// # Errors
    ///
    /// Returns any error from [`request`](Self::request), or
    /// [`HttpError::Json`] if the body does not match `T`.
    pub async fn fetch<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T, HttpError> {
        let response = self.request(request).await?;
        Ok(serde_json::from_value(response.body)?)
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Calculates the retry delay based on response and status code.
    fn calculate_retry_delay(response: &HttpResponse, status: u16) -> std::time::Duration {
        // 429 honours Retry-After; 500 always waits the fixed delay
        if status == 429 {
            if let Some(delay) = response
                .retry_request_after
                .and_then(|secs| std::time::Duration::try_from_secs_f64(secs).ok())
            {
                return delay;
            }
        }
        std::time::Duration::from_secs(RETRY_WAIT_TIME)
    }
}

fn bearer(token: &Token) -> String {
    format!("Bearer {}", token.as_str())
}
