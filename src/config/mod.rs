//! Configuration types for the commerce SDK.
//!
//! This module provides the configuration used to construct an [`Sdk`](crate::Sdk)
//! and its transport.
//!
//! # Overview
//!
//! - [`ClientConfig`]: The main configuration struct holding all SDK settings
//! - [`ClientConfigBuilder`]: A builder for constructing [`ClientConfig`] instances
//! - [`AuthMode`]: Whether authentication rides on bearer tokens or session cookies
//! - [`BaseUrl`]: A validated API base URL
//! - [`ApiKey`]: A validated secret API key with masked debug output
//! - [`PublishableKey`]: A validated publishable API key
//!
//! # Example
//!
//! ```rust
//! use commerce_sdk::{AuthMode, BaseUrl, ClientConfig, PublishableKey};
//!
//! let config = ClientConfig::builder()
//!     .base_url(BaseUrl::new("http://localhost:9000").unwrap())
//!     .auth_mode(AuthMode::Session)
//!     .publishable_key(PublishableKey::new("pk_123").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.auth_mode(), AuthMode::Session);
//! ```

mod newtypes;

pub use newtypes::{ApiKey, BaseUrl, PublishableKey};

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use crate::error::ConfigError;

/// How an authenticated identity is carried on requests.
///
/// The mode is fixed when the client is constructed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AuthMode {
    /// The stored token is sent as `Authorization: Bearer <token>`.
    #[default]
    Bearer,
    /// The server keeps a cookie-based session, established by an explicit
    /// `POST /auth/session` after login.
    Session,
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bearer => write!(f, "bearer"),
            Self::Session => write!(f, "session"),
        }
    }
}

/// Configuration for the commerce SDK.
///
/// # Thread Safety
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`.
///
/// # Example
///
/// ```rust
/// use commerce_sdk::{ApiKey, BaseUrl, ClientConfig};
///
/// let config = ClientConfig::builder()
///     .base_url(BaseUrl::new("https://api.example.com").unwrap())
///     .api_key(ApiKey::new("sk_123").unwrap())
///     .global_header("x-tenant", "acme")
///     .build()
///     .unwrap();
///
/// assert!(config.api_key().is_some());
/// ```
#[derive(Clone, Debug)]
pub struct ClientConfig {
    base_url: BaseUrl,
    auth_mode: AuthMode,
    publishable_key: Option<PublishableKey>,
    api_key: Option<ApiKey>,
    global_headers: HashMap<String, String>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the authentication mode.
    #[must_use]
    pub const fn auth_mode(&self) -> AuthMode {
        self.auth_mode
    }

    /// Returns the publishable key, if configured.
    #[must_use]
    pub const fn publishable_key(&self) -> Option<&PublishableKey> {
        self.publishable_key.as_ref()
    }

    /// Returns the secret API key, if configured.
    #[must_use]
    pub const fn api_key(&self) -> Option<&ApiKey> {
        self.api_key.as_ref()
    }

    /// Returns the headers sent with every request.
    #[must_use]
    pub const fn global_headers(&self) -> &HashMap<String, String> {
        &self.global_headers
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the per-request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// `base_url` is required. All other fields have defaults.
///
/// # Defaults
///
/// - `auth_mode`: [`AuthMode::Bearer`]
/// - `publishable_key`, `api_key`: `None`
/// - `global_headers`: empty
/// - `user_agent_prefix`: `None`
/// - `timeout`: `None` (no client-side timeout)
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    base_url: Option<BaseUrl>,
    auth_mode: Option<AuthMode>,
    publishable_key: Option<PublishableKey>,
    api_key: Option<ApiKey>,
    global_headers: HashMap<String, String>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API base URL (required).
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the authentication mode.
    #[must_use]
    pub const fn auth_mode(mut self, mode: AuthMode) -> Self {
        self.auth_mode = Some(mode);
        self
    }

    /// Sets the publishable key sent as `x-publishable-api-key`.
    #[must_use]
    pub fn publishable_key(mut self, key: PublishableKey) -> Self {
        self.publishable_key = Some(key);
        self
    }

    /// Sets the secret API key sent as Basic credentials.
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Replaces the headers sent with every request.
    #[must_use]
    pub fn global_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.global_headers = headers;
        self
    }

    /// Adds a single header sent with every request.
    #[must_use]
    pub fn global_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.global_headers.insert(key.into(), value.into());
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets a timeout applied to each HTTP request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`ClientConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `base_url` is not set.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingRequiredField { field: "base_url" })?;

        Ok(ClientConfig {
            base_url,
            auth_mode: self.auth_mode.unwrap_or_default(),
            publishable_key: self.publishable_key,
            api_key: self.api_key,
            global_headers: self.global_headers,
            user_agent_prefix: self.user_agent_prefix,
            timeout: self.timeout,
        })
    }
}
