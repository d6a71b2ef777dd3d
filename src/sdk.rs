//! The SDK entry point.
//!
//! [`Sdk`] wires one transport, one credential store, the auth service and
//! the admin resources together. Everything built from the same `Sdk`
//! shares its credential; separate `Sdk` values never do.

use std::sync::Arc;

use crate::admin::Admin;
use crate::auth::{Auth, CredentialStore, MemoryCredentialStore, Token};
use crate::clients::{HttpClient, HttpError};
use crate::config::ClientConfig;

/// A configured commerce client.
///
/// # Example
///
/// ```rust
/// use commerce_sdk::{BaseUrl, ClientConfig, Sdk};
///
/// let config = ClientConfig::builder()
///     .base_url(BaseUrl::new("http://localhost:9000").unwrap())
///     .build()
///     .unwrap();
/// let sdk = Sdk::new(config).unwrap();
///
/// assert!(sdk.token().is_none());
/// sdk.set_token("eyJhbGciOiJIUzI1NiJ9.e30.sig");
/// assert!(sdk.auth().is_authenticated());
/// ```
#[derive(Clone, Debug)]
pub struct Sdk {
    client: Arc<HttpClient>,
    auth: Auth,
    admin: Admin,
}

// Verify Sdk is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Sdk>();
};

impl Sdk {
    /// Creates an SDK backed by an empty in-memory credential store.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, HttpError> {
        Self::with_credential_store(config, Arc::new(MemoryCredentialStore::new()))
    }

    /// Creates an SDK backed by a caller-provided credential store.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the HTTP client cannot be created.
    pub fn with_credential_store(
        config: ClientConfig,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self, HttpError> {
        let client = Arc::new(HttpClient::new(&config, credentials)?);

        Ok(Self {
            auth: Auth::new(Arc::clone(&client)),
            admin: Admin::new(Arc::clone(&client)),
            client,
        })
    }

    /// Authentication flows.
    #[must_use]
    pub const fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Admin resources.
    #[must_use]
    pub const fn admin(&self) -> &Admin {
        &self.admin
    }

    /// The underlying transport, for routes without a typed wrapper.
    #[must_use]
    pub const fn client(&self) -> &Arc<HttpClient> {
        &self.client
    }

    /// Returns the stored token, if any.
    #[must_use]
    pub fn token(&self) -> Option<Token> {
        self.client.credentials().get()
    }

    /// Stores a token obtained outside the auth flows.
    pub fn set_token(&self, token: impl Into<Token>) {
        self.client.credentials().set(token.into());
    }

    /// Forgets the stored token without contacting the server.
    pub fn clear_token(&self) {
        self.client.credentials().clear();
    }
}
