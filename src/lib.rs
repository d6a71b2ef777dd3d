//! # Commerce SDK
//!
//! A Rust client for a headless commerce platform's HTTP API. The core is an
//! authenticated request layer: identity flows, a per-client credential
//! store, and a transport that attaches the right credential to every call.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`ClientConfig`] and [`ClientConfigBuilder`]
//! - Validated newtypes for URLs and API keys
//! - Register, login (token or redirect), OAuth callback, refresh, logout,
//!   password reset and provider updates via [`Auth`]
//! - Bearer-token and cookie-session authentication modes ([`AuthMode`])
//! - A pluggable [`CredentialStore`] with an in-memory default
//! - An async HTTP client with optional retries for 429 and 500 responses
//! - Typed admin resources, starting with fulfillment sets
//!
//! ## Quick Start
//!
//! ```rust
//! use commerce_sdk::{AuthMode, BaseUrl, ClientConfig, PublishableKey, Sdk};
//!
//! let config = ClientConfig::builder()
//!     .base_url(BaseUrl::new("http://localhost:9000").unwrap())
//!     .auth_mode(AuthMode::Bearer)
//!     .publishable_key(PublishableKey::new("pk_123").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let sdk = Sdk::new(config).unwrap();
//! assert!(!sdk.auth().is_authenticated());
//! ```
//!
//! ## Authentication
//!
//! ```rust,ignore
//! use commerce_sdk::LoginOutcome;
//! use serde_json::json;
//!
//! match sdk
//!     .auth()
//!     .login("customer", "emailpass", &json!({"email": "a@b.com", "password": "secret"}))
//!     .await?
//! {
//!     LoginOutcome::Authenticated(token) => {
//!         // Later requests from this `sdk` carry the token
//!         println!("expires at {:?}", token.expires_at());
//!     }
//!     LoginOutcome::Redirect { location } => {
//!         // Send the user to `location`, then finish with `callback`
//!     }
//! }
//!
//! sdk.auth().logout().await?;
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use commerce_sdk::clients::{HttpMethod, HttpRequest};
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "/store/regions")
//!     .query_param("limit", "10")
//!     .build()?;
//!
//! let response = sdk.client().request(request).await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: every [`Sdk`] owns its transport and credential store
//! - **Fail-fast validation**: newtypes and requests validate on construction
//! - **Thread-safe**: all public types are `Send + Sync`
//! - **Async-first**: designed for use with the Tokio runtime

pub mod admin;
pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
mod sdk;

pub use sdk::Sdk;

// Re-export public types at crate root for convenience
pub use auth::{
    Auth, AuthError, CredentialStore, LoginOutcome, MemoryCredentialStore, Token, TokenClaims,
};
pub use config::{ApiKey, AuthMode, BaseUrl, ClientConfig, ClientConfigBuilder, PublishableKey};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError, RequestAuth,
};
