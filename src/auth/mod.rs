//! Authentication for the commerce SDK.
//!
//! This module provides the identity flows and the credential state they
//! manage.
//!
//! # Overview
//!
//! - [`Auth`]: register, login, OAuth callback, refresh, logout, password
//!   reset and provider updates
//! - [`CredentialStore`]: the per-client slot holding the current [`Token`]
//! - [`MemoryCredentialStore`]: the default in-memory store
//! - [`LoginOutcome`]: a stored token, or a redirect the user must follow
//! - [`AuthError`]: failures surfaced by [`Auth`]
//!
//! # State
//!
//! A client is authenticated exactly when its store holds a token. `login`
//! and `callback` move it to authenticated, `logout` back to
//! unauthenticated; `register` and `reset_password` leave it unchanged.
//! Every client owns its own store, so several independently authenticated
//! clients can live in one process.
//!
//! # Bearer vs. Session Mode
//!
//! In [`AuthMode::Bearer`](crate::AuthMode::Bearer) the transport sends the
//! stored token on each request. In [`AuthMode::Session`](crate::AuthMode::Session)
//! `login`/`callback` additionally call `POST /auth/session` and later
//! requests ride on the session cookie.
//!
//! # Example
//!
//! ```rust,ignore
//! use commerce_sdk::{BaseUrl, ClientConfig, Sdk};
//! use serde_json::json;
//!
//! let config = ClientConfig::builder()
//!     .base_url(BaseUrl::new("http://localhost:9000")?)
//!     .build()?;
//! let sdk = Sdk::new(config)?;
//!
//! sdk.auth()
//!     .login("customer", "emailpass", &json!({"email": "a@b.com", "password": "x"}))
//!     .await?;
//! assert!(sdk.auth().is_authenticated());
//!
//! sdk.auth().logout().await?;
//! ```

mod error;
mod service;
mod store;
mod token;

pub use error::AuthError;
pub use service::{Auth, LoginOutcome, REFRESH_PATH, SESSION_PATH};
pub use store::{CredentialStore, MemoryCredentialStore};
pub use token::{Token, TokenClaims};
