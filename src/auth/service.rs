//! The auth service.
//!
//! [`Auth`] drives every identity flow against the auth routes and keeps the
//! shared [`CredentialStore`](super::CredentialStore) in step with the
//! outcome.
//!
//! # Routes
//!
//! | Operation         | Request                                           |
//! |-------------------|---------------------------------------------------|
//! | `register`        | `POST /{actor}/auth/{provider}/register`          |
//! | `login`           | `POST /{actor}/auth/{provider}`                   |
//! | `callback`        | `GET /{actor}/auth/{provider}/callback`           |
//! | `refresh`         | `POST /auth/token/refresh`                        |
//! | `logout`          | `DELETE /auth/session`                            |
//! | session create    | `POST /auth/session` (session mode only)          |
//! | `reset_password`  | `POST /{actor}/auth/{provider}/reset-password`    |
//! | `update_provider` | `POST /{actor}/auth/{provider}/update`            |

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::error::AuthError;
use super::token::Token;
use crate::clients::{HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, RequestAuth};
use crate::config::AuthMode;

/// Path that creates (POST) and destroys (DELETE) a server-side session.
pub const SESSION_PATH: &str = "/auth/session";

/// Path that exchanges the current credential for a fresh token.
pub const REFRESH_PATH: &str = "/auth/token/refresh";

/// Result of a [`Auth::login`] call.
///
/// Password-style providers answer with a token; redirect-style providers
/// (OAuth) answer with the location the user must visit first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The actor is authenticated and the token has been stored.
    Authenticated(Token),
    /// The provider requires a third-party redirect. Nothing was stored.
    Redirect {
        /// URL to send the user to.
        location: String,
    },
}

impl LoginOutcome {
    /// Returns the token when authentication completed.
    #[must_use]
    pub const fn token(&self) -> Option<&Token> {
        match self {
            Self::Authenticated(token) => Some(token),
            Self::Redirect { .. } => None,
        }
    }

    /// Returns the redirect location when one is required.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        match self {
            Self::Redirect { location } => Some(location),
            Self::Authenticated(_) => None,
        }
    }
}

/// Body shape shared by the token-issuing routes.
#[derive(Debug, Default, Deserialize)]
struct AuthResponse {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    location: Option<String>,
}

impl AuthResponse {
    fn parse(response: HttpResponse) -> Result<Self, AuthError> {
        serde_json::from_value(response.body).map_err(|e| AuthError::InvalidResponse {
            reason: format!("Unexpected auth response body: {e}"),
        })
    }

    fn into_token(self) -> Result<Token, AuthError> {
        self.token
            .filter(|token| !token.is_empty())
            .map(Token::new)
            .ok_or_else(|| AuthError::InvalidResponse {
                reason: "Response did not include a token".to_string(),
            })
    }
}

#[derive(Serialize)]
struct ResetPasswordRequest<'a> {
    identifier: &'a str,
}

/// Authentication flows for a single client instance.
///
/// `Auth` is cheap to clone; clones share the transport and its credential
/// store.
///
/// # Example
///
/// ```rust,ignore
/// use commerce_sdk::auth::LoginOutcome;
/// use serde_json::json;
///
/// let outcome = sdk
///     .auth()
///     .login("customer", "emailpass", &json!({"email": "a@b.com", "password": "x"}))
///     .await?;
///
/// match outcome {
///     LoginOutcome::Authenticated(_) => println!("logged in"),
///     LoginOutcome::Redirect { location } => println!("continue at {location}"),
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Auth {
    client: Arc<HttpClient>,
}

impl Auth {
    /// Creates an auth service on top of `client`.
    #[must_use]
    pub const fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// Returns `true` if a token is currently stored.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.client.credentials().get().is_some()
    }

    /// Registers a new identity and returns its token.
    ///
    /// The token is returned to the caller and is not stored: it authorizes
    /// follow-up calls such as creating the actor, not a session.
    ///
    /// # Errors
    ///
    /// - [`AuthError::AuthenticationFailure`] on a non-2xx response
    /// - [`AuthError::InvalidResponse`] if the body has no token
    /// - [`AuthError::Transport`] if the request could not be completed
    pub async fn register<P: Serialize + ?Sized>(
        &self,
        actor: &str,
        provider: &str,
        payload: &P,
    ) -> Result<Token, AuthError> {
        let request = HttpRequest::builder(
            HttpMethod::Post,
            provider_path(actor, provider, Some("register")),
        )
        .body(serde_json::to_value(payload)?)
        .build()?;

        let response = self.client.request(request).await?;
        AuthResponse::parse(response)?.into_token()
    }

    /// Logs in with the given provider.
    ///
    /// When the body contains a `location`, the provider needs a redirect
    /// and nothing is stored. Otherwise the token is stored; in session mode
    /// a session is first established with `POST /auth/session`.
    ///
    /// # Errors
    ///
    /// - [`AuthError::AuthenticationFailure`] on a non-2xx response from
    ///   either the login or the session call
    /// - [`AuthError::InvalidResponse`] if the body has neither token nor location
    /// - [`AuthError::Transport`] if a request could not be completed
    pub async fn login<P: Serialize + ?Sized>(
        &self,
        actor: &str,
        provider: &str,
        payload: &P,
    ) -> Result<LoginOutcome, AuthError> {
        let request = HttpRequest::builder(HttpMethod::Post, provider_path(actor, provider, None))
            .body(serde_json::to_value(payload)?)
            .build()?;

        let response = self.client.request(request).await?;
        let body = AuthResponse::parse(response)?;

        if let Some(location) = body.location.clone().filter(|l| !l.is_empty()) {
            return Ok(LoginOutcome::Redirect { location });
        }

        let token = body.into_token()?;
        self.establish(token.clone()).await?;
        Ok(LoginOutcome::Authenticated(token))
    }

    /// Completes a redirect-based login.
    ///
    /// Every query pair received from the provider is forwarded verbatim and
    /// in order. The resulting token is stored exactly as [`login`](Self::login)
    /// stores it.
    ///
    /// # Errors
    ///
    /// Same as [`login`](Self::login).
    pub async fn callback<I, K, V>(
        &self,
        actor: &str,
        provider: &str,
        query: I,
    ) -> Result<Token, AuthError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let request = HttpRequest::builder(
            HttpMethod::Get,
            provider_path(actor, provider, Some("callback")),
        )
        .query_pairs(query)
        .build()?;

        let response = self.client.request(request).await?;
        let token = AuthResponse::parse(response)?.into_token()?;
        self.establish(token.clone()).await?;
        Ok(token)
    }

    /// Exchanges the current credential for a fresh token and stores it.
    ///
    /// # Errors
    ///
    /// - [`AuthError::AuthenticationFailure`] with status 401 if no token is
    ///   stored (no request is sent), or on a non-2xx response
    /// - [`AuthError::InvalidResponse`] if the body has no token
    /// - [`AuthError::Transport`] if the request could not be completed
    pub async fn refresh(&self) -> Result<Token, AuthError> {
        if self.client.credentials().get().is_none() {
            return Err(AuthError::AuthenticationFailure {
                status: 401,
                message: "No stored credential to refresh".to_string(),
            });
        }

        let request = HttpRequest::builder(HttpMethod::Post, REFRESH_PATH).build()?;
        let response = self.client.request(request).await?;
        let token = AuthResponse::parse(response)?.into_token()?;

        self.client.credentials().set(token.clone());
        Ok(token)
    }

    /// Ends the current session and clears the stored token.
    ///
    /// Idempotent: in bearer mode with nothing stored no request is sent, and
    /// a 401 from the server is treated as "already logged out".
    ///
    /// # Errors
    ///
    /// Any other failure of `DELETE /auth/session`. The stored token is
    /// cleared before the error is returned.
    pub async fn logout(&self) -> Result<(), AuthError> {
        let credentials = self.client.credentials();

        if self.client.auth_mode() == AuthMode::Bearer && credentials.get().is_none() {
            return Ok(());
        }

        let request = HttpRequest::builder(HttpMethod::Delete, SESSION_PATH).build()?;
        let result = self.client.request(request).await;
        credentials.clear();

        match result {
            Ok(_) => Ok(()),
            Err(HttpError::Response(e)) if e.code == 401 => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Requests a password reset for `identifier`.
    ///
    /// The server answers the same way whether or not the identifier exists,
    /// and the response body is ignored.
    ///
    /// # Errors
    ///
    /// [`AuthError::AuthenticationFailure`] on a non-2xx response, or
    /// [`AuthError::Transport`] if the request could not be completed.
    pub async fn reset_password(
        &self,
        actor: &str,
        provider: &str,
        identifier: &str,
    ) -> Result<(), AuthError> {
        let request = HttpRequest::builder(
            HttpMethod::Post,
            provider_path(actor, provider, Some("reset-password")),
        )
        .body(serde_json::to_value(ResetPasswordRequest { identifier })?)
        .build()?;

        self.client.request(request).await?;
        Ok(())
    }

    /// Updates provider data (e.g. sets a new password) using `token`.
    ///
    /// `token` is typically the value returned by [`register`](Self::register)
    /// or delivered out of band by a password reset. The stored credential is
    /// neither read nor modified.
    ///
    /// # Errors
    ///
    /// [`AuthError::AuthenticationFailure`] on a non-2xx response, or
    /// [`AuthError::Transport`] if the request could not be completed.
    pub async fn update_provider<B: Serialize + ?Sized>(
        &self,
        actor: &str,
        provider: &str,
        body: &B,
        token: &Token,
    ) -> Result<(), AuthError> {
        let request = HttpRequest::builder(
            HttpMethod::Post,
            provider_path(actor, provider, Some("update")),
        )
        .body(serde_json::to_value(body)?)
        .auth(RequestAuth::Explicit(token.clone()))
        .build()?;

        self.client.request(request).await?;
        Ok(())
    }

    /// Stores a freshly issued token, creating a server session first in
    /// session mode.
    async fn establish(&self, token: Token) -> Result<(), AuthError> {
        if self.client.auth_mode() == AuthMode::Session {
            let request = HttpRequest::builder(HttpMethod::Post, SESSION_PATH)
                .auth(RequestAuth::Explicit(token.clone()))
                .build()?;
            self.client.request(request).await?;
        }

        self.client.credentials().set(token);
        Ok(())
    }
}

/// Builds `/{actor}/auth/{provider}[/{suffix}]` with percent-encoded segments.
fn provider_path(actor: &str, provider: &str, suffix: Option<&str>) -> String {
    let base = format!(
        "/{}/auth/{}",
        urlencoding::encode(actor),
        urlencoding::encode(provider)
    );
    match suffix {
        Some(suffix) => format!("{base}/{suffix}"),
        None => base,
    }
}
