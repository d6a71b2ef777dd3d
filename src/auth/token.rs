//! Authentication token type.
//!
//! A [`Token`] is the opaque credential returned by the auth routes. Most
//! deployments issue JWTs, so the claims can be inspected to decide when to
//! refresh; the signature is never verified client-side.

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// An authentication token issued by the commerce API.
///
/// # Security
///
/// The [`Debug`] implementation masks the value:
///
/// ```rust
/// use commerce_sdk::Token;
///
/// let token = Token::new("secret-token");
/// assert_eq!(format!("{:?}", token), "Token(*****)");
/// assert_eq!(token.as_str(), "secret-token");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

/// Claims carried by JWT tokens issued by the auth routes.
///
/// Every field is optional; tokens from custom auth providers may omit any of them.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TokenClaims {
    /// ID of the authenticated actor (user, customer, ...).
    pub actor_id: Option<String>,
    /// Kind of actor the token was issued for.
    pub actor_type: Option<String>,
    /// ID of the auth identity behind the actor.
    pub auth_identity_id: Option<String>,
    /// Provider-specific metadata attached to the identity.
    pub app_metadata: Option<serde_json::Value>,
    /// Expiration timestamp (Unix seconds).
    pub exp: Option<i64>,
    /// Issued-at timestamp (Unix seconds).
    pub iat: Option<i64>,
}

impl Token {
    /// Wraps a raw token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decodes the JWT claims without verifying the signature.
    ///
    /// Returns `None` for opaque (non-JWT) tokens.
    ///
    /// # Example
    ///
    /// ```rust
    /// use commerce_sdk::Token;
    ///
    /// assert!(Token::new("opaque-token").claims().is_none());
    /// ```
    #[must_use]
    pub fn claims(&self) -> Option<TokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        decode::<TokenClaims>(&self.0, &DecodingKey::from_secret(&[]), &validation)
            .ok()
            .map(|data| data.claims)
    }

    /// Returns when the token expires, if it is a JWT with an `exp` claim.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.claims()
            .and_then(|claims| claims.exp)
            .and_then(|exp| Utc.timestamp_opt(exp, 0).single())
    }

    /// Returns `true` if the token carries an `exp` claim in the past.
    ///
    /// Tokens without an expiration are never considered expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at().is_some_and(|expires| Utc::now() >= expires)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(*****)")
    }
}

impl From<String> for Token {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for Token {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}
