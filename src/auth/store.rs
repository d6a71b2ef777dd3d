//! Credential storage.
//!
//! The [`CredentialStore`] holds the one token a client instance is
//! authenticated with. The auth service writes it; the transport reads it on
//! every ambient request.

use std::fmt;

use parking_lot::RwLock;

use super::token::Token;

/// Storage for the current authentication token.
///
/// Implementations must make `get`, `set` and `clear` atomic with respect to
/// each other: a reader sees either the previous token or the new one, never
/// a mix. Setting a token replaces any prior token.
///
/// Implement this trait to persist tokens somewhere other than memory, and
/// pass the store to [`Sdk::with_credential_store`](crate::Sdk::with_credential_store).
pub trait CredentialStore: Send + Sync + fmt::Debug {
    /// Returns the current token, if any.
    fn get(&self) -> Option<Token>;

    /// Stores `token`, replacing any existing token.
    fn set(&self, token: Token);

    /// Removes the current token.
    fn clear(&self);
}

/// In-memory [`CredentialStore`], the default for every client.
///
/// # Example
///
/// ```rust
/// use commerce_sdk::{CredentialStore, MemoryCredentialStore, Token};
///
/// let store = MemoryCredentialStore::new();
/// assert!(store.get().is_none());
///
/// store.set(Token::new("tkn_1"));
/// assert_eq!(store.get(), Some(Token::new("tkn_1")));
///
/// store.clear();
/// assert!(store.get().is_none());
/// ```
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    token: RwLock<Option<Token>>,
}

impl MemoryCredentialStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `token`.
    #[must_use]
    pub fn with_token(token: Token) -> Self {
        Self {
            token: RwLock::new(Some(token)),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self) -> Option<Token> {
        self.token.read().clone()
    }

    fn set(&self, token: Token) {
        *self.token.write() = Some(token);
    }

    fn clear(&self) {
        *self.token.write() = None;
    }
}

// Verify MemoryCredentialStore is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MemoryCredentialStore>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_set_replaces_previous_token() {
        let store = MemoryCredentialStore::with_token(Token::new("old"));
        store.set(Token::new("new"));
        assert_eq!(store.get(), Some(Token::new("new")));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let store = MemoryCredentialStore::new();
        store.clear();
        store.clear();
        assert!(store.get().is_none());
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let store = MemoryCredentialStore::with_token(Token::new("tkn_secret"));
        assert!(!format!("{store:?}").contains("tkn_secret"));
    }

    #[test]
    fn test_concurrent_writers_leave_one_whole_token() {
        let store = Arc::new(MemoryCredentialStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        store.set(Token::new(format!("token-{i}")));
                        let _ = store.get();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let token = store.get().unwrap();
        let suffix = token.as_str().strip_prefix("token-").unwrap();
        assert!(suffix.parse::<u32>().unwrap() < 8);
    }

    #[test]
    fn test_usable_as_trait_object() {
        let store: Arc<dyn CredentialStore> = Arc::new(MemoryCredentialStore::new());
        store.set(Token::new("tkn_1"));
        assert_eq!(store.get().map(|t| t.as_str().to_string()), Some("tkn_1".to_string()));
    }
}
