//! In-memory account and session store.
//!
//! This is a stand-in, not a security model: the session token is the account
//! e-mail itself and passwords are never checked. The round engine only sees
//! it through `SessionAuthority`.

use std::collections::HashSet;

use async_trait::async_trait;
use parking_lot::RwLock;

use verbdrill_core::SessionAuthority;

use crate::error::ApiError;

/// Known accounts and currently logged-in tokens.
#[derive(Debug, Default)]
pub struct AuthStore {
    users: RwLock<HashSet<String>>,
    sessions: RwLock<HashSet<String>>,
}

impl AuthStore {
    /// A store with the given accounts and no active sessions.
    pub fn new<I, S>(users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            users: RwLock::new(users.into_iter().map(Into::into).collect()),
            sessions: RwLock::new(HashSet::new()),
        }
    }

    /// Create an account. Registering an existing e-mail is a no-op.
    pub fn register(&self, email: &str) {
        if self.users.write().insert(email.to_string()) {
            tracing::info!(email, "account registered");
        }
    }

    /// Open a session for a known account and return its token.
    pub fn login(&self, email: &str) -> Result<String, ApiError> {
        if !self.users.read().contains(email) {
            tracing::warn!(email, "login rejected: unknown account");
            return Err(ApiError::InvalidCredentials);
        }
        self.sessions.write().insert(email.to_string());
        tracing::info!(email, "session opened");
        Ok(email.to_string())
    }

    /// Open a session for `email`, creating the account if needed.
    pub fn force_login(&self, email: &str) -> String {
        self.register(email);
        self.sessions.write().insert(email.to_string());
        email.to_string()
    }

    /// Close a session. Unknown tokens are ignored.
    pub fn logout(&self, token: &str) {
        if self.sessions.write().remove(token) {
            tracing::info!(token, "session closed");
        }
    }

    /// The account behind an active session token.
    pub fn whoami(&self, token: &str) -> Option<String> {
        self.sessions
            .read()
            .contains(token)
            .then(|| token.to_string())
    }

    pub fn is_active(&self, token: &str) -> bool {
        self.sessions.read().contains(token)
    }
}

#[async_trait]
impl SessionAuthority for AuthStore {
    async fn is_active_session(&self, token: &str) -> bool {
        self.is_active(token)
    }
}
