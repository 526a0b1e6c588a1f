//! Core trait definitions for collaborators the engine depends on.
//!
//! The round engine never authenticates anyone itself; it only asks a
//! `SessionAuthority` whether an identity token is currently logged in. The
//! `verbdrill-server` crate implements it with an in-memory session set.

use std::collections::HashSet;

use async_trait::async_trait;
use parking_lot::RwLock;

/// Decides whether an identity token belongs to an active session.
#[async_trait]
pub trait SessionAuthority: Send + Sync {
    async fn is_active_session(&self, token: &str) -> bool;
}

/// A fixed set of active tokens, for tests and embedding without a server.
#[derive(Debug, Default)]
pub struct StaticSessions {
    tokens: RwLock<HashSet<String>>,
}

impl StaticSessions {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: RwLock::new(tokens.into_iter().map(Into::into).collect()),
        }
    }

    pub fn activate(&self, token: impl Into<String>) {
        self.tokens.write().insert(token.into());
    }

    pub fn revoke(&self, token: &str) {
        self.tokens.write().remove(token);
    }
}

#[async_trait]
impl SessionAuthority for StaticSessions {
    async fn is_active_session(&self, token: &str) -> bool {
        self.tokens.read().contains(token)
    }
}
