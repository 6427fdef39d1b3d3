//! Session Context
//!
//! Holds the access token for the signed-in user. Created once at bootstrap,
//! passed explicitly to the API client, cleared at sign-out.

use chrono::{DateTime, Utc};
use std::sync::{PoisonError, RwLock};
use uuid::Uuid;

/// Bearer token with optional expiry
#[derive(Clone)]
pub struct AccessToken {
    value: String,
    expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    pub fn new(value: impl Into<String>, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            value: value.into(),
            expires_at,
        }
    }

    /// Check whether the token has expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Lifecycle-scoped authentication context
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    created_at: DateTime<Utc>,
    token: RwLock<Option<AccessToken>>,
}

impl Session {
    /// Create an anonymous session
    pub fn new() -> Self {
        let session = Self {
            id: Uuid::now_v7(),
            created_at: Utc::now(),
            token: RwLock::new(None),
        };
        tracing::info!(session = %session.id, "Session created");
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Store the token for the signed-in user
    pub fn sign_in(&self, token: AccessToken) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
        tracing::info!(session = %self.id, "Signed in");
    }

    /// Drop the token
    pub fn sign_out(&self) {
        let previous = self
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if previous.is_some() {
            tracing::info!(session = %self.id, "Signed out");
        }
    }

    /// Token value to send, if signed in and not expired
    pub fn bearer(&self) -> Option<String> {
        let guard = self.token.read().unwrap_or_else(PoisonError::into_inner);
        guard
            .as_ref()
            .filter(|t| !t.is_expired_at(Utc::now()))
            .map(|t| t.value.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.bearer().is_some()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
