//! # Sessions
//!
//! The session is owned by the external auth provider. This server only
//! asks "is there one, and whose is it?" through the [`SessionProvider`]
//! trait, which is injected into [`crate::state::AppState`] so the guards
//! can run against a fake provider in tests.

pub mod supabase;

pub use supabase::SupabaseClient;

use crate::error::AppResult;
use async_trait::async_trait;
use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};

/// The user record returned by the provider. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: Option<String>,
    pub role: Option<String>,
}

/// Proof that the request belongs to a signed-in user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: User,
    pub access_token: String,
}

/// Session lookup resolved once per request and stored in the request
/// extensions by [`crate::middleware::session::resolve_session`].
#[derive(Debug, Clone, Default)]
pub struct CurrentSession(pub Option<Session>);

impl CurrentSession {
    pub fn get(&self) -> Option<&Session> {
        self.0.as_ref()
    }
}

/// Read access to the provider's notion of "current session"
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Returns `Ok(None)` when the request carries no valid session.
    /// `Err` is reserved for the provider being unreachable or confused.
    async fn current_session(&self, headers: &HeaderMap) -> AppResult<Option<Session>>;
}
