//! # Session Context
//!
//! An explicit per-session context object created at sign-in and passed
//! to every store call, replacing ambient process-wide session state.
//! The bearer token travels with the session, so re-attachment on every
//! interaction is structural rather than a side effect someone has to
//! remember to perform.

use chrono::{DateTime, Utc};
use porta_core::UserId;

/// Authenticated session context, created by [`AuthClient::sign_in`] and
/// discarded at sign-out.
///
/// [`AuthClient::sign_in`]: crate::auth::AuthClient::sign_in
#[derive(Debug, Clone)]
pub struct Session {
    /// Subject identifier issued by the identity provider.
    pub user_id: UserId,
    /// When this session was established.
    pub signed_in_at: DateTime<Utc>,
    access_token: String,
}

impl Session {
    /// Assemble a session from a subject id and bearer token.
    pub fn new(user_id: UserId, access_token: impl Into<String>) -> Self {
        Self {
            user_id,
            signed_in_at: Utc::now(),
            access_token: access_token.into(),
        }
    }

    /// The raw bearer token.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// The `Authorization` header value for store calls.
    pub(crate) fn authorization(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

/// Outcome of session teardown.
///
/// Token revocation at the identity provider is best-effort: the local
/// session is discarded either way, so a failed revocation is reported
/// but is not fatal. Only must-halt failures come back as `Err` from
/// [`AuthClient::sign_out`].
///
/// [`AuthClient::sign_out`]: crate::auth::AuthClient::sign_out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Teardown {
    /// The provider revoked the token.
    Complete,
    /// Revocation failed; the local session is still discarded.
    RevocationFailed {
        /// What went wrong at the provider.
        reason: String,
    },
}

impl std::fmt::Display for Teardown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Complete => write!(f, "complete"),
            Self::RevocationFailed { reason } => write!(f, "revocation failed: {reason}"),
        }
    }
}
