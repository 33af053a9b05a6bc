//! Store client error types.
//!
//! One taxonomy for everything that can go wrong between the portal and
//! its external collaborators. Nothing here is retried automatically:
//! every failure is surfaced to the interacting user, who re-triggers the
//! affected operation manually.

use porta_core::UserId;

/// Errors from identity-provider and data-store calls.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Bad credentials or missing/expired session token at login.
    #[error("authentication failed: {reason}")]
    Authentication {
        /// Provider-supplied description of the rejection.
        reason: String,
    },

    /// The profile lookup for an authenticated user returned no row.
    ///
    /// A known operational failure mode, not a code defect: the account
    /// exists at the identity provider but an administrator has not yet
    /// provisioned its access row. The message carries that remediation.
    #[error(
        "no profile found for user {user_id}; ask an administrator to create a \
         profiles row with this user id, a role, and an organisation"
    )]
    ProfileMissing {
        /// The authenticated user the store knows nothing about.
        user_id: UserId,
    },

    /// The store answered with a non-success status (row-level policy
    /// denials surface here as 401/403).
    #[error("data store {endpoint} returned {status}: {body}")]
    DataAccess {
        /// Endpoint path that was called.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Response body excerpt.
        body: String,
    },

    /// The store answered successfully but without the row the operation
    /// requires (e.g. an insert that returned no representation).
    #[error("data store {endpoint} returned no row where one was required")]
    MissingRow {
        /// Endpoint path that was called.
        endpoint: String,
    },

    /// Transport-level failure (connection refused, timeout, TLS).
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        /// Endpoint path that was called.
        endpoint: String,
        /// Underlying transport error.
        source: reqwest::Error,
    },

    /// Response body did not decode into the expected shape.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        /// Endpoint path that was called.
        endpoint: String,
        /// Underlying decode error.
        source: reqwest::Error,
    },

    /// The HTTP client itself could not be constructed.
    #[error("failed to build HTTP client: {source}")]
    ClientBuild {
        /// Underlying builder error.
        source: reqwest::Error,
    },

    /// Blocking call issued outside any Tokio runtime.
    #[error("no async runtime available for blocking store call")]
    NoRuntime,

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Malformed identifier or period code at the boundary.
    #[error(transparent)]
    Validation(#[from] porta_core::ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_missing_message_carries_remediation() {
        let err = StoreError::ProfileMissing {
            user_id: UserId::new(),
        };
        let message = err.to_string();
        assert!(message.contains("ask an administrator"));
        assert!(message.contains("profiles row"));
    }

    #[test]
    fn data_access_message_names_endpoint_and_status() {
        let err = StoreError::DataAccess {
            endpoint: "/rest/v1/submissions".to_string(),
            status: 403,
            body: "permission denied".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("/rest/v1/submissions"));
        assert!(message.contains("403"));
    }
}
