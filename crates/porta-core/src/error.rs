//! Structured validation errors for the porta-core value types.

/// Errors from constructing porta-core value types out of untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Period code does not match the `YYYY-MM` format or names an
    /// impossible month.
    #[error("invalid period code (expected YYYY-MM): {0}")]
    InvalidPeriodCode(String),

    /// Organisation identifier is empty or otherwise malformed.
    #[error("invalid organisation identifier: {0:?}")]
    InvalidOrganisation(String),

    /// Role string is not one of the known roles.
    #[error("unknown role: {0:?}")]
    UnknownRole(String),
}
