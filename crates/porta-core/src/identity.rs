//! # Identity Newtypes
//!
//! Domain-primitive newtypes for identifiers throughout the portal.
//! Each identifier is a distinct type — you cannot pass a [`UserId`]
//! where a [`SubmissionId`] is expected.
//!
//! ## Validation
//!
//! The string-based [`Organisation`] identifier validates at construction
//! time. UUID-based identifiers ([`UserId`], [`SubmissionId`]) are always
//! valid by construction. [`UserId`] values originate from the external
//! identity provider; [`SubmissionId`] values are assigned by the data
//! store on first insert.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Helper macro to implement `Deserialize` for string newtypes that must
/// validate their contents. Deserializes as a plain `String`, then routes
/// through the type's `new()` constructor so that invalid values are
/// rejected at deserialization time — not silently accepted.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// UUID-based identifiers (always valid by construction)
// ---------------------------------------------------------------------------

/// The subject identifier issued by the external identity provider.
///
/// Foreign key into the `profiles` table; the portal never mints these
/// itself outside of tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    /// Create a new random user identifier (test fixtures and mocks).
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a user identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// The identifier of one submission row, assigned by the data store on
/// first insert and preserved across in-place updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmissionId(Uuid);

impl SubmissionId {
    /// Create a new random submission identifier (used by the in-memory
    /// mock store to stand in for store-assigned ids).
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a submission identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SubmissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for SubmissionId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// String-based identifiers (validated at construction)
// ---------------------------------------------------------------------------

/// Organisation identifier as provisioned in the `profiles` table.
///
/// # Validation
///
/// - Must be non-empty after trimming surrounding whitespace
/// - At most 120 characters
///
/// Stored trimmed; interior characters are unrestricted (organisation
/// names carry spaces and punctuation).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Organisation(String);

impl_validating_deserialize!(Organisation);

impl Organisation {
    /// Create an organisation identifier, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidOrganisation`] if the trimmed
    /// value is empty or longer than 120 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.len() > 120 {
            return Err(ValidationError::InvalidOrganisation(raw));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Access the organisation string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Organisation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

/// Authorization role carried by a profile row.
///
/// Administrators bypass the submission window and may browse and export
/// every organisation's data; submitters are gated strictly by the window
/// and see only their own organisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access: window bypass, any organisation, CSV export.
    Admin,
    /// Ordinary submitter: own organisation, window-gated edits.
    Submitter,
}

impl Role {
    /// Whether this role carries the administrator override.
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Parse a role from its lowercase wire form.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownRole`] for anything other than
    /// `"admin"` or `"submitter"`.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value {
            "admin" => Ok(Self::Admin),
            "submitter" => Ok(Self::Submitter),
            other => Err(ValidationError::UnknownRole(other.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Submitter => write!(f, "submitter"),
        }
    }
}
