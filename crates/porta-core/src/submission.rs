//! # Submission & Profile Domain Types
//!
//! The two records the portal works with: a read-only authorization
//! [`Profile`] provisioned out-of-band by an administrator, and the
//! [`Submission`] an organisation files for one reporting period.

use serde::{Deserialize, Serialize};

use crate::identity::{Organisation, Role, SubmissionId, UserId};
use crate::period::PeriodCode;
use crate::record::DistributionRecord;

/// Lifecycle state of a submission.
///
/// Two states, no terminal state: a later save reverts `submitted` back
/// to `draft` with no guard. The submission window, not per-record
/// locking, is what prevents late edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    /// Saved but not yet formally submitted.
    Draft,
    /// Formally submitted for the period.
    Submitted,
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Submitted => write!(f, "submitted"),
        }
    }
}

/// A user's authorization context, read from the `profiles` table.
///
/// Exactly one row per user id; created out-of-band by an administrator
/// and never mutated by the portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Identity-provider subject this profile belongs to.
    pub user_id: UserId,
    /// Authorization role.
    pub role: Role,
    /// Organisation the user submits for.
    pub organisation: Organisation,
}

impl Profile {
    /// Whether this profile carries the administrator override.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// One organisation's figures for one reporting period.
///
/// At most one submission exists per (organisation, period) pair; the
/// store client enforces this by loading before writing rather than by a
/// database constraint. The record's derived total is recomputed on every
/// read and write and never trusted from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// Store-assigned identifier, stable across updates.
    pub id: SubmissionId,
    /// Owning organisation.
    pub organisation: Organisation,
    /// Reporting period this row covers.
    pub period_code: PeriodCode,
    /// The five regional figures.
    pub record: DistributionRecord,
    /// Lifecycle state.
    pub status: SubmissionStatus,
    /// User who first created the row.
    pub created_by: UserId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display() {
        assert_eq!(SubmissionStatus::Draft.to_string(), "draft");
        assert_eq!(SubmissionStatus::Submitted.to_string(), "submitted");
    }

    #[test]
    fn status_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&SubmissionStatus::Submitted).unwrap(),
            "\"submitted\""
        );
        let status: SubmissionStatus = serde_json::from_str("\"draft\"").unwrap();
        assert_eq!(status, SubmissionStatus::Draft);
    }

    #[test]
    fn profile_admin_flag() {
        let profile = Profile {
            user_id: UserId::new(),
            role: Role::Admin,
            organisation: Organisation::new("OrgA").unwrap(),
        };
        assert!(profile.is_admin());
    }
}
