//! # porta-core
//!
//! Foundational types for the PORTA monthly submission portal.
//!
//! Everything in this crate is a plain value type: identifier newtypes
//! validated at construction, the `YYYY-MM` reporting-period code, the
//! fixed-shape distribution record with its derived total, and the
//! submission/profile domain structs shared by the rule engine and the
//! store client.
//!
//! No I/O happens here. The store client (`porta-store-client`) owns the
//! wire representations; the rule engine (`porta-rules`) owns the window
//! and edit-permission logic.

pub mod error;
pub mod identity;
pub mod period;
pub mod record;
pub mod submission;

pub use error::ValidationError;
pub use identity::{Organisation, Role, SubmissionId, UserId};
pub use period::PeriodCode;
pub use record::DistributionRecord;
pub use submission::{Profile, Submission, SubmissionStatus};
