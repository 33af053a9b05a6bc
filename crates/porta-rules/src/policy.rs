//! # Access Policy
//!
//! Maps (role, period, reference date) to an edit-permission decision.
//! Administrators bypass the submission window unconditionally; ordinary
//! submitters are gated strictly by it.

use chrono::NaiveDate;
use porta_core::PeriodCode;

use crate::window::is_within_submission_window;

/// Whether the caller may edit the submission for `period` on `reference`.
///
/// `is_admin || is_within_submission_window(period, reference)` — nothing
/// more. Side-effect-free; the UI layer disables the save/submit actions
/// when this returns false, and the store's row-level policies are the
/// backstop behind it.
pub fn can_edit(is_admin: bool, period: &PeriodCode, reference: NaiveDate) -> bool {
    is_admin || is_within_submission_window(period, reference)
}
