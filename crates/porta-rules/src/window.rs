//! # Period Calculator
//!
//! Computes the canonical "previous calendar month" code for a reference
//! date and decides whether that date falls inside the submission window.
//!
//! ## Window Policy
//!
//! Each period is editable by ordinary submitters only during the first
//! seven days of the *following* month: May figures are entered 1–7 June.
//! The bound is hard-coded portal policy, not configuration.

use chrono::{Datelike, NaiveDate};
use porta_core::PeriodCode;

/// Last day of month on which the previous period is still editable
/// (inclusive).
pub const SUBMISSION_WINDOW_DAYS: u32 = 7;

/// The `YYYY-MM` code of the calendar month immediately preceding the
/// month containing `reference`.
///
/// Takes the first day of the reference month and steps back one day to
/// land on the last day of the prior month — correct calendar subtraction,
/// so the January → previous-December rollover and leap years come out
/// right with no day-count arithmetic.
pub fn previous_period_code(reference: NaiveDate) -> PeriodCode {
    let first_of_month = reference
        .with_day(1)
        .expect("day 1 exists in every month");
    let last_of_previous = first_of_month
        .pred_opt()
        .expect("date not at calendar minimum");
    PeriodCode::from_year_month(last_of_previous.year(), last_of_previous.month())
        .expect("calendar month of a valid date is a valid period")
}

/// Whether `reference` falls inside the submission window for `period`.
///
/// True iff the day-of-month is in `[1, 7]` and `period` is exactly the
/// previous calendar month of `reference`. Any other period — older,
/// current, or future — is closed regardless of the day.
pub fn is_within_submission_window(period: &PeriodCode, reference: NaiveDate) -> bool {
    reference.day() <= SUBMISSION_WINDOW_DAYS && previous_period_code(reference) == *period
}
