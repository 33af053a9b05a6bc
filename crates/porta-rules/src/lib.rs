//! # porta-rules
//!
//! The portal's business rule engine: pure functions, no I/O, no clock.
//!
//! Every function takes the reference date as an argument so the hosting
//! layer decides what "today" means (including which timezone to resolve
//! it in); the rules themselves stay deterministic and trivially testable.
//!
//! - [`window`] — which period is currently reportable and whether the
//!   7-day submission window for it is open.
//! - [`policy`] — whether a given caller may edit a given period right now.

pub mod policy;
pub mod window;

pub use policy::can_edit;
pub use window::{is_within_submission_window, previous_period_code, SUBMISSION_WINDOW_DAYS};
