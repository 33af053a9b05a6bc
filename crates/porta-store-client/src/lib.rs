//! # porta-store-client
//!
//! Typed HTTP client for the portal's two external collaborators: the
//! identity provider (password sign-in, token revocation) and the
//! row-level-security data store (profiles, submissions).
//!
//! ## Architecture
//!
//! Each client wraps a `reqwest::Client` with the store base URL, the api
//! key as a default header, and request/response mapping. All clients are
//! `Send + Sync` and designed to be shared via `Arc`. Calls are
//! synchronous from the caller's point of view — one blocking round-trip
//! per interaction — and bridge onto the ambient Tokio runtime internally.
//!
//! Every data-store call takes an explicit [`Session`] and attaches its
//! bearer token, so row-level policies evaluate against the authenticated
//! user on every interaction, never against the anonymous api key.
//!
//! ## Error Handling
//!
//! All failures surface as [`StoreError`] with the endpoint, HTTP status,
//! and a response body excerpt. Nothing is retried: every failure is
//! reported to the interacting user and the operation must be manually
//! re-triggered.

pub mod auth;
pub mod config;
pub mod error;
pub mod export;
pub mod profiles;
pub mod session;
pub mod submissions;

mod transport;

pub use auth::AuthClient;
pub use config::{ConfigError, StoreConfig};
pub use error::StoreError;
pub use export::{export_filename, export_period_csv, EXPORT_COLUMNS};
pub use profiles::ProfileDirectory;
pub use session::{Session, Teardown};
pub use submissions::{HttpSubmissionRepository, MockSubmissionRepository, SubmissionRepository};
