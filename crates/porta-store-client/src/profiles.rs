//! # Profile Directory
//!
//! Read-only access to the `profiles` table: one authorization row per
//! user (role + organisation), provisioned out-of-band by an
//! administrator. A missing row is the portal's best-known operational
//! failure mode and gets its own error with remediation guidance.

use std::collections::BTreeSet;

use porta_core::{Organisation, Profile, UserId};
use serde::Deserialize;

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::session::Session;
use crate::transport;

const PROFILES_ENDPOINT: &str = "/rest/v1/profiles";

/// Client for profile lookups and the admin organisation listing.
#[derive(Debug)]
pub struct ProfileDirectory {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct OrganisationRow {
    organisation: String,
}

impl ProfileDirectory {
    /// Create a profile directory client from the shared configuration.
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        Ok(Self {
            client: transport::build_client(config)?,
            base_url: config.base_url.clone(),
        })
    }

    /// Fetch the profile row for an authenticated user.
    ///
    /// # Errors
    ///
    /// [`StoreError::ProfileMissing`] when the store has no row for the
    /// user (fatal for the session; the message tells the user what an
    /// administrator must provision).
    pub fn fetch(&self, session: &Session, user_id: UserId) -> Result<Profile, StoreError> {
        let rt = transport::runtime_handle()?;
        let url = format!("{}{PROFILES_ENDPOINT}", self.base_url);

        rt.block_on(async {
            let request = self
                .client
                .get(&url)
                .header(reqwest::header::AUTHORIZATION, session.authorization())
                .query(&[
                    ("user_id", format!("eq.{user_id}")),
                    ("select", "user_id,role,organisation".to_string()),
                ]);

            let resp = transport::send(request, PROFILES_ENDPOINT).await?;
            let resp = transport::require_success(resp, PROFILES_ENDPOINT).await?;

            let rows: Vec<Profile> =
                resp.json()
                    .await
                    .map_err(|source| StoreError::Deserialization {
                        endpoint: PROFILES_ENDPOINT.to_string(),
                        source,
                    })?;

            rows.into_iter()
                .next()
                .ok_or(StoreError::ProfileMissing { user_id })
        })
    }

    /// Distinct organisations present in the profiles table, sorted
    /// ascending. Used by the admin organisation pickers.
    ///
    /// Rows with blank organisations are skipped rather than failing the
    /// whole listing.
    pub fn list_organisations(&self, session: &Session) -> Result<Vec<Organisation>, StoreError> {
        let rt = transport::runtime_handle()?;
        let url = format!("{}{PROFILES_ENDPOINT}", self.base_url);

        rt.block_on(async {
            let request = self
                .client
                .get(&url)
                .header(reqwest::header::AUTHORIZATION, session.authorization())
                .query(&[("select", "organisation")]);

            let resp = transport::send(request, PROFILES_ENDPOINT).await?;
            let resp = transport::require_success(resp, PROFILES_ENDPOINT).await?;

            let rows: Vec<OrganisationRow> =
                resp.json()
                    .await
                    .map_err(|source| StoreError::Deserialization {
                        endpoint: PROFILES_ENDPOINT.to_string(),
                        source,
                    })?;

            let mut distinct = BTreeSet::new();
            for row in rows {
                match Organisation::new(row.organisation) {
                    Ok(org) => {
                        distinct.insert(org);
                    }
                    Err(e) => {
                        tracing::debug!("skipping unusable organisation row: {e}");
                    }
                }
            }
            Ok(distinct.into_iter().collect())
        })
    }
}
