//! # Identity Provider Client
//!
//! Password sign-in and token revocation against the hosted identity
//! provider. Sign-in yields an explicit [`Session`] carrying the bearer
//! token; every subsequent data-store call takes that session and
//! attaches the token itself, so row-level policies always evaluate
//! against the authenticated user.
//!
//! Teardown is deliberately two-tier: revocation failure at the provider
//! is reported but non-fatal ([`Teardown::RevocationFailed`]), because
//! the local session is discarded regardless.

use porta_core::UserId;
use serde::Deserialize;
use uuid::Uuid;

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::session::{Session, Teardown};
use crate::transport;

/// Client for the identity provider endpoints.
#[derive(Debug)]
pub struct AuthClient {
    client: reqwest::Client,
    base_url: String,
}

/// Successful password-grant response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: TokenUser,
}

#[derive(Debug, Deserialize)]
struct TokenUser {
    id: Uuid,
}

impl AuthClient {
    /// Create an identity-provider client from the shared configuration.
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        Ok(Self {
            client: transport::build_client(config)?,
            base_url: config.base_url.clone(),
        })
    }

    /// Sign in with email and password, returning a fresh [`Session`].
    ///
    /// # Errors
    ///
    /// [`StoreError::Authentication`] for rejected credentials (4xx),
    /// [`StoreError::Http`]/[`StoreError::DataAccess`] for transport and
    /// provider failures.
    pub fn sign_in(&self, email: &str, password: &str) -> Result<Session, StoreError> {
        let rt = transport::runtime_handle()?;

        let endpoint = "/auth/v1/token";
        let url = format!("{}{endpoint}?grant_type=password", self.base_url);
        let body = serde_json::json!({
            "email": email,
            "password": password,
        });

        rt.block_on(async {
            let resp = transport::send(self.client.post(&url).json(&body), endpoint).await?;

            if resp.status().is_client_error() {
                let status = resp.status().as_u16();
                let body = resp.text().await.unwrap_or_default();
                return Err(StoreError::Authentication {
                    reason: format!("HTTP {status}: {body}"),
                });
            }

            let token: TokenResponse =
                resp.json()
                    .await
                    .map_err(|source| StoreError::Deserialization {
                        endpoint: endpoint.to_string(),
                        source,
                    })?;

            tracing::debug!(user_id = %token.user.id, "signed in");
            Ok(Session::new(UserId::from_uuid(token.user.id), token.access_token))
        })
    }

    /// Revoke the session token at the provider.
    ///
    /// Returns [`Teardown::RevocationFailed`] (not an error) when the
    /// provider rejects or cannot be reached — the caller discards the
    /// local session either way. The only `Err` cases are must-halt ones,
    /// such as calling from outside a runtime.
    pub fn sign_out(&self, session: &Session) -> Result<Teardown, StoreError> {
        let rt = transport::runtime_handle()?;

        let endpoint = "/auth/v1/logout";
        let url = format!("{}{endpoint}", self.base_url);

        rt.block_on(async {
            let outcome = self
                .client
                .post(&url)
                .header(reqwest::header::AUTHORIZATION, session.authorization())
                .send()
                .await;

            match outcome {
                Ok(resp) if resp.status().is_success() => Ok(Teardown::Complete),
                Ok(resp) => {
                    let status = resp.status();
                    tracing::warn!(%status, "token revocation rejected by provider");
                    Ok(Teardown::RevocationFailed {
                        reason: format!("HTTP {status}"),
                    })
                }
                Err(e) => {
                    tracing::warn!("token revocation failed: {e}");
                    Ok(Teardown::RevocationFailed {
                        reason: e.to_string(),
                    })
                }
            }
        })
    }
}
