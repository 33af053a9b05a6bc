//! Shared HTTP plumbing for the store clients.
//!
//! Every client in this crate speaks to the same host with the same api
//! key and timeout, so client construction and the transport/5xx error
//! mapping live here once. Status handling below 500 stays with the
//! callers — a 401 means different things to sign-in and to a table read.

use std::time::Duration;

use crate::config::StoreConfig;
use crate::error::StoreError;

/// Build a `reqwest::Client` with the store api key and content type as
/// default headers and the configured timeout.
pub(crate) fn build_client(config: &StoreConfig) -> Result<reqwest::Client, StoreError> {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        "apikey",
        reqwest::header::HeaderValue::from_str(&config.api_key).map_err(|_| {
            StoreError::Config(crate::config::ConfigError::InvalidApiKey {
                reason: "api key contains non-header characters".to_string(),
            })
        })?,
    );
    headers.insert(
        reqwest::header::CONTENT_TYPE,
        reqwest::header::HeaderValue::from_static("application/json"),
    );

    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .default_headers(headers)
        .build()
        .map_err(|source| StoreError::ClientBuild { source })
}

/// Send a request, mapping transport failures and 5xx responses.
///
/// Client-error statuses (4xx) pass through so each caller can map them
/// to its own variant.
pub(crate) async fn send(
    request: reqwest::RequestBuilder,
    endpoint: &str,
) -> Result<reqwest::Response, StoreError> {
    let resp = request.send().await.map_err(|source| StoreError::Http {
        endpoint: endpoint.to_string(),
        source,
    })?;

    if resp.status().is_server_error() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        return Err(StoreError::DataAccess {
            endpoint: endpoint.to_string(),
            status,
            body,
        });
    }

    Ok(resp)
}

/// Map any remaining non-success status to [`StoreError::DataAccess`].
pub(crate) async fn require_success(
    resp: reqwest::Response,
    endpoint: &str,
) -> Result<reqwest::Response, StoreError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    Err(StoreError::DataAccess {
        endpoint: endpoint.to_string(),
        status,
        body,
    })
}

/// Handle on the ambient Tokio runtime for the blocking call bridge.
pub(crate) fn runtime_handle() -> Result<tokio::runtime::Handle, StoreError> {
    tokio::runtime::Handle::try_current().map_err(|_| StoreError::NoRuntime)
}
