//! Shared HTTP plumbing for the model adapters.
//!
//! One [`reqwest::Client`] is built at startup and cloned into every adapter;
//! clones share the connection pool. Per-call settings (timeout, headers)
//! go on the request, never on the client.

use super::error::ProviderError;
use reqwest::{Client, RequestBuilder};
use scholar_application::ModelError;
use scholar_domain::text::preview;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const ERROR_BODY_PREVIEW: usize = 500;

/// Build the process-wide HTTP client.
pub fn build_http_client() -> Result<Client, ProviderError> {
    Client::builder()
        .user_agent(concat!("scholar-ai/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(CONNECT_TIMEOUT)
        .build()
        .map_err(|e| ProviderError::Client(e.to_string()))
}

/// Parse a configured base URL, dropping any trailing slash.
pub(crate) fn parse_base_url(provider: &'static str, raw: &str) -> Result<String, ProviderError> {
    let parsed = Url::parse(raw).map_err(|e| ProviderError::InvalidBaseUrl {
        provider,
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ProviderError::InvalidBaseUrl {
            provider,
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }
    Ok(raw.trim_end_matches('/').to_string())
}

/// Send one request and decode the JSON envelope.
///
/// Transport failures, non-2xx statuses and undecodable bodies all become
/// [`ModelError`]s. Nothing is retried.
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
    timeout: Duration,
) -> Result<T, ModelError> {
    let response = request
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| transport_error(e, timeout))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| transport_error(e, timeout))?;
    debug!("Model service replied {} ({} bytes)", status, body.len());

    if !status.is_success() {
        return Err(ModelError::HttpStatus {
            status: status.as_u16(),
            body: preview(&body, ERROR_BODY_PREVIEW),
        });
    }

    serde_json::from_str(&body).map_err(|e| ModelError::InvalidEnvelope(e.to_string()))
}

fn transport_error(error: reqwest::Error, timeout: Duration) -> ModelError {
    if error.is_timeout() {
        ModelError::Timeout(timeout)
    } else {
        ModelError::Transport(error.to_string())
    }
}
