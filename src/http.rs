//! Shared plumbing for outbound HTTP calls.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::errors::{Error, Result};

pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Builds a client with the crate's user agent and a fixed request timeout.
pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| Error::Configuration(format!("Failed to create HTTP client: {}", e)))
}

/// Decodes a JSON body, turning non-2xx statuses into [`Error::Upstream`].
///
/// The body is decoded with serde_json directly so a missing field surfaces
/// as [`Error::Decode`] rather than an opaque transport error.
pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(Error::Upstream { status, body });
    }

    Ok(serde_json::from_str(&body)?)
}
