//! HTTP fetcher implementation
//!
//! This module builds the shared HTTP client and issues single fetch
//! attempts, classifying transport failures for the retry controller.

use crate::config::FetchConfig;
use crate::mirror::retry::AttemptError;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// Builds the HTTP client shared by all fetches in one run
///
/// The client carries the per-attempt timeout from the configuration, a
/// connect timeout, the configured user agent, and a bounded redirect
/// policy. `reqwest::Client` is an internal connection pool and is safe to
/// share across concurrent workers.
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(config.request_timeout())
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Issues one fetch attempt for a resource URL
///
/// A 2xx response yields the body bytes. Any non-2xx response or transport
/// failure is returned as an `AttemptError` for the retry controller to
/// classify as transient.
pub async fn fetch_bytes(client: &Client, url: &url::Url) -> Result<Vec<u8>, AttemptError> {
    match client.get(url.clone()).send().await {
        Ok(response) => {
            let status = response.status();
            if !status.is_success() {
                return Err(AttemptError::Status(status.as_u16()));
            }

            match response.bytes().await {
                Ok(body) => Ok(body.to_vec()),
                Err(e) => Err(classify_transport_error(e)),
            }
        }
        Err(e) => Err(classify_transport_error(e)),
    }
}

/// Classifies a reqwest error into an attempt error
fn classify_transport_error(e: reqwest::Error) -> AttemptError {
    if e.is_timeout() {
        AttemptError::Timeout
    } else if e.is_connect() {
        AttemptError::Connect
    } else {
        AttemptError::Transport(e.to_string())
    }
}
