//! Retry controller for individual resource fetches
//!
//! Each resource fetch runs through a small state machine:
//! `Pending -> Attempting -> {Success | RetryWait -> Attempting | Exhausted}`.
//! Failed attempts wait out an exponential backoff schedule before the next
//! attempt; after `max_attempts` consecutive failures the resource is
//! exhausted and reported as a terminal failure.
//!
//! The controller owns its attempt history exclusively and touches no state
//! belonging to other concurrently-running fetches, so any number of
//! controllers can run in parallel.

use crate::config::RetryConfig;
use crate::mirror::extractor::ResourceRef;
use chrono::{DateTime, Utc};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// A single-attempt fetch failure, eligible for retry
///
/// These errors are internal to the retry controller; they surface only as
/// the cause string of an eventual `FetchOutcome::Exhausted`.
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error("HTTP status {0}")]
    Status(u16),

    #[error("request timeout")]
    Timeout,

    #[error("connection failed")]
    Connect,

    #[error("transport error: {0}")]
    Transport(String),
}

/// State of one resource's fetch/retry sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    /// No attempt issued yet
    Pending,

    /// A fetch attempt is in flight
    Attempting,

    /// Waiting out the backoff delay before the next attempt
    RetryWait,

    /// A 2xx response was received
    Success,

    /// All allowed attempts failed
    Exhausted,
}

impl FetchState {
    /// Returns true if no further attempts will occur
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Exhausted)
    }
}

/// Retry policy for a single resource fetch
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts before the resource is exhausted
    pub max_attempts: u32,

    /// Delay before the first retry
    pub base_delay: Duration,

    /// Multiplier applied per failed attempt
    pub backoff_factor: u32,
}

impl RetryPolicy {
    /// Builds a policy from the retry section of the configuration
    pub fn from_config(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            base_delay: config.base_delay(),
            backoff_factor: config.backoff_factor,
        }
    }

    /// Returns the backoff delay after the attempt with the given 0-based
    /// index fails
    ///
    /// With the defaults (2s base, factor 2) this yields the strictly
    /// increasing schedule 2s, 4s, 8s, ...
    pub fn delay_after(&self, attempt_index: u32) -> Duration {
        self.base_delay * self.backoff_factor.pow(attempt_index)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}

/// One recorded fetch attempt
#[derive(Debug, Clone)]
pub struct FetchAttempt {
    /// 0-based attempt index
    pub index: u32,

    /// When the attempt was issued
    pub started_at: DateTime<Utc>,

    /// Why the attempt failed
    pub error: String,
}

/// Terminal result for one resource, immutable once recorded
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// The resource was fetched; `body` holds the response bytes
    Success {
        resource: ResourceRef,
        body: Vec<u8>,
        attempts: u32,
    },

    /// Every allowed attempt failed
    Exhausted {
        resource: ResourceRef,
        attempts: u32,
        cause: String,
    },
}

impl FetchOutcome {
    /// Returns the resource this outcome belongs to
    pub fn resource(&self) -> &ResourceRef {
        match self {
            Self::Success { resource, .. } => resource,
            Self::Exhausted { resource, .. } => resource,
        }
    }

    /// Returns true if the fetch succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Fetches one resource with bounded-attempt exponential backoff
///
/// `operation` issues one fetch attempt; it is injectable so tests can drive
/// the state machine with a fake transport. Attempts are strictly
/// sequential: attempt N+1 never starts before attempt N's outcome is known
/// and, on failure, before its backoff delay has elapsed.
pub async fn fetch_with_retry<F, Fut>(
    policy: &RetryPolicy,
    resource: ResourceRef,
    mut operation: F,
) -> FetchOutcome
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Vec<u8>, AttemptError>>,
{
    let mut state = FetchState::Pending;
    let mut history: Vec<FetchAttempt> = Vec::with_capacity(policy.max_attempts as usize);

    tracing::trace!(url = %resource.url, state = ?state, "starting resource fetch");

    for index in 0..policy.max_attempts {
        state = FetchState::Attempting;
        let started_at = Utc::now();
        tracing::trace!(url = %resource.url, attempt = index, state = ?state, "issuing attempt");

        match operation().await {
            Ok(body) => {
                state = FetchState::Success;
                tracing::debug!(
                    url = %resource.url,
                    attempts = index + 1,
                    state = ?state,
                    "resource fetched"
                );
                return FetchOutcome::Success {
                    resource,
                    body,
                    attempts: index + 1,
                };
            }
            Err(e) => {
                tracing::debug!(url = %resource.url, attempt = index, error = %e, "fetch attempt failed");
                history.push(FetchAttempt {
                    index,
                    started_at,
                    error: e.to_string(),
                });

                if index + 1 < policy.max_attempts {
                    state = FetchState::RetryWait;
                    let delay = policy.delay_after(index);
                    tracing::debug!(
                        url = %resource.url,
                        delay_ms = delay.as_millis() as u64,
                        state = ?state,
                        "backing off before retry"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    state = FetchState::Exhausted;
    let cause = history
        .last()
        .map(|attempt| attempt.error.clone())
        .unwrap_or_else(|| "no attempts made".to_string());
    tracing::warn!(
        url = %resource.url,
        attempts = policy.max_attempts,
        state = ?state,
        cause = %cause,
        "resource exhausted all attempts"
    );

    FetchOutcome::Exhausted {
        resource,
        attempts: policy.max_attempts,
        cause,
    }
}
