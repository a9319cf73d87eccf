//! The concurrent resource-fetch engine
//!
//! Link discovery from a fetched document, bounded-parallel retrieval of
//! referenced resources with per-resource retry/backoff, and collection of
//! outcomes into a `SiteSnapshot` for archive packaging.

mod coordinator;
mod extractor;
mod fetcher;
mod pool;
mod retry;

pub use coordinator::{Coordinator, SiteSnapshot};
pub use extractor::{extract_resources, ResourceKind, ResourceRef};
pub use fetcher::{build_http_client, fetch_bytes};
pub use pool::{dispatch, DispatchResult};
pub use retry::{fetch_with_retry, AttemptError, FetchAttempt, FetchOutcome, FetchState, RetryPolicy};

use crate::config::Config;
use crate::Result;

/// Convenience entry point: mirror one URL with the given configuration
///
/// # Example
///
/// ```no_run
/// use sitezip::config::Config;
///
/// # async fn example() -> sitezip::Result<()> {
/// let snapshot = sitezip::mirror::mirror(Config::default(), "https://example.com/").await?;
/// println!("{} of {} resources fetched", snapshot.succeeded, snapshot.discovered);
/// # Ok(())
/// # }
/// ```
pub async fn mirror(config: Config, url: &str) -> Result<SiteSnapshot> {
    let coordinator = Coordinator::new(config)?;
    coordinator.mirror(url).await
}
