//! Bounded worker pool for resource fetches
//!
//! Each discovered resource runs as its own tokio task, gated by a shared
//! semaphore so that the number of in-flight fetches never exceeds the pool
//! size. A resource's backoff wait holds its permit, so waiting work counts
//! against the pool too. Outcomes flow back over a channel in arrival order;
//! one resource's failure never cancels or blocks another's fetch.

use crate::mirror::extractor::ResourceRef;
use crate::mirror::retry::{fetch_with_retry, AttemptError, FetchOutcome, RetryPolicy};
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use url::Url;

/// Result of dispatching all discovered resources
#[derive(Debug)]
pub struct DispatchResult {
    /// Terminal outcomes in arrival (completion) order
    pub outcomes: Vec<FetchOutcome>,

    /// Number of resources that fetched successfully
    pub succeeded: usize,

    /// Number of resources that exhausted all attempts
    pub failed: usize,
}

/// Dispatches resource fetches through a bounded worker pool
///
/// `fetch` issues one attempt for a URL; it is injectable so tests can bound
/// concurrency with an instrumented stub. The aggregate counters are the
/// only shared mutable state and are updated with atomic increments, so at
/// completion `succeeded + failed` always equals the number of dispatched
/// resources.
pub async fn dispatch<F, Fut>(
    pool_size: usize,
    policy: RetryPolicy,
    resources: Vec<ResourceRef>,
    fetch: F,
) -> DispatchResult
where
    F: Fn(Url) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<u8>, AttemptError>> + Send + 'static,
{
    let total = resources.len();
    let semaphore = Arc::new(Semaphore::new(pool_size));
    let (tx, mut rx) = mpsc::channel::<FetchOutcome>(total.max(1));
    let succeeded = Arc::new(AtomicUsize::new(0));
    let failed = Arc::new(AtomicUsize::new(0));
    let fetch = Arc::new(fetch);
    let policy = Arc::new(policy);

    for resource in resources {
        let semaphore = semaphore.clone();
        let tx = tx.clone();
        let fetch = fetch.clone();
        let policy = policy.clone();
        let succeeded = succeeded.clone();
        let failed = failed.clone();

        tokio::spawn(async move {
            // Holds the permit across the whole retry sequence, backoff
            // waits included
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => return,
            };

            let url = resource.url.clone();
            let outcome = fetch_with_retry(&policy, resource, move || (*fetch)(url.clone())).await;

            if outcome.is_success() {
                succeeded.fetch_add(1, Ordering::SeqCst);
            } else {
                failed.fetch_add(1, Ordering::SeqCst);
            }

            // The receiver outlives all senders; a send failure means the
            // collector is gone and the outcome has nowhere to go
            let _ = tx.send(outcome).await;
        });
    }

    // Close our sender so the channel drains once every task finishes
    drop(tx);

    let mut outcomes = Vec::with_capacity(total);
    while let Some(outcome) = rx.recv().await {
        outcomes.push(outcome);
    }

    DispatchResult {
        outcomes,
        succeeded: succeeded.load(Ordering::SeqCst),
        failed: failed.load(Ordering::SeqCst),
    }
}
