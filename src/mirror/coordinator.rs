//! Mirror coordinator - main run orchestration logic
//!
//! This module assembles one mirror run: fetch the root document, extract
//! resource references, dispatch concurrent fetches through the bounded
//! pool, and collect the results into a `SiteSnapshot` for the archive
//! builder.

use crate::config::Config;
use crate::mirror::extractor::{extract_resources, ResourceRef};
use crate::mirror::fetcher::build_http_client;
use crate::mirror::pool;
use crate::mirror::retry::{FetchOutcome, RetryPolicy};
use crate::url::Origin;
use crate::{MirrorError, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::collections::HashSet;
use std::sync::Arc;
use url::Url;

/// The in-memory aggregate of one mirror run
///
/// Built incrementally by the coordinator as outcomes arrive; read-only once
/// handed to the archive builder. If the root fetch fails the snapshot is
/// never built.
#[derive(Debug, Clone)]
pub struct SiteSnapshot {
    /// The validated root URL
    pub origin: Origin,

    /// Raw bytes of the root document
    pub root_document: Vec<u8>,

    /// Terminal per-resource outcomes, in arrival order
    pub outcomes: Vec<FetchOutcome>,

    /// Number of distinct resources dispatched
    pub discovered: usize,

    /// Number of resources fetched successfully
    pub succeeded: usize,

    /// Number of resources that exhausted all attempts
    pub failed: usize,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the last outcome arrived
    pub finished_at: DateTime<Utc>,
}

impl SiteSnapshot {
    /// Iterates over the successfully fetched resources and their bodies
    pub fn successes(&self) -> impl Iterator<Item = (&ResourceRef, &[u8])> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            FetchOutcome::Success { resource, body, .. } => Some((resource, body.as_slice())),
            FetchOutcome::Exhausted { .. } => None,
        })
    }

    /// Wall time the run took
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// Main mirror coordinator structure
pub struct Coordinator {
    config: Arc<Config>,
    client: Client,
}

impl Coordinator {
    /// Creates a new coordinator with a shared HTTP client
    pub fn new(config: Config) -> Result<Self> {
        let client = build_http_client(&config.fetch)?;
        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }

    /// Mirrors a single page and its directly-referenced resources
    ///
    /// The root document is fetched exactly once, with no retry: a missing
    /// entry point invalidates the whole mirror, so a root failure aborts
    /// the run before any resource fetch is dispatched. Per-resource
    /// failures are recorded in the snapshot, never raised.
    pub async fn mirror(&self, raw_url: &str) -> Result<SiteSnapshot> {
        let origin = Origin::parse(raw_url)?;
        let started_at = Utc::now();

        tracing::info!("Fetching root document: {}", origin.url());
        let root_document = self.fetch_root(&origin).await?;
        tracing::info!("Root document fetched ({} bytes)", root_document.len());

        let html = String::from_utf8_lossy(&root_document);
        let resources = dedupe_across_kinds(extract_resources(&html, origin.url()));
        let discovered = resources.len();
        tracing::info!("Discovered {} distinct resources", discovered);

        let policy = RetryPolicy::from_config(&self.config.retry);
        let client = self.client.clone();
        let result = pool::dispatch(
            self.config.fetch.pool_size,
            policy,
            resources,
            move |url: Url| {
                let client = client.clone();
                async move { crate::mirror::fetcher::fetch_bytes(&client, &url).await }
            },
        )
        .await;

        let finished_at = Utc::now();
        tracing::info!(
            "Resource fetches complete: {} succeeded, {} failed",
            result.succeeded,
            result.failed
        );

        Ok(SiteSnapshot {
            origin,
            root_document,
            outcomes: result.outcomes,
            discovered,
            succeeded: result.succeeded,
            failed: result.failed,
            started_at,
            finished_at,
        })
    }

    /// Fetches the root document once, surfacing status and transport
    /// failures verbatim
    async fn fetch_root(&self, origin: &Origin) -> Result<Vec<u8>> {
        let url = origin.url().to_string();

        match self.client.get(origin.url().clone()).send().await {
            Ok(response) => {
                let status = response.status();
                if !status.is_success() {
                    return Err(MirrorError::RootFetchStatus {
                        url,
                        status: status.as_u16(),
                    });
                }

                match response.bytes().await {
                    Ok(body) => Ok(body.to_vec()),
                    Err(source) => Err(MirrorError::RootFetchTransport { url, source }),
                }
            }
            Err(source) => Err(MirrorError::RootFetchTransport { url, source }),
        }
    }
}

/// Drops refs whose absolute URL was already seen under an earlier kind
///
/// The extractor deduplicates within a kind; this pass guarantees that no
/// two dispatched fetches target the identical absolute URL. First kind
/// wins, in stylesheet, script, image order.
fn dedupe_across_kinds(resources: Vec<ResourceRef>) -> Vec<ResourceRef> {
    let mut seen: HashSet<Url> = HashSet::new();
    resources
        .into_iter()
        .filter(|resource| seen.insert(resource.url.clone()))
        .collect()
}
