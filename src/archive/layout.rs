//! Deterministic archive layout
//!
//! Entry paths are relative to the per-domain root folder, use forward
//! slashes only, and are stable across runs: the same URL and the same
//! fetched bytes always produce the same path.

use crate::mirror::{ResourceRef, SiteSnapshot};
use crate::url::file_name;
use std::collections::BTreeMap;

/// Stored path of the root document inside the archive
pub const ROOT_DOCUMENT_PATH: &str = "html/index.html";

/// A (relative-path, byte-content) pair written into the output archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Path relative to the per-domain root, forward slashes only
    pub path: String,

    /// Entry content
    pub bytes: Vec<u8>,
}

/// Derives the archive entry path for a resource
///
/// Returns `None` when the resource URL has no derivable filename (its path
/// has no final segment); such resources are silently dropped from the
/// archive even though their fetch succeeded.
pub fn entry_path(resource: &ResourceRef) -> Option<String> {
    let name = file_name(&resource.url)?;
    Some(format!("{}/{}", resource.kind.subdir(), name))
}

/// Lays out a snapshot as archive entries
///
/// The root document always lands at `html/index.html`; every successful
/// resource outcome with a derivable filename lands under its kind's
/// subfolder. Exhausted resources are omitted entirely. Entries are keyed by
/// path, so two distinct URLs sharing a filename within a kind collapse to
/// one entry, the later arrival winning.
pub fn layout_entries(snapshot: &SiteSnapshot) -> Vec<ArchiveEntry> {
    let mut entries: BTreeMap<String, Vec<u8>> = BTreeMap::new();
    entries.insert(ROOT_DOCUMENT_PATH.to_string(), snapshot.root_document.clone());

    for (resource, body) in snapshot.successes() {
        if let Some(path) = entry_path(resource) {
            entries.insert(path, body.to_vec());
        }
    }

    entries
        .into_iter()
        .map(|(path, bytes)| ArchiveEntry { path, bytes })
        .collect()
}
