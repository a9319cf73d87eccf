//! Run summary generation
//!
//! The presentation layer consumes a `MirrorSummary` built from the final
//! snapshot; the engine exposes nothing else to it.

use crate::mirror::SiteSnapshot;
use std::path::PathBuf;

/// Summary of one completed mirror run
#[derive(Debug, Clone)]
pub struct MirrorSummary {
    /// The mirrored origin URL
    pub origin: String,

    /// Number of distinct resources discovered and dispatched
    pub discovered: usize,

    /// Resources fetched successfully
    pub succeeded: usize,

    /// Resources that exhausted all attempts
    pub failed: usize,

    /// Wall time of the run
    pub elapsed: chrono::Duration,

    /// Where the archive was written
    pub archive_path: PathBuf,

    /// Size of the written archive in bytes
    pub archive_bytes: u64,
}

impl MirrorSummary {
    /// Builds a summary from a snapshot and the written archive
    pub fn from_snapshot(snapshot: &SiteSnapshot, archive_path: PathBuf, archive_bytes: u64) -> Self {
        Self {
            origin: snapshot.origin.to_string(),
            discovered: snapshot.discovered,
            succeeded: snapshot.succeeded,
            failed: snapshot.failed,
            elapsed: snapshot.elapsed(),
            archive_path,
            archive_bytes,
        }
    }
}

/// Prints a run summary to stdout in a formatted manner
pub fn print_summary(summary: &MirrorSummary) {
    println!("=== Mirror Summary ===\n");

    println!("Origin: {}", summary.origin);
    println!("Resources discovered: {}", summary.discovered);

    let success_rate = if summary.discovered > 0 {
        (summary.succeeded as f64 / summary.discovered as f64) * 100.0
    } else {
        100.0
    };
    println!("  Succeeded: {} ({:.1}%)", summary.succeeded, success_rate);
    println!("  Failed: {}", summary.failed);
    println!();

    let elapsed_secs = summary.elapsed.num_milliseconds() as f64 / 1000.0;
    println!("Elapsed: {:.2}s", elapsed_secs);
    println!(
        "Archive: {} ({} bytes)",
        summary.archive_path.display(),
        summary.archive_bytes
    );
}
