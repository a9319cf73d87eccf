//! Output module for sitezip
//!
//! Run summaries for the presentation layer.

mod summary;

pub use summary::{print_summary, MirrorSummary};
