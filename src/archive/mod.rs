//! Archive construction for sitezip
//!
//! Lays fetched resources into a deterministic per-domain directory
//! structure and packages them into a deflate-compressed zip.

mod builder;
mod layout;

pub use builder::{build_archive, list_archive, write_archive};
pub use layout::{entry_path, layout_entries, ArchiveEntry, ROOT_DOCUMENT_PATH};
