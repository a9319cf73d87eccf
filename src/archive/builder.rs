//! Zip packaging and atomic persistence
//!
//! The archive is built fully in memory, then written through a temporary
//! file in the destination directory and renamed into place. A packaging or
//! write failure leaves no partial artifact behind.

use crate::archive::layout::layout_entries;
use crate::mirror::SiteSnapshot;
use crate::ArchiveError;
use std::fs::File;
use std::io::{Cursor, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Builds the deflate-compressed zip archive for a snapshot, in memory
///
/// Given an identical snapshot, the set of entries is identical; entry
/// ordering inside the container is not part of the contract.
pub fn build_archive(snapshot: &SiteSnapshot) -> Result<Vec<u8>, ArchiveError> {
    let entries = layout_entries(snapshot);
    let mut cursor = Cursor::new(Vec::new());

    {
        let mut writer = ZipWriter::new(&mut cursor);
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        for entry in &entries {
            writer.start_file(entry.path.as_str(), options)?;
            writer.write_all(&entry.bytes)?;
        }

        writer.finish()?;
    }

    tracing::debug!("Archive built: {} entries", entries.len());
    Ok(cursor.into_inner())
}

/// Builds the archive and persists it atomically at `dest`
///
/// The bytes go through a named temporary file in the destination directory,
/// renamed over `dest` on success. The temporary file is reclaimed on every
/// exit path, including build failure.
///
/// Returns the number of bytes written.
pub fn write_archive(snapshot: &SiteSnapshot, dest: &Path) -> Result<u64, ArchiveError> {
    let bytes = build_archive(snapshot)?;

    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(&bytes)?;
    tmp.persist(dest)
        .map_err(|e| ArchiveError::Persist(e.to_string()))?;

    tracing::info!("Archive written to {} ({} bytes)", dest.display(), bytes.len());
    Ok(bytes.len() as u64)
}

/// Lists the entries of an existing archive as (name, uncompressed size)
/// pairs
pub fn list_archive(path: &Path) -> Result<Vec<(String, u64)>, ArchiveError> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file)?;

    let mut entries = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let entry = archive.by_index(index)?;
        entries.push((entry.name().to_string(), entry.size()));
    }

    Ok(entries)
}
