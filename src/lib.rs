//! Sitezip: a single-page website mirrorer
//!
//! This crate fetches one web page plus its directly-referenced stylesheets,
//! scripts, and images, and packages them into a deflate-compressed zip
//! archive with a stable per-domain directory layout.

pub mod archive;
pub mod config;
pub mod mirror;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for sitezip operations
///
/// Only run-level failures appear here: invalid input, a failed root-document
/// fetch, or a failed archive write. Per-resource fetch failures never become
/// a `MirrorError`; they are absorbed into the snapshot's aggregate counts.
#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Root fetch failed for {url}: HTTP {status}")]
    RootFetchStatus { url: String, status: u16 },

    #[error("Root fetch failed for {url}: {source}")]
    RootFetchTransport { url: String, source: reqwest::Error },

    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Archive packaging errors
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to persist archive: {0}")]
    Persist(String),
}

/// Result type alias for sitezip operations
pub type Result<T> = std::result::Result<T, MirrorError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crate::url::Origin;
pub use mirror::{Coordinator, FetchOutcome, ResourceKind, ResourceRef, SiteSnapshot};
