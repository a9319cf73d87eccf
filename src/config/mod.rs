//! Configuration module for sitezip
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. The configuration file is optional; every field has a default.
//!
//! # Example
//!
//! ```no_run
//! use sitezip::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sitezip.toml")).unwrap();
//! println!("Fetch pool size: {}", config.fetch.pool_size);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, FetchConfig, OutputConfig, RetryConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
