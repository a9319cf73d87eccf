//! Sitezip main entry point
//!
//! This is the command-line interface for the sitezip single-page mirrorer.

use anyhow::Context;
use clap::Parser;
use sitezip::archive::{list_archive, write_archive};
use sitezip::config::{load_config_with_hash, Config};
use sitezip::mirror::Coordinator;
use sitezip::output::{print_summary, MirrorSummary};
use sitezip::url::Origin;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Sitezip: mirror a single web page into a zip archive
///
/// Sitezip fetches one page plus its directly-referenced stylesheets,
/// scripts, and images, and packages them into a deflate-compressed zip
/// with a stable per-domain layout.
#[derive(Parser, Debug)]
#[command(name = "sitezip")]
#[command(version = "1.0.0")]
#[command(about = "Mirror a single web page into a zip archive", long_about = None)]
struct Cli {
    /// URL of the page to mirror
    #[arg(value_name = "URL", required_unless_present = "list")]
    url: Option<String>,

    /// Path of the zip archive to write (overrides the config file)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Validate the URL and configuration, print the plan, and exit
    #[arg(long, conflicts_with = "list")]
    dry_run: bool,

    /// List the entries of an existing archive and exit
    #[arg(long, value_name = "ARCHIVE")]
    list: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // --list needs no configuration or network
    if let Some(archive) = &cli.list {
        return handle_list(archive);
    }

    // Load configuration, or fall back to defaults when no file is given
    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    let archive_path = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output.archive_path));

    let url = cli.url.as_deref().context("URL is required")?;

    if cli.dry_run {
        handle_dry_run(&config, url, &archive_path)?;
    } else {
        handle_mirror(config, url, &archive_path).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("sitezip=error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitezip=info,warn"),
            1 => EnvFilter::new("sitezip=debug,info"),
            2 => EnvFilter::new("sitezip=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates input and shows the plan
fn handle_dry_run(config: &Config, url: &str, archive_path: &Path) -> anyhow::Result<()> {
    let origin = Origin::parse(url).context("invalid URL")?;

    println!("=== Sitezip Dry Run ===\n");

    println!("Origin: {}", origin);
    println!("Domain folder: {}", origin.folder_name());
    println!("Archive path: {}", archive_path.display());

    println!("\nFetch:");
    println!("  Pool size: {}", config.fetch.pool_size);
    println!("  Request timeout: {}s", config.fetch.request_timeout_secs);
    println!("  User agent: {}", config.fetch.user_agent);

    println!("\nRetry:");
    println!("  Max attempts: {}", config.retry.max_attempts);
    println!("  Base delay: {}ms", config.retry.base_delay_ms);
    println!("  Backoff factor: {}", config.retry.backoff_factor);

    println!("\n✓ Configuration is valid");
    println!("✓ Would mirror {} into {}", origin, archive_path.display());

    Ok(())
}

/// Handles the --list mode: prints the entries of an existing archive
fn handle_list(archive: &Path) -> anyhow::Result<()> {
    let entries = list_archive(archive)
        .with_context(|| format!("failed to read archive {}", archive.display()))?;

    println!("=== Archive Contents: {} ===\n", archive.display());

    let mut total: u64 = 0;
    for (name, size) in &entries {
        println!("  {} ({} bytes)", name, size);
        total += size;
    }

    println!("\n{} entries, {} bytes uncompressed", entries.len(), total);

    Ok(())
}

/// Handles the main mirror operation
async fn handle_mirror(config: Config, url: &str, archive_path: &Path) -> anyhow::Result<()> {
    let coordinator = Coordinator::new(config).context("failed to build HTTP client")?;

    let snapshot = coordinator
        .mirror(url)
        .await
        .with_context(|| format!("mirror run failed for {}", url))?;

    let written = write_archive(&snapshot, archive_path)
        .with_context(|| format!("failed to write archive {}", archive_path.display()))?;

    let summary = MirrorSummary::from_snapshot(&snapshot, archive_path.to_path_buf(), written);
    print_summary(&summary);

    println!("\n✓ Archive written to {}", archive_path.display());

    Ok(())
}
