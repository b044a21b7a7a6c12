//! filterflix-reconcile - Main entry point
//!
//! Merges content-warning timestamp files from several sources into one
//! timeline and prints it (or writes it with `--output`).
//!
//! **Usage:**
//! ```bash
//! filterflix-reconcile --sources imdb.json reddit.json --output merged.json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use ffx_common::config::{resolve_config, ConfigOverrides};
use ffx_reconcile::files::{load_sources, render_document, write_document};
use ffx_reconcile::stats::timeline_stats;
use ffx_reconcile::validation::validate_document;
use ffx_reconcile::{quality_score, reconcile, ReconcileOptions, SourceDocument};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for filterflix-reconcile
#[derive(Parser, Debug)]
#[command(name = "filterflix-reconcile")]
#[command(about = "Merge content-warning timestamps from multiple sources")]
#[command(version)]
struct Args {
    /// Source JSON files to merge, in priority order
    #[arg(long, num_args = 1.., value_name = "FILE")]
    sources: Vec<PathBuf>,

    /// Output file path (prints to stdout when omitted)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Grouping window in seconds
    #[arg(long, value_name = "SECS")]
    window: Option<u64>,

    /// Config file (defaults to <config dir>/filterflix/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level used when RUST_LOG is unset
    #[arg(long)]
    log_level: Option<String>,

    /// Report schema problems in each source
    #[arg(long)]
    validate: bool,

    /// Log quality score and timeline statistics
    #[arg(long)]
    stats: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = resolve_config(&ConfigOverrides {
        group_window_secs: args.window,
        log_level: args.log_level.clone(),
        config_file: args.config.clone(),
    })
    .context("Failed to resolve configuration")?;

    // Logs go to stderr; stdout carries the merged JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!(
        "Starting FilterFlix reconcile v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    // Config is resolved before the subscriber exists, so its problems are logged here
    for warning in &config.warnings {
        warn!("{}", warning);
    }

    if args.sources.is_empty() {
        print_usage();
        return Ok(());
    }

    let loaded = load_sources(&args.sources).context("Failed to load source files")?;

    if args.validate {
        for source in &loaded {
            let report = validate_document(&source.document);
            if report.is_valid() {
                info!("✓ {} passes validation", source.path.display());
            } else {
                for error in &report.errors {
                    warn!("{}: {}", source.path.display(), error);
                }
            }
        }
    }

    let documents: Vec<SourceDocument> = loaded.into_iter().map(|s| s.document).collect();
    let options = ReconcileOptions::from(&config);

    let Some(merged) = reconcile(&documents, &options).context("Reconciliation failed")? else {
        info!("No source documents loaded; nothing to reconcile");
        return Ok(());
    };

    if args.stats {
        let stats = timeline_stats(&merged);
        info!(
            "Quality score {:.2}: {} events ({} verified), {} filtered",
            quality_score(&merged),
            stats.total,
            stats.verified,
            stats.total_filter_time
        );
        for (content_type, count) in &stats.by_type {
            info!("  {}: {}", content_type, count);
        }
    }

    match &args.output {
        Some(path) => {
            write_document(&merged, path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote merged timeline to {}", path.display());
        }
        None => println!("{}", render_document(&merged)?),
    }

    Ok(())
}

fn print_usage() {
    println!("Usage examples:");
    println!("  Merge multiple sources:");
    println!("    filterflix-reconcile --sources imdb.json reddit.json --output merged.json");
    println!();
    println!("  Print to stdout with a wider grouping window:");
    println!("    filterflix-reconcile --sources imdb.json reddit.json --window 45");
}
