// Declare modules
pub mod cli;
pub mod config;
pub mod models;
pub mod scanner;
pub mod sink;

use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use std::fs;

use self::cli::Cli;
use self::config::resolve_config;
use self::models::{RuntimeConfig, ScanSummary};
use self::scanner::Scanner;
use self::sink::OutputSink;

/// Initializes components and orchestrates data flow.
pub fn run() -> Result<()> {
    // 1. Parse Args
    let args = Cli::parse();

    // 2. Identify the invocation directory (all display paths are relative to it)
    let base_dir = env::current_dir().context("Failed to get current directory")?;

    // 3. Resolve Configuration (defaults < config file < CLI flags)
    let config = resolve_config(args, &base_dir)?;

    // 4. Scan and aggregate
    let summary = aggregate(&config)?;

    log::info!(
        "Done: {} file(s) aggregated, {} excluded, {} skipped -> {}",
        summary.included,
        summary.excluded,
        summary.skipped,
        config.output_path.display()
    );

    Ok(())
}

/// Validates the scan root, creates the output file and runs the traversal.
///
/// The root check happens before the output file is touched, so a bad root
/// leaves any previous output intact.
pub fn aggregate(config: &RuntimeConfig) -> Result<ScanSummary> {
    let meta = fs::metadata(&config.scan_root)
        .with_context(|| format!("Scan root {} is not accessible", config.scan_root.display()))?;
    if !meta.is_dir() {
        anyhow::bail!("Scan root {} is not a directory", config.scan_root.display());
    }

    let sink = OutputSink::create(&config.output_path)?;
    let scanner = Scanner::new(config, &sink);
    Ok(scanner.scan())
}
