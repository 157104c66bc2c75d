//! Command-line surface.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::pipeline;
use crate::run_log::RunLog;

/// Top-level CLI for the dspace-dl batch downloader.
#[derive(Debug, Parser)]
#[command(name = "dspace-dl", version)]
#[command(about = "Download DSpace bitstream files for every handle URL in a CSV export", long_about = None)]
pub struct Cli {
    /// CSV export containing item-handle URLs (any row, any column).
    pub csv_file: PathBuf,

    /// Base URL prepended to scraped bitstream paths, e.g. https://repo.example.org
    pub base_url: String,
}

impl Cli {
    /// Runs the pipeline from the current working directory.
    pub fn run(self) -> Result<()> {
        let log = RunLog::open_default().unwrap_or_else(|err| {
            tracing::warn!("audit log unavailable, using stderr: {:#}", err);
            RunLog::stderr()
        });
        let work_dir = std::env::current_dir().context("failed to resolve working directory")?;
        pipeline::run(&self.csv_file, &self.base_url, &work_dir, &log)
    }
}
