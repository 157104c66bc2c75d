//! The three-stage run: extract handle URLs, crawl item pages, download files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::run_log::RunLog;
use crate::{crawl, download, extract};

/// Runs the whole pipeline for one CSV export.
///
/// The download root, named after the CSV file with its extension stripped,
/// is created under `work_dir` before anything is read, so even a run that
/// finds nothing leaves the folder in place.
pub fn run(csv_file: &Path, base_url: &str, work_dir: &Path, log: &RunLog) -> Result<()> {
    let root = download_root(csv_file, work_dir)?;
    println!("Creating download folder: {}", root.display());
    fs::create_dir_all(&root)
        .with_context(|| format!("failed to create download folder {}", root.display()))?;

    println!("Extracting handle URLs from {}...", csv_file.display());
    let item_urls = extract::handle_urls(csv_file)?;
    println!("Extracted {} handle URL(s).", item_urls.len());
    tracing::debug!("extraction finished with {} URL(s)", item_urls.len());

    println!("Fetching item pages...");
    let file_urls = crawl::collect_file_urls(&item_urls, base_url, log);
    println!("Found {} unique file URL(s).", file_urls.len());
    tracing::debug!("crawl finished with {} file URL(s)", file_urls.len());

    println!("Downloading files...");
    download::download_all(&file_urls, &root, log)?;
    println!("Done.");
    Ok(())
}

/// `<work_dir>/<CSV file name without its extension>`.
fn download_root(csv_file: &Path, work_dir: &Path) -> Result<PathBuf> {
    let stem = csv_file
        .file_stem()
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| {
            anyhow!(
                "cannot derive a download folder name from {}",
                csv_file.display()
            )
        })?;
    Ok(work_dir.join(stem))
}
