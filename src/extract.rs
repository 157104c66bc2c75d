//! Handle-URL extraction from a CSV export.
//!
//! Every cell of every row is scanned; the file's own record splitting
//! applies, so a quoted cell containing commas stays one cell.

use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;

/// Matches an item-handle URL embedded anywhere in a cell: `http`, a run of
/// non-whitespace, then `/handle/` and at least one more character.
const HANDLE_PATTERN: &str = r"http\S*/handle/\S+";

/// Scans `csv_file` and returns every handle URL found, in file order
/// (row-major, left to right within a row). Duplicates are kept; the crawler
/// collapses them later.
pub fn handle_urls(csv_file: &Path) -> Result<Vec<String>> {
    let pattern = handle_url_pattern();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(csv_file)
        .with_context(|| format!("failed to open CSV file {}", csv_file.display()))?;

    let mut urls = Vec::new();
    for record in reader.records() {
        let record = record
            .with_context(|| format!("failed to read CSV file {}", csv_file.display()))?;
        for cell in record.iter() {
            urls.extend(pattern.find_iter(cell).map(|m| m.as_str().to_string()));
        }
    }
    Ok(urls)
}

/// The handle-URL pattern, kept behind one function so it can be swapped
/// without touching the scan loop.
fn handle_url_pattern() -> Regex {
    Regex::new(HANDLE_PATTERN).unwrap()
}
