//! URL modeling and download-target derivation.
//!
//! A file URL maps onto disk as `<folder_name>/<filename>`: the filename is
//! the last path segment of the URL and the folder name the second-to-last,
//! both taken as they appear. The query string is not part of the path, so
//! nothing from `?` onward ever leaks into either name.

use thiserror::Error;
use url::Url;

/// Where a file URL lands on disk, relative to the download root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    /// Second-to-last path segment, unmodified.
    pub folder_name: String,
    /// Last path segment.
    pub filename: String,
}

/// Failure to derive a usable target from a file URL.
#[derive(Debug, Error)]
pub enum TargetError {
    #[error("not a valid URL: {0}")]
    Invalid(#[from] url::ParseError),
    #[error("fewer than two path segments in {0}")]
    TooFewSegments(String),
}

/// Derives the folder/filename pair for a file URL.
///
/// Empty segments are skipped, so a trailing slash still yields the last
/// real segment. URLs with fewer than two non-empty path segments are
/// refused rather than guessed at.
pub fn derive_target(url: &str) -> Result<DownloadTarget, TargetError> {
    let parsed = Url::parse(url)?;
    let mut segments = parsed.path().split('/').filter(|s| !s.is_empty()).rev();
    let filename = segments
        .next()
        .ok_or_else(|| TargetError::TooFewSegments(url.to_string()))?;
    let folder_name = segments
        .next()
        .ok_or_else(|| TargetError::TooFewSegments(url.to_string()))?;
    Ok(DownloadTarget {
        folder_name: folder_name.to_string(),
        filename: filename.to_string(),
    })
}
