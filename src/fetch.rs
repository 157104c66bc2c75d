//! Blocking HTTP GET plumbing shared by the crawler and the downloader.
//!
//! One curl easy transfer per URL: redirects are followed, the body is
//! delivered to the caller's sink in chunks of at most [`CHUNK_SIZE`] bytes,
//! and a header callback tracks the status line of the most recent response
//! so that only a final 200 body ever reaches the sink. Redirect-hop and
//! error bodies are drained without being stored.

use std::cell::{Cell, RefCell};
use std::io;

use thiserror::Error;

/// Receive buffer size; the body reaches the sink in chunks of at most this
/// many bytes.
pub const CHUNK_SIZE: usize = 8192;

const MAX_REDIRECTS: u32 = 10;

/// Per-URL fetch failure, split so callers can pick a log level and a
/// skip-or-abort policy per class.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The final response carried a status other than 200.
    #[error("HTTP {0}")]
    Http(u32),
    /// Transport-level failure: resolve, connect, recv, too many redirects.
    #[error("{0}")]
    Transport(#[from] curl::Error),
    /// The caller's sink failed; the transfer was aborted.
    #[error("storage: {0}")]
    Storage(#[source] io::Error),
}

/// Issues a GET for `url` and feeds each chunk of a 200 body to `sink` in
/// arrival order. Any other final status becomes [`FetchError::Http`].
pub fn get<F>(url: &str, mut sink: F) -> Result<(), FetchError>
where
    F: FnMut(&[u8]) -> io::Result<()>,
{
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(MAX_REDIRECTS)?;
    easy.buffer_size(CHUNK_SIZE)?;

    // Status of the most recent response in the (possibly redirected) chain;
    // gates the write callback below.
    let status = Cell::new(0u32);
    let sink_error: RefCell<Option<io::Error>> = RefCell::new(None);

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|line| {
            if let Some(code) = parse_status_line(line) {
                status.set(code);
            }
            true
        })?;
        transfer.write_function(|data| {
            if status.get() != 200 {
                // Drain redirect-hop and error bodies.
                return Ok(data.len());
            }
            match sink(data) {
                Ok(()) => Ok(data.len()),
                Err(err) => {
                    sink_error.borrow_mut().get_or_insert(err);
                    Ok(0) // abort transfer
                }
            }
        })?;
        let result = transfer.perform();
        if let Some(err) = sink_error.borrow_mut().take() {
            return Err(FetchError::Storage(err));
        }
        result?;
    }

    let code = easy.response_code()?;
    if code != 200 {
        return Err(FetchError::Http(code));
    }
    Ok(())
}

/// GETs a page and returns its body as UTF-8, lossily; the link patterns the
/// callers scan for are plain ASCII.
pub fn get_text(url: &str) -> Result<String, FetchError> {
    let mut body = Vec::new();
    get(url, |chunk| {
        body.extend_from_slice(chunk);
        Ok(())
    })?;
    Ok(String::from_utf8_lossy(&body).into_owned())
}

/// Parses `HTTP/<version> <code> ...` header lines; returns `None` for
/// ordinary headers and blank lines.
fn parse_status_line(line: &[u8]) -> Option<u32> {
    let text = std::str::from_utf8(line).ok()?;
    if !text.starts_with("HTTP/") {
        return None;
    }
    text.split_whitespace().nth(1)?.parse().ok()
}
