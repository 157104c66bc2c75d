//! Item-page crawling: fetch each handle URL and scrape bitstream links.

use std::collections::HashSet;

use regex::Regex;

use crate::fetch::{self, FetchError};
use crate::run_log::RunLog;

/// Matches a bitstream download link on an item page and captures its path.
const BITSTREAM_PATTERN: &str = r#"href="(/bitstream/handle/\d+/[^"]*)""#;

/// Fetches every item page in order and collects the bitstream file URLs
/// found across all of them. The set collapses duplicates, both within a
/// page and across pages.
///
/// A page that fails keeps its failure in the audit log and on stdout; the
/// crawl moves on to the next page either way.
pub fn collect_file_urls(item_urls: &[String], base_url: &str, log: &RunLog) -> HashSet<String> {
    let pattern = bitstream_link_pattern();
    let mut file_urls = HashSet::new();

    for url in item_urls {
        println!("Processing item page: {url}");
        match fetch::get_text(url) {
            Ok(body) => {
                tracing::debug!("fetched {} ({} bytes)", url, body.len());
                for link in bitstream_links(&pattern, &body, base_url) {
                    file_urls.insert(link);
                }
            }
            Err(FetchError::Http(code)) => {
                let msg = format!("Failed to fetch {url}. Status code: {code}");
                println!("{msg}");
                log.warning(&msg);
            }
            Err(err) => {
                let msg = format!("Error fetching {url}: {err}");
                println!("{msg}");
                log.error(&msg);
            }
        }
    }
    file_urls
}

/// Scrapes bitstream paths out of one page body and prefixes each with
/// `base_url`. Kept separate so the regex scrape could be replaced by a real
/// HTML parser without touching the crawl loop.
fn bitstream_links(pattern: &Regex, body: &str, base_url: &str) -> Vec<String> {
    pattern
        .captures_iter(body)
        .map(|caps| format!("{base_url}{}", &caps[1]))
        .collect()
}

fn bitstream_link_pattern() -> Regex {
    Regex::new(BITSTREAM_PATTERN).unwrap()
}
