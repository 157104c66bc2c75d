//! Batch downloader for DSpace bitstream files.
//!
//! Three stages run back to back: extract item-handle URLs from a CSV
//! export, crawl each item page for bitstream links, then stream every
//! unique file into a per-item folder under a root named after the CSV.

pub mod cli;
pub mod crawl;
pub mod download;
pub mod extract;
pub mod fetch;
pub mod logging;
pub mod pipeline;
pub mod run_log;
pub mod url_model;
