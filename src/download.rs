//! File downloading: stream each file URL to disk under its item folder.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::fetch::{self, FetchError};
use crate::run_log::RunLog;
use crate::url_model::{self, DownloadTarget};

/// Downloads every file URL in the set into `root`, one at a time.
///
/// HTTP failures and transport failures are logged and skipped. A local disk
/// failure aborts the run: the destination was explicitly chosen, so not
/// being able to write there is not a per-file condition.
pub fn download_all(file_urls: &HashSet<String>, root: &Path, log: &RunLog) -> Result<()> {
    for url in file_urls {
        download_one(url, root, log)?;
    }
    Ok(())
}

fn download_one(url: &str, root: &Path, log: &RunLog) -> Result<()> {
    let target = match url_model::derive_target(url) {
        Ok(target) => target,
        Err(err) => {
            let msg = format!("Skipping {url}: {err}");
            println!("{msg}");
            log.warning(&msg);
            return Ok(());
        }
    };

    let mut sink = FileSink::new(root, &target);
    match fetch::get(url, |chunk| sink.write_chunk(chunk)) {
        Ok(()) => {
            sink.finish()
                .with_context(|| format!("failed to write {}", sink.path().display()))?;
            println!(
                "Downloaded: {} into folder {}",
                target.filename, target.folder_name
            );
            Ok(())
        }
        Err(FetchError::Http(code)) => {
            let msg = format!("Failed to download {url}. Status code: {code}");
            println!("{msg}");
            log.warning(&msg);
            Ok(())
        }
        Err(FetchError::Transport(err)) => {
            let msg = format!("Error downloading {url}: {err}");
            println!("{msg}");
            log.error(&msg);
            Ok(())
        }
        Err(FetchError::Storage(err)) => {
            Err(err).with_context(|| format!("failed to write {}", sink.path().display()))
        }
    }
}

/// Lazily created destination file. The folder and the file only come into
/// existence once the first body chunk of a 200 response arrives, so failed
/// requests leave no empty folders or stub files behind.
struct FileSink {
    path: PathBuf,
    file: Option<File>,
}

impl FileSink {
    fn new(root: &Path, target: &DownloadTarget) -> Self {
        FileSink {
            path: root.join(&target.folder_name).join(&target.filename),
            file: None,
        }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.open()?.write_all(chunk)
    }

    /// A 200 response with an empty body still produces the (empty) file.
    fn finish(&mut self) -> io::Result<()> {
        self.open()?;
        Ok(())
    }

    fn open(&mut self) -> io::Result<&mut File> {
        if self.file.is_none() {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
            // Truncates any previous download of the same name.
            self.file = Some(File::create(&self.path)?);
        }
        Ok(self.file.as_mut().expect("opened above"))
    }
}
