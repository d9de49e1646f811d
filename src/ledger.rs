//! Durable record of downloaded and failed episode titles.
//!
//! Two newline-delimited, append-only text files inside the download directory.
//! Entries hold raw (unsanitized) titles. Every append is synced before it
//! returns.

use crate::error::{Error, Result};
use crate::util::fold_newlines;
use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DOWNLOADED_FILE: &str = "downloaded_episodes.txt";
pub const FAILED_FILE: &str = "failed_episodes.txt";

pub struct Ledger {
    downloaded_path: PathBuf,
    failed_path: PathBuf,
    downloaded: HashSet<String>,
}

impl Ledger {
    /// Load the downloaded set from `dir`. A missing ledger file is an empty set.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let downloaded_path = dir.join(DOWNLOADED_FILE);
        let failed_path = dir.join(FAILED_FILE);

        let downloaded: HashSet<String> = match fs::read_to_string(&downloaded_path) {
            // Blank lines are untitled episodes and count as entries.
            Ok(content) => content.lines().map(str::to_owned).collect(),
            Err(e) if e.kind() == ErrorKind::NotFound => HashSet::new(),
            Err(e) => return Err(Error::Ledger(e)),
        };
        debug!(
            "Loaded {} downloaded titles from {}",
            downloaded.len(),
            downloaded_path.display()
        );

        Ok(Ledger {
            downloaded_path,
            failed_path,
            downloaded,
        })
    }

    pub fn downloaded(&self) -> &HashSet<String> {
        &self.downloaded
    }

    pub fn is_downloaded(&self, title: &str) -> bool {
        self.downloaded.contains(title)
    }

    /// Record a successful download. A title already present is not appended again.
    pub fn record_downloaded(&mut self, title: &str) -> Result<()> {
        let title = fold_newlines(title);
        if self.downloaded.contains(&title) {
            return Ok(());
        }
        append_line(&self.downloaded_path, &title)?;
        self.downloaded.insert(title);
        Ok(())
    }

    pub fn record_failed(&mut self, title: &str) -> Result<()> {
        append_line(&self.failed_path, &fold_newlines(title))
    }
}

// Blocking std::fs: each append is one short write plus a sync, and runs are sequential.
fn append_line(path: &Path, line: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(Error::Ledger)?;
    }
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(Error::Ledger)?;
    // Title and newline go out in a single write.
    let mut entry = String::with_capacity(line.len() + 1);
    entry.push_str(line);
    entry.push('\n');
    file.write_all(entry.as_bytes()).map_err(Error::Ledger)?;
    file.sync_all().map_err(Error::Ledger)
}
