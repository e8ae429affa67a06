//! Recursive mirror of the archive's directory tree.
//!
//! Starting at the archive base, each listing page is fetched, every file
//! link is downloaded unless the local copy already exists, and every
//! subdirectory link is followed up to a fixed depth. Errors on a single file
//! or directory are logged and counted; the walk always continues with the
//! remaining siblings.

mod walk;

use crate::config::MirrorConfig;
use crate::fetch::{Fetcher, HttpClient};
use crate::url_model::ArchiveRoot;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Counters for one mirror run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MirrorStats {
    /// Listing pages fetched successfully.
    pub directories: usize,
    pub files_downloaded: usize,
    /// Files that already existed locally.
    pub files_skipped: usize,
    pub bytes: u64,
    /// Pages or files that failed (logged, not fatal).
    pub failures: usize,
    /// Directories not entered because of the depth limit.
    pub depth_limited: usize,
}

/// One mirror run from the archive base into `dest_root`.
pub struct Mirror<F: Fetcher> {
    fetcher: F,
    root: ArchiveRoot,
    dest_root: PathBuf,
    max_depth: usize,
    show_progress: bool,
    visited: HashSet<String>,
    stats: MirrorStats,
}

impl Mirror<HttpClient> {
    /// Mirror over HTTP using the configured base URL, depth and delay.
    pub fn from_config(cfg: &MirrorConfig, dest_root: &Path) -> Result<Self> {
        let root = ArchiveRoot::parse(&cfg.base_url)?;
        let client = HttpClient::new(cfg).context("initialize HTTP client")?;
        Ok(Mirror::new(client, root, dest_root, cfg.max_depth))
    }
}

impl<F: Fetcher> Mirror<F> {
    pub fn new(fetcher: F, root: ArchiveRoot, dest_root: &Path, max_depth: usize) -> Self {
        Self {
            fetcher,
            root,
            dest_root: dest_root.to_path_buf(),
            max_depth,
            show_progress: false,
            visited: HashSet::new(),
            stats: MirrorStats::default(),
        }
    }

    /// Draw a progress bar per directory while downloading its files.
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn dest_root(&self) -> &Path {
        &self.dest_root
    }

    /// Walks the whole archive. Only an unusable destination is fatal.
    pub fn run(mut self) -> Result<MirrorStats> {
        prepare_destination(&self.dest_root)?;
        tracing::info!("starting mirror of {} to {}", self.root.base(), self.dest_root.display());

        let start = self.root.base().clone();
        self.crawl(&start, 0);

        let s = &self.stats;
        tracing::info!(
            directories = s.directories,
            downloaded = s.files_downloaded,
            skipped = s.files_skipped,
            bytes = s.bytes,
            failures = s.failures,
            "mirror completed"
        );
        Ok(self.stats)
    }
}

/// Creates the destination root; fails if it exists and is not a directory.
pub fn prepare_destination(dest_root: &Path) -> Result<()> {
    if dest_root.exists() && !dest_root.is_dir() {
        anyhow::bail!("destination exists but is not a directory: {}", dest_root.display());
    }
    fs::create_dir_all(dest_root)
        .with_context(|| format!("create destination {}", dest_root.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests;
