//! The depth-limited walk over listing pages.

use super::Mirror;
use crate::fetch::Fetcher;
use crate::listing::Listing;
use crate::progress;
use crate::url_model::visit_key;
use std::fs;
use url::Url;

impl<F: Fetcher> Mirror<F> {
    pub(super) fn crawl(&mut self, url: &Url, depth: usize) {
        if depth > self.max_depth {
            tracing::warn!("max depth {} reached for url: {}", self.max_depth, url);
            self.stats.depth_limited += 1;
            return;
        }
        if !self.visited.insert(visit_key(url)) {
            tracing::debug!("already visited: {}", url);
            return;
        }
        tracing::info!("crawling (depth {}): {}", depth, url);

        let page = match self.fetcher.get_text(url) {
            Ok(page) => page,
            Err(e) => {
                tracing::error!("error processing {} at depth {}: {}", url, depth, e);
                self.stats.failures += 1;
                return;
            }
        };
        self.stats.directories += 1;

        match self.root.local_path(&self.dest_root, url) {
            Ok(dir) => {
                tracing::debug!("processing directory: {}", dir.display());
                if let Err(e) = fs::create_dir_all(&dir) {
                    tracing::error!("cannot create {}: {}", dir.display(), e);
                    self.stats.failures += 1;
                    return;
                }
            }
            Err(e) => {
                tracing::warn!("directory has no local path, skipping {}: {}", url, e);
                self.stats.failures += 1;
                return;
            }
        }

        let listing = Listing::parse(&self.root, url, &page);
        let label = match self.root.relative_path(url) {
            Ok("") | Err(_) => "/".to_string(),
            Ok(rel) => rel.to_string(),
        };
        tracing::info!(
            "found {} files and {} directories in {}",
            listing.files.len(),
            listing.directories.len(),
            label
        );

        let bar = progress::count_bar(
            listing.files.len(),
            format!("files in {label}"),
            self.show_progress,
        );
        for file_url in &listing.files {
            self.mirror_file(file_url);
            bar.inc(1);
        }
        bar.finish_and_clear();

        for sub in &listing.directories {
            if sub == url || self.visited.contains(&visit_key(sub)) {
                tracing::warn!("skipping circular or duplicate url: {}", sub);
                continue;
            }
            tracing::info!("entering subdirectory: {}", sub);
            self.crawl(sub, depth + 1);
        }
    }

    fn mirror_file(&mut self, url: &Url) {
        let local = match self.root.local_path(&self.dest_root, url) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!("skipping {}: {}", url, e);
                self.stats.failures += 1;
                return;
            }
        };
        if local.exists() {
            tracing::debug!("file already exists, skipping: {}", local.display());
            self.stats.files_skipped += 1;
            return;
        }

        tracing::info!("downloading file: {}", url);
        match self.fetcher.download_to(url, &local) {
            Ok(bytes) => {
                tracing::info!("successfully downloaded: {}", local.display());
                self.stats.files_downloaded += 1;
                self.stats.bytes += bytes;
            }
            Err(e) => {
                tracing::error!("failed to download {}: {}", url, e);
                self.stats.failures += 1;
            }
        }
    }
}
