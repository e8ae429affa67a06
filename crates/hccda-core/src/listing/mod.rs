//! Directory listing pages: which links are subdirectories and which are
//! files, resolved to absolute archive URLs.

mod parse;

pub use parse::{classify_link, extract_links, LinkKind};

use crate::url_model::{is_within, visit_key, ArchiveRoot};
use std::collections::HashSet;
use url::Url;

/// Links found on one listing page, resolved against the page URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    /// Subdirectories strictly below the page.
    pub directories: Vec<Url>,
    /// Files inside the archive.
    pub files: Vec<Url>,
}

impl Listing {
    /// Parses `page` (fetched from `page_url`). Links that leave the archive,
    /// directory links that are not below the current page, and duplicates
    /// are dropped; first occurrence wins.
    pub fn parse(root: &ArchiveRoot, page_url: &Url, page: &str) -> Listing {
        let mut listing = Listing::default();
        let mut seen = HashSet::new();

        for href in extract_links(page) {
            let kind = classify_link(&href);
            if kind == LinkKind::Ignored {
                continue;
            }
            let Ok(mut url) = page_url.join(&href) else {
                tracing::debug!("unparsable link {:?} on {}", href, page_url);
                continue;
            };
            url.set_fragment(None);
            if !root.contains(&url) {
                tracing::debug!("link outside archive: {}", url);
                continue;
            }
            if !seen.insert(visit_key(&url)) {
                continue;
            }
            match kind {
                LinkKind::Directory if is_within(page_url, &url) => listing.directories.push(url),
                LinkKind::Directory => tracing::debug!("not below {}: {}", page_url, url),
                LinkKind::File => listing.files.push(url),
                LinkKind::Ignored => {}
            }
        }
        listing
    }
}
