//! Mapping between archive URLs and the local mirror tree.
//!
//! A URL below the archive base maps to a local path by stripping the base,
//! percent-decoding every path segment and joining the segments onto the
//! destination root. The inverse re-encodes each local component as a URL
//! path segment, so the mapping is deterministic and reversible for every
//! segment that passes [`is_safe_segment`].

mod percent;
mod sanitize;
mod segments;

pub use percent::percent_decode;
pub use sanitize::is_safe_segment;
pub use segments::{is_within, strip_base_path, strip_capture, visit_key};

use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum PathMapError {
    #[error("invalid archive base URL {0}: {1}")]
    InvalidBase(String, String),
    #[error("URL is outside the archive: {0}")]
    OutsideArchive(String),
    #[error("unsafe path segment {0:?} in {1}")]
    UnsafeSegment(String, String),
    #[error("path segment is not valid UTF-8 after decoding: {0}")]
    NonUtf8(String),
    #[error("not a relative mirror path: {0}")]
    NotRelative(PathBuf),
}

/// The archived site root all mirrored URLs live under.
#[derive(Debug, Clone)]
pub struct ArchiveRoot {
    base: Url,
}

impl ArchiveRoot {
    /// Parses the base URL; a missing trailing `/` is added so relative links
    /// resolve inside the archive.
    pub fn parse(base_url: &str) -> Result<Self, PathMapError> {
        let mut base = Url::parse(base_url)
            .map_err(|e| PathMapError::InvalidBase(base_url.to_string(), e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(PathMapError::InvalidBase(
                base_url.to_string(),
                "not a hierarchical URL".to_string(),
            ));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.set_query(None);
        base.set_fragment(None);
        Ok(Self { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// True if `url` is the base itself or lies below it. For Wayback bases
    /// the capture timestamp of `url` may differ from the base's.
    pub fn contains(&self, url: &Url) -> bool {
        self.relative_path(url).is_ok()
    }

    /// Raw (still percent-encoded) path of `url` relative to the base.
    pub fn relative_path<'a>(&self, url: &'a Url) -> Result<&'a str, PathMapError> {
        if url.origin() != self.base.origin() {
            return Err(PathMapError::OutsideArchive(url.to_string()));
        }
        strip_base_path(self.base.path(), url.path())
            .ok_or_else(|| PathMapError::OutsideArchive(url.to_string()))
    }

    /// Local path under `dest_root` that mirrors `url`.
    pub fn local_path(&self, dest_root: &Path, url: &Url) -> Result<PathBuf, PathMapError> {
        let relative = self.relative_path(url)?;
        let mut out = dest_root.to_path_buf();
        for raw in relative.split('/').filter(|s| !s.is_empty()) {
            let segment =
                percent_decode(raw).ok_or_else(|| PathMapError::NonUtf8(url.to_string()))?;
            if !is_safe_segment(&segment) {
                return Err(PathMapError::UnsafeSegment(segment, url.to_string()));
            }
            out.push(segment);
        }
        Ok(out)
    }

    /// Archive URL for a path relative to the mirror root (inverse of
    /// [`ArchiveRoot::local_path`]).
    pub fn remote_url(&self, relative: &Path) -> Result<Url, PathMapError> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| PathMapError::NotRelative(relative.to_path_buf()))?;
            segments.pop_if_empty();
            for component in relative.components() {
                let name = match component {
                    Component::Normal(name) => name
                        .to_str()
                        .ok_or_else(|| PathMapError::NotRelative(relative.to_path_buf()))?,
                    _ => return Err(PathMapError::NotRelative(relative.to_path_buf())),
                };
                if !is_safe_segment(name) {
                    return Err(PathMapError::NotRelative(relative.to_path_buf()));
                }
                segments.push(name);
            }
        }
        Ok(url)
    }
}
