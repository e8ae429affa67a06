//! JSON cache of extracted census tables, keyed by source file path.
//!
//! Each entry remembers the size and modification time of the file it was
//! built from; a file that changed since is re-extracted.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use super::meta::{CensusFileMeta, TableType};
use super::table::{extract_tables, CensusTable};
use crate::storage::temp_path;

/// Size and mtime of a source file at extraction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFingerprint {
    pub len: u64,
    /// Milliseconds since the Unix epoch (0 when the platform has no mtime).
    pub modified_ms: u64,
}

impl FileFingerprint {
    pub fn of(path: &Path) -> std::io::Result<Self> {
        let md = fs::metadata(path)?;
        let modified_ms = md
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Ok(Self {
            len: md.len(),
            modified_ms,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedMeta {
    pub state: Option<String>,
    pub year: Option<String>,
    pub table_type: TableType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub fingerprint: FileFingerprint,
    pub meta: CachedMeta,
    pub tables: Vec<CensusTable>,
}

#[derive(Debug)]
pub struct CensusCache {
    path: PathBuf,
    entries: BTreeMap<String, CacheEntry>,
    dirty: bool,
}

impl CensusCache {
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: BTreeMap::new(),
            dirty: false,
        }
    }

    /// Load the cache file. A missing or unreadable file gives an empty cache.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let bytes = match fs::read(&path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::empty(path),
            Err(e) => {
                tracing::warn!("cannot read census cache {}: {}", path.display(), e);
                return Self::empty(path);
            }
        };
        match serde_json::from_slice::<BTreeMap<String, CacheEntry>>(&bytes) {
            Ok(entries) => {
                tracing::debug!(entries = entries.len(), "loaded census cache {}", path.display());
                Self {
                    path,
                    entries,
                    dirty: false,
                }
            }
            Err(e) => {
                tracing::warn!("ignoring corrupt census cache {}: {}", path.display(), e);
                Self::empty(path)
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Raw entry for `file`, fresh or not.
    pub fn get(&self, file: &Path) -> Option<&CacheEntry> {
        self.entries.get(&cache_key(file))
    }

    /// Entry for `file` only if it was built from a file with `fingerprint`.
    pub fn lookup(&self, file: &Path, fingerprint: FileFingerprint) -> Option<&CacheEntry> {
        self.get(file).filter(|e| e.fingerprint == fingerprint)
    }

    pub fn insert(&mut self, file: &Path, entry: CacheEntry) {
        self.entries.insert(cache_key(file), entry);
        self.dirty = true;
    }

    /// Tables of a census file, from the cache when the file is unchanged,
    /// otherwise extracted and cached.
    pub fn tables_for(&mut self, meta: &CensusFileMeta) -> Result<Vec<CensusTable>> {
        let path = &meta.filepath;
        let fingerprint = FileFingerprint::of(path)
            .with_context(|| format!("stat census file: {}", path.display()))?;
        if let Some(entry) = self.lookup(path, fingerprint) {
            return Ok(entry.tables.clone());
        }

        let bytes =
            fs::read(path).with_context(|| format!("read census file: {}", path.display()))?;
        let tables = extract_tables(&String::from_utf8_lossy(&bytes));
        tracing::debug!(tables = tables.len(), "extracted {}", path.display());

        self.insert(
            path,
            CacheEntry {
                fingerprint,
                meta: CachedMeta {
                    state: meta.state.clone(),
                    year: meta.year.clone(),
                    table_type: meta.table_type,
                },
                tables: tables.clone(),
            },
        );
        Ok(tables)
    }

    /// Write the cache as pretty JSON (temp file, then rename). Does nothing
    /// when no entry changed since the last load or save.
    pub fn save(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create dir: {}", parent.display()))?;
            }
        }
        let json = serde_json::to_string_pretty(&self.entries).context("serialize census cache")?;
        let tmp = temp_path(&self.path);
        fs::write(&tmp, json).with_context(|| format!("write census cache: {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("rename {} -> {}", tmp.display(), self.path.display()))?;
        self.dirty = false;
        tracing::info!(entries = self.entries.len(), "saved census cache {}", self.path.display());
        Ok(())
    }
}

fn cache_key(file: &Path) -> String {
    file.to_string_lossy().into_owned()
}
