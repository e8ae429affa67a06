//! File lifecycle for downloads: write to `<name>.part`, then atomically
//! rename to the final name. A crash or failed transfer never leaves a file
//! under the final name, so "file exists" reliably means "file complete".

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `a.html` → `a.html.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// A `.part` file being filled. Removed on drop unless [`PartFile::finalize`] ran.
pub struct PartFile {
    out: Option<BufWriter<File>>,
    temp_path: PathBuf,
    final_path: PathBuf,
    written: u64,
}

impl PartFile {
    /// Creates (truncating) the temp file for `final_path`, creating parent
    /// directories as needed.
    pub fn create(final_path: &Path) -> Result<Self> {
        if let Some(parent) = final_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create dir: {}", parent.display()))?;
            }
        }
        let temp_path = temp_path(final_path);
        let file = File::create(&temp_path)
            .with_context(|| format!("failed to create temp file: {}", temp_path.display()))?;
        Ok(Self {
            out: Some(BufWriter::new(file)),
            temp_path,
            final_path: final_path.to_path_buf(),
            written: 0,
        })
    }

    pub fn write_chunk(&mut self, data: &[u8]) -> std::io::Result<()> {
        match self.out.as_mut() {
            Some(out) => {
                out.write_all(data)?;
                self.written += data.len() as u64;
                Ok(())
            }
            None => Err(std::io::Error::other("part file already closed")),
        }
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Flushes and renames the temp file to the final path. Returns bytes written.
    pub fn finalize(mut self) -> Result<u64> {
        if let Some(out) = self.out.take() {
            let file = out
                .into_inner()
                .map_err(|e| e.into_error())
                .with_context(|| format!("flush {}", self.temp_path.display()))?;
            file.sync_all()
                .with_context(|| format!("sync {}", self.temp_path.display()))?;
        }
        fs::rename(&self.temp_path, &self.final_path).with_context(|| {
            format!(
                "failed to rename {} to {}",
                self.temp_path.display(),
                self.final_path.display()
            )
        })?;
        self.temp_path.clear();
        Ok(self.written)
    }
}

impl Drop for PartFile {
    fn drop(&mut self) {
        self.out.take();
        if !self.temp_path.as_os_str().is_empty() {
            let _ = fs::remove_file(&self.temp_path);
        }
    }
}
