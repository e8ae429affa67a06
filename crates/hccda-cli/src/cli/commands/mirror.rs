//! `hccda-mirror <DEST>` – walk the archive and copy it into DEST.

use anyhow::Result;
use hccda_core::config::MirrorConfig;
use hccda_core::mirror::Mirror;
use std::path::Path;

pub fn run_mirror(cfg: &MirrorConfig, dest: &Path) -> Result<()> {
    let mirror = Mirror::from_config(cfg, dest)?.with_progress(true);
    let stats = mirror.run()?;
    println!(
        "Mirror completed: {} directories, {} files downloaded ({} bytes), {} already present, {} failures",
        stats.directories, stats.files_downloaded, stats.bytes, stats.files_skipped, stats.failures
    );
    if stats.depth_limited > 0 {
        println!(
            "{} directories were not entered (max depth {})",
            stats.depth_limited, cfg.max_depth
        );
    }
    Ok(())
}
