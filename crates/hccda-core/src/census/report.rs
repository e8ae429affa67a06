//! Plain-text summary report.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::stats::OverviewStats;

const RULE_WIDTH: usize = 60;
const TITLE: &str = "AUSTRALIAN HISTORICAL CENSUS DATA SUMMARY";

/// Renders the summary. Sections are separated by two blank lines and the
/// text has no trailing newline.
pub fn render_summary(stats: &OverviewStats) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();
    out.push_str(&format!("{rule}\n{TITLE}\n{rule}\n"));
    out.push_str(&format!("\nTotal Census Files: {}", stats.total_files));

    out.push_str("\n\n\nFiles by State:");
    for (state, count) in &stats.states {
        out.push_str(&format!("\n  {state}: {count} files"));
    }

    out.push_str("\n\n\nFiles by Year:");
    for (year, count) in &stats.years {
        out.push_str(&format!("\n  {year}: {count} files"));
    }

    out.push_str("\n\n\nFiles by Type:");
    for (table_type, count) in &stats.types {
        out.push_str(&format!("\n  {table_type}: {count} files"));
    }

    out.push_str("\n\n\nYear Range:");
    if let Some((earliest, latest)) = stats.year_range() {
        out.push_str(&format!("\n  Earliest: {earliest}\n  Latest: {latest}"));
    }
    out
}

/// Renders the summary, writes it to `path` and returns the text.
pub fn write_summary(stats: &OverviewStats, path: &Path) -> Result<String> {
    let text = render_summary(stats);
    fs::write(path, &text).with_context(|| format!("write report: {}", path.display()))?;
    tracing::info!("summary report written to {}", path.display());
    Ok(text)
}
