//! `hccda-census --state/--year/--type` – population analysis plus both charts.

use anyhow::Result;
use hccda_core::census::FileFilter;
use std::io::Write;

use super::CensusSession;

pub fn run_analyze<W: Write>(
    session: &mut CensusSession,
    filter: &FileFilter,
    out: &mut W,
) -> Result<()> {
    let matching = session.catalog().filter(filter).count();
    writeln!(out, "Analyzing {matching} census files...")?;
    let records = session.analyze(filter);
    writeln!(out, "Found {} population-related tables", records.len())?;

    let mut saved = 0;
    match session.state_chart(filter.state.as_deref()) {
        Ok(path) => {
            writeln!(out, "Saved {}", path.display())?;
            saved += 1;
        }
        Err(e) => tracing::warn!("state chart not written: {:#}", e),
    }
    match session.year_chart(filter.year.as_deref()) {
        Ok(path) => {
            writeln!(out, "Saved {}", path.display())?;
            saved += 1;
        }
        Err(e) => tracing::warn!("year chart not written: {:#}", e),
    }
    if saved == 2 {
        writeln!(out, "Visualizations saved to PNG files")?;
    }

    session.save_cache()
}
