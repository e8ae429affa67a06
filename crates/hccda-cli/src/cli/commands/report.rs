//! `hccda-census --report` – write the summary report and print it.

use anyhow::Result;
use hccda_core::census::write_summary;
use std::io::Write;

use super::CensusSession;

pub fn run_report<W: Write>(session: &CensusSession, out: &mut W) -> Result<()> {
    let path = session.report_path();
    let text = write_summary(&session.catalog().overview(), &path)?;
    writeln!(out, "{text}")?;
    writeln!(out, "\nReport saved to {}", path.display())?;
    Ok(())
}
