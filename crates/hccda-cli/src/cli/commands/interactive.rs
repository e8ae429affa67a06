//! `hccda-census` without options – numbered menu on stdin.

use anyhow::Result;
use hccda_core::census::FileFilter;
use std::io::{BufRead, Write};

use super::CensusSession;

const RULE: &str = "============================================================";
const CAPTIONS_SHOWN: usize = 5;
const FILES_SHOWN: usize = 5;

/// Prints `msg` and reads one trimmed line. `None` at end of input.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, msg: &str) -> Result<Option<String>> {
    write!(out, "{msg}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn confirm<R: BufRead, W: Write>(input: &mut R, out: &mut W, msg: &str) -> Result<bool> {
    Ok(prompt(input, out, msg)?.is_some_and(|a| a.eq_ignore_ascii_case("y")))
}

fn print_menu<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "\n{RULE}\nCENSUS DATA VISUALIZATION TOOL\n{RULE}")?;
    writeln!(out, "\n1. Show overview statistics")?;
    writeln!(out, "2. Plot census files by state")?;
    writeln!(out, "3. Plot census files by year")?;
    writeln!(out, "4. Analyze population data")?;
    writeln!(out, "5. Create summary report")?;
    writeln!(out, "6. Extract specific table data")?;
    writeln!(out, "7. Save cache and exit")?;
    writeln!(out, "0. Exit without saving")?;
    Ok(())
}

/// Runs the menu until the user exits or input ends. End of input exits
/// without saving the cache.
pub fn run_interactive<R: BufRead, W: Write>(
    session: &mut CensusSession,
    mut input: R,
    out: &mut W,
) -> Result<()> {
    loop {
        print_menu(out)?;
        let Some(choice) = prompt(&mut input, out, "\nEnter your choice: ")? else {
            writeln!(out)?;
            return Ok(());
        };
        match choice.as_str() {
            "1" => show_overview(session, out)?,
            "2" => match session.state_chart(None) {
                Ok(path) => writeln!(out, "\nChart saved to {}", path.display())?,
                Err(e) => writeln!(out, "\nCould not draw chart: {e:#}")?,
            },
            "3" => match session.year_chart(None) {
                Ok(path) => writeln!(out, "\nChart saved to {}", path.display())?,
                Err(e) => writeln!(out, "\nCould not draw chart: {e:#}")?,
            },
            "4" => analyze_population(session, &mut input, out)?,
            "5" => super::run_report(session, out)?,
            "6" => extract_tables(session, &mut input, out)?,
            "7" => {
                session.save_cache()?;
                writeln!(out, "Cache saved. Goodbye!")?;
                return Ok(());
            }
            "0" => {
                writeln!(out, "Goodbye!")?;
                return Ok(());
            }
            other => writeln!(out, "Unknown choice: {other}")?,
        }
    }
}

fn show_overview<W: Write>(session: &CensusSession, out: &mut W) -> Result<()> {
    let stats = session.catalog().overview();
    writeln!(out, "\nTotal files: {}", stats.total_files)?;
    writeln!(out, "\nFiles by state:")?;
    for (state, count) in &stats.states {
        writeln!(out, "  {state}: {count}")?;
    }
    writeln!(out, "\nFiles by year:")?;
    for (year, count) in &stats.years {
        writeln!(out, "  {year}: {count}")?;
    }
    Ok(())
}

fn analyze_population<R: BufRead, W: Write>(
    session: &mut CensusSession,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    let Some(state) = prompt(input, out, "Enter state code (or press Enter for all): ")? else {
        return Ok(());
    };
    let Some(year) = prompt(input, out, "Enter year (or press Enter for all): ")? else {
        return Ok(());
    };
    let filter = FileFilter {
        state: Some(state.to_uppercase()).filter(|s| !s.is_empty()),
        year: Some(year).filter(|y| !y.is_empty()),
        table_type: None,
    };

    let matching = session.catalog().filter(&filter).count();
    writeln!(out, "Analyzing {matching} census files...")?;
    let records = session.analyze(&filter);
    writeln!(out, "\nFound {} population-related tables", records.len())?;

    if !records.is_empty()
        && confirm(input, out, &format!("\nShow first {CAPTIONS_SHOWN} table captions? (y/n): "))?
    {
        for (i, rec) in records.iter().take(CAPTIONS_SHOWN).enumerate() {
            match rec.total_persons {
                Some(total) => writeln!(out, "\n{}. {} (total: {total})", i + 1, rec.caption)?,
                None => writeln!(out, "\n{}. {}", i + 1, rec.caption)?,
            }
        }
    }
    Ok(())
}

fn extract_tables<R: BufRead, W: Write>(
    session: &mut CensusSession,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "\nAvailable states: {}", session.catalog().states().join(", "))?;
    let Some(state) = prompt(input, out, "Enter state code: ")? else {
        return Ok(());
    };
    let state = state.to_uppercase();

    let years = session.catalog().years_for_state(&state);
    writeln!(out, "\nAvailable years for {state}: {}", years.join(", "))?;
    let Some(year) = prompt(input, out, "Enter year: ")? else {
        return Ok(());
    };

    let filter = FileFilter {
        state: Some(state),
        year: Some(year),
        table_type: None,
    };
    let matches: Vec<_> = session.catalog().filter(&filter).cloned().collect();
    if matches.is_empty() {
        writeln!(out, "\nNo matching files")?;
        return Ok(());
    }

    writeln!(out, "\nFound {} files", matches.len())?;
    for (i, meta) in matches.iter().take(FILES_SHOWN).enumerate() {
        writeln!(out, "{}. {}", i + 1, meta.filename)?;
    }
    if confirm(input, out, "\nExtract data from first file? (y/n): ")? {
        match session.cache_mut().tables_for(&matches[0]) {
            Ok(tables) => {
                writeln!(out, "\nExtracted {} tables", tables.len())?;
                for t in tables.iter().filter(|t| !t.caption.is_empty()) {
                    writeln!(out, "  - {}", t.caption)?;
                }
            }
            Err(e) => writeln!(out, "\nCould not extract tables: {e:#}")?,
        }
    }
    Ok(())
}
