//! Command-line front ends: `hccda-mirror` and `hccda-census`.

mod commands;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use hccda_core::census::{FileFilter, TableType};
use hccda_core::config::{self, MirrorConfig};
use std::io;
use std::path::PathBuf;

pub use commands::CensusSession;

/// Mirror the HCCDA census archive into a local directory.
#[derive(Debug, Parser)]
#[command(name = "hccda-mirror")]
#[command(about = "Mirror the archived HCCDA census tables to a local folder", long_about = None)]
pub struct MirrorCli {
    /// Destination directory for the mirrored tree.
    pub dest: PathBuf,

    /// Deepest directory level to list (root = 0). Overrides the config file.
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Delay between consecutive requests in milliseconds. Overrides the config file.
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// Archive root to mirror (defaults to the Wayback Machine snapshot).
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Log file (default: ~/.local/state/hccda/hccda.log).
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl MirrorCli {
    /// Command-line values win over the config file.
    pub fn apply(&self, cfg: &mut MirrorConfig) {
        if let Some(depth) = self.max_depth {
            cfg.max_depth = depth;
        }
        if let Some(delay) = self.delay_ms {
            cfg.request_delay_ms = delay;
        }
        if let Some(base) = &self.base_url {
            cfg.base_url = base.clone();
        }
    }

    pub fn run(self) -> Result<()> {
        let mut cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        self.apply(&mut cfg.mirror);
        commands::run_mirror(&cfg.mirror, &self.dest)
    }
}

/// Table collection selectable with `--type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TypeArg {
    Collated,
    Individual,
}

impl From<TypeArg> for TableType {
    fn from(arg: TypeArg) -> Self {
        match arg {
            TypeArg::Collated => TableType::Collated,
            TypeArg::Individual => TableType::Individual,
        }
    }
}

/// Explore, chart and summarise the mirrored census tables.
///
/// Without options an interactive menu is shown.
#[derive(Debug, Parser)]
#[command(name = "hccda-census")]
#[command(about = "Analyse and chart the mirrored HCCDA census tables", long_about = None)]
pub struct CensusCli {
    /// Directory holding `census_data_download/` (default: current directory).
    #[arg(long, value_name = "DIR")]
    pub base: Option<PathBuf>,

    /// Write and print the summary report only.
    #[arg(long)]
    pub report: bool,

    /// Filter by state code (e.g. NSW, QLD).
    #[arg(long, value_name = "CODE")]
    pub state: Option<String>,

    /// Filter by census year.
    #[arg(long, value_name = "YYYY")]
    pub year: Option<String>,

    /// Filter by table collection.
    #[arg(long = "type", value_enum, value_name = "TYPE")]
    pub table_type: Option<TypeArg>,

    /// Log file (default: ~/.local/state/hccda/hccda.log).
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl CensusCli {
    /// The analysis filter, or `None` when no filter flag was given.
    pub fn filter(&self) -> Option<FileFilter> {
        let filter = FileFilter {
            state: self.state.clone(),
            year: self.year.clone(),
            table_type: self.table_type.map(TableType::from),
        };
        (!filter.is_empty()).then_some(filter)
    }

    pub fn run(self) -> Result<()> {
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let base = match &self.base {
            Some(b) => b.clone(),
            None => std::env::current_dir()?,
        };
        let mut session = CensusSession::open(&base, cfg.census);
        let stdout = io::stdout();
        let mut out = stdout.lock();

        if self.report {
            commands::run_report(&session, &mut out)
        } else if let Some(filter) = self.filter() {
            commands::run_analyze(&mut session, &filter, &mut out)
        } else {
            let stdin = io::stdin();
            commands::run_interactive(&mut session, stdin.lock(), &mut out)
        }
    }
}

#[cfg(test)]
mod tests;
