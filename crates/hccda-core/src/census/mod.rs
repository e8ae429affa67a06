//! Census reporting over a mirrored archive: file discovery and
//! classification, table extraction with a JSON cache, overview statistics,
//! the text summary and PNG charts.

pub mod cache;
pub mod meta;
pub mod plots;
pub mod report;
pub mod stats;
pub mod table;

pub use cache::{CacheEntry, CachedMeta, CensusCache, FileFingerprint};
pub use meta::{find_census_files, parse_census_filename, CensusFileMeta, TableType};
pub use plots::{plot_files_by_state, plot_files_by_year, PlotError};
pub use report::{render_summary, write_summary};
pub use stats::{CensusCatalog, FileFilter, OverviewStats, PopulationRecord};
pub use table::{extract_tables, CensusTable};
