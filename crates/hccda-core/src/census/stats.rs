//! Overview counts and population analysis over the mirrored census tree.

use std::collections::BTreeMap;
use std::path::Path;

use super::cache::CensusCache;
use super::meta::{find_census_files, parse_census_filename, CensusFileMeta, TableType};
use super::table::CensusTable;

/// File counts by state, year and collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverviewStats {
    pub total_files: usize,
    pub states: BTreeMap<String, usize>,
    pub years: BTreeMap<String, usize>,
    pub types: BTreeMap<TableType, usize>,
}

impl OverviewStats {
    /// Earliest and latest census year, if any file has one.
    pub fn year_range(&self) -> Option<(&str, &str)> {
        let first = self.years.keys().next()?;
        let last = self.years.keys().next_back()?;
        Some((first.as_str(), last.as_str()))
    }
}

/// Selection of census files. `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileFilter {
    pub state: Option<String>,
    pub year: Option<String>,
    pub table_type: Option<TableType>,
}

impl FileFilter {
    pub fn is_empty(&self) -> bool {
        self.state.is_none() && self.year.is_none() && self.table_type.is_none()
    }

    /// State codes compare case-insensitively; years exactly.
    pub fn matches(&self, meta: &CensusFileMeta) -> bool {
        if let Some(want) = &self.state {
            match &meta.state {
                Some(s) if s.eq_ignore_ascii_case(want) => {}
                _ => return false,
            }
        }
        if let Some(want) = &self.year {
            if meta.year.as_deref() != Some(want.as_str()) {
                return false;
            }
        }
        if let Some(want) = self.table_type {
            if meta.table_type != want {
                return false;
            }
        }
        true
    }
}

/// A population-related table found by [`CensusCatalog::analyze_population`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulationRecord {
    pub state: Option<String>,
    pub year: Option<String>,
    pub caption: String,
    pub total_persons: Option<u64>,
    pub table: CensusTable,
}

/// Census files of a mirrored tree with their filename metadata.
#[derive(Debug, Clone, Default)]
pub struct CensusCatalog {
    files: Vec<CensusFileMeta>,
}

impl CensusCatalog {
    pub fn scan(data_dir: &Path) -> Self {
        let files = find_census_files(data_dir);
        tracing::info!(files = files.len(), "scanned {}", data_dir.display());
        Self::from_files(files.iter().map(|p| p.as_path()))
    }

    pub fn from_files<'a>(paths: impl IntoIterator<Item = &'a Path>) -> Self {
        Self {
            files: paths.into_iter().map(parse_census_filename).collect(),
        }
    }

    pub fn files(&self) -> &[CensusFileMeta] {
        &self.files
    }

    pub fn overview(&self) -> OverviewStats {
        let mut stats = OverviewStats {
            total_files: self.files.len(),
            ..Default::default()
        };
        for meta in &self.files {
            if let Some(state) = &meta.state {
                *stats.states.entry(state.clone()).or_default() += 1;
            }
            if let Some(year) = &meta.year {
                *stats.years.entry(year.clone()).or_default() += 1;
            }
            *stats.types.entry(meta.table_type).or_default() += 1;
        }
        stats
    }

    pub fn filter<'a>(
        &'a self,
        filter: &'a FileFilter,
    ) -> impl Iterator<Item = &'a CensusFileMeta> + 'a {
        self.files.iter().filter(move |m| filter.matches(m))
    }

    /// Distinct state codes, sorted.
    pub fn states(&self) -> Vec<String> {
        let mut out: Vec<String> = self.files.iter().filter_map(|m| m.state.clone()).collect();
        out.sort();
        out.dedup();
        out
    }

    /// Distinct years present for `state`, sorted.
    pub fn years_for_state(&self, state: &str) -> Vec<String> {
        let filter = FileFilter {
            state: Some(state.to_string()),
            ..Default::default()
        };
        let mut out: Vec<String> = self
            .filter(&filter)
            .filter_map(|m| m.year.clone())
            .collect();
        out.sort();
        out.dedup();
        out
    }

    /// Population tables from the first `limit` files matching `filter`.
    ///
    /// `on_file` is called before each file is read (progress display).
    /// Files whose tables cannot be extracted are logged and skipped.
    pub fn analyze_population<S: AsRef<str>>(
        &self,
        cache: &mut CensusCache,
        filter: &FileFilter,
        keywords: &[S],
        limit: usize,
        mut on_file: impl FnMut(&CensusFileMeta),
    ) -> Vec<PopulationRecord> {
        let selected: Vec<&CensusFileMeta> = self.filter(filter).collect();
        tracing::info!(
            matching = selected.len(),
            analyzing = selected.len().min(limit),
            "population analysis"
        );

        let mut records = Vec::new();
        for meta in selected.into_iter().take(limit) {
            on_file(meta);
            let tables = match cache.tables_for(meta) {
                Ok(t) => t,
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", meta.filepath.display(), e);
                    continue;
                }
            };
            for table in tables {
                if !table.is_population_table(keywords) {
                    continue;
                }
                records.push(PopulationRecord {
                    state: meta.state.clone(),
                    year: meta.year.clone(),
                    caption: table.caption.clone(),
                    total_persons: table.total_persons(),
                    table,
                });
            }
        }
        records
    }
}
