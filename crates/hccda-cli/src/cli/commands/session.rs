//! State shared by the census commands: the scanned catalog and the
//! extraction cache, rooted at the base directory.

use anyhow::Result;
use hccda_core::census::{
    plot_files_by_state, plot_files_by_year, plots, CensusCache, CensusCatalog, FileFilter,
    PopulationRecord,
};
use hccda_core::config::CensusConfig;
use hccda_core::progress;
use std::path::{Path, PathBuf};

pub struct CensusSession {
    base: PathBuf,
    cfg: CensusConfig,
    catalog: CensusCatalog,
    cache: CensusCache,
}

impl CensusSession {
    /// Scans `<base>/<data_dir>` and loads `<base>/<cache_file>`.
    pub fn open(base: &Path, cfg: CensusConfig) -> Self {
        let catalog = CensusCatalog::scan(&base.join(&cfg.data_dir));
        let cache = CensusCache::load(base.join(&cfg.cache_file));
        Self {
            base: base.to_path_buf(),
            cfg,
            catalog,
            cache,
        }
    }

    pub fn catalog(&self) -> &CensusCatalog {
        &self.catalog
    }

    pub fn cache_mut(&mut self) -> &mut CensusCache {
        &mut self.cache
    }

    pub fn report_path(&self) -> PathBuf {
        self.base.join(&self.cfg.report_file)
    }

    /// Population tables from the first `analyze_limit` matching files.
    pub fn analyze(&mut self, filter: &FileFilter) -> Vec<PopulationRecord> {
        let total = self.catalog.filter(filter).count().min(self.cfg.analyze_limit);
        let bar = progress::count_bar(total, "analyzing", true);
        let records = self.catalog.analyze_population(
            &mut self.cache,
            filter,
            &self.cfg.population_keywords,
            self.cfg.analyze_limit,
            |_| bar.inc(1),
        );
        bar.finish_and_clear();
        records
    }

    /// Bar chart of files per state, named after the state filter.
    pub fn state_chart(&self, state: Option<&str>) -> Result<PathBuf> {
        let path = self.base.join(plots::state_chart_name(state));
        plot_files_by_state(&self.catalog.overview().states, &path)?;
        Ok(path)
    }

    /// Timeline of files per year, named after the year filter.
    pub fn year_chart(&self, year: Option<&str>) -> Result<PathBuf> {
        let path = self.base.join(plots::year_chart_name(year));
        plot_files_by_year(&self.catalog.overview().years, &path)?;
        Ok(path)
    }

    pub fn save_cache(&mut self) -> Result<()> {
        self.cache.save()
    }
}
