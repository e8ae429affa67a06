use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Snapshot of the archive on the Wayback Machine that the mirror walks.
pub const DEFAULT_BASE_URL: &str =
    "https://web.archive.org/web/20250305014851/http://hccda.ada.edu.au/";

/// Mirror settings (`[mirror]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MirrorConfig {
    /// Root of the archived directory tree. Must end with `/`.
    pub base_url: String,
    /// Deepest directory level that is still listed (root = 0).
    pub max_depth: usize,
    /// Minimum delay between the start of two HTTP requests, in milliseconds.
    pub request_delay_ms: u64,
    /// Overall timeout for a single request, in seconds.
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_depth: 15,
            request_delay_ms: 200,
            timeout_secs: 60,
            user_agent: "hccda mirror script".to_string(),
        }
    }
}

impl MirrorConfig {
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Census reporting settings (`[census]` section in config.toml).
///
/// Relative paths are resolved against the base directory given on the
/// command line (the current directory by default).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CensusConfig {
    /// Directory holding the mirrored census HTML tree.
    pub data_dir: PathBuf,
    /// JSON cache of extracted tables.
    pub cache_file: PathBuf,
    /// Summary report written by `--report`.
    pub report_file: PathBuf,
    /// Number of matching files scanned by a population analysis.
    pub analyze_limit: usize,
    /// Caption keywords that mark a table as population-related.
    pub population_keywords: Vec<String>,
}

impl Default for CensusConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("census_data_download"),
            cache_file: PathBuf::from("census_cache.json"),
            report_file: PathBuf::from("census_summary.txt"),
            analyze_limit: 10,
            population_keywords: ["population", "total", "persons", "males", "females"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Global configuration loaded from `~/.config/hccda/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HccdaConfig {
    #[serde(default)]
    pub mirror: MirrorConfig,
    #[serde(default)]
    pub census: CensusConfig,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("hccda")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<HccdaConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = HccdaConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: HccdaConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = HccdaConfig::default();
        assert_eq!(cfg.mirror.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.mirror.max_depth, 15);
        assert_eq!(cfg.mirror.request_delay(), Duration::from_millis(200));
        assert_eq!(cfg.mirror.timeout(), Duration::from_secs(60));
        assert_eq!(cfg.census.analyze_limit, 10);
        assert_eq!(cfg.census.population_keywords.len(), 5);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = HccdaConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: HccdaConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.mirror.base_url, cfg.mirror.base_url);
        assert_eq!(parsed.mirror.max_depth, cfg.mirror.max_depth);
        assert_eq!(parsed.census.data_dir, cfg.census.data_dir);
        assert_eq!(parsed.census.population_keywords, cfg.census.population_keywords);
    }

    #[test]
    fn config_toml_partial_sections_fall_back_to_defaults() {
        let toml = r#"
            [mirror]
            max_depth = 3
            request_delay_ms = 0
        "#;
        let cfg: HccdaConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.mirror.max_depth, 3);
        assert_eq!(cfg.mirror.request_delay_ms, 0);
        assert_eq!(cfg.mirror.user_agent, "hccda mirror script");
        assert_eq!(cfg.census.cache_file, PathBuf::from("census_cache.json"));
    }

    #[test]
    fn config_toml_empty_file() {
        let cfg: HccdaConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.mirror.timeout_secs, 60);
        assert_eq!(cfg.census.report_file, PathBuf::from("census_summary.txt"));
    }

    #[test]
    fn config_toml_census_keywords() {
        let toml = r#"
            [census]
            analyze_limit = 25
            population_keywords = ["inhabitants"]
        "#;
        let cfg: HccdaConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.census.analyze_limit, 25);
        assert_eq!(cfg.census.population_keywords, vec!["inhabitants".to_string()]);
    }
}
