//! Census file discovery and filename classification.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use walkdir::WalkDir;

const COLLATED_MARKER: &str = "Collated_Census_Tables";
const INDIVIDUAL_MARKER: &str = "Individual_Census_Tables";

/// Which of the archive's two table collections a file belongs to.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TableType {
    Collated,
    Individual,
    #[default]
    Unknown,
}

impl TableType {
    pub fn as_str(self) -> &'static str {
        match self {
            TableType::Collated => "collated",
            TableType::Individual => "individual",
            TableType::Unknown => "unknown",
        }
    }

}

impl FromStr for TableType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "collated" => Ok(TableType::Collated),
            "individual" => Ok(TableType::Individual),
            "unknown" => Ok(TableType::Unknown),
            other => Err(format!("unknown table type: {other}")),
        }
    }
}

impl fmt::Display for TableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata derived from a census file's name and location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CensusFileMeta {
    pub filepath: PathBuf,
    pub filename: String,
    /// Colony/state code, e.g. `NSW`.
    pub state: Option<String>,
    /// Census year as written in the filename, e.g. `1891`.
    pub year: Option<String>,
    pub table_type: TableType,
}

/// Classifies a census file by name: `STATE-...-YEAR-....html`.
///
/// The name (minus `.html`) is split on `-`. The first part is the state when
/// there are at least two parts; the year is the first part made of exactly
/// four ASCII digits. The collection comes from the directory names in the
/// full path.
pub fn parse_census_filename(path: &Path) -> CensusFileMeta {
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = filename.replace(".html", "");
    let parts: Vec<&str> = stem.split('-').collect();

    let state = if parts.len() >= 2 && !parts[0].is_empty() {
        Some(parts[0].to_string())
    } else {
        None
    };
    let year = parts
        .iter()
        .find(|p| p.len() == 4 && p.bytes().all(|b| b.is_ascii_digit()))
        .map(|p| p.to_string());

    let full = path.to_string_lossy();
    let table_type = if full.contains(COLLATED_MARKER) {
        TableType::Collated
    } else if full.contains(INDIVIDUAL_MARKER) {
        TableType::Individual
    } else {
        TableType::Unknown
    };

    CensusFileMeta {
        filepath: path.to_path_buf(),
        filename,
        state,
        year,
        table_type,
    }
}

/// All `*.html` files under `data_dir` whose path below `data_dir` mentions
/// "census" (any case), sorted.
pub fn find_census_files(data_dir: &Path) -> Vec<PathBuf> {
    if !data_dir.is_dir() {
        tracing::warn!("census data directory not found: {}", data_dir.display());
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = WalkDir::new(data_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "html"))
        .filter(|p| {
            let rel = p.strip_prefix(data_dir).unwrap_or(p);
            rel.to_string_lossy().to_lowercase().contains("census")
        })
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collated_file_triple() {
        let m = parse_census_filename(Path::new(
            "data/Collated_Census_Tables/NSW/NSW-1891-census-02.html",
        ));
        assert_eq!(m.filename, "NSW-1891-census-02.html");
        assert_eq!(m.state.as_deref(), Some("NSW"));
        assert_eq!(m.year.as_deref(), Some("1891"));
        assert_eq!(m.table_type, TableType::Collated);
    }

    #[test]
    fn individual_file_triple() {
        let m = parse_census_filename(Path::new(
            "/m/Individual_Census_Tables/QLD/QLD-1901-census-01_02.html",
        ));
        assert_eq!(m.state.as_deref(), Some("QLD"));
        assert_eq!(m.year.as_deref(), Some("1901"));
        assert_eq!(m.table_type, TableType::Individual);
    }

    #[test]
    fn first_four_digit_part_is_the_year() {
        let m = parse_census_filename(Path::new("x/TAS-census-1861-0001.html"));
        assert_eq!(m.year.as_deref(), Some("1861"));
        let m = parse_census_filename(Path::new("x/VIC-18610-census.html"));
        assert_eq!(m.year, None);
    }

    #[test]
    fn single_part_name_has_no_state() {
        let m = parse_census_filename(Path::new("census/index.html"));
        assert_eq!(m.state, None);
        assert_eq!(m.year, None);
        assert_eq!(m.table_type, TableType::Unknown);
    }

    #[test]
    fn table_type_names() {
        assert_eq!("Collated".parse::<TableType>(), Ok(TableType::Collated));
        assert_eq!("individual".parse::<TableType>(), Ok(TableType::Individual));
        assert!("other".parse::<TableType>().is_err());
        assert_eq!(TableType::Individual.to_string(), "individual");
        assert_eq!(
            serde_json::to_string(&TableType::Collated).unwrap(),
            "\"collated\""
        );
    }

    #[test]
    fn find_census_files_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let collated = root.join("Collated_Census_Tables/NSW");
        let other = root.join("Misc");
        std::fs::create_dir_all(&collated).unwrap();
        std::fs::create_dir_all(&other).unwrap();
        std::fs::write(collated.join("NSW-1891-census-02.html"), "x").unwrap();
        std::fs::write(collated.join("NSW-1891-census-01.html"), "x").unwrap();
        std::fs::write(collated.join("notes.txt"), "x").unwrap();
        std::fs::write(other.join("about.html"), "x").unwrap();

        let files = find_census_files(root);
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["NSW-1891-census-01.html", "NSW-1891-census-02.html"]);
    }

    #[test]
    fn find_census_files_missing_dir() {
        assert!(find_census_files(Path::new("/definitely/not/here")).is_empty());
    }
}
