//! Integration test: mirror a tree served by a local HTTP server with the real
//! curl client, run again to check nothing is re-downloaded, then report on
//! the mirrored census files.

mod common;

use hccda_core::census::{CensusCache, CensusCatalog, FileFilter, TableType};
use hccda_core::config::MirrorConfig;
use hccda_core::mirror::Mirror;
use hccda_core::storage::temp_path;
use tempfile::tempdir;

const ROOT_PAGE: &str = r#"<html><body><h1>Index of /</h1>
<a href="?C=N;O=D">Name</a>
<a href="../">Parent Directory</a>
<a href="Collated_Census_Tables/">Collated_Census_Tables/</a>
<a href="readme.txt">readme.txt</a>
<a href="gone.txt">gone.txt</a>
</body></html>"#;

const COLLATED_PAGE: &str = r#"<a href="../">Parent Directory</a>
<a href="NSW/">NSW/</a>"#;

const NSW_PAGE: &str = r#"<a href="/hccda/">Up</a>
<a href="NSW-1891-census-01.html">NSW-1891-census-01.html</a>"#;

const CENSUS_PAGE: &str = "<table><caption>Population of the colony</caption><tbody>\
<tr><td>Total</td><td>1,132,234</td></tr></tbody></table>";

fn serve_archive() -> common::listing_server::ListingServer {
    common::listing_server::start(&[
        ("", ROOT_PAGE.as_bytes()),
        ("Collated_Census_Tables/", COLLATED_PAGE.as_bytes()),
        ("Collated_Census_Tables/NSW/", NSW_PAGE.as_bytes()),
        (
            "Collated_Census_Tables/NSW/NSW-1891-census-01.html",
            CENSUS_PAGE.as_bytes(),
        ),
        ("readme.txt", b"historical census tables\n"),
    ])
}

fn config(base: &str) -> MirrorConfig {
    MirrorConfig {
        base_url: base.to_string(),
        request_delay_ms: 0,
        timeout_secs: 10,
        ..MirrorConfig::default()
    }
}

#[test]
fn mirror_over_http_then_rerun_downloads_nothing() {
    let server = serve_archive();
    let dest = tempdir().unwrap();
    let cfg = config(&server.base);

    let stats = Mirror::from_config(&cfg, dest.path())
        .unwrap()
        .run()
        .unwrap();
    assert_eq!(stats.directories, 3);
    assert_eq!(stats.files_downloaded, 2);
    assert_eq!(stats.failures, 1, "gone.txt answers 404");

    let census = dest
        .path()
        .join("Collated_Census_Tables/NSW/NSW-1891-census-01.html");
    assert_eq!(std::fs::read_to_string(&census).unwrap(), CENSUS_PAGE);
    assert_eq!(
        std::fs::read(dest.path().join("readme.txt")).unwrap(),
        b"historical census tables\n"
    );
    assert!(!dest.path().join("gone.txt").exists());
    assert!(!temp_path(&dest.path().join("gone.txt")).exists());

    let again = Mirror::from_config(&cfg, dest.path())
        .unwrap()
        .run()
        .unwrap();
    assert_eq!(again.files_downloaded, 0);
    assert_eq!(again.files_skipped, 2);
    assert_eq!(server.hits("/hccda/readme.txt"), 1);
    assert_eq!(
        server.hits("/hccda/Collated_Census_Tables/NSW/NSW-1891-census-01.html"),
        1
    );
    // Listing pages are fetched once per run.
    assert_eq!(server.hits("/hccda/"), 2);
    assert_eq!(server.hits("/hccda/?C=N;O=D"), 0);
}

#[test]
fn mirrored_tree_feeds_census_reporting() {
    let server = serve_archive();
    let dest = tempdir().unwrap();
    Mirror::from_config(&config(&server.base), dest.path())
        .unwrap()
        .run()
        .unwrap();

    let catalog = CensusCatalog::scan(dest.path());
    assert_eq!(catalog.files().len(), 1);
    let overview = catalog.overview();
    assert_eq!(overview.states.get("NSW"), Some(&1));
    assert_eq!(overview.types.get(&TableType::Collated), Some(&1));

    let cache_path = dest.path().join("census_cache.json");
    let mut cache = CensusCache::load(&cache_path);
    let records = catalog.analyze_population(
        &mut cache,
        &FileFilter::default(),
        &["population"],
        10,
        |_| {},
    );
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].total_persons, Some(1_132_234));
    cache.save().unwrap();
    assert_eq!(CensusCache::load(&cache_path).len(), 1);
}
