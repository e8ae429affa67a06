//! Walk tests against an in-memory archive.

use super::*;
use crate::fetch::{FetchError, Fetcher};
use std::collections::HashMap;
use url::Url;

const BASE: &str = "http://archive.test/web/1/http://hccda.ada.edu.au/";

/// Serves listing pages and files from maps keyed by URL; records requests.
#[derive(Default)]
struct FakeArchive {
    pages: HashMap<String, String>,
    files: HashMap<String, Vec<u8>>,
    page_requests: Vec<String>,
    downloads: Vec<String>,
}

impl FakeArchive {
    fn page(mut self, rel: &str, body: &str) -> Self {
        self.pages.insert(format!("{BASE}{rel}"), body.to_string());
        self
    }

    fn file(mut self, rel: &str, body: &[u8]) -> Self {
        self.files.insert(format!("{BASE}{rel}"), body.to_vec());
        self
    }
}

impl Fetcher for &mut FakeArchive {
    fn get_text(&mut self, url: &Url) -> Result<String, FetchError> {
        self.page_requests.push(url.to_string());
        self.pages.get(url.as_str()).cloned().ok_or(FetchError::Http {
            url: url.to_string(),
            status: 404,
        })
    }

    fn download_to(&mut self, url: &Url, dest: &Path) -> Result<u64, FetchError> {
        self.downloads.push(url.to_string());
        let body = self.files.get(url.as_str()).ok_or(FetchError::Http {
            url: url.to_string(),
            status: 404,
        })?;
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(dest, body)?;
        Ok(body.len() as u64)
    }
}

fn sample_archive() -> FakeArchive {
    FakeArchive::default()
        .page(
            "",
            r#"<a href="../">Parent</a>
               <a href="Collated_Census_Tables/">Collated_Census_Tables/</a>
               <a href="Individual_Census_Tables/">Individual_Census_Tables/</a>
               <a href="README.txt">README.txt</a>"#,
        )
        .page(
            "Collated_Census_Tables/",
            r#"<a href="/web/1/http://hccda.ada.edu.au/">Parent Directory</a>
               <a href="NSW-1891-census-01.html">a</a>
               <a href="QLD-1901-census-02.html">b</a>"#,
        )
        .page(
            "Individual_Census_Tables/",
            r#"<a href="TAS/">TAS/</a>
               <a href="missing.html">gone</a>"#,
        )
        .page(
            "Individual_Census_Tables/TAS/",
            r#"<a href="TAS-1861-census%2001.html">c</a>
               <a href="../">up</a>"#,
        )
        .file("README.txt", b"readme")
        .file("Collated_Census_Tables/NSW-1891-census-01.html", b"<html>nsw</html>")
        .file("Collated_Census_Tables/QLD-1901-census-02.html", b"<html>qld</html>")
        .file("Individual_Census_Tables/TAS/TAS-1861-census%2001.html", b"<html>tas</html>")
}

fn run(archive: &mut FakeArchive, dest: &Path, max_depth: usize) -> MirrorStats {
    let root = ArchiveRoot::parse(BASE).unwrap();
    Mirror::new(archive, root, dest, max_depth).run().unwrap()
}

#[test]
fn mirrors_tree_one_to_one() {
    let dest = tempfile::tempdir().unwrap();
    let mut archive = sample_archive();
    let stats = run(&mut archive, dest.path(), 15);

    assert_eq!(stats.directories, 4);
    assert_eq!(stats.files_downloaded, 4);
    assert_eq!(stats.files_skipped, 0);
    assert_eq!(stats.failures, 1, "missing.html is logged and skipped");
    assert_eq!(stats.bytes, 6 + 16 + 16 + 16);

    let d = dest.path();
    assert_eq!(std::fs::read(d.join("README.txt")).unwrap(), b"readme");
    assert!(d.join("Collated_Census_Tables/NSW-1891-census-01.html").is_file());
    assert!(d.join("Collated_Census_Tables/QLD-1901-census-02.html").is_file());
    assert!(d.join("Individual_Census_Tables/TAS/TAS-1861-census 01.html").is_file());
}

#[test]
fn second_run_downloads_nothing() {
    let dest = tempfile::tempdir().unwrap();
    let mut first = sample_archive();
    run(&mut first, dest.path(), 15);

    let mut second = sample_archive();
    let stats = run(&mut second, dest.path(), 15);
    assert_eq!(stats.files_downloaded, 0);
    assert_eq!(stats.files_skipped, 4);
    assert_eq!(second.downloads, vec![format!("{BASE}Individual_Census_Tables/missing.html")]);
}

#[test]
fn parent_links_are_not_followed() {
    let dest = tempfile::tempdir().unwrap();
    let mut archive = sample_archive();
    run(&mut archive, dest.path(), 15);

    let base_requests = archive
        .page_requests
        .iter()
        .filter(|u| u.as_str() == BASE)
        .count();
    assert_eq!(base_requests, 1);
    assert_eq!(archive.page_requests.len(), 4);
}

#[test]
fn depth_limit_stops_descent() {
    let dest = tempfile::tempdir().unwrap();
    let mut archive = sample_archive();
    let stats = run(&mut archive, dest.path(), 1);

    assert_eq!(stats.depth_limited, 1, "TAS/ sits at depth 2");
    assert!(!dest.path().join("Individual_Census_Tables/TAS").exists());
    assert!(dest.path().join("Collated_Census_Tables/NSW-1891-census-01.html").exists());
}

#[test]
fn failing_listing_does_not_stop_siblings() {
    let dest = tempfile::tempdir().unwrap();
    let mut archive = sample_archive();
    archive
        .pages
        .remove(&format!("{BASE}Collated_Census_Tables/"));
    let stats = run(&mut archive, dest.path(), 15);

    assert_eq!(stats.directories, 3);
    assert!(dest
        .path()
        .join("Individual_Census_Tables/TAS/TAS-1861-census 01.html")
        .exists());
}

#[test]
fn unreachable_root_is_not_fatal() {
    let dest = tempfile::tempdir().unwrap();
    let mut archive = FakeArchive::default();
    let stats = run(&mut archive, dest.path(), 15);
    assert_eq!(stats.failures, 1);
    assert_eq!(stats.directories, 0);
}

#[test]
fn destination_that_is_a_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("not-a-dir");
    std::fs::write(&file, b"x").unwrap();
    let mut archive = sample_archive();
    let root = ArchiveRoot::parse(BASE).unwrap();
    assert!(Mirror::new(&mut archive, root, &file, 15).run().is_err());
}

#[test]
fn subdirectory_served_from_another_capture() {
    const OTHER: &str = "http://archive.test/web/2/http://hccda.ada.edu.au/";
    let dest = tempfile::tempdir().unwrap();
    let mut archive = FakeArchive::default().page(
        "",
        r#"<a href="/web/2/http://hccda.ada.edu.au/Collated_Census_Tables/">Collated_Census_Tables/</a>"#,
    );
    archive.pages.insert(
        format!("{OTHER}Collated_Census_Tables/"),
        r#"<a href="/web/2/http://hccda.ada.edu.au/">Parent Directory</a>
           <a href="NSW-1891-census-01.html">a</a>"#
            .to_string(),
    );
    archive.files.insert(
        format!("{OTHER}Collated_Census_Tables/NSW-1891-census-01.html"),
        b"<html>nsw</html>".to_vec(),
    );
    let stats = run(&mut archive, dest.path(), 15);

    assert_eq!(stats.directories, 2);
    assert_eq!(stats.files_downloaded, 1);
    assert_eq!(stats.failures, 0);
    assert_eq!(archive.page_requests.len(), 2, "root is not revisited under the new timestamp");
    assert!(dest
        .path()
        .join("Collated_Census_Tables/NSW-1891-census-01.html")
        .is_file());
}
