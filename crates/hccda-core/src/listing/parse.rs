//! Extract and classify `<a href>` links from a directory listing page.

use crate::html;

/// What a listing link points at, judged from the raw `href`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Directory,
    File,
    /// Parent links, sort/query links, in-page anchors and non-HTTP schemes.
    Ignored,
}

/// All `href` values of `<a>` tags, in document order.
pub fn extract_links(page: &str) -> Vec<String> {
    let lc = page.to_ascii_lowercase();
    let mut out = Vec::new();
    let mut pos = 0;
    while let Some(start) = html::find_open_tag(&lc, "a", pos) {
        let Some(gt) = page[start..].find('>') else {
            break;
        };
        let open_end = start + gt + 1;
        if let Some(href) = html::attr_value(&page[start..open_end], "href") {
            let href = href.trim();
            if !href.is_empty() {
                out.push(href.to_string());
            }
        }
        pos = open_end;
    }
    out
}

/// Classifies one `href`: a trailing `/` is a directory, anything else a file.
pub fn classify_link(href: &str) -> LinkKind {
    let href = href.trim();
    if href.is_empty() || href == "../" || href == ".." || href == "./" || href == "/" {
        return LinkKind::Ignored;
    }
    if href.starts_with('?') || href.starts_with('#') || href.contains('?') {
        return LinkKind::Ignored;
    }
    let lower = href.to_ascii_lowercase();
    if ["mailto:", "javascript:", "ftp:", "data:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
    {
        return LinkKind::Ignored;
    }
    let path = href.split('#').next().unwrap_or(href);
    if path.ends_with('/') {
        LinkKind::Directory
    } else {
        LinkKind::File
    }
}
