//! Path-level comparisons between archive URLs.
//!
//! Wayback Machine paths carry a capture prefix (`/web/<timestamp>[flags]/`)
//! whose timestamp changes when the archive redirects to a nearby capture.
//! Every comparison here ignores it, so one archived page reached through two
//! captures is the same page.

use url::Url;

/// Remainder of `path` after a Wayback capture prefix such as
/// `/web/20250305014851/` or `/web/20250305014851im_/`.
pub fn strip_capture(path: &str) -> Option<&str> {
    let rest = path.strip_prefix("/web/")?;
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let flags = rest[digits..]
        .bytes()
        .take_while(|b| b.is_ascii_lowercase() || *b == b'_')
        .count();
    rest[digits + flags..].strip_prefix('/')
}

/// Path with any capture prefix removed, and whether one was present.
fn comparable(path: &str) -> (bool, &str) {
    match strip_capture(path) {
        Some(rest) => (true, rest),
        None => (false, path),
    }
}

/// Strips the archive base path from a URL path.
///
/// `base_path` always ends with `/`. The base path without its trailing slash
/// maps to the empty relative path, so `.../hccda.ada.edu.au` and
/// `.../hccda.ada.edu.au/` are the same directory. Capture timestamps on
/// either side are ignored.
pub fn strip_base_path<'a>(base_path: &str, path: &'a str) -> Option<&'a str> {
    let (base_captured, base_path) = comparable(base_path);
    let (captured, path) = comparable(path);
    if base_captured != captured {
        return None;
    }
    if let Some(rest) = path.strip_prefix(base_path) {
        return Some(rest);
    }
    if base_path.strip_suffix('/') == Some(path) {
        return Some("");
    }
    None
}

/// True if `child` lies strictly below `parent` in the URL hierarchy.
///
/// Both URLs must share an origin. Ancestors, siblings and `parent` itself
/// are not within.
pub fn is_within(parent: &Url, child: &Url) -> bool {
    if parent.origin() != child.origin() {
        return false;
    }
    let (parent_captured, parent_path) = comparable(parent.path());
    let (child_captured, child_path) = comparable(child.path());
    if parent_captured != child_captured {
        return false;
    }
    let child_path = child_path.trim_end_matches('/');
    let prefix = if parent_path.ends_with('/') {
        parent_path.to_string()
    } else {
        format!("{parent_path}/")
    };
    child_path.len() >= prefix.len() && child_path.starts_with(&prefix)
}

/// Key used for the visited set: no fragment, no query, no capture
/// timestamp, trailing `/` trimmed.
pub fn visit_key(url: &Url) -> String {
    let origin = url.origin().ascii_serialization();
    let key = match strip_capture(url.path()) {
        Some(rest) => format!("{origin}/web/{rest}"),
        None => format!("{origin}{}", url.path()),
    };
    key.trim_end_matches('/').to_string()
}
