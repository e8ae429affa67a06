//! Safety checks for decoded path segments before they touch the filesystem.

/// Linux NAME_MAX.
const NAME_MAX: usize = 255;

/// Returns true if a decoded URL path segment can be used verbatim as one
/// local path component.
///
/// Rejects empty names, `.` and `..`, names containing `/`, `\` or NUL, and
/// names longer than 255 bytes. Nothing is rewritten: a rejected segment has
/// no lossless local counterpart and is skipped by the caller.
pub fn is_safe_segment(segment: &str) -> bool {
    if segment.is_empty() || segment == "." || segment == ".." {
        return false;
    }
    if segment.len() > NAME_MAX {
        return false;
    }
    !segment.chars().any(|c| c == '/' || c == '\\' || c == '\0')
}
