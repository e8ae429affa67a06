//! Percent-decoding of URL path segments.

use percent_encoding::percent_decode_str;

/// Decodes `%XX` escapes in a single path segment.
///
/// Malformed escapes are kept literally. Returns `None` when the decoded bytes
/// are not valid UTF-8, since such a segment has no lossless local name.
pub fn percent_decode(input: &str) -> Option<String> {
    percent_decode_str(input)
        .decode_utf8()
        .ok()
        .map(|s| s.into_owned())
}
