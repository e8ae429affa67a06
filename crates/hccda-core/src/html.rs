//! Low-level HTML string helpers.
//!
//! Deliberately naive: directory listings and census table pages are plain,
//! machine-generated HTML. Tag and attribute names match case-insensitively;
//! the lowercased copy of a document keeps byte offsets because only ASCII is
//! folded.

/// Byte offsets of one `<tag ...>inner</tag>` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element {
    /// Offset of `<`.
    pub start: usize,
    /// Offset just past the `>` of the opening tag.
    pub open_end: usize,
    /// Offset of the closing tag (or of the end of the searched region).
    pub inner_end: usize,
    /// Offset just past the closing tag.
    pub end: usize,
}

impl Element {
    pub fn open_tag<'a>(&self, doc: &'a str) -> &'a str {
        &doc[self.start..self.open_end]
    }

    pub fn inner<'a>(&self, doc: &'a str) -> &'a str {
        &doc[self.open_end..self.inner_end]
    }
}

/// Finds the next `<tag` at or after `from` whose name is exactly `tag`
/// (so `<th` does not match `<thead>`). `lc` must be the ASCII-lowercased
/// document; `tag` must be lowercase.
pub fn find_open_tag(lc: &str, tag: &str, from: usize) -> Option<usize> {
    let pat = format!("<{tag}");
    let mut pos = from;
    while let Some(rel) = lc.get(pos..)?.find(&pat) {
        let at = pos + rel;
        let after = at + pat.len();
        match lc.as_bytes().get(after) {
            Some(b) if b.is_ascii_whitespace() || *b == b'>' || *b == b'/' => return Some(at),
            None => return None,
            _ => pos = after,
        }
    }
    None
}

/// Next complete `tag` element within `lc[from..limit]`.
///
/// Nested elements of the same name are skipped when looking for the closing
/// tag. A missing closing tag ends the element at the next opening tag of the
/// same name, or at `limit`.
pub fn next_element(lc: &str, tag: &str, from: usize, limit: usize) -> Option<Element> {
    let scope = &lc[..limit];
    let start = find_open_tag(scope, tag, from)?;
    let open_end = scope[start..].find('>')? + start + 1;
    let (inner_end, end) = match matching_close(scope, tag, open_end) {
        Some(inner_end) => {
            let end = scope[inner_end..]
                .find('>')
                .map(|g| inner_end + g + 1)
                .unwrap_or(limit);
            (inner_end, end)
        }
        None => {
            let sibling = find_open_tag(scope, tag, open_end).unwrap_or(limit);
            (sibling, sibling)
        }
    };
    Some(Element {
        start,
        open_end,
        inner_end,
        end,
    })
}

/// Offset of the `</tag` that closes an element whose content starts at
/// `from`, counting nested `tag` elements.
fn matching_close(scope: &str, tag: &str, from: usize) -> Option<usize> {
    let close = format!("</{tag}");
    let mut depth = 0usize;
    let mut pos = from;
    loop {
        let next_close = pos + scope[pos..].find(&close)?;
        match find_open_tag(scope, tag, pos) {
            Some(open) if open < next_close => {
                depth += 1;
                pos = open + 1;
            }
            _ if depth == 0 => return Some(next_close),
            _ => {
                depth -= 1;
                pos = next_close + close.len();
            }
        }
    }
}

/// All `tag` elements in `lc[from..limit]`, in document order, not nested.
pub fn elements(lc: &str, tag: &str, from: usize, limit: usize) -> Vec<Element> {
    let mut out = Vec::new();
    let mut pos = from;
    while let Some(el) = next_element(lc, tag, pos, limit) {
        pos = el.end.max(el.open_end);
        out.push(el);
    }
    out
}

/// Value of attribute `name` in an opening tag such as `<a href="x/">`.
///
/// Handles double-quoted, single-quoted and bare values. Entities in the
/// value are decoded.
pub fn attr_value(open_tag: &str, name: &str) -> Option<String> {
    let lc = open_tag.to_ascii_lowercase();
    let bytes = lc.as_bytes();
    let mut pos = 0;
    while let Some(rel) = lc[pos..].find(name) {
        let at = pos + rel;
        pos = at + name.len();
        let boundary_before = at > 0 && bytes[at - 1].is_ascii_whitespace();
        if !boundary_before {
            continue;
        }
        let rest = open_tag[pos..].trim_start();
        let Some(rest) = rest.strip_prefix('=') else {
            continue;
        };
        let rest = rest.trim_start();
        let raw = match rest.chars().next() {
            Some(q @ ('"' | '\'')) => {
                let body = &rest[1..];
                &body[..body.find(q).unwrap_or(body.len())]
            }
            _ => {
                let end = rest
                    .find(|c: char| c.is_ascii_whitespace() || c == '>')
                    .unwrap_or(rest.len());
                &rest[..end]
            }
        };
        return Some(decode_entities(raw));
    }
    None
}

/// Remove all HTML tags, decode entities, then collapse whitespace.
pub fn text_content(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&decode_entities(&out))
}

/// Decodes the named entities that show up in generated listings plus
/// numeric references. Unknown entities are left untouched.
pub fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail.find(';').filter(|semi| *semi <= 10).and_then(|semi| {
            decode_entity(&tail[1..semi]).map(|c| (c, semi + 1))
        });
        match decoded {
            Some((c, consumed)) => {
                out.push(c);
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

/// Collapse sequences of whitespace into a single space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}
