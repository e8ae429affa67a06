//! Table extraction from census HTML pages.

use crate::html::{elements, next_element, text_content, Element};
use serde::{Deserialize, Serialize};

/// One `<table>` from a census page, reduced to cell text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CensusTable {
    pub caption: String,
    /// Rows of the `<thead>`, one `Vec` per `<tr>`.
    pub headers: Vec<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

impl CensusTable {
    /// True when the caption mentions any of `keywords` (case-insensitive).
    pub fn is_population_table<S: AsRef<str>>(&self, keywords: &[S]) -> bool {
        let caption = self.caption.to_lowercase();
        keywords
            .iter()
            .any(|k| caption.contains(&k.as_ref().to_lowercase()))
    }

    /// Figure from the first "Total ..." row: its last numeric cell.
    pub fn total_persons(&self) -> Option<u64> {
        let row = self.rows.iter().find(|r| {
            r.first()
                .is_some_and(|c| c.trim().to_lowercase().starts_with("total"))
        })?;
        row.iter().rev().find_map(|c| parse_count(c))
    }
}

/// Parses a count such as `1,132,234`. Anything but digits, thousands
/// separators and surrounding whitespace yields `None`.
pub fn parse_count(cell: &str) -> Option<u64> {
    let digits: String = cell
        .trim()
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// All non-empty tables in `html`, in document order.
pub fn extract_tables(html: &str) -> Vec<CensusTable> {
    let lc = html.to_ascii_lowercase();
    elements(&lc, "table", 0, lc.len())
        .into_iter()
        .filter_map(|t| parse_table(html, &lc, t))
        .collect()
}

fn parse_table(doc: &str, lc: &str, table: Element) -> Option<CensusTable> {
    let (from, to) = (table.open_end, table.inner_end);

    let caption = next_element(lc, "caption", from, to)
        .map(|c| text_content(c.inner(doc)))
        .unwrap_or_default();

    let thead = next_element(lc, "thead", from, to);
    let headers = thead
        .map(|h| rows_in(doc, lc, h.open_end, h.inner_end))
        .unwrap_or_default();

    let bodies = elements(lc, "tbody", from, to);
    let rows = if bodies.is_empty() {
        match thead {
            Some(h) => {
                let mut rows = rows_in(doc, lc, from, h.start);
                rows.extend(rows_in(doc, lc, h.end, to));
                rows
            }
            None => rows_in(doc, lc, from, to),
        }
    } else {
        bodies
            .iter()
            .flat_map(|b| rows_in(doc, lc, b.open_end, b.inner_end))
            .collect()
    };

    if headers.is_empty() && rows.is_empty() {
        return None;
    }
    Some(CensusTable {
        caption,
        headers,
        rows,
    })
}

fn rows_in(doc: &str, lc: &str, from: usize, to: usize) -> Vec<Vec<String>> {
    elements(lc, "tr", from, to)
        .into_iter()
        .map(|tr| row_cells(doc, lc, tr.open_end, tr.inner_end))
        .collect()
}

/// `td` and `th` cells of one row, in document order.
fn row_cells(doc: &str, lc: &str, from: usize, to: usize) -> Vec<String> {
    let mut cells = Vec::new();
    let mut pos = from;
    loop {
        let td = next_element(lc, "td", pos, to);
        let th = next_element(lc, "th", pos, to);
        let cell = match (td, th) {
            (Some(a), Some(b)) => {
                if a.start < b.start {
                    a
                } else {
                    b
                }
            }
            (Some(a), None) | (None, Some(a)) => a,
            (None, None) => break,
        };
        cells.push(text_content(cell.inner(doc)));
        pos = cell.end.max(cell.open_end);
    }
    cells
}
