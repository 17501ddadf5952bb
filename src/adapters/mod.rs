// src/adapters/mod.rs
//! Page adapters: one per portal layout.
//!
//! The portal has served the attendance page in two markups over the years
//! (an old plain-table layout and the current card-based one). Everything
//! layout-specific lives behind `PageAdapter`: where the table sits in the
//! document, which row is the header, and which columns hold the counters.
//! The rest of the pipeline only sees rows and column indices.
//!
//! Adapters only read the page. Margin math, output shaping and telemetry
//! live elsewhere.

use crate::core::html;

pub mod card;
pub mod legacy;

/// Column indices into a data row, per layout.
#[derive(Clone, Copy)]
pub struct Columns {
    pub code: usize,
    pub name: usize,
    pub conducted: usize,
    pub absent: usize,
    /// Faculty name column, where the layout has one.
    pub faculty: Option<usize>,
}

pub trait PageAdapter: Sync {
    fn label(&self) -> &'static str;

    /// Cheap probe: does this document look like this layout?
    fn probe(&self, doc: &str) -> bool;

    /// Slice the attendance table block out of the full document.
    fn locate_table<'a>(&self, doc: &'a str) -> Option<&'a str>;

    /// The header row block within the table.
    fn header_row<'a>(&self, table: &'a str) -> Option<&'a str>;

    /// Data row blocks, header excluded.
    fn data_rows<'a>(&self, table: &'a str) -> Vec<&'a str>;

    fn columns(&self) -> Columns;

    /// Gate before augmenting: the header must be the one we expect,
    /// otherwise the column indices cannot be trusted.
    fn header_gate(&self, _headers: &[String]) -> bool {
        true
    }
}

/// Pick the adapter for a document by probing markup, preferring the
/// current layout. None → unknown page, caller skips augmentation.
pub fn detect(doc: &str) -> Option<&'static dyn PageAdapter> {
    for a in ADAPTERS {
        if a.probe(doc) {
            return Some(*a);
        }
    }
    None
}

static ADAPTERS: &[&(dyn PageAdapter)] = &[&card::CardLayout, &legacy::LegacyLayout];

/// All `<tr>` blocks within `scope`, in document order.
pub(crate) fn tr_blocks(scope: &str) -> Vec<&str> {
    let mut rows = Vec::new();
    let mut pos = 0usize;
    while let Some((s, e)) = html::next_tag_block_ci(scope, "<tr", "</tr>", pos) {
        rows.push(&scope[s..e]);
        pos = e;
    }
    rows
}

/// Cell texts of one `<tr>` block (both `<th>` and `<td>`, document order,
/// tags stripped). The legacy layout marks header cells up as plain `<td>`,
/// the card layout uses `<th>`; reading both keeps one code path.
pub(crate) fn row_cells(tr: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut pos = 0usize;
    loop {
        let td = html::next_tag_block_ci(tr, "<td", "</td>", pos);
        let th = html::next_tag_block_ci(tr, "<th", "</th>", pos);
        let (s, e) = match (td, th) {
            (Some(a), Some(b)) => {
                if a.0 < b.0 { a } else { b }
            }
            (Some(a), None) => a,
            (None, Some(b)) => b,
            (None, None) => break,
        };
        cells.push(html::cell_text(&tr[s..e]));
        pos = e;
    }
    cells
}
