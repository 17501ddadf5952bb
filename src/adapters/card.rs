// src/adapters/card.rs
//! Adapter for the current card-based attendance page.
//!
//! Markup shape (much omitted):
//! ```text
//! <div id="divMainDetails"> ... <div class="card mb-4"> ...
//!   <table> <thead><tr><th>Code</th>...<th>Max. hours</th>...</tr></thead>
//!           <tbody><tr>...</tr>...</tbody> </table>
//! ```
//! Counters: conducted in column 2 ("Max. hours"), absent in column 4.
//! The header gate checks column 2 really says "Max. hours" before we
//! trust those indices; the portal has shuffled columns before.

use crate::core::html;
use super::{tr_blocks, Columns, PageAdapter};

const MARKER: &str = "divmaindetails";
const CONDUCTED_HEADER: &str = "Max. hours";

pub struct CardLayout;

impl PageAdapter for CardLayout {
    fn label(&self) -> &'static str {
        "card"
    }

    fn probe(&self, doc: &str) -> bool {
        html::to_lowercase_fast(doc).contains(MARKER)
    }

    fn locate_table<'a>(&self, doc: &'a str) -> Option<&'a str> {
        // First <table> after the main-details container.
        let at = html::to_lowercase_fast(doc).find(MARKER)?;
        let (s, e) = html::next_tag_block_ci(doc, "<table", "</table>", at)?;
        Some(&doc[s..e])
    }

    fn header_row<'a>(&self, table: &'a str) -> Option<&'a str> {
        let (s, e) = html::next_tag_block_ci(table, "<thead", "</thead>", 0)?;
        let thead = &table[s..e];
        let (rs, re) = html::next_tag_block_ci(thead, "<tr", "</tr>", 0)?;
        Some(&thead[rs..re])
    }

    fn data_rows<'a>(&self, table: &'a str) -> Vec<&'a str> {
        match html::next_tag_block_ci(table, "<tbody", "</tbody>", 0) {
            Some((s, e)) => tr_blocks(&table[s..e]),
            // No tbody: everything after the thead's row.
            None => tr_blocks(table).into_iter().skip(1).collect(),
        }
    }

    fn columns(&self) -> Columns {
        Columns { code: 0, name: 1, conducted: 2, absent: 4, faculty: None }
    }

    fn header_gate(&self, headers: &[String]) -> bool {
        headers
            .get(self.columns().conducted)
            .is_some_and(|h| h.as_str() == CONDUCTED_HEADER)
    }
}
