// src/adapters/legacy.rs
//! Adapter for the old plain-table attendance page.
//!
//! The table is recognizable only by its background color attribute
//! (`<table bgcolor="#FAFAD2">`). The first body row is the header, the
//! counters sit in columns 5 (conducted) and 6 (absent). No header gate:
//! this layout never moved its columns while it was live.

use crate::core::html;
use super::{tr_blocks, Columns, PageAdapter};

const MARKER: &str = "#fafad2";

pub struct LegacyLayout;

impl PageAdapter for LegacyLayout {
    fn label(&self) -> &'static str {
        "legacy"
    }

    fn probe(&self, doc: &str) -> bool {
        html::to_lowercase_fast(doc).contains(MARKER)
    }

    fn locate_table<'a>(&self, doc: &'a str) -> Option<&'a str> {
        // Walk table blocks until one whose opening tag carries the marker.
        let mut pos = 0usize;
        while let Some((s, e)) = html::next_tag_block_ci(doc, "<table", "</table>", pos) {
            let block = &doc[s..e];
            if html::open_tag_contains_ci(block, MARKER) {
                return Some(block);
            }
            pos = e;
        }
        None
    }

    fn header_row<'a>(&self, table: &'a str) -> Option<&'a str> {
        let (s, e) = html::next_tag_block_ci(table, "<tr", "</tr>", 0)?;
        Some(&table[s..e])
    }

    fn data_rows<'a>(&self, table: &'a str) -> Vec<&'a str> {
        tr_blocks(table).into_iter().skip(1).collect()
    }

    fn columns(&self) -> Columns {
        Columns { code: 0, name: 1, conducted: 5, absent: 6, faculty: Some(4) }
    }
}
