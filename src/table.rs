// src/table.rs
//! In-memory model of the attendance table plus the augmentation pass.
//!
//! `parse` lifts the adapter-located markup into headers + rows of plain
//! text cells. `augment` appends the margin column: one trailing cell per
//! data row and a trailing "Margin" header cell. Rows whose counters fail
//! to parse get an empty trailing cell and a log line; one ugly row must
//! not sink the table.
//!
//! The subject code → name map is a return value of the pass, not shared
//! state. Consumers that want it get it handed to them.

use std::collections::HashMap;

use crate::adapters::{self, PageAdapter};
use crate::faculty;
use crate::margin::compute_margin;
use crate::scrape::ScrapeError;

pub const MARGIN_HEADER: &str = "Margin";

/// Headers + data rows of cleaned cell text, addressable by (row, column).
#[derive(Debug, Clone)]
pub struct AttendanceTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Result of the augmentation pass. `margins` runs parallel to `rows` so
/// renderers can style negative margins; `None` marks a row we skipped.
#[derive(Debug, Clone)]
pub struct Augmented {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub margins: Vec<Option<i32>>,
    pub subjects: HashMap<String, String>,
    /// Faculty name → directory URL, for layouts with a faculty column.
    pub faculty_links: HashMap<String, String>,
}

impl Augmented {
    pub fn flagged(&self) -> usize {
        self.margins.iter().flatten().filter(|m| **m < 0).count()
    }
}

/// Parse the attendance table out of `doc` using the given adapter.
pub fn parse(doc: &str, adapter: &dyn PageAdapter) -> Result<AttendanceTable, ScrapeError> {
    let table = adapter
        .locate_table(doc)
        .ok_or(ScrapeError::MissingTarget("attendance table"))?;
    let header_row = adapter
        .header_row(table)
        .ok_or(ScrapeError::MissingTarget("header row"))?;

    let headers = adapters::row_cells(header_row);
    let rows: Vec<Vec<String>> = adapter
        .data_rows(table)
        .into_iter()
        .map(adapters::row_cells)
        .filter(|cells| !cells.is_empty())
        .collect();

    Ok(AttendanceTable { headers, rows })
}

/// Append the margin column. The header gate must pass, otherwise the
/// column indices cannot be trusted and we refuse to guess.
pub fn augment(
    table: &AttendanceTable,
    adapter: &dyn PageAdapter,
) -> Result<Augmented, ScrapeError> {
    if !adapter.header_gate(&table.headers) {
        return Err(ScrapeError::HeaderMismatch(adapter.label()));
    }
    let cols = adapter.columns();

    let mut headers = table.headers.clone();
    headers.push(s!(MARGIN_HEADER));

    let mut rows = Vec::with_capacity(table.rows.len());
    let mut margins = Vec::with_capacity(table.rows.len());
    let mut subjects: HashMap<String, String> = HashMap::new();
    let mut faculty_links: HashMap<String, String> = HashMap::new();

    for row in &table.rows {
        let mut out = row.clone();

        if let (Some(code), Some(name)) = (row.get(cols.code), row.get(cols.name)) {
            subjects.insert(subject_code(code), name.clone());
        }

        if let Some(who) = cols.faculty.and_then(|c| row.get(c)) {
            if let Some(url) = faculty::link_for(who) {
                faculty_links.insert(who.clone(), url);
            }
        }

        match row_margin(row, cols.conducted, cols.absent) {
            Ok(m) => {
                out.push(m.to_string());
                margins.push(Some(m));
            }
            Err(why) => {
                loge!("Skipping row ({why}): {:?}", row.first());
                out.push(s!());
                margins.push(None);
            }
        }
        rows.push(out);
    }

    Ok(Augmented { headers, rows, margins, subjects, faculty_links })
}

fn row_margin(row: &[String], conducted_col: usize, absent_col: usize) -> Result<i32, String> {
    let conducted = cell_u32(row, conducted_col)?;
    let absent = cell_u32(row, absent_col)?;
    compute_margin(conducted, absent).map_err(|e| e.to_string())
}

fn cell_u32(row: &[String], col: usize) -> Result<u32, String> {
    let cell = row.get(col).ok_or_else(|| format!("missing column {col}"))?;
    cell.trim()
        .parse::<u32>()
        .map_err(|_| format!("non-numeric cell {col}: {cell:?}"))
}

/// The code cell reads like "18CSC303J Regular"; the code proper is the
/// first token (the old page broke the line there).
fn subject_code(cell: &str) -> String {
    cell.split_whitespace().next().unwrap_or(cell).to_string()
}

/// Render the augmented table back to standalone HTML. Negative margins are
/// colored the way the portal overlay did it; the margin cell keeps the
/// lavender background so it is visibly ours.
pub fn render_html(aug: &Augmented) -> String {
    let mut out = s!("<table>\n<thead><tr>");
    for h in &aug.headers {
        out.push_str(&join!("<th>", h, "</th>"));
    }
    out.push_str("</tr></thead>\n<tbody>\n");

    for (row, margin) in aug.rows.iter().zip(&aug.margins) {
        out.push_str("<tr>");
        let n = row.len();
        for (i, cell) in row.iter().enumerate() {
            if i + 1 == n {
                let style = match margin {
                    Some(m) if *m < 0 => "background-color:#E6E6FA;color:red",
                    _ => "background-color:#E6E6FA",
                };
                out.push_str(&format!("<td style=\"{style}\">{cell}</td>"));
            } else if let Some(url) = aug.faculty_links.get(cell) {
                out.push_str(&format!("<td><a href=\"{url}\">{cell}</a></td>"));
            } else {
                out.push_str(&join!("<td>", cell, "</td>"));
            }
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");
    out
}
