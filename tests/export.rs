// tests/export.rs
// CSV/TSV rendering: quoting rules, the header toggle, and the output
// paths the CLI drives.

use acad_margin::cli::{render, OutFormat, Params};
use acad_margin::csv::{rows_to_string, write_row, Delim};
use acad_margin::{adapters, table};

const CARD_PAGE: &str = include_str!("fixtures/card.html");

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|s| s.to_string()).collect()
}

#[test]
fn plain_cells_pass_through_unquoted() {
    let mut buf: Vec<u8> = Vec::new();
    write_row(&mut buf, &row(&["18CSC303J", "Data Structures", "13"]), Delim::Csv.sep()).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), "18CSC303J,Data Structures,13\n");
}

#[test]
fn separator_inside_a_cell_forces_quotes() {
    let cells = row(&["18CSC303J", "Algorithms, Advanced", "13"]);

    let mut csv: Vec<u8> = Vec::new();
    write_row(&mut csv, &cells, Delim::Csv.sep()).unwrap();
    assert_eq!(
        String::from_utf8(csv).unwrap(),
        "18CSC303J,\"Algorithms, Advanced\",13\n"
    );

    // The comma is harmless under a tab separator.
    let mut tsv: Vec<u8> = Vec::new();
    write_row(&mut tsv, &cells, Delim::Tsv.sep()).unwrap();
    assert_eq!(
        String::from_utf8(tsv).unwrap(),
        "18CSC303J\tAlgorithms, Advanced\t13\n"
    );
}

#[test]
fn embedded_quotes_are_doubled() {
    let mut buf: Vec<u8> = Vec::new();
    write_row(&mut buf, &row(&["a", "say \"when\"", "b"]), Delim::Csv.sep()).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), "a,\"say \"\"when\"\"\",b\n");
}

#[test]
fn rows_to_string_honors_the_header_toggle() {
    let rows = vec![row(&["x", "1"]), row(&["y", "2"])];
    let headers = Some(row(&["name", "margin"]));

    let with = rows_to_string(&rows, &headers, Delim::Csv.sep());
    assert_eq!(with, "name,margin\nx,1\ny,2\n");

    let without = rows_to_string(&rows, &None, Delim::Csv.sep());
    assert_eq!(without, "x,1\ny,2\n");
}

#[test]
fn csv_export_of_a_card_page_carries_the_margin_column() {
    let adapter = adapters::detect(CARD_PAGE).unwrap();
    let parsed = table::parse(CARD_PAGE, adapter).unwrap();
    let aug = table::augment(&parsed, adapter).unwrap();

    let params = Params::new();
    let out = render(&params, &aug);
    let mut lines = out.lines();
    assert!(lines.next().unwrap().ends_with(",Margin"));
    assert_eq!(out.lines().count(), aug.rows.len() + 1);

    let mut bare = Params::new();
    bare.include_headers = false;
    bare.format = OutFormat::Tsv;
    let out = render(&bare, &aug);
    assert_eq!(out.lines().count(), aug.rows.len());
    assert!(out.lines().next().unwrap().contains('\t'));
}

#[test]
fn subjects_listing_is_sorted_code_name_pairs() {
    let adapter = adapters::detect(CARD_PAGE).unwrap();
    let parsed = table::parse(CARD_PAGE, adapter).unwrap();
    let aug = table::augment(&parsed, adapter).unwrap();

    let mut params = Params::new();
    params.subjects = true;
    let out = render(&params, &aug);

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        vec![
            "18CSC303J,Data Structures",
            "18LEM101T,Ethics",
            "18MAB301T,Probability And Statistics",
            "18PDH101T,Soft Skills",
        ]
    );
}
