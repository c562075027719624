use harvest_export::ExportError;
use harvest_export::table::{TableGrid, parse_markdown_table};
use pretty_assertions::assert_eq;

fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(|c| c.to_string()).collect())
        .collect()
}

#[test]
fn parses_piped_table_with_edge_cells() {
    let parsed = parse_markdown_table("| A | B |\n|---|---|\n| 1 | 2 |").unwrap();
    assert_eq!(
        parsed.rows(),
        grid(&[&["", "A", "B", ""], &["", "1", "2", ""]]).as_slice()
    );
}

#[test]
fn cleanup_removes_pipe_edge_columns() {
    let parsed = parse_markdown_table("| A | B |\n|---|---|\n| 1 | 2 |").unwrap();
    assert_eq!(
        parsed.without_blank_columns().into_rows(),
        grid(&[&["A", "B"], &["1", "2"]])
    );
}

#[test]
fn ragged_rows_are_padded_not_truncated() {
    let parsed = parse_markdown_table("A|B\n--|--\n1|\n|2").unwrap();
    assert_eq!(
        parsed.into_rows(),
        grid(&[&["A", "B"], &["1", ""], &["", "2"]])
    );
}

#[test]
fn widest_data_row_sets_column_count() {
    let parsed = parse_markdown_table("A|B\n---|---\n1|2|3|4\n5").unwrap();
    assert_eq!(parsed.column_count(), 4);
    assert_eq!(parsed.rows()[0], vec!["A", "B", "", ""]);
    assert_eq!(parsed.rows()[1], vec!["1", "2", "3", "4"]);
    assert_eq!(parsed.rows()[2], vec!["5", "", "", ""]);
}

#[test]
fn header_plus_data_rows_are_kept() {
    let markdown = "H1|H2\n---|---\na|b\nc|d\ne|f";
    let parsed = parse_markdown_table(markdown).unwrap();
    assert_eq!(parsed.row_count(), 4);
    assert_eq!(parsed.header().unwrap(), ["H1", "H2"]);
    assert_eq!(parsed.body().len(), 3);
}

#[test]
fn blank_lines_are_ignored() {
    let parsed = parse_markdown_table("\nA|B\n\n---|---\n  \n1|2\n").unwrap();
    assert_eq!(parsed.row_count(), 2);
}

#[test]
fn fewer_than_three_lines_is_malformed() {
    for markdown in ["", "A|B", "A|B\n---|---"] {
        let err = parse_markdown_table(markdown).unwrap_err();
        match err {
            ExportError::MalformedTable { reason, .. } => assert_eq!(reason, "Insufficient rows"),
            other => panic!("unexpected error: {other}"),
        }
    }
}

#[test]
fn separator_must_be_dashes_only() {
    for markdown in [
        "A|B\n:---|---\n1|2",
        "A|B\n---|--:\n1|2",
        "A|B\nabc|---\n1|2",
        "A|B\n1|2\n3|4",
    ] {
        let err = parse_markdown_table(markdown).unwrap_err();
        match err {
            ExportError::MalformedTable { reason, markdown: echoed } => {
                assert_eq!(reason, "Separator row must contain only '---'");
                assert_eq!(echoed, markdown);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

#[test]
fn malformed_error_message_carries_reason_and_markdown() {
    let err = parse_markdown_table("A|B").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Insufficient rows"), "{message}");
    assert!(message.contains("A|B"), "{message}");
}

#[test]
fn cleanup_keeps_column_with_only_a_header() {
    let parsed = TableGrid::from_rows(grid(&[&["A", "Notes"], &["1", ""], &["2", " "]]));
    assert_eq!(parsed.without_blank_columns(), parsed);
}

#[test]
fn cleanup_drops_interior_blank_column() {
    let parsed = TableGrid::from_rows(grid(&[&["A", "", "C"], &["1", " ", "3"]]));
    assert_eq!(
        parsed.without_blank_columns().into_rows(),
        grid(&[&["A", "C"], &["1", "3"]])
    );
}

#[test]
fn cleanup_of_all_blank_grid_returns_it_unchanged() {
    let parsed = TableGrid::from_rows(grid(&[&["", ""], &[" ", ""]]));
    assert_eq!(parsed.without_blank_columns(), parsed);
}

#[test]
fn cleanup_is_idempotent() {
    let parsed = parse_markdown_table("| A | | C |\n|---|---|---|\n| 1 | | 3 |").unwrap();
    let once = parsed.without_blank_columns();
    let twice = once.without_blank_columns();
    assert_eq!(once, twice);
    assert_eq!(once.into_rows(), grid(&[&["A", "C"], &["1", "3"]]));
}

#[test]
fn column_widths_count_characters() {
    let parsed = TableGrid::from_rows(grid(&[&["Ticker", "Loss"], &["AAPL", "-1,250.00"]]));
    assert_eq!(parsed.column_char_widths(), vec![6, 9]);
}
