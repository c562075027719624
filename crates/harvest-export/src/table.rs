//! Restricted markdown table grammar.
//!
//! A table block is a header row, a separator row whose cells are empty or
//! made only of dashes, and one or more data rows. Cells are separated by `|`;
//! leading and trailing pipes produce empty edge cells, which column cleanup
//! removes later.

use crate::error::ExportError;

pub const TABLE_DELIMITER: char = '|';

/// Rectangular grid of cell strings. The first row is the header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableGrid {
    rows: Vec<Vec<String>>,
}

impl TableGrid {
    /// Build a grid, right-padding short rows with empty cells.
    pub fn from_rows(mut rows: Vec<Vec<String>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, String::new());
        }
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }

    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Data rows, header excluded.
    pub fn body(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.column_count() == 0
    }

    /// Widest cell of each column, in characters.
    pub fn column_char_widths(&self) -> Vec<usize> {
        (0..self.column_count())
            .map(|col| {
                self.rows
                    .iter()
                    .map(|row| row[col].chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Drop every column that is blank in all rows, header included.
    ///
    /// When that would leave no columns at all the grid is returned
    /// unchanged, so a table never collapses to nothing.
    pub fn without_blank_columns(&self) -> TableGrid {
        let keep: Vec<usize> = (0..self.column_count())
            .filter(|&col| self.rows.iter().any(|row| !row[col].trim().is_empty()))
            .collect();

        if keep.is_empty() {
            return self.clone();
        }

        let rows = self
            .rows
            .iter()
            .map(|row| keep.iter().map(|&col| row[col].clone()).collect())
            .collect();
        TableGrid { rows }
    }
}

/// Parse one table block into a grid.
///
/// Fails with [`ExportError::MalformedTable`] when fewer than three non-blank
/// lines are present or when a separator cell is neither empty nor all
/// dashes. Rows shorter than the widest header or data row are padded; no
/// row is ever truncated.
pub fn parse_markdown_table(markdown: &str) -> Result<TableGrid, ExportError> {
    let lines: Vec<&str> = markdown
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.len() < 3 {
        return Err(malformed("Insufficient rows", markdown));
    }

    let separator = split_cells(lines[1]);
    if !separator.iter().all(|cell| is_separator_cell(cell)) {
        return Err(malformed(
            "Separator row must contain only '---'",
            markdown,
        ));
    }

    let mut rows = Vec::with_capacity(lines.len() - 1);
    rows.push(split_cells(lines[0]));
    rows.extend(lines[2..].iter().map(|line| split_cells(line)));

    let grid = TableGrid::from_rows(rows);
    tracing::debug!(
        rows = grid.row_count(),
        columns = grid.column_count(),
        "markdown table parsed"
    );
    Ok(grid)
}

fn split_cells(line: &str) -> Vec<String> {
    line.split(TABLE_DELIMITER)
        .map(|cell| cell.trim().to_string())
        .collect()
}

fn is_separator_cell(cell: &str) -> bool {
    cell.chars().all(|c| c == '-')
}

fn malformed(reason: &str, markdown: &str) -> ExportError {
    tracing::error!(reason, "error parsing markdown table");
    ExportError::MalformedTable {
        reason: reason.to_string(),
        markdown: markdown.to_string(),
    }
}
