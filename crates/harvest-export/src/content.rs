//! Splitting section bodies into prose and table blocks.

use crate::error::ExportError;
use crate::table::TABLE_DELIMITER;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    /// Paragraph text, trimmed, with its inner line breaks kept.
    Prose(String),
    /// Raw table markup, one trimmed line per row.
    Table(String),
}

/// Receives the blocks of a section body in order.
pub trait BlockSink {
    fn prose(&mut self, text: &str) -> Result<(), ExportError>;
    fn table(&mut self, markdown: &str) -> Result<(), ExportError>;
}

pub fn is_table_line(line: &str) -> bool {
    line.contains(TABLE_DELIMITER)
}

/// Scan `body` line by line and cut it wherever a line switches between
/// table and prose. Block order follows the input exactly; empty prose
/// blocks are dropped.
pub fn split_blocks(body: &str) -> Vec<ContentBlock> {
    let mut blocks = Vec::new();
    let mut buffer: Vec<&str> = Vec::new();
    let mut in_table = false;

    for line in body.trim().lines() {
        let table_line = is_table_line(line);
        if table_line != in_table {
            flush(&mut blocks, &mut buffer, in_table);
            in_table = table_line;
        }
        buffer.push(if table_line { line.trim() } else { line });
    }
    flush(&mut blocks, &mut buffer, in_table);

    blocks
}

fn flush(blocks: &mut Vec<ContentBlock>, buffer: &mut Vec<&str>, in_table: bool) {
    if buffer.is_empty() {
        return;
    }
    let joined = buffer.join("\n");
    buffer.clear();

    if in_table {
        blocks.push(ContentBlock::Table(joined));
    } else {
        let text = joined.trim();
        if !text.is_empty() {
            blocks.push(ContentBlock::Prose(text.to_string()));
        }
    }
}

/// Dispatch every block of `body` to `sink`, stopping at the first error.
pub fn render_content<S: BlockSink + ?Sized>(sink: &mut S, body: &str) -> Result<(), ExportError> {
    for block in split_blocks(body) {
        match block {
            ContentBlock::Prose(text) => sink.prose(&text)?,
            ContentBlock::Table(markdown) => sink.table(&markdown)?,
        }
    }
    Ok(())
}
