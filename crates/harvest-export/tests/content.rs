use harvest_export::ExportError;
use harvest_export::content::{BlockSink, ContentBlock, render_content, split_blocks};
use pretty_assertions::assert_eq;

#[derive(Default)]
struct Recorder {
    events: Vec<String>,
    fail_tables: bool,
}

impl BlockSink for Recorder {
    fn prose(&mut self, text: &str) -> Result<(), ExportError> {
        self.events.push(format!("prose:{text}"));
        Ok(())
    }

    fn table(&mut self, markdown: &str) -> Result<(), ExportError> {
        if self.fail_tables {
            return Err(ExportError::MalformedTable {
                reason: "Insufficient rows".to_string(),
                markdown: markdown.to_string(),
            });
        }
        self.events.push(format!("table:{markdown}"));
        Ok(())
    }
}

#[test]
fn prose_table_prose_keeps_order() {
    let body = "Summary line.\n\n| A | B |\n|---|---|\n| 1 | 2 |\n\nMore text.";
    assert_eq!(
        split_blocks(body),
        vec![
            ContentBlock::Prose("Summary line.".to_string()),
            ContentBlock::Table("| A | B |\n|---|---|\n| 1 | 2 |".to_string()),
            ContentBlock::Prose("More text.".to_string()),
        ]
    );
}

#[test]
fn table_lines_are_trimmed() {
    let body = "   | A | B |\n  |---|---|  \n\t| 1 | 2 |";
    assert_eq!(
        split_blocks(body),
        vec![ContentBlock::Table("| A | B |\n|---|---|\n| 1 | 2 |".to_string())]
    );
}

#[test]
fn multi_line_prose_is_one_block() {
    let body = "First line.\nSecond line.\n\nThird after blank.";
    assert_eq!(
        split_blocks(body),
        vec![ContentBlock::Prose(
            "First line.\nSecond line.\n\nThird after blank.".to_string()
        )]
    );
}

#[test]
fn body_without_tables_is_single_prose_block() {
    assert_eq!(
        split_blocks("  Just words.  "),
        vec![ContentBlock::Prose("Just words.".to_string())]
    );
}

#[test]
fn empty_and_blank_bodies_produce_nothing() {
    assert!(split_blocks("").is_empty());
    assert!(split_blocks(" \n\n\t").is_empty());
}

#[test]
fn adjacent_tables_separated_by_prose() {
    let body = "A|B\n---|---\n1|2\nbetween\nC|D\n---|---\n3|4";
    let blocks = split_blocks(body);
    assert_eq!(blocks.len(), 3);
    assert!(matches!(blocks[0], ContentBlock::Table(_)));
    assert_eq!(blocks[1], ContentBlock::Prose("between".to_string()));
    assert!(matches!(blocks[2], ContentBlock::Table(_)));
}

#[test]
fn render_content_dispatches_in_order() {
    let mut sink = Recorder::default();
    render_content(&mut sink, "Intro\nA|B\n---|---\n1|2\nOutro").unwrap();
    assert_eq!(
        sink.events,
        vec![
            "prose:Intro".to_string(),
            "table:A|B\n---|---\n1|2".to_string(),
            "prose:Outro".to_string(),
        ]
    );
}

#[test]
fn render_content_stops_at_first_error() {
    let mut sink = Recorder {
        fail_tables: true,
        ..Recorder::default()
    };
    let err = render_content(&mut sink, "Intro\nA|B\nOutro").unwrap_err();
    assert!(matches!(err, ExportError::MalformedTable { .. }));
    assert_eq!(sink.events, vec!["prose:Intro".to_string()]);
}
