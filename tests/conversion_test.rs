//! Integration tests for Markdown conversion.

use prbridge::{
    parse, parse_with_options, ContentNode, Converter, Mark, ParseOptions, Paragraph,
    ResolvedAttachment, TextRun,
};

fn texts(paragraph: &Paragraph) -> Vec<&str> {
    paragraph.runs.iter().map(|r| r.text.as_str()).collect()
}

#[test]
fn test_end_to_end_example() {
    let body = "## Summary\n\
                Fixes **bug** in https://example.com/issue see also.\n\
                | A | B |\n\
                | --- | --- |\n\
                | 1 | 2 |\n";

    let doc = parse(body).unwrap().document;
    assert_eq!(doc.node_count(), 3);
    assert_eq!(doc.content[0], ContentNode::heading(2, "Summary"));

    let ContentNode::Paragraph(paragraph) = &doc.content[1] else {
        panic!("expected paragraph, got {:?}", doc.content[1]);
    };
    assert_eq!(
        paragraph.runs,
        vec![
            TextRun::new("Fixes "),
            TextRun::strong("bug"),
            TextRun::new(" in "),
            TextRun::link("https://example.com/issue"),
            TextRun::new(" see also."),
        ]
    );

    let ContentNode::Table(table) = &doc.content[2] else {
        panic!("expected table, got {:?}", doc.content[2]);
    };
    assert_eq!(table.headers, vec!["A", "B"]);
    assert_eq!(table.row_count(), 1);
    assert_eq!(texts(&table.rows[0].cells[0].content), vec!["1"]);
    assert_eq!(texts(&table.rows[0].cells[1].content), vec!["2"]);
}

#[test]
fn test_plain_lines_become_paragraphs() {
    for line in ["plain", "#tag", "####### deep", "  # indented"] {
        let doc = parse(line).unwrap().document;
        assert!(doc.content[0].is_paragraph(), "{:?} should be a paragraph", line);
    }

    let doc = parse("### Deploy notes").unwrap().document;
    assert_eq!(doc.content[0], ContentNode::heading(3, "Deploy notes"));
}

#[test]
fn test_rows_normalized_to_header_width() {
    let body = "| A | B | C |\n|---|---|---|\n| 1 |\n| 1 | 2 | 3 | 4 |\n| 1 | 2 | 3 |";
    let doc = parse(body).unwrap().document;

    let ContentNode::Table(table) = &doc.content[0] else {
        panic!("expected table");
    };
    assert_eq!(table.row_count(), 3);
    assert!(table.rows.iter().all(|row| row.cells.len() == 3));
    assert!(table.rows[0].cells[2].is_empty());
}

#[test]
fn test_header_only_table() {
    let doc = parse("| A | B |\n| --- | --- |").unwrap().document;
    let ContentNode::Table(table) = &doc.content[0] else {
        panic!("expected table");
    };
    assert_eq!(table.column_count(), 2);
    assert_eq!(table.row_count(), 0);
}

#[test]
fn test_at_most_one_link_per_run() {
    let body = "**https://example.com/x** and https://a.example https://b.example\n\
                | Link |\n| --- |\n| **see https://example.com** |";
    let doc = parse(body).unwrap().document;

    for paragraph in doc.paragraphs() {
        for run in &paragraph.runs {
            let links = run.marks.iter().filter(|m| m.is_link()).count();
            assert!(links <= 1);
            if run.is_strong() {
                assert_eq!(links, 0, "bold run {:?} carries a link", run.text);
            }
        }
    }

    let first = doc.paragraphs().next().unwrap();
    assert_eq!(first.runs[0], TextRun::strong("https://example.com/x"));
}

#[test]
fn test_placeholder_names_are_sequential() {
    let body: String = (1..=12)
        .map(|i| format!("![shot](https://github.com/user-attachments/assets/{})\n", i))
        .collect();

    let output = parse_with_options(&body, ParseOptions::default().with_placeholders()).unwrap();
    assert_eq!(output.attachments.len(), 12);
    for (i, attachment) in output.attachments.iter().enumerate() {
        assert_eq!(attachment.name, format!("image_{:03}", i + 1));
        assert_eq!(
            attachment.url,
            format!("https://github.com/user-attachments/assets/{}", i + 1)
        );
    }
}

#[test]
fn test_link_mode_keeps_attachment_urls() {
    let output = parse("![shot](https://github.com/user-attachments/assets/abc)").unwrap();
    assert!(output.attachments.is_empty());
    assert_eq!(
        output.document.content[0],
        ContentNode::Paragraph(Paragraph::from_runs(vec![TextRun::link(
            "https://github.com/user-attachments/assets/abc"
        )]))
    );
}

#[test]
fn test_cutoff_marker() {
    let body = "one\ntwo\n## Checklist\nthree";
    let doc = parse(body).unwrap().document;
    assert_eq!(doc.plain_text(), "one\n\ntwo");

    let doc = parse("one\ntwo\nthree").unwrap().document;
    assert_eq!(doc.node_count(), 3);

    let output = Converter::new().without_cutoff().parse(body).unwrap();
    assert_eq!(output.document.node_count(), 4);
}

#[test]
fn test_resolution_round_trip() {
    let body = "Before\n\
                ![](https://github.com/user-attachments/assets/a)\n\
                | Shot |\n| --- |\n| https://github.com/user-attachments/assets/b |";
    let conversion = Converter::new().with_placeholders().parse(body).unwrap();
    assert_eq!(conversion.unresolved(), vec!["image_001", "image_002"]);

    let resolved = conversion.resolve(&[
        ResolvedAttachment::new("image_001", "https://jira.example.com/a"),
        ResolvedAttachment::new("image_002", "https://jira.example.com/b"),
    ]);
    assert!(resolved.unresolved().is_empty());

    let hrefs: Vec<&str> = resolved
        .document
        .paragraphs()
        .flat_map(|p| p.runs.iter())
        .flat_map(|r| r.marks.iter())
        .filter_map(|m| match m {
            Mark::Link { href, .. } => Some(href.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(hrefs, vec!["https://jira.example.com/a", "https://jira.example.com/b"]);
}

#[test]
fn test_cutoff_at_deeper_checklist_heading() {
    let doc = parse("Summary\n### Checklist\n- [ ] secret").unwrap().document;
    assert_eq!(doc.node_count(), 1);
    assert_eq!(doc.plain_text(), "Summary");
}

#[test]
fn test_heading_and_header_images_never_left_as_placeholders() {
    let body = "## ![x](https://github.com/user-attachments/assets/a)\n\
                | ![y](https://github.com/user-attachments/assets/b) |\n\
                | --- |\n\
                | ![z](https://github.com/user-attachments/assets/c) |";
    let conversion = Converter::new().with_placeholders().parse(body).unwrap();

    assert_eq!(conversion.attachments.len(), 1);
    assert_eq!(
        conversion.attachments[0].url,
        "https://github.com/user-attachments/assets/c"
    );

    let resolved = conversion.resolve(&[ResolvedAttachment::new(
        "image_001",
        "https://jira.example.com/c",
    )]);
    assert!(resolved.unresolved().is_empty());
    assert_eq!(
        resolved.document.content[0],
        ContentNode::heading(2, "https://github.com/user-attachments/assets/a")
    );
    let ContentNode::Table(table) = &resolved.document.content[1] else {
        panic!("expected a table");
    };
    assert_eq!(table.headers, vec!["https://github.com/user-attachments/assets/b"]);
}
