//! Atlassian Document Format (ADF) serialization.
//!
//! Each model node maps to exactly one ADF shape; the transform keeps
//! order and performs no parsing of its own.

use serde::{Deserialize, Serialize};

use crate::model::{ContentNode, Document, Heading, Mark, Paragraph, Table, TextRun};

/// ADF schema version emitted in the document root.
pub const ADF_VERSION: u32 = 1;

/// Root of an ADF document: `{content, type: "doc", version: 1}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdfDocument {
    /// Top-level block nodes
    pub content: Vec<AdfNode>,

    /// Always `"doc"`
    #[serde(rename = "type")]
    pub kind: String,

    /// Schema version
    pub version: u32,
}

impl AdfDocument {
    /// Create an ADF document from block nodes.
    pub fn new(content: Vec<AdfNode>) -> Self {
        Self {
            content,
            kind: "doc".to_string(),
            version: ADF_VERSION,
        }
    }
}

/// An ADF node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AdfNode {
    /// `heading` with `attrs.level`
    Heading {
        attrs: HeadingAttrs,
        content: Vec<AdfNode>,
    },

    /// `paragraph`
    Paragraph { content: Vec<AdfNode> },

    /// `table`; the first row is the header row
    Table {
        attrs: TableAttrs,
        content: Vec<AdfNode>,
    },

    /// `tableRow`
    TableRow { content: Vec<AdfNode> },

    /// `tableHeader`
    TableHeader {
        attrs: CellAttrs,
        content: Vec<AdfNode>,
    },

    /// `tableCell`
    TableCell {
        attrs: CellAttrs,
        content: Vec<AdfNode>,
    },

    /// `text` with marks
    Text { text: String, marks: Vec<AdfMark> },
}

/// Heading attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingAttrs {
    pub level: u8,
}

/// Table attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableAttrs {
    pub is_number_column_enabled: bool,
    pub layout: String,
}

impl Default for TableAttrs {
    fn default() -> Self {
        Self {
            is_number_column_enabled: false,
            layout: "default".to_string(),
        }
    }
}

/// Table cell attributes (always empty).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellAttrs {}

/// An ADF mark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AdfMark {
    /// `strong`
    Strong,

    /// `link` with `attrs.href` and `attrs.title`
    Link { attrs: LinkAttrs },
}

/// Link attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkAttrs {
    pub href: String,
    pub title: String,
}

/// Convert a document to ADF.
pub fn to_adf(doc: &Document) -> AdfDocument {
    AdfDocument::new(doc.content.iter().map(node_to_adf).collect())
}

fn node_to_adf(node: &ContentNode) -> AdfNode {
    match node {
        ContentNode::Heading(h) => heading_to_adf(h),
        ContentNode::Paragraph(p) => paragraph_to_adf(p),
        ContentNode::Table(t) => table_to_adf(t),
    }
}

fn heading_to_adf(heading: &Heading) -> AdfNode {
    AdfNode::Heading {
        attrs: HeadingAttrs {
            level: heading.level,
        },
        content: runs_to_adf(std::slice::from_ref(&heading.run)),
    }
}

fn paragraph_to_adf(paragraph: &Paragraph) -> AdfNode {
    AdfNode::Paragraph {
        content: runs_to_adf(&paragraph.runs),
    }
}

fn table_to_adf(table: &Table) -> AdfNode {
    let header_row = AdfNode::TableRow {
        content: table
            .headers
            .iter()
            .map(|label| AdfNode::TableHeader {
                attrs: CellAttrs::default(),
                content: vec![paragraph_to_adf(&header_paragraph(label))],
            })
            .collect(),
    };

    let data_rows = table.rows.iter().map(|row| AdfNode::TableRow {
        content: row
            .cells
            .iter()
            .map(|cell| AdfNode::TableCell {
                attrs: CellAttrs::default(),
                content: vec![paragraph_to_adf(&cell.content)],
            })
            .collect(),
    });

    AdfNode::Table {
        attrs: TableAttrs::default(),
        content: std::iter::once(header_row).chain(data_rows).collect(),
    }
}

fn header_paragraph(label: &str) -> Paragraph {
    if label.is_empty() {
        Paragraph::new()
    } else {
        Paragraph::from_runs(vec![TextRun::strong(label)])
    }
}

// ADF rejects empty text nodes.
fn runs_to_adf(runs: &[TextRun]) -> Vec<AdfNode> {
    runs.iter()
        .filter(|run| !run.is_empty())
        .map(run_to_adf)
        .collect()
}

fn run_to_adf(run: &TextRun) -> AdfNode {
    AdfNode::Text {
        text: run.text.clone(),
        marks: run.marks.iter().map(mark_to_adf).collect(),
    }
}

fn mark_to_adf(mark: &Mark) -> AdfMark {
    match mark {
        Mark::Strong => AdfMark::Strong,
        Mark::Link { href, title } => AdfMark::Link {
            attrs: LinkAttrs {
                href: href.clone(),
                title: title.clone(),
            },
        },
    }
}
