//! Block-level content nodes.

use super::{Paragraph, Table, TextRun};
use serde::{Deserialize, Serialize};

/// A structural block in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentNode {
    /// A heading (levels 1-3)
    Heading(Heading),

    /// A paragraph of text runs
    Paragraph(Paragraph),

    /// A table
    Table(Table),
}

impl ContentNode {
    /// Create a heading node.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        ContentNode::Heading(Heading::new(level, text))
    }

    /// Check if this node is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, ContentNode::Heading(_))
    }

    /// Check if this node is a paragraph.
    pub fn is_paragraph(&self) -> bool {
        matches!(self, ContentNode::Paragraph(_))
    }

    /// Check if this node is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, ContentNode::Table(_))
    }

    /// Get plain text content of the node.
    pub fn plain_text(&self) -> String {
        match self {
            ContentNode::Heading(h) => h.run.text.clone(),
            ContentNode::Paragraph(p) => p.plain_text(),
            ContentNode::Table(t) => t.plain_text(),
        }
    }
}

impl From<Paragraph> for ContentNode {
    fn from(p: Paragraph) -> Self {
        ContentNode::Paragraph(p)
    }
}

impl From<Table> for ContentNode {
    fn from(t: Table) -> Self {
        ContentNode::Table(t)
    }
}

/// A heading with a single unmarked run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading level (1-3)
    pub level: u8,

    /// Heading text
    pub run: TextRun,
}

impl Heading {
    /// Create a heading, clamping the level to 1-3.
    pub fn new(level: u8, text: impl Into<String>) -> Self {
        Self {
            level: level.clamp(1, 3),
            run: TextRun::new(text),
        }
    }

    /// Get the heading text.
    pub fn text(&self) -> &str {
        &self.run.text
    }
}
