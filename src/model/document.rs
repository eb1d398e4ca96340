//! Document-level types.

use super::{ContentNode, Paragraph, Table};
use serde::{Deserialize, Serialize};

/// A parsed comment document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Content blocks in source order
    pub content: Vec<ContentNode>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            content: Vec::new(),
        }
    }

    /// Add a block to the document.
    pub fn add_node(&mut self, node: ContentNode) {
        self.content.push(node);
    }

    /// Add a paragraph to the document.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.content.push(ContentNode::Paragraph(paragraph));
    }

    /// Add a table to the document.
    pub fn add_table(&mut self, table: Table) {
        self.content.push(ContentNode::Table(table));
    }

    /// Get the number of blocks.
    pub fn node_count(&self) -> usize {
        self.content.len()
    }

    /// Check if the document has any blocks.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Iterate over every paragraph, including table cells.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.content.iter().flat_map(node_paragraphs)
    }

    /// Mutably visit every paragraph, including table cells.
    pub fn for_each_paragraph_mut(&mut self, mut f: impl FnMut(&mut Paragraph)) {
        for node in &mut self.content {
            match node {
                ContentNode::Paragraph(p) => f(p),
                ContentNode::Table(t) => {
                    for cell in t.rows.iter_mut().flat_map(|r| r.cells.iter_mut()) {
                        f(&mut cell.content);
                    }
                }
                ContentNode::Heading(_) => {}
            }
        }
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .map(|node| node.plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

fn node_paragraphs(node: &ContentNode) -> Box<dyn Iterator<Item = &Paragraph> + '_> {
    match node {
        ContentNode::Paragraph(p) => Box::new(std::iter::once(p)),
        ContentNode::Table(t) => Box::new(
            t.rows
                .iter()
                .flat_map(|r| r.cells.iter().map(|c| &c.content)),
        ),
        ContentNode::Heading(_) => Box::new(std::iter::empty()),
    }
}
