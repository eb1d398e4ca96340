//! Document model types for comment content representation.
//!
//! This module defines the intermediate representation (IR) that bridges
//! Markdown parsing and rendering to the Atlassian Document Format. The
//! tree is strictly owned: every node owns its children.

mod document;
mod node;
mod paragraph;
mod table;

pub use document::Document;
pub use node::{ContentNode, Heading};
pub use paragraph::{Mark, Paragraph, TextRun};
pub use table::{Table, TableCell, TableRow};
