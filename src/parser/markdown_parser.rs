//! Markdown comment parser.

use super::{InlineParser, ParseContext, ParseOptions, Preprocessor, TableParser};
use crate::attachment::AttachmentRef;
use crate::error::Result;
use crate::model::{ContentNode, Document, Paragraph};

/// Heading prefixes, longest first.
const HEADING_PREFIXES: [(&str, u8); 3] = [("### ", 3), ("## ", 2), ("# ", 1)];

/// Result of parsing a comment body.
#[derive(Debug, Clone, Default)]
pub struct ParseOutput {
    /// The parsed document
    pub document: Document,

    /// Attachments replaced by placeholders, in placeholder order
    pub attachments: Vec<AttachmentRef>,
}

impl ParseOutput {
    /// Check if any attachments need resolving.
    pub fn has_attachments(&self) -> bool {
        !self.attachments.is_empty()
    }
}

/// Markdown parser producing the document tree.
///
/// The parse is a single forward scan with one line of lookahead, used to
/// recognise the separator row that turns a `|` line into a table.
pub struct MarkdownParser {
    preprocessor: Preprocessor,
    inline: InlineParser,
    tables: TableParser,
}

impl MarkdownParser {
    /// Create a parser with default options.
    pub fn new() -> Result<Self> {
        Self::with_options(ParseOptions::default())
    }

    /// Create a parser with custom options.
    pub fn with_options(options: ParseOptions) -> Result<Self> {
        Ok(Self {
            preprocessor: Preprocessor::new(options.clone())?,
            inline: InlineParser::new(options)?,
            tables: TableParser::new()?,
        })
    }

    /// Parse a comment body.
    ///
    /// Parsing is pure: the placeholder counter starts at 1 on every call.
    pub fn parse(&self, text: &str) -> ParseOutput {
        let mut ctx = ParseContext::new();
        let normalized = self.preprocessor.process(text);
        let lines: Vec<&str> = normalized.lines().collect();
        let document = self.parse_lines(&lines, &mut ctx);

        log::debug!(
            "Parsed {} lines into {} nodes with {} attachments",
            lines.len(),
            document.node_count(),
            ctx.attachments().len()
        );

        ParseOutput {
            document,
            attachments: ctx.into_attachments(),
        }
    }

    fn parse_lines(&self, lines: &[&str], ctx: &mut ParseContext) -> Document {
        let mut doc = Document::new();
        let mut i = 0;

        while i < lines.len() {
            let line = lines[i];

            if self.tables.starts_table(line, lines.get(i + 1).copied()) {
                let start = i;
                while i < lines.len() && lines[i].starts_with('|') {
                    i += 1;
                }
                doc.add_table(self.tables.parse(&lines[start..i], &self.inline, ctx));
                continue;
            }

            if !line.trim().is_empty() {
                doc.add_node(self.parse_line(line, ctx));
            }
            i += 1;
        }

        doc
    }

    fn parse_line(&self, line: &str, ctx: &mut ParseContext) -> ContentNode {
        for (prefix, level) in HEADING_PREFIXES {
            if let Some(text) = line.strip_prefix(prefix) {
                return ContentNode::heading(level, text);
            }
        }
        ContentNode::Paragraph(Paragraph::from_runs(self.inline.parse(line, ctx)))
    }
}
