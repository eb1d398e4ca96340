//! # prbridge
//!
//! Pull request automation for Jira.
//!
//! The core of the library converts the restricted Markdown found in pull
//! request descriptions into Atlassian Document Format (ADF), ready to be
//! posted as a Jira comment.
//!
//! ## Quick Start
//!
//! ```
//! use prbridge::{to_adf_json, JsonFormat};
//!
//! fn main() -> prbridge::Result<()> {
//!     let json = to_adf_json("## Summary\nSee **notes**", JsonFormat::Compact)?;
//!     assert!(json.contains("\"heading\""));
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Markdown subset**: `#`/`##`/`###` headings, pipe tables, bare URLs and `**bold**`
//! - **Attachment placeholders**: GitHub-hosted images become `See attachment "image_001"`
//!   references that are rewritten once the files are uploaded to Jira
//! - **Workflow helpers**: issue key checks, reviewer selection, fix version selection

pub mod attachment;
pub mod error;
pub mod issue_key;
pub mod model;
pub mod parser;
pub mod release;
pub mod render;
pub mod reviewer;

// Re-export commonly used types
pub use attachment::{
    resolve_attachments, unresolved_placeholders, AttachmentRef, ResolvedAttachment,
};
pub use error::{Error, Result};
pub use issue_key::{branch_issue_keys, check_title, format_keys, issue_keys_in_title, TitleCheck};
pub use model::{ContentNode, Document, Heading, Mark, Paragraph, Table, TableCell, TableRow, TextRun};
pub use parser::{AttachmentMode, MarkdownParser, ParseOptions, ParseOutput};
pub use release::{select_fix_version, FixVersionDecision, ReleaseVersion};
pub use render::{to_adf, AdfDocument, JsonFormat};
pub use reviewer::select_reviewers;

/// Parse Markdown with the default options.
///
/// The text is truncated at `## Checklist` and attachment URLs are kept as
/// links.
pub fn parse(text: &str) -> Result<ParseOutput> {
    parse_with_options(text, ParseOptions::default())
}

/// Parse Markdown with custom options.
pub fn parse_with_options(text: &str, options: ParseOptions) -> Result<ParseOutput> {
    let parser = MarkdownParser::with_options(options)?;
    Ok(parser.parse(text))
}

/// Convert Markdown straight to ADF JSON.
pub fn to_adf_json(text: &str, format: JsonFormat) -> Result<String> {
    let output = parse(text)?;
    render::to_json(&output.document, format)
}

/// Split a comma-separated list, trimming entries and dropping blanks.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Builder-style entry point for Markdown conversion.
///
/// # Example
///
/// ```
/// use prbridge::Converter;
///
/// let conversion = Converter::new()
///     .with_placeholders()
///     .parse("![](https://github.com/user-attachments/assets/abc)")
///     .unwrap();
/// assert_eq!(conversion.attachments.len(), 1);
/// assert_eq!(conversion.attachments[0].name, "image_001");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ParseOptions,
}

impl Converter {
    /// Create a converter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Truncate input at a different marker line.
    pub fn with_cutoff_marker(mut self, marker: impl Into<String>) -> Self {
        self.options = self.options.with_cutoff_marker(marker);
        self
    }

    /// Keep the whole input.
    pub fn without_cutoff(mut self) -> Self {
        self.options = self.options.without_cutoff();
        self
    }

    /// Treat URLs with this prefix as attachments.
    pub fn with_attachment_host(mut self, prefix: impl Into<String>) -> Self {
        self.options = self.options.with_attachment_host(prefix);
        self
    }

    /// Replace attachment URLs with placeholders.
    pub fn with_placeholders(mut self) -> Self {
        self.options = self.options.with_placeholders();
        self
    }

    /// Access the configured options.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse Markdown into a conversion result.
    pub fn parse(&self, text: &str) -> Result<Conversion> {
        let output = parse_with_options(text, self.options.clone())?;
        Ok(Conversion {
            document: output.document,
            attachments: output.attachments,
        })
    }
}

/// A parsed document together with the attachments it references.
#[derive(Debug, Clone)]
pub struct Conversion {
    /// The parsed document
    pub document: Document,

    /// Attachments registered in placeholder mode, in order of appearance
    pub attachments: Vec<AttachmentRef>,
}

impl Conversion {
    /// The document in ADF.
    pub fn to_adf(&self) -> AdfDocument {
        render::to_adf(&self.document)
    }

    /// The document as ADF JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// The document as plain text.
    pub fn plain_text(&self) -> Result<String> {
        render::to_text(&self.document)
    }

    /// Placeholder names that have no resolved link yet.
    pub fn unresolved(&self) -> Vec<&str> {
        unresolved_placeholders(&self.document, &self.attachments)
    }

    /// Rewrite placeholders with download links.
    pub fn resolve(&self, resolved: &[ResolvedAttachment]) -> Conversion {
        Conversion {
            document: resolve_attachments(&self.document, resolved),
            attachments: self.attachments.clone(),
        }
    }
}
