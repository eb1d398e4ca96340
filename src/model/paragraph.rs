//! Paragraph and text-level types.

use serde::{Deserialize, Serialize};

/// A paragraph of styled text runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Text runs in source order
    pub runs: Vec<TextRun>,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self { runs: Vec::new() }
    }

    /// Create a paragraph with a single plain run.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut p = Self::new();
        p.add_text(text);
        p
    }

    /// Create a paragraph from existing runs.
    pub fn from_runs(runs: Vec<TextRun>) -> Self {
        Self { runs }
    }

    /// Add plain text to the paragraph.
    pub fn add_text(&mut self, text: impl Into<String>) {
        self.runs.push(TextRun::new(text));
    }

    /// Add a styled text run.
    pub fn add_run(&mut self, run: TextRun) {
        self.runs.push(run);
    }

    /// Get plain text content of the paragraph.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Check if the paragraph has no visible text.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty() || self.plain_text().trim().is_empty()
    }

    /// Iterate over the link targets in this paragraph.
    pub fn links(&self) -> impl Iterator<Item = &str> {
        self.runs.iter().filter_map(|r| r.link_href())
    }
}

/// A run of text with a consistent set of marks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Styling and linking annotations
    pub marks: Vec<Mark>,
}

impl TextRun {
    /// Create a new unmarked text run.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    /// Create a bold text run.
    pub fn strong(text: impl Into<String>) -> Self {
        Self::new(text).with_mark(Mark::Strong)
    }

    /// Create a run linking to `url`, labelled with the url itself.
    pub fn link(url: impl Into<String>) -> Self {
        let url = url.into();
        Self::new(url.clone()).with_mark(Mark::link(url))
    }

    /// Create a run with a custom label linking to `href`.
    pub fn labelled_link(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self::new(text).with_mark(Mark::link(href))
    }

    /// Add a mark and return self.
    ///
    /// A run carries at most one link: adding a link replaces any existing
    /// one, and adding a mark that is already present is a no-op.
    pub fn with_mark(mut self, mark: Mark) -> Self {
        if mark.is_link() {
            self.marks.retain(|m| !m.is_link());
        } else if self.marks.contains(&mark) {
            return self;
        }
        self.marks.push(mark);
        self
    }

    /// Check if the run is bold.
    pub fn is_strong(&self) -> bool {
        self.marks.contains(&Mark::Strong)
    }

    /// Get the link target, if any.
    pub fn link_href(&self) -> Option<&str> {
        self.marks.iter().find_map(|m| match m {
            Mark::Link { href, .. } => Some(href.as_str()),
            Mark::Strong => None,
        })
    }

    /// Check if any marks are applied.
    pub fn has_marks(&self) -> bool {
        !self.marks.is_empty()
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A styling or linking annotation on a text run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Mark {
    /// Bold text
    Strong,

    /// A hyperlink
    Link {
        /// Link target
        href: String,
        /// Link title (tooltip)
        title: String,
    },
}

impl Mark {
    /// Create a link mark whose title equals its target.
    pub fn link(href: impl Into<String>) -> Self {
        let href = href.into();
        Mark::Link {
            title: href.clone(),
            href,
        }
    }

    /// Check if this is a link mark.
    pub fn is_link(&self) -> bool {
        matches!(self, Mark::Link { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_plain_text() {
        let mut p = Paragraph::new();
        p.add_text("Hello ");
        p.add_run(TextRun::strong("world"));
        p.add_text("!");

        assert_eq!(p.plain_text(), "Hello world!");
    }

    #[test]
    fn test_link_run() {
        let run = TextRun::link("https://example.com");
        assert_eq!(run.text, "https://example.com");
        assert_eq!(run.link_href(), Some("https://example.com"));
        assert_eq!(
            run.marks,
            vec![Mark::Link {
                href: "https://example.com".to_string(),
                title: "https://example.com".to_string(),
            }]
        );
    }

    #[test]
    fn test_single_link_per_run() {
        let run = TextRun::link("https://a.example")
            .with_mark(Mark::Strong)
            .with_mark(Mark::link("https://b.example"));

        assert_eq!(run.marks.iter().filter(|m| m.is_link()).count(), 1);
        assert_eq!(run.link_href(), Some("https://b.example"));
        assert!(run.is_strong());
    }

    #[test]
    fn test_duplicate_strong_ignored() {
        let run = TextRun::strong("x").with_mark(Mark::Strong);
        assert_eq!(run.marks.len(), 1);
    }

    #[test]
    fn test_empty_paragraph() {
        assert!(Paragraph::new().is_empty());
        assert!(Paragraph::with_text("   ").is_empty());
        assert!(!Paragraph::with_text("x").is_empty());
    }
}
