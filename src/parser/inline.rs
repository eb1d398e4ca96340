//! Inline run extraction.
//!
//! A line is scanned left to right against an ordered list of recognizers.
//! At each step the earliest match wins; when two recognizers match at the
//! same position the one listed first wins. Text between matches becomes
//! plain runs.

use regex::Regex;

use super::{ParseContext, ParseOptions};
use crate::error::Result;
use crate::model::TextRun;

/// Kind of inline construct a recognizer detects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineKind {
    /// A bare `http://` or `https://` URL
    Url,
    /// A `**bold**` span
    Strong,
}

/// A named inline pattern.
#[derive(Debug, Clone)]
pub struct Recognizer {
    kind: InlineKind,
    pattern: Regex,
}

impl Recognizer {
    /// Recognizer for bare URLs.
    pub fn url() -> Result<Self> {
        Ok(Self {
            kind: InlineKind::Url,
            pattern: Regex::new(r"https?://\S+")?,
        })
    }

    /// Recognizer for `**bold**` spans without nested `*`.
    pub fn strong() -> Result<Self> {
        Ok(Self {
            kind: InlineKind::Strong,
            pattern: Regex::new(r"\*\*[^*]+\*\*")?,
        })
    }

    /// The construct this recognizer detects.
    pub fn kind(&self) -> InlineKind {
        self.kind
    }

    fn find_at<'t>(&self, text: &'t str, start: usize) -> Option<regex::Match<'t>> {
        self.pattern.find_at(text, start)
    }
}

/// Splits a line into styled runs.
#[derive(Debug, Clone)]
pub struct InlineParser {
    recognizers: Vec<Recognizer>,
    options: ParseOptions,
}

impl InlineParser {
    /// Create an inline parser with the URL and bold recognizers.
    pub fn new(options: ParseOptions) -> Result<Self> {
        Ok(Self::with_recognizers(
            vec![Recognizer::url()?, Recognizer::strong()?],
            options,
        ))
    }

    /// Create an inline parser with a custom recognizer order.
    pub fn with_recognizers(recognizers: Vec<Recognizer>, options: ParseOptions) -> Self {
        Self {
            recognizers,
            options,
        }
    }

    /// Parse a line into runs.
    pub fn parse(&self, line: &str, ctx: &mut ParseContext) -> Vec<TextRun> {
        let mut runs = Vec::new();
        let mut pos = 0;

        while let Some((kind, start, end)) = self.next_match(line, pos) {
            if start > pos {
                runs.push(TextRun::new(&line[pos..start]));
            }
            runs.push(self.build_run(kind, &line[start..end], ctx));
            pos = end;
        }

        if pos < line.len() {
            runs.push(TextRun::new(&line[pos..]));
        }
        runs
    }

    /// Earliest match at or after `pos`; ties go to the earlier recognizer.
    fn next_match(&self, line: &str, pos: usize) -> Option<(InlineKind, usize, usize)> {
        let mut best: Option<(InlineKind, usize, usize)> = None;
        for recognizer in &self.recognizers {
            if let Some(m) = recognizer.find_at(line, pos) {
                if best.map_or(true, |(_, start, _)| m.start() < start) {
                    best = Some((recognizer.kind(), m.start(), m.end()));
                }
            }
        }
        best
    }

    fn build_run(&self, kind: InlineKind, matched: &str, ctx: &mut ParseContext) -> TextRun {
        match kind {
            InlineKind::Url => {
                if self.options.uses_placeholders() && self.options.is_attachment_url(matched) {
                    TextRun::new(ctx.register_attachment(matched))
                } else {
                    TextRun::link(matched)
                }
            }
            InlineKind::Strong => TextRun::strong(&matched[2..matched.len() - 2]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Mark;

    fn parse(line: &str) -> Vec<TextRun> {
        let parser = InlineParser::new(ParseOptions::default()).unwrap();
        parser.parse(line, &mut ParseContext::new())
    }

    #[test]
    fn test_plain_line() {
        let runs = parse("Just text.");
        assert_eq!(runs, vec![TextRun::new("Just text.")]);
    }

    #[test]
    fn test_url_and_bold() {
        let runs = parse("Fixes **bug** in https://example.com/issue see also.");
        assert_eq!(
            runs,
            vec![
                TextRun::new("Fixes "),
                TextRun::strong("bug"),
                TextRun::new(" in "),
                TextRun::link("https://example.com/issue"),
                TextRun::new(" see also."),
            ]
        );
    }

    #[test]
    fn test_url_at_line_end() {
        let runs = parse("see http://example.com");
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[1].link_href(), Some("http://example.com"));
    }

    #[test]
    fn test_url_inside_bold_stays_plain() {
        let runs = parse("**https://example.com**");
        assert_eq!(runs, vec![TextRun::strong("https://example.com")]);
        assert!(runs[0].link_href().is_none());
    }

    #[test]
    fn test_unclosed_bold_is_text() {
        let runs = parse("a **b c");
        assert_eq!(runs, vec![TextRun::new("a **b c")]);
    }

    #[test]
    fn test_nested_star_not_bold() {
        let runs = parse("**a*b**");
        assert!(runs.iter().all(|r| !r.is_strong()));
    }

    #[test]
    fn test_adjacent_matches_skip_empty_runs() {
        let runs = parse("**a****b**");
        assert_eq!(runs, vec![TextRun::strong("a"), TextRun::strong("b")]);
    }

    #[test]
    fn test_attachment_placeholder_in_placeholder_mode() {
        let parser = InlineParser::new(ParseOptions::default().with_placeholders()).unwrap();
        let mut ctx = ParseContext::new();
        let runs = parser.parse(
            "Screen https://github.com/user-attachments/assets/abc-123 done",
            &mut ctx,
        );

        assert_eq!(
            runs,
            vec![
                TextRun::new("Screen "),
                TextRun::new("See attachment \"image_001\""),
                TextRun::new(" done"),
            ]
        );
        assert_eq!(ctx.attachments().len(), 1);
    }

    #[test]
    fn test_attachment_link_in_link_mode() {
        let runs = parse("https://github.com/user-attachments/assets/abc");
        assert_eq!(
            runs[0].marks,
            vec![Mark::link("https://github.com/user-attachments/assets/abc")]
        );
    }

    #[test]
    fn test_custom_recognizer_list() {
        let url_only = InlineParser::with_recognizers(
            vec![Recognizer::url().unwrap()],
            ParseOptions::default(),
        );
        let runs = url_only.parse("**x** https://a.example", &mut ParseContext::new());
        assert_eq!(
            runs,
            vec![TextRun::new("**x** "), TextRun::link("https://a.example")]
        );
    }

    #[test]
    fn test_multibyte_text() {
        let runs = parse("héllo **wörld** → https://例え.jp/パス");
        assert_eq!(runs[1], TextRun::strong("wörld"));
        assert_eq!(runs[3].link_href(), Some("https://例え.jp/パス"));
    }
}
