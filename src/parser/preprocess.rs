//! Text normalization applied before structural parsing.

use regex::Regex;

use super::ParseOptions;
use crate::error::Result;

/// Normalizes a raw comment body: truncates at the cutoff marker and turns
/// image references into bare URLs.
///
/// Attachment placeholders are not created here. The inline pass registers
/// them in text order, and only where the text can later be resolved.
pub struct Preprocessor {
    options: ParseOptions,
    html_image_regex: Regex,
    markdown_image_regex: Regex,
}

impl Preprocessor {
    /// Create a new preprocessor with the given options.
    pub fn new(options: ParseOptions) -> Result<Self> {
        Ok(Self {
            options,
            html_image_regex: Regex::new(r#"<img[^>]*src="([^"]*)"[^>]*>"#)?,
            markdown_image_regex: Regex::new(r"!\[[^\]]*\]\(([^)]*)\)")?,
        })
    }

    /// Process text through the preprocessing steps.
    pub fn process(&self, text: &str) -> String {
        let kept = self.truncate(text);
        let without_html = self.html_image_regex.replace_all(kept, "$1");
        self.markdown_image_regex
            .replace_all(&without_html, "$1")
            .into_owned()
    }

    /// Keep only the text before the first occurrence of the cutoff marker.
    ///
    /// When the marker is preceded on its line by nothing but `#` and
    /// whitespace (`### Checklist`), the whole line is dropped.
    fn truncate<'a>(&self, text: &'a str) -> &'a str {
        let Some(marker) = self.options.cutoff_marker.as_deref() else {
            return text;
        };
        if marker.is_empty() {
            return text;
        }
        let Some(index) = text.find(marker) else {
            return text;
        };
        log::debug!("Cutoff marker {:?} found at byte {}", marker, index);

        let kept = &text[..index];
        let line_start = kept.rfind('\n').map_or(0, |i| i + 1);
        if kept[line_start..]
            .chars()
            .all(|c| c == '#' || c.is_whitespace())
        {
            &text[..line_start]
        } else {
            kept
        }
    }
}
