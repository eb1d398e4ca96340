//! Attachment placeholders and their resolution.
//!
//! When a comment body references images hosted on an ephemeral attachment
//! host, the parser emits a placeholder (`See attachment "image_001"`) and
//! records the original URL. Once the image has been re-hosted for a
//! destination issue, [`resolve_attachments`] rewrites every placeholder
//! into a "click here" link pointing at the stored copy.

use crate::model::{Document, Mark, Paragraph, TextRun};
use serde::{Deserialize, Serialize};

/// An image reference waiting to be re-hosted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRef {
    /// Original image URL
    pub url: String,

    /// Placeholder name (`image_NNN`)
    pub name: String,
}

impl AttachmentRef {
    /// Create a new attachment reference.
    pub fn new(url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
        }
    }

    /// Text that stands in for this attachment in the document.
    pub fn placeholder(&self) -> String {
        placeholder_text(&self.name)
    }

    /// File name used when uploading the image.
    pub fn file_name(&self) -> String {
        format!("{}.jpg", self.name)
    }
}

/// A placeholder resolved to a stored download link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedAttachment {
    /// Placeholder name (`image_NNN`)
    pub name: String,

    /// Download link of the stored copy
    pub download_url: String,
}

impl ResolvedAttachment {
    /// Create a new resolved attachment.
    pub fn new(name: impl Into<String>, download_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            download_url: download_url.into(),
        }
    }
}

const RESOLVED_SUFFIX: &str = " above or ";

/// Placeholder name for the `index`-th attachment (1-based).
pub fn placeholder_name(index: usize) -> String {
    format!("image_{:03}", index)
}

/// Placeholder text for an attachment name.
pub fn placeholder_text(name: &str) -> String {
    format!("See attachment \"{}\"", name)
}

/// Return a copy of `doc` with every resolved placeholder turned into a link.
///
/// Each placeholder occurrence becomes three runs: the preceding text plus
/// `See attachment "NAME" above or `, a `click here` link, and
/// ` to download the image.` plus the following text. Placeholders without
/// a resolved link are left untouched.
pub fn resolve_attachments(doc: &Document, resolved: &[ResolvedAttachment]) -> Document {
    let mut doc = doc.clone();
    if resolved.is_empty() {
        return doc;
    }

    let tokens: Vec<(String, &ResolvedAttachment)> = resolved
        .iter()
        .map(|r| (placeholder_text(&r.name), r))
        .collect();

    doc.for_each_paragraph_mut(|paragraph| rewrite_paragraph(paragraph, &tokens));
    doc
}

/// Placeholder names still present in `doc`.
pub fn unresolved_placeholders<'a>(doc: &Document, refs: &'a [AttachmentRef]) -> Vec<&'a str> {
    refs.iter()
        .filter(|r| {
            let token = r.placeholder();
            doc.paragraphs().any(|p| {
                p.runs.iter().filter(|run| run.link_href().is_none()).any(|run| {
                    run.text
                        .match_indices(token.as_str())
                        .any(|(i, _)| !run.text[i + token.len()..].starts_with(RESOLVED_SUFFIX))
                })
            })
        })
        .map(|r| r.name.as_str())
        .collect()
}

fn rewrite_paragraph(paragraph: &mut Paragraph, tokens: &[(String, &ResolvedAttachment)]) {
    if !paragraph
        .runs
        .iter()
        .any(|run| tokens.iter().any(|(token, _)| run.text.contains(token.as_str())))
    {
        return;
    }

    let runs = std::mem::take(&mut paragraph.runs);
    paragraph.runs = runs
        .into_iter()
        .flat_map(|run| split_run(run, tokens))
        .collect();
}

fn split_run(run: TextRun, tokens: &[(String, &ResolvedAttachment)]) -> Vec<TextRun> {
    // Link text is never a placeholder.
    if run.link_href().is_some() {
        return vec![run];
    }

    let marks: Vec<Mark> = run.marks.clone();
    let mut out = Vec::new();
    let mut pending = String::new();
    let mut rest = run.text.as_str();

    loop {
        let next = tokens
            .iter()
            .filter_map(|(token, resolved)| rest.find(token.as_str()).map(|pos| (pos, token, resolved)))
            .min_by_key(|(pos, _, _)| *pos);

        let Some((pos, token, resolved)) = next else {
            break;
        };

        pending.push_str(&rest[..pos]);
        pending.push_str(token);
        pending.push_str(RESOLVED_SUFFIX);
        out.push(TextRun {
            text: std::mem::take(&mut pending),
            marks: marks.clone(),
        });
        out.push(TextRun::labelled_link("click here", resolved.download_url.clone()));
        pending.push_str(" to download the image.");
        rest = &rest[pos + token.len()..];
    }

    if out.is_empty() {
        return vec![run];
    }

    pending.push_str(rest);
    out.push(TextRun {
        text: pending,
        marks,
    });
    out
}
