//! Per-invocation parse state.

use crate::attachment::{placeholder_name, placeholder_text, AttachmentRef};

/// State threaded through a single parse: the placeholder counter and the
/// attachments recorded so far.
#[derive(Debug, Clone, Default)]
pub struct ParseContext {
    attachments: Vec<AttachmentRef>,
}

impl ParseContext {
    /// Create a fresh context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an attachment URL and return its placeholder text.
    pub fn register_attachment(&mut self, url: impl Into<String>) -> String {
        let name = placeholder_name(self.attachments.len() + 1);
        let text = placeholder_text(&name);
        self.attachments.push(AttachmentRef::new(url, name));
        text
    }

    /// Attachments recorded so far, in registration order.
    pub fn attachments(&self) -> &[AttachmentRef] {
        &self.attachments
    }

    /// Consume the context, returning the recorded attachments.
    pub fn into_attachments(self) -> Vec<AttachmentRef> {
        self.attachments
    }
}
