//! Parsing options and configuration.

/// Heading that starts the PR template checklist.
pub const DEFAULT_CUTOFF_MARKER: &str = "## Checklist";

/// URL prefix of images uploaded into a GitHub PR description.
pub const DEFAULT_ATTACHMENT_HOST_PREFIX: &str = "https://github.com/user-attachments/assets/";

/// Options for parsing Markdown comment bodies.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Content from the first line starting with this marker is dropped
    pub cutoff_marker: Option<String>,

    /// URLs starting with this prefix are ephemeral attachments
    pub attachment_host_prefix: String,

    /// How ephemeral attachment URLs are rendered
    pub attachment_mode: AttachmentMode,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cutoff marker.
    pub fn with_cutoff_marker(mut self, marker: impl Into<String>) -> Self {
        self.cutoff_marker = Some(marker.into());
        self
    }

    /// Keep the whole body regardless of markers.
    pub fn without_cutoff(mut self) -> Self {
        self.cutoff_marker = None;
        self
    }

    /// Set the ephemeral attachment host prefix.
    pub fn with_attachment_host(mut self, prefix: impl Into<String>) -> Self {
        self.attachment_host_prefix = prefix.into();
        self
    }

    /// Set attachment mode.
    pub fn with_attachment_mode(mut self, mode: AttachmentMode) -> Self {
        self.attachment_mode = mode;
        self
    }

    /// Replace attachment URLs with placeholders for later upload.
    pub fn with_placeholders(mut self) -> Self {
        self.attachment_mode = AttachmentMode::Placeholder;
        self
    }

    /// Check if a URL points at the ephemeral attachment host.
    pub fn is_attachment_url(&self, url: &str) -> bool {
        !self.attachment_host_prefix.is_empty() && url.starts_with(&self.attachment_host_prefix)
    }

    /// Check if attachment URLs become placeholders.
    pub fn uses_placeholders(&self) -> bool {
        self.attachment_mode == AttachmentMode::Placeholder
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            cutoff_marker: Some(DEFAULT_CUTOFF_MARKER.to_string()),
            attachment_host_prefix: DEFAULT_ATTACHMENT_HOST_PREFIX.to_string(),
            attachment_mode: AttachmentMode::Link,
        }
    }
}

/// Rendering of ephemeral attachment URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttachmentMode {
    /// Emit attachment URLs as ordinary links
    #[default]
    Link,
    /// Emit `See attachment "image_NNN"` and record the URL for upload
    Placeholder,
}
