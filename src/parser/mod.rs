//! Markdown parsing module.

mod context;
mod inline;
mod markdown_parser;
mod options;
mod preprocess;
mod table_parser;

pub use context::ParseContext;
pub use inline::{InlineKind, InlineParser, Recognizer};
pub use markdown_parser::{MarkdownParser, ParseOutput};
pub use options::{
    AttachmentMode, ParseOptions, DEFAULT_ATTACHMENT_HOST_PREFIX, DEFAULT_CUTOFF_MARKER,
};
pub use preprocess::Preprocessor;
pub use table_parser::{split_cells, TableParser};
