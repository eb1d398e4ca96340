//! Plain text rendering for comment documents.

use crate::error::Result;
use crate::model::Document;

/// Convert a document to plain text.
pub fn to_text(doc: &Document) -> Result<String> {
    Ok(doc.plain_text().trim().to_string())
}
