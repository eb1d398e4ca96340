//! JSON rendering of the ADF document.

use crate::error::{Error, Result};
use crate::model::Document;

use super::to_adf;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to ADF JSON.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let adf = to_adf(doc);
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(&adf),
        JsonFormat::Compact => serde_json::to_string(&adf),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
