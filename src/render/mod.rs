//! Rendering module for converting documents to output formats.

mod adf;
mod json;
mod text;

pub use adf::{
    to_adf, AdfDocument, AdfMark, AdfNode, CellAttrs, HeadingAttrs, LinkAttrs, TableAttrs,
    ADF_VERSION,
};
pub use json::{to_json, JsonFormat};
pub use text::to_text;
