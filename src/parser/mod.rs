pub mod document;
pub mod frame;
pub mod scan;
pub mod signal;

use crate::error::ParseError;
use crate::model::Document;

/// Knobs for the permissive corners of the format.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Reject a frame name reused within one direction instead of letting
    /// the later definition overwrite the earlier one.
    pub strict_frames: bool,
}

/// Parse NCF text into a `Document` with default options.
///
/// This is the main entry point for the parser module.
pub fn parse(text: &str) -> Result<Document, ParseError> {
    document::parse_document(text, &ParseOptions::default())
}

/// Parse NCF text with explicit options.
pub fn parse_with_options(text: &str, options: &ParseOptions) -> Result<Document, ParseError> {
    document::parse_document(text, options)
}
