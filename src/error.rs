use std::path::PathBuf;

use crate::model::Direction;

/// Errors from the NCF text parser.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("section '{keyword}' not found in {scope}")]
    NotFound { keyword: String, scope: String },

    #[error("unterminated block for '{keyword}' in {scope}")]
    UnterminatedBlock { keyword: String, scope: String },

    #[error("field '{field}' not found in {scope}")]
    FieldNotFound { field: String, scope: String },

    #[error("malformed signal '{signal}': {reason}")]
    MalformedSignal { signal: String, reason: String },

    #[error("malformed encoding segment '{segment}' in signal '{signal}'")]
    MalformedEncoding { signal: String, segment: String },

    #[error("invalid numeric literal '{value}' for field '{field}'")]
    InvalidNumber { field: String, value: String },

    /// Only raised in strict mode; the default is last-write-wins.
    #[error("duplicate {direction} frame '{name}'")]
    DuplicateFrame { direction: Direction, name: String },
}

impl ParseError {
    /// Replace the generic scope of a location error with the enclosing
    /// node/frame/signal name, so callers see where the lookup failed.
    pub(crate) fn in_scope(self, scope: &str) -> Self {
        match self {
            ParseError::NotFound { keyword, .. } => ParseError::NotFound {
                keyword,
                scope: scope.to_string(),
            },
            ParseError::UnterminatedBlock { keyword, .. } => ParseError::UnterminatedBlock {
                keyword,
                scope: scope.to_string(),
            },
            ParseError::FieldNotFound { field, .. } => ParseError::FieldNotFound {
                field,
                scope: scope.to_string(),
            },
            other => other,
        }
    }
}

/// Errors from the file-loading surface.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("not an NCF file: {}", path.display())]
    InvalidFileType { path: PathBuf },

    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Top-level error type that wraps all sub-errors.
#[derive(Debug, thiserror::Error)]
pub enum NcfError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Result type alias for NCF operations.
pub type Result<T> = std::result::Result<T, NcfError>;
