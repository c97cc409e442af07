//! Low-level scanning primitives: balanced-brace block extraction and
//! `key = value;` scalar extraction.
//!
//! Both are pure functions over a text slice. They report locations as byte
//! offsets into the slice they were given; callers re-slice their own window
//! to advance, so no cursor state is shared between parse branches.

use crate::error::ParseError;

/// The span of a block's content, strictly inside its `{ … }` delimiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    /// Offset of the first byte after the opening `{`.
    pub start: usize,
    /// Offset of the closing `}` (exclusive end of the content).
    pub end: usize,
}

impl Block {
    /// The content inside the braces.
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }

    /// Offset just past the closing `}`, where scanning should resume.
    pub fn resume(&self) -> usize {
        self.end + 1
    }
}

/// Locate the balanced `{ … }` block following `keyword` (separated by one
/// space, or none). `keyword` may carry an argument, e.g. `publish Status`.
///
/// Nested braces inside the block are balanced: the block ends at the `}`
/// that closes the initially opened `{`.
pub fn find_block(text: &str, keyword: &str) -> Result<Block, ParseError> {
    let spaced = format!("{keyword} {{");
    let open = match text.find(&spaced) {
        Some(pos) => pos + spaced.len() - 1,
        None => {
            let tight = format!("{keyword}{{");
            match text.find(&tight) {
                Some(pos) => pos + tight.len() - 1,
                None => {
                    return Err(ParseError::NotFound {
                        keyword: keyword.to_string(),
                        scope: "input".to_string(),
                    })
                }
            }
        }
    };

    let start = open + 1;
    let mut depth = 1usize;
    for (off, c) in text[start..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(Block {
                        start,
                        end: start + off,
                    });
                }
            }
            _ => {}
        }
    }

    Err(ParseError::UnterminatedBlock {
        keyword: keyword.to_string(),
        scope: "input".to_string(),
    })
}

/// Extract the value of the first `field = value;` statement in `text`,
/// with all whitespace removed from the value.
///
/// The match is a plain substring search: callers must not pass a field name
/// that is a prefix of another identifier in the same scope.
pub fn find_scalar(text: &str, field: &str) -> Result<String, ParseError> {
    let at = text.find(field).ok_or_else(|| ParseError::FieldNotFound {
        field: field.to_string(),
        scope: "input".to_string(),
    })?;

    let statement = text[at..].split(';').next().unwrap_or("");
    let value = match statement.split_once('=') {
        Some((_, tail)) => tail,
        None => statement,
    };
    Ok(value.chars().filter(|c| !c.is_whitespace()).collect())
}

/// Parse an integer literal that may be hex- (`0x…`) or decimal-formatted.
pub fn parse_int(field: &str, value: &str) -> Result<u64, ParseError> {
    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => value.parse(),
    };
    parsed.map_err(|_| ParseError::InvalidNumber {
        field: field.to_string(),
        value: value.to_string(),
    })
}
