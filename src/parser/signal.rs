//! Decoding of one signal block and its embedded `encoding` block.

use std::collections::BTreeMap;

use crate::error::ParseError;
use crate::model::{Encoding, Signal};

use super::scan::find_block;

/// Decode an `encoding { … }` block's content.
///
/// The first comma token's text before its first `_` selects the variant:
/// `logical_value` / `physical_range` style tags, matched case-insensitively.
/// Any other tag yields `Ok(None)` rather than an error; the format in the
/// wild carries encoding kinds this model does not cover, and a signal
/// without an interpretation is still useful to downstream tooling.
pub fn decode_encoding(block: &str, signal: &str) -> Result<Option<Encoding>, ParseError> {
    let compact: String = block.chars().filter(|c| !c.is_whitespace()).collect();

    let tag = compact
        .split(',')
        .next()
        .unwrap_or("")
        .split('_')
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();

    match tag.as_str() {
        "logical" => {
            let mut table = BTreeMap::new();
            for segment in compact.split(';') {
                if segment.is_empty() {
                    continue;
                }
                let parts: Vec<&str> = segment.split(',').collect();
                if parts.len() < 3 {
                    return Err(malformed(signal, segment));
                }
                let raw: i64 = parts[1].parse().map_err(|_| malformed(signal, segment))?;
                let label = parts[2].replace('"', "");
                // Later duplicates overwrite earlier entries.
                table.insert(raw, label);
            }
            Ok(Some(Encoding::Logical(table)))
        }
        "physical" => {
            let first = compact.split(';').next().unwrap_or("");
            let parts: Vec<&str> = first.split(',').collect();
            // Position 3 is reserved in the format and skipped.
            if parts.len() < 5 {
                return Err(malformed(signal, first));
            }
            Ok(Some(Encoding::Physical {
                min: parts[1].to_string(),
                max: parts[2].to_string(),
                init: parts[4].to_string(),
            }))
        }
        _ => Ok(None),
    }
}

fn malformed(signal: &str, segment: &str) -> ParseError {
    ParseError::MalformedEncoding {
        signal: signal.to_string(),
        segment: segment.to_string(),
    }
}

/// Decode one signal block. The name comes from the block header, which the
/// frame decoder has already consumed.
///
/// Expects three scalar fields (`publisher`, `start_bit`, `bit_length`)
/// ahead of the `encoding` sub-block.
pub fn decode_signal(block: &str, name: &str) -> Result<Signal, ParseError> {
    let encoding_block =
        find_block(block, "encoding").map_err(|e| e.in_scope(&format!("signal '{name}'")))?;
    let encoding = decode_encoding(encoding_block.slice(block), name)?;

    // Fields precede the encoding keyword; find_block already proved it is
    // present.
    let head = &block[..block.find("encoding").unwrap_or(block.len())];
    let compact: String = head.chars().filter(|c| !c.is_whitespace()).collect();

    let mut publisher = None;
    let mut start_bit = None;
    let mut bit_length = None;

    for segment in compact.split(';').filter(|s| !s.is_empty()).take(3) {
        let (key, value) = segment
            .split_once('=')
            .ok_or_else(|| ParseError::MalformedSignal {
                signal: name.to_string(),
                reason: format!("statement '{segment}' has no '='"),
            })?;
        match key {
            "publisher" => publisher = Some(value.to_string()),
            "start_bit" => start_bit = Some(parse_bit_field(name, key, value)?),
            "bit_length" => bit_length = Some(parse_bit_field(name, key, value)?),
            _ => {}
        }
    }

    match (publisher, start_bit, bit_length) {
        (Some(publisher), Some(start_bit), Some(bit_length)) => Ok(Signal {
            name: name.to_string(),
            publisher,
            start_bit,
            bit_length,
            encoding,
        }),
        _ => Err(ParseError::MalformedSignal {
            signal: name.to_string(),
            reason: "expected publisher, start_bit and bit_length fields".to_string(),
        }),
    }
}

fn parse_bit_field(signal: &str, key: &str, value: &str) -> Result<u32, ParseError> {
    value.parse().map_err(|_| ParseError::MalformedSignal {
        signal: signal.to_string(),
        reason: format!("invalid {key} '{value}'"),
    })
}
