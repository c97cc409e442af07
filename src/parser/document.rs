//! Top-level driver: walks `node <name> { … }` blocks and accumulates the
//! final `Document`.

use std::collections::HashMap;

use crate::error::ParseError;
use crate::model::{Document, FrameMap, Node, Signal};

use super::frame::decode_all_frames;
use super::scan::{find_block, find_scalar};
use super::ParseOptions;

/// Accumulates per-node results and merges them into the global maps once,
/// at the top of the call tree. Nothing below the driver mutates shared
/// state, so a failed parse never leaks a half-built document.
#[derive(Default)]
struct DocumentBuilder {
    nodes: HashMap<String, Node>,
    frames: FrameMap,
    signals: HashMap<String, Signal>,
}

impl DocumentBuilder {
    fn merge(&mut self, node: Node, frames: FrameMap, signals: Vec<Signal>) {
        for signal in signals {
            self.signals.insert(signal.name.clone(), signal);
        }
        for frame in frames.publish.into_values() {
            self.frames.insert(frame);
        }
        for frame in frames.subscribe.into_values() {
            self.frames.insert(frame);
        }
        self.nodes.insert(node.name.clone(), node);
    }

    fn finish(self) -> Document {
        Document {
            nodes: self.nodes,
            frames: self.frames,
            signals: self.signals,
        }
    }
}

/// Parse a full NCF text into a `Document`.
///
/// A text with no `node` sections parses to an empty document. Any failure
/// aborts the whole parse; there is no partial-success mode.
pub fn parse_document(text: &str, options: &ParseOptions) -> Result<Document, ParseError> {
    let mut builder = DocumentBuilder::default();
    let mut rest = text;

    while let Some(at) = rest.find("node ") {
        let after = &rest[at..];
        // The node header runs from `node ` to the ` {` that opens its block.
        let header_end = after.find(" {").ok_or_else(|| ParseError::NotFound {
            keyword: "node".to_string(),
            scope: "document".to_string(),
        })?;
        let header = &after[..header_end];
        let name = header.split_whitespace().nth(1).unwrap_or("").to_string();
        if name.is_empty() {
            return Err(ParseError::NotFound {
                keyword: "node".to_string(),
                scope: "document".to_string(),
            });
        }

        let span = find_block(after, header).map_err(|e| e.in_scope("document"))?;
        let node_text = span.slice(after);
        let scope = format!("node '{name}'");

        let frames_span = find_block(node_text, "frames").map_err(|e| e.in_scope(&scope))?;
        let (frames, signals) = decode_all_frames(frames_span.slice(node_text), options)?;

        let nad = find_scalar(node_text, "NAD").map_err(|e| e.in_scope(&scope))?;
        let lin_protocol = find_scalar(node_text, "LIN_protocol").map_err(|e| e.in_scope(&scope))?;
        let bitrate = find_scalar(node_text, "bitrate").map_err(|e| e.in_scope(&scope))?;

        let mut publishes: Vec<String> = frames.publish.keys().cloned().collect();
        publishes.sort();
        let mut subscribes: Vec<String> = frames.subscribe.keys().cloned().collect();
        subscribes.sort();

        builder.merge(
            Node {
                name,
                nad,
                lin_protocol,
                bitrate,
                publishes,
                subscribes,
            },
            frames,
            signals,
        );

        // Never re-enter consumed text; total work stays linear.
        rest = &rest[at + span.resume()..];
    }

    Ok(builder.finish())
}
