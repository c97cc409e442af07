//! Decoding of frame blocks and the publish/subscribe scanner that walks a
//! node's `frames { … }` section.

use crate::error::ParseError;
use crate::model::{Direction, Frame, FrameMap, Signal};

use super::scan::{find_block, find_scalar, parse_int};
use super::signal::decode_signal;
use super::ParseOptions;

/// Decode one frame block: `message_ID`, `length`, and the nested
/// `signals { … }` section.
///
/// Returns the decoded signals alongside the frame; the document builder
/// merges them into the global signal map once the whole node is parsed.
pub fn decode_frame(
    block: &str,
    name: &str,
    direction: Direction,
) -> Result<(Frame, Vec<Signal>), ParseError> {
    let scope = format!("{direction} frame '{name}'");

    let id_text = find_scalar(block, "message_ID").map_err(|e| e.in_scope(&scope))?;
    let message_id = parse_int("message_ID", &id_text)?;

    let length_text = find_scalar(block, "length").map_err(|e| e.in_scope(&scope))?;
    let length = parse_int("length", &length_text)? as u32;

    let signals_block = find_block(block, "signals").map_err(|e| e.in_scope(&scope))?;
    let mut rest = signals_block.slice(block);

    let mut signal_names = Vec::new();
    let mut signals = Vec::new();

    // Each signal is `<name> { … }`; the text before the next `{` is the
    // name. An empty signals block decodes to a frame with no signals.
    while let Some(open) = rest.find('{') {
        let signal_name: String = rest[..open].chars().filter(|c| !c.is_whitespace()).collect();
        let span = find_block(rest, &signal_name).map_err(|e| e.in_scope(&scope))?;
        let signal = decode_signal(span.slice(rest), &signal_name)?;
        signal_names.push(signal_name);
        signals.push(signal);
        rest = &rest[span.resume()..];
    }

    let frame = Frame {
        name: name.to_string(),
        direction,
        message_id,
        length,
        signals: signal_names,
    };
    Ok((frame, signals))
}

/// Scan a node's `frames { … }` content for `publish <name> { … }` and
/// `subscribe <name> { … }` sub-blocks and decode each.
///
/// The two directions keep independent cursors; each match is searched from
/// just after that direction's previous block so a repeated frame name never
/// re-matches an already-consumed block. A name reused within one direction
/// overwrites the earlier frame unless `options.strict_frames` is set.
pub fn decode_all_frames(
    block: &str,
    options: &ParseOptions,
) -> Result<(FrameMap, Vec<Signal>), ParseError> {
    let mut frames = FrameMap::default();
    let mut signals = Vec::new();
    let mut publish_cursor = 0usize;
    let mut subscribe_cursor = 0usize;

    loop {
        let publish_hit = block[publish_cursor..].find("publish ");
        let subscribe_hit = block[subscribe_cursor..].find("subscribe ");
        if publish_hit.is_none() && subscribe_hit.is_none() {
            break;
        }

        if let Some(offset) = publish_hit {
            publish_cursor += scan_one(
                &block[publish_cursor..],
                offset + "publish ".len(),
                Direction::Publish,
                options,
                &mut frames,
                &mut signals,
            )?;
        }

        if let Some(offset) = subscribe_hit {
            subscribe_cursor += scan_one(
                &block[subscribe_cursor..],
                offset + "subscribe ".len(),
                Direction::Subscribe,
                options,
                &mut frames,
                &mut signals,
            )?;
        }
    }

    Ok((frames, signals))
}

/// Decode the frame whose keyword starts at `name_at` in `window` and record
/// it. Returns how far the direction's cursor advances within `window`.
fn scan_one(
    window: &str,
    name_at: usize,
    direction: Direction,
    options: &ParseOptions,
    frames: &mut FrameMap,
    signals: &mut Vec<Signal>,
) -> Result<usize, ParseError> {
    let name: String = window[name_at..]
        .trim_start()
        .chars()
        .take_while(|c| !c.is_whitespace() && *c != '{')
        .collect();

    let span = find_block(window, &format!("{direction} {name}"))?;
    let (frame, mut decoded) = decode_frame(span.slice(window), &name, direction)?;
    signals.append(&mut decoded);

    if frames.insert(frame).is_some() && options.strict_frames {
        return Err(ParseError::DuplicateFrame { direction, name });
    }
    Ok(span.resume())
}
