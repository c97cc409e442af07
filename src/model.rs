//! The in-memory model produced by parsing an NCF file.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Whether a frame is sent or received by the node that declares it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Publish,
    Subscribe,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Publish => f.write_str("publish"),
            Direction::Subscribe => f.write_str("subscribe"),
        }
    }
}

/// Interpretation rule for a signal's raw value.
///
/// A signal whose `encoding` block carries a type tag other than `logical` or
/// `physical` gets no `Encoding` at all (`Signal::encoding` is `None`). That
/// tolerance is deliberate and matches the format in the wild; see the crate
/// docs for the trade-off.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Encoding {
    /// Enumerated raw value to label mapping. Values need not be contiguous;
    /// a duplicate raw value overwrites the earlier label.
    Logical(BTreeMap<i64, String>),
    /// Numeric range. The values are kept as written in the source text
    /// (integer or floating format) since NCF carries no unit metadata here.
    Physical {
        min: String,
        max: String,
        init: String,
    },
}

/// A bit-field within a frame, owned by a publishing node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Signal {
    pub name: String,
    /// Name of the node that publishes this signal.
    pub publisher: String,
    pub start_bit: u32,
    pub bit_length: u32,
    pub encoding: Option<Encoding>,
}

/// A message frame with a numeric ID and byte length, composed of signals.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    pub name: String,
    pub direction: Direction,
    pub message_id: u64,
    pub length: u32,
    /// Signal names in declaration order; resolve via `Document::signals`.
    pub signals: Vec<String>,
}

/// A network participant with identity/protocol metadata.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub name: String,
    /// Node address. Kept as source text (may be hex- or decimal-formatted).
    pub nad: String,
    pub lin_protocol: String,
    pub bitrate: String,
    /// Names of frames this node publishes, sorted; resolve via
    /// `Document::frames`.
    pub publishes: Vec<String>,
    /// Names of frames this node subscribes to, sorted.
    pub subscribes: Vec<String>,
}

/// All frames of a document, keyed by direction then name.
///
/// Frame names are unique within a direction but may repeat across the
/// publish/subscribe split.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameMap {
    pub publish: HashMap<String, Frame>,
    pub subscribe: HashMap<String, Frame>,
}

impl FrameMap {
    pub fn get(&self, direction: Direction, name: &str) -> Option<&Frame> {
        self.side(direction).get(name)
    }

    /// Insert a frame under its own direction and name, returning the
    /// previous entry if the name was already taken in that direction.
    pub fn insert(&mut self, frame: Frame) -> Option<Frame> {
        let side = match frame.direction {
            Direction::Publish => &mut self.publish,
            Direction::Subscribe => &mut self.subscribe,
        };
        side.insert(frame.name.clone(), frame)
    }

    pub fn side(&self, direction: Direction) -> &HashMap<String, Frame> {
        match direction {
            Direction::Publish => &self.publish,
            Direction::Subscribe => &self.subscribe,
        }
    }

    pub fn len(&self) -> usize {
        self.publish.len() + self.subscribe.len()
    }

    pub fn is_empty(&self) -> bool {
        self.publish.is_empty() && self.subscribe.is_empty()
    }

    /// Iterate over all frames in both directions.
    pub fn iter(&self) -> impl Iterator<Item = &Frame> {
        self.publish.values().chain(self.subscribe.values())
    }
}

/// The root result of parsing one NCF text.
///
/// Frames and signals are indexed globally in addition to being referenced by
/// name from their nodes and frames. Both views describe the same set: every
/// frame/signal reachable from a node is present in the global maps and vice
/// versa.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    pub nodes: HashMap<String, Node>,
    pub frames: FrameMap,
    pub signals: HashMap<String, Signal>,
}

impl Document {
    /// Get a node by name.
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.get(name)
    }

    /// Get a frame by direction and name.
    pub fn frame(&self, direction: Direction, name: &str) -> Option<&Frame> {
        self.frames.get(direction, name)
    }

    /// Get a signal by name.
    pub fn signal(&self, name: &str) -> Option<&Signal> {
        self.signals.get(name)
    }

    /// All signals published by the given node, sorted by name.
    ///
    /// An unknown node name yields an empty list, not an error.
    pub fn signals_by_publisher(&self, node: &str) -> Vec<&Signal> {
        let mut found: Vec<&Signal> = self
            .signals
            .iter()
            .filter(|(_, signal)| signal.publisher == node)
            .map(|(_, signal)| signal)
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        found
    }

    /// All frames published by the given node, resolved through the node's
    /// publish list, sorted by name. An unknown node yields an empty list.
    pub fn frames_by_publisher(&self, node: &str) -> Vec<&Frame> {
        let Some(node) = self.nodes.get(node) else {
            return Vec::new();
        };
        node.publishes
            .iter()
            .filter_map(|name| self.frames.publish.get(name))
            .collect()
    }
}
