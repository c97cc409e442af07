//! ncf: a parser for LIN Node Capability Files (NCF).
//!
//! NCF is a brace-delimited text format describing network nodes, the
//! message frames they publish and subscribe, and the signals packed into
//! those frames. This crate parses that text into a [`Document`] tree of
//! nodes, frames, and signals for use by code generators and diagnostic
//! tooling.
//!
//! The parser is permissive where the format in the wild is loose: an
//! `encoding` block with an unrecognized type tag is dropped rather than
//! rejected, and a frame name reused within one direction overwrites the
//! earlier definition unless [`parser::ParseOptions::strict_frames`] is set.
//! Structural problems (an unterminated block, a missing required field)
//! always fail the whole parse; no partial document is ever returned.
//!
//! # Quick Start
//!
//! ```rust
//! use ncf::parser;
//! use ncf::{Direction, Encoding};
//!
//! let doc = parser::parse(r#"
//!     node ECU1 {
//!         NAD = 1;
//!         LIN_protocol = 2.1;
//!         bitrate = 19200;
//!         frames {
//!             publish Status {
//!                 message_ID = 0x10;
//!                 length = 4;
//!                 signals {
//!                     Speed {
//!                         publisher = ECU1; start_bit = 0; bit_length = 16;
//!                         encoding { physical_value, 0, 65535, 0, 100; }
//!                     }
//!                 }
//!             }
//!         }
//!     }
//! "#).unwrap();
//!
//! let status = doc.frame(Direction::Publish, "Status").unwrap();
//! assert_eq!(status.message_id, 0x10);
//!
//! let speed = doc.signal("Speed").unwrap();
//! assert!(matches!(speed.encoding, Some(Encoding::Physical { .. })));
//! ```
//!
//! To read straight from a `.ncf` file, use [`loader::load_file`].

pub mod error;
pub mod loader;
pub mod model;
pub mod parser;

pub use error::{LoadError, NcfError, ParseError};
pub use model::{Direction, Document, Encoding, Frame, FrameMap, Node, Signal};
