//! End-to-end parsing tests over in-memory NCF text.

use pretty_assertions::assert_eq;

use ncf::parser::{self, ParseOptions};
use ncf::{Direction, Encoding, ParseError};

const MINIMAL: &str = r#"
node ECU1 {
    NAD = 1;
    LIN_protocol = 2.1;
    bitrate = 19200;
    frames {
        publish Status {
            message_ID = 0x10;
            length = 4;
            signals {
                Speed {
                    publisher = ECU1; start_bit = 0; bit_length = 16;
                    encoding { physical_value, 0, 65535, 0, 100; }
                }
            }
        }
    }
}
"#;

#[test]
fn test_minimal_document() {
    let doc = parser::parse(MINIMAL).unwrap();

    assert_eq!(doc.nodes.len(), 1);
    let node = doc.node("ECU1").unwrap();
    assert_eq!(node.nad, "1");
    assert_eq!(node.lin_protocol, "2.1");
    assert_eq!(node.bitrate, "19200");
    assert_eq!(node.publishes, vec!["Status".to_string()]);
    assert!(node.subscribes.is_empty());

    let status = doc.frame(Direction::Publish, "Status").unwrap();
    assert_eq!(status.message_id, 0x10);
    assert_eq!(status.length, 4);
    assert_eq!(status.signals, vec!["Speed".to_string()]);

    let speed = doc.signal("Speed").unwrap();
    assert_eq!(speed.publisher, "ECU1");
    assert_eq!(speed.start_bit, 0);
    assert_eq!(speed.bit_length, 16);
    // Position 3 of the physical segment is reserved and skipped.
    assert_eq!(
        speed.encoding,
        Some(Encoding::Physical {
            min: "0".into(),
            max: "65535".into(),
            init: "100".into(),
        })
    );
}

#[test]
fn test_parse_is_deterministic() {
    let first = parser::parse(MINIMAL).unwrap();
    let second = parser::parse(MINIMAL).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_empty_signals_block_is_valid() {
    let text = r#"
        node ECU1 {
            NAD = 1; LIN_protocol = 2.1; bitrate = 19200;
            frames {
                publish Heartbeat { message_ID = 1; length = 1; signals { } }
            }
        }
    "#;
    let doc = parser::parse(text).unwrap();
    let frame = doc.frame(Direction::Publish, "Heartbeat").unwrap();
    assert!(frame.signals.is_empty());
    assert!(doc.signals.is_empty());
}

#[test]
fn test_unrecognized_encoding_type_is_dropped_not_fatal() {
    let text = r#"
        node ECU1 {
            NAD = 1; LIN_protocol = 2.1; bitrate = 19200;
            frames {
                publish Status {
                    message_ID = 0x10; length = 4;
                    signals {
                        Blob {
                            publisher = ECU1; start_bit = 0; bit_length = 8;
                            encoding { raw_value, 0, 255; }
                        }
                        Speed {
                            publisher = ECU1; start_bit = 8; bit_length = 16;
                            encoding { physical_value, 0, 65535, 0, 100; }
                        }
                    }
                }
            }
        }
    "#;
    let doc = parser::parse(text).unwrap();

    let blob = doc.signal("Blob").unwrap();
    assert_eq!(blob.encoding, None);

    // The rest of the document parses unaffected.
    let speed = doc.signal("Speed").unwrap();
    assert!(matches!(speed.encoding, Some(Encoding::Physical { .. })));
}

#[test]
fn test_missing_frames_section_fails_whole_parse() {
    let text = "node ECU1 { NAD = 1; LIN_protocol = 2.1; bitrate = 19200; }";
    let err = parser::parse(text).unwrap_err();
    assert!(matches!(err, ParseError::NotFound { .. }));
}

#[test]
fn test_unterminated_block_fails() {
    let text = "node ECU1 { NAD = 1; frames { publish A { message_ID = 1;";
    let err = parser::parse(text).unwrap_err();
    assert!(matches!(err, ParseError::UnterminatedBlock { .. }));
}

#[test]
fn test_zero_nodes_parse_to_empty_document() {
    let doc = parser::parse("node_capability_file;\n").unwrap();
    assert!(doc.nodes.is_empty());
    assert!(doc.frames.is_empty());
    assert!(doc.signals.is_empty());
}

#[test]
fn test_no_orphans_between_nodes_and_global_maps() {
    let text = two_node_document();
    let doc = parser::parse(&text).unwrap();

    // Walk every node: each referenced frame must exist globally, and each
    // frame's signals must exist in the global signal map.
    let mut reachable_frames = 0;
    let mut reachable_signals: Vec<&str> = Vec::new();
    for node in doc.nodes.values() {
        for name in &node.publishes {
            let frame = doc.frame(Direction::Publish, name).unwrap();
            reachable_frames += 1;
            for signal in &frame.signals {
                assert!(doc.signal(signal).is_some());
                reachable_signals.push(signal);
            }
        }
        for name in &node.subscribes {
            let frame = doc.frame(Direction::Subscribe, name).unwrap();
            reachable_frames += 1;
            for signal in &frame.signals {
                assert!(doc.signal(signal).is_some());
                reachable_signals.push(signal);
            }
        }
    }
    assert_eq!(reachable_frames, doc.frames.len());

    // And the reverse: no global signal is unreachable from every frame.
    reachable_signals.sort();
    reachable_signals.dedup();
    assert_eq!(reachable_signals.len(), doc.signals.len());
}

#[test]
fn test_signals_by_publisher_with_multiple_entries() {
    let text = two_node_document();
    let doc = parser::parse(&text).unwrap();

    let from_one = doc.signals_by_publisher("ECU1");
    let names: Vec<&str> = from_one.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Mode", "Speed"]);

    let from_two = doc.signals_by_publisher("ECU2");
    assert_eq!(from_two.len(), 1);
    assert_eq!(from_two[0].name, "Ack");

    assert!(doc.signals_by_publisher("NoSuchNode").is_empty());
}

#[test]
fn test_frames_by_publisher() {
    let text = two_node_document();
    let doc = parser::parse(&text).unwrap();

    let frames = doc.frames_by_publisher("ECU1");
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].name, "Status");
    assert_eq!(frames[0].direction, Direction::Publish);

    assert!(doc.frames_by_publisher("NoSuchNode").is_empty());
}

#[test]
fn test_logical_encoding_table() {
    let text = two_node_document();
    let doc = parser::parse(&text).unwrap();

    let mode = doc.signal("Mode").unwrap();
    let Some(Encoding::Logical(table)) = &mode.encoding else {
        panic!("expected logical encoding");
    };
    assert_eq!(table.get(&0).map(String::as_str), Some("idle"));
    assert_eq!(table.get(&5).map(String::as_str), Some("active"));
}

#[test]
fn test_strict_mode_rejects_duplicate_frame_names() {
    let text = r#"
        node ECU1 {
            NAD = 1; LIN_protocol = 2.1; bitrate = 19200;
            frames {
                publish Status { message_ID = 1; length = 1; signals { } }
                publish Status { message_ID = 2; length = 1; signals { } }
            }
        }
    "#;
    assert!(parser::parse(text).is_ok());

    let options = ParseOptions { strict_frames: true };
    let err = parser::parse_with_options(text, &options).unwrap_err();
    assert!(matches!(err, ParseError::DuplicateFrame { .. }));
}

#[cfg(feature = "serde")]
#[test]
fn test_document_serde_round_trip() {
    let doc = parser::parse(MINIMAL).unwrap();
    let json = serde_json::to_string(&doc).unwrap();
    let back: ncf::Document = serde_json::from_str(&json).unwrap();
    assert_eq!(doc, back);
}

/// Two nodes, signals with logical values not contiguous, a publish and a
/// matching subscribe side.
fn two_node_document() -> String {
    r#"
    node ECU1 {
        NAD = 1; LIN_protocol = 2.1; bitrate = 19200;
        frames {
            publish Status {
                message_ID = 0x10; length = 4;
                signals {
                    Speed {
                        publisher = ECU1; start_bit = 0; bit_length = 16;
                        encoding { physical_value, 0, 65535, 0, 100; }
                    }
                    Mode {
                        publisher = ECU1; start_bit = 16; bit_length = 4;
                        encoding {
                            logical_value, 0, "idle";
                            logical_value, 5, "active";
                        }
                    }
                }
            }
            subscribe Reply {
                message_ID = 0x11; length = 1;
                signals {
                    Ack {
                        publisher = ECU2; start_bit = 0; bit_length = 1;
                        encoding {
                            logical_value, 0, "no";
                            logical_value, 1, "yes";
                        }
                    }
                }
            }
        }
    }
    node ECU2 {
        NAD = 2; LIN_protocol = 2.1; bitrate = 19200;
        frames {
            publish Reply {
                message_ID = 0x11; length = 1;
                signals {
                    Ack {
                        publisher = ECU2; start_bit = 0; bit_length = 1;
                        encoding {
                            logical_value, 0, "no";
                            logical_value, 1, "yes";
                        }
                    }
                }
            }
            subscribe Status {
                message_ID = 0x10; length = 4;
                signals {
                    Speed {
                        publisher = ECU1; start_bit = 0; bit_length = 16;
                        encoding { physical_value, 0, 65535, 0, 100; }
                    }
                }
            }
        }
    }
    "#
    .to_string()
}
