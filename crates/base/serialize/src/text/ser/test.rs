//! Tests for the text serializer implementation.

use super::*;
use crate::ser::Serialize;

/// Helper function to create a serializer and run a test with it
fn with_serializer<F>(style: Style, f: F) -> String
where
    F: FnOnce(&mut TextSerializer<Vec<u8>>) -> Result<(), Error>,
{
    let mut serializer = TextSerializer::new(Vec::new(), style);
    f(&mut serializer).unwrap();
    String::from_utf8(serializer.finish().unwrap()).unwrap()
}

#[test]
fn primitives() {
    let text = with_serializer(Style::Compact, |s| {
        42u8.serialize(s)?;
        (-42i32).serialize(s)?;
        u64::MAX.serialize(s)?;
        true.serialize(s)?;
        false.serialize(s)?;
        "hello".serialize(s)
    });

    assert_eq!(text, "42 -42 18446744073709551615 true false \"hello\n");
}

#[test]
fn strings_are_single_tokens() {
    let text = with_serializer(Style::Compact, |s| {
        "".serialize(s)?;
        String::from("two words\tand\na \\ backslash").serialize(s)
    });

    assert_eq!(text, "\" \"two\\swords\\tand\\na\\s\\\\\\sbackslash\n");
}

#[test]
fn pretty_nested_blocks() {
    let text = with_serializer(Style::Pretty { indent: 2 }, |s| {
        s.begin_block("Outer")?;
        s.begin_block("Inner")?;
        s.emit_token("#")?;
        s.emit_u64(1)?;
        s.end_line()?;
        s.emit_i64(3)?;
        s.end_line()?;
        s.end_block()?;
        s.emit_i64(2)?;
        s.end_line()?;
        s.end_block()
    });

    assert_eq!(
        text,
        "Outer {\n  Inner {\n    # 1\n    3\n  }\n  2\n}\n"
    );
}

#[test]
fn pretty_without_indent() {
    let text = with_serializer(Style::Pretty { indent: 0 }, |s| {
        s.begin_block("Beacon")?;
        s.end_block()
    });

    assert_eq!(text, "Beacon {\n}\n");
}

#[test]
fn compact_nested_blocks() {
    let text = with_serializer(Style::Compact, |s| {
        s.begin_block("Outer")?;
        s.begin_block("Inner")?;
        s.end_line()?;
        s.end_block()?;
        s.emit_i64(2)?;
        s.end_block()
    });

    assert_eq!(text, "Outer { Inner { } 2 }\n");
}

#[test]
fn depth_tracks_blocks() {
    let mut serializer = TextSerializer::new(Vec::new(), Style::default());

    serializer.begin_block("A").unwrap();
    serializer.begin_block("B").unwrap();
    assert_eq!(serializer.depth(), 2);

    serializer.end_block().unwrap();
    serializer.end_block().unwrap();
    assert_eq!(serializer.depth(), 0);
}

#[test]
fn empty_output() {
    let text = with_serializer(Style::Compact, |_| Ok(()));

    assert!(text.is_empty());
}

#[test]
fn writer_sees_output_so_far() {
    let mut serializer = TextSerializer::new(Vec::new(), Style::Compact);

    serializer.begin_block("Chain").unwrap();
    serializer.emit_i64(7).unwrap();
    assert_eq!(serializer.writer().as_slice(), b"Chain { 7");

    serializer.end_block().unwrap();
    assert_eq!(serializer.into_inner(), b"Chain { 7 }");
}
