//! Nodes run directly against a frame, without a root.

use bytepack_core::CodeRange;
use bytepack_vm::{Directive, PackFrame};

use crate::{Count, DirectiveError, Endian, IntWidth, Node, SourceValue};

/// Written bytes and text registers left by one node.
#[derive(Debug)]
struct Run {
    written: Vec<u8>,
    string_length: usize,
    code_range: CodeRange,
    tainted: bool,
}

fn run(node: &Node, source: &[SourceValue]) -> Result<Run, DirectiveError> {
    let mut frame = PackFrame::new(source, source.len(), 0);
    node.execute(&mut frame)?;
    Ok(Run {
        written: frame.written().to_vec(),
        string_length: frame.string_length(),
        code_range: frame.string_code_range(),
        tainted: frame.is_tainted(),
    })
}

fn bytes_of(node: &Node, source: &[SourceValue]) -> Vec<u8> {
    run(node, source).unwrap().written
}

#[test]
fn integer_widths_and_byte_orders() {
    let v = [SourceValue::int(0x0102_0304)];
    let be1 = Node::int(IntWidth::W1, Endian::Big);
    let be2 = Node::int(IntWidth::W2, Endian::Big);
    let le2 = Node::int(IntWidth::W2, Endian::Little);
    let be4 = Node::int(IntWidth::W4, Endian::Big);
    let le8 = Node::int(IntWidth::W8, Endian::Little);

    assert_eq!(bytes_of(&be1, &v), [0x04]);
    assert_eq!(bytes_of(&be2, &v), [0x03, 0x04]);
    assert_eq!(bytes_of(&le2, &v), [0x04, 0x03]);
    assert_eq!(bytes_of(&be4, &v), [0x01, 0x02, 0x03, 0x04]);
    assert_eq!(bytes_of(&le8, &v), [0x04, 0x03, 0x02, 0x01, 0, 0, 0, 0]);
}

#[test]
fn negative_integers_use_twos_complement() {
    let be2 = Node::int(IntWidth::W2, Endian::Big);
    assert_eq!(bytes_of(&be2, &[SourceValue::int(-2)]), [0xff, 0xfe]);
}

#[test]
fn integers_do_not_count_as_characters() {
    let be2 = Node::int(IntWidth::W2, Endian::Big);
    let out = run(&be2, &[SourceValue::int(6)]).unwrap();

    assert_eq!(out.string_length, 0);
    assert_eq!(out.code_range, CodeRange::SevenBit);
}

#[test]
fn bytes_count_modes() {
    let v = [SourceValue::str("abc")];
    assert_eq!(bytes_of(&Node::bytes(Count::All), &v), b"abc");
    assert_eq!(bytes_of(&Node::bytes(Count::Exactly(2)), &v), b"ab");
    assert_eq!(bytes_of(&Node::bytes(Count::Exactly(5)), &v), b"abc\0\0");
}

#[test]
fn utf8_string_counts_characters() {
    let source = [SourceValue::str("héllo")];
    let out = run(&Node::Utf8String, &source).unwrap();

    assert_eq!(out.written, "héllo".as_bytes());
    assert_eq!(out.string_length, 5);
    assert_eq!(out.code_range, CodeRange::Valid);
    assert!(!out.tainted);
}

#[test]
fn malformed_text_counts_bytes_and_breaks_range() {
    let source = [SourceValue::bytes(vec![b'a', 0xff])];
    let out = run(&Node::Utf8String, &source).unwrap();

    assert_eq!(out.string_length, 2);
    assert_eq!(out.code_range, CodeRange::Broken);
}

#[test]
fn tainted_string_taints_frame() {
    let source = [SourceValue::tainted_str("x")];
    assert!(run(&Node::Utf8String, &source).unwrap().tainted);
    assert!(SourceValue::str("y").with_taint().is_tainted());
    assert!(!SourceValue::int(1).with_taint().is_tainted());
}

#[test]
fn length_prefix_overflow() {
    let long = [SourceValue::bytes(vec![b'a'; 256])];
    let be1 = Node::length_prefixed(IntWidth::W1, Endian::Big);

    let err = run(&be1, &long).unwrap_err();
    assert_eq!(
        err,
        DirectiveError::IntegerOutOfRange {
            value: 256,
            width: 1,
        }
    );
    assert_eq!(err.to_string(), "length 256 does not fit in 1 bytes");
}

#[test]
fn missing_and_mistyped_values() {
    let node = Node::seq([Node::Utf8String, Node::Utf8String]);
    let err = run(&node, &[SourceValue::str("a")]).unwrap_err();
    assert_eq!(err, DirectiveError::TooFewArguments { position: 1 });

    let three = [SourceValue::int(3)];
    let err = run(&Node::Utf8String, &three).unwrap_err();
    assert_eq!(
        err,
        DirectiveError::ExpectedString {
            position: 0,
            found: "integer",
        }
    );
    assert_eq!(
        err.to_string(),
        "expected string at source position 0, found integer"
    );

    let be1 = Node::int(IntWidth::W1, Endian::Big);
    let err = run(&be1, &[SourceValue::Nil]).unwrap_err();
    assert_eq!(
        err,
        DirectiveError::ExpectedInteger {
            position: 0,
            found: "nil",
        }
    );
}

#[test]
fn repeat_and_star() {
    let source = [
        SourceValue::int(1),
        SourceValue::int(2),
        SourceValue::int(3),
    ];
    let byte = Node::int(IntWidth::W1, Endian::Big);

    assert_eq!(bytes_of(&Node::repeat(2, byte.clone()), &source), [1, 2]);
    assert_eq!(bytes_of(&Node::star(byte), &source), [1, 2, 3]);
}

#[test]
fn star_stops_when_body_consumes_nothing() {
    let source = [SourceValue::int(1)];
    assert_eq!(bytes_of(&Node::star(Node::NullBytes(1)), &source), [0]);
}

#[test]
fn cursor_movement() {
    let source = [SourceValue::str("abcd")];

    let back = Node::seq([Node::bytes(Count::All), Node::Back(2), Node::NullBytes(1)]);
    assert_eq!(bytes_of(&back, &source), b"ab\0");

    let at = Node::seq([Node::bytes(Count::All), Node::At(6)]);
    assert_eq!(bytes_of(&at, &source), b"abcd\0\0");

    let truncate = Node::seq([Node::bytes(Count::All), Node::At(1)]);
    assert_eq!(bytes_of(&truncate, &source), b"a");

    let err = run(&Node::Back(1), &[]).unwrap_err();
    assert_eq!(err, DirectiveError::NegativeOffset { by: 1, position: 0 });
}

#[test]
fn back_into_a_character_breaks_the_range() {
    let node = Node::seq([Node::Utf8String, Node::Back(1)]);
    let out = run(&node, &[SourceValue::str("é")]).unwrap();

    assert_eq!(out.written, [0xc3]);
    assert_eq!(out.string_length, 1);
    assert_eq!(out.code_range, CodeRange::Broken);
}

#[test]
fn at_start_clears_text_registers() {
    let node = Node::seq([Node::Utf8String, Node::At(0)]);
    let out = run(&node, &[SourceValue::str("héllo")]).unwrap();

    assert!(out.written.is_empty());
    assert_eq!(out.string_length, 0);
    assert_eq!(out.code_range, CodeRange::Unknown);
}

#[test]
fn back_past_text_reclassifies_what_remains() {
    let node = Node::seq([Node::Utf8String, Node::Utf8String, Node::Back(2)]);
    let source = [SourceValue::str("ab"), SourceValue::str("é")];
    let out = run(&node, &source).unwrap();

    assert_eq!(out.written, b"ab");
    assert_eq!(out.string_length, 2);
    assert_eq!(out.code_range, CodeRange::SevenBit);
}

#[test]
fn at_forward_keeps_text_registers() {
    let node = Node::seq([Node::Utf8String, Node::At(4)]);
    let out = run(&node, &[SourceValue::str("é")]).unwrap();

    assert_eq!(out.written, b"\xc3\xa9\0\0");
    assert_eq!(out.string_length, 1);
    assert_eq!(out.code_range, CodeRange::Valid);
}

#[test]
fn zero_length_back_keeps_text_registers() {
    let prefixed = Node::length_prefixed(IntWidth::W1, Endian::Big);
    let node = Node::seq([prefixed, Node::Back(0)]);
    let out = run(&node, &[SourceValue::str("é")]).unwrap();

    assert_eq!(out.written, b"\x02\xc3\xa9");
    assert_eq!(out.string_length, 1);
}
