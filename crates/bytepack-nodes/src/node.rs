//! Directive node tree.
//!
//! Every node consumes zero or more source values and appends to the frame's
//! output. Byte-emitting nodes merge the code range of what they wrote; only
//! text nodes (`Utf8String` and the body of `LengthPrefixed`) add to the
//! string length, so length prefixes and binary fields never count as
//! characters. Moving the cursor backward reclassifies the retained bytes.

use bytepack_core::CodeRange;
use bytepack_vm::{Directive, PackFrame};

use crate::error::DirectiveError;
use crate::value::SourceValue;

/// Byte order of an integer field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endian {
    Big,
    Little,
}

/// Width of an integer field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntWidth {
    W1,
    W2,
    W4,
    W8,
}

impl IntWidth {
    pub fn bytes(self) -> usize {
        match self {
            Self::W1 => 1,
            Self::W2 => 2,
            Self::W4 => 4,
            Self::W8 => 8,
        }
    }

    /// Largest unsigned value the field holds.
    pub fn max_unsigned(self) -> u64 {
        match self {
            Self::W8 => u64::MAX,
            _ => (1u64 << (8 * self.bytes())) - 1,
        }
    }
}

/// How many bytes of a string a `Bytes` node emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Count {
    /// The whole string.
    All,
    /// Exactly `n` bytes: truncated, or padded with NUL.
    Exactly(usize),
}

/// A node of a pack program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// Children in order.
    Sequence(Vec<Node>),
    /// `node` exactly `count` times.
    Repeat { count: usize, node: Box<Node> },
    /// `node` until the source is exhausted.
    Star(Box<Node>),
    /// One integer, two's complement truncated to `width`.
    Integer { width: IntWidth, endian: Endian },
    /// One string as raw bytes.
    Bytes { count: Count },
    /// One string as text.
    Utf8String,
    /// One string as text, preceded by its byte length.
    LengthPrefixed { width: IntWidth, endian: Endian },
    /// `n` zero bytes.
    NullBytes(usize),
    /// Move the output cursor back `n` bytes.
    Back(usize),
    /// Move the output cursor to absolute offset `n`, zero-filling forward.
    At(usize),
}

impl Node {
    pub fn seq(nodes: impl IntoIterator<Item = Node>) -> Self {
        Self::Sequence(nodes.into_iter().collect())
    }

    pub fn repeat(count: usize, node: Node) -> Self {
        Self::Repeat {
            count,
            node: Box::new(node),
        }
    }

    pub fn star(node: Node) -> Self {
        Self::Star(Box::new(node))
    }

    pub fn int(width: IntWidth, endian: Endian) -> Self {
        Self::Integer { width, endian }
    }

    pub fn bytes(count: Count) -> Self {
        Self::Bytes { count }
    }

    pub fn length_prefixed(width: IntWidth, endian: Endian) -> Self {
        Self::LengthPrefixed { width, endian }
    }
}

impl Directive<SourceValue> for Node {
    type Error = DirectiveError;

    fn execute(&self, frame: &mut PackFrame<'_, SourceValue>) -> Result<(), DirectiveError> {
        match self {
            Node::Sequence(nodes) => {
                for node in nodes {
                    node.execute(frame)?;
                }
            }
            Node::Repeat { count, node } => {
                for _ in 0..*count {
                    node.execute(frame)?;
                }
            }
            Node::Star(node) => {
                while frame.remaining_source() > 0 {
                    let before = frame.source_position();
                    node.execute(frame)?;
                    // a body that consumes nothing would spin forever
                    if frame.source_position() == before {
                        break;
                    }
                }
            }
            Node::Integer { width, endian } => {
                let value = next_integer(frame)?;
                emit_integer(frame, value, *width, *endian);
            }
            Node::Bytes { count } => {
                let bytes = next_string(frame)?;
                match *count {
                    Count::All => emit(frame, bytes),
                    Count::Exactly(n) if n <= bytes.len() => emit(frame, &bytes[..n]),
                    Count::Exactly(n) => {
                        emit(frame, bytes);
                        emit(frame, &vec![0; n - bytes.len()]);
                    }
                }
            }
            Node::Utf8String => {
                let bytes = next_string(frame)?;
                emit_text(frame, bytes);
            }
            Node::LengthPrefixed { width, endian } => {
                let bytes = next_string(frame)?;
                let length = bytes.len() as u64;
                if length > width.max_unsigned() {
                    return Err(DirectiveError::IntegerOutOfRange {
                        value: length,
                        width: width.bytes(),
                    });
                }
                emit_integer(frame, length as i64, *width, *endian);
                emit_text(frame, bytes);
            }
            Node::NullBytes(n) => emit(frame, &vec![0; *n]),
            Node::Back(n) => {
                let position = frame.output_position();
                if *n > position {
                    return Err(DirectiveError::NegativeOffset { by: *n, position });
                }
                rewind(frame, position - n);
            }
            Node::At(n) => {
                let position = frame.output_position();
                if *n > position {
                    emit(frame, &vec![0; n - position]);
                } else {
                    rewind(frame, *n);
                }
            }
        }
        Ok(())
    }
}

fn next_value<'s>(
    frame: &mut PackFrame<'s, SourceValue>,
) -> Result<&'s SourceValue, DirectiveError> {
    let position = frame.source_position();
    frame
        .next_source()
        .ok_or(DirectiveError::TooFewArguments { position })
}

fn next_integer(frame: &mut PackFrame<'_, SourceValue>) -> Result<i64, DirectiveError> {
    let position = frame.source_position();
    match next_value(frame)? {
        SourceValue::Integer(value) => Ok(*value),
        other => Err(DirectiveError::ExpectedInteger {
            position,
            found: other.kind_name(),
        }),
    }
}

/// Consume a string, propagating its taint into the frame.
fn next_string<'s>(frame: &mut PackFrame<'s, SourceValue>) -> Result<&'s [u8], DirectiveError> {
    let position = frame.source_position();
    match next_value(frame)? {
        SourceValue::Str { bytes, tainted } => {
            if *tainted {
                frame.taint();
            }
            Ok(bytes.as_slice())
        }
        other => Err(DirectiveError::ExpectedString {
            position,
            found: other.kind_name(),
        }),
    }
}

fn emit(frame: &mut PackFrame<'_, SourceValue>, bytes: &[u8]) {
    frame.write_bytes(bytes);
    frame.merge_code_range(CodeRange::scan(bytes));
}

fn emit_integer(
    frame: &mut PackFrame<'_, SourceValue>,
    value: i64,
    width: IntWidth,
    endian: Endian,
) {
    let n = width.bytes();
    match endian {
        Endian::Big => emit(frame, &value.to_be_bytes()[8 - n..]),
        Endian::Little => emit(frame, &value.to_le_bytes()[..n]),
    }
}

/// Emit bytes as text: characters count toward the string length.
fn emit_text(frame: &mut PackFrame<'_, SourceValue>, bytes: &[u8]) {
    emit(frame, bytes);
    frame.add_string_length(char_count(bytes));
}

/// Move the output cursor back to `position` and rescan what is left.
fn rewind(frame: &mut PackFrame<'_, SourceValue>, position: usize) {
    if position == frame.output_position() {
        return;
    }
    frame.set_output_position(position);
    let written = frame.written();
    let code_range = CodeRange::scan(written);
    let chars = char_count(written);
    frame.set_string_code_range(code_range);
    frame.set_string_length(chars);
}

/// Malformed text counts one character per byte.
fn char_count(bytes: &[u8]) -> usize {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.chars().count(),
        Err(_) => bytes.len(),
    }
}
