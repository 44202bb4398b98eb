//! Execution frame: the register file shared by the root and its directives.
//!
//! One frame exists per invocation. Registers are initialized by the root,
//! mutated in place by directives, and read back once the program finishes.

use bytepack_core::CodeRange;

use super::error::EngineFault;
use super::invariants::fault;

/// Smallest physical length a grown output buffer gets.
pub const MIN_GROWTH: usize = 16;

/// Typed register set for one pack invocation.
///
/// Invariants (checked on every mutation, an engine fault otherwise):
/// - `source_position <= source_length <= source.len()`
/// - `output_position <= output.len()`
#[derive(Debug)]
pub struct PackFrame<'s, V> {
    source: &'s [V],
    source_length: usize,
    source_position: usize,
    output: Vec<u8>,
    output_position: usize,
    string_length: usize,
    string_code_range: CodeRange,
    taint: bool,
    /// Number of times `output` had to be reallocated. Not a register.
    reallocations: u32,
}

impl<'s, V> PackFrame<'s, V> {
    /// Create a frame over `source` with an output buffer of `expected_length`
    /// zeroed bytes.
    ///
    /// `source_length` must not exceed `source.len()`.
    pub fn new(source: &'s [V], source_length: usize, expected_length: usize) -> Self {
        if source_length > source.len() {
            fault(EngineFault::SourceLengthExceedsSource {
                declared: source_length,
                available: source.len(),
            });
        }
        Self {
            source,
            source_length,
            source_position: 0,
            output: vec![0; expected_length],
            output_position: 0,
            string_length: 0,
            string_code_range: CodeRange::Unknown,
            taint: false,
            reallocations: 0,
        }
    }

    // ------------------------------------------------------------------
    // Source registers
    // ------------------------------------------------------------------

    #[inline]
    pub fn source(&self) -> &'s [V] {
        &self.source[..self.source_length]
    }

    #[inline]
    pub fn source_length(&self) -> usize {
        self.source_length
    }

    #[inline]
    pub fn source_position(&self) -> usize {
        self.source_position
    }

    /// Elements not yet consumed.
    #[inline]
    pub fn remaining_source(&self) -> usize {
        self.source_length - self.source_position
    }

    /// Look at the next source element without consuming it.
    #[inline]
    pub fn peek_source(&self) -> Option<&'s V> {
        self.source().get(self.source_position)
    }

    /// Consume the next source element.
    ///
    /// Returns `None` once every element up to `source_length` was consumed;
    /// the cursor never moves past the end.
    pub fn next_source(&mut self) -> Option<&'s V> {
        let value = self.peek_source()?;
        self.source_position += 1;
        Some(value)
    }

    /// Move the source cursor to an absolute position.
    pub fn set_source_position(&mut self, position: usize) {
        if position > self.source_length {
            fault(EngineFault::SourcePositionOutOfRange {
                position,
                length: self.source_length,
            });
        }
        self.source_position = position;
    }

    // ------------------------------------------------------------------
    // Output registers
    // ------------------------------------------------------------------

    /// The whole physical buffer, including bytes past `output_position`.
    #[inline]
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Bytes written so far.
    #[inline]
    pub fn written(&self) -> &[u8] {
        &self.output[..self.output_position]
    }

    #[inline]
    pub fn output_position(&self) -> usize {
        self.output_position
    }

    /// Move the output cursor to an absolute position inside the buffer.
    ///
    /// Used to back-patch already written bytes. Moving past the physical
    /// buffer is a fault; use [`PackFrame::reserve`] or a write to grow it.
    pub fn set_output_position(&mut self, position: usize) {
        if position > self.output.len() {
            fault(EngineFault::OutputPositionOutOfRange {
                position,
                capacity: self.output.len(),
            });
        }
        self.output_position = position;
    }

    /// Append bytes at the output cursor, growing the buffer if needed.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        let end = self.output_position + bytes.len();
        self.ensure_capacity(end);
        self.output[self.output_position..end].copy_from_slice(bytes);
        self.output_position = end;
    }

    #[inline]
    pub fn write_byte(&mut self, byte: u8) {
        self.write_bytes(&[byte]);
    }

    /// Make room for `additional` bytes past the cursor without writing.
    pub fn reserve(&mut self, additional: usize) {
        self.ensure_capacity(self.output_position + additional);
    }

    /// Times the buffer was reallocated during this invocation.
    #[inline]
    pub fn reallocations(&self) -> u32 {
        self.reallocations
    }

    fn ensure_capacity(&mut self, required: usize) {
        if required <= self.output.len() {
            return;
        }
        let grown = required
            .max(self.output.len().saturating_mul(2))
            .max(MIN_GROWTH);
        self.output.resize(grown, 0);
        self.reallocations += 1;
    }

    // ------------------------------------------------------------------
    // String metadata registers
    // ------------------------------------------------------------------

    #[inline]
    pub fn string_length(&self) -> usize {
        self.string_length
    }

    pub fn set_string_length(&mut self, length: usize) {
        self.string_length = length;
    }

    pub fn add_string_length(&mut self, length: usize) {
        self.string_length += length;
    }

    #[inline]
    pub fn string_code_range(&self) -> CodeRange {
        self.string_code_range
    }

    /// Merge a classification into the register. Never downgrades.
    pub fn merge_code_range(&mut self, code_range: CodeRange) {
        self.string_code_range = self.string_code_range.merge(code_range);
    }

    /// Overwrite the register, for directives that discard written bytes.
    pub fn set_string_code_range(&mut self, code_range: CodeRange) {
        self.string_code_range = code_range;
    }

    #[inline]
    pub fn is_tainted(&self) -> bool {
        self.taint
    }

    /// Mark the output as derived from a tainted source value.
    pub fn taint(&mut self) {
        self.taint = true;
    }

    /// Give up the output buffer, consuming the frame.
    pub(crate) fn into_output(self) -> Vec<u8> {
        self.output
    }
}
