//! Result of one pack invocation.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use bytepack_core::{CodeRange, PackEncoding};

/// Packed bytes plus the metadata needed to expose them as binary or text.
///
/// The physical buffer may be longer than the logical output when it was
/// pre-sized from a generous estimate. Only the first `output_length` bytes
/// are payload; equality and serialization never look past them.
#[derive(Clone, Debug)]
pub struct PackResult {
    bytes: Vec<u8>,
    output_length: usize,
    string_length: usize,
    code_range: CodeRange,
    taint: bool,
    encoding: PackEncoding,
}

impl PackResult {
    pub(crate) fn new(
        bytes: Vec<u8>,
        output_length: usize,
        string_length: usize,
        code_range: CodeRange,
        taint: bool,
        encoding: PackEncoding,
    ) -> Self {
        debug_assert!(output_length <= bytes.len());
        Self {
            bytes,
            output_length,
            string_length,
            code_range,
            taint,
            encoding,
        }
    }

    /// The logical output.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.bytes[..self.output_length]
    }

    /// The physical buffer, trailing bytes included.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Take the payload, dropping any trailing bytes.
    pub fn into_payload(mut self) -> Vec<u8> {
        self.bytes.truncate(self.output_length);
        self.bytes
    }

    #[inline]
    pub fn output_length(&self) -> usize {
        self.output_length
    }

    /// Logical length: characters for text encodings, bytes otherwise.
    #[inline]
    pub fn string_length(&self) -> usize {
        self.string_length
    }

    #[inline]
    pub fn code_range(&self) -> CodeRange {
        self.code_range
    }

    #[inline]
    pub fn is_tainted(&self) -> bool {
        self.taint
    }

    #[inline]
    pub fn encoding(&self) -> PackEncoding {
        self.encoding
    }

    /// The payload as text, when the encoding is textual and the directives
    /// classified it as well-formed.
    pub fn as_text(&self) -> Option<&str> {
        if !self.encoding.is_text() || !self.code_range.is_text_safe() {
            return None;
        }
        std::str::from_utf8(self.payload()).ok()
    }
}

impl PartialEq for PackResult {
    fn eq(&self, other: &Self) -> bool {
        self.payload() == other.payload()
            && self.string_length == other.string_length
            && self.code_range == other.code_range
            && self.taint == other.taint
            && self.encoding == other.encoding
    }
}

impl Eq for PackResult {}

impl Serialize for PackResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = serializer.serialize_struct("PackResult", 6)?;
        s.serialize_field("bytes", self.payload())?;
        s.serialize_field("output_length", &self.output_length)?;
        s.serialize_field("string_length", &self.string_length)?;
        s.serialize_field("code_range", &self.code_range)?;
        s.serialize_field("taint", &self.taint)?;
        s.serialize_field("encoding", &self.encoding)?;
        s.end()
    }
}
