//! Code range lattice.
//!
//! Classifies a byte run by how safely it can be interpreted as text.
//! Values form a total order and directives combine them with
//! [`CodeRange::merge`], so the register only ever moves up.

use std::fmt;

use serde::{Serialize, Serializer};

/// How safe the produced bytes are to read as text.
///
/// Ordered by severity: `Unknown < SevenBit < Valid < Broken`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CodeRange {
    /// Nothing classified yet.
    #[default]
    Unknown,
    /// Every byte is below 0x80.
    SevenBit,
    /// Well-formed multi-byte text with code points at or above 0x80.
    Valid,
    /// Malformed encoded sequences present.
    Broken,
}

impl CodeRange {
    /// Combine two classifications: the more severe one wins.
    ///
    /// Commutative, associative and idempotent. `Unknown` is the identity.
    #[inline]
    pub fn merge(self, other: Self) -> Self {
        self.max(other)
    }

    /// Classify a UTF-8 byte run.
    ///
    /// An empty run stays `Unknown` so it never raises the register.
    pub fn scan(bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            return Self::Unknown;
        }
        if bytes.is_ascii() {
            return Self::SevenBit;
        }
        match std::str::from_utf8(bytes) {
            Ok(_) => Self::Valid,
            Err(_) => Self::Broken,
        }
    }

    /// Decode from the compact byte representation.
    pub fn from_byte(b: u8) -> Self {
        match b {
            0 => Self::Unknown,
            1 => Self::SevenBit,
            2 => Self::Valid,
            3 => Self::Broken,
            _ => panic!("invalid code range byte: {b}"),
        }
    }

    /// Encode to the compact byte representation.
    pub fn to_byte(self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::SevenBit => 1,
            Self::Valid => 2,
            Self::Broken => 3,
        }
    }

    /// Short name used in traces and serialized results.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::SevenBit => "7bit",
            Self::Valid => "valid",
            Self::Broken => "broken",
        }
    }

    /// True when the bytes can be exposed as text without re-scanning.
    pub fn is_text_safe(self) -> bool {
        self != Self::Broken
    }
}

impl fmt::Display for CodeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CodeRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
