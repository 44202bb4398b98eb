//! Output encoding tags.

use std::fmt;

use serde::{Serialize, Serializer};

/// Encoding the packed output is tagged with.
///
/// Only text-oriented encodings have a logical length that can differ from
/// the byte length; for the rest every byte is one logical unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PackEncoding {
    /// No explicit encoding requested.
    #[default]
    Default,
    /// Raw binary.
    Ascii8Bit,
    /// 7-bit ASCII.
    UsAscii,
    /// UTF-8 text.
    Utf8,
}

impl PackEncoding {
    /// Whether logical length is a character count rather than a byte count.
    #[inline]
    pub fn is_text(self) -> bool {
        self == Self::Utf8
    }

    /// Canonical encoding name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Ascii8Bit => "ASCII-8BIT",
            Self::UsAscii => "US-ASCII",
            Self::Utf8 => "UTF-8",
        }
    }
}

impl fmt::Display for PackEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for PackEncoding {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}
