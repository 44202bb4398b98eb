//! Source values consumed by the reference nodes.

/// One element of a pack source sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceValue {
    Nil,
    Integer(i64),
    /// Byte string. `tainted` marks values of untrusted provenance.
    Str {
        bytes: Vec<u8>,
        tainted: bool,
    },
}

impl SourceValue {
    pub fn int(value: i64) -> Self {
        Self::Integer(value)
    }

    pub fn str(s: &str) -> Self {
        Self::bytes(s.as_bytes())
    }

    pub fn tainted_str(s: &str) -> Self {
        Self::Str {
            bytes: s.as_bytes().to_vec(),
            tainted: true,
        }
    }

    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Str {
            bytes: bytes.into(),
            tainted: false,
        }
    }

    /// Mark this value as tainted. No-op for non-strings.
    pub fn with_taint(mut self) -> Self {
        if let Self::Str { tainted, .. } = &mut self {
            *tainted = true;
        }
        self
    }

    pub fn is_tainted(&self) -> bool {
        matches!(self, Self::Str { tainted: true, .. })
    }

    /// Kind name used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Integer(_) => "integer",
            Self::Str { .. } => "string",
        }
    }
}
