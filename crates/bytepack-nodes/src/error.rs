//! Errors raised by the reference nodes.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectiveError {
    /// A directive needed a source value but the source was exhausted.
    #[error("too few arguments: no source value at position {position}")]
    TooFewArguments { position: usize },

    #[error("expected integer at source position {position}, found {found}")]
    ExpectedInteger {
        position: usize,
        found: &'static str,
    },

    #[error("expected string at source position {position}, found {found}")]
    ExpectedString {
        position: usize,
        found: &'static str,
    },

    /// A length prefix too large for its field.
    #[error("length {value} does not fit in {width} bytes")]
    IntegerOutOfRange { value: u64, width: usize },

    #[error("cannot move back {by} bytes from output position {position}")]
    NegativeOffset { by: usize, position: usize },
}
