//! Engine faults.
//!
//! A fault means the frame and the directive tree disagree about the shape
//! or bounds of the registers. It is a bug, never a user error, so faults
//! are raised as panics and never travel through `Result`.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineFault {
    /// Caller declared more source elements than it supplied.
    #[error("source length {declared} exceeds the {available} supplied source values")]
    SourceLengthExceedsSource { declared: usize, available: usize },

    /// Source cursor moved past the declared source length.
    #[error("source position {position} is past source length {length}")]
    SourcePositionOutOfRange { position: usize, length: usize },

    /// Output cursor moved past the physical buffer.
    #[error("output position {position} is past buffer capacity {capacity}")]
    OutputPositionOutOfRange { position: usize, capacity: usize },
}
