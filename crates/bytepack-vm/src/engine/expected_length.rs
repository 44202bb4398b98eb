//! Learned output-size estimate for one program.
//!
//! The estimate only sizes the initial output buffer. A low value costs a
//! reallocation inside the current invocation, a high value costs unused
//! memory; neither changes the output.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Monotonic max-tracking size hint, shared by every invocation of a program.
#[derive(Debug, Default)]
pub struct ExpectedLength(AtomicUsize);

impl ExpectedLength {
    pub fn new(initial: usize) -> Self {
        Self(AtomicUsize::new(initial))
    }

    /// Current estimate.
    #[inline]
    pub fn get(&self) -> usize {
        self.0.load(Ordering::Relaxed)
    }

    /// Record an observed output length.
    ///
    /// Raises the estimate to `observed` when it is larger and returns the
    /// value it replaced. Concurrent callers race benignly: the stored value
    /// is always the maximum ever observed.
    pub fn observe(&self, observed: usize) -> Option<usize> {
        // Skip the read-modify-write when the estimate already covers it.
        if observed <= self.get() {
            return None;
        }
        let previous = self.0.fetch_max(observed, Ordering::Relaxed);
        (observed > previous).then_some(previous)
    }
}
