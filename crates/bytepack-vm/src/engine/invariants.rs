//! Register invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use super::error::EngineFault;
use super::frame::PackFrame;

/// Abort the invocation with an engine fault.
#[cold]
#[track_caller]
pub(crate) fn fault(fault: EngineFault) -> ! {
    panic!("engine fault: {fault}")
}

impl<V> PackFrame<'_, V> {
    /// Re-check every register bound before the root reads them back.
    pub(crate) fn ensure_registers(&self) {
        if self.source_position() > self.source_length() {
            fault(EngineFault::SourcePositionOutOfRange {
                position: self.source_position(),
                length: self.source_length(),
            });
        }
        if self.output_position() > self.output().len() {
            fault(EngineFault::OutputPositionOutOfRange {
                position: self.output_position(),
                capacity: self.output().len(),
            });
        }
    }
}
