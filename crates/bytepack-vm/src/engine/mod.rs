//! Runtime engine for executing compiled pack programs.
//!
//! The root initializes a frame, hands it to the directive tree, then reads
//! the final registers back into a result.

mod directive;
mod error;
mod expected_length;
mod frame;
mod invariants;
mod result;
mod root;
mod trace;


pub use directive::Directive;
pub use error::EngineFault;
pub use expected_length::ExpectedLength;
pub use frame::{MIN_GROWTH, PackFrame};
pub use result::PackResult;
pub use root::{PackRoot, PackRootBuilder};
pub use trace::{NoopTracer, PrintTracer, Tracer};
