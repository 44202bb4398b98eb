//! Reference directive nodes for bytepack programs.
//!
//! Programs are built directly from [`Node`] values and executed by
//! [`bytepack_vm::PackRoot`] over a slice of [`SourceValue`]s.

mod error;
mod node;
mod value;

#[cfg(test)]
mod node_tests;

pub use error::DirectiveError;
pub use node::{Count, Endian, IntWidth, Node};
pub use value::SourceValue;
