#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core value types shared by the bytepack engine and its directive nodes.
//!
//! - [`CodeRange`]: lattice describing how safely a byte run reads as text
//! - [`PackEncoding`]: encoding tag deciding how logical length is computed
//! - [`Colors`]: ANSI palette for trace output

mod code_range;
mod colors;
mod encoding;


pub use code_range::CodeRange;
pub use colors::Colors;
pub use encoding::PackEncoding;
