#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Execution engine for compiled bytepack programs.
//!
//! A program is a tree of [`Directive`]s. [`PackRoot`] runs it once per
//! invocation against a fresh [`PackFrame`], learns how large the output
//! tends to be, and assembles a [`PackResult`].

pub mod engine;

// Re-export commonly used items at crate root
pub use engine::{
    Directive, EngineFault, ExpectedLength, MIN_GROWTH, NoopTracer, PackFrame, PackResult,
    PackRoot, PackRootBuilder, PrintTracer, Tracer,
};

pub use bytepack_core::{CodeRange, Colors, PackEncoding};
