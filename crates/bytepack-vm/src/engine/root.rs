//! Root executor: runs a program once per invocation and assembles the result.

use std::fmt;

use bytepack_core::PackEncoding;

use super::directive::Directive;
use super::expected_length::ExpectedLength;
use super::frame::PackFrame;
use super::result::PackResult;
use super::trace::{NoopTracer, Tracer};

/// The root of a compiled pack program.
///
/// Owns the directive tree and the program's learned output-size estimate.
/// `run` takes `&self`, so one root can serve concurrent invocations; each
/// invocation gets its own [`PackFrame`].
pub struct PackRoot<P> {
    description: String,
    program: P,
    expected_length: ExpectedLength,
}

/// Builder for [`PackRoot`].
pub struct PackRootBuilder<P> {
    description: String,
    program: P,
    expected_length: usize,
}

impl<P> PackRootBuilder<P> {
    pub fn new(program: P) -> Self {
        Self {
            description: String::new(),
            program,
            expected_length: 0,
        }
    }

    /// Set the format description the program was compiled from.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Seed the output-size estimate (default: 0).
    pub fn expected_length(mut self, length: usize) -> Self {
        self.expected_length = length;
        self
    }

    pub fn build(self) -> PackRoot<P> {
        PackRoot {
            description: self.description,
            program: self.program,
            expected_length: ExpectedLength::new(self.expected_length),
        }
    }
}

impl<P> PackRoot<P> {
    pub fn new(description: impl Into<String>, program: P) -> Self {
        Self::builder(program).description(description).build()
    }

    pub fn builder(program: P) -> PackRootBuilder<P> {
        PackRootBuilder::new(program)
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn program(&self) -> &P {
        &self.program
    }

    /// Current output-size estimate used to pre-size new frames.
    pub fn expected_length(&self) -> usize {
        self.expected_length.get()
    }

    /// Run the program over the first `source_length` values of `source`.
    ///
    /// Directive errors are returned unchanged; no result is produced for a
    /// failed invocation. Register invariant violations panic.
    pub fn run<V>(
        &self,
        source: &[V],
        source_length: usize,
        encoding: PackEncoding,
    ) -> Result<PackResult, P::Error>
    where
        P: Directive<V>,
    {
        self.run_with(source, source_length, encoding, &mut NoopTracer)
    }

    /// Run the program over every value of `source`.
    pub fn run_all<V>(&self, source: &[V], encoding: PackEncoding) -> Result<PackResult, P::Error>
    where
        P: Directive<V>,
    {
        self.run(source, source.len(), encoding)
    }

    /// Run the program, reporting execution events to `tracer`.
    pub fn run_with<V, T: Tracer>(
        &self,
        source: &[V],
        source_length: usize,
        encoding: PackEncoding,
        tracer: &mut T,
    ) -> Result<PackResult, P::Error>
    where
        P: Directive<V>,
    {
        let expected = self.expected_length.get();
        let mut frame = PackFrame::new(source, source_length, expected);
        tracer.trace_enter(&self.description, encoding, source_length, expected);

        if let Err(e) = self.program.execute(&mut frame) {
            tracer.trace_failure(&frame);
            tracing::trace!(
                program = %self.description,
                source_position = frame.source_position(),
                "pack failed"
            );
            return Err(e);
        }

        frame.ensure_registers();
        tracer.trace_exit(&frame);

        let output_length = frame.output_position();
        if let Some(previous) = self.expected_length.observe(output_length) {
            tracing::debug!(
                program = %self.description,
                previous,
                observed = output_length,
                "expected length raised"
            );
            tracer.trace_expected_length(previous, output_length);
        }

        let taint = frame.is_tainted();
        let code_range = frame.string_code_range();
        let string_length = if encoding.is_text() {
            frame.string_length()
        } else {
            output_length
        };

        tracing::trace!(
            program = %self.description,
            %encoding,
            output_length,
            string_length,
            %code_range,
            taint,
            reallocations = frame.reallocations(),
            "pack finished"
        );

        Ok(PackResult::new(
            frame.into_output(),
            output_length,
            string_length,
            code_range,
            taint,
            encoding,
        ))
    }
}

impl<P> fmt::Display for PackRoot<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

impl<P> fmt::Debug for PackRoot<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackRoot")
            .field("description", &self.description)
            .field("expected_length", &self.expected_length.get())
            .finish_non_exhaustive()
    }
}
