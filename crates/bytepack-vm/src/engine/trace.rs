//! Tracing hooks for pack invocations.
//!
//! The root calls a [`Tracer`] at fixed points of every invocation. With
//! [`NoopTracer`] every hook is an empty `#[inline(always)]` function and the
//! calls compile away; [`PrintTracer`] collects a readable log instead.

use bytepack_core::{Colors, PackEncoding};

use super::frame::PackFrame;

/// Instrumentation points of [`PackRoot::run_with`](super::PackRoot::run_with).
pub trait Tracer {
    /// Called once the frame is initialized, before the program runs.
    fn trace_enter(
        &mut self,
        description: &str,
        encoding: PackEncoding,
        source_length: usize,
        expected_length: usize,
    );

    /// Called when the program finished and the registers are final.
    fn trace_exit<V>(&mut self, frame: &PackFrame<'_, V>);

    /// Called when the program returned an error, before the frame is dropped.
    fn trace_failure<V>(&mut self, frame: &PackFrame<'_, V>);

    /// Called when an invocation raised the program's size estimate.
    fn trace_expected_length(&mut self, previous: usize, observed: usize);
}

/// Tracer that records nothing.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_enter(
        &mut self,
        _description: &str,
        _encoding: PackEncoding,
        _source_length: usize,
        _expected_length: usize,
    ) {
    }

    #[inline(always)]
    fn trace_exit<V>(&mut self, _frame: &PackFrame<'_, V>) {}

    #[inline(always)]
    fn trace_failure<V>(&mut self, _frame: &PackFrame<'_, V>) {}

    #[inline(always)]
    fn trace_expected_length(&mut self, _previous: usize, _observed: usize) {}
}

/// Tracer that collects one line per event.
#[derive(Debug, Default)]
pub struct PrintTracer {
    lines: Vec<String>,
    colors: Colors,
}

impl PrintTracer {
    pub fn new(colors: Colors) -> Self {
        Self {
            lines: Vec::new(),
            colors,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// All collected lines, newline separated.
    pub fn dump(&self) -> String {
        self.lines.join("\n")
    }

    fn registers<V>(&self, label: &str, frame: &PackFrame<'_, V>) -> String {
        let c = &self.colors;
        format!(
            "  {dim}{label}{reset} {blue}source{reset}={}/{} {blue}output{reset}={}/{} \
             {blue}string{reset}={} {blue}range{reset}={} {blue}taint{reset}={} \
             {blue}grown{reset}={}",
            frame.source_position(),
            frame.source_length(),
            frame.output_position(),
            frame.output().len(),
            frame.string_length(),
            frame.string_code_range(),
            frame.is_tainted(),
            frame.reallocations(),
            dim = c.dim,
            blue = c.blue,
            reset = c.reset,
        )
    }
}

impl Tracer for PrintTracer {
    fn trace_enter(
        &mut self,
        description: &str,
        encoding: PackEncoding,
        source_length: usize,
        expected_length: usize,
    ) {
        let c = &self.colors;
        self.lines.push(format!(
            "{dim}pack{reset} {green}{description:?}{reset} {green}{encoding}{reset} \
             {blue}source{reset}={source_length} {blue}expected{reset}={expected_length}",
            dim = c.dim,
            green = c.green,
            blue = c.blue,
            reset = c.reset,
        ));
    }

    fn trace_exit<V>(&mut self, frame: &PackFrame<'_, V>) {
        let line = self.registers("exit", frame);
        self.lines.push(line);
    }

    fn trace_failure<V>(&mut self, frame: &PackFrame<'_, V>) {
        let line = self.registers("fail", frame);
        self.lines.push(line);
    }

    fn trace_expected_length(&mut self, previous: usize, observed: usize) {
        let c = &self.colors;
        self.lines.push(format!(
            "  {yellow}expected{reset} {previous} -> {observed}",
            yellow = c.yellow,
            reset = c.reset,
        ));
    }
}
