//! Directive contract between the root executor and the program tree.

use std::rc::Rc;
use std::sync::Arc;

use super::frame::PackFrame;

/// A node of a compiled pack program.
///
/// Programs are immutable and re-entrant: the same tree runs many
/// invocations, possibly on several threads at once, so all per-invocation
/// state lives in the [`PackFrame`].
///
/// Errors are the directive's own and travel back to the caller of
/// [`PackRoot::run`](super::PackRoot::run) untouched.
pub trait Directive<V> {
    type Error;

    /// Consume source values and write output through `frame`.
    fn execute(&self, frame: &mut PackFrame<'_, V>) -> Result<(), Self::Error>;
}

impl<V, D: Directive<V> + ?Sized> Directive<V> for &D {
    type Error = D::Error;

    #[inline]
    fn execute(&self, frame: &mut PackFrame<'_, V>) -> Result<(), Self::Error> {
        (**self).execute(frame)
    }
}

impl<V, D: Directive<V> + ?Sized> Directive<V> for Box<D> {
    type Error = D::Error;

    #[inline]
    fn execute(&self, frame: &mut PackFrame<'_, V>) -> Result<(), Self::Error> {
        (**self).execute(frame)
    }
}

impl<V, D: Directive<V> + ?Sized> Directive<V> for Rc<D> {
    type Error = D::Error;

    #[inline]
    fn execute(&self, frame: &mut PackFrame<'_, V>) -> Result<(), Self::Error> {
        (**self).execute(frame)
    }
}

impl<V, D: Directive<V> + ?Sized> Directive<V> for Arc<D> {
    type Error = D::Error;

    #[inline]
    fn execute(&self, frame: &mut PackFrame<'_, V>) -> Result<(), Self::Error> {
        (**self).execute(frame)
    }
}
