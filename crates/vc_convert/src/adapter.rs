//! Invocation adapters.
//!
//! Every hook kind is normalized into one of two operations:
//!
//! - [`Populate::populate`]: fill an existing `&mut T`.
//! - [`Construct::construct`]: return a new `T`.
//!
//! The resolver only ever calls these two, so its priority logic does not
//! depend on the calling convention of the hook behind them.

use core::fmt;

use crate::document::Document;
use crate::error::ConversionError;
use crate::hook::{ConstructFn, PopulateFn, Tag, TaggedFn, WriteFn};
use crate::hook::{ConstructFromDocument, DocumentFrom, DocumentInto};
use crate::hook::{PopulateFromDocument, ReadDocument};
use crate::priority::HookKind;

// -----------------------------------------------------------------------------
// Shape adapters

/// [`ReadDocument`] as a [`PopulateFn`].
pub fn instance_method<T: ReadDocument<D>, D: Document>(
    target: &mut T,
    doc: &D,
) -> Result<(), ConversionError> {
    target.read_document(doc)
}

/// [`PopulateFromDocument`] as a [`PopulateFn`].
pub fn static_mutator<T: PopulateFromDocument<D>, D: Document>(
    target: &mut T,
    doc: &D,
) -> Result<(), ConversionError> {
    T::populate_from_document(doc, target)
}

/// [`DocumentInto`] as a [`PopulateFn`].
pub fn free_function<T, D: DocumentInto<T>>(
    target: &mut T,
    doc: &D,
) -> Result<(), ConversionError> {
    doc.read_into(target)
}

/// [`ConstructFromDocument`] as a [`ConstructFn`].
pub fn static_factory<T: ConstructFromDocument<D>, D: Document>(
    doc: &D,
) -> Result<T, ConversionError> {
    T::construct_from_document(doc)
}

/// [`DocumentFrom`] as a [`WriteFn`].
pub fn free_writer<T, D: DocumentFrom<T>>(
    doc: &mut D,
    value: &T,
) -> Result<(), ConversionError> {
    doc.write_from(value)
}

// -----------------------------------------------------------------------------
// Populate

/// Fills an existing value, hiding which mutating hook runs.
pub struct Populate<T, D> {
    kind: HookKind,
    func: PopulateFn<T, D>,
}

impl<T, D> Populate<T, D> {
    /// Wraps a normalized mutating hook.
    ///
    /// # Panics
    ///
    /// Panics if `kind` does not mutate, see [`HookKind::is_mutating`].
    #[inline]
    pub const fn new(kind: HookKind, func: PopulateFn<T, D>) -> Self {
        assert!(kind.is_mutating(), "populate adapter over a value-returning hook");
        Self { kind, func }
    }

    /// The hook kind behind this adapter.
    #[inline(always)]
    pub const fn kind(&self) -> HookKind {
        self.kind
    }

    /// Runs the hook on `target`.
    #[inline]
    pub fn populate(&self, target: &mut T, doc: &D) -> Result<(), ConversionError> {
        (self.func)(target, doc)
    }
}

impl<T, D> Clone for Populate<T, D> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, D> Copy for Populate<T, D> {}

impl<T, D> fmt::Debug for Populate<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Populate").field(&self.kind).finish()
    }
}

// -----------------------------------------------------------------------------
// Construct

enum ConstructShape<T, D> {
    Plain(ConstructFn<T, D>),
    Tagged(TaggedFn<T, D>),
}

impl<T, D> Clone for ConstructShape<T, D> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, D> Copy for ConstructShape<T, D> {}

/// Produces a new value, hiding which value-returning hook runs.
pub struct Construct<T, D> {
    kind: HookKind,
    shape: ConstructShape<T, D>,
}

impl<T, D> Construct<T, D> {
    /// Wraps a [`ConstructFromDocument`] hook.
    #[inline]
    pub const fn factory(func: ConstructFn<T, D>) -> Self {
        Self {
            kind: HookKind::StaticFactory,
            shape: ConstructShape::Plain(func),
        }
    }

    /// Wraps a tagged fallback.
    #[inline]
    pub const fn tagged(func: TaggedFn<T, D>) -> Self {
        Self {
            kind: HookKind::TaggedFallbackFunction,
            shape: ConstructShape::Tagged(func),
        }
    }

    /// The hook kind behind this adapter.
    #[inline(always)]
    pub const fn kind(&self) -> HookKind {
        self.kind
    }

    /// Runs the hook.
    #[inline]
    pub fn construct(&self, doc: &D) -> Result<T, ConversionError> {
        match self.shape {
            ConstructShape::Plain(func) => func(doc),
            ConstructShape::Tagged(func) => func(doc, Tag::new()),
        }
    }
}

impl<T, D> Clone for Construct<T, D> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, D> Copy for Construct<T, D> {}

impl<T, D> fmt::Debug for Construct<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Construct").field(&self.kind).finish()
    }
}

// -----------------------------------------------------------------------------
// Write

/// Writes a value into a document, hiding which write hook runs.
pub struct Write<T, D> {
    kind: HookKind,
    func: WriteFn<T, D>,
}

impl<T, D> Write<T, D> {
    #[inline]
    pub const fn new(kind: HookKind, func: WriteFn<T, D>) -> Self {
        Self { kind, func }
    }

    /// The hook kind behind this adapter.
    #[inline(always)]
    pub const fn kind(&self) -> HookKind {
        self.kind
    }

    #[inline]
    pub fn write(&self, doc: &mut D, value: &T) -> Result<(), ConversionError> {
        (self.func)(doc, value)
    }
}

impl<T, D> Clone for Write<T, D> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, D> Copy for Write<T, D> {}

impl<T, D> fmt::Debug for Write<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Write").field(&self.kind).finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{Construct, Populate};
    use crate::ConversionError;
    use crate::hook::Tag;
    use crate::priority::HookKind;

    fn double(target: &mut i64, doc: &i64) -> Result<(), ConversionError> {
        *target += doc * 2;
        Ok(())
    }

    fn negate(doc: &i64) -> Result<i64, ConversionError> {
        Ok(-doc)
    }

    fn tagged(doc: &i64, _: Tag<i64>) -> Result<i64, ConversionError> {
        Ok(doc + 100)
    }

    #[test]
    fn populate_runs_in_place() {
        let adapter = Populate::new(HookKind::StaticMutator, double);
        let mut value = 1;
        adapter.populate(&mut value, &3).unwrap();
        assert_eq!(value, 7);
        assert_eq!(adapter.kind(), HookKind::StaticMutator);
    }

    #[test]
    #[should_panic(expected = "value-returning hook")]
    fn populate_rejects_factories() {
        Populate::new(HookKind::StaticFactory, double);
    }

    #[test]
    fn construct_shapes() {
        let factory = Construct::factory(negate);
        let fallback = Construct::tagged(tagged);
        assert_eq!(factory.construct(&4).unwrap(), -4);
        assert_eq!(fallback.construct(&4).unwrap(), 104);
        assert_eq!(factory.kind(), HookKind::StaticFactory);
        assert_eq!(fallback.kind(), HookKind::TaggedFallbackFunction);
    }
}
