use core::fmt;
use core::marker::PhantomData;

use crate::document::Document;
use crate::error::ConversionError;

// -----------------------------------------------------------------------------
// Normalized shapes

/// "Populate an existing instance", the normalized shape of mutating hooks.
pub type PopulateFn<T, D> = fn(&mut T, &D) -> Result<(), ConversionError>;

/// "Construct and return a new instance", the normalized shape of factories.
pub type ConstructFn<T, D> = fn(&D) -> Result<T, ConversionError>;

/// The shape of a tagged fallback function.
///
/// The [`Tag`] parameter names the target type, so one function name can be
/// reused for many foreign types.
pub type TaggedFn<T, D> = fn(&D, Tag<T>) -> Result<T, ConversionError>;

/// The shape of every value-to-document hook.
pub type WriteFn<T, D> = fn(&mut D, &T) -> Result<(), ConversionError>;

/// A captured [`Default`] constructor.
pub type DefaultFn<T> = fn() -> T;

// -----------------------------------------------------------------------------
// Tag

/// A type-tag marker for `T`, passed to [tagged fallbacks](TaggedFn).
pub struct Tag<T>(PhantomData<fn() -> T>);

impl<T> Tag<T> {
    #[inline(always)]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Clone for Tag<T> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Tag<T> {}

impl<T> Default for Tag<T> {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Tag<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag<{}>", core::any::type_name::<T>())
    }
}

// -----------------------------------------------------------------------------
// Document -> value hooks

/// Instance method hook: reads a document into `self`.
///
/// Only eligible for types implementing [`Default`], the winning hook runs
/// on a freshly defaulted value. Highest priority for those types.
#[diagnostic::on_unimplemented(
    message = "`{Self}` has no instance method hook for `{D}`",
    note = "implement `ReadDocument<{D}>` for `{Self}` or use another hook kind"
)]
pub trait ReadDocument<D: Document> {
    /// Reads `doc` into `self`, a freshly defaulted value.
    fn read_document(&mut self, doc: &D) -> Result<(), ConversionError>;
}

/// Static mutator hook: an associated function filling an existing value.
///
/// Only eligible for types implementing [`Default`].
/// Loses to [`ReadDocument`], wins over [`DocumentInto`].
pub trait PopulateFromDocument<D: Document> {
    /// Fills `target` from `doc`.
    fn populate_from_document(doc: &D, target: &mut Self) -> Result<(), ConversionError>;
}

/// Free function hook, implemented on the document type and keyed by `T`.
///
/// Coherence only accepts `impl DocumentInto<T> for D` in the crate of `T`
/// (or of `D`), which makes this the lookup anchored to the target's namespace.
/// Third-party code cannot add one for a type it does not own; it uses a
/// tagged fallback instead.
///
/// Only eligible for types implementing [`Default`], and loses to both
/// [`ReadDocument`] and [`PopulateFromDocument`].
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "json")] {
/// use serde_json::Value;
/// use vc_convert::{ConversionError, Document, DocumentInto};
///
/// #[derive(Default)]
/// struct Parrot {
///     name: String,
/// }
///
/// impl DocumentInto<Parrot> for Value {
///     fn read_into(&self, target: &mut Parrot) -> Result<(), ConversionError> {
///         target.name = self.field("name")?;
///         Ok(())
///     }
/// }
/// # }
/// ```
pub trait DocumentInto<T>: Document {
    /// Reads `self` into `target`.
    fn read_into(&self, target: &mut T) -> Result<(), ConversionError>;
}

/// Static factory hook: an associated function returning a new value.
///
/// The only owner-defined hook available to types without [`Default`],
/// where it wins over the tagged fallback. It is never consulted for
/// types implementing [`Default`].
pub trait ConstructFromDocument<D: Document>: Sized {
    /// Builds a new value out of `doc`.
    fn construct_from_document(doc: &D) -> Result<Self, ConversionError>;
}

// -----------------------------------------------------------------------------
// Value -> document hooks

/// Free function hook writing `T` into a document.
///
/// Anchored to the crate of `T` the same way as [`DocumentInto`].
/// A registered write fallback is only used when this is absent.
pub trait DocumentFrom<T>: Document {
    /// Writes `value` into `self`.
    fn write_from(&mut self, value: &T) -> Result<(), ConversionError>;
}
