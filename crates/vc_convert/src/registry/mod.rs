//! The resolved conversion table.
//!
//! ## Menu
//!
//! - [`Convertible`]: provides the probed hooks of a `(T, D)` pair.
//! - [`ConversionMeta`]: one entry, with its hooks and the resolver's decision.
//! - [`ConversionRegistry`]: stores entries and runs conversions.
//! - [`TypePairMap`]: the map behind the registry, keyed by `(T, D)`.
//!
//! ## Registration
//!
//! Owner hooks are detected by [`impl_convertible!`](crate::impl_convertible),
//! which implements [`Convertible`] through [`probe_hooks!`](crate::probe_hooks).
//! Tagged fallbacks exist for types whose crate you do not own and are
//! registered as plain functions, see [`impl_fallback!`](crate::impl_fallback)
//! and [`ConversionRegistry::register_fallback`].
//!
//! ## auto_register
//!
//! See [`ConversionRegistry::auto_register`] .
//!
//! We use [`inventory`] crate to collect every `impl_convertible!` and
//! `impl_fallback!` of the program at startup. Not all platforms support it,
//! in which case registration has to be done by hand.
//!
//! [`inventory`]: https://docs.rs/inventory

// -----------------------------------------------------------------------------
// Modules

mod conversion_registry;
mod meta;
mod pair_map;
mod scope;

// -----------------------------------------------------------------------------
// Exports

pub use conversion_registry::ConversionRegistry;
pub use meta::ConversionMeta;
pub use pair_map::{PairHashState, TypePairMap};

pub(crate) use scope::with_current;

use crate::document::Document;
use crate::probe::HookSet;

// -----------------------------------------------------------------------------
// Convertible

/// Provides the hooks of `Self` for the document type `D`.
///
/// Usually implemented with [`impl_convertible!`](crate::impl_convertible),
/// which probes the hooks of a concrete type.
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "json")] {
/// use serde_json::Value;
/// use vc_convert::{ConversionError, ConstructFromDocument, Convertible};
/// use vc_convert::priority::HookKind;
///
/// struct Fish(i64);
///
/// impl ConstructFromDocument<Value> for Fish {
///     fn construct_from_document(doc: &Value) -> Result<Self, ConversionError> {
///         Ok(Fish(vc_convert::Document::extract_as(doc)?))
///     }
/// }
///
/// vc_convert::impl_convertible!(Fish => Value);
///
/// let hooks = <Fish as Convertible<Value>>::hooks();
/// assert!(hooks.default_ctor.is_none());
/// assert!(hooks.construct(HookKind::StaticFactory).is_some());
/// # }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` has no probed hooks for `{D}`",
    note = "consider using `impl_convertible!({Self} => {D})`"
)]
pub trait Convertible<D: Document>: Sized + 'static {
    /// The hooks of `(Self, D)`, without fallbacks.
    fn hooks() -> HookSet<Self, D>;
}
