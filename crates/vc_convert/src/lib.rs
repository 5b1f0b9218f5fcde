//! Conversion customization points between document values and user types.
//!
//! A target type takes part in conversion by implementing one (or several)
//! hook traits. The library detects which hooks exist, picks exactly one
//! through a fixed priority table, and calls it through a uniform adapter.
//!
//! ## Menu
//!
//! - [`Document`]: the document-value capability this crate consumes.
//! - Hooks, from document to value:
//!     - [`ReadDocument`]: instance method, mutates `self`.
//!     - [`PopulateFromDocument`]: static mutator, takes `(&D, &mut Self)`.
//!     - [`DocumentInto`]: free function anchored to the target's crate.
//!     - [`ConstructFromDocument`]: static factory, returns `Self`.
//!     - Tagged fallback: a plain `fn(&D, Tag<T>) -> Result<T, _>`, see [`TaggedFn`].
//! - Hooks, from value to document: [`DocumentFrom`] and write fallbacks.
//! - [`probe`]: detects hooks without calling them.
//! - [`priority`] and [`resolve`]: decide which hook wins.
//! - [`adapter`]: normalizes every hook into `populate` or `construct`.
//! - [`registry`]: the resolved table, keyed by `(T, D)`.
//! - [`from_document`], [`from_document_into`], [`to_document`]: entry points.
//!
//! ## Priority
//!
//! | target | order |
//! |--------|-------|
//! | `Default` | instance method > static mutator > free function > tagged fallback |
//! | not `Default` | static factory > tagged fallback |
//! | writing | free function > write fallback |
//!
//! ## Example
//!
//! ```
//! # #[cfg(feature = "json")] {
//! use serde_json::{Value, json};
//! use vc_convert::{ConversionError, ConversionRegistry, Document, ReadDocument};
//!
//! #[derive(Default, Debug, PartialEq)]
//! struct Cat {
//!     age: i32,
//!     name: String,
//! }
//!
//! impl ReadDocument<Value> for Cat {
//!     fn read_document(&mut self, doc: &Value) -> Result<(), ConversionError> {
//!         self.age = doc.field("age")?;
//!         self.name = doc.field("name")?;
//!         Ok(())
//!     }
//! }
//!
//! vc_convert::impl_convertible!(Cat => Value);
//!
//! let mut registry = ConversionRegistry::new();
//! registry.register::<Cat, Value>();
//!
//! let doc = json!({ "name": "tigger", "age": 5 });
//! let cat: Cat = registry.from_document(&doc).unwrap();
//! assert_eq!(cat, Cat { age: 5, name: "tigger".into() });
//! # }
//! ```

// -----------------------------------------------------------------------------
// Compilation config

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod convert;
mod document;
mod error;
mod hook;

pub mod adapter;
pub mod builtins;
pub mod priority;
pub mod probe;
pub mod registry;
pub mod resolve;

#[cfg(feature = "json")]
pub mod json;


// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use convert::{from_document, from_document_into, to_document};
pub use document::{Document, DocumentKind};
pub use error::{ConversionError, Direction, TypeMismatch};
pub use hook::{ConstructFromDocument, DocumentFrom, DocumentInto};
pub use hook::{ConstructFn, DefaultFn, PopulateFn, TaggedFn, WriteFn};
pub use hook::{PopulateFromDocument, ReadDocument, Tag};
pub use registry::{ConversionRegistry, Convertible};
