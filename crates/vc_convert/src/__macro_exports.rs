//! Items used by the exported macros. Not public API.

use crate::registry::ConversionRegistry;

// -----------------------------------------------------------------------------
// auto_register

#[cfg(feature = "auto_register")]
pub use inventory;

/// A registration collected by [`ConversionRegistry::auto_register`].
pub struct AutoRegistration(pub fn(&mut ConversionRegistry));

#[cfg(feature = "auto_register")]
inventory::collect!(AutoRegistration);

// Only runs when collection works on this platform.
#[cfg(feature = "auto_register")]
inventory::submit! {
    AutoRegistration(ConversionRegistry::__mark_auto_registered)
}

#[cfg(feature = "auto_register")]
#[doc(hidden)]
#[macro_export]
macro_rules! __submit_registration {
    ($register:path) => {
        $crate::__macro_exports::inventory::submit! {
            $crate::__macro_exports::AutoRegistration($register)
        }
    };
}

#[cfg(not(feature = "auto_register"))]
#[doc(hidden)]
#[macro_export]
macro_rules! __submit_registration {
    ($register:path) => {
        const _: fn(&mut $crate::ConversionRegistry) = $register;
    };
}

// -----------------------------------------------------------------------------
// impl_convertible

/// Implements [`Convertible`](crate::Convertible) for a concrete `(T, D)` pair
/// by probing its hooks.
///
/// With the `auto_register` feature the pair is also collected by
/// [`ConversionRegistry::auto_register`], and so it is known to the
/// [global registry](ConversionRegistry::global).
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "json")] {
/// use serde_json::Value;
/// use vc_convert::{ConversionError, PopulateFromDocument};
///
/// #[derive(Default)]
/// struct Dog {
///     age: i32,
/// }
///
/// impl PopulateFromDocument<Value> for Dog {
///     fn populate_from_document(doc: &Value, dog: &mut Self) -> Result<(), ConversionError> {
///         dog.age = vc_convert::Document::field(doc, "age")?;
///         Ok(())
///     }
/// }
///
/// vc_convert::impl_convertible!(Dog => Value);
/// # }
/// ```
#[macro_export]
macro_rules! impl_convertible {
    ($ty:ty => $doc:ty) => {
        impl $crate::Convertible<$doc> for $ty {
            fn hooks() -> $crate::probe::HookSet<Self, $doc> {
                $crate::probe_hooks!($ty, $doc)
            }
        }

        const _: () = {
            fn __register(registry: &mut $crate::ConversionRegistry) {
                registry.register::<$ty, $doc>();
            }
            $crate::__submit_registration!(__register);
        };
    };
}

// -----------------------------------------------------------------------------
// impl_fallback

/// Declares tagged fallbacks for a `(T, D)` pair, for automatic registration.
///
/// Either direction may be omitted. Without the `auto_register` feature,
/// register them with [`ConversionRegistry::register_fallback`] and
/// [`ConversionRegistry::register_write_fallback`] instead.
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "json")] {
/// use serde_json::{Value, json};
/// use vc_convert::{ConversionError, ConversionRegistry, Document, Tag};
///
/// #[derive(Debug, PartialEq)]
/// struct Meters(f64);
///
/// fn read_meters(doc: &Value, _: Tag<Meters>) -> Result<Meters, ConversionError> {
///     doc.extract_as::<f64>().map(Meters)
/// }
///
/// fn write_meters(doc: &mut Value, value: &Meters) -> Result<(), ConversionError> {
///     *doc = json!(value.0);
///     Ok(())
/// }
///
/// vc_convert::impl_fallback!(Meters => Value, read = read_meters, write = write_meters);
///
/// let mut registry = ConversionRegistry::new();
/// registry.register_fallback::<Meters, Value>(read_meters);
/// registry.register_write_fallback::<Meters, Value>(write_meters);
///
/// let meters: Meters = registry.from_document(&json!(2.5)).unwrap();
/// assert_eq!(meters, Meters(2.5));
///
/// let mut doc = Value::Null;
/// registry.to_document(&mut doc, &meters).unwrap();
/// assert_eq!(doc, json!(2.5));
///
/// #[cfg(feature = "auto_register")]
/// assert_eq!(vc_convert::from_document::<Meters, _>(&json!(4.0)).unwrap(), Meters(4.0));
/// # }
/// ```
#[macro_export]
macro_rules! impl_fallback {
    ($ty:ty => $doc:ty $(, read = $read:expr)? $(, write = $write:expr)? $(,)?) => {
        const _: () = {
            fn __register(registry: &mut $crate::ConversionRegistry) {
                $(registry.register_fallback::<$ty, $doc>($read);)?
                $(registry.register_write_fallback::<$ty, $doc>($write);)?
            }
            $crate::__submit_registration!(__register);
        };
    };
}
