use crate::document::Document;
use crate::error::ConversionError;
use crate::registry::with_current;

// -----------------------------------------------------------------------------
// Entry points

/// Converts `doc` into a new `T`.
///
/// Inside a hook this uses the registry running the enclosing conversion,
/// elsewhere the [global registry](crate::ConversionRegistry::global).
/// Exactly one hook runs, chosen by the priority table for `T`'s
/// constructibility.
///
/// # Errors
///
/// - [`ConversionError::NoConversionDefined`] if `(T, D)` has no applicable hook.
/// - Any error raised by the hook, unchanged.
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "json")] {
/// use serde_json::json;
///
/// let age: i32 = vc_convert::from_document(&json!(5)).unwrap();
/// assert_eq!(age, 5);
///
/// let err = vc_convert::from_document::<i32, _>(&json!("five")).unwrap_err();
/// assert_eq!(err.to_string(), "expected number, found string");
/// # }
/// ```
#[inline]
pub fn from_document<T: 'static, D: Document>(doc: &D) -> Result<T, ConversionError> {
    with_current(|registry| registry.from_document(doc))
}

/// Converts `doc` into an existing `target`.
///
/// A mutating hook populates `target` in place. A value-returning hook
/// replaces it, and `target` is left untouched when that hook fails.
#[inline]
pub fn from_document_into<T: 'static, D: Document>(
    doc: &D,
    target: &mut T,
) -> Result<(), ConversionError> {
    with_current(|registry| registry.from_document_into(doc, target))
}

/// Writes `value` into `doc`.
///
/// Picks the registry the same way as [`from_document`].
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "json")] {
/// use serde_json::{Value, json};
///
/// let mut doc = Value::Null;
/// vc_convert::to_document(&mut doc, &"tigger".to_string()).unwrap();
/// assert_eq!(doc, json!("tigger"));
/// # }
/// ```
#[inline]
pub fn to_document<T: 'static, D: Document>(doc: &mut D, value: &T) -> Result<(), ConversionError> {
    with_current(|registry| registry.to_document(doc, value))
}

// -----------------------------------------------------------------------------
// Tests
