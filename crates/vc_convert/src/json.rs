//! [`Document`] binding for [`serde_json::Value`].
//!
//! Also provides [`register_serde`], which converts any serde type through
//! `serde_json` when it does not define its own hooks.

use alloc::string::String;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};

use crate::document::{Document, DocumentKind};
use crate::error::{ConversionError, TypeMismatch};
use crate::hook::Tag;
use crate::registry::ConversionRegistry;

// -----------------------------------------------------------------------------
// Document

impl Document for Value {
    fn kind(&self) -> DocumentKind {
        match self {
            Value::Null => DocumentKind::Null,
            Value::Bool(_) => DocumentKind::Bool,
            Value::Number(_) => DocumentKind::Number,
            Value::String(_) => DocumentKind::String,
            Value::Array(_) => DocumentKind::Array,
            Value::Object(_) => DocumentKind::Object,
        }
    }

    #[inline]
    fn get(&self, key: &str) -> Option<&Self> {
        match self {
            Value::Object(map) => map.get(key),
            _ => None,
        }
    }

    fn set(&mut self, key: &str, value: Self) -> Result<(), TypeMismatch> {
        if let Value::Null = self {
            *self = Value::Object(Map::new());
        }
        match self {
            Value::Object(map) => {
                map.insert(String::from(key), value);
                Ok(())
            }
            other => Err(TypeMismatch::wrong_kind(
                DocumentKind::Object,
                Document::kind(other),
            )),
        }
    }

    #[inline]
    fn null() -> Self {
        Value::Null
    }

    #[inline]
    fn as_bool(&self) -> Option<bool> {
        Value::as_bool(self)
    }

    #[inline]
    fn as_i64(&self) -> Option<i64> {
        Value::as_i64(self)
    }

    #[inline]
    fn as_u64(&self) -> Option<u64> {
        Value::as_u64(self)
    }

    #[inline]
    fn as_f64(&self) -> Option<f64> {
        Value::as_f64(self)
    }

    #[inline]
    fn as_str(&self) -> Option<&str> {
        Value::as_str(self)
    }

    #[inline]
    fn from_bool(value: bool) -> Self {
        Value::Bool(value)
    }

    #[inline]
    fn from_i64(value: i64) -> Self {
        Value::Number(value.into())
    }

    #[inline]
    fn from_u64(value: u64) -> Self {
        Value::Number(value.into())
    }

    /// Non-finite numbers have no JSON form and become null.
    #[inline]
    fn from_f64(value: f64) -> Self {
        Number::from_f64(value).map_or(Value::Null, Value::Number)
    }

    #[inline]
    fn from_string(value: String) -> Self {
        Value::String(value)
    }
}

// -----------------------------------------------------------------------------
// serde bridge

/// Registers fallbacks that convert `T` through its serde implementations.
///
/// Serde errors are reported as [`ConversionError::ConstructionFailure`].
/// Owner hooks of `T`, if registered, still take priority.
///
/// # Examples
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use serde_json::{Value, json};
/// use vc_convert::ConversionRegistry;
///
/// #[derive(Serialize, Deserialize, Debug, PartialEq)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let mut registry = ConversionRegistry::new();
/// vc_convert::json::register_serde::<Point>(&mut registry);
///
/// let point: Point = registry.from_document(&json!({ "x": 1, "y": 2 })).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
///
/// let mut doc = Value::Null;
/// registry.to_document(&mut doc, &point).unwrap();
/// assert_eq!(doc, json!({ "x": 1, "y": 2 }));
/// ```
pub fn register_serde<T: Serialize + DeserializeOwned + 'static>(registry: &mut ConversionRegistry) {
    registry.register_fallback::<T, Value>(read_serde::<T>);
    registry.register_write_fallback::<T, Value>(write_serde::<T>);
}

fn read_serde<T: DeserializeOwned>(doc: &Value, _: Tag<T>) -> Result<T, ConversionError> {
    T::deserialize(doc).map_err(|err| ConversionError::construction::<T>(err.to_string()))
}

fn write_serde<T: Serialize>(doc: &mut Value, value: &T) -> Result<(), ConversionError> {
    *doc = serde_json::to_value(value)
        .map_err(|err| ConversionError::construction::<T>(err.to_string()))?;
    Ok(())
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use serde_json::{Value, json};

    use super::register_serde;
    use crate::registry::ConversionRegistry;
    use crate::{ConversionError, Document, DocumentKind, TypeMismatch};

    #[test]
    fn kinds() {
        assert_eq!(Document::kind(&json!(null)), DocumentKind::Null);
        assert_eq!(Document::kind(&json!(1.5)), DocumentKind::Number);
        assert_eq!(Document::kind(&json!([])), DocumentKind::Array);
        assert!(Document::is_object(&json!({})));
    }

    #[test]
    fn set_turns_null_into_object() {
        let mut doc = Value::Null;
        doc.set("a", json!(1)).unwrap();
        doc.set("b", json!("x")).unwrap();
        assert_eq!(doc, json!({ "a": 1, "b": "x" }));
        assert_eq!(Document::get(&doc, "a"), Some(&json!(1)));
        assert_eq!(Document::get(&json!([1]), "a"), None);
    }

    #[test]
    fn set_rejects_other_kinds() {
        let mut doc = json!([1]);
        let err = doc.set("a", json!(1)).unwrap_err();
        assert_eq!(
            err,
            TypeMismatch::wrong_kind(DocumentKind::Object, DocumentKind::Array)
        );
    }

    #[test]
    fn require_reports_missing_key() {
        let doc = json!({ "age": 5 });
        assert_eq!(
            doc.require("name").unwrap_err(),
            TypeMismatch::missing_key("name")
        );
    }

    #[test]
    fn non_finite_is_null() {
        assert_eq!(Value::from_f64(f64::NAN), Value::Null);
        assert_eq!(Value::from_f64(0.25), json!(0.25));
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[test]
    fn serde_bridge() {
        let mut registry = ConversionRegistry::empty();
        register_serde::<Point>(&mut registry);

        let point: Point = registry.from_document(&json!({ "x": 3, "y": -1 })).unwrap();
        assert_eq!(point, Point { x: 3, y: -1 });

        let err = registry
            .from_document::<Point, _>(&json!({ "x": 3 }))
            .unwrap_err();
        assert!(matches!(err, ConversionError::ConstructionFailure { .. }));

        let mut doc = Value::Null;
        registry.to_document(&mut doc, &point).unwrap();
        assert_eq!(doc, json!({ "x": 3, "y": -1 }));
    }
}
