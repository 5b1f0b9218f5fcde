use alloc::string::String;
use core::fmt;

use crate::error::{ConversionError, TypeMismatch};

// -----------------------------------------------------------------------------
// DocumentKind

/// The type tag of a document value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// The absence of a value.
    Null,
    /// `true` or `false`.
    Bool,
    /// An integer or floating point number.
    Number,
    /// A text value.
    String,
    /// An ordered sequence of values.
    Array,
    /// String keys mapped to values.
    Object,
}

impl DocumentKind {
    /// Lowercase name, used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for DocumentKind {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// -----------------------------------------------------------------------------
// Document

/// The document-value capability consumed by the conversion core.
///
/// The representation itself (storage, parsing, printing, iteration) belongs
/// to the implementor. The core only needs keyed access, type tags and the
/// primitive accessors used by the [built-in fallbacks](crate::builtins).
///
/// The typed helpers [`extract_as`](Document::extract_as),
/// [`field`](Document::field) and [`insert`](Document::insert) call back into
/// the free [entry points](crate::from_document), so hooks can convert
/// nested values without knowing how those are hooked up. Inside a hook they
/// use the registry running that hook.
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "json")] {
/// use serde_json::json;
/// use vc_convert::{Document, DocumentKind};
///
/// let mut doc = serde_json::Value::null();
/// doc.insert("age", &5_i32).unwrap();
///
/// assert_eq!(doc.kind(), DocumentKind::Object);
/// assert_eq!(doc.field::<i32>("age").unwrap(), 5);
/// assert_eq!(doc, json!({ "age": 5 }));
/// # }
/// ```
pub trait Document: Clone + Sized + Send + Sync + 'static {
    /// Returns the type tag of this value.
    fn kind(&self) -> DocumentKind;

    /// Returns the member `key` of an object, `None` for other kinds.
    fn get(&self, key: &str) -> Option<&Self>;

    /// Writes the member `key`.
    ///
    /// A null value becomes an empty object first.
    /// Any other non-object kind is a [`TypeMismatch::WrongKind`].
    fn set(&mut self, key: &str, value: Self) -> Result<(), TypeMismatch>;

    /// Creates a null value.
    fn null() -> Self;

    fn as_bool(&self) -> Option<bool>;

    /// Returns the number as `i64` if it is an integer in range.
    fn as_i64(&self) -> Option<i64>;

    /// Returns the number as `u64` if it is a non-negative integer in range.
    fn as_u64(&self) -> Option<u64>;

    fn as_f64(&self) -> Option<f64>;

    fn as_str(&self) -> Option<&str>;

    fn from_bool(value: bool) -> Self;

    fn from_i64(value: i64) -> Self;

    fn from_u64(value: u64) -> Self;

    fn from_f64(value: f64) -> Self;

    fn from_string(value: String) -> Self;

    #[inline]
    fn is_null(&self) -> bool {
        self.kind() == DocumentKind::Null
    }

    #[inline]
    fn is_bool(&self) -> bool {
        self.kind() == DocumentKind::Bool
    }

    #[inline]
    fn is_number(&self) -> bool {
        self.kind() == DocumentKind::Number
    }

    #[inline]
    fn is_string(&self) -> bool {
        self.kind() == DocumentKind::String
    }

    #[inline]
    fn is_array(&self) -> bool {
        self.kind() == DocumentKind::Array
    }

    #[inline]
    fn is_object(&self) -> bool {
        self.kind() == DocumentKind::Object
    }

    /// Returns the member `key`, or [`TypeMismatch::MissingKey`].
    fn require(&self, key: &str) -> Result<&Self, TypeMismatch> {
        self.get(key).ok_or_else(|| TypeMismatch::missing_key(key))
    }

    /// Converts this value into `T` through [`from_document`](crate::from_document).
    ///
    /// Inside a hook, the registry running that hook is used.
    #[inline]
    fn extract_as<T: 'static>(&self) -> Result<T, ConversionError> {
        crate::from_document(self)
    }

    /// Converts the member `key` into `T`.
    ///
    /// A missing member is a [`TypeMismatch::MissingKey`].
    fn field<T: 'static>(&self, key: &str) -> Result<T, ConversionError> {
        self.require(key)?.extract_as()
    }

    /// Converts `value` through [`to_document`](crate::to_document)
    /// and stores it as the member `key`.
    fn insert<T: 'static>(&mut self, key: &str, value: &T) -> Result<(), ConversionError> {
        let mut member = Self::null();
        crate::to_document(&mut member, value)?;
        self.set(key, member)?;
        Ok(())
    }
}
