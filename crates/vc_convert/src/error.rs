use alloc::borrow::Cow;
use alloc::string::String;
use core::fmt;

use thiserror::Error;

use crate::document::DocumentKind;

// -----------------------------------------------------------------------------
// Direction

/// Which way a conversion was going when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Document to value.
    FromDocument,
    /// Value to document.
    ToDocument,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FromDocument => f.write_str("from document"),
            Self::ToDocument => f.write_str("to document"),
        }
    }
}

// -----------------------------------------------------------------------------
// TypeMismatch

/// The document does not have the shape a hook expects.
///
/// Raised by [`Document`](crate::Document) accessors and the built-in
/// primitive conversions, then carried through [`ConversionError::TypeMismatch`]
/// without modification.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TypeMismatch {
    #[error("missing key `{key}`")]
    MissingKey { key: String },

    #[error("expected {expected}, found {found}")]
    WrongKind {
        expected: DocumentKind,
        found: DocumentKind,
    },

    #[error("number does not fit in `{target}`")]
    OutOfRange { target: &'static str },
}

impl TypeMismatch {
    /// Creates a [`TypeMismatch::MissingKey`].
    #[inline]
    pub fn missing_key(key: &str) -> Self {
        Self::MissingKey {
            key: String::from(key),
        }
    }

    /// Creates a [`TypeMismatch::WrongKind`].
    #[inline]
    pub const fn wrong_kind(expected: DocumentKind, found: DocumentKind) -> Self {
        Self::WrongKind { expected, found }
    }

    /// Creates a [`TypeMismatch::OutOfRange`] for `T`.
    #[inline]
    pub fn out_of_range<T>() -> Self {
        Self::OutOfRange {
            target: core::any::type_name::<T>(),
        }
    }
}

// -----------------------------------------------------------------------------
// ConversionError

/// A enumeration of all error outcomes of the conversion entry points.
///
/// The resolution layer never swallows, retries or logs these errors,
/// they always surface to the caller of [`from_document`](crate::from_document)
/// or [`to_document`](crate::to_document).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConversionError {
    /// No eligible hook exists for the `(type, document, direction)` triple.
    #[error("no conversion {direction} defined for `{type_name}` with document `{document}`")]
    NoConversionDefined {
        type_name: &'static str,
        document: &'static str,
        direction: Direction,
    },

    /// The document did not match what a hook expects.
    #[error(transparent)]
    TypeMismatch(#[from] TypeMismatch),

    /// A hook could not produce a value.
    #[error("failed to construct `{type_name}`: {reason}")]
    ConstructionFailure {
        type_name: &'static str,
        reason: Cow<'static, str>,
    },
}

impl ConversionError {
    /// Creates a [`ConversionError::NoConversionDefined`] for `T` and `D`.
    #[cold]
    pub fn no_conversion<T, D>(direction: Direction) -> Self {
        Self::NoConversionDefined {
            type_name: core::any::type_name::<T>(),
            document: core::any::type_name::<D>(),
            direction,
        }
    }

    /// Creates a [`ConversionError::ConstructionFailure`] for `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_convert::ConversionError;
    ///
    /// struct Port(u16);
    ///
    /// let err = ConversionError::construction::<Port>("port 0 is reserved");
    /// assert!(err.to_string().ends_with("port 0 is reserved"));
    /// ```
    #[cold]
    pub fn construction<T>(reason: impl Into<Cow<'static, str>>) -> Self {
        Self::ConstructionFailure {
            type_name: core::any::type_name::<T>(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if this is a [`ConversionError::NoConversionDefined`].
    #[inline]
    pub const fn is_no_conversion(&self) -> bool {
        matches!(self, Self::NoConversionDefined { .. })
    }
}

// -----------------------------------------------------------------------------
// Tests
