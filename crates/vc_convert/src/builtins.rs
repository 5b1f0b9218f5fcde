//! Tagged fallbacks for primitive types.
//!
//! Primitives belong to `core`/`alloc`, so none of the owner hooks can be
//! implemented for them. They convert through fallbacks instead, written once
//! against the [`Document`] accessors and registered per document type.
//!
//! ## Menu
//!
//! - `()`: null
//! - `bool`
//! - `i8` `i16` `i32` `i64` `isize`
//! - `u8` `u16` `u32` `u64` `usize`
//! - `f32` `f64`
//! - `char` `String`
//! - the document type itself, copied as is
//!
//! Integers that do not fit the target are a [`TypeMismatch::OutOfRange`],
//! values of another kind a [`TypeMismatch::WrongKind`].

use alloc::string::String;

use crate::document::{Document, DocumentKind};
use crate::error::{ConversionError, TypeMismatch};
use crate::hook::Tag;
use crate::registry::ConversionRegistry;

// -----------------------------------------------------------------------------
// Registration

macro_rules! register_numbers {
    ($registry:ident, $doc:ty, $read:ident, $write:ident: $($ty:ty),+ $(,)?) => {
        $(
            $registry.register_fallback::<$ty, $doc>($read::<$ty, $doc>);
            $registry.register_write_fallback::<$ty, $doc>($write::<$ty, $doc>);
        )+
    };
}

/// Registers read and write fallbacks for every primitive in the
/// [menu](self) with document type `D`.
///
/// [`ConversionRegistry::new`] does this for the bundled document types.
/// Fallbacks registered afterwards replace these ones.
pub fn register_primitives<D: Document>(registry: &mut ConversionRegistry) {
    registry.register_fallback::<(), D>(read_unit);
    registry.register_write_fallback::<(), D>(write_unit);

    registry.register_fallback::<bool, D>(read_bool);
    registry.register_write_fallback::<bool, D>(write_bool);

    register_numbers!(registry, D, read_signed, write_signed: i8, i16, i32, i64, isize);
    register_numbers!(registry, D, read_unsigned, write_unsigned: u8, u16, u32, u64, usize);

    registry.register_fallback::<f32, D>(read_f32);
    registry.register_write_fallback::<f32, D>(write_f32);
    registry.register_fallback::<f64, D>(read_f64);
    registry.register_write_fallback::<f64, D>(write_f64);

    registry.register_fallback::<char, D>(read_char);
    registry.register_write_fallback::<char, D>(write_char);
    registry.register_fallback::<String, D>(read_string);
    registry.register_write_fallback::<String, D>(write_string);

    registry.register_fallback::<D, D>(read_self);
    registry.register_write_fallback::<D, D>(write_self);

    log::trace!(
        "registered primitive fallbacks for `{}`",
        core::any::type_name::<D>(),
    );
}

// -----------------------------------------------------------------------------
// Readers

#[cold]
fn wrong_kind<D: Document>(doc: &D, expected: DocumentKind) -> ConversionError {
    TypeMismatch::wrong_kind(expected, doc.kind()).into()
}

fn read_unit<D: Document>(doc: &D, _: Tag<()>) -> Result<(), ConversionError> {
    if doc.is_null() {
        Ok(())
    } else {
        Err(wrong_kind(doc, DocumentKind::Null))
    }
}

fn read_bool<D: Document>(doc: &D, _: Tag<bool>) -> Result<bool, ConversionError> {
    doc.as_bool().ok_or_else(|| wrong_kind(doc, DocumentKind::Bool))
}

fn read_signed<T: TryFrom<i64>, D: Document>(doc: &D, _: Tag<T>) -> Result<T, ConversionError> {
    match doc.as_i64() {
        Some(value) => T::try_from(value).map_err(|_| TypeMismatch::out_of_range::<T>().into()),
        // Fractions and integers above `i64::MAX`.
        None if doc.is_number() => Err(TypeMismatch::out_of_range::<T>().into()),
        None => Err(wrong_kind(doc, DocumentKind::Number)),
    }
}

fn read_unsigned<T: TryFrom<u64>, D: Document>(doc: &D, _: Tag<T>) -> Result<T, ConversionError> {
    match doc.as_u64() {
        Some(value) => T::try_from(value).map_err(|_| TypeMismatch::out_of_range::<T>().into()),
        // Fractions and negative numbers.
        None if doc.is_number() => Err(TypeMismatch::out_of_range::<T>().into()),
        None => Err(wrong_kind(doc, DocumentKind::Number)),
    }
}

fn read_f64<D: Document>(doc: &D, _: Tag<f64>) -> Result<f64, ConversionError> {
    doc.as_f64().ok_or_else(|| wrong_kind(doc, DocumentKind::Number))
}

fn read_f32<D: Document>(doc: &D, _: Tag<f32>) -> Result<f32, ConversionError> {
    let value = read_f64(doc, Tag::new())?;
    if value.is_finite() && value.abs() > f64::from(f32::MAX) {
        return Err(TypeMismatch::out_of_range::<f32>().into());
    }
    Ok(value as f32)
}

fn read_string<D: Document>(doc: &D, _: Tag<String>) -> Result<String, ConversionError> {
    doc.as_str()
        .map(String::from)
        .ok_or_else(|| wrong_kind(doc, DocumentKind::String))
}

fn read_char<D: Document>(doc: &D, _: Tag<char>) -> Result<char, ConversionError> {
    let text = doc.as_str().ok_or_else(|| wrong_kind(doc, DocumentKind::String))?;
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ConversionError::construction::<char>(
            "expected a string of exactly one character",
        )),
    }
}

fn read_self<D: Document>(doc: &D, _: Tag<D>) -> Result<D, ConversionError> {
    Ok(doc.clone())
}

// -----------------------------------------------------------------------------
// Writers

fn write_unit<D: Document>(doc: &mut D, _: &()) -> Result<(), ConversionError> {
    *doc = D::null();
    Ok(())
}

fn write_bool<D: Document>(doc: &mut D, value: &bool) -> Result<(), ConversionError> {
    *doc = D::from_bool(*value);
    Ok(())
}

fn write_signed<T: Copy + TryInto<i64>, D: Document>(
    doc: &mut D,
    value: &T,
) -> Result<(), ConversionError> {
    let value = (*value)
        .try_into()
        .map_err(|_| TypeMismatch::out_of_range::<i64>())?;
    *doc = D::from_i64(value);
    Ok(())
}

fn write_unsigned<T: Copy + TryInto<u64>, D: Document>(
    doc: &mut D,
    value: &T,
) -> Result<(), ConversionError> {
    let value = (*value)
        .try_into()
        .map_err(|_| TypeMismatch::out_of_range::<u64>())?;
    *doc = D::from_u64(value);
    Ok(())
}

fn write_f32<D: Document>(doc: &mut D, value: &f32) -> Result<(), ConversionError> {
    *doc = D::from_f64(f64::from(*value));
    Ok(())
}

fn write_f64<D: Document>(doc: &mut D, value: &f64) -> Result<(), ConversionError> {
    *doc = D::from_f64(*value);
    Ok(())
}

#[allow(clippy::ptr_arg, reason = "must match `WriteFn<String, D>`")]
fn write_string<D: Document>(doc: &mut D, value: &String) -> Result<(), ConversionError> {
    *doc = D::from_string(value.clone());
    Ok(())
}

fn write_char<D: Document>(doc: &mut D, value: &char) -> Result<(), ConversionError> {
    *doc = D::from_string(String::from(*value));
    Ok(())
}

fn write_self<D: Document>(doc: &mut D, value: &D) -> Result<(), ConversionError> {
    doc.clone_from(value);
    Ok(())
}

// -----------------------------------------------------------------------------
// Tests
