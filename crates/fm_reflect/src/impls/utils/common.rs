use alloc::borrow::Cow;
use core::fmt;

use crate::Reflect;
use crate::ops::{List, Optional, ReflectCloneError, ReflectRef, Struct};

// -----------------------------------------------------------------------------
// Struct

/// A function used to assist in the implementation of `reflect_partial_eq`.
///
/// Two structs are equal when they have the same field names and every pair
/// of same-named fields is equal. Two concrete (non-dynamic) structs of
/// different types are never equal.
///
/// # Examples
///
/// ```
/// use fm_reflect::{Reflect, derive::Reflect, ops::DynamicStruct};
///
/// #[derive(Reflect)]
/// struct Foo {
///     a: i32,
///     b: String,
/// }
///
/// let mut mapping = DynamicStruct::new();
/// mapping.extend("a", 1_i32);
/// mapping.extend("b", String::from("x"));
///
/// let foo = Foo { a: 1, b: String::from("x") };
/// assert_eq!(foo.reflect_partial_eq(&mapping), Some(true));
///
/// mapping.extend("c", 0_u8);
/// assert_eq!(foo.reflect_partial_eq(&mapping), Some(false));
/// ```
#[inline(never)]
pub fn struct_partial_eq(x: &dyn Struct, y: &dyn Reflect) -> Option<bool> {
    let ReflectRef::Struct(y) = y.reflect_ref() else {
        return Some(false);
    };

    if !x.is_dynamic() && !y.is_dynamic() && x.ty_id() != y.ty_id() {
        return Some(false);
    }

    if x.field_len() != y.field_len() {
        return Some(false);
    }

    for (idx, y_field) in y.iter_fields().enumerate() {
        let Some(x_field) = y.name_at(idx).and_then(|name| x.field(name)) else {
            return Some(false);
        };
        let result = x_field.reflect_partial_eq(y_field);
        if result != Some(true) {
            return result;
        }
    }
    Some(true)
}

/// A function used to assist in the implementation of `reflect_debug`.
#[inline(never)]
pub fn struct_debug(dyn_struct: &dyn Struct, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut debug = f.debug_struct(dyn_struct.reflect_type_name());

    for (index, field) in dyn_struct.iter_fields().enumerate() {
        if let Some(name) = dyn_struct.name_at(index) {
            debug.field(name, &field as &dyn fmt::Debug);
        }
    }
    debug.finish()
}

/// A function used to assist in the implementation of `reflect_clone`.
///
/// Clones a single field back into its concrete type. `owner` and `field`
/// only name the field in the error.
#[inline]
pub fn struct_clone_field<T: Reflect>(
    owner: &'static str,
    field: &'static str,
    value: &T,
) -> Result<T, ReflectCloneError> {
    value
        .reflect_clone()?
        .take::<T>()
        .map_err(|_| ReflectCloneError::FieldNotCloneable {
            type_path: Cow::Borrowed(owner),
            field: Cow::Borrowed(field),
        })
}

// -----------------------------------------------------------------------------
// List

/// A function used to assist in the implementation of `reflect_partial_eq`.
///
/// # Examples
///
/// ```
/// use fm_reflect::Reflect;
///
/// let a = vec![1_u8, 2, 3];
/// assert_eq!(a.reflect_partial_eq(&vec![1_u8, 2, 3]), Some(true));
/// assert_eq!(a.reflect_partial_eq(&vec![1_u8, 2]), Some(false));
/// ```
#[inline(never)]
pub fn list_partial_eq(x: &dyn List, y: &dyn Reflect) -> Option<bool> {
    let ReflectRef::List(y) = y.reflect_ref() else {
        return Some(false);
    };

    if x.len() != y.len() {
        return Some(false);
    }

    for (x_value, y_value) in x.iter().zip(y.iter()) {
        let result = x_value.reflect_partial_eq(y_value);
        if result != Some(true) {
            return result;
        }
    }

    Some(true)
}

/// A function used to assist in the implementation of `reflect_debug`.
#[inline(never)]
pub fn list_debug(dyn_list: &dyn List, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut debug = f.debug_list();
    for item in dyn_list.iter() {
        debug.entry(&item as &dyn fmt::Debug);
    }
    debug.finish()
}

// -----------------------------------------------------------------------------
// Optional

/// A function used to assist in the implementation of `reflect_partial_eq`.
#[inline(never)]
pub fn optional_partial_eq(x: &dyn Optional, y: &dyn Reflect) -> Option<bool> {
    let ReflectRef::Optional(y) = y.reflect_ref() else {
        return Some(false);
    };

    match (x.value(), y.value()) {
        (Some(x_value), Some(y_value)) => x_value.reflect_partial_eq(y_value),
        (None, None) => Some(true),
        _ => Some(false),
    }
}

/// A function used to assist in the implementation of `reflect_debug`.
#[inline(never)]
pub fn optional_debug(dyn_optional: &dyn Optional, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match dyn_optional.value() {
        Some(value) => f.debug_tuple("Some").field(&value as &dyn fmt::Debug).finish(),
        None => f.write_str("None"),
    }
}
