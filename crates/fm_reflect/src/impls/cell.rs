//! Containers for static storage of type information.
//!
//! For non generic types, [`NonGenericTypeInfoCell`] wraps a [`OnceLock`].
//! A type path of a non generic type is a string literal and needs no cell.
//!
//! For generic types, a `static CELL` inside a function is shared by every
//! instantiation. [`GenericTypeInfoCell`] and [`GenericTypePathCell`] therefore
//! keep a [`TypeIdMap`] behind a [`RwLock`], leaking one value per type.

use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use fm_utils::TypeIdMap;

use crate::info::TypeInfo;

mod sealed {
    use super::TypeInfo;

    pub trait TypedProperty: 'static {}

    impl TypedProperty for String {}
    impl TypedProperty for TypeInfo {}
}

use sealed::TypedProperty;

/// Container for static storage of non-generic type information.
///
/// # Examples
///
/// ```
/// use fm_reflect::impls::NonGenericTypeInfoCell;
/// use fm_reflect::info::{NamedField, StructInfo, TypeInfo, Typed};
/// # use fm_reflect::derive::Reflect;
///
/// # #[derive(Reflect)]
/// # #[reflect(Typed = false)]
/// struct Foo {
///     a: u8,
/// }
///
/// impl Typed for Foo {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| {
///             TypeInfo::Struct(StructInfo::new::<Self>(&[NamedField::new::<u8>("a")]))
///         })
///     }
/// }
/// # assert!(Foo::type_info().is_struct());
/// ```
pub struct NonGenericTypeCell<T: TypedProperty>(OnceLock<T>);

/// See [`NonGenericTypeCell`].
pub type NonGenericTypeInfoCell = NonGenericTypeCell<TypeInfo>;

impl<T: TypedProperty> NonGenericTypeCell<T> {
    /// Creates an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored value, initializing it with `f` on first access.
    #[inline]
    pub fn get_or_init<F>(&self, f: F) -> &T
    where
        F: FnOnce() -> T,
    {
        self.0.get_or_init(f)
    }
}

/// Container for static storage of type information of generic types.
///
/// # Examples
///
/// ```
/// use fm_reflect::impls::{GenericTypePathCell, concat};
/// use fm_reflect::info::TypePath;
///
/// struct Wrapper<T>(T);
///
/// impl<T: TypePath> TypePath for Wrapper<T> {
///     fn type_path() -> &'static str {
///         static CELL: GenericTypePathCell = GenericTypePathCell::new();
///         CELL.get_or_insert::<Self>(|| concat(&["my_crate::Wrapper<", T::type_path(), ">"]))
///     }
///
///     fn type_name() -> &'static str {
///         static CELL: GenericTypePathCell = GenericTypePathCell::new();
///         CELL.get_or_insert::<Self>(|| concat(&["Wrapper<", T::type_name(), ">"]))
///     }
/// }
///
/// assert_eq!(Wrapper::<u8>::type_path(), "my_crate::Wrapper<u8>");
/// assert_eq!(Wrapper::<bool>::type_name(), "Wrapper<bool>");
/// ```
pub struct GenericTypeCell<T: TypedProperty>(RwLock<TypeIdMap<&'static T>>);

/// See [`GenericTypeCell`].
pub type GenericTypeInfoCell = GenericTypeCell<TypeInfo>;

/// See [`GenericTypeCell`].
pub type GenericTypePathCell = GenericTypeCell<String>;

impl<T: TypedProperty> GenericTypeCell<T> {
    /// Creates an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the value stored for `G`, initializing it with `f` on first access.
    ///
    /// `f` runs without holding the lock, so it may itself query the same cell
    /// (e.g. `Vec<Vec<i32>>` asking for `Vec<i32>`).
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> T) -> &T {
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    #[inline(never)]
    fn get_or_insert_by_type_id(&self, type_id: TypeId, f: impl FnOnce() -> T) -> &T {
        match self.get_by_type_id(type_id) {
            Some(info) => info,
            None => self.insert_by_type_id(type_id, f()),
        }
    }

    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<&T> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    // A racing thread may have inserted first; its value wins.
    #[inline(never)]
    fn insert_by_type_id(&self, type_id: TypeId, value: T) -> &T {
        *self
            .0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(type_id, || Box::leak(Box::new(value)))
    }
}

#[cfg(test)]
mod tests {
    use super::GenericTypePathCell;

    #[test]
    fn one_entry_per_type() {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();

        let a = CELL.get_or_insert::<u8>(|| String::from("u8"));
        let b = CELL.get_or_insert::<u16>(|| String::from("u16"));
        let c = CELL.get_or_insert::<u8>(|| String::from("ignored"));

        assert_eq!(a, "u8");
        assert_eq!(b, "u16");
        assert!(core::ptr::eq(a, c));
    }
}
