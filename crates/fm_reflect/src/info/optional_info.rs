use core::any::{Any, TypeId};

use crate::Reflect;
use crate::info::{Type, TypeInfo, TypePath, Typed, impl_type_fn};
use crate::ops::Optional;

/// A container for compile-time `Option<T>` info.
///
/// # Examples
///
/// ```rust
/// use fm_reflect::info::Typed;
///
/// let info = <Option<String> as Typed>::type_info().as_optional().unwrap();
///
/// assert!(info.some_is::<String>());
/// assert_eq!(info.some_info().type_path(), "alloc::string::String");
/// ```
#[derive(Clone, Debug)]
pub struct OptionalInfo {
    ty: Type,
    some_id: TypeId,
    some_info: fn() -> &'static TypeInfo,
}

impl OptionalInfo {
    impl_type_fn!(ty);

    /// Creates a new [`OptionalInfo`].
    #[inline]
    pub const fn new<TOption: Optional + TypePath, TSome: Reflect + Typed>() -> Self {
        Self {
            ty: Type::of::<TOption>(),
            some_id: TypeId::of::<TSome>(),
            some_info: TSome::type_info,
        }
    }

    /// Returns the [`TypeId`] of the `Some` payload.
    #[inline]
    pub const fn some_id(&self) -> TypeId {
        self.some_id
    }

    /// Returns `true` if the `Some` payload is `T`.
    #[inline]
    pub fn some_is<T: Any>(&self) -> bool {
        self.some_id == TypeId::of::<T>()
    }

    /// Returns the [`TypeInfo`] of the `Some` payload.
    #[inline]
    pub fn some_info(&self) -> &'static TypeInfo {
        (self.some_info)()
    }
}
