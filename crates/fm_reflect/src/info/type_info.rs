use core::any::{Any, TypeId};
use core::{error, fmt};

use crate::Reflect;
use crate::info::{ListInfo, OpaqueInfo, OptionalInfo, StructInfo, TypePath};

// -----------------------------------------------------------------------------
// ReflectKind

/// An enumeration of the "kinds" of a reflected type.
///
/// Each kind corresponds to a specific reflection trait, such as `Struct` or
/// `List`. A [`ReflectKind`] is obtained via [`Reflect::reflect_kind`] or
/// [`TypeInfo::kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReflectKind {
    Struct,
    List,
    Optional,
    Opaque,
}

impl fmt::Display for ReflectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Struct => f.pad("Struct"),
            Self::List => f.pad("List"),
            Self::Optional => f.pad("Optional"),
            Self::Opaque => f.pad("Opaque"),
        }
    }
}

/// Error returned when a value is not the expected [`ReflectKind`].
#[derive(Debug)]
pub struct ReflectKindError {
    pub expected: ReflectKind,
    pub received: ReflectKind,
}

impl fmt::Display for ReflectKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "reflect kind mismatch: expected {}, received {}",
            self.expected, self.received
        )
    }
}

impl error::Error for ReflectKindError {}

// -----------------------------------------------------------------------------
// Type

/// Identity of a reflected type: its [`TypeId`], its paths and, when the
/// type opted in, a constructor for its default value.
///
/// The default constructor is what lets a `None` be replaced by a fresh value
/// ("auto-vivification") and lets list elements be built from nothing.
#[derive(Clone, Copy, Debug)]
pub struct Type {
    id: TypeId,
    type_path: fn() -> &'static str,
    type_name: fn() -> &'static str,
    default_fn: Option<fn() -> Box<dyn Reflect>>,
}

fn construct_default<T: Default + Reflect>() -> Box<dyn Reflect> {
    Box::new(T::default())
}

impl Type {
    /// Creates the [`Type`] of `T`, without a default constructor.
    #[inline]
    pub const fn of<T: TypePath + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            type_path: T::type_path,
            type_name: T::type_name,
            default_fn: None,
        }
    }

    /// Registers `T::default` as the default constructor.
    ///
    /// # Panics
    ///
    /// Panics if `T` is not the type this [`Type`] was created for.
    #[inline]
    pub fn with_default<T: Default + Reflect>(mut self) -> Self {
        assert!(self.is::<T>(), "`Type` mismatched.");
        self.default_fn = Some(construct_default::<T>);
        self
    }

    /// Returns the [`TypeId`].
    #[inline]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the fully qualified type path.
    #[inline]
    pub fn path(&self) -> &'static str {
        (self.type_path)()
    }

    /// Returns the short type name.
    #[inline]
    pub fn name(&self) -> &'static str {
        (self.type_name)()
    }

    /// Check if the given type matches this one.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    /// Returns `true` if a default constructor was registered.
    #[inline]
    pub const fn has_default(&self) -> bool {
        self.default_fn.is_some()
    }

    /// Builds the default value, if a default constructor was registered.
    #[inline]
    pub fn default_value(&self) -> Option<Box<dyn Reflect>> {
        self.default_fn.map(|f| f())
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

// Implements the common `Type` accessors for an info struct with a `ty` field.
macro_rules! impl_type_fn {
    ($field:ident) => {
        /// Returns the underlying [`Type`](crate::info::Type).
        #[inline]
        pub const fn ty(&self) -> &$crate::info::Type {
            &self.$field
        }

        /// Returns the [`TypeId`](core::any::TypeId).
        #[inline]
        pub const fn ty_id(&self) -> ::core::any::TypeId {
            self.$field.id()
        }

        /// Returns the fully qualified type path.
        #[inline]
        pub fn type_path(&self) -> &'static str {
            self.$field.path()
        }

        /// Returns the short type name.
        #[inline]
        pub fn type_name(&self) -> &'static str {
            self.$field.name()
        }

        /// Check if the given type matches this one.
        #[inline]
        pub fn type_is<T: ::core::any::Any>(&self) -> bool {
            self.$field.is::<T>()
        }

        /// Registers `T::default` as the default constructor of this type.
        ///
        /// # Panics
        ///
        /// Panics if `T` is not the described type.
        #[inline]
        pub fn with_default<T: Default + $crate::Reflect>(mut self) -> Self {
            self.$field = self.$field.with_default::<T>();
            self
        }
    };
}

pub(crate) use impl_type_fn;

// -----------------------------------------------------------------------------
// TypeInfo

/// Compile-time type information for the reflected types.
///
/// Generally a type's `TypeInfo` is defined by the [`Typed`] trait, and
/// retrieved with [`Typed::type_info`] or, for a `dyn Reflect`,
/// [`DynamicTyped::reflect_type_info`].
///
/// [`Typed`]: crate::info::Typed
/// [`Typed::type_info`]: crate::info::Typed::type_info
/// [`DynamicTyped::reflect_type_info`]: crate::info::DynamicTyped::reflect_type_info
#[derive(Debug, Clone)]
pub enum TypeInfo {
    Struct(StructInfo),
    List(ListInfo),
    Optional(OptionalInfo),
    Opaque(OpaqueInfo),
}

// Helper macro that implements type-safe accessor methods like `as_struct`.
macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $info:ident) => {
        /// Convert [`TypeInfo`] to specific type information.
        pub const fn $name(&self) -> Result<&$info, ReflectKindError> {
            match self {
                Self::$kind(info) => Ok(info),
                _ => Err(ReflectKindError {
                    expected: ReflectKind::$kind,
                    received: self.kind(),
                }),
            }
        }
    };
}

macro_rules! impl_is_method {
    ($name:ident : $kind:ident) => {
        /// Check information kind.
        #[inline]
        pub const fn $name(&self) -> bool {
            matches!(self, Self::$kind(..))
        }
    };
}

impl TypeInfo {
    impl_cast_method!(as_struct: Struct => StructInfo);
    impl_cast_method!(as_list: List => ListInfo);
    impl_cast_method!(as_optional: Optional => OptionalInfo);
    impl_cast_method!(as_opaque: Opaque => OpaqueInfo);

    impl_is_method!(is_struct: Struct);
    impl_is_method!(is_list: List);
    impl_is_method!(is_optional: Optional);
    impl_is_method!(is_opaque: Opaque);

    /// Returns the underlying [`Type`] metadata for this `TypeInfo`.
    pub const fn ty(&self) -> &Type {
        match self {
            Self::Struct(info) => info.ty(),
            Self::List(info) => info.ty(),
            Self::Optional(info) => info.ty(),
            Self::Opaque(info) => info.ty(),
        }
    }

    /// Returns the [`ReflectKind`] of the described type.
    pub const fn kind(&self) -> ReflectKind {
        match self {
            Self::Struct(_) => ReflectKind::Struct,
            Self::List(_) => ReflectKind::List,
            Self::Optional(_) => ReflectKind::Optional,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }

    /// Returns the [`TypeId`].
    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty().id()
    }

    /// Returns the fully qualified type path.
    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.ty().path()
    }

    /// Check if the given type matches this one.
    #[inline]
    pub fn type_is<T: Any>(&self) -> bool {
        self.ty().is::<T>()
    }

    /// Builds the default value of the described type, if it registered one.
    ///
    /// # Examples
    ///
    /// ```
    /// use fm_reflect::info::Typed;
    ///
    /// let value = i32::type_info().default_value().unwrap();
    /// assert_eq!(value.downcast_ref::<i32>(), Some(&0));
    /// ```
    #[inline]
    pub fn default_value(&self) -> Option<Box<dyn Reflect>> {
        self.ty().default_value()
    }
}

#[cfg(test)]
mod tests {
    use super::{ReflectKind, TypeInfo};
    use crate::info::Typed;

    #[test]
    fn kind_and_casts() {
        let info: &TypeInfo = <Vec<u8>>::type_info();
        assert_eq!(info.kind(), ReflectKind::List);
        assert!(info.as_list().is_ok());

        let err = info.as_struct().unwrap_err();
        assert_eq!(err.expected, ReflectKind::Struct);
        assert_eq!(err.received, ReflectKind::List);
        assert_eq!(
            err.to_string(),
            "reflect kind mismatch: expected Struct, received List"
        );
    }

    #[test]
    fn default_value_of_generic_types() {
        let value = <Option<u8>>::type_info().default_value().unwrap();
        assert_eq!(value.downcast_ref::<Option<u8>>(), Some(&None));

        let value = <Vec<String>>::type_info().default_value().unwrap();
        assert_eq!(value.downcast_ref::<Vec<String>>(), Some(&Vec::new()));
    }
}
