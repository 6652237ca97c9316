use core::any::{Any, TypeId};

use crate::info::{ReflectKind, TypeInfo, Typed};

/// Descriptor of a named struct field.
///
/// Generated by `#[derive(Reflect)]` and stored in the static
/// [`StructInfo`](crate::info::StructInfo) of the owning type.
///
/// # Examples
///
/// ```
/// use fm_reflect::{derive::Reflect, info::{ReflectKind, Typed}};
///
/// #[derive(Reflect)]
/// struct Foo {
///     field_a: f32,
///     #[reflect(readonly)]
///     field_b: Option<u8>,
/// }
///
/// let info = Foo::type_info().as_struct().unwrap();
///
/// let a = info.field_at(0).unwrap();
/// assert!(a.type_is::<f32>());
/// assert_eq!(a.name(), "field_a");
/// assert_eq!(a.kind(), ReflectKind::Opaque);
///
/// let b = info.field("field_b").unwrap();
/// assert!(b.is_optional());
/// assert!(b.is_readonly());
/// ```
#[derive(Clone, Debug)]
pub struct NamedField {
    ty_id: TypeId,
    name: &'static str,
    // `TypeInfo` is created on first access; using a function pointer delays it.
    type_info: fn() -> &'static TypeInfo,
    readonly: bool,
}

impl NamedField {
    /// Creates a new [`NamedField`] for the given field `name` and type `T`.
    #[inline]
    pub const fn new<T: Typed>(name: &'static str) -> Self {
        Self {
            name,
            type_info: T::type_info,
            ty_id: TypeId::of::<T>(),
            readonly: false,
        }
    }

    /// Marks the field as readonly: it can be read through reflection but
    /// never written.
    #[inline]
    pub const fn with_readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    /// Returns the `TypeId`.
    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty_id
    }

    /// Check if the given type matches this one.
    #[inline]
    pub fn type_is<T: Any>(&self) -> bool {
        self.ty_id == TypeId::of::<T>()
    }

    /// Returns the field name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the field's [`TypeInfo`].
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    /// Returns the [`ReflectKind`] of the field's type.
    #[inline]
    pub fn kind(&self) -> ReflectKind {
        self.type_info().kind()
    }

    /// Returns `true` if the field is an `Option<T>`.
    #[inline]
    pub fn is_optional(&self) -> bool {
        self.type_info().is_optional()
    }

    /// Returns `true` if the field was declared `#[reflect(readonly)]`.
    #[inline]
    pub const fn is_readonly(&self) -> bool {
        self.readonly
    }
}
