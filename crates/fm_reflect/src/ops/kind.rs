use crate::Reflect;
use crate::info::{ReflectKind, ReflectKindError};
use crate::ops::{List, Optional, Struct};

// Generates `kind()` and the `as_*` casts for one of the kind enums.
macro_rules! impl_kind_enum {
    ($name:ident $(<$lt:lifetime>)? => $($method:ident: $kind:ident => $target:ty),* $(,)?) => {
        impl $(<$lt>)? $name $(<$lt>)? {
            /// Returns the [`ReflectKind`] of this value.
            #[inline]
            pub fn kind(&self) -> ReflectKind {
                match self {
                    Self::Struct(_) => ReflectKind::Struct,
                    Self::List(_) => ReflectKind::List,
                    Self::Optional(_) => ReflectKind::Optional,
                    Self::Opaque(_) => ReflectKind::Opaque,
                }
            }

            $(
                /// Casts to the kind-specific trait object.
                #[inline]
                pub fn $method(self) -> Result<$target, ReflectKindError> {
                    match self {
                        Self::$kind(value) => Ok(value),
                        other => Err(ReflectKindError {
                            expected: ReflectKind::$kind,
                            received: other.kind(),
                        }),
                    }
                }
            )*
        }
    };
}

/// An immutable enumeration of ["kinds"](ReflectKind) of a reflected type.
///
/// Each variant contains a trait object with methods specific to a kind of
/// type. A [`ReflectRef`] is obtained via [`Reflect::reflect_ref`].
///
/// # Examples
///
/// ```
/// use fm_reflect::{Reflect, ops::ReflectRef};
///
/// let value = Some(1_u8);
/// match value.reflect_ref() {
///     ReflectRef::Optional(opt) => assert!(opt.is_some()),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Clone, Copy)]
pub enum ReflectRef<'a> {
    Struct(&'a dyn Struct),
    List(&'a dyn List),
    Optional(&'a dyn Optional),
    Opaque(&'a dyn Reflect),
}

impl_kind_enum!(
    ReflectRef<'a> =>
    as_struct: Struct => &'a dyn Struct,
    as_list: List => &'a dyn List,
    as_optional: Optional => &'a dyn Optional,
    as_opaque: Opaque => &'a dyn Reflect,
);

/// A mutable enumeration of ["kinds"](ReflectKind) of a reflected type.
///
/// A [`ReflectMut`] is obtained via [`Reflect::reflect_mut`].
pub enum ReflectMut<'a> {
    Struct(&'a mut dyn Struct),
    List(&'a mut dyn List),
    Optional(&'a mut dyn Optional),
    Opaque(&'a mut dyn Reflect),
}

impl_kind_enum!(
    ReflectMut<'a> =>
    as_struct: Struct => &'a mut dyn Struct,
    as_list: List => &'a mut dyn List,
    as_optional: Optional => &'a mut dyn Optional,
    as_opaque: Opaque => &'a mut dyn Reflect,
);

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::ReflectKind;

    #[test]
    fn casts_report_kind_errors() {
        let value = vec![1_u8, 2];
        assert_eq!(value.reflect_ref().kind(), ReflectKind::List);
        assert_eq!(value.reflect_ref().as_list().map(|l| l.len()).ok(), Some(2));

        let err = value.reflect_ref().as_struct().err().unwrap();
        assert_eq!(err.expected, ReflectKind::Struct);
        assert_eq!(err.received, ReflectKind::List);
    }
}
