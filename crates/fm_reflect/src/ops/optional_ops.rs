use core::any::TypeId;

use crate::Reflect;
use crate::info::TypeInfo;

/// A trait for type-erased access to a nullable holder (`Option<T>`).
///
/// This is the reflected form of a nullable reference: `None` is the null
/// value, and [`Optional::get_or_insert_default`] allocates a fresh inner
/// value in place.
///
/// # Examples
///
/// ```
/// use fm_reflect::{Reflect, ops::Optional};
///
/// let mut value: Option<i32> = None;
/// let opt: &mut dyn Optional = &mut value;
///
/// assert!(!opt.is_some());
/// *opt.get_or_insert_default().unwrap().downcast_mut::<i32>().unwrap() = 3;
/// assert_eq!(value, Some(3));
/// ```
pub trait Optional: Reflect {
    /// Returns the inner value, or `None` for `None`.
    fn value(&self) -> Option<&dyn Reflect>;

    /// Returns `true` if a value is present.
    #[inline]
    fn is_some(&self) -> bool {
        self.value().is_some()
    }

    /// Returns the [`TypeInfo`] of the `Some` payload.
    fn inner_info(&self) -> &'static TypeInfo;

    /// Returns the [`TypeId`] of the `Some` payload.
    #[inline]
    fn inner_ty_id(&self) -> TypeId {
        self.inner_info().ty_id()
    }

    /// Stores `value` as the payload, returning the previous one.
    ///
    /// Returns `value` back if its type does not match the payload type.
    fn replace(
        &mut self,
        value: Box<dyn Reflect>,
    ) -> Result<Option<Box<dyn Reflect>>, Box<dyn Reflect>>;

    /// Returns the inner value, inserting the payload's default first if
    /// the holder is `None`.
    ///
    /// Returns `None` if the holder is empty and the payload type
    /// registered no default constructor.
    fn get_or_insert_default(&mut self) -> Option<&mut dyn Reflect>;
}
