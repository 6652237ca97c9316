use crate::Reflect;
use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// List trait

/// A trait for type-erased list-like operations via reflection.
///
/// A list is a homogeneous, variable-length sequence. It is implemented for
/// [`Vec<T>`] whenever `T` is reflected.
///
/// # Contract
///
/// Implementors must maintain elements in linear order from front to back,
/// where the front element is at index 0. Every element has the type
/// described by [`List::item_info`]; [`List::try_push`] rejects anything else.
///
/// # Examples
///
/// ```
/// use fm_reflect::{Reflect, ops::List};
///
/// let mut vec = vec![10_u32, 20_u32, 30_u32];
/// let list_ref: &mut dyn List = &mut vec;
///
/// assert_eq!(list_ref.len(), 3);
/// assert!(list_ref.try_push(Box::new(40_u32)).is_ok());
/// assert!(list_ref.try_push(Box::new("forty")).is_err());
/// assert_eq!(list_ref.len(), 4);
/// ```
pub trait List: Reflect {
    /// Returns a reference to the element at `index`, or `None` if out of bounds.
    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    /// Returns a mutable reference to the element at `index`, or `None` if out of bounds.
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Appends an element to the back of the list.
    ///
    /// Returns the element back if its type does not match the item type.
    fn try_push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    /// Removes the back element and returns it, or `None` if empty.
    fn pop(&mut self) -> Option<Box<dyn Reflect>>;

    /// Removes every element.
    fn clear(&mut self);

    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns `true` if the list contains no elements.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over the elements, front to back.
    fn iter(&self) -> ListItemIter<'_>;

    /// Returns the [`TypeInfo`] of the element type, if known.
    ///
    /// # Examples
    ///
    /// ```
    /// use fm_reflect::ops::List;
    ///
    /// let list: &dyn List = &Vec::<Option<u8>>::new();
    /// assert!(list.item_info().unwrap().type_is::<Option<u8>>());
    /// ```
    fn item_info(&self) -> Option<&'static TypeInfo> {
        self.represented_type_info()
            .and_then(|info| info.as_list().ok())
            .map(|info| info.item_info())
    }
}

// -----------------------------------------------------------------------------
// List Item Iterator

/// An iterator over the elements of a list.
pub struct ListItemIter<'a> {
    list: &'a dyn List,
    index: usize,
}

impl<'a> ListItemIter<'a> {
    /// Creates a new iterator for the given list.
    #[inline(always)]
    pub const fn new(list: &'a dyn List) -> Self {
        Self { list, index: 0 }
    }
}

impl<'a> Iterator for ListItemIter<'a> {
    type Item = &'a dyn Reflect;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let value = self.list.get(self.index);
        self.index += value.is_some() as usize;
        value
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.list.len() - self.index;
        (size, Some(size))
    }
}

impl ExactSizeIterator for ListItemIter<'_> {}
