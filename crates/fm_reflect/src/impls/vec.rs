use core::fmt;

use crate::Reflect;
use crate::impls::{GenericTypeInfoCell, GenericTypePathCell, concat};
use crate::impls::{list_debug, list_partial_eq};
use crate::info::{ListInfo, TypeInfo, TypePath, Typed};
use crate::ops::{List, ListItemIter, ReflectCloneError};
use crate::reflection::impl_reflect_cast_fn;

impl<T: TypePath> TypePath for Vec<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["alloc::vec::Vec<", T::type_path(), ">"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["Vec<", T::type_name(), ">"]))
    }

    #[inline]
    fn type_ident() -> &'static str {
        "Vec"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("alloc::vec")
    }
}

impl<T: Reflect + Typed> Typed for Vec<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::List(ListInfo::new::<Self, T>().with_default::<Self>())
        })
    }
}

impl<T: Reflect + Typed> List for Vec<T> {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        <[T]>::get(self, index).map(|value| value as &dyn Reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        <[T]>::get_mut(self, index).map(|value| value as &mut dyn Reflect)
    }

    fn try_push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        let value = value.take::<T>()?;
        Vec::push(self, value);
        Ok(())
    }

    #[inline]
    fn pop(&mut self) -> Option<Box<dyn Reflect>> {
        Vec::pop(self).map(Reflect::into_boxed_reflect)
    }

    #[inline]
    fn clear(&mut self) {
        Vec::clear(self);
    }

    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn iter(&self) -> ListItemIter<'_> {
        ListItemIter::new(self)
    }

    #[inline]
    fn item_info(&self) -> Option<&'static TypeInfo> {
        Some(T::type_info())
    }
}

impl<T: Reflect + Typed> Reflect for Vec<T> {
    impl_reflect_cast_fn!(List);

    fn reflect_clone(&self) -> Result<Box<dyn Reflect>, ReflectCloneError> {
        let mut cloned = Vec::with_capacity(self.len());
        for item in self {
            let item = item.reflect_clone()?.take::<T>().map_err(|_| {
                ReflectCloneError::NotSupport {
                    type_path: Self::type_path().into(),
                }
            })?;
            cloned.push(item);
        }
        Ok(Box::new(cloned))
    }

    #[inline]
    fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
        list_partial_eq(self, other)
    }

    #[inline]
    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        list_debug(self, f)
    }
}

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::{TypePath, Typed};
    use crate::ops::List;

    #[test]
    fn nested_generic_paths() {
        assert_eq!(<Vec<Vec<i32>>>::type_name(), "Vec<Vec<i32>>");
        let info = <Vec<Option<bool>>>::type_info().as_list().unwrap();
        assert!(info.item_is::<Option<bool>>());
        assert!(info.item_info().is_optional());
    }

    #[test]
    fn clone_and_compare() {
        let x = vec![Some(1_u8), None];
        let cloned = x.reflect_clone().unwrap();
        assert_eq!(cloned.downcast_ref::<Vec<Option<u8>>>(), Some(&x));

        assert_eq!(x.reflect_partial_eq(&*cloned), Some(true));
        assert_eq!(x.reflect_partial_eq(&vec![Some(1_u8)]), Some(false));
    }

    #[test]
    fn list_ops() {
        let mut x: Vec<String> = Vec::new();
        let list: &mut dyn List = &mut x;

        assert!(list.try_push(Box::new(String::from("a"))).is_ok());
        assert!(list.try_push(Box::new(1_u8)).is_err());
        assert_eq!(list.len(), 1);
        assert_eq!(format!("{:?}", &*list as &dyn Reflect), "[\"a\"]");

        let popped = list.pop().unwrap();
        assert_eq!(popped.downcast_ref::<String>().map(String::as_str), Some("a"));
        assert!(list.is_empty());
    }
}
