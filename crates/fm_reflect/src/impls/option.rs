use core::fmt;

use crate::Reflect;
use crate::impls::{GenericTypeInfoCell, GenericTypePathCell, concat};
use crate::impls::{optional_debug, optional_partial_eq};
use crate::info::{OptionalInfo, TypeInfo, TypePath, Typed};
use crate::ops::{Optional, ReflectCloneError};
use crate::reflection::impl_reflect_cast_fn;

impl<T: TypePath> TypePath for Option<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["core::option::Option<", T::type_path(), ">"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["Option<", T::type_name(), ">"]))
    }

    #[inline]
    fn type_ident() -> &'static str {
        "Option"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("core::option")
    }
}

impl<T: Reflect + Typed> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Optional(OptionalInfo::new::<Self, T>().with_default::<Self>())
        })
    }
}

impl<T: Reflect + Typed> Optional for Option<T> {
    #[inline]
    fn value(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(|value| value as &dyn Reflect)
    }

    #[inline]
    fn inner_info(&self) -> &'static TypeInfo {
        T::type_info()
    }

    fn replace(
        &mut self,
        value: Box<dyn Reflect>,
    ) -> Result<Option<Box<dyn Reflect>>, Box<dyn Reflect>> {
        let value = value.take::<T>()?;
        Ok(Option::replace(self, value).map(Reflect::into_boxed_reflect))
    }

    fn get_or_insert_default(&mut self) -> Option<&mut dyn Reflect> {
        if self.is_none() {
            let value = T::type_info().default_value()?.take::<T>().ok()?;
            *self = Some(value);
        }
        self.as_mut().map(|value| value as &mut dyn Reflect)
    }
}

impl<T: Reflect + Typed> Reflect for Option<T> {
    impl_reflect_cast_fn!(Optional);

    fn reflect_clone(&self) -> Result<Box<dyn Reflect>, ReflectCloneError> {
        match self {
            Some(value) => {
                let value = value.reflect_clone()?.take::<T>().map_err(|_| {
                    ReflectCloneError::NotSupport {
                        type_path: Self::type_path().into(),
                    }
                })?;
                Ok(Box::new(Some(value)))
            }
            None => Ok(Box::new(None::<T>)),
        }
    }

    #[inline]
    fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
        optional_partial_eq(self, other)
    }

    #[inline]
    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        optional_debug(self, f)
    }
}

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::{TypePath, Typed};
    use crate::ops::Optional;

    #[test]
    fn type_paths() {
        assert_eq!(
            <Option<Vec<u8>>>::type_path(),
            "core::option::Option<alloc::vec::Vec<u8>>"
        );
        assert_eq!(<Option<u8>>::type_ident(), "Option");
        assert!(<Option<u8>>::type_info().as_optional().unwrap().some_is::<u8>());
    }

    #[test]
    fn replace_checks_the_payload_type() {
        let mut value = Some(1_u16);
        let old = Optional::replace(&mut value, Box::new(2_u16)).unwrap();
        assert_eq!(old.unwrap().downcast_ref::<u16>(), Some(&1));
        assert_eq!(value, Some(2));

        assert!(Optional::replace(&mut value, Box::new(3_u32)).is_err());
        assert_eq!(value, Some(2));
    }

    #[test]
    fn compare_and_debug() {
        let value = Some(String::from("x"));
        assert_eq!(value.reflect_partial_eq(&Some(String::from("x"))), Some(true));
        assert_eq!(value.reflect_partial_eq(&None::<String>), Some(false));
        assert_eq!(format!("{:?}", value.as_reflect()), "Some(\"x\")");

        let value: Option<String> = None;
        assert_eq!(value.reflect_partial_eq(&None::<String>), Some(true));
        assert_eq!(format!("{:?}", value.as_reflect()), "None");
    }

    #[test]
    fn nested_default_insertion() {
        let mut value: Option<Option<i8>> = None;
        let inner = Optional::get_or_insert_default(&mut value).unwrap();
        assert!(inner.is::<Option<i8>>());
        assert_eq!(value, Some(None));
    }
}
