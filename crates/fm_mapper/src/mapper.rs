use fm_reflect::Reflect;
use fm_reflect::ops::{DynamicStruct, ReflectMut, ReflectRef};

use crate::introspect::{Shape, declared_shape, resolve, resolve_mut};
use crate::{CollectionMapper, Connector, FieldMatcher, MapError, MergePolicy};

/// Entry point holding a [`MergePolicy`].
///
/// The free functions of this crate use `Mapper::new()`, which is lenient.
///
/// # Examples
///
/// ```
/// use fm_mapper::{MapError, Mapper, MergePolicy};
/// use fm_reflect::derive::Reflect;
///
/// #[derive(Reflect)]
/// struct A {
///     id: u32,
/// }
///
/// #[derive(Reflect, Default)]
/// struct B {
///     id: String,
/// }
///
/// let mut b = B::default();
/// assert!(Mapper::new().map(&A { id: 1 }, &mut b).is_ok());
///
/// let strict = Mapper::new().policy(MergePolicy::Strict);
/// assert!(matches!(
///     strict.map(&A { id: 1 }, &mut b),
///     Err(MapError::FieldMismatch { .. })
/// ));
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct Mapper {
    matcher: FieldMatcher,
}

impl Mapper {
    /// Creates a lenient mapper.
    #[inline]
    pub const fn new() -> Self {
        Self {
            matcher: FieldMatcher::new(MergePolicy::Lenient),
        }
    }

    /// Sets the merge policy.
    #[inline]
    pub const fn policy(mut self, policy: MergePolicy) -> Self {
        self.matcher = FieldMatcher::new(policy);
        self
    }

    #[inline]
    pub const fn matcher(&self) -> &FieldMatcher {
        &self.matcher
    }

    /// Copies `source` into `dest`.
    ///
    /// Both sides are resolved through `Option` layers, `dest` for writing.
    /// The shapes are compared first, so a `None` in `dest` is only filled
    /// when the copy can proceed. Two records are copied with
    /// [`FieldMatcher::copy_fields`], two collections with
    /// [`CollectionMapper::map_collection`].
    ///
    /// # Errors
    ///
    /// - [`MapError::KindMismatch`] if one side is a record and the other a
    ///   collection, or only one side is either.
    /// - [`MapError::UnsupportedKind`] if neither side is a record or a
    ///   collection.
    /// - Any error of the copy itself.
    pub fn map(&self, source: &dyn Reflect, dest: &mut dyn Reflect) -> Result<(), MapError> {
        let source = resolve(source)?;
        let expected = Shape::of(source);

        // Checked before `resolve_mut` fills any `None` layer of `dest`.
        let found = declared_shape(dest);
        if expected != found {
            return Err(MapError::KindMismatch { expected, found });
        }
        if expected == Shape::Other {
            return Err(MapError::UnsupportedKind {
                type_path: source.reflect_type_path(),
            });
        }

        let dest = resolve_mut(dest)?;
        let found = Shape::of(dest);
        match (source.reflect_ref(), dest.reflect_mut()) {
            (ReflectRef::Struct(from), ReflectMut::Struct(to)) => {
                self.matcher.copy_fields(from, to)?;
                Ok(())
            }
            (ReflectRef::List(from), ReflectMut::List(to)) => {
                CollectionMapper::new(self.matcher).map_collection(from, to)
            }
            _ => Err(MapError::KindMismatch { expected, found }),
        }
    }

    /// See [`find_struct`](crate::find_struct).
    #[inline]
    pub fn find_struct<'a>(
        &self,
        collection: &'a dyn Reflect,
        criteria: &DynamicStruct,
        connector: Connector,
    ) -> Result<Option<&'a dyn Reflect>, MapError> {
        crate::search::find_struct(collection, criteria, connector)
    }

    /// See [`position_struct`](crate::position_struct).
    #[inline]
    pub fn position_struct(
        &self,
        collection: &dyn Reflect,
        criteria: &DynamicStruct,
        connector: Connector,
    ) -> Result<Option<usize>, MapError> {
        crate::search::position_struct(collection, criteria, connector)
    }

    /// See [`index_of`](crate::index_of).
    #[inline]
    pub fn index_of(
        &self,
        collection: &dyn Reflect,
        target: &dyn Reflect,
    ) -> Result<Option<usize>, MapError> {
        crate::search::index_of(collection, target)
    }

    /// See [`record_to_mapping`](crate::record_to_mapping).
    #[inline]
    pub fn record_to_mapping(&self, record: &dyn Reflect) -> Result<DynamicStruct, MapError> {
        crate::convert::record_to_mapping(record)
    }

    /// See [`mapping_to_record`](crate::mapping_to_record). Values are
    /// adapted with this mapper's policy.
    #[inline]
    pub fn mapping_to_record(
        &self,
        mapping: &DynamicStruct,
        dest: &mut dyn Reflect,
    ) -> Result<(), MapError> {
        crate::convert::mapping_into(&self.matcher, mapping, dest)
    }
}

#[cfg(test)]
mod tests {
    use fm_reflect::derive::Reflect;

    use super::*;

    #[derive(Reflect, Debug, PartialEq)]
    struct Person {
        name: String,
        age: i32,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Contact {
        name: String,
        age: Option<i32>,
    }

    fn person() -> Person {
        Person {
            name: "a".into(),
            age: 5,
        }
    }

    fn contact() -> Contact {
        Contact {
            name: "a".into(),
            age: Some(5),
        }
    }

    #[test]
    fn dispatch_on_resolved_shapes() {
        let mut to: Option<Contact> = None;
        Mapper::new().map(&Some(person()), &mut to).unwrap();
        assert_eq!(to, Some(contact()));

        let mut list: Vec<Contact> = Vec::new();
        Mapper::new().map(&vec![person()], &mut list).unwrap();
        assert_eq!(list, [contact()]);
    }

    #[test]
    fn shape_errors() {
        let mut list: Vec<Contact> = Vec::new();
        assert!(matches!(
            Mapper::new().map(&person(), &mut list),
            Err(MapError::KindMismatch {
                expected: Shape::Record,
                found: Shape::Collection,
            })
        ));

        let mut number = 0_i32;
        assert!(matches!(
            Mapper::new().map(&1_i32, &mut number),
            Err(MapError::UnsupportedKind { .. })
        ));

        let missing: Option<Person> = None;
        assert!(matches!(
            Mapper::new().map(&missing, &mut Contact::default()),
            Err(MapError::InvalidValue { .. })
        ));
    }

    #[test]
    fn failed_dispatch_leaves_none_destination() {
        let mut to: Option<Contact> = None;
        assert!(matches!(
            Mapper::new().map(&1_i32, &mut to),
            Err(MapError::KindMismatch {
                expected: Shape::Other,
                found: Shape::Record,
            })
        ));
        assert_eq!(to, None);

        let mut list: Option<Vec<Contact>> = None;
        assert!(Mapper::new().map(&person(), &mut list).is_err());
        assert_eq!(list, None);
    }

    #[test]
    fn policy_applies_to_mappings() {
        let mut mapping = DynamicStruct::new();
        mapping.extend("age", String::from("five"));

        let mut dest = contact();
        Mapper::new().mapping_to_record(&mapping, &mut dest).unwrap();
        assert_eq!(dest, contact());

        let strict = Mapper::new().policy(MergePolicy::Strict);
        assert_eq!(strict.matcher().policy(), MergePolicy::Strict);
        assert!(strict.mapping_to_record(&mapping, &mut dest).is_err());
    }
}
