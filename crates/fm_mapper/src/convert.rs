//! Conversions between records and mappings.
//!
//! A mapping is a [`DynamicStruct`]: an insertion-ordered list of named,
//! boxed values. It can be serialized with
//! [`ReflectSerializer`](fm_reflect::serde::ReflectSerializer).

use fm_reflect::Reflect;
use fm_reflect::ops::DynamicStruct;

use crate::introspect::{Shape, declared_shape, resolve_struct, resolve_struct_mut};
use crate::{FieldMatcher, MapError};

/// Copies every field of `record` into a new mapping, in field order.
///
/// `record` is resolved through `Option` layers first. The mapping remembers
/// the type of the record it was made from.
///
/// # Errors
///
/// - [`MapError::InvalidValue`] if `record` is `None`.
/// - [`MapError::KindMismatch`] if `record` is not a record.
/// - [`MapError::Clone`] if a field value cannot be cloned.
///
/// # Examples
///
/// ```
/// use fm_mapper::record_to_mapping;
/// use fm_reflect::derive::Reflect;
///
/// #[derive(Reflect)]
/// struct User {
///     name: String,
///     age: Option<i32>,
/// }
///
/// let user = User { name: "a".into(), age: Some(5) };
/// let mapping = record_to_mapping(&user).unwrap();
///
/// assert_eq!(mapping.field_names().collect::<Vec<_>>(), ["name", "age"]);
/// ```
pub fn record_to_mapping(record: &dyn Reflect) -> Result<DynamicStruct, MapError> {
    let record = resolve_struct(record)?;
    Ok(record.to_dynamic_struct()?)
}

/// Writes the entries of `mapping` into the same-named fields of `dest`.
///
/// `dest` is resolved for writing, so a `None` destination of a record
/// type is allocated first. Keys without a field are ignored and fields without a key keep
/// their value. Values are adapted like [`FieldMatcher::copy_fields`] does,
/// with the lenient policy.
///
/// # Errors
///
/// - [`MapError::MissingDefault`] if `dest` is `None` and its type has no
///   default constructor.
/// - [`MapError::KindMismatch`] if `dest` is not a record.
///
/// # Examples
///
/// ```
/// use fm_mapper::mapping_to_record;
/// use fm_reflect::{derive::Reflect, ops::DynamicStruct};
///
/// #[derive(Reflect, Default)]
/// struct User {
///     name: String,
///     age: Option<i32>,
/// }
///
/// let mut mapping = DynamicStruct::new();
/// mapping.extend("age", 5_i32);
/// mapping.extend("unknown", true);
///
/// let mut user = User::default();
/// mapping_to_record(&mapping, &mut user).unwrap();
///
/// assert_eq!(user.age, Some(5));
/// assert_eq!(user.name, "");
/// ```
pub fn mapping_to_record(mapping: &DynamicStruct, dest: &mut dyn Reflect) -> Result<(), MapError> {
    mapping_into(&FieldMatcher::default(), mapping, dest)
}

pub(crate) fn mapping_into(
    matcher: &FieldMatcher,
    mapping: &DynamicStruct,
    dest: &mut dyn Reflect,
) -> Result<(), MapError> {
    let found = declared_shape(dest);
    if found != Shape::Record {
        return Err(MapError::KindMismatch {
            expected: Shape::Record,
            found,
        });
    }
    let dest = resolve_struct_mut(dest)?;
    matcher.copy_fields(mapping, dest)?;
    Ok(())
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use fm_reflect::derive::Reflect;
    use fm_reflect::ops::Struct;

    use super::*;

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct User {
        name: String,
        age: Option<i32>,
        tags: Vec<String>,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Account {
        name: String,
        age: i32,
        active: bool,
    }

    fn user() -> User {
        User {
            name: "a".into(),
            age: Some(5),
            tags: vec!["x".into()],
        }
    }

    #[test]
    fn keeps_field_order_and_values() {
        let mapping = record_to_mapping(&user()).unwrap();

        assert_eq!(
            mapping.field_names().collect::<Vec<_>>(),
            ["name", "age", "tags"]
        );
        let mapping: &dyn Struct = &mapping;
        assert_eq!(mapping.field_as::<Option<i32>>("age"), Some(&Some(5)));
        assert!(mapping.represented_type_info().is_some_and(|info| info.type_is::<User>()));
    }

    #[test]
    fn round_trip() {
        let mapping = record_to_mapping(&user()).unwrap();
        let mut copy = User::default();
        mapping_to_record(&mapping, &mut copy).unwrap();
        assert_eq!(copy, user());
    }

    #[test]
    fn adapts_into_another_shape() {
        let mapping = record_to_mapping(&user()).unwrap();
        let mut account = Account {
            active: true,
            ..Default::default()
        };
        mapping_to_record(&mapping, &mut account).unwrap();

        assert_eq!(
            account,
            Account {
                name: "a".into(),
                age: 5,
                active: true,
            }
        );
    }

    #[test]
    fn resolves_both_ends() {
        let record: Option<Option<User>> = Some(Some(user()));
        assert_eq!(record_to_mapping(&record).unwrap().field_len(), 3);

        let missing: Option<User> = None;
        assert!(matches!(
            record_to_mapping(&missing),
            Err(MapError::InvalidValue { .. })
        ));

        let mapping = record_to_mapping(&user()).unwrap();
        let mut dest: Option<User> = None;
        mapping_to_record(&mapping, &mut dest).unwrap();
        assert_eq!(dest, Some(user()));

        let mut dest = 1_u8;
        assert!(matches!(
            mapping_to_record(&mapping, &mut dest),
            Err(MapError::KindMismatch { expected: Shape::Record, found: Shape::Other })
        ));

        let mut dest: Option<Vec<User>> = None;
        assert!(matches!(
            mapping_to_record(&mapping, &mut dest),
            Err(MapError::KindMismatch { found: Shape::Collection, .. })
        ));
        assert_eq!(dest, None);
    }
}
