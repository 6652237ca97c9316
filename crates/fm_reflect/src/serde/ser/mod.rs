use serde_core::ser::Error;
use serde_core::{Serialize, Serializer};

use crate::Reflect;
use crate::ops::ReflectRef;

// -----------------------------------------------------------------------------
// Modules

mod list_serializer;
mod struct_serializer;

use list_serializer::ListSerializer;
use struct_serializer::StructSerializer;

// -----------------------------------------------------------------------------
// ReflectSerializer

/// A `serde` serializer for any reflected value.
///
/// # Examples
///
/// ```
/// use fm_reflect::{derive::Reflect, ops::{DynamicStruct, Struct}};
/// use fm_reflect::serde::ReflectSerializer;
///
/// #[derive(Reflect)]
/// struct Person {
///     name: String,
///     age: Option<i32>,
///     tags: Vec<&'static str>,
/// }
///
/// let person = Person { name: "a".into(), age: None, tags: vec!["x"] };
/// let json = serde_json::to_string(&ReflectSerializer::new(&person)).unwrap();
/// assert_eq!(json, r#"{"name":"a","age":null,"tags":["x"]}"#);
///
/// let mapping: DynamicStruct = person.to_dynamic_struct().unwrap();
/// let json = serde_json::to_string(&ReflectSerializer::new(&mapping)).unwrap();
/// assert_eq!(json, r#"{"name":"a","age":null,"tags":["x"]}"#);
/// ```
#[derive(Clone, Copy)]
pub struct ReflectSerializer<'a> {
    value: &'a dyn Reflect,
}

impl<'a> ReflectSerializer<'a> {
    /// Creates a serializer for `value`.
    #[inline]
    pub const fn new(value: &'a dyn Reflect) -> Self {
        Self { value }
    }
}

impl Serialize for ReflectSerializer<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.value.reflect_ref() {
            ReflectRef::Struct(struct_value) => {
                StructSerializer { struct_value }.serialize(serializer)
            }
            ReflectRef::List(list) => ListSerializer { list }.serialize(serializer),
            ReflectRef::Optional(optional) => match optional.value() {
                Some(value) => serializer.serialize_some(&ReflectSerializer::new(value)),
                None => serializer.serialize_none(),
            },
            ReflectRef::Opaque(value) => match value.as_serialize() {
                Some(serialize) => serialize.serialize(serializer),
                None => Err(S::Error::custom(format_args!(
                    "no serialization method available for opaque type `{}`",
                    value.reflect_type_path(),
                ))),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ReflectSerializer;
    use crate::ops::DynamicStruct;

    #[test]
    fn mapping_keeps_insertion_order() {
        let mut mapping = DynamicStruct::new();
        mapping.extend("z", 1_u8);
        mapping.extend("a", Some(String::from("s")));
        mapping.extend("m", vec![true, false]);

        let json = serde_json::to_string(&ReflectSerializer::new(&mapping)).unwrap();
        assert_eq!(json, r#"{"z":1,"a":"s","m":[true,false]}"#);
    }

    #[test]
    fn nested_options() {
        let value: Option<Option<i32>> = Some(None);
        let json = serde_json::to_string(&ReflectSerializer::new(&value)).unwrap();
        assert_eq!(json, "null");

        let value = vec![Some(1.5_f64), None];
        let json = serde_json::to_string(&ReflectSerializer::new(&value)).unwrap();
        assert_eq!(json, "[1.5,null]");
    }
}
