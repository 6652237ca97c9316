use serde_core::ser::{Error, SerializeMap, SerializeStruct};
use serde_core::{Serialize, Serializer};

use super::ReflectSerializer;
use crate::info::TypeInfo;
use crate::ops::Struct;

/// A serializer for [`Struct`] values.
///
/// Types with a static [`StructInfo`](crate::info::StructInfo) are written as
/// structs; dynamic structs without one are written as maps.
pub(super) struct StructSerializer<'a> {
    pub struct_value: &'a dyn Struct,
}

impl Serialize for StructSerializer<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let Some(TypeInfo::Struct(struct_info)) = self.struct_value.represented_type_info() else {
            let mut state = serializer.serialize_map(Some(self.struct_value.field_len()))?;
            for (index, value) in self.struct_value.iter_fields().enumerate() {
                let Some(name) = self.struct_value.name_at(index) else {
                    continue;
                };
                state.serialize_entry(name, &ReflectSerializer::new(value))?;
            }
            return state.end();
        };

        let mut state =
            serializer.serialize_struct(struct_info.type_name(), struct_info.field_len())?;

        for &name in struct_info.field_names() {
            let Some(value) = self.struct_value.field(name) else {
                return Err(S::Error::custom(format_args!(
                    "field `{name}` was missing while serializing type `{}`",
                    struct_info.type_path()
                )));
            };
            state.serialize_field(name, &ReflectSerializer::new(value))?;
        }

        state.end()
    }
}
