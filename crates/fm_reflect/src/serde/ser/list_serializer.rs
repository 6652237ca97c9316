use serde_core::{Serialize, Serializer, ser::SerializeSeq};

use super::ReflectSerializer;
use crate::ops::List;

/// A serializer for [`List`] values.
pub(super) struct ListSerializer<'a> {
    pub list: &'a dyn List,
}

impl Serialize for ListSerializer<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_seq(Some(self.list.len()))?;
        for value in self.list.iter() {
            state.serialize_element(&ReflectSerializer::new(value))?;
        }
        state.end()
    }
}
