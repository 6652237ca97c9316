//! Element-wise record copies between two collections.

use alloc::borrow::Cow;

use fm_reflect::Reflect;
use fm_reflect::ops::List;

use crate::introspect::{resolve_records, resolve_struct_mut};
use crate::{FieldMatcher, MapError};

/// Applies a [`FieldMatcher`] to every element of a collection.
///
/// # Examples
///
/// ```
/// use fm_mapper::CollectionMapper;
/// use fm_reflect::derive::Reflect;
///
/// #[derive(Reflect)]
/// struct Row {
///     id: u32,
///     label: Option<String>,
/// }
///
/// #[derive(Reflect, Default)]
/// #[reflect(default)]
/// struct View {
///     id: u32,
///     label: String,
/// }
///
/// let rows = vec![
///     Row { id: 1, label: Some("a".into()) },
///     Row { id: 2, label: None },
/// ];
/// let mut views: Vec<View> = Vec::new();
///
/// CollectionMapper::default().map_collection(&rows, &mut views).unwrap();
///
/// assert_eq!(views.len(), 2);
/// assert_eq!((views[0].id, views[0].label.as_str()), (1, "a"));
/// assert_eq!((views[1].id, views[1].label.as_str()), (2, ""));
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct CollectionMapper {
    matcher: FieldMatcher,
}

impl CollectionMapper {
    #[inline]
    pub const fn new(matcher: FieldMatcher) -> Self {
        Self { matcher }
    }

    #[inline]
    pub const fn matcher(&self) -> &FieldMatcher {
        &self.matcher
    }

    /// Replaces the contents of `dest` with one new element per element of
    /// `source`, in order.
    ///
    /// Each new element starts as the default value of the destination item
    /// type, is resolved for writing (so `Vec<Option<T>>` works), then filled
    /// from the source element with the [`FieldMatcher`].
    ///
    /// The operation is all-or-nothing: on error `dest` is left as it was.
    ///
    /// # Errors
    ///
    /// - [`MapError::InvalidValue`] if a source element is `None`.
    /// - [`MapError::KindMismatch`] if an element is not a record.
    /// - [`MapError::MixedCollection`] if the source elements do not share
    ///   one layout.
    /// - [`MapError::MissingDefault`] if the destination item type has no
    ///   default constructor.
    /// - [`MapError::ImmutableTarget`] if `dest` rejects an element.
    /// - Any error of [`FieldMatcher::copy_fields`].
    pub fn map_collection(&self, source: &dyn List, dest: &mut dyn List) -> Result<(), MapError> {
        let item_info = dest.item_info().ok_or(MapError::UnsupportedKind {
            type_path: dest.reflect_type_path(),
        })?;

        let records = resolve_records(source)?;
        let mut staged: Vec<Box<dyn Reflect>> = Vec::with_capacity(records.len());
        for from in records {
            let mut fresh = item_info.default_value().ok_or(MapError::MissingDefault {
                type_path: item_info.type_path(),
            })?;
            let to = resolve_struct_mut(fresh.as_mut())?;
            self.matcher.copy_fields(from, to)?;
            staged.push(fresh);
        }

        log::debug!(
            "mapped {} elements into `{}`",
            staged.len(),
            dest.reflect_type_path(),
        );
        replace_contents(dest, staged)
    }
}

/// Swaps the contents of `dest` for `items`, restoring the old contents if
/// `dest` rejects an item.
fn replace_contents(dest: &mut dyn List, items: Vec<Box<dyn Reflect>>) -> Result<(), MapError> {
    let mut previous = Vec::with_capacity(dest.len());
    while let Some(item) = dest.pop() {
        previous.push(item);
    }

    for item in items {
        if let Err(item) = dest.try_push(item) {
            let target = Cow::Owned(format!(
                "{} (item `{}`)",
                dest.reflect_type_path(),
                item.reflect_type_path(),
            ));
            dest.clear();
            for item in previous.into_iter().rev() {
                // These items came out of `dest`, so it takes them back.
                let _ = dest.try_push(item);
            }
            return Err(MapError::ImmutableTarget { target });
        }
    }
    Ok(())
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use fm_reflect::derive::Reflect;
    use fm_reflect::ops::DynamicStruct;

    use super::*;
    use crate::MergePolicy;

    #[derive(Reflect, Debug, PartialEq)]
    struct Src {
        id: u32,
        name: String,
        flag: bool,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Dst {
        id: u32,
        name: Option<String>,
        flag: u8,
    }

    #[derive(Reflect, Debug, PartialEq)]
    struct NoDefault {
        id: u32,
    }

    fn sources() -> Vec<Src> {
        (1..=3)
            .map(|id| Src {
                id,
                name: format!("n{id}"),
                flag: true,
            })
            .collect()
    }

    #[test]
    fn preserves_length_and_order() {
        let mut dest: Vec<Dst> = Vec::new();
        CollectionMapper::default()
            .map_collection(&sources(), &mut dest)
            .unwrap();

        assert_eq!(dest.len(), 3);
        for (index, dst) in dest.as_slice().iter().enumerate() {
            let id = index as u32 + 1;
            assert_eq!(dst.id, id);
            assert_eq!(dst.name, Some(format!("n{id}")));
            assert_eq!(dst.flag, 0);
        }
    }

    #[test]
    fn replaces_previous_contents() {
        let mut dest = vec![Dst { id: 9, name: None, flag: 9 }];
        CollectionMapper::default()
            .map_collection(&sources(), &mut dest)
            .unwrap();

        assert_eq!(dest.len(), 3);
        assert_eq!(dest[0].id, 1);
        assert_eq!(dest[0].flag, 0);
    }

    #[test]
    fn optional_elements() {
        let source = vec![Some(Src { id: 1, name: "a".into(), flag: false })];
        let mut dest: Vec<Option<Dst>> = Vec::new();
        CollectionMapper::default()
            .map_collection(&source, &mut dest)
            .unwrap();
        assert_eq!(dest[0].as_ref().map(|dst| dst.id), Some(1));

        let source: Vec<Option<Src>> = vec![None];
        let err = CollectionMapper::default()
            .map_collection(&source, &mut dest)
            .unwrap_err();
        assert!(matches!(err, MapError::InvalidValue { .. }));
        // Left untouched.
        assert_eq!(dest.len(), 1);
    }

    #[test]
    fn failures_are_all_or_nothing() {
        let mut dest = vec![Dst { id: 9, name: None, flag: 9 }];
        let err = CollectionMapper::new(FieldMatcher::new(MergePolicy::Strict))
            .map_collection(&sources(), &mut dest)
            .unwrap_err();

        assert!(matches!(err, MapError::FieldMismatch { .. }));
        assert_eq!(dest, [Dst { id: 9, name: None, flag: 9 }]);
    }

    #[test]
    fn missing_default() {
        let mut dest: Vec<NoDefault> = Vec::new();
        let err = CollectionMapper::default()
            .map_collection(&sources(), &mut dest)
            .unwrap_err();
        assert!(matches!(err, MapError::MissingDefault { .. }));
    }

    #[test]
    fn mixed_mappings_are_rejected() {
        let mut first = DynamicStruct::new();
        first.extend("id", 1_u32);
        let mut second = DynamicStruct::new();
        second.extend("name", Some(String::from("x")));
        second.extend("extra", 9_i32);

        let mut dest = vec![Dst { id: 9, name: None, flag: 9 }];
        let err = CollectionMapper::default()
            .map_collection(&vec![first, second], &mut dest)
            .unwrap_err();

        assert!(matches!(err, MapError::MixedCollection { index: 1 }));
        assert_eq!(dest, [Dst { id: 9, name: None, flag: 9 }]);
    }

    #[test]
    fn uniform_mappings() {
        let rows: Vec<DynamicStruct> = (1..=2_u32)
            .map(|id| {
                let mut row = DynamicStruct::new();
                row.extend("id", id);
                row.extend("flag", 1_u8);
                row
            })
            .collect();

        let mut dest: Vec<Dst> = Vec::new();
        CollectionMapper::default()
            .map_collection(&rows, &mut dest)
            .unwrap();

        assert_eq!(dest[1], Dst { id: 2, name: None, flag: 1 });
    }

    #[test]
    fn non_record_elements() {
        let mut dest: Vec<Dst> = Vec::new();
        let err = CollectionMapper::default()
            .map_collection(&vec![1_u32, 2], &mut dest)
            .unwrap_err();
        assert!(matches!(err, MapError::KindMismatch { .. }));
    }
}
