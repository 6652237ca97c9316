//! Resolving the effective value behind `Option` layers.
//!
//! Read paths ([`resolve`]) fail on a `None` layer. Write paths
//! ([`resolve_mut`]) fill every `None` layer with the default value of its
//! payload type through [`ensure_allocated`], so the returned handle is
//! always a concrete value that can be written.

use core::fmt;

use fm_reflect::Reflect;
use fm_reflect::info::TypeInfo;
use fm_reflect::ops::{DynamicStruct, List, Optional, ReflectMut, ReflectRef, Struct};

use crate::MapError;

// -----------------------------------------------------------------------------
// Shape

/// The classification of a resolved value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// A value with named fields, see [`Struct`].
    Record,
    /// A homogeneous sequence, see [`List`].
    Collection,
    /// Anything else: primitives, strings, an unresolved `Option`.
    Other,
}

impl Shape {
    /// Classifies `value` without resolving it.
    ///
    /// # Examples
    ///
    /// ```
    /// use fm_mapper::Shape;
    ///
    /// assert_eq!(Shape::of(&vec![1_u8]), Shape::Collection);
    /// assert_eq!(Shape::of(&1_u8), Shape::Other);
    /// assert_eq!(Shape::of(&Some(vec![1_u8])), Shape::Other);
    /// ```
    pub fn of(value: &dyn Reflect) -> Self {
        match value.reflect_ref() {
            ReflectRef::Struct(_) => Self::Record,
            ReflectRef::List(_) => Self::Collection,
            ReflectRef::Optional(_) | ReflectRef::Opaque(_) => Self::Other,
        }
    }

    /// Classifies the values of a type, looking through `Option` layers.
    ///
    /// # Examples
    ///
    /// ```
    /// use fm_mapper::Shape;
    /// use fm_reflect::info::Typed;
    ///
    /// assert_eq!(Shape::of_type(<Option<Vec<u8>>>::type_info()), Shape::Collection);
    /// assert_eq!(Shape::of_type(<Option<u8>>::type_info()), Shape::Other);
    /// ```
    pub fn of_type(info: &TypeInfo) -> Self {
        let mut info = info;
        loop {
            match info {
                TypeInfo::Struct(_) => return Self::Record,
                TypeInfo::List(_) => return Self::Collection,
                TypeInfo::Optional(optional) => info = optional.some_info(),
                // Mappings describe themselves as opaque.
                TypeInfo::Opaque(_) if info.type_is::<DynamicStruct>() => return Self::Record,
                TypeInfo::Opaque(_) => return Self::Other,
            }
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Record => "record",
            Self::Collection => "collection",
            Self::Other => "other",
        })
    }
}

// -----------------------------------------------------------------------------
// Resolve

/// Dereferences through any number of `Option` layers.
///
/// # Errors
///
/// [`MapError::InvalidValue`] if a layer is `None`.
///
/// # Examples
///
/// ```
/// use fm_mapper::introspect::resolve;
///
/// let value = Some(Some(5_i32));
/// assert_eq!(resolve(&value).unwrap().downcast_ref::<i32>(), Some(&5));
///
/// let value: Option<Option<i32>> = Some(None);
/// assert!(resolve(&value).is_err());
/// ```
pub fn resolve(value: &dyn Reflect) -> Result<&dyn Reflect, MapError> {
    let mut current = value;
    while let ReflectRef::Optional(optional) = current.reflect_ref() {
        current = optional.value().ok_or(MapError::InvalidValue {
            type_path: current.reflect_type_path(),
        })?;
    }
    Ok(current)
}

/// Dereferences through any number of `Option` layers for writing.
///
/// Every `None` layer is replaced by the default value of its payload type.
/// This mutates `value` even if the caller later fails.
///
/// # Errors
///
/// [`MapError::MissingDefault`] if a payload type has no default constructor.
///
/// # Examples
///
/// ```
/// use fm_mapper::introspect::resolve_mut;
///
/// let mut value: Option<Option<i32>> = None;
/// resolve_mut(&mut value).unwrap();
///
/// assert_eq!(value, Some(Some(0)));
/// ```
pub fn resolve_mut(value: &mut dyn Reflect) -> Result<&mut dyn Reflect, MapError> {
    // The kind is checked first so that `value` is not borrowed on the
    // early return.
    if !matches!(value.reflect_ref(), ReflectRef::Optional(_)) {
        return Ok(value);
    }
    let type_path = value.reflect_type_path();
    let ReflectMut::Optional(optional) = value.reflect_mut() else {
        return Err(MapError::InvalidValue { type_path });
    };
    resolve_mut(ensure_allocated(optional)?)
}

/// Returns the payload of `optional`, installing the default value of the
/// payload type first if it is `None`.
///
/// # Errors
///
/// [`MapError::MissingDefault`] if the payload type has no default constructor.
pub fn ensure_allocated(optional: &mut dyn Optional) -> Result<&mut dyn Reflect, MapError> {
    let type_path = optional.inner_info().type_path();
    if !optional.is_some() {
        log::trace!("allocating a default `{type_path}`");
    }
    optional
        .get_or_insert_default()
        .ok_or(MapError::MissingDefault { type_path })
}

/// [`resolve`], then checks that the value has the `expected` shape.
///
/// # Errors
///
/// [`MapError::KindMismatch`] if the resolved shape differs.
pub fn resolve_as(value: &dyn Reflect, expected: Shape) -> Result<&dyn Reflect, MapError> {
    let value = resolve(value)?;
    let found = Shape::of(value);
    if found != expected {
        return Err(MapError::KindMismatch { expected, found });
    }
    Ok(value)
}

/// [`resolve`] to a record.
pub fn resolve_struct(value: &dyn Reflect) -> Result<&dyn Struct, MapError> {
    let value = resolve(value)?;
    match value.reflect_ref() {
        ReflectRef::Struct(value) => Ok(value),
        _ => Err(MapError::KindMismatch {
            expected: Shape::Record,
            found: Shape::of(value),
        }),
    }
}

/// [`resolve_mut`] to a record.
pub fn resolve_struct_mut(value: &mut dyn Reflect) -> Result<&mut dyn Struct, MapError> {
    let value = resolve_mut(value)?;
    let found = Shape::of(value);
    match value.reflect_mut() {
        ReflectMut::Struct(value) => Ok(value),
        _ => Err(MapError::KindMismatch {
            expected: Shape::Record,
            found,
        }),
    }
}

/// [`resolve`] to a collection.
pub fn resolve_list(value: &dyn Reflect) -> Result<&dyn List, MapError> {
    let value = resolve(value)?;
    match value.reflect_ref() {
        ReflectRef::List(value) => Ok(value),
        _ => Err(MapError::KindMismatch {
            expected: Shape::Collection,
            found: Shape::of(value),
        }),
    }
}

/// [`resolve_mut`] to a collection.
pub fn resolve_list_mut(value: &mut dyn Reflect) -> Result<&mut dyn List, MapError> {
    let value = resolve_mut(value)?;
    let found = Shape::of(value);
    match value.reflect_mut() {
        ReflectMut::List(value) => Ok(value),
        _ => Err(MapError::KindMismatch {
            expected: Shape::Collection,
            found,
        }),
    }
}

/// Classifies the value [`resolve_mut`] would return, without allocating.
///
/// A `None` layer is classified by its payload type.
///
/// # Examples
///
/// ```
/// use fm_mapper::{Shape, introspect::declared_shape};
///
/// let value: Option<Option<Vec<u8>>> = None;
/// assert_eq!(declared_shape(&value), Shape::Collection);
/// assert!(value.is_none());
/// ```
pub fn declared_shape(value: &dyn Reflect) -> Shape {
    let mut current = value;
    while let ReflectRef::Optional(optional) = current.reflect_ref() {
        match optional.value() {
            Some(inner) => current = inner,
            None => return Shape::of_type(optional.inner_info()),
        }
    }
    Shape::of(current)
}

// -----------------------------------------------------------------------------
// Records

/// Resolves every element of `list` to a record, checking that they all
/// share one layout.
///
/// Records of one concrete type always share a layout. A mapping has no
/// type of its own, so its layout is its field names in order together
/// with the types of its values.
///
/// # Errors
///
/// - [`MapError::InvalidValue`] if an element is `None`.
/// - [`MapError::KindMismatch`] if an element is not a record.
/// - [`MapError::MixedCollection`] if an element does not share the layout
///   of the first one.
///
/// # Examples
///
/// ```
/// use fm_mapper::{MapError, introspect::resolve_records};
/// use fm_reflect::ops::DynamicStruct;
///
/// let row = |name: &'static str, value: u32| {
///     let mut row = DynamicStruct::new();
///     row.extend(name, value);
///     row
/// };
///
/// assert_eq!(resolve_records(&vec![row("id", 1), row("id", 2)]).unwrap().len(), 2);
/// assert!(matches!(
///     resolve_records(&vec![row("id", 1), row("size", 2)]),
///     Err(MapError::MixedCollection { index: 1 })
/// ));
/// ```
pub fn resolve_records(list: &dyn List) -> Result<Vec<&dyn Struct>, MapError> {
    let mut records: Vec<&dyn Struct> = Vec::with_capacity(list.len());
    for (index, element) in list.iter().enumerate() {
        let record = resolve_struct(element)?;
        if let Some(first) = records.first()
            && !same_layout(*first, record)
        {
            return Err(MapError::MixedCollection { index });
        }
        records.push(record);
    }
    Ok(records)
}

fn same_layout(a: &dyn Struct, b: &dyn Struct) -> bool {
    if !a.is_dynamic() && !b.is_dynamic() {
        return a.ty_id() == b.ty_id();
    }
    a.field_len() == b.field_len()
        && a.iter_fields()
            .zip(b.iter_fields())
            .enumerate()
            .all(|(index, (x, y))| a.name_at(index) == b.name_at(index) && x.ty_id() == y.ty_id())
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use fm_reflect::derive::Reflect;
    use fm_reflect::ops::DynamicStruct;

    use super::*;

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Reflect, Debug, PartialEq)]
    struct NoDefault {
        x: i32,
    }

    #[test]
    fn shapes() {
        assert_eq!(Shape::of(&Point::default()), Shape::Record);
        assert_eq!(Shape::of(&DynamicStruct::new()), Shape::Record);
        assert_eq!(Shape::of(&Vec::<Point>::new()), Shape::Collection);
        assert_eq!(Shape::of(&String::new()), Shape::Other);
    }

    #[test]
    fn read_path_rejects_none() {
        let value: Option<Point> = None;
        assert!(matches!(
            resolve(&value),
            Err(MapError::InvalidValue { .. })
        ));

        let value = Some(Some(Point { x: 1, y: 2 }));
        let record = resolve_struct(&value).unwrap();
        assert_eq!(record.field_as::<i32>("y"), Some(&2));
    }

    #[test]
    fn write_path_allocates() {
        let mut value: Option<Option<Point>> = None;
        let record = resolve_struct_mut(&mut value).unwrap();
        *record.field_mut_as::<i32>("x").unwrap() = 3;

        assert_eq!(value, Some(Some(Point { x: 3, y: 0 })));
    }

    #[test]
    fn write_path_keeps_existing_values() {
        let mut value = Some(Point { x: 1, y: 1 });
        resolve_struct_mut(&mut value).unwrap();
        assert_eq!(value, Some(Point { x: 1, y: 1 }));
    }

    #[test]
    fn missing_default() {
        let mut value: Option<NoDefault> = None;
        assert!(matches!(
            resolve_mut(&mut value),
            Err(MapError::MissingDefault { .. })
        ));
        assert!(value.is_none());
    }

    #[test]
    fn records_share_a_layout() {
        let points = vec![Some(Point { x: 1, y: 2 }), Some(Point::default())];
        assert_eq!(resolve_records(&points).unwrap().len(), 2);

        let row = |x: Box<dyn Reflect>| {
            let mut row = DynamicStruct::new();
            row.extend_boxed("x", x);
            row.extend("y", 0_i32);
            row
        };
        let rows = vec![row(Box::new(1_i32)), row(Box::new(2_i32))];
        assert!(resolve_records(&rows).is_ok());

        // Same names, but `x` holds another type.
        let rows = vec![row(Box::new(1_i32)), row(Box::new(1_i64))];
        assert!(matches!(
            resolve_records(&rows),
            Err(MapError::MixedCollection { index: 1 })
        ));

        let points: Vec<Option<Point>> = vec![Some(Point::default()), None];
        assert!(matches!(
            resolve_records(&points),
            Err(MapError::InvalidValue { .. })
        ));
    }

    #[test]
    fn declared_shapes() {
        let value: Option<Point> = None;
        assert_eq!(declared_shape(&value), Shape::Record);
        let value: Option<DynamicStruct> = None;
        assert_eq!(declared_shape(&value), Shape::Record);
        let value: Option<Option<String>> = Some(None);
        assert_eq!(declared_shape(&value), Shape::Other);
        assert_eq!(declared_shape(&Some(vec![1_u8])), Shape::Collection);
    }

    #[test]
    fn kind_mismatch() {
        let value = Some(vec![1_u8]);
        let err = resolve_struct(&value).err().unwrap();
        assert!(matches!(
            err,
            MapError::KindMismatch {
                expected: Shape::Record,
                found: Shape::Collection,
            }
        ));

        assert!(resolve_as(&value, Shape::Collection).is_ok());

        let mut value = 5_i32;
        assert!(matches!(
            resolve_list_mut(&mut value),
            Err(MapError::KindMismatch { found: Shape::Other, .. })
        ));
    }
}
