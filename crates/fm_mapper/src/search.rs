//! Searching a collection by field values or by whole values.

use core::fmt;
use core::str::FromStr;

use fm_reflect::Reflect;
use fm_reflect::ops::{DynamicStruct, List, Struct};

use crate::MapError;
use crate::introspect::{resolve_list, resolve_records};

// -----------------------------------------------------------------------------
// Connector

/// How the criteria of [`find_struct`] are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connector {
    /// Every criterion must match.
    And,
    /// At least one criterion must match.
    Or,
}

impl Connector {
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }

    fn matches(self, record: &dyn Struct, criteria: &DynamicStruct) -> bool {
        let mut checks = criteria.iter().map(|(name, expected)| {
            record
                .field(name)
                .is_some_and(|field| field.reflect_partial_eq(expected) == Some(true))
        });
        match self {
            Self::And => checks.all(|ok| ok),
            Self::Or => checks.any(|ok| ok),
        }
    }
}

impl fmt::Display for Connector {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses `"AND"` or `"OR"`, ignoring case and surrounding whitespace.
///
/// # Examples
///
/// ```
/// use fm_mapper::{Connector, MapError};
///
/// assert_eq!(" and ".parse::<Connector>().unwrap(), Connector::And);
/// assert!(matches!("AND|OR".parse::<Connector>(), Err(MapError::OneConnector(_))));
/// assert!(matches!("XOR".parse::<Connector>(), Err(MapError::InvalidParams(_))));
/// ```
impl FromStr for Connector {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut found = None;
        for word in s
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|word| !word.is_empty())
        {
            let connector = if word.eq_ignore_ascii_case("and") {
                Self::And
            } else if word.eq_ignore_ascii_case("or") {
                Self::Or
            } else {
                return Err(MapError::invalid_params(format!("unknown connector `{word}`")));
            };
            if found.replace(connector).is_some() {
                return Err(MapError::OneConnector(s.to_owned()));
            }
        }
        found.ok_or_else(|| MapError::invalid_params("connector is empty"))
    }
}

// -----------------------------------------------------------------------------
// Search

/// Returns the first element of `collection` whose fields match `criteria`.
///
/// Each entry of `criteria` names a field and its expected value. A
/// criterion matches when the element has a field of that name whose value
/// is equal (see [`Reflect::reflect_partial_eq`]) to the expected one, so
/// the value types must be identical.
///
/// `collection` is resolved through `Option` layers to a [`List`], and every
/// element to a record. `Ok(None)` means that no element matches.
///
/// # Errors
///
/// - [`MapError::InvalidParams`] if `criteria` is empty.
/// - [`MapError::InvalidValue`] if the collection or an element is `None`.
/// - [`MapError::KindMismatch`] if `collection` is not a collection, or an
///   element is not a record.
/// - [`MapError::MixedCollection`] if the elements do not share one layout.
///
/// # Examples
///
/// ```
/// use fm_mapper::{Connector, find_struct};
/// use fm_reflect::{derive::Reflect, ops::DynamicStruct};
///
/// #[derive(Reflect)]
/// struct Item {
///     name: String,
///     size: u32,
/// }
///
/// let items = vec![
///     Item { name: "a".into(), size: 1 },
///     Item { name: "b".into(), size: 2 },
/// ];
///
/// let mut criteria = DynamicStruct::new();
/// criteria.extend("name", String::from("b"));
/// criteria.extend("size", 2_u32);
///
/// let found = find_struct(&items, &criteria, Connector::And).unwrap().unwrap();
/// assert_eq!(found.downcast_ref::<Item>().map(|item| item.size), Some(2));
/// ```
pub fn find_struct<'a>(
    collection: &'a dyn Reflect,
    criteria: &DynamicStruct,
    connector: Connector,
) -> Result<Option<&'a dyn Reflect>, MapError> {
    let list = resolve_list(collection)?;
    Ok(position_in(list, criteria, connector)?.and_then(|index| list.get(index)))
}

/// Same as [`find_struct`], but returns the index of the element.
pub fn position_struct(
    collection: &dyn Reflect,
    criteria: &DynamicStruct,
    connector: Connector,
) -> Result<Option<usize>, MapError> {
    position_in(resolve_list(collection)?, criteria, connector)
}

fn position_in(
    list: &dyn List,
    criteria: &DynamicStruct,
    connector: Connector,
) -> Result<Option<usize>, MapError> {
    if criteria.is_empty() {
        return Err(MapError::invalid_params("criteria is empty"));
    }

    let records = resolve_records(list)?;
    Ok(records
        .into_iter()
        .position(|record| connector.matches(record, criteria)))
}

/// Returns the index of the first element of `collection` equal to `target`.
///
/// Equality is deep and structural, see [`Reflect::reflect_partial_eq`].
/// `Ok(None)` means that no element is equal.
///
/// # Errors
///
/// - [`MapError::InvalidValue`] if `collection` is `None`.
/// - [`MapError::KindMismatch`] if `collection` is not a collection.
///
/// # Examples
///
/// ```
/// use fm_mapper::index_of;
///
/// let words = vec!["a".to_string(), "b".to_string(), "b".to_string()];
///
/// assert_eq!(index_of(&words, &"b".to_string()).unwrap(), Some(1));
/// assert_eq!(index_of(&words, &"c".to_string()).unwrap(), None);
/// ```
pub fn index_of(collection: &dyn Reflect, target: &dyn Reflect) -> Result<Option<usize>, MapError> {
    let list = resolve_list(collection)?;
    Ok(list
        .iter()
        .position(|element| element.reflect_partial_eq(target) == Some(true)))
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use fm_reflect::derive::Reflect;

    use super::*;
    use crate::Shape;

    #[derive(Reflect, Debug, PartialEq)]
    struct Item {
        name: String,
        size: u32,
        tag: Option<String>,
    }

    fn item(name: &str, size: u32, tag: Option<&str>) -> Item {
        Item {
            name: name.into(),
            size,
            tag: tag.map(Into::into),
        }
    }

    fn items() -> Vec<Item> {
        vec![
            item("a", 1, None),
            item("b", 2, Some("x")),
            item("c", 2, None),
            item("b", 3, None),
        ]
    }

    fn criteria(size: u32, name: &str) -> DynamicStruct {
        let mut criteria = DynamicStruct::new();
        criteria.extend("size", size);
        criteria.extend("name", String::from(name));
        criteria
    }

    #[test]
    fn and_requires_every_criterion() {
        let items = items();
        let found = position_struct(&items, &criteria(2, "c"), Connector::And).unwrap();
        assert_eq!(found, Some(2));

        let found = position_struct(&items, &criteria(1, "b"), Connector::And).unwrap();
        assert_eq!(found, None);
    }

    #[test]
    fn or_takes_first_partial_match() {
        let items = items();
        let found = find_struct(&items, &criteria(3, "b"), Connector::Or)
            .unwrap()
            .and_then(|found| found.downcast_ref::<Item>());
        assert_eq!(found, Some(&items[1]));

        let found = position_struct(&items, &criteria(7, "z"), Connector::Or).unwrap();
        assert_eq!(found, None);
    }

    #[test]
    fn unknown_fields_and_types_never_match() {
        let items = items();

        let mut criteria = DynamicStruct::new();
        criteria.extend("missing", 1_u32);
        assert_eq!(position_struct(&items, &criteria, Connector::Or).unwrap(), None);

        // `size` is a `u32`.
        let mut criteria = DynamicStruct::new();
        criteria.extend("size", 2_i64);
        assert_eq!(position_struct(&items, &criteria, Connector::And).unwrap(), None);

        let mut criteria = DynamicStruct::new();
        criteria.extend("tag", Some(String::from("x")));
        assert_eq!(position_struct(&items, &criteria, Connector::And).unwrap(), Some(1));
    }

    #[test]
    fn invalid_inputs() {
        let items = items();
        assert!(matches!(
            find_struct(&items, &DynamicStruct::new(), Connector::And),
            Err(MapError::InvalidParams(_))
        ));

        let missing: Option<Vec<Item>> = None;
        assert!(matches!(
            find_struct(&missing, &criteria(1, "a"), Connector::And),
            Err(MapError::InvalidValue { .. })
        ));

        assert!(matches!(
            find_struct(&items[0], &criteria(1, "a"), Connector::And),
            Err(MapError::KindMismatch { expected: Shape::Collection, .. })
        ));
    }

    #[test]
    fn mixed_mappings_are_rejected() {
        let mut first = DynamicStruct::new();
        first.extend("size", 1_u32);
        let mut second = DynamicStruct::new();
        second.extend("name", String::from("b"));
        second.extend("size", 2_u32);
        let rows = vec![first, second];

        let mut criteria = DynamicStruct::new();
        criteria.extend("size", 1_u32);
        // The first row matches, but the whole collection is checked first.
        assert!(matches!(
            position_struct(&rows, &criteria, Connector::And),
            Err(MapError::MixedCollection { index: 1 })
        ));
    }

    #[test]
    fn index_of_uses_deep_equality() {
        let items = items();
        assert_eq!(index_of(&items, &item("c", 2, None)).unwrap(), Some(2));
        assert_eq!(index_of(&items, &item("b", 2, None)).unwrap(), None);
        assert_eq!(index_of(&Some(items), &1_u32).unwrap(), None);
    }

    #[test]
    fn connector_parsing() {
        assert_eq!("AND".parse::<Connector>().unwrap(), Connector::And);
        assert_eq!("Or".parse::<Connector>().unwrap(), Connector::Or);
        assert_eq!(Connector::Or.to_string(), "OR");

        assert!(matches!(
            "and or".parse::<Connector>(),
            Err(MapError::OneConnector(_))
        ));
        assert!(matches!(
            "".parse::<Connector>(),
            Err(MapError::InvalidParams(_))
        ));
    }
}
