use fm_reflect::derive::Reflect;
use fm_reflect::ops::DynamicStruct;
use fm_mapper::{Connector, MapError};

#[derive(Reflect, Debug, PartialEq)]
struct Book {
    title: String,
    year: u32,
    author: Option<String>,
}

fn book(title: &str, year: u32, author: Option<&str>) -> Book {
    Book {
        title: title.into(),
        year,
        author: author.map(Into::into),
    }
}

fn shelf() -> Vec<Book> {
    vec![
        book("a", 2001, None),
        book("b", 2002, Some("x")),
        book("c", 2002, Some("y")),
        book("b", 2003, None),
    ]
}

fn found(shelf: &[Book], result: Option<&dyn fm_reflect::Reflect>) -> Option<usize> {
    let book = result?.downcast_ref::<Book>()?;
    shelf.iter().position(|item| core::ptr::eq(item, book))
}

#[test]
fn and_returns_first_full_match() {
    let shelf = shelf();
    let mut criteria = DynamicStruct::new();
    criteria.extend("year", 2002_u32);
    criteria.extend("author", Some(String::from("y")));

    let result = fm_mapper::find_struct(&shelf, &criteria, Connector::And).unwrap();
    assert_eq!(found(&shelf, result), Some(2));
}

#[test]
fn or_returns_first_partial_match() {
    let shelf = shelf();
    let mut criteria = DynamicStruct::new();
    criteria.extend("title", String::from("b"));
    criteria.extend("year", 2001_u32);

    let result = fm_mapper::find_struct(&shelf, &criteria, Connector::Or).unwrap();
    assert_eq!(found(&shelf, result), Some(0));
}

#[test]
fn no_match_is_not_an_error() {
    let shelf = shelf();
    let mut criteria = DynamicStruct::new();
    criteria.extend("title", String::from("z"));

    for connector in [Connector::And, Connector::Or] {
        assert!(fm_mapper::find_struct(&shelf, &criteria, connector).unwrap().is_none());
    }
}

#[test]
fn empty_criteria_is_invalid() {
    let err = fm_mapper::find_struct(&shelf(), &DynamicStruct::new(), Connector::And).unwrap_err();
    assert!(matches!(err, MapError::InvalidParams(_)));
}

#[test]
fn connector_from_str() {
    let connector: Connector = "or".parse().unwrap();
    assert_eq!(connector, Connector::Or);

    let err = "AND, OR".parse::<Connector>().unwrap_err();
    assert!(matches!(err, MapError::OneConnector(_)));
}

#[test]
fn index_of_smallest_equal_index() {
    let shelf = shelf();
    assert_eq!(fm_mapper::index_of(&shelf, &book("b", 2003, None)).unwrap(), Some(3));
    assert_eq!(fm_mapper::index_of(&shelf, &book("b", 2003, Some("x"))).unwrap(), None);

    let numbers = vec![3_i64, 1, 3];
    assert_eq!(fm_mapper::index_of(&numbers, &3_i64).unwrap(), Some(0));
    assert_eq!(fm_mapper::index_of(&numbers, &3_i32).unwrap(), None);
}

#[test]
fn index_of_requires_a_collection() {
    let err = fm_mapper::index_of(&book("a", 1, None), &1_u32).unwrap_err();
    assert!(matches!(err, MapError::KindMismatch { .. }));
}
