use fm_reflect::derive::Reflect;
use fm_reflect::ops::{DynamicStruct, Struct};
use fm_reflect::serde::ReflectSerializer;
use fm_mapper::{MapError, Mapper, MergePolicy};

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

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(default)]
struct Profile {
    name: String,
    age: i32,
    email: Option<String>,
}

#[test]
fn record_into_optional_fields() {
    let mut contact = Contact::default();
    fm_mapper::map(&Person { name: "a".into(), age: 5 }, &mut contact).unwrap();

    assert_eq!(
        contact,
        Contact {
            name: "a".into(),
            age: Some(5),
        }
    );
}

#[test]
fn optional_fields_into_record() {
    let mut profile = Profile {
        age: 40,
        ..Default::default()
    };

    let set = Contact {
        name: "b".into(),
        age: Some(7),
    };
    fm_mapper::map(&set, &mut profile).unwrap();
    assert_eq!(profile.age, 7);

    let unset = Contact {
        name: "c".into(),
        age: None,
    };
    fm_mapper::map(&unset, &mut profile).unwrap();
    assert_eq!(profile.name, "c");
    assert_eq!(profile.age, 7);
    assert_eq!(profile.email, None);
}

#[test]
fn collections_keep_length_and_order() {
    let people: Vec<Person> = (0..5)
        .map(|age| Person {
            name: format!("p{age}"),
            age,
        })
        .collect();

    let mut contacts: Vec<Option<Contact>> = Vec::new();
    fm_mapper::map(&people, &mut contacts).unwrap();

    assert_eq!(contacts.len(), people.len());
    for (person, contact) in people.iter().zip(&contacts) {
        let contact = contact.as_ref().unwrap();
        assert_eq!(contact.name, person.name);
        assert_eq!(contact.age, Some(person.age));
    }
}

#[test]
fn destination_behind_none_is_allocated() {
    let mut target: Option<Option<Profile>> = None;
    fm_mapper::map(&Person { name: "x".into(), age: 1 }, &mut target).unwrap();

    let profile = target.flatten().unwrap();
    assert_eq!((profile.name.as_str(), profile.age), ("x", 1));
}

#[test]
fn shape_mismatch() {
    let mut contacts: Vec<Contact> = Vec::new();
    let err = fm_mapper::map(&Person { name: "x".into(), age: 1 }, &mut contacts).unwrap_err();
    assert!(matches!(err, MapError::KindMismatch { .. }));
}

#[test]
fn mapping_round_trip() {
    let profile = Profile {
        name: "r".into(),
        age: 30,
        email: Some("r@example.com".into()),
    };

    let mapping = fm_mapper::record_to_mapping(&profile).unwrap();
    let mut copy = Profile::default();
    fm_mapper::mapping_to_record(&mapping, &mut copy).unwrap();
    assert_eq!(copy, profile);

    // Shared names only.
    let mut contact = Contact::default();
    fm_mapper::mapping_to_record(&mapping, &mut contact).unwrap();
    assert_eq!(contact.name, profile.name);
    assert_eq!(contact.age, Some(profile.age));
}

#[test]
fn mapping_from_parts() {
    let mut mapping = DynamicStruct::new();
    mapping.extend("name", String::from("m"));
    mapping.extend("age", Some(3_i32));
    mapping.extend("ignored", 0.5_f64);

    let mut person = Person { name: String::new(), age: 0 };
    fm_mapper::mapping_to_record(&mapping, &mut person).unwrap();
    assert_eq!(person, Person { name: "m".into(), age: 3 });

    let json = serde_json::to_string(&ReflectSerializer::new(&mapping)).unwrap();
    assert_eq!(json, r#"{"name":"m","age":3,"ignored":0.5}"#);
}

#[test]
fn record_mapping_serializes_in_field_order() {
    let mapping = fm_mapper::record_to_mapping(&Contact { name: "j".into(), age: None }).unwrap();
    assert_eq!(mapping.field_len(), 2);

    let json = serde_json::to_string(&ReflectSerializer::new(&mapping)).unwrap();
    assert_eq!(json, r#"{"name":"j","age":null}"#);
}

#[test]
fn strict_policy() {
    #[derive(Reflect, Default)]
    struct Renamed {
        name: u64,
    }

    let person = Person { name: "s".into(), age: 2 };

    let mut lenient = Renamed::default();
    Mapper::new().map(&person, &mut lenient).unwrap();
    assert_eq!(lenient.name, 0);

    let mut strict = Renamed::default();
    let err = Mapper::new()
        .policy(MergePolicy::Strict)
        .map(&person, &mut strict)
        .unwrap_err();
    assert!(matches!(err, MapError::FieldMismatch { .. }));
}

#[test]
fn mixed_mapping_collection() {
    let mut first = DynamicStruct::new();
    first.extend("name", String::from("a"));
    first.extend("age", 1_i32);

    let mut second = DynamicStruct::new();
    second.extend("name", String::from("b"));

    let mut contacts: Vec<Contact> = Vec::new();
    let err = fm_mapper::map(&vec![first, second], &mut contacts).unwrap_err();
    assert!(matches!(err, MapError::MixedCollection { index: 1 }));
    assert!(contacts.is_empty());
}
