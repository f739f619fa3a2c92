use std::collections::BTreeMap;

use bsonmap::{
    bson::{DateTime as BsonDateTime, ser::serialize_to_bson},
    prelude::*,
};
use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, Record)]
pub struct Person {
    #[bsonmap(bson = "Name")]
    pub name: String,
    #[bsonmap(bson = "Nickname,omitempty")]
    pub nickname: String,
}

#[derive(Debug, Clone, Serialize, Record)]
pub struct Flat {
    #[bsonmap(bson = "str")]
    pub text: String,
    #[bsonmap(bson = "num")]
    pub num: i64,
    #[bsonmap(bson = "bool")]
    pub flag: bool,
    #[bsonmap(bson = "float")]
    pub float: f64,
    #[bsonmap(bson = "time")]
    pub time: DateTime<Utc>,
    #[bsonmap(bson = "sliceInt")]
    pub slice_int: Vec<i32>,
    #[bsonmap(bson = "sliceString")]
    pub slice_string: Vec<String>,
    #[bsonmap(bson = "map")]
    pub map: BTreeMap<String, i32>,
    #[bsonmap(bson = "strPtr")]
    pub text_ptr: Option<String>,
    #[bsonmap(bson = "numPtr")]
    pub num_ptr: Option<Box<i64>>,
    #[bsonmap(bson = "sliceIntPtr")]
    pub slice_int_ptr: Option<Vec<i32>>,
}

#[derive(Debug, Clone, Serialize, Record)]
pub struct Omitted<T> {
    #[bsonmap(bson = "Input,omitempty")]
    pub input: T,
}

#[derive(Debug, Clone, Default, Serialize, Record)]
pub struct Unit {}

#[derive(Debug, Clone, Serialize, Record)]
pub struct Stamped {
    #[bsonmap(bson = "testField1,string")]
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Record)]
pub struct Labelled {
    #[bsonmap(bson = "name")]
    pub name: String,
    #[bsonmap(bson = "tags,string")]
    pub tags: Vec<String>,
    #[bsonmap(bson = "person,string")]
    pub person: Person,
    #[bsonmap(bson = "count,string")]
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Record)]
pub struct Declared {
    pub r#type: String,
    #[bsonmap(bson = ",omitempty")]
    pub note: String,
    #[bsonmap(bson = "Kept,unknownflag")]
    pub kept: i32,
    pub(crate) crate_only: String,
    hidden: String,
    #[bsonmap(bson = "-")]
    pub suppressed: String,
}

#[derive(Debug, Clone, Serialize, Record)]
pub struct MultiTagged {
    #[bsonmap(bson = "_id", json = "id")]
    pub id: String,
    #[bsonmap(json = "display_name")]
    pub name: String,
}

fn time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap()
}

fn flat() -> Flat {
    Flat {
        text: "Test String".to_string(),
        num: 10,
        flag: true,
        float: 10.1,
        time: time(),
        slice_int: vec![1, 2, 3],
        slice_string: vec!["Test1".to_string(), "Test 2".to_string()],
        map: BTreeMap::from([
            ("Test 1".to_string(), 0),
            ("Test 2!".to_string(), 100),
            ("Test 3".to_string(), -100),
        ]),
        text_ptr: Some("Test String".to_string()),
        num_ptr: Some(Box::new(10)),
        slice_int_ptr: Some(vec![1, 2, 3]),
    }
}

#[test]
fn empty_omitempty_field_is_dropped() {
    let person = Person {
        name: "Jane".to_string(),
        nickname: String::new(),
    };

    assert_eq!(to_document(&person, None).unwrap(), Some(doc! { "Name": "Jane" }));
}

#[test]
fn present_omitempty_field_is_kept() {
    let person = Person {
        name: "Jane".to_string(),
        nickname: "JJ".to_string(),
    };

    assert_eq!(
        to_document(&person, None).unwrap(),
        Some(doc! { "Name": "Jane", "Nickname": "JJ" })
    );
}

#[test]
fn flat_record_maps_every_field_under_every_option_set() {
    let expected = doc! {
        "str": "Test String",
        "num": 10_i64,
        "bool": true,
        "float": 10.1,
        "time": BsonDateTime::from_chrono(time()),
        "sliceInt": [1, 2, 3],
        "sliceString": ["Test1", "Test 2"],
        "map": { "Test 1": 0, "Test 2!": 100, "Test 3": -100 },
        "strPtr": "Test String",
        "numPtr": 10_i64,
        "sliceIntPtr": [1, 2, 3],
    };

    let option_sets = [
        MappingOptions::default(),
        MappingOptions::builder().use_identifier_if_present(true).build(),
        MappingOptions::builder().remove_identifier(true).build(),
        MappingOptions::builder()
            .use_identifier_if_present(true)
            .remove_identifier(true)
            .build(),
    ];

    assert_eq!(to_document(&flat(), None).unwrap(), Some(expected.clone()));
    for options in &option_sets {
        assert_eq!(to_document(&flat(), Some(options)).unwrap(), Some(expected.clone()));
    }
}

#[test]
fn absent_options_encode_as_null() {
    let record = Flat {
        text_ptr: None,
        num_ptr: None,
        slice_int_ptr: None,
        ..flat()
    };

    let document = to_document(&record, None).unwrap().unwrap();

    assert_eq!(document.get("strPtr"), Some(&Bson::Null));
    assert_eq!(document.get("numPtr"), Some(&Bson::Null));
    assert_eq!(document.get("sliceIntPtr"), Some(&Bson::Null));
}

#[test]
fn zero_values_are_omitted_with_omitempty() {
    assert_eq!(to_document(&Omitted { input: String::new() }, None).unwrap(), None);
    assert_eq!(to_document(&Omitted { input: 0_i32 }, None).unwrap(), None);
    assert_eq!(to_document(&Omitted { input: false }, None).unwrap(), None);
    assert_eq!(to_document(&Omitted { input: Vec::<u8>::new() }, None).unwrap(), None);
    assert_eq!(
        to_document(&Omitted { input: BTreeMap::<String, Unit>::new() }, None).unwrap(),
        None
    );
    assert_eq!(to_document(&Omitted { input: Unit {} }, None).unwrap(), None);
    assert_eq!(to_document(&Omitted { input: None::<Unit> }, None).unwrap(), None);
}

#[test]
fn negative_zero_is_not_empty() {
    assert_eq!(to_document(&Omitted { input: 0.0_f64 }, None).unwrap(), None);
    assert_eq!(
        to_document(&Omitted { input: -0.0_f64 }, None).unwrap(),
        Some(doc! { "Input": -0.0_f64 })
    );
    assert_eq!(
        to_document(&Omitted { input: -0.0_f32 }, None).unwrap(),
        Some(doc! { "Input": -0.0_f64 })
    );
}

#[test]
fn present_reference_to_an_empty_container_is_kept() {
    let record = Omitted {
        input: Some(Vec::<i32>::new()),
    };

    assert_eq!(
        to_document(&record, None).unwrap(),
        Some(doc! { "Input": [] })
    );
}

#[test]
fn string_flag_writes_the_text_form() {
    let record = Stamped { at: time() };

    assert_eq!(
        to_document(&record, None).unwrap(),
        Some(doc! { "testField1": "2000-01-01 00:00:00 UTC" })
    );
}

#[test]
fn string_flag_drops_values_without_a_text_form() {
    let record = Labelled {
        name: "labels".to_string(),
        tags: vec!["a".to_string()],
        person: Person {
            name: "Jane".to_string(),
            nickname: String::new(),
        },
        count: 3,
    };

    assert_eq!(
        to_document(&record, None).unwrap(),
        Some(doc! { "name": "labels", "count": "3" })
    );
}

#[test]
fn keys_default_to_the_declared_name_and_hidden_fields_are_skipped() {
    let record = Declared {
        r#type: "kind".to_string(),
        note: "a note".to_string(),
        kept: 1,
        crate_only: "crate".to_string(),
        hidden: "hidden".to_string(),
        suppressed: "suppressed".to_string(),
    };

    assert_eq!(
        to_document(&record, None).unwrap(),
        Some(doc! { "type": "kind", "note": "a note", "Kept": 1 })
    );
    assert_eq!(record.hidden, "hidden");
}

#[test]
fn records_without_mappable_fields_map_to_none() {
    let record = Declared {
        r#type: String::new(),
        note: String::new(),
        kept: 0,
        crate_only: "crate".to_string(),
        hidden: "hidden".to_string(),
        suppressed: "suppressed".to_string(),
    };

    assert_eq!(to_document(&record, Some(&MappingOptions::filter())).unwrap(), None);
    assert_eq!(to_document(&Unit {}, None).unwrap(), None);
}

#[test]
fn handles_read_directives_from_their_own_tag() {
    let record = MultiTagged {
        id: "abc".to_string(),
        name: "Jane".to_string(),
    };

    assert_eq!(
        RecordMapper::new(&record).to_document(None).unwrap(),
        Some(doc! { "_id": "abc", "name": "Jane" })
    );
    assert_eq!(
        RecordMapper::new(&record).with_tag("json").to_document(None).unwrap(),
        Some(doc! { "id": "abc", "display_name": "Jane" })
    );
    assert_eq!(
        RecordMapper::new(&record).with_tag("yaml").to_document(None).unwrap(),
        Some(doc! { "id": "abc", "name": "Jane" })
    );
}

#[test]
fn only_records_are_mapped_through_the_dynamic_entry_point() {
    assert_eq!(map_value(&"Test String", None).unwrap(), None);
    assert_eq!(map_value(&123_i32, None).unwrap(), None);
    assert_eq!(map_value(&true, None).unwrap(), None);
    assert_eq!(map_value(&vec![1_i32, 2, 3], None).unwrap(), None);
    assert_eq!(
        map_value(&BTreeMap::from([("Test 1".to_string(), Unit {})]), None).unwrap(),
        None
    );
    assert_eq!(map_value(&Some(String::new()), None).unwrap(), None);
    assert_eq!(map_value(&None::<Person>, None).unwrap(), None);
}

#[test]
fn references_to_records_are_mapped_through_the_dynamic_entry_point() {
    let person = Person {
        name: "Jane".to_string(),
        nickname: String::new(),
    };
    let expected = Some(doc! { "Name": "Jane" });

    assert_eq!(map_value(&person, None).unwrap(), expected);
    assert_eq!(map_value(&Some(person.clone()), None).unwrap(), expected);
    assert_eq!(map_value(&Box::new(person.clone()), None).unwrap(), expected);
    assert_eq!(map_value(&&person, None).unwrap(), expected);
}

#[test]
fn mapping_is_repeatable() {
    let record = flat();

    assert_eq!(
        to_document(&record, None).unwrap(),
        to_document(&record, None).unwrap()
    );
}

#[test]
fn raw_values_encode_like_the_driver_would() {
    let unit = serialize_to_bson(&Unit {}).unwrap();

    assert_eq!(Unit {}.to_bson().unwrap(), unit);
    assert_eq!(unit, Bson::Document(doc! {}));
}

#[test]
#[should_panic(expected = "not a record")]
fn wrapping_a_non_record_value_panics() {
    let values = vec![1_i32, 2, 3];
    let _ = RecordMapper::from_value(&values);
}
