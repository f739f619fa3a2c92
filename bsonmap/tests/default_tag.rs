// The default tag is process-wide, so it gets its own test binary.

use bsonmap::{config, prelude::*};
use pretty_assertions::assert_eq;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, Record)]
pub struct Person {
    #[bsonmap(bson = "_id,omitempty", json = "id,omitempty")]
    pub id: String,
    #[bsonmap(bson = "Name", json = "name")]
    pub name: String,
}

#[test]
fn default_tag_is_configured_once() {
    let person = Person {
        id: "abc".to_string(),
        name: "Jane".to_string(),
    };
    assert_eq!(config::default_tag(), config::DEFAULT_TAG);

    config::set_default_tag("json").unwrap();
    assert!(matches!(
        config::set_default_tag("yaml"),
        Err(MapperError::Initialization(_))
    ));
    assert_eq!(config::default_tag(), "json");

    let mapper = RecordMapper::new(&person);
    assert_eq!(mapper.tag(), "json");
    assert_eq!(
        mapper.to_document(None).unwrap(),
        Some(doc! { "id": "abc", "name": "Jane" })
    );
    assert_eq!(
        to_document(&person, None).unwrap(),
        Some(doc! { "id": "abc", "name": "Jane" })
    );
    assert_eq!(
        RecordMapper::new(&person).with_tag("bson").to_document(None).unwrap(),
        Some(doc! { "_id": "abc", "Name": "Jane" })
    );
}
