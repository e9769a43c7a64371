//! Integration tests for dynamic (JSON-built) fossils
//!
//! Producers handing over `serde_json::Value` trees get the same
//! serialization behavior as typed producers, with malformed trees
//! rejected up front.

use fossilize::{
    register_builtin_formats, serialize, Fossil, FossilError, SerializeOptions,
};
use serde_json::json;

#[test]
fn test_json_tree_to_xml_document() {
    register_builtin_formats();
    let value = json!({
        "_type": "Event",
        "_fossil": "basicEvent",
        "id": 5,
        "title": "Workshop",
        "sessions": [
            {"_type": "Session", "id": 1, "name": "Intro"},
            {"_type": "Session", "id": 2, "name": "Deep Dive"}
        ]
    });

    let fossil = Fossil::from_json(&value).unwrap();
    let out = serialize(
        "xml",
        &fossil,
        &SerializeOptions::default().with_declaration(false),
    )
    .unwrap()
    .into_text()
    .unwrap();

    assert_eq!(
        out,
        "<event fossil=\"basicEvent\" id=\"5\">\
         <title>Workshop</title>\
         <sessions>\
         <session id=\"1\"><name>Intro</name></session>\
         <session id=\"2\"><name>Deep Dive</name></session>\
         </sessions>\
         </event>"
    );
}

#[test]
fn test_member_order_survives_to_output() {
    register_builtin_formats();
    let value = json!({"_type": "Foo", "zebra": 1, "apple": 2, "mango": 3});
    let fossil = Fossil::from_json(&value).unwrap();
    let out = serialize(
        "xml",
        &fossil,
        &SerializeOptions::default().with_declaration(false),
    )
    .unwrap()
    .into_text()
    .unwrap();

    assert_eq!(out, "<foo><zebra>1</zebra><apple>2</apple><mango>3</mango></foo>");
}

#[test]
fn test_scalar_list_rejected_with_path() {
    let value = json!({
        "_type": "Event",
        "sessions": [{"_type": "Session"}, 42]
    });
    match Fossil::from_json(&value) {
        Err(FossilError::Structural { path, .. }) => assert_eq!(path, "$.sessions[1]"),
        other => panic!("expected structural error, got {other:?}"),
    }
}

#[test]
fn test_untyped_json_rejected_at_serialization() {
    register_builtin_formats();
    let fossil = Fossil::from_json(&json!({"name": "bar"})).unwrap();
    let result = serialize("xml", &fossil, &SerializeOptions::default());
    assert!(matches!(result, Err(FossilError::Structural { .. })));
}

#[test]
fn test_json_format_round_trips_dynamic_tree() {
    register_builtin_formats();
    let value = json!({
        "_type": "Event",
        "id": 5,
        "title": "Workshop",
        "open": true
    });
    let fossil = Fossil::from_json(&value).unwrap();
    let payload = serialize("json", &fossil, &SerializeOptions::default()).unwrap();
    assert_eq!(payload.mime_type, "application/json");

    let emitted: serde_json::Value =
        serde_json::from_slice(&payload.content).unwrap();
    assert_eq!(emitted, value);
}
