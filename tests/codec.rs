//! Decode/encode behaviour over whole documents.
use std::fs;

use sift_json::dom::Parser;
use sift_json::JsonValue;

#[test]
fn encoding_then_decoding_should_preserve_structure() {
    for f in fs::read_dir("fixtures/json/valid").unwrap() {
        let path = f.unwrap().path();
        let parser = Parser::default();
        let original = parser.parse_file(&path).unwrap();
        let reparsed = parser.parse_str(&original.to_string()).unwrap();
        assert_eq!(original, reparsed, "round trip failed for {path:?}");
    }
}

#[test]
fn scalar_documents_should_round_trip() {
    let parser = Parser::default();
    for source in ["42", "-3.25", "\"text\"", "true", "false", "null", "[]", "{}"] {
        let value = parser.parse_str(source).unwrap();
        assert_eq!(value, parser.parse_str(&value.to_string()).unwrap());
    }
}

#[test]
fn decoded_fixtures_should_be_navigable() {
    let json = Parser::default()
        .parse_file("fixtures/json/valid/events.json")
        .unwrap();
    assert_eq!(json["count"], JsonValue::from(3.0));
    assert_eq!(json["events"][0]["name"], JsonValue::from("launch"));
    assert_eq!(json["events"][-1]["severity"], JsonValue::from(3.0));
    assert_eq!(json["events"][1]["tags"], JsonValue::Array(vec![]));
}

#[test]
fn encoded_strings_should_escape_control_characters() {
    let json = Parser::default()
        .parse_file("fixtures/json/valid/simple_structure.json")
        .unwrap();
    let encoded = json["escapes"].to_string();
    assert!(encoded.contains("\\t"));
    assert!(encoded.contains("\\n"));
    assert!(encoded.contains("\\\""));
}
