//! Json conversion tests.

use jsonbin::{BinaryJson, BinaryJsonBuf, Error, NodeType, StringDictionary, TypeMarker, WriterOptions};
use serde_json::{json, Value};

fn round_trip(text: &str) {
    let expected: Value = serde_json::from_str(text).unwrap();
    let value = BinaryJsonBuf::parse(text).unwrap();
    assert_eq!(value.to_json(None).unwrap(), expected, "json {}", text);
}

#[test]
fn test_round_trip() {
    round_trip("null");
    round_trip("[]");
    round_trip("{}");
    round_trip(r#"[1, 2.5, -300, 70000, -9223372036854775808, 9223372036854775807]"#);
    round_trip(r#"{"id": "x", "type": "Point", "coordinates": [1.25, -7]}"#);
    round_trip(r#"{"a": {"b": {"c": [[], [{}], [null, true, false]]}}}"#);
    round_trip(r#"["", "été", "line\nbreak"]"#);
    round_trip(r#"["F0C9D8A7-1B56-4A3B-9E21-AB4E92D17C0F", "\"ab4e92d1-7c0f-4a3b-9e21-f0c9d8a71b56\""]"#);
}

#[test]
fn test_large_document() {
    let items: Vec<Value> = (0..500)
        .map(|i| json!({"id": i, "name": format!("item-{}", i), "tags": ["a", "b"]}))
        .collect();
    let json = Value::Array(items);
    let value = BinaryJsonBuf::try_from(&json).unwrap();
    assert_eq!(value.as_bytes()[0], TypeMarker::ARR_LC2);
    assert_eq!(value.item_count().unwrap(), 500);
    assert_eq!(value.to_json(None).unwrap(), json);
}

#[test]
fn test_shared_dictionary() {
    let first = json!({"color": "red", "size": 3});
    let second = json!({"color": "blue", "size": 4});

    let mut dict = StringDictionary::new();
    let a = BinaryJsonBuf::from_json_with(&first, WriterOptions::default(), Some(&mut dict)).unwrap();
    let b = BinaryJsonBuf::from_json_with(&second, WriterOptions::default(), Some(&mut dict)).unwrap();

    // "color" and "size" keep their ids across documents
    assert_eq!(dict.iter().collect::<Vec<_>>(), vec!["color", "red", "size", "blue"]);
    assert_eq!(a.to_json(Some(&dict)).unwrap(), first);
    assert_eq!(b.to_json(Some(&dict)).unwrap(), second);

    let smaller = BinaryJsonBuf::try_from(&second).unwrap();
    assert!(b.as_bytes().len() < smaller.as_bytes().len());
}

#[test]
fn test_unsigned_overflow_becomes_double() {
    let value = BinaryJsonBuf::parse("18446744073709551615").unwrap();
    assert_eq!(value.as_bytes()[0], TypeMarker::NUMBER_DOUBLE);
    assert!(value.to_json(None).unwrap().is_f64());
    assert_eq!(value.number().unwrap().as_f64(), 18446744073709551615u64 as f64);
}

#[test]
fn test_nesting_limit() {
    let ok = format!("{}{}", "[".repeat(100), "]".repeat(100));
    assert!(BinaryJsonBuf::parse(ok).is_ok());

    let deep = format!("{}{}", "[".repeat(101), "]".repeat(101));
    assert!(matches!(BinaryJsonBuf::parse(deep), Err(Error::NestedTooDeeply { .. })));
}

#[test]
fn test_reference_string_to_json() {
    let bytes = [TypeMarker::ARR_L1, 6, 0x83, b'a', b'b', b'c', TypeMarker::STR_R1, 2];
    let value = BinaryJson::new(&bytes).unwrap();
    assert_eq!(value.to_json(None).unwrap(), json!(["abc", "abc"]));
}

#[test]
fn test_unsupported_values() {
    let compressed = [TypeMarker::COMPRESSED_LOWERCASE_HEX_STRING, 2, 0x21];
    let value = BinaryJson::new(&compressed).unwrap();
    assert_eq!(value.node_type().unwrap(), NodeType::String);
    assert!(matches!(value.to_json(None), Err(Error::UnsupportedString(_))));

    assert!(matches!(BinaryJsonBuf::parse("[1, 2"), Err(Error::JsonError(_))));
    assert!(matches!(
        BinaryJson::new(&[TypeMarker::NULL, TypeMarker::NULL]),
        Err(Error::TrailingBytes { expected: 1, actual: 2 })
    ));
}
