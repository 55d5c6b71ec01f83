//! String dictionary tests.

use jsonbin::{Error, StringDictionary, MAX_USER_STRING_COUNT};
use quickcheck::QuickCheck;

#[test]
fn test_capacity_exceeded() {
    let mut dict = StringDictionary::with_capacity(2);
    assert_eq!(dict.try_add_string("a"), Some(0));
    assert_eq!(dict.try_add_string("b"), Some(1));
    assert_eq!(dict.try_add_string("c"), None);
    assert!(matches!(dict.add_string("c"), Err(Error::CapacityExceeded { capacity: 2 })));
    assert_eq!(dict.len(), 2);
    assert_eq!(dict.try_get_index("c"), None);

    // existing strings are still found when full
    assert_eq!(dict.try_add_string("b"), Some(1));
}

#[test]
fn test_explicit_capacity() {
    let mut dict = StringDictionary::new();
    assert_eq!(dict.capacity(), MAX_USER_STRING_COUNT);
    assert_eq!(dict.try_add_string_with_capacity("a", 1), Some(0));
    assert_eq!(dict.try_add_string_with_capacity("b", 1), None);
    assert_eq!(dict.try_add_string("b"), Some(1));
}

#[test]
fn test_fill_to_max() {
    let mut dict = StringDictionary::new();
    for i in 0..MAX_USER_STRING_COUNT {
        assert_eq!(dict.try_add_string(&format!("s{}", i)), Some(i));
    }
    assert_eq!(dict.try_add_string("overflow"), None);
    assert_eq!(dict.try_get_string(MAX_USER_STRING_COUNT - 1), Some("s2071"));
}

#[test]
fn test_prefixes_are_distinct() {
    let mut dict = StringDictionary::new();
    let words = ["", "a", "ab", "abc", "b", "ba", "\u{e9}t\u{e9}"];
    for (i, word) in words.iter().enumerate() {
        assert_eq!(dict.try_add_string(word), Some(i));
    }
    for (i, word) in words.iter().enumerate() {
        assert_eq!(dict.try_get_index(word), Some(i));
        assert_eq!(dict.try_get_string(i), Some(*word));
    }
    assert_eq!(dict.try_get_index("abcd"), None);
    assert_eq!(dict.iter().collect::<Vec<_>>(), words);
}

#[test]
fn test_checksum_order() {
    let first = StringDictionary::from_strings(["alpha", "beta", "gamma"]).unwrap();
    let second = StringDictionary::from_strings(["alpha", "beta", "gamma"]).unwrap();
    let reversed = StringDictionary::from_strings(["gamma", "beta", "alpha"]).unwrap();

    assert_eq!(first.checksum(), second.checksum());
    assert_eq!(first, second);
    assert_ne!(first.checksum(), reversed.checksum());
    assert_ne!(first, reversed);

    assert_eq!(StringDictionary::new().checksum(), 0);
    assert_ne!(first.checksum(), 0);
}

#[test]
fn test_add_is_idempotent() {
    fn prop(strings: Vec<String>) -> bool {
        let mut dict = StringDictionary::new();
        let ids: Vec<_> = strings.iter().map(|s| dict.try_add_string(s)).collect();
        let len = dict.len();
        let checksum = dict.checksum();

        strings
            .iter()
            .zip(ids)
            .all(|(s, id)| dict.try_add_string(s) == id && id.is_some())
            && dict.len() == len
            && dict.checksum() == checksum
    }

    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(Vec<String>) -> bool);
}

#[test]
fn test_same_seed_same_checksum() {
    fn prop(strings: Vec<String>) -> bool {
        let first = StringDictionary::from_strings(&strings).unwrap();
        let second = StringDictionary::from_strings(&strings).unwrap();
        first.checksum() == second.checksum() && first.len() == second.len()
    }

    QuickCheck::new()
        .tests(200)
        .quickcheck(prop as fn(Vec<String>) -> bool);
}
