//! Unit tests for flag stores
//!
//! Tests typed registration and retrieval, including:
//! - Kind fixed by the default value
//! - No coercion between kinds
//! - Kind introspection used to enumerate globals

use core::time::Duration;
use kli::ParseError;
use kli::flag::{FlagKind, FlagStore};

#[test]
fn test_repeat_round_trip() {
    let mut store = FlagStore::new();
    store.register("repeat", 1, "how many times it repeats the word");

    assert_eq!(store.get::<i32>("repeat"), Some(1));
    store.set("repeat", "5").unwrap();

    assert_eq!(store.get::<i32>("repeat"), Some(5));
    assert_eq!(store.get::<String>("repeat"), None);
    assert_eq!(store.get::<i64>("repeat"), None);
    assert!(store.lookup("repeat").unwrap().was_set());
}

#[test]
fn test_type_mismatch_is_not_found() {
    let mut store = FlagStore::new();
    store.register("str", "42", "a string that looks like a number");

    assert_eq!(store.get::<i32>("str"), None);
    assert_eq!(store.get::<u64>("str"), None);
    assert_eq!(store.get::<bool>("str"), None);
    assert_eq!(store.get::<String>("str"), Some("42".to_owned()));
}

#[test]
fn test_missing_flag_is_not_found() {
    let store = FlagStore::new();
    assert_eq!(store.get::<String>("nope"), None);
    assert_eq!(store.kind("nope"), None);
    assert!(store.is_empty());
}

#[test]
fn test_every_kind_reads_back() {
    let mut store = FlagStore::new();
    store.register("bool", false, "");
    store.register("int", 0, "");
    store.register("int64", 0_i64, "");
    store.register("uint", 0_u32, "");
    store.register("uint64", 0_u64, "");
    store.register("float64", 0.0, "");
    store.register("string", "", "");
    store.register("duration", Duration::ZERO, "");

    store.set("bool", "true").unwrap();
    store.set("int", "-7").unwrap();
    store.set("int64", "-9000000000").unwrap();
    store.set("uint", "7").unwrap();
    store.set("uint64", "18000000000000000000").unwrap();
    store.set("float64", "2.5").unwrap();
    store.set("string", "moo").unwrap();
    store.set("duration", "1h30m").unwrap();

    assert_eq!(store.get::<bool>("bool"), Some(true));
    assert_eq!(store.get::<i32>("int"), Some(-7));
    assert_eq!(store.get::<i64>("int64"), Some(-9_000_000_000));
    assert_eq!(store.get::<u32>("uint"), Some(7));
    assert_eq!(store.get::<u64>("uint64"), Some(18_000_000_000_000_000_000));
    assert_eq!(store.get::<f64>("float64"), Some(2.5));
    assert_eq!(store.get::<String>("string"), Some("moo".to_owned()));
    assert_eq!(
        store.get::<Duration>("duration"),
        Some(Duration::from_secs(5400))
    );
    // durations are stored as text
    assert_eq!(store.get::<String>("duration"), None);
}

#[test]
fn test_kinds_introspection() {
    let mut store = FlagStore::new();
    store.register("foo", "", "the echoed string");
    store.register("eat", false, "informs the cow to eat");
    store.register("wait", Duration::from_secs(1), "pause");

    let kinds = store.kinds();
    assert_eq!(kinds.len(), 3);
    assert_eq!(kinds["foo"], FlagKind::String);
    assert_eq!(kinds["eat"], FlagKind::Bool);
    assert_eq!(kinds["wait"], FlagKind::Duration);

    let strings: Vec<&String> = kinds
        .iter()
        .filter(|(_, kind)| **kind == FlagKind::String)
        .map(|(name, _)| name)
        .collect();
    assert_eq!(strings, vec!["foo"]);
}

#[test]
fn test_set_rejects_bad_values() {
    let mut store = FlagStore::new();
    store.register("repeat", 1, "");
    store.register("wait", Duration::ZERO, "");

    let err = store.set("repeat", "lots").unwrap_err();
    assert!(matches!(err, ParseError::InvalidValue { ref name, ref value, .. }
        if name == "repeat" && value == "lots"));
    assert_eq!(store.get::<i32>("repeat"), Some(1));

    assert!(store.set("wait", "soon").is_err());
    assert_eq!(
        store.set("missing", "1"),
        Err(ParseError::UnknownFlag {
            name: "missing".to_owned()
        })
    );
}

#[test]
fn test_redeclaring_replaces_the_flag() {
    let mut store = FlagStore::new();
    store.register("level", 1, "numeric level");
    store.register("level", "high", "named level");

    assert_eq!(store.len(), 1);
    assert_eq!(store.kind("level"), Some(FlagKind::String));
    assert_eq!(store.get::<String>("level"), Some("high".to_owned()));
    assert_eq!(store.get::<i32>("level"), None);
}

#[test]
fn test_iteration_is_sorted_by_name() {
    let mut store = FlagStore::new();
    store.register("zebra", "", "");
    store.register("apple", "", "");
    store.register("mango", "", "");

    let names: Vec<&str> = store.iter().map(|flag| flag.name()).collect();
    assert_eq!(names, vec!["apple", "mango", "zebra"]);
}

#[test]
fn test_contains_tracks_registration() {
    let mut store = FlagStore::new();
    assert!(!store.contains("eat"));
    assert!(store.is_empty());

    store.register("eat", false, "informs the cow to eat");
    assert!(store.contains("eat"));
    assert!(!store.contains("Eat"));
    assert_eq!(store.len(), 1);
}
