use super::*;

fn ival(i: i64) -> Value {
    Value::Integer(i)
}

#[test]
fn insert_and_lookup_below_threshold() {
    let mut t = Table::new();
    assert!(t.is_empty());
    assert_eq!(t.len(), 0);
    assert!(t.get("missing").is_none());

    t.insert("k0", ival(0));
    t.insert(String::from("k1"), ival(1));
    assert_eq!(t.len(), 2);
    assert!(!t.is_empty());
    assert_eq!(t.get("k0").and_then(Value::as_integer), Some(0));
    assert_eq!(t.get("k1").and_then(Value::as_integer), Some(1));
    assert_eq!(t.find_index("k1"), Some(1));
    assert!(t.index.is_empty());
}

#[test]
fn index_is_built_at_threshold() {
    let mut t = Table::new();
    for i in 0..INDEXED_TABLE_THRESHOLD - 1 {
        t.insert(format!("k{i}"), ival(i as i64));
    }
    assert!(t.index.is_empty());

    t.insert("last", ival(-1));
    assert_eq!(t.index.len(), INDEXED_TABLE_THRESHOLD);

    for i in 0..INDEXED_TABLE_THRESHOLD - 1 {
        let name = format!("k{i}");
        assert_eq!(t.get(&name).and_then(Value::as_integer), Some(i as i64));
    }
    assert_eq!(t.find_index("last"), Some(INDEXED_TABLE_THRESHOLD - 1));

    for i in 0..50 {
        t.insert(format!("extra{i}"), ival(i));
    }
    assert_eq!(t.get("extra49").and_then(Value::as_integer), Some(49));
    assert_eq!(t.index.len(), t.len());
    assert!(t.get("extra50").is_none());
}

#[test]
fn get_mut_and_get_or_insert_with() {
    let mut t = Table::new();
    let (value, created) = t.get_or_insert_with("a", || Value::Table(Table::new()));
    assert!(created);
    value.as_table_mut().unwrap().insert("b", ival(1));

    let (value, created) = t.get_or_insert_with("a", || unreachable!());
    assert!(!created);
    assert_eq!(value.pointer(["b"]).and_then(Value::as_integer), Some(1));

    *t.get_mut("a").unwrap() = ival(2);
    assert_eq!(t.get("a"), Some(&ival(2)));
    assert!(t.contains_key("a"));
    assert!(!t.contains_key("b"));
}

#[test]
fn iteration_keeps_insertion_order() {
    let t: Table = [("z", ival(1)), ("a", ival(2)), ("m", ival(3))].into_iter().collect();
    assert_eq!(t.keys().collect::<Vec<_>>(), ["z", "a", "m"]);
    assert_eq!(
        t.values().filter_map(Value::as_integer).collect::<Vec<_>>(),
        [1, 2, 3]
    );
    assert_eq!(t.entries()[1].0, "a");

    let mut seen = Vec::new();
    for (key, _) in &t {
        seen.push(key.clone());
    }
    assert_eq!(seen, ["z", "a", "m"]);

    let owned: Vec<(String, Value)> = t.into_iter().collect();
    assert_eq!(owned[2], (String::from("m"), ival(3)));
}

#[test]
fn equality_ignores_order() {
    let a: Table = [("x", ival(1)), ("y", ival(2))].into_iter().collect();
    let b: Table = [("y", ival(2)), ("x", ival(1))].into_iter().collect();
    let c: Table = [("x", ival(1)), ("y", ival(3))].into_iter().collect();
    let d: Table = [("x", ival(1))].into_iter().collect();
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_ne!(a, d);
}

#[test]
fn debug_prints_a_map() {
    let t: Table = [("a", ival(1)), ("b", Value::from("x"))].into_iter().collect();
    assert_eq!(format!("{t:?}"), r#"{"a": 1, "b": "x"}"#);
}
