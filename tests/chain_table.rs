// ChainTable integration suite.
//
// Each test states the behavior under check. Invariants exercised:
// - Presence: contains_key/get agree, and absent keys are never reported.
// - Ownership: every value leaves the table exactly once, either through
//   the destructor (remove, overwrite, clear, teardown) or through take.
// - Counting: len() tracks inserts, overwrites, and removals exactly.
// - Enumeration: a fresh cursor yields every stored key exactly once.
use chain_table::{ChainTable, DropValue, TableConfig, TableError};
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

type Released = Rc<RefCell<Vec<String>>>;

fn string_table(capacity: usize) -> (ChainTable<String, impl FnMut(String)>, Released) {
    let released: Released = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&released);
    let table = ChainTable::with_destructor(move |v: String| sink.borrow_mut().push(v), capacity)
        .expect("valid capacity");
    (table, released)
}

// Test: insert, remove, and overwrite on a five-bucket table.
// Verifies: counts after each step and that the latest value wins.
#[test]
fn insert_remove_overwrite_scenario() {
    let (mut t, released) = string_table(5);

    t.insert("ABCD123BD", "PRUEBA 1".to_string()).unwrap();
    assert_eq!(t.len(), 1);
    assert!(t.contains_key("ABCD123BD"));

    t.remove("ABCD123BD").unwrap();
    assert_eq!(t.len(), 0);
    assert!(!t.contains_key("ABCD123BD"));
    assert!(!t.contains_key("ASDF12345"));

    t.insert("ABCD123BD", "PRUEBA 1".to_string()).unwrap();
    t.insert("ABCD123BD", "PRUEBA 2".to_string()).unwrap();
    assert_eq!(t.get("ABCD123BD").map(String::as_str), Some("PRUEBA 2"));
    assert_eq!(t.len(), 1);

    // The first PRUEBA 1 went out via remove, the second via overwrite.
    assert_eq!(*released.borrow(), ["PRUEBA 1", "PRUEBA 1"]);
}

// Test: fifteen keys over five buckets.
// Verifies: all inserts succeed and every lookup resolves to its own value
// with three keys per bucket on average.
#[test]
fn heavy_collisions_keep_values_apart() {
    let keys = ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o"];
    let values = ["1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13", "14", "15"];
    let (mut t, _released) = string_table(5);

    let mut inserted = 0;
    for (k, v) in keys.iter().zip(values) {
        if t.insert(k, v.to_string()).is_ok() {
            inserted += 1;
        }
    }
    assert_eq!(inserted, 15);
    assert_eq!(t.len(), 15);

    let matching = keys
        .iter()
        .zip(values)
        .filter(|(k, v)| t.get(k).map(String::as_str) == Some(*v))
        .count();
    assert_eq!(matching, 15);
    assert!((0..5).any(|b| t.bucket_len(b).unwrap() >= 3));
}

// Test: absent keys.
// Verifies: contains_key is false, get is None, remove is NotFound.
#[test]
fn absent_keys_are_never_found() {
    let (mut t, released) = string_table(3);
    t.insert("present", "p".to_string()).unwrap();
    for k in ["absent", "", "presen", "present!"] {
        assert!(!t.contains_key(k));
        assert!(t.get(k).is_none());
        assert_eq!(t.remove(k), Err(TableError::NotFound));
    }
    assert_eq!(t.len(), 1);
    assert!(released.borrow().is_empty());
}

// Test: overwrite ownership.
// Verifies: v1 is released exactly once, v2 is not released until teardown.
#[test]
fn overwrite_releases_previous_value_exactly_once() {
    let (mut t, released) = string_table(4);
    t.insert("k", "v1".to_string()).unwrap();
    t.insert("k", "v2".to_string()).unwrap();
    assert_eq!(*released.borrow(), ["v1"]);
    assert_eq!(t.get("k").map(String::as_str), Some("v2"));
    drop(t);
    assert_eq!(*released.borrow(), ["v1", "v2"]);
}

// Test: teardown completeness.
// Verifies: destroy releases each live value once; removed or taken values
// are not released a second time.
#[test]
fn destroy_releases_each_live_value_once() {
    let (mut t, released) = string_table(7);
    for i in 0..30 {
        t.insert(&format!("k{i}"), format!("v{i}")).unwrap();
    }
    t.remove("k3").unwrap();
    let taken = t.take("k4").unwrap();
    assert_eq!(taken, "v4");
    t.destroy();

    let all = released.borrow();
    assert_eq!(all.len(), 29);
    let unique: BTreeSet<&String> = all.iter().collect();
    assert_eq!(unique.len(), 29);
    assert!(!all.contains(&"v4".to_string()));
}

// Test: full enumeration via the external cursor.
// Verifies: N inserted keys yield exactly N keys, each once, matching the set.
#[test]
fn fresh_cursor_enumerates_every_key_once() {
    let (mut t, _released) = string_table(5);
    let expected: BTreeSet<String> = (0..40).map(|i| format!("key-{i}")).collect();
    for k in &expected {
        t.insert(k, k.to_uppercase()).unwrap();
    }

    let mut cursor = t.cursor();
    let mut seen = Vec::new();
    while cursor.has_next(&t).unwrap() {
        let k = cursor.next(&t).unwrap().expect("has_next promised a key");
        seen.push(k.to_string());
    }
    assert_eq!(cursor.next(&t), Ok(None));
    assert_eq!(cursor.next(&t), Ok(None));

    assert_eq!(seen.len(), expected.len());
    let seen: BTreeSet<String> = seen.into_iter().collect();
    assert_eq!(seen, expected);
}

// Test: cursor contract under mutation.
// Verifies: the stale cursor fails predictably; a new cursor works.
#[test]
fn cursor_fails_fast_after_mutation() {
    let (mut t, _released) = string_table(2);
    t.insert("a", "1".to_string()).unwrap();
    t.insert("b", "2".to_string()).unwrap();

    let mut stale = t.cursor();
    t.insert("c", "3".to_string()).unwrap();
    assert_eq!(stale.next(&t), Err(TableError::Invalidated));

    let fresh = t.cursor();
    assert_eq!(fresh.has_next(&t), Ok(true));
    t.clear();
    assert_eq!(fresh.has_next(&t), Err(TableError::Invalidated));
    assert_eq!(t.cursor().has_next(&t), Ok(false));
}

// Test: construction errors.
// Verifies: zero capacity and even multipliers are rejected.
#[test]
fn invalid_configuration_is_rejected() {
    assert!(matches!(
        ChainTable::<i32>::new(0),
        Err(TableError::InvalidArgument(_))
    ));
    let cfg = TableConfig::new(5).with_multiplier(256);
    assert!(matches!(
        ChainTable::<i32, DropValue>::with_config(cfg, DropValue),
        Err(TableError::InvalidArgument(_))
    ));
}

// Test: a custom multiplier changes the layout, not the contents.
#[test]
fn multiplier_only_affects_distribution() {
    let cfg = TableConfig::default().with_capacity(11).with_multiplier(31);
    let mut a: ChainTable<usize> = ChainTable::with_config(cfg, DropValue).unwrap();
    let mut b: ChainTable<usize> = ChainTable::new(11).unwrap();
    for i in 0..50 {
        let k = format!("item{i}");
        a.insert(&k, i).unwrap();
        b.insert(&k, i).unwrap();
    }
    let ka: BTreeSet<&str> = a.keys().collect();
    let kb: BTreeSet<&str> = b.keys().collect();
    assert_eq!(ka, kb);
    for i in 0..50 {
        assert_eq!(a.get(&format!("item{i}")), Some(&i));
    }
}
