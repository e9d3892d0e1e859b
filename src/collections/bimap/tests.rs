#![cfg(test)]

use super::*;

#[test]
fn test_insert_and_lookup_both_directions() {
    let mut map = BiMap::new();
    assert_eq!(map.insert(1, "one"), Evicted::Neither);
    assert_eq!(map.insert(2, "two"), Evicted::Neither);
    assert_eq!(map.insert(3, "three"), Evicted::Neither);

    assert_eq!(map.len(), 3);
    assert_eq!(map.get_by_left(&2), Some(&"two"));
    assert_eq!(map.get_by_right(&"three"), Some(&3));
    assert_eq!(map.get_by_left(&4), None);
    assert_eq!(map.get_by_right(&"four"), None);
    assert!(map.contains_left(&1));
    assert!(!map.contains_right(&"four"));
    map.verify_bijection();
}

#[test]
fn test_insert_evicts_left_pairing() {
    let mut map: BiMap<_, _> = [(1, "one"), (2, "two")].into_iter().collect();

    let evicted = map.insert(1, "uno");
    assert_eq!(evicted, Evicted::Left((1, "one")), "Re-pairing a left value should evict its old pair.");

    assert_eq!(map.len(), 2);
    assert_eq!(map.get_by_left(&1), Some(&"uno"));
    assert_eq!(map.get_by_right(&"one"), None, "The evicted right value should be gone entirely.");
    map.verify_bijection();
}

#[test]
fn test_insert_evicts_right_pairing() {
    let mut map: BiMap<_, _> = [(1, "one"), (2, "two")].into_iter().collect();

    let evicted = map.insert(3, "one");
    assert_eq!(evicted, Evicted::Right((1, "one")), "Re-pairing a right value should evict its old pair.");

    assert_eq!(map.len(), 2);
    assert_eq!(map.get_by_right(&"one"), Some(&3));
    assert_eq!(map.get_by_left(&1), None, "The evicted left value should be gone entirely.");
    map.verify_bijection();
}

#[test]
fn test_insert_evicts_both_pairings() {
    let mut map: BiMap<_, _> = [(1, "one"), (2, "two"), (3, "three")].into_iter().collect();

    let evicted = map.insert(1, "two");
    assert_eq!(
        evicted,
        Evicted::Both((1, "one"), (2, "two")),
        "Cross-pairing two already-paired values should evict both old pairs."
    );

    assert_eq!(map.len(), 2, "Two pairs collapsed into one.");
    assert_eq!(map.get_by_left(&1), Some(&"two"));
    assert_eq!(map.get_by_left(&2), None);
    assert_eq!(map.get_by_right(&"one"), None);
    assert_eq!(map.get_by_left(&3), Some(&"three"), "Uninvolved pairs should be untouched.");
    map.verify_bijection();
}

#[test]
fn test_insert_existing_pair_reports_pair() {
    let mut map = BiMap::new();
    map.insert(1, "one");

    assert_eq!(map.insert(1, "one"), Evicted::Pair((1, "one")));
    assert_eq!(map.len(), 1);
    assert_eq!(map.get_by_left(&1), Some(&"one"));
    map.verify_bijection();
}

#[test]
fn test_remove_both_directions() {
    let mut map: BiMap<_, _> = [(1, "one"), (2, "two"), (3, "three")].into_iter().collect();

    assert_eq!(map.remove_by_left(&2), Some((2, "two")));
    assert_eq!(map.remove_by_right(&"three"), Some((3, "three")));
    assert_eq!(map.remove_by_left(&2), None, "Removing an absent left value should be None.");
    assert_eq!(map.remove_by_right(&"two"), None, "Removal should clear both directions.");

    assert_eq!(map.len(), 1);
    assert_eq!(map.get_by_left(&1), Some(&"one"));
    map.verify_bijection();
}

#[test]
fn test_borrowed_key_lookup() {
    let mut map: BiMap<String, u32> = BiMap::new();
    map.insert("one".to_string(), 1);

    // Queries should accept &str for a String side.
    assert_eq!(map.get_by_left("one"), Some(&1));
    assert!(map.contains_left("one"));
    assert_eq!(map.remove_by_left("one"), Some(("one".to_string(), 1)));
    assert!(map.is_empty());
}

#[test]
fn test_from_iterator_applies_eviction() {
    let map: BiMap<_, _> = [(1, "one"), (2, "two"), (1, "uno")].into_iter().collect();

    assert_eq!(map.len(), 2, "A later pair for the same left value should win.");
    assert_eq!(map.get_by_left(&1), Some(&"uno"));
    assert_eq!(map.get_by_right(&"one"), None);
    map.verify_bijection();
}

#[test]
fn test_equality_and_clone() {
    let map: BiMap<_, _> = [(1, "one"), (2, "two")].into_iter().collect();
    let same: BiMap<_, _> = [(2, "two"), (1, "one")].into_iter().collect();
    let different: BiMap<_, _> = [(1, "uno"), (2, "two")].into_iter().collect();

    assert_eq!(map, same, "Insertion order should not affect equality.");
    assert_ne!(map, different);
    assert_eq!(map.clone(), map);
}

#[test]
fn test_display() {
    let mut map = BiMap::new();
    map.insert(1, "one");
    assert_eq!(format!("{map}"), "{1 <-> one}");
}
