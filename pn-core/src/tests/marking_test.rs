use std::collections::BTreeMap;

use super::*;

#[rstest]
fn test_marking_equality_ignores_insertion_order() {
    let mut m1 = Marking::new();
    m1.add("p1", 2);
    m1.add("p0", 1);

    let m2: Marking = marking(&[("p0", 1), ("p1", 2)]);
    assert_eq!(m1, m2);
}

#[rstest]
fn test_marking_zero_counts_are_not_stored() {
    let from_map = Marking::from(BTreeMap::from([("p0".to_string(), 0), ("p1".to_string(), 1)]));
    let mut built = Marking::new();
    built.add("p1", 1);
    built.add("p0", 0);

    assert_eq!(from_map, built);
    assert_eq!(from_map.tokens("p0"), 0);
}

#[rstest]
fn test_marking_remove() {
    let mut m: Marking = marking(&[("p0", 2)]);

    assert!(!m.remove("p0", 3));
    assert_eq!(m.tokens("p0"), 2);

    assert!(m.remove("p0", 1));
    assert_eq!(m.tokens("p0"), 1);

    assert!(m.remove("p0", 1));
    assert!(m.is_empty());
    assert_eq!(m, Marking::new());
}

#[rstest]
fn test_marking_display() {
    let m: Marking = marking(&[("b", 2), ("a", 1)]);
    assert_eq!(m.to_string(), "[a:1, b:2]");
    assert_eq!(m.total_tokens(), 3);
}

#[rstest]
fn test_marking_deserialize_drops_empty_places() {
    let m: Marking = serde_json::from_str(r#"{"p0": 1, "p1": 0}"#).unwrap();
    assert_eq!(m, marking(&[("p0", 1)]));
    assert_eq!(serde_json::to_string(&m).unwrap(), r#"{"p0":1}"#);
}
