//! Tests for `point` module

use super::point::*;

#[test]
fn test_universal_key_order_integers_before_strings() {
    let mut ids = vec![
        PointId::from("a1ce0a0e-0000-0000-0000-000000000000"),
        PointId::Num(3),
        PointId::Num(1),
        PointId::from("0b000000-0000-0000-0000-000000000000"),
        PointId::Num(2),
    ];
    ids.sort();

    assert_eq!(
        ids,
        vec![
            PointId::Num(1),
            PointId::Num(2),
            PointId::Num(3),
            PointId::from("0b000000-0000-0000-0000-000000000000"),
            PointId::from("a1ce0a0e-0000-0000-0000-000000000000"),
        ]
    );
}

#[test]
fn test_id_spaces_do_not_collide() {
    assert_ne!(PointId::Num(1), PointId::from("1"));
}

#[test]
fn test_point_id_serde_is_untagged() {
    let num: PointId = serde_json::from_str("7").unwrap();
    assert_eq!(num, PointId::Num(7));

    let s: PointId = serde_json::from_str("\"a1ce0a0e-0000-0000-0000-000000000000\"").unwrap();
    assert_eq!(s, PointId::from("a1ce0a0e-0000-0000-0000-000000000000"));

    assert_eq!(serde_json::to_string(&PointId::Num(7)).unwrap(), "7");
}

#[test]
fn test_query_vector_canonicalisation() {
    let (name, values) = QueryVector::from(vec![1.0, 2.0]).into_parts();
    assert_eq!(name, DEFAULT_VECTOR_NAME);
    assert_eq!(values, vec![1.0, 2.0]);

    let (name, values) = QueryVector::from(("image", vec![0.5])).into_parts();
    assert_eq!(name, "image");
    assert_eq!(values, vec![0.5]);

    let named = NamedVector {
        name: "text".to_string(),
        vector: vec![1.0],
    };
    let (name, _) = QueryVector::from(named).into_parts();
    assert_eq!(name, "text");
}

#[test]
fn test_single_vector_canonicalises_to_default_name() {
    let named = PointVectors::Single(vec![1.0, 0.0]).into_named();
    assert_eq!(named.len(), 1);
    assert_eq!(named[DEFAULT_VECTOR_NAME], vec![1.0, 0.0]);
}
