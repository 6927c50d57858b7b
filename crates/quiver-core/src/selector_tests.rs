//! Tests for `selector` module

use serde_json::json;

use super::point::Payload;
use super::selector::*;

fn payload(pairs: &[(&str, serde_json::Value)]) -> Payload {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), v.clone()))
        .collect()
}

#[test]
fn test_bool_projection() {
    let p = payload(&[("k", json!(1))]);

    assert_eq!(WithPayload::Enable(false).project(&p), None);
    assert_eq!(WithPayload::Enable(true).project(&p), Some(p));
}

#[test]
fn test_key_list_drops_missing_keys() {
    let p = payload(&[("k", json!(1)), ("v", json!(2))]);
    let projection = WithPayload::from(vec!["k", "missing"]);

    assert_eq!(projection.project(&p), Some(payload(&[("k", json!(1))])));
}

#[test]
fn test_include_selector_matches_key_list() {
    let p = payload(&[("k", json!(1)), ("v", json!(2))]);
    let projection = WithPayload::Include(PayloadSelectorInclude {
        include: vec!["v".to_string()],
    });

    assert_eq!(projection.project(&p), Some(payload(&[("v", json!(2))])));
}

#[test]
fn test_exclude_selector_keeps_the_rest() {
    let p = payload(&[("k", json!(1)), ("v", json!(2))]);
    let projection = WithPayload::Exclude(PayloadSelectorExclude {
        exclude: vec!["k".to_string()],
    });

    assert_eq!(projection.project(&p), Some(payload(&[("v", json!(2))])));
}

#[test]
fn test_defaults() {
    assert!(matches!(WithPayload::default(), WithPayload::Enable(true)));
    assert!(matches!(WithVectors::default(), WithVectors::Enable(false)));
}
