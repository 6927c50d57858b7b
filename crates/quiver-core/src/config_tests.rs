//! Tests for `config` module

use std::collections::HashMap;

use super::config::*;
use super::distance::DistanceMetric;
use super::error::{Error, ErrorKind};
use super::point::DEFAULT_VECTOR_NAME;

#[test]
fn test_single_params_canonicalise_to_default_name() {
    let config = VectorsConfig::Single(VectorParams::new(4, DistanceMetric::Cosine));
    let named = config.named().unwrap();

    assert_eq!(named.len(), 1);
    assert_eq!(named[DEFAULT_VECTOR_NAME].size, 4);
}

#[test]
fn test_empty_named_config_is_rejected() {
    let config = VectorsConfig::Named(HashMap::new());
    let err = config.named().unwrap_err();

    assert!(matches!(err, Error::Config(_)));
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[test]
fn test_zero_dimension_is_rejected() {
    let mut map = HashMap::new();
    map.insert("image".to_string(), VectorParams::new(0, DistanceMetric::Dot));
    let err = VectorsConfig::Named(map).named().unwrap_err();

    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_bookkeeping_fields_default_to_none() {
    let config = CollectionConfig::new(VectorParams::new(2, DistanceMetric::Dot));
    assert_eq!(config.shard_number, None);
    assert_eq!(config.on_disk_payload, None);
}

#[test]
fn test_vectors_config_serde_shapes() {
    let single: VectorsConfig =
        serde_json::from_str(r#"{"size": 2, "distance": "Dot"}"#).unwrap();
    assert!(matches!(single, VectorsConfig::Single(_)));

    let named: VectorsConfig =
        serde_json::from_str(r#"{"image": {"size": 2, "distance": "Cosine"}}"#).unwrap();
    assert!(matches!(named, VectorsConfig::Named(_)));
}
