//! End-to-end scenarios exercising the collection engine the way a client
//! of the remote service would.

use std::collections::HashMap;

use serde_json::json;

use quiver_core::{
    Batch, BatchVectors, Collection, CollectionConfig, DistanceMetric, Payload, Point, PointId,
    RecommendRequest, ScrollRequest, SearchRequest, VectorParams, WithPayload, WithVectors,
};

fn payload(pairs: &[(&str, serde_json::Value)]) -> Payload {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), v.clone()))
        .collect()
}

fn dot_collection_2d() -> Collection {
    Collection::new(CollectionConfig::new(VectorParams::new(
        2,
        DistanceMetric::Dot,
    )))
    .expect("valid config")
}

fn seeded_collection() -> Collection {
    let mut collection = dot_collection_2d();
    collection
        .upsert(vec![
            Point::without_payload(1, vec![1.0, 0.0]),
            Point::without_payload(2, vec![0.9, 0.1]),
            Point::without_payload(3, vec![0.0, 1.0]),
        ])
        .expect("upsert seed points");
    collection
}

fn hit_ids(hits: &[quiver_core::ScoredPoint]) -> Vec<PointId> {
    hits.iter().map(|h| h.id.clone()).collect()
}

#[test]
fn basic_dot_search_ranks_by_score() {
    let collection = seeded_collection();

    let hits = collection
        .search(&SearchRequest::new(vec![1.0, 0.0], 2))
        .expect("search");

    assert_eq!(hit_ids(&hits), vec![1.into(), 2.into()]);
    assert!((hits[0].score - 1.0).abs() < 1e-6);
    assert!((hits[1].score - 0.9).abs() < 1e-6);
}

#[test]
fn score_threshold_prunes_the_tail() {
    let collection = seeded_collection();

    let hits = collection
        .search(&SearchRequest::new(vec![1.0, 0.0], 10).score_threshold(0.5))
        .expect("search");

    // Point 3 scores 0.0 and is cut by the early break.
    assert_eq!(hit_ids(&hits), vec![1.into(), 2.into()]);
}

#[test]
fn named_vectors_search_independently() {
    let mut params = HashMap::new();
    params.insert("image".to_string(), VectorParams::new(2, DistanceMetric::Dot));
    params.insert("text".to_string(), VectorParams::new(2, DistanceMetric::Cosine));
    let mut collection =
        Collection::new(CollectionConfig::new(params)).expect("valid config");

    let mut vectors = HashMap::new();
    vectors.insert("image".to_string(), vec![1.0, 0.0]);
    vectors.insert("text".to_string(), vec![1.0, 0.0]);
    collection
        .upsert(vec![Point::without_payload(1, vectors)])
        .expect("upsert");

    let hits = collection
        .search(&SearchRequest::new(("text", vec![0.0, 1.0]), 10))
        .expect("search");

    assert_eq!(hit_ids(&hits), vec![1.into()]);
    assert!(hits[0].score.abs() < 1e-6);
}

#[test]
fn recommend_steers_away_from_negative_examples() {
    let mut collection = seeded_collection();
    collection
        .upsert(vec![Point::without_payload(4, vec![-1.0, 0.0])])
        .expect("upsert");

    // Query becomes 2 * [1, 0] - [-1, 0] = [3, 0]; examples 1 and 4 are
    // excluded by the synthesized must-not-have-id clause.
    let hits = collection
        .recommend(
            &RecommendRequest::new([PointId::from(1u64)], 10).negative([PointId::from(4u64)]),
            None,
        )
        .expect("recommend");

    assert_eq!(hit_ids(&hits)[0], 2.into());
    assert!(!hit_ids(&hits).contains(&1.into()));
    assert!(!hit_ids(&hits).contains(&4.into()));
}

#[test]
fn scroll_orders_integers_before_uuid_strings() {
    let id_a = "aaaaaaaa-0000-0000-0000-000000000000";
    let id_b = "bbbbbbbb-0000-0000-0000-000000000000";

    let mut collection = Collection::new(CollectionConfig::new(VectorParams::new(
        1,
        DistanceMetric::Dot,
    )))
    .expect("valid config");
    collection
        .upsert(vec![
            Point::without_payload(3, vec![0.3]),
            Point::without_payload(id_a, vec![0.4]),
            Point::without_payload(1, vec![0.1]),
            Point::without_payload(id_b, vec![0.5]),
            Point::without_payload(2, vec![0.2]),
        ])
        .expect("upsert");

    let page = collection.scroll(&ScrollRequest::new(3));
    let ids: Vec<PointId> = page.points.iter().map(|r| r.id.clone()).collect();
    assert_eq!(ids, vec![1.into(), 2.into(), 3.into()]);
    assert_eq!(page.next_page_offset, Some(id_a.into()));

    let page = collection.scroll(&ScrollRequest::new(3).offset(id_a));
    let ids: Vec<PointId> = page.points.iter().map(|r| r.id.clone()).collect();
    assert_eq!(ids, vec![id_a.into(), id_b.into()]);
    assert_eq!(page.next_page_offset, None);
}

#[test]
fn payload_projections_include_and_exclude() {
    let mut collection = dot_collection_2d();
    collection
        .upsert(vec![Point::new(
            1,
            vec![1.0, 0.0],
            Some(payload(&[("k", json!(1)), ("v", json!(2))])),
        )])
        .expect("upsert");

    let records = collection.retrieve(
        &[1.into()],
        &WithPayload::from(vec!["k", "missing"]),
        &WithVectors::default(),
    );
    assert_eq!(records[0].payload, Some(payload(&[("k", json!(1))])));

    let records = collection.retrieve(
        &[1.into()],
        &WithPayload::Exclude(quiver_core::selector::PayloadSelectorExclude {
            exclude: vec!["k".to_string()],
        }),
        &WithVectors::default(),
    );
    assert_eq!(records[0].payload, Some(payload(&[("v", json!(2))])));
}

#[test]
fn tombstoned_slot_is_reused_on_reupsert() {
    let mut collection = dot_collection_2d();
    collection
        .upsert(vec![Point::without_payload(1, vec![1.0, 0.0])])
        .expect("upsert");
    collection
        .delete(&vec![PointId::from(1u64)].into())
        .expect("delete");

    assert!(collection
        .retrieve(&[1.into()], &WithPayload::default(), &WithVectors::default())
        .is_empty());
    assert_eq!(collection.count(None), 0);

    collection
        .upsert(vec![Point::without_payload(1, vec![0.0, 1.0])])
        .expect("reupsert");

    assert_eq!(collection.count(None), 1);
    assert_eq!(collection.info().points_count, 1);
    let records = collection.retrieve(
        &[1.into()],
        &WithPayload::default(),
        &WithVectors::Enable(true),
    );
    assert_eq!(
        records[0].vector,
        Some(quiver_core::PointVectors::Single(vec![0.0, 1.0]))
    );
}

#[test]
fn batch_and_list_upserts_are_equivalent() {
    let mut by_list = dot_collection_2d();
    by_list
        .upsert(vec![
            Point::new(1, vec![1.0, 0.0], Some(payload(&[("k", json!("x"))]))),
            Point::without_payload(2, vec![0.9, 0.1]),
        ])
        .expect("list upsert");

    let mut by_batch = dot_collection_2d();
    by_batch
        .upsert_batch(Batch {
            ids: vec![1.into(), 2.into()],
            payloads: Some(vec![Some(payload(&[("k", json!("x"))])), None]),
            vectors: BatchVectors::Single(vec![vec![1.0, 0.0], vec![0.9, 0.1]]),
        })
        .expect("batch upsert");

    let query = SearchRequest::new(vec![1.0, 0.0], 10).with_payload(true);
    let list_hits = by_list.search(&query).expect("search list");
    let batch_hits = by_batch.search(&query).expect("search batch");

    assert_eq!(hit_ids(&list_hits), hit_ids(&batch_hits));
    for (a, b) in list_hits.iter().zip(&batch_hits) {
        assert!((a.score - b.score).abs() < 1e-6);
        assert_eq!(a.payload, b.payload);
    }
}

#[test]
fn info_reports_protocol_shaped_defaults() {
    let mut collection = seeded_collection();
    collection
        .delete(&vec![PointId::from(3u64)].into())
        .expect("delete");

    let info = collection.info();
    assert_eq!(info.points_count, 2);
    assert_eq!(info.vectors_count, 2);
    assert_eq!(info.segments_count, 1);
    assert_eq!(info.indexed_vectors_count, 0);
    assert!(info.payload_schema.is_empty());
    assert_eq!(info.config.hnsw_config.m, 16);
    assert_eq!(info.config.hnsw_config.ef_construct, 100);
    assert_eq!(info.config.wal_config.wal_capacity_mb, 32);
    assert!((info.config.optimizer_config.deleted_threshold - 0.2).abs() < 1e-9);
}
