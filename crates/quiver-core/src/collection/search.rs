//! Query paths: search, recommend, scroll, count and retrieve.
//!
//! Every query is a brute-force scan: the engine computes a payload mask,
//! scores the full matrix for the target vector name, sorts the candidate
//! order, and walks it applying tombstones, thresholds and pagination.

use std::cmp::Ordering;

use crate::collection::Collection;
use crate::error::{Error, Result};
use crate::filter::{payload_mask, Condition, Filter};
use crate::point::{PointId, QueryVector, Record, ScoredPoint};
use crate::selector::{WithPayload, WithVectors};

/// A similarity search over one named vector.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Query vector, in any supported shape.
    pub query: QueryVector,
    /// Optional payload filter.
    pub filter: Option<Filter>,
    /// Maximum number of results to return.
    pub limit: usize,
    /// Number of leading post-filter matches to skip.
    pub offset: usize,
    /// Payload projection.
    pub with_payload: WithPayload,
    /// Vector projection.
    pub with_vectors: WithVectors,
    /// Drop candidates past this score; applied as an early break since
    /// candidates arrive in score order.
    pub score_threshold: Option<f32>,
}

impl SearchRequest {
    /// Creates a search request with default projections and no filter.
    #[must_use]
    pub fn new(query: impl Into<QueryVector>, limit: usize) -> Self {
        Self {
            query: query.into(),
            filter: None,
            limit,
            offset: 0,
            with_payload: WithPayload::default(),
            with_vectors: WithVectors::default(),
            score_threshold: None,
        }
    }

    /// Sets the payload filter.
    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Sets the pagination offset.
    #[must_use]
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the score threshold.
    #[must_use]
    pub fn score_threshold(mut self, threshold: f32) -> Self {
        self.score_threshold = Some(threshold);
        self
    }

    /// Sets the payload projection.
    #[must_use]
    pub fn with_payload(mut self, with_payload: impl Into<WithPayload>) -> Self {
        self.with_payload = with_payload.into();
        self
    }

    /// Sets the vector projection.
    #[must_use]
    pub fn with_vectors(mut self, with_vectors: impl Into<WithVectors>) -> Self {
        self.with_vectors = with_vectors.into();
        self
    }
}

/// A recommendation query built from stored example points.
#[derive(Debug, Clone)]
pub struct RecommendRequest {
    /// Ids of liked examples; must be non-empty.
    pub positive: Vec<PointId>,
    /// Ids of disliked examples.
    pub negative: Vec<PointId>,
    /// Optional payload filter; the engine additionally excludes every
    /// example id.
    pub filter: Option<Filter>,
    /// Maximum number of results to return.
    pub limit: usize,
    /// Number of leading post-filter matches to skip.
    pub offset: usize,
    /// Payload projection.
    pub with_payload: WithPayload,
    /// Vector projection.
    pub with_vectors: WithVectors,
    /// Score threshold, as in [`SearchRequest`].
    pub score_threshold: Option<f32>,
    /// Vector name to search; defaults to the default vector.
    pub using: Option<String>,
    /// Vector name to read examples from in the lookup collection;
    /// defaults to the searched name.
    pub lookup_from_vector_name: Option<String>,
}

impl RecommendRequest {
    /// Creates a recommend request with default projections and no filter.
    #[must_use]
    pub fn new(positive: impl IntoIterator<Item = PointId>, limit: usize) -> Self {
        Self {
            positive: positive.into_iter().collect(),
            negative: Vec::new(),
            filter: None,
            limit,
            offset: 0,
            with_payload: WithPayload::default(),
            with_vectors: WithVectors::default(),
            score_threshold: None,
            using: None,
            lookup_from_vector_name: None,
        }
    }

    /// Sets the negative example ids.
    #[must_use]
    pub fn negative(mut self, negative: impl IntoIterator<Item = PointId>) -> Self {
        self.negative = negative.into_iter().collect();
        self
    }

    /// Sets the payload filter.
    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Sets the vector name to search.
    #[must_use]
    pub fn using(mut self, name: impl Into<String>) -> Self {
        self.using = Some(name.into());
        self
    }

    /// Sets the vector name to read examples from.
    #[must_use]
    pub fn lookup_from_vector_name(mut self, name: impl Into<String>) -> Self {
        self.lookup_from_vector_name = Some(name.into());
        self
    }
}

/// A paginated, filter-aware listing in external id order.
#[derive(Debug, Clone, Default)]
pub struct ScrollRequest {
    /// Optional payload filter.
    pub filter: Option<Filter>,
    /// Page size.
    pub limit: usize,
    /// Start listing at this external id (inclusive); ids strictly below
    /// it in universal-key order are skipped.
    pub offset: Option<PointId>,
    /// Payload projection.
    pub with_payload: WithPayload,
    /// Vector projection.
    pub with_vectors: WithVectors,
}

impl ScrollRequest {
    /// Creates a scroll request for one page.
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Sets the payload filter.
    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Sets the starting external id.
    #[must_use]
    pub fn offset(mut self, offset: impl Into<PointId>) -> Self {
        self.offset = Some(offset.into());
        self
    }
}

/// One page of scroll results.
#[derive(Debug, Clone)]
pub struct ScrollResult {
    /// The records of this page.
    pub points: Vec<Record>,
    /// Offset to pass to the next scroll call; `None` when exhausted.
    pub next_page_offset: Option<PointId>,
}

impl Collection {
    /// Searches for the points most similar to the query vector.
    ///
    /// Results are ordered by score: descending for Cosine/Dot, ascending
    /// for Euclid. Equal scores keep ascending internal-index order (the
    /// ordering sort is stable).
    ///
    /// # Errors
    ///
    /// Returns an error if the query names an unconfigured vector or its
    /// dimensionality does not match the configuration.
    pub fn search(&self, request: &SearchRequest) -> Result<Vec<ScoredPoint>> {
        let (name, query) = request.query.clone().into_parts();
        let params = self.vector_params(&name)?;
        if query.len() != params.size {
            return Err(Error::DimensionMismatch {
                expected: params.size,
                actual: query.len(),
            });
        }

        let len = self.len();
        let mask = self.live_mask(request.filter.as_ref());
        let scores = params
            .distance
            .score_rows(&query, self.vectors.matrix(&name, len), params.size);
        let bigger_is_better = params.distance.higher_is_better();

        let mut order: Vec<usize> = (0..len).collect();
        if bigger_is_better {
            order.sort_by(|&a, &b| cmp_scores(scores[b], scores[a]));
        } else {
            order.sort_by(|&a, &b| cmp_scores(scores[a], scores[b]));
        }

        let mut results: Vec<ScoredPoint> = Vec::new();
        for &idx in &order {
            if results.len() >= request.limit.saturating_add(request.offset) {
                break;
            }
            if !mask[idx] {
                continue;
            }

            let score = scores[idx];
            if let Some(threshold) = request.score_threshold {
                // The order is monotonic in score, so no later candidate
                // can pass once the threshold is crossed.
                let pruned = if bigger_is_better {
                    score < threshold
                } else {
                    score > threshold
                };
                if pruned {
                    break;
                }
            }

            results.push(ScoredPoint {
                id: self.id_tracker.reverse(idx).clone(),
                score,
                version: 0,
                payload: request.with_payload.project(self.payloads.get(idx)),
                vector: self.project_vectors(idx, &request.with_vectors),
            });
        }

        if request.offset >= results.len() {
            return Ok(Vec::new());
        }
        Ok(results.split_off(request.offset))
    }

    /// Searches for points similar to stored examples.
    ///
    /// The query vector is the mean of the positive examples, pushed away
    /// from the mean of the negatives when any are given. Example vectors
    /// are read from `lookup_from` when provided, otherwise from this
    /// collection; all example ids are excluded from the results.
    ///
    /// # Errors
    ///
    /// Returns an error if the positive list is empty, an example id is
    /// unknown to the lookup collection, or a vector name is unconfigured.
    pub fn recommend(
        &self,
        request: &RecommendRequest,
        lookup_from: Option<&Collection>,
    ) -> Result<Vec<ScoredPoint>> {
        if request.positive.is_empty() {
            return Err(Error::NoPositiveExamples);
        }

        let lookup = lookup_from.unwrap_or(self);
        let target_name = request.using.clone().unwrap_or_default();
        let lookup_name = request
            .lookup_from_vector_name
            .clone()
            .unwrap_or_else(|| target_name.clone());
        let dim = lookup.vector_params(&lookup_name)?.size;

        let positive = lookup.example_rows(&lookup_name, &request.positive)?;
        let negative = lookup.example_rows(&lookup_name, &request.negative)?;

        let mean_positive = mean_vector(&positive, dim);
        let query = if negative.is_empty() {
            mean_positive
        } else {
            let mean_negative = mean_vector(&negative, dim);
            mean_positive
                .iter()
                .zip(&mean_negative)
                .map(|(p, n)| 2.0 * p - n)
                .collect()
        };

        let mut mentioned = request.positive.clone();
        mentioned.extend(request.negative.iter().cloned());
        let mut filter = request.filter.clone().unwrap_or_default();
        filter.must_not.push(Condition::has_id(mentioned));

        self.search(&SearchRequest {
            query: QueryVector::Named(target_name, query),
            filter: Some(filter),
            limit: request.limit,
            offset: request.offset,
            with_payload: request.with_payload.clone(),
            with_vectors: request.with_vectors.clone(),
            score_threshold: request.score_threshold,
        })
    }

    /// Lists points in universal-key id order, one page at a time.
    ///
    /// Clients page by feeding `next_page_offset` back until it is `None`.
    #[must_use]
    pub fn scroll(&self, request: &ScrollRequest) -> ScrollResult {
        if self.id_tracker.is_empty() {
            return ScrollResult {
                points: Vec::new(),
                next_page_offset: None,
            };
        }

        let mut sorted: Vec<(&PointId, usize)> = self.id_tracker.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(b.0));

        let mask = self.live_mask(request.filter.as_ref());

        let mut records: Vec<Record> = Vec::new();
        for (id, idx) in sorted {
            if let Some(offset) = &request.offset {
                if id < offset {
                    continue;
                }
            }
            if records.len() >= request.limit.saturating_add(1) {
                break;
            }
            if !mask[idx] {
                continue;
            }

            records.push(self.record(
                id.clone(),
                idx,
                &request.with_payload,
                &request.with_vectors,
            ));
        }

        if records.len() > request.limit {
            let next = records[request.limit].id.clone();
            records.truncate(request.limit);
            ScrollResult {
                points: records,
                next_page_offset: Some(next),
            }
        } else {
            ScrollResult {
                points: records,
                next_page_offset: None,
            }
        }
    }

    /// Counts the live points matching a filter.
    #[must_use]
    pub fn count(&self, filter: Option<&Filter>) -> usize {
        self.live_mask(filter).iter().filter(|hit| **hit).count()
    }

    /// Retrieves points by id, preserving the caller's order.
    ///
    /// Unknown and deleted ids are skipped; a duplicated id is emitted
    /// once per occurrence.
    #[must_use]
    pub fn retrieve(
        &self,
        ids: &[PointId],
        with_payload: &WithPayload,
        with_vectors: &WithVectors,
    ) -> Vec<Record> {
        ids.iter()
            .filter_map(|id| {
                self.id_tracker
                    .resolve(id)
                    .filter(|idx| self.payloads.alive(*idx))
                    .map(|idx| self.record(id.clone(), idx, with_payload, with_vectors))
            })
            .collect()
    }

    /// Acceptance mask over internal indices: payload filter AND not
    /// tombstoned.
    pub(crate) fn live_mask(&self, filter: Option<&Filter>) -> Vec<bool> {
        payload_mask(self.payloads.payloads(), filter, &self.id_tracker)
            .into_iter()
            .zip(self.payloads.deleted())
            .map(|(accepted, deleted)| accepted && !deleted)
            .collect()
    }

    /// Gathers the vector rows of example points under one name.
    fn example_rows(&self, name: &str, ids: &[PointId]) -> Result<Vec<&[f32]>> {
        ids.iter()
            .map(|id| {
                self.id_tracker
                    .resolve(id)
                    .map(|idx| self.vectors.row(name, idx))
                    .ok_or_else(|| Error::PointNotFound(id.clone()))
            })
            .collect()
    }
}

fn cmp_scores(a: f32, b: f32) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Element-wise mean of the given rows.
fn mean_vector(rows: &[&[f32]], dim: usize) -> Vec<f32> {
    let mut mean = vec![0.0f32; dim];
    for row in rows {
        for (acc, value) in mean.iter_mut().zip(*row) {
            *acc += value;
        }
    }
    #[allow(clippy::cast_precision_loss)]
    let n = rows.len() as f32;
    for acc in &mut mean {
        *acc /= n;
    }
    mean
}
