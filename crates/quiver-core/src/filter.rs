//! Payload filtering for search, scroll, count and selector resolution.
//!
//! A [`Filter`] combines boolean clauses over [`Condition`]s evaluated
//! against point payloads (and, for [`Condition::HasId`], against the
//! external id). The query engine consumes filters exclusively through
//! [`payload_mask`], which turns a filter into an acceptance mask over
//! internal indices.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::collection::IdTracker;
use crate::point::{Payload, PointId};

/// A boolean combination of conditions over point payloads.
///
/// Semantics follow the usual must/should/must-not scheme: every `must`
/// clause has to hold, at least one `should` clause has to hold (when any
/// are present), and no `must_not` clause may hold.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Filter {
    /// Conditions that must all match.
    #[serde(default)]
    pub must: Vec<Condition>,
    /// Conditions of which at least one must match, when non-empty.
    #[serde(default)]
    pub should: Vec<Condition>,
    /// Conditions that must not match.
    #[serde(default)]
    pub must_not: Vec<Condition>,
}

impl Filter {
    /// Creates a filter requiring every given condition.
    #[must_use]
    pub fn must(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Self {
            must: conditions.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Creates a filter requiring at least one of the given conditions.
    #[must_use]
    pub fn should(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Self {
            should: conditions.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Creates a filter rejecting every given condition.
    #[must_use]
    pub fn must_not(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Self {
            must_not: conditions.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Evaluates the filter against a single payload and its external id.
    #[must_use]
    pub fn check(&self, payload: &Payload, id: &PointId) -> bool {
        if !self.must.iter().all(|c| c.check(payload, id)) {
            return false;
        }
        if !self.should.is_empty() && !self.should.iter().any(|c| c.check(payload, id)) {
            return false;
        }
        self.must_not.iter().all(|c| !c.check(payload, id))
    }
}

/// A single filter clause.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Field equality: the payload value under `key` equals `value`.
    ///
    /// If the payload value is an array, the condition holds when any
    /// element equals `value`.
    Match {
        /// Field key; dot notation descends into nested objects.
        key: String,
        /// Value to compare against.
        value: Value,
    },
    /// Numeric range over the payload value under `key`.
    Range {
        /// Field key; dot notation descends into nested objects.
        key: String,
        /// Exclusive lower bound.
        gt: Option<f64>,
        /// Inclusive lower bound.
        gte: Option<f64>,
        /// Exclusive upper bound.
        lt: Option<f64>,
        /// Inclusive upper bound.
        lte: Option<f64>,
    },
    /// The external point id is one of the listed ids.
    HasId(Vec<PointId>),
    /// A nested boolean group.
    Nested(Box<Filter>),
}

impl Condition {
    /// Creates an equality condition.
    #[must_use]
    pub fn matches(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Match {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a range condition with the given bounds.
    #[must_use]
    pub fn range(
        key: impl Into<String>,
        gt: Option<f64>,
        gte: Option<f64>,
        lt: Option<f64>,
        lte: Option<f64>,
    ) -> Self {
        Self::Range {
            key: key.into(),
            gt,
            gte,
            lt,
            lte,
        }
    }

    /// Creates a has-id condition over the given ids.
    #[must_use]
    pub fn has_id(ids: impl IntoIterator<Item = PointId>) -> Self {
        Self::HasId(ids.into_iter().collect())
    }

    /// Creates a nested filter condition.
    #[must_use]
    pub fn nested(filter: Filter) -> Self {
        Self::Nested(Box::new(filter))
    }

    /// Evaluates the condition against a payload and its external id.
    #[must_use]
    pub fn check(&self, payload: &Payload, id: &PointId) -> bool {
        match self {
            Self::Match { key, value } => get_field(payload, key).is_some_and(|v| match v {
                Value::Array(items) => items.iter().any(|item| values_equal(item, value)),
                other => values_equal(other, value),
            }),
            Self::Range {
                key,
                gt,
                gte,
                lt,
                lte,
            } => get_field(payload, key)
                .and_then(Value::as_f64)
                .is_some_and(|v| {
                    gt.is_none_or(|b| v > b)
                        && gte.is_none_or(|b| v >= b)
                        && lt.is_none_or(|b| v < b)
                        && lte.is_none_or(|b| v <= b)
                }),
            Self::HasId(ids) => ids.contains(id),
            Self::Nested(filter) => filter.check(payload, id),
        }
    }
}

/// Computes the acceptance mask of a filter over every stored payload.
///
/// Returns one boolean per internal index; an absent filter accepts
/// everything. Tombstones are not consulted here: the query engine
/// combines the returned mask with its own liveness mask.
#[must_use]
pub fn payload_mask(payloads: &[Payload], filter: Option<&Filter>, ids: &IdTracker) -> Vec<bool> {
    match filter {
        None => vec![true; payloads.len()],
        Some(filter) => payloads
            .iter()
            .enumerate()
            .map(|(idx, payload)| filter.check(payload, ids.reverse(idx)))
            .collect(),
    }
}

/// Gets a field from a payload, supporting dot notation for nested fields.
fn get_field<'a>(payload: &'a Payload, field: &str) -> Option<&'a Value> {
    let mut parts = field.split('.');
    let mut current = payload.get(parts.next()?)?;
    for part in parts {
        current = current.get(part)?;
    }
    Some(current)
}

/// Compares two JSON values for equality.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => a
            .as_f64()
            .zip(b.as_f64())
            .is_some_and(|(a, b)| (a - b).abs() < f64::EPSILON),
        (a, b) => a == b,
    }
}
