//! Point data structures: external ids, named vectors, payloads and records.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Name of the default (unnamed) vector.
pub const DEFAULT_VECTOR_NAME: &str = "";

/// Payload attached to a point: a JSON object keyed by field name.
pub type Payload = serde_json::Map<String, JsonValue>;

/// External point identifier.
///
/// Either an unsigned integer or a UUID string. The two spaces never
/// collide: equality and hashing compare the variant tag first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointId {
    /// Numeric id.
    Num(u64),
    /// String id; must parse as a UUID to be accepted by a write.
    Uuid(String),
}

impl PointId {
    /// Ordering key giving a deterministic global sort over heterogeneous ids.
    ///
    /// Numeric ids map to `("", n)` and string ids to `(s, 0)`, so all
    /// integers sort before all non-empty strings, integers numerically and
    /// strings lexicographically.
    #[must_use]
    pub fn universal_key(&self) -> (&str, u64) {
        match self {
            Self::Num(n) => ("", *n),
            Self::Uuid(s) => (s.as_str(), 0),
        }
    }
}

impl Ord for PointId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.universal_key().cmp(&other.universal_key())
    }
}

impl PartialOrd for PointId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(n) => write!(f, "{n}"),
            Self::Uuid(s) => write!(f, "{s}"),
        }
    }
}

impl From<u64> for PointId {
    fn from(id: u64) -> Self {
        Self::Num(id)
    }
}

impl From<&str> for PointId {
    fn from(id: &str) -> Self {
        Self::Uuid(id.to_string())
    }
}

impl From<String> for PointId {
    fn from(id: String) -> Self {
        Self::Uuid(id)
    }
}

impl From<uuid::Uuid> for PointId {
    fn from(id: uuid::Uuid) -> Self {
        Self::Uuid(id.to_string())
    }
}

/// Per-point vector data: a bare array for the default vector, or a map
/// from vector name to array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointVectors {
    /// A single unnamed vector, stored under the default name.
    Single(Vec<f32>),
    /// One array per configured vector name.
    Named(HashMap<String, Vec<f32>>),
}

impl PointVectors {
    /// Borrows the vectors in canonical named form.
    ///
    /// A `Single` vector appears under [`DEFAULT_VECTOR_NAME`].
    #[must_use]
    pub fn named_slices(&self) -> Vec<(&str, &[f32])> {
        match self {
            Self::Single(v) => vec![(DEFAULT_VECTOR_NAME, v.as_slice())],
            Self::Named(m) => m.iter().map(|(k, v)| (k.as_str(), v.as_slice())).collect(),
        }
    }

    /// Converts into canonical named form, consuming self.
    #[must_use]
    pub fn into_named(self) -> HashMap<String, Vec<f32>> {
        match self {
            Self::Single(v) => {
                let mut map = HashMap::with_capacity(1);
                map.insert(DEFAULT_VECTOR_NAME.to_string(), v);
                map
            }
            Self::Named(m) => m,
        }
    }
}

impl From<Vec<f32>> for PointVectors {
    fn from(v: Vec<f32>) -> Self {
        Self::Single(v)
    }
}

impl From<HashMap<String, Vec<f32>>> for PointVectors {
    fn from(m: HashMap<String, Vec<f32>>) -> Self {
        Self::Named(m)
    }
}

/// A point in the collection.
///
/// A point consists of:
/// - A unique external identifier
/// - One vector per configured name
/// - Optional payload (metadata)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Point {
    /// Unique identifier for the point.
    pub id: PointId,

    /// The vector data, one entry per configured name.
    pub vector: PointVectors,

    /// Optional JSON payload containing metadata.
    #[serde(default)]
    pub payload: Option<Payload>,
}

impl Point {
    /// Creates a new point with the given id, vectors, and optional payload.
    #[must_use]
    pub fn new(
        id: impl Into<PointId>,
        vector: impl Into<PointVectors>,
        payload: Option<Payload>,
    ) -> Self {
        Self {
            id: id.into(),
            vector: vector.into(),
            payload,
        }
    }

    /// Creates a new point without payload.
    #[must_use]
    pub fn without_payload(id: impl Into<PointId>, vector: impl Into<PointVectors>) -> Self {
        Self::new(id, vector, None)
    }
}

/// A named query vector, pairing a vector name with the values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedVector {
    /// Name of the configured vector to search.
    pub name: String,
    /// Query values.
    pub vector: Vec<f32>,
}

/// Query vector accepted by search, in one of the supported shapes.
///
/// All shapes canonicalise to a `(name, values)` pair; a plain array
/// targets the default vector.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryVector {
    /// A bare array, targeting the default vector.
    Plain(Vec<f32>),
    /// A `(name, values)` pair.
    Named(String, Vec<f32>),
}

impl QueryVector {
    /// Canonicalises into a `(name, values)` pair.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<f32>) {
        match self {
            Self::Plain(v) => (DEFAULT_VECTOR_NAME.to_string(), v),
            Self::Named(name, v) => (name, v),
        }
    }
}

impl From<Vec<f32>> for QueryVector {
    fn from(v: Vec<f32>) -> Self {
        Self::Plain(v)
    }
}

impl From<&[f32]> for QueryVector {
    fn from(v: &[f32]) -> Self {
        Self::Plain(v.to_vec())
    }
}

impl From<(String, Vec<f32>)> for QueryVector {
    fn from((name, v): (String, Vec<f32>)) -> Self {
        Self::Named(name, v)
    }
}

impl From<(&str, Vec<f32>)> for QueryVector {
    fn from((name, v): (&str, Vec<f32>)) -> Self {
        Self::Named(name.to_string(), v)
    }
}

impl From<NamedVector> for QueryVector {
    fn from(named: NamedVector) -> Self {
        Self::Named(named.name, named.vector)
    }
}

/// A point returned by a read path, with the requested projections applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// External id of the point.
    pub id: PointId,
    /// Projected payload, if requested.
    pub payload: Option<Payload>,
    /// Projected vectors, if requested.
    pub vector: Option<PointVectors>,
}

/// A search result with its similarity score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredPoint {
    /// External id of the point.
    pub id: PointId,
    /// Similarity score (interpretation depends on the distance metric).
    pub score: f32,
    /// Write version; always 0 for an embedded collection.
    pub version: u64,
    /// Projected payload, if requested.
    pub payload: Option<Payload>,
    /// Projected vectors, if requested.
    pub vector: Option<PointVectors>,
}

/// Columnar upsert input: positionally aligned id, payload and vector columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    /// External ids, one per row.
    pub ids: Vec<PointId>,
    /// Optional payload column, aligned with `ids`.
    #[serde(default)]
    pub payloads: Option<Vec<Option<Payload>>>,
    /// Vector columns.
    pub vectors: BatchVectors,
}

/// Vector columns of a [`Batch`]: a single array-per-row column for the
/// default vector, or one column per name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BatchVectors {
    /// One array per row, targeting the default vector.
    Single(Vec<Vec<f32>>),
    /// One column of arrays per vector name.
    Named(HashMap<String, Vec<Vec<f32>>>),
}
