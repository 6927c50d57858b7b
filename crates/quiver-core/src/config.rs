//! Collection configuration and the `info()` status report.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::distance::DistanceMetric;
use crate::error::{Error, Result};
use crate::point::DEFAULT_VECTOR_NAME;

/// Parameters of a single named vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorParams {
    /// Dimensionality of the vector.
    pub size: usize,
    /// Distance metric used to score it.
    pub distance: DistanceMetric,
}

impl VectorParams {
    /// Creates vector parameters with the given size and metric.
    #[must_use]
    pub const fn new(size: usize, distance: DistanceMetric) -> Self {
        Self { size, distance }
    }
}

/// Vector configuration of a collection.
///
/// Either a single anonymous vector (stored under the default name) or a
/// map from vector name to parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VectorsConfig {
    /// A single unnamed vector.
    Single(VectorParams),
    /// One entry per named vector.
    Named(HashMap<String, VectorParams>),
}

impl VectorsConfig {
    /// Canonicalises into a name-to-params map, validating it on the way.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the map is empty or any size is zero.
    pub fn named(&self) -> Result<HashMap<String, VectorParams>> {
        let map = match self {
            Self::Single(params) => {
                let mut map = HashMap::with_capacity(1);
                map.insert(DEFAULT_VECTOR_NAME.to_string(), params.clone());
                map
            }
            Self::Named(map) => map.clone(),
        };

        if map.is_empty() {
            return Err(Error::Config(
                "vectors config must declare at least one vector".to_string(),
            ));
        }
        for (name, params) in &map {
            if params.size == 0 {
                return Err(Error::Config(format!(
                    "vector '{name}' has zero dimension"
                )));
            }
        }

        Ok(map)
    }
}

impl From<VectorParams> for VectorsConfig {
    fn from(params: VectorParams) -> Self {
        Self::Single(params)
    }
}

impl From<HashMap<String, VectorParams>> for VectorsConfig {
    fn from(map: HashMap<String, VectorParams>) -> Self {
        Self::Named(map)
    }
}

/// Configuration of a collection.
///
/// Only `vectors` affects behaviour; the remaining fields are bookkeeping
/// preserved verbatim for [`crate::Collection::info`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Vector configuration.
    pub vectors: VectorsConfig,
    /// Number of shards; echoed by `info()`, not acted upon.
    #[serde(default)]
    pub shard_number: Option<u32>,
    /// Replication factor; echoed by `info()`, not acted upon.
    #[serde(default)]
    pub replication_factor: Option<u32>,
    /// Write consistency factor; echoed by `info()`, not acted upon.
    #[serde(default)]
    pub write_consistency_factor: Option<u32>,
    /// Whether payloads would live on disk; echoed by `info()`, not acted upon.
    #[serde(default)]
    pub on_disk_payload: Option<bool>,
}

impl CollectionConfig {
    /// Creates a config with the given vectors and default bookkeeping fields.
    #[must_use]
    pub fn new(vectors: impl Into<VectorsConfig>) -> Self {
        Self {
            vectors: vectors.into(),
            shard_number: None,
            replication_factor: None,
            write_consistency_factor: None,
            on_disk_payload: None,
        }
    }
}

/// Collection health, as reported by [`crate::Collection::info`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionStatus {
    /// All good. The only status an embedded collection reports.
    Green,
}

/// Optimizer health, as reported by [`crate::Collection::info`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizersStatus {
    /// All good. The only status an embedded collection reports.
    Ok,
}

/// HNSW parameters echoed by `info()` for protocol-shape compatibility.
/// No indexing actually occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HnswConfig {
    /// Number of graph links per node.
    pub m: usize,
    /// Construction-time candidate pool size.
    pub ef_construct: usize,
    /// Minimal segment size for indexing.
    pub full_scan_threshold: usize,
}

impl Default for HnswConfig {
    fn default() -> Self {
        Self {
            m: 16,
            ef_construct: 100,
            full_scan_threshold: 10_000,
        }
    }
}

/// WAL parameters echoed by `info()` for protocol-shape compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalConfig {
    /// WAL segment capacity in megabytes.
    pub wal_capacity_mb: usize,
    /// Number of segments created ahead of use.
    pub wal_segments_ahead: usize,
}

impl Default for WalConfig {
    fn default() -> Self {
        Self {
            wal_capacity_mb: 32,
            wal_segments_ahead: 0,
        }
    }
}

/// Optimizer parameters echoed by `info()` for protocol-shape compatibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizersConfig {
    /// Fraction of deleted vectors triggering vacuum.
    pub deleted_threshold: f64,
    /// Minimal vector count for vacuum.
    pub vacuum_min_vector_number: usize,
    /// Target number of segments.
    pub default_segment_number: usize,
    /// Vector count threshold for building an index.
    pub indexing_threshold: usize,
    /// Flush interval in seconds.
    pub flush_interval_sec: u64,
    /// Maximum optimization threads.
    pub max_optimization_threads: usize,
}

impl Default for OptimizersConfig {
    fn default() -> Self {
        Self {
            deleted_threshold: 0.2,
            vacuum_min_vector_number: 1000,
            default_segment_number: 0,
            indexing_threshold: 20_000,
            flush_interval_sec: 5,
            max_optimization_threads: 1,
        }
    }
}

/// The configuration block of a [`CollectionInfo`] report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionConfigInfo {
    /// The collection parameters, echoed from construction.
    pub params: CollectionConfig,
    /// Defaulted HNSW parameters.
    pub hnsw_config: HnswConfig,
    /// Defaulted WAL parameters.
    pub wal_config: WalConfig,
    /// Defaulted optimizer parameters.
    pub optimizer_config: OptimizersConfig,
    /// Quantization is never configured on an embedded collection.
    pub quantization_config: Option<serde_json::Value>,
}

/// Status report returned by [`crate::Collection::info`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionInfo {
    /// Collection health.
    pub status: CollectionStatus,
    /// Optimizer health.
    pub optimizer_status: OptimizersStatus,
    /// Live points times number of configured vector names.
    pub vectors_count: usize,
    /// Always 0: the embedded collection does no indexing.
    pub indexed_vectors_count: usize,
    /// Number of live (non-deleted) points.
    pub points_count: usize,
    /// Always 1.
    pub segments_count: usize,
    /// Always empty: no payload schema is tracked.
    pub payload_schema: serde_json::Map<String, serde_json::Value>,
    /// Echoed configuration with defaulted parameters.
    pub config: CollectionConfigInfo,
}
