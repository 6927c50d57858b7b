//! The collection engine: data model, query paths and write paths.
//!
//! # Module Structure
//!
//! - [`id_tracker`]: external id to internal index table
//! - `vector_store`: per-name contiguous vector matrices
//! - `payload_store`: payloads and deletion tombstones
//! - `search`: search, recommend, scroll, count, retrieve
//! - `write`: upsert, delete, payload mutations

pub mod id_tracker;
mod payload_store;
mod search;
mod vector_store;
mod write;


pub use id_tracker::IdTracker;
pub use search::{RecommendRequest, ScrollRequest, ScrollResult, SearchRequest};

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use crate::config::{
    CollectionConfig, CollectionConfigInfo, CollectionInfo, CollectionStatus, HnswConfig,
    OptimizersConfig, OptimizersStatus, VectorParams, WalConfig,
};
use crate::error::{Error, Result};
use crate::point::{PointId, PointVectors, Record, DEFAULT_VECTOR_NAME};
use crate::selector::{WithPayload, WithVectors};
use crate::storage::{LogPointStorage, PointStorage};

use payload_store::PayloadStore;
use vector_store::NamedVectorStore;

/// An embedded collection of points with named vectors and payloads.
///
/// The collection is a single-writer, single-reader object: writes take
/// `&mut self`, reads take `&self`, nothing suspends and nothing locks.
/// Hosts that need concurrent access wrap it in a mutex at their own
/// boundary.
pub struct Collection {
    config: CollectionConfig,
    vector_params: HashMap<String, VectorParams>,
    id_tracker: IdTracker,
    vectors: NamedVectorStore,
    payloads: PayloadStore,
    storage: Option<Box<dyn PointStorage>>,
}

impl Collection {
    /// Creates a memory-only collection: nothing is loaded and writes are
    /// not persisted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the vectors config is malformed.
    pub fn new(config: CollectionConfig) -> Result<Self> {
        let vector_params = config.vectors.named()?;
        let vectors = NamedVectorStore::new(&vector_params);

        Ok(Self {
            config,
            vector_params,
            id_tracker: IdTracker::new(),
            vectors,
            payloads: PayloadStore::new(),
            storage: None,
        })
    }

    /// Creates or reopens a collection persisted under `location`.
    ///
    /// Existing points are replayed from the log before the call returns.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is malformed, the location cannot be
    /// opened, or a persisted point no longer matches the config.
    pub fn open(config: CollectionConfig, location: impl AsRef<Path>) -> Result<Self> {
        let storage = LogPointStorage::open(location)?;
        Self::with_storage(config, Box::new(storage))
    }

    /// Creates a collection backed by a custom persistence adapter.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is malformed or replaying the
    /// adapter's points fails.
    pub fn with_storage(config: CollectionConfig, storage: Box<dyn PointStorage>) -> Result<Self> {
        let mut collection = Self::new(config)?;
        collection.storage = Some(storage);
        collection.load()?;
        Ok(collection)
    }

    /// Replays the persisted points into the in-memory state.
    fn load(&mut self) -> Result<()> {
        let points = match self.storage.as_mut() {
            Some(storage) => storage.load()?,
            None => return Ok(()),
        };

        let restored = points.len();
        for point in &points {
            self.apply_point(point)?;
        }
        tracing::debug!(points = restored, "restored collection from storage");

        Ok(())
    }

    /// Returns the configuration the collection was created with.
    #[must_use]
    pub fn config(&self) -> &CollectionConfig {
        &self.config
    }

    /// Returns the parameters of a configured vector name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VectorNameNotFound`] for an unconfigured name.
    pub fn vector_params(&self, name: &str) -> Result<&VectorParams> {
        self.vector_params
            .get(name)
            .ok_or_else(|| Error::VectorNameNotFound(name.to_string()))
    }

    /// Number of live (non-deleted) points.
    #[must_use]
    pub fn points_count(&self) -> usize {
        self.payloads
            .deleted()
            .iter()
            .filter(|deleted| !**deleted)
            .count()
    }

    /// Returns true if the collection holds no live points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points_count() == 0
    }

    /// Status report, shaped like the remote service's collection info.
    ///
    /// The HNSW, WAL and optimizer blocks carry fixed defaults: the
    /// embedded collection never indexes, but clients expect the fields.
    #[must_use]
    pub fn info(&self) -> CollectionInfo {
        let points_count = self.points_count();

        CollectionInfo {
            status: CollectionStatus::Green,
            optimizer_status: OptimizersStatus::Ok,
            vectors_count: points_count * self.vector_params.len(),
            indexed_vectors_count: 0,
            points_count,
            segments_count: 1,
            payload_schema: serde_json::Map::new(),
            config: CollectionConfigInfo {
                params: self.config.clone(),
                hnsw_config: HnswConfig::default(),
                wal_config: WalConfig::default(),
                optimizer_config: OptimizersConfig::default(),
                quantization_config: None,
            },
        }
    }

    /// Total number of allocated slots, tombstoned included.
    pub(crate) fn len(&self) -> usize {
        self.id_tracker.len()
    }

    /// All stored vectors of one point, unwrapped to a bare array when the
    /// collection is configured with only the default vector.
    pub(crate) fn all_vectors(&self, idx: usize) -> PointVectors {
        if self.vector_params.len() == 1 && self.vector_params.contains_key(DEFAULT_VECTOR_NAME) {
            PointVectors::Single(self.vectors.row(DEFAULT_VECTOR_NAME, idx).to_vec())
        } else {
            PointVectors::Named(
                self.vector_params
                    .keys()
                    .map(|name| (name.clone(), self.vectors.row(name, idx).to_vec()))
                    .collect(),
            )
        }
    }

    /// Builds a record for one point with the requested projections.
    pub(crate) fn record(
        &self,
        id: PointId,
        idx: usize,
        with_payload: &WithPayload,
        with_vectors: &WithVectors,
    ) -> Record {
        Record {
            id,
            payload: with_payload.project(self.payloads.get(idx)),
            vector: self.project_vectors(idx, with_vectors),
        }
    }

    /// Applies a vector projection to one point.
    pub(crate) fn project_vectors(
        &self,
        idx: usize,
        with_vectors: &WithVectors,
    ) -> Option<PointVectors> {
        match with_vectors {
            WithVectors::Enable(false) => None,
            WithVectors::Enable(true) => Some(self.all_vectors(idx)),
            WithVectors::Names(names) => Some(PointVectors::Named(
                names
                    .iter()
                    .filter(|name| self.vector_params.contains_key(*name))
                    .map(|name| (name.clone(), self.vectors.row(name, idx).to_vec()))
                    .collect(),
            )),
        }
    }
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("config", &self.config)
            .field("points", &self.len())
            .field("persistent", &self.storage.is_some())
            .finish_non_exhaustive()
    }
}
