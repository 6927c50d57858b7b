//! # `QuiverDB` Core
//!
//! An embedded, in-process vector collection engine.
//!
//! `QuiverDB` stores points (an external id, one or more named `f32`
//! vectors, and a JSON payload) and serves brute-force similarity
//! search, recommendation by example, filtered scroll, count, retrieve
//! and payload mutation over them. It is the local counterpart of a
//! remote vector database: the same client code observes the same
//! scoring, ordering, filtering and projection semantics without running
//! a server.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use quiver_core::{
//!     Collection, CollectionConfig, DistanceMetric, Point, SearchRequest, VectorParams,
//! };
//!
//! let config = CollectionConfig::new(VectorParams::new(2, DistanceMetric::Dot));
//! let mut collection = Collection::new(config)?;
//!
//! collection.upsert(vec![
//!     Point::without_payload(1, vec![1.0, 0.0]),
//!     Point::without_payload(2, vec![0.0, 1.0]),
//! ])?;
//!
//! let hits = collection.search(&SearchRequest::new(vec![1.0, 0.0], 10))?;
//! assert_eq!(hits[0].id, 1.into());
//! ```
//!
//! Pass a location to [`Collection::open`] to persist points across
//! restarts through the append-only point log.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod collection;
pub mod config;
pub mod distance;
pub mod error;
pub mod filter;
pub mod point;
pub mod selector;
pub mod storage;

#[cfg(test)]
mod config_tests;
#[cfg(test)]
mod distance_tests;
#[cfg(test)]
mod point_tests;
#[cfg(test)]
mod selector_tests;

pub use collection::{
    Collection, IdTracker, RecommendRequest, ScrollRequest, ScrollResult, SearchRequest,
};
pub use config::{CollectionConfig, CollectionInfo, VectorParams, VectorsConfig};
pub use distance::DistanceMetric;
pub use error::{Error, ErrorKind, Result};
pub use filter::{Condition, Filter};
pub use point::{
    Batch, BatchVectors, NamedVector, Payload, Point, PointId, PointVectors, QueryVector, Record,
    ScoredPoint, DEFAULT_VECTOR_NAME,
};
pub use selector::{
    FilterSelector, PayloadSelectorExclude, PayloadSelectorInclude, PointIdsList, PointsSelector,
    WithPayload, WithVectors,
};
pub use storage::{LogPointStorage, PointStorage};
