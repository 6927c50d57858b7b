//! Durable point storage behind the collection.
//!
//! The collection talks to persistence only through [`PointStorage`]; the
//! file format is the adapter's own concern. A memory-only collection has
//! no adapter at all and every write skips this layer.
//!
//! # Module Structure
//!
//! - [`log_points`]: append-only log adapter (`LogPointStorage`)

mod log_points;


pub use log_points::LogPointStorage;

use crate::error::Result;
use crate::point::{Point, PointId};

/// Contract between a collection and its durable store.
///
/// Implementations must be idempotent per id: persisting the same point
/// twice or deleting an absent id are both no-ops at the storage level.
pub trait PointStorage: Send {
    /// Returns every stored point, in first-insertion order.
    ///
    /// The collection replays this once at startup to rebuild its state.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be read or a
    /// record cannot be decoded.
    fn load(&mut self) -> Result<Vec<Point>>;

    /// Stores or replaces a point by id, durably before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be encoded or written.
    fn persist(&mut self, point: &Point) -> Result<()>;

    /// Removes a point by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal cannot be recorded.
    fn delete(&mut self, id: &PointId) -> Result<()>;
}
