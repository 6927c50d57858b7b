//! Bidirectional mapping between external point ids and internal indices.

use rustc_hash::FxHashMap;

use crate::point::PointId;

/// Append-only id table.
///
/// Internal indices are dense and monotonic with first insertion; a
/// deleted point keeps its slot, so an index is never reused for a
/// different external id within the process lifetime.
#[derive(Debug, Default)]
pub struct IdTracker {
    ext_to_idx: FxHashMap<PointId, usize>,
    idx_to_ext: Vec<PointId>,
}

impl IdTracker {
    /// Creates an empty id table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the internal index of an external id.
    #[must_use]
    pub fn resolve(&self, id: &PointId) -> Option<usize> {
        self.ext_to_idx.get(id).copied()
    }

    /// Assigns the next dense index to a new external id.
    ///
    /// Callers must check [`IdTracker::resolve`] first; assigning an id
    /// that is already present breaks the bidirectional invariant.
    pub fn assign(&mut self, id: PointId) -> usize {
        debug_assert!(!self.ext_to_idx.contains_key(&id));
        let idx = self.idx_to_ext.len();
        self.ext_to_idx.insert(id.clone(), idx);
        self.idx_to_ext.push(id);
        idx
    }

    /// Returns the external id stored at an internal index.
    ///
    /// # Panics
    ///
    /// Panics if `idx` has never been assigned.
    #[must_use]
    pub fn reverse(&self, idx: usize) -> &PointId {
        &self.idx_to_ext[idx]
    }

    /// Number of assigned indices, tombstoned slots included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.idx_to_ext.len()
    }

    /// Returns true if no index was ever assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.idx_to_ext.is_empty()
    }

    /// Iterates `(external id, internal index)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (&PointId, usize)> {
        self.idx_to_ext.iter().enumerate().map(|(idx, id)| (id, idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assign_is_dense_and_bidirectional() {
        let mut tracker = IdTracker::new();
        assert_eq!(tracker.assign(PointId::Num(7)), 0);
        assert_eq!(tracker.assign(PointId::from("a1ce0a0e-0000-0000-0000-000000000000")), 1);
        assert_eq!(tracker.len(), 2);

        assert_eq!(tracker.resolve(&PointId::Num(7)), Some(0));
        assert_eq!(tracker.reverse(0), &PointId::Num(7));
        assert_eq!(tracker.resolve(&PointId::Num(8)), None);
    }

    #[test]
    fn numeric_and_string_spaces_do_not_collide() {
        let mut tracker = IdTracker::new();
        tracker.assign(PointId::Num(1));
        assert_eq!(tracker.resolve(&PointId::from("1")), None);
    }
}
