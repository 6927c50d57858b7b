//! Per-name contiguous vector matrices.

use std::collections::HashMap;

use crate::config::VectorParams;

/// Row-major `f32` matrix for one vector name.
///
/// Rows `[0, len)` of the owning collection are content; rows beyond are
/// reserve capacity from geometric growth. Rows are never removed.
#[derive(Debug)]
struct Matrix {
    dim: usize,
    capacity: usize,
    data: Vec<f32>,
}

impl Matrix {
    fn new(dim: usize) -> Self {
        Self {
            dim,
            capacity: 0,
            data: Vec::new(),
        }
    }

    fn row(&self, idx: usize) -> &[f32] {
        let start = idx * self.dim;
        &self.data[start..start + self.dim]
    }

    fn set_row(&mut self, idx: usize, values: &[f32]) {
        debug_assert_eq!(values.len(), self.dim);
        let start = idx * self.dim;
        self.data[start..start + self.dim].copy_from_slice(values);
    }

    fn ensure_capacity(&mut self, idx: usize) {
        if idx >= self.capacity {
            self.capacity = idx * 2 + 1;
            self.data.resize(self.capacity * self.dim, 0.0);
        }
    }
}

/// The set of per-name matrices of a collection.
///
/// Names are validated by the engine before any call; looking up an
/// unconfigured name is a programming error and panics.
#[derive(Debug)]
pub(crate) struct NamedVectorStore {
    matrices: HashMap<String, Matrix>,
}

impl NamedVectorStore {
    /// Creates one empty matrix per configured name.
    pub(crate) fn new(params: &HashMap<String, VectorParams>) -> Self {
        let matrices = params
            .iter()
            .map(|(name, p)| (name.clone(), Matrix::new(p.size)))
            .collect();
        Self { matrices }
    }

    fn matrix_mut(&mut self, name: &str) -> &mut Matrix {
        self.matrices
            .get_mut(name)
            .unwrap_or_else(|| panic!("vector name '{name}' not configured"))
    }

    pub(crate) fn dim(&self, name: &str) -> usize {
        self.matrices[name].dim
    }

    pub(crate) fn row(&self, name: &str, idx: usize) -> &[f32] {
        self.matrices[name].row(idx)
    }

    pub(crate) fn set_row(&mut self, name: &str, idx: usize, values: &[f32]) {
        self.matrix_mut(name).set_row(idx, values);
    }

    /// Grows the named matrix to `2 * idx + 1` rows when `idx` is out of
    /// capacity.
    pub(crate) fn ensure_capacity(&mut self, name: &str, idx: usize) {
        self.matrix_mut(name).ensure_capacity(idx);
    }

    /// Contiguous view of the first `upto` rows of the named matrix.
    pub(crate) fn matrix(&self, name: &str, upto: usize) -> &[f32] {
        let m = &self.matrices[name];
        &m.data[..upto * m.dim]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMetric;

    fn store_with_default(dim: usize) -> NamedVectorStore {
        let mut params = HashMap::new();
        params.insert(String::new(), VectorParams::new(dim, DistanceMetric::Dot));
        NamedVectorStore::new(&params)
    }

    #[test]
    fn capacity_grows_geometrically() {
        let mut store = store_with_default(3);
        store.ensure_capacity("", 0);
        assert_eq!(store.matrices[""].capacity, 1);
        store.ensure_capacity("", 1);
        assert_eq!(store.matrices[""].capacity, 3);
        store.ensure_capacity("", 2);
        assert_eq!(store.matrices[""].capacity, 3);
        store.ensure_capacity("", 3);
        assert_eq!(store.matrices[""].capacity, 7);
    }

    #[test]
    fn rows_round_trip() {
        let mut store = store_with_default(2);
        store.ensure_capacity("", 1);
        store.set_row("", 0, &[1.0, 2.0]);
        store.set_row("", 1, &[3.0, 4.0]);
        assert_eq!(store.row("", 0), &[1.0, 2.0]);
        assert_eq!(store.matrix("", 2), &[1.0, 2.0, 3.0, 4.0]);
    }
}
