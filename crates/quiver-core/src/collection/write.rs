//! Write paths: upsert, delete, payload mutations, selector resolution.

use std::collections::HashMap;

use uuid::Uuid;

use crate::collection::Collection;
use crate::error::{Error, Result};
use crate::filter::Filter;
use crate::point::{Batch, BatchVectors, Payload, Point, PointId, PointVectors, DEFAULT_VECTOR_NAME};
use crate::selector::PointsSelector;

impl Collection {
    /// Inserts or updates points.
    ///
    /// An unknown id is appended under a fresh dense internal index; a
    /// known id is updated in place, re-using its index and clearing any
    /// tombstone. Each applied point is persisted before the next one is
    /// processed, so a mid-list failure leaves prior points applied.
    ///
    /// # Errors
    ///
    /// Returns an error if a string id is not a valid UUID, the supplied
    /// vector names differ from the configured set, or a vector has the
    /// wrong dimensionality.
    pub fn upsert(&mut self, points: impl IntoIterator<Item = Point>) -> Result<()> {
        for point in points {
            self.upsert_point(point)?;
        }
        Ok(())
    }

    /// Inserts or updates points given in columnar form.
    ///
    /// Behaviourally identical to [`Collection::upsert`] over the
    /// row-wise expansion of the batch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedBatch`] if any column length differs from
    /// the id count, plus every error `upsert` can produce.
    pub fn upsert_batch(&mut self, batch: Batch) -> Result<()> {
        let Batch {
            ids,
            payloads,
            vectors,
        } = batch;

        if let Some(payloads) = &payloads {
            if payloads.len() != ids.len() {
                return Err(Error::MalformedBatch(format!(
                    "{} payloads for {} ids",
                    payloads.len(),
                    ids.len()
                )));
            }
        }

        let columns: HashMap<String, Vec<Vec<f32>>> = match vectors {
            BatchVectors::Single(column) => {
                let mut map = HashMap::with_capacity(1);
                map.insert(DEFAULT_VECTOR_NAME.to_string(), column);
                map
            }
            BatchVectors::Named(map) => map,
        };
        for (name, column) in &columns {
            if column.len() != ids.len() {
                return Err(Error::MalformedBatch(format!(
                    "{} vectors under '{name}' for {} ids",
                    column.len(),
                    ids.len()
                )));
            }
        }

        for (row, id) in ids.into_iter().enumerate() {
            let vector: HashMap<String, Vec<f32>> = columns
                .iter()
                .map(|(name, column)| (name.clone(), column[row].clone()))
                .collect();
            let payload = payloads.as_ref().and_then(|column| column[row].clone());

            self.upsert_point(Point {
                id,
                vector: PointVectors::Named(vector),
                payload,
            })?;
        }

        Ok(())
    }

    /// Logically deletes the selected points.
    ///
    /// Tombstones are flipped; slots, vectors and payloads stay allocated
    /// and the internal index is re-used if the id is upserted again.
    /// Filter selectors only match live points, so an already-deleted
    /// point is never re-selected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PointNotFound`] for an unknown id in an explicit
    /// list; prior ids of the list remain deleted.
    pub fn delete(&mut self, selector: &PointsSelector) -> Result<()> {
        let ids = self.selector_to_ids(selector);

        for id in &ids {
            let idx = self
                .id_tracker
                .resolve(id)
                .ok_or_else(|| Error::PointNotFound(id.clone()))?;
            self.payloads.mark(idx);
        }

        if let Some(storage) = self.storage.as_mut() {
            for id in &ids {
                storage.delete(id)?;
            }
        }

        Ok(())
    }

    /// Shallow-merges the given payload into each selected point.
    ///
    /// Incoming keys overwrite, unrelated keys are retained; a point
    /// without payload is treated as having an empty one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PointNotFound`] for an unknown explicit id, or a
    /// persistence error.
    pub fn set_payload(&mut self, payload: &Payload, selector: &PointsSelector) -> Result<()> {
        let ids = self.selector_to_ids(selector);
        for id in ids {
            let idx = self.resolve_required(&id)?;
            self.payloads.merge(idx, payload);
            self.persist_by_id(id, idx)?;
        }
        Ok(())
    }

    /// Replaces each selected point's payload entirely.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PointNotFound`] for an unknown explicit id, or a
    /// persistence error.
    pub fn overwrite_payload(&mut self, payload: &Payload, selector: &PointsSelector) -> Result<()> {
        let ids = self.selector_to_ids(selector);
        for id in ids {
            let idx = self.resolve_required(&id)?;
            self.payloads.replace(idx, payload.clone());
            self.persist_by_id(id, idx)?;
        }
        Ok(())
    }

    /// Removes the listed keys from each selected point's payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PointNotFound`] for an unknown explicit id, or a
    /// persistence error.
    pub fn delete_payload(&mut self, keys: &[String], selector: &PointsSelector) -> Result<()> {
        let ids = self.selector_to_ids(selector);
        for id in ids {
            let idx = self.resolve_required(&id)?;
            self.payloads.remove_keys(idx, keys);
            self.persist_by_id(id, idx)?;
        }
        Ok(())
    }

    /// Replaces each selected point's payload with an empty mapping.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PointNotFound`] for an unknown explicit id, or a
    /// persistence error.
    pub fn clear_payload(&mut self, selector: &PointsSelector) -> Result<()> {
        let ids = self.selector_to_ids(selector);
        for id in ids {
            let idx = self.resolve_required(&id)?;
            self.payloads.clear(idx);
            self.persist_by_id(id, idx)?;
        }
        Ok(())
    }

    /// Resolves a selector to a flat id list.
    ///
    /// Filter selectors are evaluated against the current live mask, in
    /// internal index order (= insertion order).
    pub(crate) fn selector_to_ids(&self, selector: &PointsSelector) -> Vec<PointId> {
        match selector {
            PointsSelector::Ids(ids) => ids.clone(),
            PointsSelector::PointIds(list) => list.points.clone(),
            PointsSelector::Filter(filter) => self.filter_to_ids(filter),
            PointsSelector::FilterSelector(selector) => self.filter_to_ids(&selector.filter),
        }
    }

    fn filter_to_ids(&self, filter: &Filter) -> Vec<PointId> {
        let mask = self.live_mask(Some(filter));
        self.id_tracker
            .iter()
            .filter(|(_, idx)| mask[*idx])
            .map(|(id, _)| id.clone())
            .collect()
    }

    fn upsert_point(&mut self, point: Point) -> Result<()> {
        if let PointId::Uuid(raw) = &point.id {
            Uuid::parse_str(raw).map_err(|_| Error::InvalidPointId(raw.clone()))?;
        }

        self.apply_point(&point)?;

        if let Some(storage) = self.storage.as_mut() {
            storage.persist(&point)?;
        }

        Ok(())
    }

    /// Applies one point to the in-memory state, without persistence.
    ///
    /// Also the replay path for [`Collection::load`], which is why it does
    /// not re-validate the UUID form of string ids.
    pub(crate) fn apply_point(&mut self, point: &Point) -> Result<()> {
        let vectors = point.vector.named_slices();
        self.check_vector_names(&vectors)?;
        for (name, values) in &vectors {
            let expected = self.vectors.dim(name);
            if values.len() != expected {
                return Err(Error::DimensionMismatch {
                    expected,
                    actual: values.len(),
                });
            }
        }

        let payload = point.payload.clone().unwrap_or_default();

        if let Some(idx) = self.id_tracker.resolve(&point.id) {
            self.payloads.replace(idx, payload);
            for (name, values) in &vectors {
                self.vectors.set_row(name, idx, values);
            }
            self.payloads.revive(idx);
        } else {
            let idx = self.id_tracker.assign(point.id.clone());
            self.payloads.push(payload);
            for (name, values) in &vectors {
                self.vectors.ensure_capacity(name, idx);
                self.vectors.set_row(name, idx, values);
            }
        }

        Ok(())
    }

    /// Every point must carry exactly the configured vector names.
    fn check_vector_names(&self, vectors: &[(&str, &[f32])]) -> Result<()> {
        let matches = vectors.len() == self.vector_params.len()
            && vectors
                .iter()
                .all(|(name, _)| self.vector_params.contains_key(*name));
        if matches {
            return Ok(());
        }

        let mut expected: Vec<&str> = self.vector_params.keys().map(String::as_str).collect();
        expected.sort_unstable();
        let mut provided: Vec<&str> = vectors.iter().map(|(name, _)| *name).collect();
        provided.sort_unstable();

        Err(Error::VectorNamesMismatch {
            expected: expected.join(", "),
            provided: provided.join(", "),
        })
    }

    fn resolve_required(&self, id: &PointId) -> Result<usize> {
        self.id_tracker
            .resolve(id)
            .ok_or_else(|| Error::PointNotFound(id.clone()))
    }

    /// Re-persists a point in full so the store matches the mutated state.
    fn persist_by_id(&mut self, id: PointId, idx: usize) -> Result<()> {
        if self.storage.is_none() {
            return Ok(());
        }

        let payload = self.payloads.get(idx);
        let point = Point {
            id,
            vector: self.all_vectors(idx),
            payload: if payload.is_empty() {
                None
            } else {
                Some(payload.clone())
            },
        };

        if let Some(storage) = self.storage.as_mut() {
            storage.persist(&point)?;
        }
        Ok(())
    }
}
