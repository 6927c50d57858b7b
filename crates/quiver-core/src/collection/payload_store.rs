//! Dense per-point payload storage and deletion tombstones.

use crate::point::Payload;

/// Payloads and tombstones, indexed by internal index.
///
/// Both arrays grow in lockstep with the id table, so
/// `|payloads| == |deleted| == len` holds by construction. A tombstoned
/// slot keeps its payload; queries exclude it through the mask.
#[derive(Debug, Default)]
pub(crate) struct PayloadStore {
    payloads: Vec<Payload>,
    deleted: Vec<bool>,
}

impl PayloadStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends a payload for a freshly assigned index, alive.
    pub(crate) fn push(&mut self, payload: Payload) {
        self.payloads.push(payload);
        self.deleted.push(false);
    }

    pub(crate) fn get(&self, idx: usize) -> &Payload {
        &self.payloads[idx]
    }

    /// Replaces the payload entirely.
    pub(crate) fn replace(&mut self, idx: usize, payload: Payload) {
        self.payloads[idx] = payload;
    }

    /// Shallow key-wise union; incoming keys win.
    pub(crate) fn merge(&mut self, idx: usize, incoming: &Payload) {
        let payload = &mut self.payloads[idx];
        for (key, value) in incoming {
            payload.insert(key.clone(), value.clone());
        }
    }

    /// Removes the listed keys, keeping the rest.
    pub(crate) fn remove_keys(&mut self, idx: usize, keys: &[String]) {
        let payload = &mut self.payloads[idx];
        for key in keys {
            payload.remove(key);
        }
    }

    /// Replaces the payload with an empty mapping.
    pub(crate) fn clear(&mut self, idx: usize) {
        self.payloads[idx] = Payload::new();
    }

    /// Marks the slot as deleted.
    pub(crate) fn mark(&mut self, idx: usize) {
        self.deleted[idx] = true;
    }

    /// Clears the deletion flag on re-upsert.
    pub(crate) fn revive(&mut self, idx: usize) {
        self.deleted[idx] = false;
    }

    /// Returns true if the slot is not tombstoned.
    pub(crate) fn alive(&self, idx: usize) -> bool {
        !self.deleted[idx]
    }

    pub(crate) fn payloads(&self) -> &[Payload] {
        &self.payloads
    }

    pub(crate) fn deleted(&self) -> &[bool] {
        &self.deleted
    }

    pub(crate) fn len(&self) -> usize {
        self.payloads.len()
    }
}
