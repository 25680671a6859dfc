//! Collection store
//!
//! Owns every materialized track sequence, keyed by list id. A descriptor
//! may exist without a materialized collection; materialization happens on
//! the first write for an id.

use echo_core::{ListId, TrackInfo};
use std::collections::HashMap;

/// Mapping from list id to its ordered track sequence
///
/// Each collection carries a generation counter, bumped on every mutation.
/// Reorder commits are gated on an unchanged generation so a stale
/// sort-provider result is never applied over interim mutations.
#[derive(Debug, Default)]
pub struct CollectionStore {
    collections: HashMap<ListId, Vec<TrackInfo>>,
    generations: HashMap<ListId, u64>,
}

impl CollectionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a collection is materialized for this id
    pub fn contains(&self, id: &ListId) -> bool {
        self.collections.contains_key(id)
    }

    /// Get a collection's track sequence
    pub fn tracks(&self, id: &ListId) -> Option<&[TrackInfo]> {
        self.collections.get(id).map(Vec::as_slice)
    }

    /// Get mutable access to a collection's track sequence
    ///
    /// Bumps the collection's generation; callers receiving `Some` are
    /// expected to mutate.
    pub fn tracks_mut(&mut self, id: &ListId) -> Option<&mut Vec<TrackInfo>> {
        if self.collections.contains_key(id) {
            self.bump(id);
        }
        self.collections.get_mut(id)
    }

    /// Replace a collection's sequence, materializing it if absent
    pub fn set(&mut self, id: ListId, tracks: Vec<TrackInfo>) {
        self.bump(&id);
        self.collections.insert(id, tracks);
    }

    /// Drop a collection
    ///
    /// Reserved list ids are never dropped: once materialized, the special
    /// lists stay materialized for the process lifetime.
    pub fn remove(&mut self, id: &ListId) {
        if id.is_reserved() {
            return;
        }
        if self.collections.remove(id).is_some() {
            self.bump(id);
        }
    }

    /// Current generation for a collection id
    ///
    /// Ids that were never written have generation zero.
    pub fn generation(&self, id: &ListId) -> u64 {
        self.generations.get(id).copied().unwrap_or(0)
    }

    /// Number of materialized collections
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    /// Whether no collection is materialized
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    fn bump(&mut self, id: &ListId) {
        *self.generations.entry(id.clone()).or_insert(0) += 1;
    }
}
