//! List metadata persistence seam
//!
//! Canonical list ordering and per-list update times are persisted outside
//! this engine. Calls are fire-and-forget: the engine never consumes a
//! return value and never blocks a mutation on persistence.

use echo_core::ListId;
use std::sync::Mutex;

/// Persists canonical list ordering and update-info metadata keyed by list id
pub trait ListMetadataStore: Send + Sync {
    /// Persist the canonical list order
    fn overwrite_positions(&self, ids: &[ListId]);

    /// Persist update-info metadata for exactly this id set
    fn overwrite_update_info(&self, ids: &[ListId]);

    /// Drop persisted ordering for one list
    fn remove_position(&self, id: &ListId);

    /// Drop persisted update-info for one list
    fn remove_update_info(&self, id: &ListId);
}

#[derive(Debug, Default)]
struct MemoryMetadataState {
    positions: Vec<ListId>,
    update_info: Vec<ListId>,
}

/// In-memory metadata store
///
/// Standalone default for callers without a persistence layer, and the test
/// double for asserting what the engine persisted.
#[derive(Debug, Default)]
pub struct MemoryMetadataStore {
    state: Mutex<MemoryMetadataState>,
}

impl MemoryMetadataStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// The last persisted canonical order
    pub fn positions(&self) -> Vec<ListId> {
        self.state.lock().unwrap().positions.clone()
    }

    /// The last persisted update-info id set
    pub fn update_info(&self) -> Vec<ListId> {
        self.state.lock().unwrap().update_info.clone()
    }
}

impl ListMetadataStore for MemoryMetadataStore {
    fn overwrite_positions(&self, ids: &[ListId]) {
        self.state.lock().unwrap().positions = ids.to_vec();
    }

    fn overwrite_update_info(&self, ids: &[ListId]) {
        self.state.lock().unwrap().update_info = ids.to_vec();
    }

    fn remove_position(&self, id: &ListId) {
        self.state.lock().unwrap().positions.retain(|i| i != id);
    }

    fn remove_update_info(&self, id: &ListId) {
        self.state.lock().unwrap().update_info.retain(|i| i != id);
    }
}
