//! User list registry
//!
//! Ordered sequence of user-list descriptors. The three reserved lists never
//! appear here; their descriptors live on the manager. Order is user-visible
//! and changes only through explicit repositioning.

use chrono::Utc;
use echo_core::{ListId, UserListInfo};

/// Ordered registry of user-list descriptors
#[derive(Debug, Default)]
pub struct UserListRegistry {
    lists: Vec<UserListInfo>,
}

impl UserListRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// All descriptors in registry order
    pub fn lists(&self) -> &[UserListInfo] {
        &self.lists
    }

    /// Number of registered lists
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Whether a descriptor with this id is registered
    pub fn contains(&self, id: &ListId) -> bool {
        self.lists.iter().any(|l| &l.id == id)
    }

    /// Look up a descriptor by id
    pub fn get(&self, id: &ListId) -> Option<&UserListInfo> {
        self.lists.iter().find(|l| &l.id == id)
    }

    /// Insert a descriptor at `position`
    ///
    /// A duplicate id is rejected and leaves the registry unchanged. An
    /// out-of-range position appends. Returns whether the descriptor was
    /// inserted.
    pub fn create(&mut self, info: UserListInfo, position: usize) -> bool {
        if self.contains(&info.id) {
            return false;
        }
        if position >= self.lists.len() {
            self.lists.push(info);
        } else {
            self.lists.insert(position, info);
        }
        true
    }

    /// Overwrite a registered descriptor's fields in place
    ///
    /// Looks up by `info.id`; not-found is a silent no-op. Returns whether a
    /// descriptor was updated.
    pub fn update(&mut self, info: &UserListInfo) -> bool {
        let Some(target) = self.lists.iter_mut().find(|l| l.id == info.id) else {
            return false;
        };
        target.name = info.name.clone();
        target.source = info.source.clone();
        target.source_list_id = info.source_list_id.clone();
        target.position_updated_at = info.position_updated_at;
        true
    }

    /// Remove a descriptor by id
    ///
    /// Not-found is a silent no-op. The caller decides separately whether to
    /// drop the matching collection.
    pub fn remove(&mut self, id: &ListId) -> Option<UserListInfo> {
        let index = self.lists.iter().position(|l| &l.id == id)?;
        Some(self.lists.remove(index))
    }

    /// Replace the entire registry contents
    pub fn overwrite(&mut self, lists: Vec<UserListInfo>) {
        self.lists = lists;
    }

    /// Stable group move
    ///
    /// Extracts every descriptor whose id is in `ids` (scanning from the end
    /// so removal by index stays valid), stamps each one's reorder timestamp
    /// to now, then reinserts the group in its original relative order at
    /// `position` clamped to the reduced sequence length.
    pub fn move_to_position(&mut self, position: usize, ids: &[ListId]) {
        let mut moved: Vec<UserListInfo> = Vec::with_capacity(ids.len());
        for i in (0..self.lists.len()).rev() {
            if ids.contains(&self.lists[i].id) {
                let mut info = self.lists.remove(i);
                info.position_updated_at = Some(Utc::now());
                moved.push(info);
            }
        }
        // Scanning from the end collected the group back-to-front
        moved.reverse();

        let position = position.min(self.lists.len());
        for (offset, info) in moved.into_iter().enumerate() {
            self.lists.insert(position + offset, info);
        }
    }
}
