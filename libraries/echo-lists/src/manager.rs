//! List manager - core orchestration
//!
//! Single entry point for every list and track mutation. Owns the collection
//! store and the user-list registry, keeps them consistent, and talks to the
//! two external seams: the metadata store (canonical ordering persistence)
//! and the sort provider (track repositioning).
//!
//! All operations are synchronous and complete without suspension except
//! [`ListManager::reorder_tracks`], which awaits the sort provider. Callers
//! are expected to serialize reorders against other mutations of the same
//! collection; a stale provider result is rejected via the collection's
//! generation counter instead of being applied.

use crate::{
    error::{ListError, Result},
    metadata::ListMetadataStore,
    registry::UserListRegistry,
    sort::SortProvider,
    store::CollectionStore,
};
use echo_core::{
    AddPosition, ListId, ListKind, ListSnapshot, ListUpdate, TrackId, TrackInfo, TrackUpdate,
    UserListInfo,
};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Multi-collection track registry
///
/// Holds the ordered user-list registry, every materialized track
/// collection, and the descriptors of the three reserved lists (default,
/// love, temp). The reserved lists never appear in the registry; the default
/// and love descriptors are immutable, the temp descriptor accepts only
/// metadata updates.
pub struct ListManager {
    store: CollectionStore,
    registry: UserListRegistry,
    default_info: UserListInfo,
    love_info: UserListInfo,
    temp_info: UserListInfo,
    temp_meta: Value,
    metadata: Arc<dyn ListMetadataStore>,
    sort: Arc<dyn SortProvider>,
}

impl ListManager {
    /// Create a manager wired to the given external collaborators
    pub fn new(sort: Arc<dyn SortProvider>, metadata: Arc<dyn ListMetadataStore>) -> Self {
        Self {
            store: CollectionStore::new(),
            registry: UserListRegistry::new(),
            default_info: UserListInfo::new(echo_core::DEFAULT_LIST_ID, "Default"),
            love_info: UserListInfo::new(echo_core::LOVE_LIST_ID, "Love"),
            temp_info: UserListInfo::new(echo_core::TEMP_LIST_ID, "Temporary"),
            temp_meta: Value::Object(serde_json::Map::new()),
            metadata,
            sort,
        }
    }

    // === Accessors ===

    /// All user-list descriptors in registry order
    pub fn user_lists(&self) -> &[UserListInfo] {
        self.registry.lists()
    }

    /// Descriptor of the default list
    pub fn default_list(&self) -> &UserListInfo {
        &self.default_info
    }

    /// Descriptor of the love list
    pub fn love_list(&self) -> &UserListInfo {
        &self.love_info
    }

    /// Descriptor of the temporary list
    pub fn temp_list(&self) -> &UserListInfo {
        &self.temp_info
    }

    /// Current metadata of the temporary list
    pub fn temp_list_meta(&self) -> &Value {
        &self.temp_meta
    }

    /// Track sequence of a materialized collection
    pub fn tracks(&self, id: &ListId) -> Option<&[TrackInfo]> {
        self.store.tracks(id)
    }

    /// Whether a collection is materialized for this id
    pub fn is_materialized(&self, id: &ListId) -> bool {
        self.store.contains(id)
    }

    // === List mutation ===

    /// Replace the entire user-list registry
    pub fn set_user_lists(&mut self, lists: Vec<UserListInfo>) {
        tracing::debug!("Replacing user list registry with {} lists", lists.len());
        self.registry.overwrite(lists);
    }

    /// Replace a collection's track sequence, materializing it if absent
    pub fn set_list_tracks(&mut self, id: ListId, tracks: Vec<TrackInfo>) {
        self.store.set(id, tracks);
    }

    /// Create a user list at `position`
    ///
    /// A duplicate or reserved id is silently rejected. An out-of-range
    /// position appends.
    pub fn create_user_list(&mut self, info: UserListInfo, position: usize) {
        if info.id.is_reserved() {
            tracing::warn!("Refusing to create user list with reserved id {}", info.id);
            return;
        }
        if !self.registry.create(info, position) {
            tracing::debug!("Ignoring user list create with duplicate id");
        }
    }

    /// Apply a batch of descriptor updates
    ///
    /// Dispatch is by id kind: the default and love lists ignore updates
    /// entirely, the temporary list consumes only the `meta` field, user
    /// lists have their descriptor fields overwritten in place. Unknown ids
    /// are silent no-ops.
    pub fn update_user_lists(&mut self, updates: Vec<ListUpdate>) {
        for update in updates {
            match update.info.id.kind() {
                ListKind::Default | ListKind::Love => {}
                ListKind::Temp => {
                    self.temp_meta = update
                        .meta
                        .unwrap_or_else(|| Value::Object(serde_json::Map::new()));
                }
                ListKind::User => {
                    self.registry.update(&update.info);
                }
            }
        }
    }

    /// Remove user lists and their collections
    ///
    /// Descriptors are dropped regardless; a collection and its persisted
    /// metadata are dropped only if the collection was materialized, and only
    /// those ids are reported as changed.
    pub fn remove_user_lists(&mut self, ids: &[ListId]) -> Vec<ListId> {
        let mut changed = Vec::new();
        for id in ids {
            if id.is_reserved() {
                continue;
            }
            self.registry.remove(id);
            if !self.store.contains(id) {
                continue;
            }
            self.store.remove(id);
            self.metadata.remove_position(id);
            self.metadata.remove_update_info(id);
            changed.push(id.clone());
        }
        tracing::debug!("Removed {} user lists ({} with live collections)", ids.len(), changed.len());
        changed
    }

    /// Move user lists to `position` as a stable group
    pub fn move_user_lists(&mut self, position: usize, ids: &[ListId]) {
        self.registry.move_to_position(position, ids);
    }

    // === Track mutation ===

    /// Replace a collection's tracks verbatim
    ///
    /// No deduplication happens here: the payload is trusted as-is, unlike
    /// [`ListManager::add_tracks`]. The collection is materialized if absent,
    /// but only reported as changed if it previously existed or is the love
    /// list.
    pub fn overwrite_list_tracks(&mut self, id: ListId, tracks: Vec<TrackInfo>) -> Vec<ListId> {
        let existed = self.store.contains(&id);
        let kind = id.kind();
        self.store.set(id.clone(), tracks);
        if existed || kind == ListKind::Love {
            vec![id]
        } else {
            Vec::new()
        }
    }

    /// Add tracks to a collection
    ///
    /// Tracks whose id already exists in the collection, or repeats within
    /// the batch (first occurrence wins), are dropped. Survivors land at the
    /// front or back per `position`. Reports `[id]` whenever the collection
    /// exists, even if nothing survived the filter; an absent collection is a
    /// no-op reported only for the love list.
    pub fn add_tracks(
        &mut self,
        id: &ListId,
        tracks: Vec<TrackInfo>,
        position: AddPosition,
    ) -> Vec<ListId> {
        let Some(target) = self.store.tracks_mut(id) else {
            return Self::absent_result(id);
        };

        let mut seen: HashSet<TrackId> = target.iter().map(|t| t.id.clone()).collect();
        let fresh: Vec<TrackInfo> = tracks
            .into_iter()
            .filter(|track| seen.insert(track.id.clone()))
            .collect();

        tracing::debug!("Adding {} tracks to list {}", fresh.len(), id);
        match position {
            AddPosition::Top => {
                for (offset, track) in fresh.into_iter().enumerate() {
                    target.insert(offset, track);
                }
            }
            AddPosition::Bottom => target.extend(fresh),
        }

        vec![id.clone()]
    }

    /// Remove tracks from a collection by id
    ///
    /// Each id is consumed at most once, matched scanning the collection from
    /// the end. An absent collection is a no-op reported only for the love
    /// list.
    pub fn remove_tracks(&mut self, id: &ListId, track_ids: &[TrackId]) -> Vec<ListId> {
        let Some(target) = self.store.tracks_mut(id) else {
            return Self::absent_result(id);
        };

        let mut pending: Vec<TrackId> = track_ids.to_vec();
        for i in (0..target.len()).rev() {
            let Some(index) = pending.iter().position(|tid| tid == &target[i].id) else {
                continue;
            };
            pending.remove(index);
            target.remove(i);
        }
        vec![id.clone()]
    }

    /// Move tracks between collections
    ///
    /// Composed as remove-from-source then add-to-destination with the same
    /// payload; the result concatenates both changed-id sets and may contain
    /// duplicates.
    pub fn move_tracks(
        &mut self,
        from: &ListId,
        to: &ListId,
        tracks: Vec<TrackInfo>,
        position: AddPosition,
    ) -> Vec<ListId> {
        let track_ids: Vec<TrackId> = tracks.iter().map(|t| t.id.clone()).collect();
        let mut changed = self.remove_tracks(from, &track_ids);
        changed.extend(self.add_tracks(to, tracks, position));
        changed
    }

    /// Apply a batch of track field updates
    ///
    /// Each update locates its track by id inside the named collection and
    /// replaces the editable fields (name, singer, source, interval, meta),
    /// preserving everything else. Missing lists or tracks are skipped
    /// silently. Returns the ids of collections that changed.
    pub fn update_track_infos(&mut self, updates: Vec<TrackUpdate>) -> Vec<ListId> {
        let mut changed: Vec<ListId> = Vec::new();
        for update in updates {
            let Some(target) = self.store.tracks_mut(&update.list_id) else {
                continue;
            };
            let Some(stored) = target.iter_mut().find(|t| t.id == update.track.id) else {
                continue;
            };
            stored.name = update.track.name;
            stored.singer = update.track.singer;
            stored.source = update.track.source;
            stored.interval = update.track.interval;
            stored.meta = update.track.meta;
            if !changed.contains(&update.list_id) {
                changed.push(update.list_id);
            }
        }
        changed
    }

    /// Reposition tracks within a collection via the sort provider
    ///
    /// The entire current sequence, the target `position`, and the ids to
    /// relocate are handed to the provider; its result replaces the
    /// collection. The commit is gated on two checks: the returned sequence
    /// must be a permutation of the input (same id multiset), and the
    /// collection's generation must be unchanged since the call was issued.
    /// On either violation the prior sequence is left untouched. An absent
    /// collection is a no-op reported only for the love list.
    pub async fn reorder_tracks(
        &mut self,
        id: &ListId,
        position: usize,
        track_ids: &[TrackId],
    ) -> Result<Vec<ListId>> {
        let Some(current) = self.store.tracks(id) else {
            return Ok(Self::absent_result(id));
        };
        let current = current.to_vec();
        let generation = self.store.generation(id);
        let expected = id_counts(&current);

        let reordered = self.sort.reorder(current, position, track_ids).await?;

        if id_counts(&reordered) != expected {
            tracing::warn!("Sort provider returned a non-permutation for list {}", id);
            return Err(ListError::SequenceMismatch { list_id: id.clone() });
        }
        if self.store.generation(id) != generation {
            tracing::warn!("List {} mutated during reorder; discarding stale result", id);
            return Err(ListError::ConcurrentModification { list_id: id.clone() });
        }

        self.store.set(id.clone(), reordered);
        Ok(vec![id.clone()])
    }

    // === Bulk overwrite ===

    /// Replace registry and materialized collections from a full snapshot
    ///
    /// The registry is rebuilt from the snapshot's user-list descriptors.
    /// Each collection referenced by the snapshot is overwritten only if
    /// already materialized (and reported as changed); the love list id is
    /// always reported regardless. The canonical id order
    /// `[default, love, ..user lists, (temp if supplied)]` is persisted to
    /// the metadata store.
    pub fn overwrite_list_data(&mut self, snapshot: ListSnapshot) -> Vec<ListId> {
        let default_id = ListId::default_list();
        let love_id = ListId::love_list();
        let temp_id = ListId::temp_list();

        let user_ids: Vec<ListId> = snapshot.user_lists.iter().map(|l| l.info.id.clone()).collect();
        tracing::debug!("Overwriting list data: {} user lists", user_ids.len());

        let mut changed = Vec::new();
        let mut infos = Vec::with_capacity(snapshot.user_lists.len());
        for entry in snapshot.user_lists {
            if self.store.contains(&entry.info.id) {
                changed.push(entry.info.id.clone());
                self.store.set(entry.info.id.clone(), entry.tracks);
            }
            infos.push(entry.info);
        }
        self.registry.overwrite(infos);

        if self.store.contains(&default_id) {
            self.store.set(default_id.clone(), snapshot.default_tracks);
            changed.push(default_id.clone());
        }
        if self.store.contains(&love_id) {
            self.store.set(love_id.clone(), snapshot.love_tracks);
        }
        changed.push(love_id.clone());

        let temp_supplied = snapshot.temp_tracks.is_some();
        if let Some(temp_tracks) = snapshot.temp_tracks {
            if self.store.contains(&temp_id) {
                self.store.set(temp_id.clone(), temp_tracks);
                changed.push(temp_id.clone());
            }
        }

        let mut canonical = vec![default_id, love_id];
        canonical.extend(user_ids);
        if temp_supplied {
            canonical.push(temp_id);
        }
        self.metadata.overwrite_positions(&canonical);
        self.metadata.overwrite_update_info(&canonical);

        changed
    }

    /// No-op result for a mutation against an absent collection
    ///
    /// The love list is logically always present, so its id is still
    /// reported.
    fn absent_result(id: &ListId) -> Vec<ListId> {
        if id.kind() == ListKind::Love {
            vec![id.clone()]
        } else {
            Vec::new()
        }
    }
}

impl Default for ListManager {
    fn default() -> Self {
        Self::new(
            Arc::new(crate::sort::InlineSortProvider),
            Arc::new(crate::metadata::MemoryMetadataStore::new()),
        )
    }
}

/// Multiset of track ids in a sequence
fn id_counts(tracks: &[TrackInfo]) -> HashMap<TrackId, usize> {
    let mut counts = HashMap::with_capacity(tracks.len());
    for track in tracks {
        *counts.entry(track.id.clone()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::MemoryMetadataStore;
    use crate::sort::InlineSortProvider;
    use async_trait::async_trait;

    fn test_track(id: &str) -> TrackInfo {
        TrackInfo::new(id, format!("Track {}", id), "Test Artist")
    }

    fn test_manager() -> (ListManager, Arc<MemoryMetadataStore>) {
        let metadata = Arc::new(MemoryMetadataStore::new());
        let manager = ListManager::new(Arc::new(InlineSortProvider), metadata.clone());
        (manager, metadata)
    }

    fn track_ids(manager: &ListManager, id: &ListId) -> Vec<String> {
        manager
            .tracks(id)
            .unwrap()
            .iter()
            .map(|t| t.id.as_str().to_string())
            .collect()
    }

    #[test]
    fn create_user_list_rejects_duplicates() {
        let (mut manager, _) = test_manager();
        manager.create_user_list(UserListInfo::new("A", "A"), 0);
        manager.create_user_list(UserListInfo::new("B", "B"), 0);
        assert_eq!(manager.user_lists()[0].id.as_str(), "B");
        assert_eq!(manager.user_lists()[1].id.as_str(), "A");

        manager.create_user_list(UserListInfo::new("B", "B again"), 0);
        assert_eq!(manager.user_lists().len(), 2);
        assert_eq!(manager.user_lists()[0].name, "B");
    }

    #[test]
    fn create_user_list_rejects_reserved_ids() {
        let (mut manager, _) = test_manager();
        manager.create_user_list(UserListInfo::new(echo_core::LOVE_LIST_ID, "Fake"), 0);
        assert!(manager.user_lists().is_empty());
    }

    #[test]
    fn update_user_lists_dispatches_by_kind() {
        let (mut manager, _) = test_manager();
        manager.create_user_list(UserListInfo::new("A", "Old"), 0);

        let mut renamed = UserListInfo::new("A", "New");
        renamed.source = Some("remote".to_string());
        let love_update = UserListInfo::new(echo_core::LOVE_LIST_ID, "Hacked");
        let temp_update = ListUpdate {
            info: UserListInfo::new(echo_core::TEMP_LIST_ID, "Hacked"),
            meta: Some(serde_json::json!({ "id": "remote-42" })),
        };

        manager.update_user_lists(vec![renamed.into(), love_update.into(), temp_update]);

        assert_eq!(manager.user_lists()[0].name, "New");
        assert_eq!(manager.love_list().name, "Love");
        assert_eq!(manager.temp_list().name, "Temporary");
        assert_eq!(manager.temp_list_meta()["id"], "remote-42");
    }

    #[test]
    fn remove_user_lists_reports_only_live_collections() {
        let (mut manager, metadata) = test_manager();
        manager.create_user_list(UserListInfo::new("A", "A"), 0);
        manager.create_user_list(UserListInfo::new("B", "B"), 1);
        manager.set_list_tracks(ListId::new("A"), vec![test_track("t1")]);
        metadata.overwrite_positions(&[ListId::new("A"), ListId::new("B")]);

        let changed = manager.remove_user_lists(&[ListId::new("A"), ListId::new("B")]);

        assert_eq!(changed, vec![ListId::new("A")]);
        assert!(manager.user_lists().is_empty());
        assert!(!manager.is_materialized(&ListId::new("A")));
        assert_eq!(metadata.positions(), vec![ListId::new("B")]);
    }

    #[test]
    fn add_tracks_on_absent_collection_is_noop() {
        let (mut manager, _) = test_manager();
        let changed = manager.add_tracks(&ListId::new("L"), vec![test_track("t1")], AddPosition::Bottom);
        assert!(changed.is_empty());
        assert!(!manager.is_materialized(&ListId::new("L")));
    }

    #[test]
    fn add_tracks_on_absent_love_reports_love() {
        let (mut manager, _) = test_manager();
        let love = ListId::love_list();
        let changed = manager.add_tracks(&love, vec![test_track("t1")], AddPosition::Bottom);
        assert_eq!(changed, vec![love.clone()]);
        assert!(!manager.is_materialized(&love));
    }

    #[test]
    fn add_tracks_top_prepends() {
        let (mut manager, _) = test_manager();
        let love = ListId::love_list();
        manager.set_list_tracks(love.clone(), vec![test_track("t1")]);

        let changed = manager.add_tracks(&love, vec![test_track("t5")], AddPosition::Top);

        assert_eq!(changed, vec![love.clone()]);
        assert_eq!(track_ids(&manager, &love), ["t5", "t1"]);
    }

    #[test]
    fn add_tracks_dedups_against_collection_and_batch() {
        let (mut manager, _) = test_manager();
        let id = ListId::new("L");
        manager.set_list_tracks(id.clone(), vec![test_track("t1")]);

        let mut t2_again = test_track("t2");
        t2_again.name = "Second copy".to_string();
        let changed = manager.add_tracks(
            &id,
            vec![test_track("t1"), test_track("t2"), t2_again, test_track("t3")],
            AddPosition::Bottom,
        );

        assert_eq!(changed, vec![id.clone()]);
        assert_eq!(track_ids(&manager, &id), ["t1", "t2", "t3"]);
        // First occurrence wins
        assert_eq!(manager.tracks(&id).unwrap()[1].name, "Track t2");
    }

    #[test]
    fn add_tracks_reports_even_when_nothing_added() {
        let (mut manager, _) = test_manager();
        let id = ListId::new("L");
        manager.set_list_tracks(id.clone(), vec![test_track("t1")]);
        let changed = manager.add_tracks(&id, vec![test_track("t1")], AddPosition::Bottom);
        assert_eq!(changed, vec![id]);
    }

    #[test]
    fn remove_tracks_consumes_each_id_once() {
        let (mut manager, _) = test_manager();
        let id = ListId::new("fav");
        manager.set_list_tracks(
            id.clone(),
            vec![test_track("t1"), test_track("t2"), test_track("t3")],
        );

        let changed = manager.remove_tracks(&id, &[TrackId::new("t2"), TrackId::new("t9")]);

        assert_eq!(changed, vec![id.clone()]);
        assert_eq!(track_ids(&manager, &id), ["t1", "t3"]);
    }

    #[test]
    fn remove_tracks_with_duplicate_ids_removes_last_match_only() {
        let (mut manager, _) = test_manager();
        let id = ListId::new("L");
        // Duplicate track ids can only arrive via a verbatim overwrite
        let mut dupe = test_track("t1");
        dupe.name = "Duplicate".to_string();
        manager.set_list_tracks(id.clone(), vec![test_track("t1"), dupe]);

        manager.remove_tracks(&id, &[TrackId::new("t1")]);

        let remaining = manager.tracks(&id).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "Track t1");
    }

    #[test]
    fn overwrite_reports_only_previously_materialized() {
        let (mut manager, _) = test_manager();
        let id = ListId::new("L");

        let changed = manager.overwrite_list_tracks(id.clone(), vec![test_track("t1")]);
        assert!(changed.is_empty());
        // Materialized anyway
        assert!(manager.is_materialized(&id));

        let changed = manager.overwrite_list_tracks(id.clone(), vec![test_track("t2")]);
        assert_eq!(changed, vec![id.clone()]);
        assert_eq!(track_ids(&manager, &id), ["t2"]);
    }

    #[test]
    fn overwrite_love_always_reports() {
        let (mut manager, _) = test_manager();
        let love = ListId::love_list();
        let changed = manager.overwrite_list_tracks(love.clone(), vec![test_track("t1")]);
        assert_eq!(changed, vec![love]);
    }

    #[test]
    fn overwrite_does_not_dedup() {
        let (mut manager, _) = test_manager();
        let id = ListId::new("L");
        manager.overwrite_list_tracks(id.clone(), vec![test_track("t1"), test_track("t1")]);
        assert_eq!(manager.tracks(&id).unwrap().len(), 2);
    }

    #[test]
    fn move_tracks_concatenates_changed_ids() {
        let (mut manager, _) = test_manager();
        let from = ListId::new("from");
        let to = ListId::new("to");
        manager.set_list_tracks(from.clone(), vec![test_track("t1"), test_track("t2")]);
        manager.set_list_tracks(to.clone(), vec![]);

        let changed = manager.move_tracks(&from, &to, vec![test_track("t1")], AddPosition::Bottom);

        assert_eq!(changed, vec![from.clone(), to.clone()]);
        assert_eq!(track_ids(&manager, &from), ["t2"]);
        assert_eq!(track_ids(&manager, &to), ["t1"]);
    }

    #[test]
    fn update_track_infos_replaces_editable_fields() {
        let (mut manager, _) = test_manager();
        let id = ListId::new("L");
        manager.set_list_tracks(id.clone(), vec![test_track("t1"), test_track("t2")]);

        let mut replacement = test_track("t2");
        replacement.name = "Renamed".to_string();
        replacement.singer = "New Artist".to_string();
        replacement.interval = Some("04:20".to_string());

        let changed = manager.update_track_infos(vec![
            TrackUpdate { list_id: id.clone(), track: replacement },
            TrackUpdate { list_id: id.clone(), track: test_track("ghost") },
            TrackUpdate { list_id: ListId::new("missing"), track: test_track("t1") },
        ]);

        assert_eq!(changed, vec![id.clone()]);
        let stored = &manager.tracks(&id).unwrap()[1];
        assert_eq!(stored.id.as_str(), "t2");
        assert_eq!(stored.name, "Renamed");
        assert_eq!(stored.singer, "New Artist");
        assert_eq!(stored.interval.as_deref(), Some("04:20"));
    }

    #[tokio::test]
    async fn reorder_tracks_is_a_permutation() {
        let (mut manager, _) = test_manager();
        let id = ListId::new("L");
        manager.set_list_tracks(
            id.clone(),
            vec![test_track("a"), test_track("b"), test_track("c"), test_track("d")],
        );

        let changed = manager
            .reorder_tracks(&id, 0, &[TrackId::new("d"), TrackId::new("b")])
            .await
            .unwrap();

        assert_eq!(changed, vec![id.clone()]);
        let mut after = track_ids(&manager, &id);
        assert_eq!(after, ["d", "b", "a", "c"]);
        after.sort();
        assert_eq!(after, ["a", "b", "c", "d"]);
    }

    #[tokio::test]
    async fn reorder_tracks_on_absent_collection_is_noop() {
        let (mut manager, _) = test_manager();
        let changed = manager
            .reorder_tracks(&ListId::new("L"), 0, &[TrackId::new("a")])
            .await
            .unwrap();
        assert!(changed.is_empty());

        let love = ListId::love_list();
        let changed = manager.reorder_tracks(&love, 0, &[TrackId::new("a")]).await.unwrap();
        assert_eq!(changed, vec![love]);
    }

    struct LossyProvider;

    #[async_trait]
    impl SortProvider for LossyProvider {
        async fn reorder(
            &self,
            mut tracks: Vec<TrackInfo>,
            _position: usize,
            _ids: &[TrackId],
        ) -> Result<Vec<TrackInfo>> {
            tracks.pop();
            Ok(tracks)
        }
    }

    #[tokio::test]
    async fn reorder_rejects_non_permutation() {
        let metadata = Arc::new(MemoryMetadataStore::new());
        let mut manager = ListManager::new(Arc::new(LossyProvider), metadata);
        let id = ListId::new("L");
        manager.set_list_tracks(id.clone(), vec![test_track("a"), test_track("b")]);

        let result = manager.reorder_tracks(&id, 0, &[TrackId::new("a")]).await;

        assert!(matches!(result, Err(ListError::SequenceMismatch { .. })));
        // Prior sequence untouched
        assert_eq!(track_ids(&manager, &id), ["a", "b"]);
    }

    #[test]
    fn overwrite_list_data_always_reports_love() {
        let (mut manager, _) = test_manager();
        let snapshot = ListSnapshot {
            default_tracks: vec![],
            love_tracks: vec![test_track("t1")],
            user_lists: vec![],
            temp_tracks: None,
        };
        let changed = manager.overwrite_list_data(snapshot);
        assert_eq!(changed, vec![ListId::love_list()]);
        // Love was not materialized, so its tracks were not applied
        assert!(!manager.is_materialized(&ListId::love_list()));
    }

    #[test]
    fn overwrite_list_data_replaces_materialized_collections() {
        let (mut manager, metadata) = test_manager();
        let default_id = ListId::default_list();
        let love_id = ListId::love_list();
        let list_a = ListId::new("A");

        manager.set_list_tracks(default_id.clone(), vec![test_track("old")]);
        manager.set_list_tracks(love_id.clone(), vec![test_track("old")]);
        manager.set_list_tracks(list_a.clone(), vec![test_track("old")]);
        manager.create_user_list(UserListInfo::new("stale", "Stale"), 0);

        let snapshot = ListSnapshot {
            default_tracks: vec![test_track("d1")],
            love_tracks: vec![test_track("l1")],
            user_lists: vec![
                snapshot_entry("A", vec![test_track("a1")]),
                snapshot_entry("B", vec![test_track("b1")]),
            ],
            temp_tracks: Some(vec![test_track("tmp1")]),
        };

        let changed = manager.overwrite_list_data(snapshot);

        // A was materialized, B was not; temp was never materialized
        assert_eq!(changed, vec![list_a.clone(), default_id.clone(), love_id.clone()]);
        assert_eq!(track_ids(&manager, &default_id), ["d1"]);
        assert_eq!(track_ids(&manager, &love_id), ["l1"]);
        assert_eq!(track_ids(&manager, &list_a), ["a1"]);
        assert!(!manager.is_materialized(&ListId::new("B")));
        assert!(!manager.is_materialized(&ListId::temp_list()));

        // Registry rebuilt purely from the snapshot
        let registry_ids: Vec<&str> = manager.user_lists().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(registry_ids, ["A", "B"]);

        // Canonical order persisted, temp included because it was supplied
        assert_eq!(
            metadata.positions(),
            vec![default_id, love_id, list_a, ListId::new("B"), ListId::temp_list()]
        );
        assert_eq!(metadata.positions(), metadata.update_info());
    }

    fn snapshot_entry(id: &str, tracks: Vec<TrackInfo>) -> echo_core::UserListSnapshot {
        echo_core::UserListSnapshot {
            info: UserListInfo::new(id, format!("List {}", id)),
            tracks,
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Add(u8),
            Remove(u8),
        }

        fn op_strategy() -> impl Strategy<Value = Op> {
            prop_oneof![
                (0u8..16).prop_map(Op::Add),
                (0u8..16).prop_map(Op::Remove),
            ]
        }

        proptest! {
            #[test]
            fn track_ids_stay_unique(ops in prop::collection::vec(op_strategy(), 0..64)) {
                let (mut manager, _) = test_manager();
                let id = ListId::new("L");
                manager.set_list_tracks(id.clone(), vec![]);

                for op in ops {
                    match op {
                        Op::Add(n) => {
                            manager.add_tracks(
                                &id,
                                vec![test_track(&format!("t{}", n))],
                                AddPosition::Bottom,
                            );
                        }
                        Op::Remove(n) => {
                            manager.remove_tracks(&id, &[TrackId::new(format!("t{}", n))]);
                        }
                    }
                }

                let ids: Vec<_> = manager.tracks(&id).unwrap().iter().map(|t| t.id.clone()).collect();
                let unique: HashSet<_> = ids.iter().cloned().collect();
                prop_assert_eq!(ids.len(), unique.len());
            }

            #[test]
            fn group_move_keeps_both_subsets_ordered(
                moved in prop::collection::hash_set(0usize..8, 0..8),
                position in 0usize..10,
            ) {
                let (mut manager, _) = test_manager();
                for i in 0..8 {
                    manager.create_user_list(UserListInfo::new(format!("L{}", i), "x"), usize::MAX);
                }
                let ids: Vec<ListId> = moved.iter().map(|i| ListId::new(format!("L{}", i))).collect();

                manager.move_user_lists(position, &ids);

                let after: Vec<String> =
                    manager.user_lists().iter().map(|l| l.id.as_str().to_string()).collect();
                let moved_after: Vec<_> =
                    after.iter().filter(|id| ids.iter().any(|m| m.as_str() == id.as_str())).collect();
                let kept_after: Vec<_> =
                    after.iter().filter(|id| !ids.iter().any(|m| m.as_str() == id.as_str())).collect();

                // Moved subset keeps registry order, which is index order here
                let mut expected_moved: Vec<usize> = moved.iter().copied().collect();
                expected_moved.sort_unstable();
                let expected_moved: Vec<String> =
                    expected_moved.into_iter().map(|i| format!("L{}", i)).collect();
                prop_assert_eq!(moved_after, expected_moved.iter().collect::<Vec<_>>());

                // Non-moved subset keeps its order too
                let expected_kept: Vec<String> = (0..8)
                    .map(|i| format!("L{}", i))
                    .filter(|id| !expected_moved.contains(id))
                    .collect();
                prop_assert_eq!(kept_after, expected_kept.iter().collect::<Vec<_>>());
            }
        }
    }
}
