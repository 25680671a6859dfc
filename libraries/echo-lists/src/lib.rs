//! Echo Player - List Management
//!
//! In-memory multi-collection track registry for Echo Player.
//!
//! This crate provides:
//! - Collection store: every materialized track sequence, keyed by list id
//! - User-list registry: the ordered, user-visible list of descriptors
//! - List mutations (create/update/remove/overwrite/group move)
//! - Track mutations (add/remove/move/update/overwrite/reorder) with
//!   per-collection id uniqueness
//! - Bulk snapshot overwrite for external sync sources
//!
//! # Architecture
//!
//! `echo-lists` is completely platform-agnostic:
//! - Persistence of canonical list ordering goes through the
//!   [`ListMetadataStore`] trait
//! - Track repositioning goes through the async [`SortProvider`] trait, so a
//!   platform may sort off-thread
//!
//! Every mutation funnels through [`ListManager`]; readers observe live
//! collection state by id lookup. Not-found and duplicate conditions are
//! silent no-ops reported through returned changed-id sets, never errors.
//!
//! # Example: Track Mutations
//!
//! ```rust
//! use echo_core::{AddPosition, ListId, TrackInfo, UserListInfo};
//! use echo_lists::ListManager;
//!
//! let mut manager = ListManager::default();
//!
//! // Register a list and materialize its collection
//! manager.create_user_list(UserListInfo::new("road-trip", "Road Trip"), 0);
//! manager.set_list_tracks(ListId::new("road-trip"), Vec::new());
//!
//! let track = TrackInfo::new("t1", "My Song", "Some Artist");
//! let changed = manager.add_tracks(&ListId::new("road-trip"), vec![track], AddPosition::Bottom);
//! assert_eq!(changed, vec![ListId::new("road-trip")]);
//!
//! // Adding the same track id again changes nothing
//! let dupe = TrackInfo::new("t1", "My Song", "Some Artist");
//! manager.add_tracks(&ListId::new("road-trip"), vec![dupe], AddPosition::Bottom);
//! assert_eq!(manager.tracks(&ListId::new("road-trip")).unwrap().len(), 1);
//! ```
//!
//! # Example: Reordering
//!
//! ```rust
//! use echo_core::{ListId, TrackId};
//! use echo_lists::{ListManager, Result};
//!
//! async fn move_to_front(manager: &mut ListManager, id: &ListId) -> Result<()> {
//!     manager.reorder_tracks(id, 0, &[TrackId::new("t3")]).await?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]

mod error;
mod manager;
mod metadata;
mod registry;
mod sort;
mod store;

// Public exports
pub use error::{ListError, Result};
pub use manager::ListManager;
pub use metadata::{ListMetadataStore, MemoryMetadataStore};
pub use registry::UserListRegistry;
pub use sort::{InlineSortProvider, SortProvider};
pub use store::CollectionStore;
