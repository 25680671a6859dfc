//! Echo Player Core
//!
//! Platform-agnostic domain types for Echo Player's list management.
//!
//! This crate defines:
//! - **Identifiers**: `ListId` / `TrackId` newtypes and the three reserved
//!   list ids (default, love, temp) with their `ListKind` dispatch
//! - **Domain Types**: `TrackInfo`, `UserListInfo`, update payloads
//! - **Sync Payloads**: `ListSnapshot`, the full-overwrite shape crossing
//!   the sync boundary
//!
//! # Example
//!
//! ```rust
//! use echo_core::types::{ListId, ListKind, TrackInfo, UserListInfo};
//!
//! let info = UserListInfo::new("road-trip", "Road Trip");
//! assert_eq!(info.id.kind(), ListKind::User);
//!
//! let track = TrackInfo::new("t1", "My Song", "Some Artist");
//! assert_eq!(track.singer, "Some Artist");
//!
//! assert_eq!(ListId::love_list().kind(), ListKind::Love);
//! ```

#![forbid(unsafe_code)]

pub mod types;

// Re-export commonly used types
pub use types::{
    AddPosition, ListId, ListKind, ListSnapshot, ListUpdate, TrackId, TrackInfo, TrackUpdate,
    UserListInfo, UserListSnapshot, DEFAULT_LIST_ID, LOVE_LIST_ID, TEMP_LIST_ID,
};
