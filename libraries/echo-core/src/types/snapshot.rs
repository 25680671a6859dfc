/// Full-snapshot payload crossing the sync boundary
use crate::types::{TrackInfo, UserListInfo};
use serde::{Deserialize, Serialize};

/// One user list inside a snapshot: its descriptor plus its full track sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserListSnapshot {
    /// List descriptor
    #[serde(flatten)]
    pub info: UserListInfo,

    /// Complete track sequence for this list
    pub tracks: Vec<TrackInfo>,
}

/// Complete list-data snapshot from an external sync source
///
/// Replaces the whole registry and every already-materialized collection it
/// references. The temporary list payload is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListSnapshot {
    /// Track sequence for the default list
    pub default_tracks: Vec<TrackInfo>,

    /// Track sequence for the love list
    pub love_tracks: Vec<TrackInfo>,

    /// All user lists, in their canonical order
    pub user_lists: Vec<UserListSnapshot>,

    /// Track sequence for the temporary list, if supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_tracks: Option<Vec<TrackInfo>>,
}
