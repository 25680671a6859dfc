/// Track domain types
use crate::types::{ListId, TrackId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A track record as stored inside a collection
///
/// The `meta` blob carries provider-specific payload (quality variants,
/// remote song ids, artwork urls) and is treated as opaque by the engines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackInfo {
    /// Track identifier, unique within its collection
    pub id: TrackId,

    /// Track title
    pub name: String,

    /// Artist name(s)
    pub singer: String,

    /// Provider this track came from (e.g. "local")
    pub source: String,

    /// Formatted duration, if known (e.g. "03:45")
    pub interval: Option<String>,

    /// Provider-specific metadata, opaque to the engines
    pub meta: Value,
}

impl TrackInfo {
    /// Create a track with minimal metadata
    pub fn new(id: impl Into<String>, name: impl Into<String>, singer: impl Into<String>) -> Self {
        Self {
            id: TrackId::new(id),
            name: name.into(),
            singer: singer.into(),
            source: "local".to_string(),
            interval: None,
            meta: Value::Null,
        }
    }
}

/// One element of a track-update batch
///
/// Pairs the collection to update with the replacement field values;
/// the target track is located by `track.id` inside collection `list_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackUpdate {
    /// Collection holding the track to update
    #[serde(rename = "id")]
    pub list_id: ListId,

    /// Replacement field values, keyed by `track.id`
    #[serde(rename = "musicInfo")]
    pub track: TrackInfo,
}
