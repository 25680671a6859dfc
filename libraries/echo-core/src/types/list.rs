/// List descriptor domain types
use crate::types::ListId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Descriptor of a user-created list
///
/// `source` and `source_list_id` together form the optional binding to the
/// external provider playlist this list was imported from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserListInfo {
    /// Unique list identifier
    pub id: ListId,

    /// Display name
    pub name: String,

    /// Provider the list is bound to, if imported
    pub source: Option<String>,

    /// Provider-side playlist id, if imported
    pub source_list_id: Option<String>,

    /// When the list was last repositioned by the user
    pub position_updated_at: Option<DateTime<Utc>>,
}

impl UserListInfo {
    /// Create a descriptor with no source binding
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ListId::new(id),
            name: name.into(),
            source: None,
            source_list_id: None,
            position_updated_at: None,
        }
    }
}

/// Descriptor update payload
///
/// Regular user lists consume the descriptor fields; the temporary list
/// consumes only `meta`; the default and love lists ignore updates entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListUpdate {
    /// Replacement descriptor fields, keyed by `info.id`
    #[serde(flatten)]
    pub info: UserListInfo,

    /// Replacement metadata, consumed only by the temporary list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl From<UserListInfo> for ListUpdate {
    fn from(info: UserListInfo) -> Self {
        Self { info, meta: None }
    }
}

/// Where newly added tracks land in a collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddPosition {
    /// Prepend to the front of the collection
    Top,

    /// Append to the back of the collection
    #[default]
    Bottom,
}
