/// ID types for Echo Player list management
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Reserved id of the default list
pub const DEFAULT_LIST_ID: &str = "default";

/// Reserved id of the love (favorites) list
pub const LOVE_LIST_ID: &str = "love";

/// Reserved id of the temporary list
pub const TEMP_LIST_ID: &str = "temp";

/// List identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListId(String);

impl ListId {
    /// Create a new list ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random list ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The default list id
    pub fn default_list() -> Self {
        Self(DEFAULT_LIST_ID.to_string())
    }

    /// The love list id
    pub fn love_list() -> Self {
        Self(LOVE_LIST_ID.to_string())
    }

    /// The temporary list id
    pub fn temp_list() -> Self {
        Self(TEMP_LIST_ID.to_string())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve the reserved-id dispatch kind for this id
    pub fn kind(&self) -> ListKind {
        match self.0.as_str() {
            DEFAULT_LIST_ID => ListKind::Default,
            LOVE_LIST_ID => ListKind::Love,
            TEMP_LIST_ID => ListKind::Temp,
            _ => ListKind::User,
        }
    }

    /// Whether this id is one of the three reserved list ids
    pub fn is_reserved(&self) -> bool {
        self.kind() != ListKind::User
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Closed dispatch over the reserved list ids
///
/// Resolved once at the entry boundary via [`ListId::kind`] so the engines
/// match on a variant instead of re-testing string constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// The always-present default list
    Default,
    /// The always-present love (favorites) list
    Love,
    /// The temporary list
    Temp,
    /// A user-created list
    User,
}

/// Track identifier
///
/// Unique within one collection, not globally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    /// Create a new track ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random track ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
