//! Domain types for Echo Player list management

mod ids;
mod list;
mod snapshot;
mod track;

pub use ids::{ListId, ListKind, TrackId, DEFAULT_LIST_ID, LOVE_LIST_ID, TEMP_LIST_ID};
pub use list::{AddPosition, ListUpdate, UserListInfo};
pub use snapshot::{ListSnapshot, UserListSnapshot};
pub use track::{TrackInfo, TrackUpdate};
