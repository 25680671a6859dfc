//! Sort provider seam
//!
//! Track repositioning hands the full current sequence to an external
//! provider and commits whatever comes back, so an implementation may sort
//! off-thread or in a worker process. The provider must return a permutation
//! of its input: same track identities, new order. The engine validates that
//! contract before committing.

use crate::error::Result;
use async_trait::async_trait;
use echo_core::{TrackId, TrackInfo};

/// Computes the reordered sequence for a track reposition
#[async_trait]
pub trait SortProvider: Send + Sync {
    /// Reorder `tracks`, relocating the tracks named by `ids` to `position`
    ///
    /// `position` is measured against the sequence with the moved tracks
    /// already removed. The returned sequence must contain exactly the same
    /// track identities as the input.
    async fn reorder(
        &self,
        tracks: Vec<TrackInfo>,
        position: usize,
        ids: &[TrackId],
    ) -> Result<Vec<TrackInfo>>;
}

/// In-process sort provider
///
/// Extracts the targeted tracks, orders them by their index in `ids`, and
/// reinserts them as a contiguous run at the clamped position.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineSortProvider;

#[async_trait]
impl SortProvider for InlineSortProvider {
    async fn reorder(
        &self,
        tracks: Vec<TrackInfo>,
        position: usize,
        ids: &[TrackId],
    ) -> Result<Vec<TrackInfo>> {
        let mut moved: Vec<Option<TrackInfo>> = vec![None; ids.len()];
        let mut remaining: Vec<TrackInfo> = Vec::with_capacity(tracks.len());

        for track in tracks {
            match ids.iter().position(|id| id == &track.id) {
                Some(index) => moved[index] = Some(track),
                None => remaining.push(track),
            }
        }

        let insert_at = position.min(remaining.len());
        let tail = remaining.split_off(insert_at);
        remaining.extend(moved.into_iter().flatten());
        remaining.extend(tail);
        Ok(remaining)
    }
}
