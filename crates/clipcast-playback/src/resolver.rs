//! Active-item resolution.
//!
//! Pure function over the timeline snapshot; called once per rendered
//! frame by both playback and the preview compositor, so it must not
//! mutate anything and should avoid heap allocation in the common case.

use clipcast_timeline::{TimelineItem, Track};
use smallvec::SmallVec;

/// One item that is live at the resolved playhead time.
#[derive(Debug)]
pub struct ActiveItem<'a> {
    /// The live item.
    pub item: &'a TimelineItem,
    /// Effective mute: the track's own mute, or implicit solo muting.
    pub track_muted: bool,
    /// Track volume multiplier.
    pub track_volume: f64,
    /// Track opacity multiplier.
    pub track_opacity: f64,
    /// Exact source-media time this item should be seeked to.
    pub source_seek_time: f64,
}

/// Resolver output, ordered by compositing order (earlier = behind).
pub type ActiveItems<'a> = SmallVec<[ActiveItem<'a>; 8]>;

/// Compute the set of items live at `current_time`.
///
/// - Tracks sort by `order` ascending (stable for ties); that order is the
///   compositing order of the result.
/// - Hidden tracks contribute nothing.
/// - If any track is solo, every non-solo track is implicitly muted.
/// - An item is live on the half-open interval
///   `[start_time, start_time + duration)`.
/// - Items whose media URL has not resolved contribute nothing; they never
///   abort resolution for other items.
pub fn resolve_active_items(current_time: f64, tracks: &[Track]) -> ActiveItems<'_> {
    let has_solo = tracks.iter().any(|track| track.solo);

    let mut sorted: SmallVec<[&Track; 8]> = tracks.iter().collect();
    sorted.sort_by_key(|track| track.order);

    let mut active = ActiveItems::new();
    for track in sorted {
        if !track.visible {
            continue;
        }
        let effective_muted = track.muted || (has_solo && !track.solo);
        for item in &track.items {
            if !item.is_active_at(current_time) || !item.is_playable() {
                continue;
            }
            active.push(ActiveItem {
                item,
                track_muted: effective_muted,
                track_volume: track.volume,
                track_opacity: track.opacity,
                source_seek_time: item.source_seek_time(current_time),
            });
        }
    }
    active
}
