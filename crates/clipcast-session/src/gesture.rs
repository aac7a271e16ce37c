//! Interactive edit gestures.
//!
//! Drag and trim gestures accumulate live preview state while the pointer
//! is down and commit exactly one history entry on release. Intermediate
//! pointer positions never touch the timeline.

use clipcast_timeline::{ItemPatch, TimelineItem};
use uuid::Uuid;

use crate::editor::TimelineEditor;

/// Shortest duration a trim can leave behind, in seconds.
pub const MIN_ITEM_DURATION: f64 = 0.1;

/// Which edge of the item a trim handle grabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrimEdge {
    Left,
    Right,
}

/// An in-progress edge trim.
///
/// Trimming adjusts `start_time`/`duration` together with the source
/// window, so the media under the surviving portion stays put: dragging
/// the left edge right by one second also advances `source_in` by one
/// source-second (scaled by `speed`).
#[derive(Debug, Clone)]
pub struct TrimGesture {
    item_id: Uuid,
    edge: TrimEdge,
    original_start: f64,
    original_duration: f64,
    original_source_in: f64,
    original_source_out: f64,
    speed: f64,
    delta: f64,
}

impl TrimGesture {
    /// Snapshot the item at pointer-down.
    pub fn begin(item: &TimelineItem, edge: TrimEdge) -> Self {
        Self {
            item_id: item.id,
            edge,
            original_start: item.start_time,
            original_duration: item.duration,
            original_source_in: item.source_in,
            original_source_out: item.source_out,
            speed: item.speed,
            delta: 0.0,
        }
    }

    /// Update with the pointer's timeline-seconds offset from the grab
    /// point. A left trim never pushes the start before zero; the
    /// [`MIN_ITEM_DURATION`] floor is enforced on the resulting duration.
    pub fn update(&mut self, delta: f64) {
        self.delta = match self.edge {
            TrimEdge::Left => delta.max(-self.original_start),
            TrimEdge::Right => delta,
        };
    }

    /// Resulting duration under the current delta. Floored here, on the
    /// duration itself rather than the delta, so the minimum holds
    /// exactly instead of losing to float cancellation.
    fn new_duration(&self) -> f64 {
        let raw = match self.edge {
            TrimEdge::Left => self.original_duration - self.delta,
            TrimEdge::Right => self.original_duration + self.delta,
        };
        raw.max(MIN_ITEM_DURATION)
    }

    /// Live preview of (start_time, duration) for rendering the drag.
    pub fn preview(&self) -> (f64, f64) {
        let duration = self.new_duration();
        match self.edge {
            TrimEdge::Left => (
                self.original_start + (self.original_duration - duration),
                duration,
            ),
            TrimEdge::Right => (self.original_start, duration),
        }
    }

    /// Commit the trim as a single patch. A zero-delta release is a no-op.
    pub fn commit(&self, editor: &mut TimelineEditor) -> bool {
        if self.delta == 0.0 {
            return false;
        }
        let duration = self.new_duration();
        let patch = match self.edge {
            TrimEdge::Left => {
                let shift = self.original_duration - duration;
                ItemPatch {
                    start_time: Some(self.original_start + shift),
                    duration: Some(duration),
                    source_in: Some((self.original_source_in + shift * self.speed).max(0.0)),
                    ..Default::default()
                }
            }
            TrimEdge::Right => ItemPatch {
                duration: Some(duration),
                source_out: Some(
                    self.original_source_out + (duration - self.original_duration) * self.speed,
                ),
                ..Default::default()
            },
        };
        editor.update_item(self.item_id, patch)
    }
}

/// An in-progress item drag (time and/or track).
#[derive(Debug, Clone)]
pub struct DragGesture {
    item_id: Uuid,
    original_start: f64,
    candidate_start: f64,
    candidate_track: Option<Uuid>,
}

impl DragGesture {
    /// Snapshot the item at pointer-down.
    pub fn begin(item: &TimelineItem) -> Self {
        Self {
            item_id: item.id,
            original_start: item.start_time,
            candidate_start: item.start_time,
            candidate_track: None,
        }
    }

    /// Update with the pointer's timeline-seconds offset and the track
    /// currently under the pointer, if any.
    pub fn update(&mut self, delta: f64, hovered_track: Option<Uuid>) {
        self.candidate_start = (self.original_start + delta).max(0.0);
        self.candidate_track = hovered_track;
    }

    /// Live preview of the candidate start time.
    pub fn preview_start(&self) -> f64 {
        self.candidate_start
    }

    /// Commit the move as a single history entry.
    pub fn commit(&self, editor: &mut TimelineEditor) -> bool {
        editor.move_item(self.item_id, self.candidate_start, self.candidate_track)
    }
}

/// Razor-tool click: seek the playhead to the click time, then split the
/// item there. Returns the right half's id when a split happened.
pub fn razor_split(
    editor: &mut TimelineEditor,
    item_id: Uuid,
    click_time: f64,
) -> Option<Uuid> {
    editor.transport_mut().seek(click_time);
    let at = editor.transport().current_time();
    editor.split_item_at_playhead(item_id, at)
}
