//! The editing session composition root.
//!
//! `TimelineEditor` owns the timeline snapshot, its history, the selection,
//! and the playback transport. Every structural change goes through it; no
//! other component mutates track/item structure. Mutations are synchronous
//! and atomic — each either fully applies (recording exactly one history
//! entry) or is a silent no-op that leaves history, dirty state, and the
//! timeline untouched.

use std::time::{Duration, Instant};

use clipcast_core::{unix_now, Result};
use clipcast_playback::{resolve_active_items, ActiveItems, Transport};
use clipcast_timeline::{
    ClipMarker, ClipMarkerPatch, EditCommand, History, HistoryEntry, ItemPatch, MarkerPatch,
    Timeline, TimelineItem, TimelineMarker, TrackKind, TrackPatch,
};
use tracing::debug;
use uuid::Uuid;

use crate::media::MediaResolver;
use crate::render::RenderStatus;
use crate::selection::Selection;
use crate::store::TimelineStore;

/// Quiet period after the last edit before an autosave runs.
pub const AUTOSAVE_DEBOUNCE: Duration = Duration::from_secs(2);

/// One episode's editing session.
pub struct TimelineEditor {
    timeline: Timeline,
    history: History,
    selection: Selection,
    transport: Transport,
    dirty: bool,
    dirty_since: Option<Instant>,
    last_saved_at: Option<u64>,
    save_error: Option<String>,
    render_status: RenderStatus,
}

impl TimelineEditor {
    /// Wrap an existing (loaded) timeline.
    pub fn new(timeline: Timeline) -> Self {
        Self {
            timeline,
            history: History::default(),
            selection: Selection::default(),
            transport: Transport::new(),
            dirty: false,
            dirty_since: None,
            last_saved_at: None,
            save_error: None,
            render_status: RenderStatus::default(),
        }
    }

    /// Start a fresh, empty session for an episode.
    pub fn for_episode(podcast_id: impl Into<String>, episode_id: impl Into<String>) -> Self {
        Self::new(Timeline::new(podcast_id, episode_id))
    }

    // ── State access ────────────────────────────────────────────────

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut Transport {
        &mut self.transport
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Unix timestamp of the last successful save.
    pub fn last_saved_at(&self) -> Option<u64> {
        self.last_saved_at
    }

    /// Surfaced message of the last failed save, cleared on success.
    pub fn save_error(&self) -> Option<&str> {
        self.save_error.as_deref()
    }

    pub fn render_status(&self) -> &RenderStatus {
        &self.render_status
    }

    /// Store the status reported by the external render pipeline.
    pub fn set_render_status(&mut self, status: RenderStatus) {
        self.render_status = status;
    }

    /// Items live at the transport's current playhead, in compositing order.
    pub fn active_items(&self) -> ActiveItems<'_> {
        resolve_active_items(self.transport.current_time(), &self.timeline.tracks)
    }

    /// Items live at an arbitrary time (used by the preview compositor).
    pub fn active_items_at(&self, time: f64) -> ActiveItems<'_> {
        resolve_active_items(time, &self.timeline.tracks)
    }

    /// Advance playback by one host frame.
    pub fn tick(&mut self, now: Instant) -> bool {
        let duration = self.timeline.duration;
        self.transport.tick(now, duration)
    }

    // ── Mutations ───────────────────────────────────────────────────

    /// Execute a command. Commits to history and dirties the session only
    /// if the timeline actually changed.
    fn commit(&mut self, mut command: EditCommand) -> bool {
        if !command.apply(&mut self.timeline) {
            return false;
        }
        self.timeline.updated_at = unix_now();
        self.prune_selection(&command);
        debug!(action = command.describe(), "timeline edit");
        self.history.push(HistoryEntry {
            description: command.describe().to_string(),
            command,
        });
        self.mark_dirty();
        true
    }

    /// Drop deleted entities from the selection.
    fn prune_selection(&mut self, command: &EditCommand) {
        match command {
            EditCommand::RemoveTrack {
                track_id, removed, ..
            } => {
                self.selection.deselect_track(*track_id);
                if let Some(track) = removed {
                    for item in &track.items {
                        self.selection.deselect_item(item.id);
                    }
                }
            }
            EditCommand::RemoveItem { item_id, .. } => {
                self.selection.deselect_item(*item_id);
            }
            EditCommand::Batch(commands) => {
                for command in commands {
                    self.prune_selection(command);
                }
            }
            _ => {}
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
        if self.dirty_since.is_none() {
            self.dirty_since = Some(Instant::now());
        }
    }

    /// Append a new track. Its `order` is max existing + 1 (or 0).
    pub fn add_track(&mut self, kind: TrackKind, name: impl Into<String>) -> Uuid {
        let track_id = Uuid::new_v4();
        self.commit(EditCommand::AddTrack {
            kind,
            name: name.into(),
            track_id: Some(track_id),
            order: None,
        });
        track_id
    }

    /// Delete a track and all its items.
    pub fn remove_track(&mut self, track_id: Uuid) -> bool {
        self.commit(EditCommand::RemoveTrack {
            track_id,
            removed: None,
            index: None,
        })
    }

    /// Shallow-merge fields onto a track. Identity is never overwritten.
    pub fn update_track(&mut self, track_id: Uuid, patch: TrackPatch) -> bool {
        self.commit(EditCommand::UpdateTrack {
            track_id,
            patch,
            reverse: None,
        })
    }

    /// Assign `order = index` for each id in the sequence; tracks not
    /// mentioned are untouched.
    pub fn reorder_tracks(&mut self, ordered_ids: &[Uuid]) -> bool {
        let orders = ordered_ids
            .iter()
            .enumerate()
            .map(|(index, id)| (*id, index as u32))
            .collect();
        self.commit(EditCommand::AssignTrackOrders {
            orders,
            previous: None,
        })
    }

    /// Add an item to a track. Returns the item id when committed.
    /// Timeline duration is extended if needed, never shrunk.
    pub fn add_item(&mut self, track_id: Uuid, mut item: TimelineItem) -> Option<Uuid> {
        item.track_id = track_id;
        let item_id = item.id;
        self.commit(EditCommand::AddItem { track_id, item })
            .then_some(item_id)
    }

    /// Remove an item, wherever it lives.
    pub fn remove_item(&mut self, item_id: Uuid) -> bool {
        self.commit(EditCommand::RemoveItem {
            item_id,
            removed: None,
        })
    }

    /// Shallow-merge fields onto an item. `id`/`track_id` are protected;
    /// track reassignment goes through [`TimelineEditor::move_item`].
    pub fn update_item(&mut self, item_id: Uuid, patch: ItemPatch) -> bool {
        self.commit(EditCommand::UpdateItem {
            item_id,
            patch,
            reverse: None,
        })
    }

    /// Move an item in time and optionally across tracks. The start time
    /// is clamped to `>= 0`. A locked (or missing) destination silently
    /// skips the transfer while the time move still applies.
    pub fn move_item(
        &mut self,
        item_id: Uuid,
        new_start_time: f64,
        new_track_id: Option<Uuid>,
    ) -> bool {
        let Some(source) = self.timeline.track_containing_item(item_id) else {
            return false;
        };
        let source_id = source.id;
        let destination = new_track_id
            .filter(|dst| *dst != source_id)
            .filter(|dst| self.timeline.find_track(*dst).is_some_and(|t| !t.locked));
        self.commit(EditCommand::MoveItem {
            item_id,
            start_time: new_start_time.max(0.0),
            track_id: destination,
            previous: None,
        })
    }

    /// Split an item at the playhead. Boundary times (at or outside the
    /// item's bounds) never split. Returns the right half's id.
    pub fn split_item_at_playhead(&mut self, item_id: Uuid, current_time: f64) -> Option<Uuid> {
        let item = self.timeline.find_item(item_id)?;
        let split_point = current_time - item.start_time;
        if split_point <= 0.0 || split_point >= item.duration {
            return None;
        }
        let right_id = Uuid::new_v4();
        self.commit(EditCommand::SplitItem {
            item_id,
            at_time: current_time,
            right_id,
            original: None,
        })
        .then_some(right_id)
    }

    pub fn add_marker(&mut self, marker: TimelineMarker) -> Uuid {
        let id = marker.id;
        self.commit(EditCommand::AddMarker { marker });
        id
    }

    pub fn remove_marker(&mut self, marker_id: Uuid) -> bool {
        self.commit(EditCommand::RemoveMarker {
            marker_id,
            removed: None,
        })
    }

    pub fn update_marker(&mut self, marker_id: Uuid, patch: MarkerPatch) -> bool {
        self.commit(EditCommand::UpdateMarker {
            marker_id,
            patch,
            reverse: None,
        })
    }

    pub fn add_clip_marker(&mut self, marker: ClipMarker) -> Uuid {
        let id = marker.id;
        self.commit(EditCommand::AddClipMarker { marker });
        id
    }

    pub fn remove_clip_marker(&mut self, marker_id: Uuid) -> bool {
        self.commit(EditCommand::RemoveClipMarker {
            marker_id,
            removed: None,
        })
    }

    pub fn update_clip_marker(&mut self, marker_id: Uuid, patch: ClipMarkerPatch) -> bool {
        self.commit(EditCommand::UpdateClipMarker {
            marker_id,
            patch,
            reverse: None,
        })
    }

    // ── History ─────────────────────────────────────────────────────

    /// Undo the most recent mutation. No-op on an empty stack.
    pub fn undo(&mut self) -> bool {
        let Some(mut inverse) = self.history.undo() else {
            return false;
        };
        inverse.apply(&mut self.timeline);
        self.timeline.updated_at = unix_now();
        self.prune_selection(&inverse);
        debug!(action = inverse.describe(), "undo");
        self.mark_dirty();
        true
    }

    /// Redo the most recently undone mutation. No-op on an empty stack.
    pub fn redo(&mut self) -> bool {
        let Some(mut replay) = self.history.redo() else {
            return false;
        };
        replay.apply(&mut self.timeline);
        self.timeline.updated_at = unix_now();
        self.prune_selection(&replay);
        debug!(action = replay.describe(), "redo");
        self.mark_dirty();
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    // ── Media ───────────────────────────────────────────────────────

    /// Fill in cached playback URLs for items that lack one. This is a
    /// cache fill: it neither dirties the session nor records history.
    pub fn hydrate_media(&mut self, resolver: &dyn MediaResolver) {
        for track in &mut self.timeline.tracks {
            for item in &mut track.items {
                if let Some(media) = &mut item.media {
                    if media.url.is_none() {
                        media.url = resolver.resolve_url(&media.source_id, media.kind);
                    }
                }
            }
        }
    }

    // ── Persistence ─────────────────────────────────────────────────

    /// Whether the autosave debounce has elapsed since the first unsaved
    /// edit.
    pub fn save_due(&self, now: Instant) -> bool {
        self.dirty
            && self
                .dirty_since
                .is_some_and(|since| now.duration_since(since) >= AUTOSAVE_DEBOUNCE)
    }

    /// Persist the current snapshot if dirty. A failed save leaves the
    /// in-memory snapshot dirty and intact — edits are never lost; the
    /// next successful save includes everything made since.
    pub fn save(&mut self, store: &dyn TimelineStore) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        match store.save(
            &self.timeline.podcast_id,
            &self.timeline.episode_id,
            &self.timeline,
        ) {
            Ok(()) => {
                self.dirty = false;
                self.dirty_since = None;
                self.last_saved_at = Some(unix_now());
                self.save_error = None;
                tracing::info!(episode = %self.timeline.episode_id, "timeline saved");
                Ok(())
            }
            Err(e) => {
                self.save_error = Some(e.to_string());
                tracing::warn!(error = %e, "timeline save failed");
                Err(e)
            }
        }
    }

    /// Run the debounced autosave if it is due.
    pub fn maybe_autosave(&mut self, store: &dyn TimelineStore, now: Instant) -> Result<()> {
        if self.save_due(now) {
            self.save(store)
        } else {
            Ok(())
        }
    }

    /// End the session: cancel playback and best-effort flush a pending
    /// save. A flush failure is recorded in `save_error` but does not
    /// block shutdown.
    pub fn shutdown(&mut self, store: &dyn TimelineStore) {
        self.transport.pause();
        if self.dirty {
            let _ = self.save(store);
        }
    }
}
