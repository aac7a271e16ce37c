//! Edit operations on the timeline.
//!
//! Uses the Command pattern: every mutation is an `EditCommand` that knows
//! how to apply itself and produce its inverse for undo. Policy decisions
//! (lock checks, clamps, split-bounds validation) belong to the editor that
//! constructs commands; `apply` is mechanical and reports whether anything
//! actually changed so that no-ops never reach the history.

use uuid::Uuid;

use crate::item::{ItemPatch, TimelineItem};
use crate::marker::{ClipMarker, ClipMarkerPatch, MarkerPatch, TimelineMarker};
use crate::timeline::Timeline;
use crate::track::{Track, TrackKind, TrackPatch};

/// An item removed from a track, with enough context to put it back.
#[derive(Debug, Clone)]
pub struct RemovedItem {
    pub track_id: Uuid,
    pub index: usize,
    pub item: TimelineItem,
}

/// Where an item sat before a move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemPlacement {
    pub start_time: f64,
    pub track_id: Uuid,
}

/// A reversible edit operation on the timeline.
///
/// Several variants store data during execution (the removed entity, the
/// reverse patch, the generated id) so that `inverse` can reconstruct the
/// prior state exactly and redo can replay with stable identities.
#[derive(Debug, Clone)]
pub enum EditCommand {
    /// Append a new track with `order = max existing + 1` (or 0).
    AddTrack {
        kind: TrackKind,
        name: String,
        /// Populated on first execution; reused on redo.
        track_id: Option<Uuid>,
        /// Captured on first execution for stable replay.
        order: Option<u32>,
    },
    /// Delete a track and all its items.
    RemoveTrack {
        track_id: Uuid,
        /// Stored for undo — populated when the command is executed.
        removed: Option<Box<Track>>,
        /// Original index in the track list.
        index: Option<usize>,
    },
    /// Re-insert a previously removed track (undo of `RemoveTrack`).
    RestoreTrack { index: usize, track: Box<Track> },
    /// Shallow-merge fields onto a track.
    UpdateTrack {
        track_id: Uuid,
        patch: TrackPatch,
        /// Reverse patch of fields that changed; populated on execution.
        reverse: Option<TrackPatch>,
    },
    /// Assign explicit order values to tracks. Tracks not mentioned are
    /// untouched.
    AssignTrackOrders {
        orders: Vec<(Uuid, u32)>,
        /// Prior orders of the matched tracks; populated on execution.
        previous: Option<Vec<(Uuid, u32)>>,
    },
    /// Append an item to a track. Timeline duration only ever extends.
    AddItem { track_id: Uuid, item: TimelineItem },
    /// Remove an item, scanning all tracks for its owner.
    RemoveItem {
        item_id: Uuid,
        /// Stored for undo.
        removed: Option<Box<RemovedItem>>,
    },
    /// Re-insert a previously removed item (undo of `RemoveItem`).
    RestoreItem {
        track_id: Uuid,
        index: usize,
        item: TimelineItem,
    },
    /// Replace an item wholesale, matching by id.
    ReplaceItem {
        item: TimelineItem,
        /// Stored for undo.
        previous: Option<Box<TimelineItem>>,
    },
    /// Shallow-merge fields onto an item.
    UpdateItem {
        item_id: Uuid,
        patch: ItemPatch,
        reverse: Option<ItemPatch>,
    },
    /// Place an item at a new start time and (already validated) owner.
    MoveItem {
        item_id: Uuid,
        start_time: f64,
        /// Destination track when the move transfers ownership.
        track_id: Option<Uuid>,
        /// Prior placement; populated on execution.
        previous: Option<ItemPlacement>,
    },
    /// Split an item at a timeline time strictly inside its bounds.
    SplitItem {
        item_id: Uuid,
        at_time: f64,
        /// Identity of the right half, fixed at construction so redo
        /// recreates the same item.
        right_id: Uuid,
        /// Pre-split snapshot of the item; populated on execution.
        original: Option<Box<TimelineItem>>,
    },
    AddMarker {
        marker: TimelineMarker,
    },
    RemoveMarker {
        marker_id: Uuid,
        removed: Option<(usize, TimelineMarker)>,
    },
    UpdateMarker {
        marker_id: Uuid,
        patch: MarkerPatch,
        reverse: Option<MarkerPatch>,
    },
    AddClipMarker {
        marker: ClipMarker,
    },
    RemoveClipMarker {
        marker_id: Uuid,
        removed: Option<(usize, ClipMarker)>,
    },
    UpdateClipMarker {
        marker_id: Uuid,
        patch: ClipMarkerPatch,
        reverse: Option<ClipMarkerPatch>,
    },
    /// A batch of commands applied atomically as one history entry.
    Batch(Vec<EditCommand>),
}

impl EditCommand {
    /// Apply this command to a timeline, mutating it in place.
    ///
    /// Returns `true` if the timeline changed. Mutable `&mut self` because
    /// some variants store data during execution for later inversion.
    pub fn apply(&mut self, timeline: &mut Timeline) -> bool {
        match self {
            Self::AddTrack {
                kind,
                name,
                track_id,
                order,
            } => {
                let id = *track_id.get_or_insert_with(Uuid::new_v4);
                let order = match *order {
                    Some(order) => order,
                    None => {
                        let next = timeline.next_track_order();
                        *order = Some(next);
                        next
                    }
                };
                let mut track = Track::new(*kind, name.clone(), order);
                track.id = id;
                timeline.tracks.push(track);
                true
            }
            Self::RemoveTrack {
                track_id,
                removed,
                index,
            } => {
                let Some(idx) = timeline.tracks.iter().position(|t| t.id == *track_id) else {
                    return false;
                };
                *index = Some(idx);
                *removed = Some(Box::new(timeline.tracks.remove(idx)));
                timeline.recompute_duration();
                true
            }
            Self::RestoreTrack { index, track } => {
                let idx = (*index).min(timeline.tracks.len());
                timeline.tracks.insert(idx, (**track).clone());
                timeline.recompute_duration();
                true
            }
            Self::UpdateTrack {
                track_id,
                patch,
                reverse,
            } => {
                let Some(track) = timeline.find_track_mut(*track_id) else {
                    return false;
                };
                let rev = track.apply_patch(patch);
                if rev.is_empty() {
                    return false;
                }
                *reverse = Some(rev);
                true
            }
            Self::AssignTrackOrders { orders, previous } => {
                let mut prior = Vec::new();
                let mut changed = false;
                for (id, order) in orders.iter() {
                    if let Some(track) = timeline.find_track_mut(*id) {
                        prior.push((*id, track.order));
                        if track.order != *order {
                            track.order = *order;
                            changed = true;
                        }
                    }
                }
                if !changed {
                    return false;
                }
                *previous = Some(prior);
                true
            }
            Self::AddItem { track_id, item } => {
                let end = item.end_time();
                let Some(track) = timeline.find_track_mut(*track_id) else {
                    return false;
                };
                let mut item = item.clone();
                item.track_id = *track_id;
                track.items.push(item);
                // Duration is never shrunk by adding an item.
                timeline.duration = timeline.duration.max(end);
                true
            }
            Self::RemoveItem { item_id, removed } => {
                let Some((track_idx, item_idx)) = timeline
                    .tracks
                    .iter()
                    .enumerate()
                    .find_map(|(ti, track)| track.item_index(*item_id).map(|ii| (ti, ii)))
                else {
                    return false;
                };
                let track_id = timeline.tracks[track_idx].id;
                let item = timeline.tracks[track_idx].items.remove(item_idx);
                *removed = Some(Box::new(RemovedItem {
                    track_id,
                    index: item_idx,
                    item,
                }));
                timeline.recompute_duration();
                true
            }
            Self::RestoreItem {
                track_id,
                index,
                item,
            } => {
                let Some(track) = timeline.find_track_mut(*track_id) else {
                    return false;
                };
                let idx = (*index).min(track.items.len());
                track.items.insert(idx, item.clone());
                timeline.recompute_duration();
                true
            }
            Self::ReplaceItem { item, previous } => {
                let Some(slot) = timeline.find_item_mut(item.id) else {
                    return false;
                };
                *previous = Some(Box::new(std::mem::replace(slot, item.clone())));
                timeline.recompute_duration();
                true
            }
            Self::UpdateItem {
                item_id,
                patch,
                reverse,
            } => {
                let Some(item) = timeline.find_item_mut(*item_id) else {
                    return false;
                };
                let rev = item.apply_patch(patch);
                if rev.is_empty() {
                    return false;
                }
                *reverse = Some(rev);
                timeline.recompute_duration();
                true
            }
            Self::MoveItem {
                item_id,
                start_time,
                track_id,
                previous,
            } => {
                let Some(src_idx) = timeline
                    .tracks
                    .iter()
                    .position(|t| t.items.iter().any(|i| i.id == *item_id))
                else {
                    return false;
                };
                let src_id = timeline.tracks[src_idx].id;
                let new_start = start_time.max(0.0);

                let prior = {
                    let item = timeline.tracks[src_idx].find_item(*item_id).unwrap();
                    ItemPlacement {
                        start_time: item.start_time,
                        track_id: src_id,
                    }
                };

                match *track_id {
                    Some(dst_id) if dst_id != src_id => {
                        let item_idx = timeline.tracks[src_idx].item_index(*item_id).unwrap();
                        let mut item = timeline.tracks[src_idx].items.remove(item_idx);
                        item.start_time = new_start;
                        item.track_id = dst_id;
                        match timeline.find_track_mut(dst_id) {
                            Some(dst) => dst.items.push(item),
                            // Destination vanished between validation and
                            // apply; put the item back untouched.
                            None => {
                                item.start_time = prior.start_time;
                                item.track_id = src_id;
                                timeline.tracks[src_idx].items.insert(item_idx, item);
                                return false;
                            }
                        }
                    }
                    _ => {
                        let item = timeline.tracks[src_idx].find_item_mut(*item_id).unwrap();
                        if item.start_time == new_start {
                            return false;
                        }
                        item.start_time = new_start;
                    }
                }
                *previous = Some(prior);
                timeline.recompute_duration();
                true
            }
            Self::SplitItem {
                item_id,
                at_time,
                right_id,
                original,
            } => {
                let Some(track) = timeline
                    .tracks
                    .iter_mut()
                    .find(|t| t.items.iter().any(|i| i.id == *item_id))
                else {
                    return false;
                };
                let idx = track.item_index(*item_id).unwrap();
                let before = track.items[idx].clone();
                let split_point = *at_time - before.start_time;
                // Boundary times never split.
                if split_point <= 0.0 || split_point >= before.duration {
                    return false;
                }

                let left = &mut track.items[idx];
                left.duration = split_point;
                left.source_out = before.source_in + split_point * before.speed;
                left.fade_out = 0.0;
                left.transition_out = None;

                let mut right = before.clone();
                right.id = *right_id;
                right.start_time = before.start_time + split_point;
                right.duration = before.duration - split_point;
                right.source_in = before.source_in + split_point * before.speed;
                right.source_out = before.source_in + before.duration * before.speed;
                right.fade_in = 0.0;
                right.transition_in = None;
                track.items.insert(idx + 1, right);

                *original = Some(Box::new(before));
                true
            }
            Self::AddMarker { marker } => {
                timeline.markers.push(marker.clone());
                true
            }
            Self::RemoveMarker { marker_id, removed } => {
                let Some(idx) = timeline.markers.iter().position(|m| m.id == *marker_id) else {
                    return false;
                };
                *removed = Some((idx, timeline.markers.remove(idx)));
                true
            }
            Self::UpdateMarker {
                marker_id,
                patch,
                reverse,
            } => {
                let Some(marker) = timeline.markers.iter_mut().find(|m| m.id == *marker_id)
                else {
                    return false;
                };
                let rev = marker.apply_patch(patch);
                if rev.is_empty() {
                    return false;
                }
                *reverse = Some(rev);
                true
            }
            Self::AddClipMarker { marker } => {
                timeline.clip_markers.push(marker.clone());
                true
            }
            Self::RemoveClipMarker { marker_id, removed } => {
                let Some(idx) = timeline
                    .clip_markers
                    .iter()
                    .position(|m| m.id == *marker_id)
                else {
                    return false;
                };
                *removed = Some((idx, timeline.clip_markers.remove(idx)));
                true
            }
            Self::UpdateClipMarker {
                marker_id,
                patch,
                reverse,
            } => {
                let Some(marker) = timeline
                    .clip_markers
                    .iter_mut()
                    .find(|m| m.id == *marker_id)
                else {
                    return false;
                };
                let rev = marker.apply_patch(patch);
                if rev.is_empty() {
                    return false;
                }
                *reverse = Some(rev);
                true
            }
            Self::Batch(commands) => {
                // Members that were no-ops never populated their undo
                // payloads; only executed members may stay, or inverting
                // the batch would panic.
                let mut executed = Vec::with_capacity(commands.len());
                for mut cmd in commands.drain(..) {
                    if cmd.apply(timeline) {
                        executed.push(cmd);
                    }
                }
                *commands = executed;
                !commands.is_empty()
            }
        }
    }

    /// Produce the inverse command (for undo). Only valid after `apply`
    /// has executed and populated the stored state; calling it on an
    /// unexecuted command is a programmer error.
    pub fn inverse(&self) -> Self {
        match self {
            Self::AddTrack { track_id, .. } => Self::RemoveTrack {
                track_id: track_id.expect("track_id must be populated"),
                removed: None,
                index: None,
            },
            Self::RemoveTrack { removed, index, .. } => Self::RestoreTrack {
                index: index.expect("index must be populated"),
                track: removed.clone().expect("removed track must be populated"),
            },
            Self::RestoreTrack { track, .. } => Self::RemoveTrack {
                track_id: track.id,
                removed: None,
                index: None,
            },
            Self::UpdateTrack {
                track_id, reverse, ..
            } => Self::UpdateTrack {
                track_id: *track_id,
                patch: reverse.clone().expect("reverse patch must be populated"),
                reverse: None,
            },
            Self::AssignTrackOrders { previous, .. } => Self::AssignTrackOrders {
                orders: previous.clone().expect("previous orders must be populated"),
                previous: None,
            },
            Self::AddItem { item, .. } => Self::RemoveItem {
                item_id: item.id,
                removed: None,
            },
            Self::RemoveItem { removed, .. } => {
                let removed = removed.as_ref().expect("removed item must be populated");
                Self::RestoreItem {
                    track_id: removed.track_id,
                    index: removed.index,
                    item: removed.item.clone(),
                }
            }
            Self::RestoreItem { item, .. } => Self::RemoveItem {
                item_id: item.id,
                removed: None,
            },
            Self::ReplaceItem { previous, .. } => Self::ReplaceItem {
                item: (**previous.as_ref().expect("previous item must be populated")).clone(),
                previous: None,
            },
            Self::UpdateItem {
                item_id, reverse, ..
            } => Self::UpdateItem {
                item_id: *item_id,
                patch: reverse.clone().expect("reverse patch must be populated"),
                reverse: None,
            },
            Self::MoveItem {
                item_id, previous, ..
            } => {
                let prior = previous.expect("previous placement must be populated");
                Self::MoveItem {
                    item_id: *item_id,
                    start_time: prior.start_time,
                    track_id: Some(prior.track_id),
                    previous: None,
                }
            }
            Self::SplitItem {
                right_id, original, ..
            } => {
                let original = original.as_ref().expect("original item must be populated");
                Self::Batch(vec![
                    Self::RemoveItem {
                        item_id: *right_id,
                        removed: None,
                    },
                    Self::ReplaceItem {
                        item: (**original).clone(),
                        previous: None,
                    },
                ])
            }
            Self::AddMarker { marker } => Self::RemoveMarker {
                marker_id: marker.id,
                removed: None,
            },
            Self::RemoveMarker { removed, .. } => {
                let (_, marker) = removed.as_ref().expect("removed marker must be populated");
                Self::AddMarker {
                    marker: marker.clone(),
                }
            }
            Self::UpdateMarker {
                marker_id, reverse, ..
            } => Self::UpdateMarker {
                marker_id: *marker_id,
                patch: reverse.clone().expect("reverse patch must be populated"),
                reverse: None,
            },
            Self::AddClipMarker { marker } => Self::RemoveClipMarker {
                marker_id: marker.id,
                removed: None,
            },
            Self::RemoveClipMarker { removed, .. } => {
                let (_, marker) = removed.as_ref().expect("removed marker must be populated");
                Self::AddClipMarker {
                    marker: marker.clone(),
                }
            }
            Self::UpdateClipMarker {
                marker_id, reverse, ..
            } => Self::UpdateClipMarker {
                marker_id: *marker_id,
                patch: reverse.clone().expect("reverse patch must be populated"),
                reverse: None,
            },
            Self::Batch(commands) => {
                Self::Batch(commands.iter().rev().map(|c| c.inverse()).collect())
            }
        }
    }

    /// Human-readable description for history display.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::AddTrack { .. } => "Add track",
            Self::RemoveTrack { .. } => "Remove track",
            Self::RestoreTrack { .. } => "Restore track",
            Self::UpdateTrack { .. } => "Update track",
            Self::AssignTrackOrders { .. } => "Reorder tracks",
            Self::AddItem { .. } => "Add item",
            Self::RemoveItem { .. } => "Remove item",
            Self::RestoreItem { .. } => "Restore item",
            Self::ReplaceItem { .. } => "Replace item",
            Self::UpdateItem { .. } => "Update item",
            Self::MoveItem { .. } => "Move item",
            Self::SplitItem { .. } => "Split item",
            Self::AddMarker { .. } => "Add marker",
            Self::RemoveMarker { .. } => "Remove marker",
            Self::UpdateMarker { .. } => "Update marker",
            Self::AddClipMarker { .. } => "Add clip marker",
            Self::RemoveClipMarker { .. } => "Remove clip marker",
            Self::UpdateClipMarker { .. } => "Update clip marker",
            Self::Batch(_) => "Edit",
        }
    }
}
