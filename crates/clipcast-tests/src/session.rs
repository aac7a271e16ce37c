//! Integration tests for the editing session.
//!
//! Drives `TimelineEditor` end to end: editing through gestures,
//! persistence through a store, media hydration, and autosave.

use std::time::{Duration, Instant};

use clipcast_session::{
    open_or_init, razor_split, DragGesture, MemoryStore, StaticMediaResolver, TimelineEditor,
    TrimEdge, TrimGesture, AUTOSAVE_DEBOUNCE,
};
use clipcast_timeline::{
    ItemKind, ItemPatch, MediaRef, MediaSourceKind, TimelineItem, TrackKind,
};
use uuid::Uuid;

// ── Helpers ────────────────────────────────────────────────────

fn episode_item(start: f64, duration: f64) -> TimelineItem {
    let mut item = TimelineItem::new(ItemKind::Audio);
    item.start_time = start;
    item.duration = duration;
    item.source_out = duration;
    item.media = Some(MediaRef::new("ep-1-audio", MediaSourceKind::Episode));
    item
}

fn editor_with_item() -> (TimelineEditor, Uuid, Uuid) {
    let mut editor = TimelineEditor::for_episode("pod-1", "ep-1");
    let track_id = editor.add_track(TrackKind::AudioPrimary, "Episode audio");
    let item_id = editor.add_item(track_id, episode_item(0.0, 120.0)).unwrap();
    (editor, track_id, item_id)
}

// ── Session lifecycle ──────────────────────────────────────────

#[test]
fn open_edit_save_reopen() {
    crate::init_tracing();
    let store = MemoryStore::new();

    let mut editor = open_or_init(&store, "pod-1", "ep-1").unwrap();
    let track_id = editor.add_track(TrackKind::AudioPrimary, "Episode audio");
    editor.add_item(track_id, episode_item(0.0, 120.0)).unwrap();
    editor.save(&store).unwrap();

    let reopened = open_or_init(&store, "pod-1", "ep-1").unwrap();
    assert_eq!(reopened.timeline(), editor.timeline());
    // History is session state, never persisted.
    assert!(!reopened.can_undo());
}

#[test]
fn autosave_waits_for_debounce() {
    let store = MemoryStore::new();
    let mut editor = open_or_init(&store, "pod-1", "ep-1").unwrap();
    editor.add_track(TrackKind::Music, "Music");

    let edit_time = Instant::now();
    assert!(!editor.save_due(edit_time));
    assert!(!editor.save_due(edit_time + Duration::from_millis(500)));
    assert!(editor.save_due(edit_time + AUTOSAVE_DEBOUNCE));

    editor
        .maybe_autosave(&store, edit_time + AUTOSAVE_DEBOUNCE)
        .unwrap();
    assert!(!editor.is_dirty());
}

#[test]
fn failed_autosave_keeps_session_dirty() {
    let store = MemoryStore::new();
    let mut editor = open_or_init(&store, "pod-1", "ep-1").unwrap();
    editor.add_track(TrackKind::Music, "Music");

    store.fail_saves(true);
    let due = Instant::now() + AUTOSAVE_DEBOUNCE;
    assert!(editor.maybe_autosave(&store, due).is_err());
    assert!(editor.is_dirty());
    assert!(editor.save_error().is_some());

    store.fail_saves(false);
    editor.maybe_autosave(&store, due).unwrap();
    assert!(!editor.is_dirty());
    assert!(editor.save_error().is_none());
}

#[test]
fn shutdown_flushes_pending_edits() {
    let store = MemoryStore::new();
    let mut editor = open_or_init(&store, "pod-1", "ep-1").unwrap();
    editor.add_track(TrackKind::Captions, "Captions");
    editor.transport_mut().play(Instant::now());

    editor.shutdown(&store);
    assert!(!editor.transport().is_playing());
    assert!(!editor.is_dirty());

    let reopened = open_or_init(&store, "pod-1", "ep-1").unwrap();
    assert_eq!(reopened.timeline().tracks.len(), 1);
}

// ── Media hydration feeding playback ───────────────────────────

#[test]
fn hydrated_items_become_active() {
    let (mut editor, _, _) = editor_with_item();
    // Unresolved media: the resolver skips the item.
    assert!(editor.active_items_at(10.0).is_empty());

    let mut resolver = StaticMediaResolver::new();
    resolver.insert("ep-1-audio", "https://cdn/ep-1.mp3");
    editor.hydrate_media(&resolver);

    let active = editor.active_items_at(10.0);
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].source_seek_time, 10.0);
}

// ── Gestures producing single undo steps ───────────────────────

#[test]
fn trim_drag_split_each_undo_in_one_step() {
    let (mut editor, other_track, item_id) = {
        let (mut editor, _, item_id) = editor_with_item();
        let other = editor.add_track(TrackKind::Music, "Music");
        (editor, other, item_id)
    };
    let original = editor.timeline().find_item(item_id).unwrap().clone();

    // Trim the right edge in.
    let mut trim = TrimGesture::begin(&original, TrimEdge::Right);
    trim.update(-20.0);
    trim.commit(&mut editor);
    assert_eq!(editor.timeline().find_item(item_id).unwrap().duration, 100.0);

    // Drag onto the other track.
    let snapshot = editor.timeline().find_item(item_id).unwrap().clone();
    let mut drag = DragGesture::begin(&snapshot);
    drag.update(15.0, Some(other_track));
    drag.commit(&mut editor);
    let moved = editor.timeline().find_item(item_id).unwrap();
    assert_eq!(moved.track_id, other_track);
    assert_eq!(moved.start_time, 15.0);

    // Razor at an interior point.
    let right_id = razor_split(&mut editor, item_id, 40.0).unwrap();
    assert!(editor.timeline().find_item(right_id).is_some());

    // Three gestures, three undo steps back to the original.
    editor.undo();
    assert!(editor.timeline().find_item(right_id).is_none());
    editor.undo();
    editor.undo();
    assert_eq!(*editor.timeline().find_item(item_id).unwrap(), original);
}

#[test]
fn redo_replays_split_with_same_ids() {
    let (mut editor, _, item_id) = editor_with_item();

    let right_id = editor.split_item_at_playhead(item_id, 30.0).unwrap();
    editor.undo();
    assert!(editor.timeline().find_item(right_id).is_none());

    editor.redo();
    assert!(editor.timeline().find_item(right_id).is_some());
}

#[test]
fn selection_survives_unrelated_edits_only() {
    let (mut editor, track_id, item_id) = editor_with_item();
    editor.selection_mut().select_only_item(item_id);

    editor.update_item(
        item_id,
        ItemPatch {
            volume: Some(0.5),
            ..Default::default()
        },
    );
    assert!(editor.selection().is_item_selected(item_id));

    editor.remove_track(track_id);
    assert!(editor.selection().is_empty());
}
